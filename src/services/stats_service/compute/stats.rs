use crate::models::{EstadisticasDoctor, EstadoTurno, ResumenTurnos, Turno};
use std::collections::HashMap;

/// atendidos / (atendidos + desaprovechados). `None` until something closed.
pub fn tasa_asistencia(atendidos: u64, desaprovechados: u64) -> Option<f64> {
    let cerrados = atendidos + desaprovechados;
    if cerrados == 0 {
        None
    } else {
        Some(atendidos as f64 / cerrados as f64)
    }
}

pub fn resumen_turnos(turnos: &[Turno]) -> ResumenTurnos {
    let mut por_estado: HashMap<EstadoTurno, usize> = HashMap::new();
    let mut por_doctor: HashMap<String, usize> = HashMap::new();
    let mut con_solicitud = 0;

    for turno in turnos {
        *por_estado.entry(turno.estado).or_insert(0) += 1;

        let doctor = turno.nombre_doctor();
        let doctor = if doctor.is_empty() {
            format!("doctor #{}", turno.doctor_id)
        } else {
            doctor
        };
        *por_doctor.entry(doctor).or_insert(0) += 1;

        if turno.solicitud_cancelacion {
            con_solicitud += 1;
        }
    }

    let atendidos = por_estado.get(&EstadoTurno::Atendido).copied().unwrap_or(0);
    let desaprovechados = por_estado
        .get(&EstadoTurno::Desaprovechado)
        .copied()
        .unwrap_or(0);

    // Ties go to the alphabetically first name so the result is stable.
    let mut doctores: Vec<_> = por_doctor.into_iter().collect();
    doctores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ResumenTurnos {
        total: turnos.len(),
        por_estado,
        tasa_asistencia: tasa_asistencia(atendidos as u64, desaprovechados as u64),
        doctor_mas_solicitado: doctores.into_iter().next().map(|(nombre, _)| nombre),
        con_solicitud_cancelacion: con_solicitud,
    }
}

/// Doctors sorted by attended appointments, best first.
pub fn ranking_doctores(estadisticas: &[EstadisticasDoctor], top: usize) -> Vec<EstadisticasDoctor> {
    let mut ordenadas = estadisticas.to_vec();
    ordenadas.sort_by(|a, b| {
        b.atendidos
            .cmp(&a.atendidos)
            .then_with(|| b.total.cmp(&a.total))
    });
    ordenadas.into_iter().take(top).collect()
}
