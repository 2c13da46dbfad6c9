use crate::api::ApiService;
use crate::models::{AppState, Doctor, Especialidad, Horario, NuevoProfesional, ResultadoApi};
use crate::viewmodels::mensajes::Mensajes;
use chrono::{NaiveDate, NaiveTime};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
struct Datos {
    especialidades: Vec<Especialidad>,
    especialidad: Option<i64>,
    doctores: Vec<Doctor>,
    horarios: Vec<Horario>,
    disponibles: Vec<NaiveTime>,
    mensajes: Mensajes,
}

/// Reference data behind the booking and professional forms: specialties,
/// doctors of the selected specialty, their weekly schedule and free slots.
pub struct ProfesionalesViewModel {
    api: Arc<ApiService>,
    datos: Mutex<Datos>,
}

impl ProfesionalesViewModel {
    pub fn new(api: Arc<ApiService>) -> Self {
        Self {
            api,
            datos: Mutex::new(Datos::default()),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(Arc::clone(&state.api))
    }

    fn datos(&self) -> MutexGuard<'_, Datos> {
        self.datos.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn cargar_especialidades(&self) -> bool {
        match self.api.listar_especialidades().await {
            Ok(especialidades) => {
                self.datos().especialidades = especialidades;
                true
            }
            Err(e) => {
                log::error!("No se pudieron cargar las especialidades: {}", e);
                self.datos()
                    .mensajes
                    .set_error(format!("No se pudieron cargar las especialidades: {}", e));
                false
            }
        }
    }

    /// Selecting a specialty replaces the doctor list and clears the schedule.
    pub async fn seleccionar_especialidad(&self, especialidad_id: i64) -> bool {
        {
            let mut datos = self.datos();
            datos.especialidad = Some(especialidad_id);
            datos.doctores.clear();
            datos.horarios.clear();
            datos.disponibles.clear();
        }
        match self.api.doctores_por_especialidad(especialidad_id).await {
            Ok(doctores) => {
                let mut datos = self.datos();
                // A later selection wins over a slow earlier response.
                if datos.especialidad == Some(especialidad_id) {
                    datos.doctores = doctores;
                }
                true
            }
            Err(e) => {
                self.datos()
                    .mensajes
                    .set_error(format!("No se pudieron cargar los profesionales: {}", e));
                false
            }
        }
    }

    pub async fn cargar_horarios(&self, doctor_id: i64) -> bool {
        match self.api.horarios_profesional(doctor_id).await {
            Ok(horarios) => {
                self.datos().horarios = horarios;
                true
            }
            Err(e) => {
                self.datos()
                    .mensajes
                    .set_error(format!("No se pudieron cargar los horarios: {}", e));
                false
            }
        }
    }

    pub async fn cargar_disponibles(&self, doctor_id: i64, fecha: NaiveDate) -> bool {
        match self.api.turnos_disponibles(doctor_id, fecha).await {
            Ok(disponibles) => {
                self.datos().disponibles = disponibles;
                true
            }
            Err(e) => {
                self.datos()
                    .mensajes
                    .set_error(format!("No se pudieron cargar los turnos disponibles: {}", e));
                false
            }
        }
    }

    pub async fn crear(&self, nuevo: &NuevoProfesional) -> ResultadoApi {
        let resultado = self.api.crear_profesional(nuevo).await;
        if resultado.exito {
            self.datos().mensajes.set_estado(resultado.mensaje.clone());
            let misma_especialidad = self.datos().especialidad == Some(nuevo.especialidad_id);
            if misma_especialidad {
                self.seleccionar_especialidad(nuevo.especialidad_id).await;
            }
        } else {
            self.datos().mensajes.set_error(resultado.mensaje_completo());
        }
        resultado
    }

    pub fn especialidades(&self) -> Vec<Especialidad> {
        self.datos().especialidades.clone()
    }

    pub fn especialidad_seleccionada(&self) -> Option<i64> {
        self.datos().especialidad
    }

    pub fn doctores(&self) -> Vec<Doctor> {
        self.datos().doctores.clone()
    }

    pub fn horarios(&self) -> Vec<Horario> {
        self.datos().horarios.clone()
    }

    pub fn disponibles(&self) -> Vec<NaiveTime> {
        self.datos().disponibles.clone()
    }

    pub fn mensajes(&self) -> Mensajes {
        self.datos().mensajes.clone()
    }
}
