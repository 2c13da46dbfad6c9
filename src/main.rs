use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use saludtotal::models::{AppState, Config, EstadoTurno, RangoFechas, TipoSolicitud};
use saludtotal::services::ranking_doctores;
use saludtotal::utils::{formato_hora, init_logging, parse_fecha};
use saludtotal::viewmodels::{FiltroEstado, RequestsViewModel, ShiftsViewModel};

const USO: &str = "uso:
  saludtotal turnos [estado]
  saludtotal solicitudes <reprogramacion|cancelacion>
  saludtotal aceptar <reprogramacion|cancelacion> <id>
  saludtotal rechazar <reprogramacion|cancelacion> <id>
  saludtotal estadisticas [desde hasta]";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("configuración inválida")?;
    init_logging(&config.log_level);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let state = AppState::new(config).context("no se pudo crear el cliente HTTP")?;
    log::info!("Backend: {}", state.api.base_url());

    match args.first().map(String::as_str) {
        Some("turnos") => listar_turnos(&state, args.get(1)).await,
        Some("solicitudes") => listar_solicitudes(&state, tipo(args.get(1))?).await,
        Some(accion @ ("aceptar" | "rechazar")) => {
            let id: i64 = args
                .get(2)
                .context(USO)?
                .parse()
                .context("el id debe ser un número")?;
            decidir_solicitud(&state, tipo(args.get(1))?, id, accion == "aceptar").await
        }
        Some("estadisticas") => {
            estadisticas(&state, fecha(args.get(1))?, fecha(args.get(2))?).await
        }
        _ => {
            println!("{}", USO);
            Ok(())
        }
    }
}

fn tipo(arg: Option<&String>) -> Result<TipoSolicitud> {
    match arg {
        Some(raw) => raw.parse().map_err(anyhow::Error::msg),
        None => bail!(USO),
    }
}

fn fecha(arg: Option<&String>) -> Result<Option<NaiveDate>> {
    arg.map(|raw| parse_fecha(raw).with_context(|| format!("fecha inválida: {raw}")))
        .transpose()
}

async fn listar_turnos(state: &AppState, estado: Option<&String>) -> Result<()> {
    let vm = ShiftsViewModel::from_state(state);
    if let Some(raw) = estado {
        let filtro: FiltroEstado<EstadoTurno> = raw.parse().map_err(anyhow::Error::msg)?;
        vm.lista().set_filtro_estado(filtro).await;
    } else {
        vm.cargar().await;
    }
    if let Some(error) = vm.lista().mensaje_error() {
        bail!(error);
    }

    println!("{:>5}  {:<10} {:<5}  {:<24} {:<24} {}", "id", "fecha", "hora", "paciente", "profesional", "estado");
    for turno in vm.lista().visibles() {
        println!(
            "{:>5}  {:<10} {:<5}  {:<24} {:<24} {}{}",
            turno.id,
            turno.fecha.to_string(),
            formato_hora(&turno.hora),
            turno.nombre_paciente(),
            turno.nombre_doctor(),
            turno.estado,
            if turno.solicitud_cancelacion { " *" } else { "" }
        );
    }

    let resumen = vm.resumen();
    println!("\n{} turnos", resumen.total);
    if let Some(tasa) = resumen.tasa_asistencia {
        println!("asistencia: {:.1}%", tasa * 100.0);
    }
    if let Some(doctor) = resumen.doctor_mas_solicitado {
        println!("más solicitado: {}", doctor);
    }
    Ok(())
}

async fn listar_solicitudes(state: &AppState, tipo: TipoSolicitud) -> Result<()> {
    let vm = RequestsViewModel::from_state(state, tipo);
    vm.cargar().await;
    if let Some(error) = vm.lista().mensaje_error() {
        bail!(error);
    }
    for solicitud in vm.lista().visibles() {
        let propuesta = match (solicitud.fecha, solicitud.hora) {
            (Some(f), Some(h)) => format!("{} {}", f, formato_hora(&h)),
            (Some(f), None) => f.to_string(),
            _ => "-".to_string(),
        };
        println!(
            "{:>5}  turno {:>5}  {:<10} {:<16}  {}",
            solicitud.id,
            solicitud.turno_id,
            solicitud.estado.as_str(),
            propuesta,
            solicitud.nombre_paciente()
        );
    }
    Ok(())
}

async fn decidir_solicitud(state: &AppState, tipo: TipoSolicitud, id: i64, aceptar: bool) -> Result<()> {
    let vm = RequestsViewModel::from_state(state, tipo);
    if !vm.cargar().await {
        bail!(vm
            .lista()
            .mensaje_error()
            .unwrap_or_else(|| format!("no se pudieron cargar las solicitudes de {}", tipo)));
    }

    let comando = if aceptar { &vm.aceptar } else { &vm.rechazar };
    if !comando.can_execute(id) {
        match vm.lista().buscar(id) {
            None => bail!("no hay una solicitud {} con id {}", tipo, id),
            Some(s) => bail!("la solicitud {} está {} y no admite cambios", id, s.estado),
        }
    }

    comando.execute(id).await;
    let mensajes = vm.lista().mensajes();
    if let Some(error) = mensajes.error {
        bail!(error);
    }
    if let Some(estado) = mensajes.estado {
        println!("{}", estado);
    }
    Ok(())
}

async fn estadisticas(state: &AppState, desde: Option<NaiveDate>, hasta: Option<NaiveDate>) -> Result<()> {
    let rango = RangoFechas::new(desde, hasta);
    if !rango.es_valido() {
        bail!("'desde' debe ser anterior a 'hasta'");
    }

    let globales = state.api.estadisticas_globales(&rango).await?;
    println!(
        "turnos: {}  pacientes: {}  doctores: {}",
        globales.total_turnos, globales.total_pacientes, globales.total_doctores
    );
    let mut por_estado: Vec<_> = globales.por_estado.into_iter().collect();
    por_estado.sort();
    for (estado, total) in por_estado {
        println!("  {:<16} {}", estado, total);
    }

    let doctores = state.api.estadisticas_doctores(&rango).await?;
    println!("\nprofesionales con más turnos atendidos:");
    for stats in ranking_doctores(&doctores, 5) {
        let nombre = stats
            .doctor
            .clone()
            .or_else(|| stats.doctor_id.map(|id| format!("#{id}")))
            .unwrap_or_default();
        println!("  {:<24} {:>4} / {:<4}", nombre, stats.atendidos, stats.total);
    }
    Ok(())
}
