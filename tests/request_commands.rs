mod common;

use common::{api, direccion_cerrada, servidor_que_corta, solicitud, Backend};
use saludtotal::models::{EstadoSolicitud, TipoSolicitud};
use saludtotal::viewmodels::{CampoBusqueda, Direccion, FiltroEstado, RequestsViewModel};
use serde_json::json;
use std::sync::atomic::Ordering;
use std::time::Duration;

async fn cargado(backend: Backend, tipo: TipoSolicitud) -> (RequestsViewModel, Backend) {
    let url = backend.clone().spawn().await;
    let vm = RequestsViewModel::new(api(&url), tipo, Duration::ZERO);
    assert!(vm.cargar().await);
    (vm, backend)
}

#[tokio::test]
async fn approving_a_pending_request_publishes_the_message_and_reloads() {
    let backend = Backend::with_solicitudes(vec![solicitud(7, "pendiente", "Ana", "2025-06-01")]);
    backend.responder(200, json!({"mensaje": "ok"}));
    let (vm, backend) = cargado(backend, TipoSolicitud::Reprogramacion).await;
    assert_eq!(backend.cargas(), 1);
    assert!(vm.can_execute_accept_request(Some(7)));

    assert!(vm.aceptar.execute(7i64).await);

    assert_eq!(vm.lista().mensaje_estado().as_deref(), Some("ok"));
    assert!(vm.lista().mensaje_error().is_none());
    assert!(vm.lista().ejecutando().is_empty());
    assert_eq!(backend.mutaciones(), 1);
    assert_eq!(backend.cargas(), 2);
    assert_eq!(
        vm.lista().buscar(7).map(|s| s.estado),
        Some(EstadoSolicitud::Aceptado)
    );
    assert!(!vm.can_execute_accept_request(Some(7)));
}

#[tokio::test]
async fn an_accepted_request_cannot_be_approved_again() {
    let backend = Backend::with_solicitudes(vec![solicitud(7, "aceptado", "Ana", "2025-06-01")]);
    let (vm, backend) = cargado(backend, TipoSolicitud::Reprogramacion).await;

    assert!(!vm.can_execute_accept_request(Some(7)));
    assert!(!vm.can_execute_reject_request(Some(7)));
    assert!(!vm.aceptar.execute(7i64).await);

    assert_eq!(backend.mutaciones(), 0);
    assert_eq!(backend.cargas(), 1);
}

#[tokio::test]
async fn null_unknown_and_non_numeric_parameters() {
    let backend = Backend::with_solicitudes(vec![solicitud(7, "pendiente", "Ana", "2025-06-01")]);
    let (vm, backend) = cargado(backend, TipoSolicitud::Cancelacion).await;

    assert!(!vm.can_execute_accept_request(None));
    assert!(!vm.can_execute_accept_request(Some(99)));

    assert!(vm.aceptar.can_execute("abc"));
    assert!(vm.aceptar.execute("abc").await);
    assert_eq!(
        vm.lista().mensaje_error().as_deref(),
        Some("Parámetro inválido")
    );
    assert_eq!(backend.mutaciones(), 0);

    assert!(vm.aceptar.execute("7").await);
    assert_eq!(backend.mutaciones(), 1);
}

#[tokio::test]
async fn in_flight_id_is_blocked_while_other_ids_proceed() {
    let backend = Backend::with_solicitudes(vec![
        solicitud(7, "pendiente", "Ana", "2025-06-01"),
        solicitud(8, "pendiente", "Bruno", "2025-06-02"),
    ]);
    backend.responder(422, json!({"mensaje": "Horario ocupado"}));
    backend.demorar(Duration::from_millis(300));
    let (vm, backend) = cargado(backend, TipoSolicitud::Reprogramacion).await;

    let observador = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let bloqueado = !vm.can_execute_accept_request(Some(7));
        let rechazo_bloqueado = !vm.can_execute_reject_request(Some(7));
        let otro_libre = vm.can_execute_accept_request(Some(8));
        let repetido = vm.aceptar.execute(7i64).await;
        (bloqueado, rechazo_bloqueado, otro_libre, repetido)
    };

    let (ejecutado, (bloqueado, rechazo_bloqueado, otro_libre, repetido)) =
        tokio::join!(vm.aceptar.execute(7i64), observador);

    assert!(ejecutado);
    assert!(bloqueado);
    assert!(rechazo_bloqueado);
    assert!(otro_libre);
    assert!(!repetido);
    assert_eq!(backend.mutaciones(), 1);

    // Business failure leaves the request pending, so it is actionable again.
    assert!(vm.can_execute_accept_request(Some(7)));
    let error = vm.lista().mensaje_error().unwrap_or_default();
    assert!(error.contains("Horario ocupado"), "{error}");
}

#[tokio::test]
async fn executing_set_notifies_start_and_end() {
    let backend = Backend::with_solicitudes(vec![solicitud(7, "pendiente", "Ana", "2025-06-01")]);
    let (vm, _backend) = cargado(backend, TipoSolicitud::Reprogramacion).await;
    let rx = vm.lista().ejecutando().subscribe();
    let antes = *rx.borrow();

    vm.rechazar.execute(7i64).await;

    assert_eq!(*rx.borrow() - antes, 2);
    assert_eq!(
        vm.lista().buscar(7).map(|s| s.estado),
        Some(EstadoSolicitud::Rechazado)
    );
}

#[tokio::test]
async fn transport_failure_becomes_an_error_message() {
    let (url, gets) =
        servidor_que_corta(json!([solicitud(7, "pendiente", "Ana", "2025-06-01")])).await;
    let vm = RequestsViewModel::new(api(&url), TipoSolicitud::Reprogramacion, Duration::ZERO);
    assert!(vm.cargar().await);
    assert_eq!(gets.load(Ordering::SeqCst), 1);

    assert!(vm.aceptar.execute(7i64).await);

    let error = vm.lista().mensaje_error().unwrap_or_default();
    assert!(error.contains("Error de conexión"), "{error}");
    assert!(error.contains("#7"), "{error}");
    assert!(vm.lista().ejecutando().is_empty());
    assert_eq!(gets.load(Ordering::SeqCst), 2);
    assert!(vm.can_execute_accept_request(Some(7)));
}

#[tokio::test]
async fn unreachable_backend_on_load_is_reported() {
    let vm = RequestsViewModel::new(
        api(&direccion_cerrada().await),
        TipoSolicitud::Cancelacion,
        Duration::ZERO,
    );
    assert!(!vm.cargar().await);
    let error = vm.lista().mensaje_error().unwrap_or_default();
    assert!(error.starts_with("No se pudieron cargar"), "{error}");
    assert!(vm.lista().items().is_empty());
}

#[tokio::test]
async fn search_filter_and_sort_over_wrapped_list() {
    let backend = Backend::with_solicitudes(vec![
        solicitud(1, "pendiente", "Ana Gómez", "2025-06-03"),
        solicitud(2, "aceptado", "Bruno Sosa", "2025-06-01"),
        solicitud(3, "pendiente", "Carla Gómez", "2025-06-02"),
    ]);
    // Cancellation requests come wrapped in `{success, data}`.
    let (vm, backend) = cargado(backend, TipoSolicitud::Cancelacion).await;
    let lista = vm.lista();
    assert_eq!(lista.items().len(), 3);

    lista
        .set_busqueda("GÓMEZ", CampoBusqueda::Paciente)
        .await;
    let ids: Vec<i64> = lista.visibles().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);

    assert!(lista.ordenar_por("fecha").await);
    let ids: Vec<i64> = lista.visibles().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![3, 1]);

    assert!(lista.ordenar_por("fecha").await);
    assert_eq!(lista.orden().direccion, Direccion::Descendente);
    let ids: Vec<i64> = lista.visibles().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);

    assert!(!lista.ordenar_por("color").await);

    lista.set_busqueda("", CampoBusqueda::Paciente).await;
    lista
        .set_filtro_estado(FiltroEstado::Solo(EstadoSolicitud::Aceptado))
        .await;
    let ids: Vec<i64> = lista.visibles().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2]);
    assert!(vm.pendientes().is_empty());

    // Initial load plus one per filter / sort change, the unknown column excluded.
    assert_eq!(backend.cargas(), 6);
}

#[tokio::test]
async fn minimum_delay_runs_before_the_network_call() {
    let backend = Backend::with_solicitudes(vec![solicitud(7, "pendiente", "Ana", "2025-06-01")]);
    let url = backend.clone().spawn().await;
    let vm = RequestsViewModel::new(
        api(&url),
        TipoSolicitud::Reprogramacion,
        Duration::from_millis(200),
    );
    assert!(vm.cargar().await);

    let inicio = std::time::Instant::now();
    let observador = async {
        tokio::time::sleep(Duration::from_millis(80)).await;
        (
            vm.lista().ejecutando().contains(&7),
            backend.mutaciones(),
            vm.can_execute_accept_request(Some(7)),
        )
    };
    let (ejecutado, (en_curso, mutaciones_a_mitad, libre_a_mitad)) =
        tokio::join!(vm.aceptar.execute(7i64), observador);

    assert!(ejecutado);
    assert!(en_curso);
    assert_eq!(mutaciones_a_mitad, 0);
    assert!(!libre_a_mitad);
    assert!(inicio.elapsed() >= Duration::from_millis(200));
    assert_eq!(backend.mutaciones(), 1);
    assert!(vm.lista().ejecutando().is_empty());
}
