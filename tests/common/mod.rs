#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use saludtotal::ApiService;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// In-memory stand-in for the Laravel backend.
#[derive(Clone, Default)]
pub struct Backend {
    pub solicitudes: Arc<Mutex<Vec<Value>>>,
    pub turnos: Arc<Mutex<Vec<Value>>>,
    /// Overrides the answer of every PATCH / POST when set.
    pub respuesta: Arc<Mutex<Option<(u16, Value)>>>,
    pub demora: Arc<Mutex<Duration>>,
    pub cargas: Arc<AtomicUsize>,
    pub mutaciones: Arc<AtomicUsize>,
    pub ultima_query: Arc<Mutex<HashMap<String, String>>>,
    pub ultimo_cuerpo: Arc<Mutex<Option<Value>>>,
}

impl Backend {
    pub fn with_solicitudes(solicitudes: Vec<Value>) -> Self {
        let backend = Backend::default();
        *backend.solicitudes.lock().unwrap() = solicitudes;
        backend
    }

    pub fn with_turnos(turnos: Vec<Value>) -> Self {
        let backend = Backend::default();
        *backend.turnos.lock().unwrap() = turnos;
        backend
    }

    pub fn responder(&self, estado: u16, cuerpo: Value) {
        *self.respuesta.lock().unwrap() = Some((estado, cuerpo));
    }

    pub fn demorar(&self, demora: Duration) {
        *self.demora.lock().unwrap() = demora;
    }

    pub fn cargas(&self) -> usize {
        self.cargas.load(Ordering::SeqCst)
    }

    pub fn mutaciones(&self) -> usize {
        self.mutaciones.load(Ordering::SeqCst)
    }

    pub fn query(&self, clave: &str) -> Option<String> {
        self.ultima_query.lock().unwrap().get(clave).cloned()
    }

    fn respuesta_configurada(&self) -> Option<(u16, Value)> {
        self.respuesta.lock().unwrap().clone()
    }

    async fn esperar(&self) {
        let demora = *self.demora.lock().unwrap();
        if !demora.is_zero() {
            tokio::time::sleep(demora).await;
        }
    }

    pub async fn spawn(self) -> String {
        let router = Router::new()
            .route("/turnos", get(listar_turnos))
            .route("/turnos/store", post(crear_turno))
            .route("/turnos/disponibles", get(disponibles))
            .route("/turnos/{id}/{accion}", patch(transicionar_turno))
            .route(
                "/turnos/solicitudes-reprogramacion",
                get(listar_reprogramaciones),
            )
            .route(
                "/turnos/solicitudes-reprogramacion/{id}/{accion}",
                patch(transicionar_solicitud),
            )
            .route("/turnos/solicitudes-cancelacion", get(listar_cancelaciones))
            .route(
                "/turnos/solicitudes-cancelacion/{id}/{accion}",
                patch(transicionar_solicitud),
            )
            .route("/pacientes", get(pacientes))
            .route("/pacientes/buscar", get(buscar_pacientes))
            .route("/profesionales/", get(profesionales).post(crear_profesional))
            .route("/profesionales/especialidades", get(especialidades))
            .route(
                "/profesionales/especialidades/{id}/doctores",
                get(doctores_por_especialidad),
            )
            .route("/profesionales/{id}/horarios", get(horarios))
            .route("/estadisticas/globales", get(estadisticas_globales))
            .route("/estadisticas/doctores", get(estadisticas_doctores))
            .route("/estadisticas/doctor/{id}", get(estadisticas_doctor))
            .with_state(self);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

async fn listar_turnos(
    State(backend): State<Backend>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    backend.cargas.fetch_add(1, Ordering::SeqCst);
    let estado = query.get("estado").cloned();
    *backend.ultima_query.lock().unwrap() = query;
    let turnos: Vec<Value> = backend
        .turnos
        .lock()
        .unwrap()
        .iter()
        .filter(|t| estado.as_deref().map_or(true, |e| t["estado"] == e))
        .cloned()
        .collect();
    Json(json!({"mensaje": "Turnos obtenidos", "turnos": turnos}))
}

async fn transicionar_turno(
    State(backend): State<Backend>,
    Path((id, accion)): Path<(i64, String)>,
    cuerpo: Bytes,
) -> impl IntoResponse {
    backend.mutaciones.fetch_add(1, Ordering::SeqCst);
    *backend.ultimo_cuerpo.lock().unwrap() = serde_json::from_slice(&cuerpo).ok();
    backend.esperar().await;
    if let Some((code, body)) = backend.respuesta_configurada() {
        return (status(code), Json(body));
    }
    let nuevo = match accion.as_str() {
        "aceptar" => "aceptado",
        "rechazar" => "rechazado",
        "cancelar" => "cancelado",
        _ => "pendiente",
    };
    let mut turnos = backend.turnos.lock().unwrap();
    match turnos.iter_mut().find(|t| t["id"] == id) {
        Some(turno) => {
            turno["estado"] = json!(nuevo);
            (StatusCode::OK, Json(json!({"mensaje": format!("Turno {nuevo}"), "turno": turno.clone()})))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"mensaje": "Turno no encontrado"}))),
    }
}

async fn crear_turno(
    State(backend): State<Backend>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    backend.mutaciones.fetch_add(1, Ordering::SeqCst);
    *backend.ultimo_cuerpo.lock().unwrap() = Some(json!(query));
    if let Some((code, body)) = backend.respuesta_configurada() {
        return (status(code), Json(body));
    }
    (StatusCode::CREATED, Json(json!({"mensaje": "Turno creado", "turno": {"id": 99}})))
}

async fn disponibles(
    State(backend): State<Backend>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    *backend.ultima_query.lock().unwrap() = query;
    Json(json!({"disponibles": ["08:00", "08:30:00", "09:00"]}))
}

fn listar(backend: &Backend) -> Vec<Value> {
    backend.cargas.fetch_add(1, Ordering::SeqCst);
    backend.solicitudes.lock().unwrap().clone()
}

async fn listar_reprogramaciones(State(backend): State<Backend>) -> impl IntoResponse {
    Json(Value::Array(listar(&backend)))
}

async fn listar_cancelaciones(State(backend): State<Backend>) -> impl IntoResponse {
    Json(json!({"success": true, "data": listar(&backend)}))
}

async fn transicionar_solicitud(
    State(backend): State<Backend>,
    Path((id, accion)): Path<(i64, String)>,
) -> impl IntoResponse {
    backend.mutaciones.fetch_add(1, Ordering::SeqCst);
    backend.esperar().await;
    if let Some((code, body)) = backend.respuesta_configurada() {
        if (200..300).contains(&code) {
            marcar(&backend, id, &accion);
        }
        return (status(code), Json(body));
    }
    if marcar(&backend, id, &accion) {
        (StatusCode::OK, Json(json!({"mensaje": "Solicitud procesada"})))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"mensaje": "Solicitud no encontrada"})),
        )
    }
}

fn marcar(backend: &Backend, id: i64, accion: &str) -> bool {
    let nuevo = if accion == "aceptar" { "aceptado" } else { "rechazado" };
    let mut solicitudes = backend.solicitudes.lock().unwrap();
    match solicitudes.iter_mut().find(|s| s["id"] == id) {
        Some(solicitud) => {
            solicitud["estado"] = json!(nuevo);
            true
        }
        None => false,
    }
}

async fn pacientes() -> impl IntoResponse {
    Json(json!([
        {"id": 1, "nombre": "Ana", "apellido": "Gómez", "dni": "30111222"},
        {"id": 2, "nombre": "Bruno", "apellido": "Sosa"}
    ]))
}

async fn buscar_pacientes(
    State(backend): State<Backend>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    *backend.ultima_query.lock().unwrap() = query;
    Json(json!({"mensaje": "ok", "pacientes": [{"id": 1, "nombre": "Ana", "apellido": "Gómez"}]}))
}

async fn profesionales() -> impl IntoResponse {
    Json(json!({"success": true, "data": [
        {"id": 4, "nombre": "Luis", "apellido": "Paz", "especialidad_id": 1}
    ]}))
}

async fn crear_profesional(
    State(backend): State<Backend>,
    Json(cuerpo): Json<Value>,
) -> impl IntoResponse {
    backend.mutaciones.fetch_add(1, Ordering::SeqCst);
    *backend.ultimo_cuerpo.lock().unwrap() = Some(cuerpo);
    if let Some((code, body)) = backend.respuesta_configurada() {
        return (status(code), Json(body));
    }
    (StatusCode::CREATED, Json(json!({"mensaje": "Profesional creado"})))
}

async fn especialidades() -> impl IntoResponse {
    Json(json!([{"id": 1, "nombre": "Cardiología"}, {"id": 2, "nombre": "Pediatría"}]))
}

async fn doctores_por_especialidad(Path(id): Path<i64>) -> impl IntoResponse {
    let doctores = if id == 1 {
        json!([{"id": 4, "nombre": "Luis", "apellido": "Paz", "especialidad_id": 1}])
    } else {
        json!([])
    };
    Json(json!({"success": true, "data": doctores}))
}

async fn horarios(Path(id): Path<i64>) -> impl IntoResponse {
    Json(json!({"mensaje": "ok", "horarios": [
        {"id": id, "dia_semana": "lunes", "hora_inicio": "08:00:00", "hora_fin": "12:00:00"}
    ]}))
}

async fn estadisticas_globales(
    State(backend): State<Backend>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    *backend.ultima_query.lock().unwrap() = query;
    Json(json!({"success": true, "data": {
        "total_turnos": 12, "total_pacientes": 5, "total_doctores": 2,
        "por_estado": {"atendido": 7, "pendiente": 5}
    }}))
}

async fn estadisticas_doctores() -> impl IntoResponse {
    Json(json!([
        {"doctor_id": 4, "doctor": "Luis Paz", "total": 8, "atendidos": 6},
        {"doctor_id": 5, "doctor": "Eva Ruiz", "total": 4, "atendidos": 1}
    ]))
}

async fn estadisticas_doctor(
    State(backend): State<Backend>,
    Path(_id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    *backend.ultima_query.lock().unwrap() = query;
    Json(json!({"mensaje": "ok", "estadisticas": {"total": 8, "atendidos": 6, "cancelados": 1}}))
}

/// Serves `cuerpo_get` to every GET and drops every other request without
/// answering, which the client sees as a transport failure.
pub async fn servidor_que_corta(cuerpo_get: Value) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let gets = Arc::new(AtomicUsize::new(0));
    let contador = Arc::clone(&gets);
    let cuerpo = cuerpo_get.to_string();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let contador = Arc::clone(&contador);
            let cuerpo = cuerpo.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                if buf[..n].starts_with(b"GET") {
                    contador.fetch_add(1, Ordering::SeqCst);
                    let respuesta = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        cuerpo.len(),
                        cuerpo
                    );
                    let _ = socket.write_all(respuesta.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                // Anything else: socket dropped here, no response.
            });
        }
    });

    (format!("http://{}", addr), gets)
}

/// Address where nothing listens.
pub async fn direccion_cerrada() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn api(url: &str) -> Arc<ApiService> {
    Arc::new(ApiService::new(url).unwrap())
}

pub fn solicitud(id: i64, estado: &str, paciente: &str, fecha: &str) -> Value {
    json!({
        "id": id,
        "turno_id": id * 10,
        "estado": estado,
        "fecha": fecha,
        "hora": "10:00",
        "turno": {
            "id": id * 10,
            "paciente_id": id,
            "doctor_id": 4,
            "fecha": "2025-05-01",
            "hora": "09:00:00",
            "estado": "aceptado",
            "paciente": {"nombre": paciente, "apellido": ""},
            "doctor": {"nombre": "Luis", "apellido": "Paz"}
        }
    })
}

pub fn turno(id: i64, estado: &str, paciente: &str, fecha: &str) -> Value {
    json!({
        "id": id,
        "paciente_id": id,
        "doctor_id": 4,
        "fecha": fecha,
        "hora": "09:00:00",
        "estado": estado,
        "paciente": {"nombre": paciente, "apellido": ""},
        "doctor": {"nombre": "Luis", "apellido": "Paz"}
    })
}
