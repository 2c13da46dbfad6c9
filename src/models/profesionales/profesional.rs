use crate::utils::date_utils;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Especialidad {
    pub id: i64,
    pub nombre: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Doctor {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[serde(default)]
    pub especialidad_id: Option<i64>,
    #[serde(default)]
    pub especialidad: Option<Especialidad>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub matricula: Option<String>,
}

impl Doctor {
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_string()
    }
}

/// Weekly working block of a doctor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Horario {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "dia")]
    pub dia_semana: String,
    #[serde(with = "date_utils::hora")]
    pub hora_inicio: NaiveTime,
    #[serde(with = "date_utils::hora")]
    pub hora_fin: NaiveTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NuevoProfesional {
    pub nombre: String,
    pub apellido: String,
    pub especialidad_id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matricula: Option<String>,
}

impl NuevoProfesional {
    /// Local checks before any network call. Returns field → messages like the backend does.
    pub fn validar(&self) -> Result<(), std::collections::HashMap<String, Vec<String>>> {
        let mut errores = std::collections::HashMap::new();
        if self.nombre.trim().is_empty() {
            errores.insert("nombre".to_string(), vec!["El nombre es obligatorio".to_string()]);
        }
        if self.apellido.trim().is_empty() {
            errores.insert(
                "apellido".to_string(),
                vec!["El apellido es obligatorio".to_string()],
            );
        }
        if !self.email.contains('@') {
            errores.insert("email".to_string(), vec!["El email no es válido".to_string()]);
        }
        if errores.is_empty() {
            Ok(())
        } else {
            Err(errores)
        }
    }
}
