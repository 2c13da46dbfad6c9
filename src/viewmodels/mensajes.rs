/// Status / error message panel shared by the view-models. Setting one clears
/// the other so the panel always shows the latest outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mensajes {
    pub estado: Option<String>,
    pub error: Option<String>,
}

impl Mensajes {
    pub fn set_estado(&mut self, mensaje: impl Into<String>) {
        self.estado = Some(mensaje.into());
        self.error = None;
    }

    pub fn set_error(&mut self, mensaje: impl Into<String>) {
        self.error = Some(mensaje.into());
        self.estado = None;
    }

    pub fn limpiar(&mut self) {
        *self = Mensajes::default();
    }
}
