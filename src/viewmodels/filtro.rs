use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Status filter: everything, or a single domain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltroEstado<E> {
    Todos,
    Solo(E),
}

impl<E> Default for FiltroEstado<E> {
    fn default() -> Self {
        FiltroEstado::Todos
    }
}

impl<E: PartialEq> FiltroEstado<E> {
    pub fn admite(&self, estado: &E) -> bool {
        match self {
            FiltroEstado::Todos => true,
            FiltroEstado::Solo(esperado) => esperado == estado,
        }
    }
}

impl<E: FromStr> FromStr for FiltroEstado<E> {
    type Err = E::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "todos" | "todas" => Ok(FiltroEstado::Todos),
            other => other.parse().map(FiltroEstado::Solo),
        }
    }
}

/// Which field the free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampoBusqueda {
    #[default]
    Paciente,
    Profesional,
    Fecha,
}

impl FromStr for CampoBusqueda {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paciente" => Ok(CampoBusqueda::Paciente),
            "profesional" | "doctor" => Ok(CampoBusqueda::Profesional),
            "fecha" => Ok(CampoBusqueda::Fecha),
            other => Err(format!("campo de búsqueda desconocido: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtro<E> {
    pub estado: FiltroEstado<E>,
    pub busqueda: String,
    pub campo: CampoBusqueda,
}

impl<E> Default for Filtro<E> {
    fn default() -> Self {
        Self {
            estado: FiltroEstado::Todos,
            busqueda: String::new(),
            campo: CampoBusqueda::default(),
        }
    }
}

impl<E> Filtro<E> {
    /// Case-insensitive substring match; an empty term matches everything.
    pub fn coincide_texto(&self, valor: &str) -> bool {
        let termino = self.busqueda.trim().to_lowercase();
        termino.is_empty() || valor.to_lowercase().contains(&termino)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direccion {
    #[default]
    Ascendente,
    Descendente,
}

impl Direccion {
    pub fn invertir(self) -> Self {
        match self {
            Direccion::Ascendente => Direccion::Descendente,
            Direccion::Descendente => Direccion::Ascendente,
        }
    }
}

impl fmt::Display for Direccion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direccion::Ascendente => write!(f, "asc"),
            Direccion::Descendente => write!(f, "desc"),
        }
    }
}

/// Sort state. No column means backend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Orden {
    pub columna: Option<&'static str>,
    pub direccion: Direccion,
}

impl Orden {
    /// Header click: the same column flips direction, a new one starts ascending.
    pub fn alternar(&mut self, columna: &'static str) {
        if self.columna == Some(columna) {
            self.direccion = self.direccion.invertir();
        } else {
            self.columna = Some(columna);
            self.direccion = Direccion::Ascendente;
        }
    }
}

/// Comparable value extracted from an entity for one column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClaveOrden {
    Vacio,
    Entero(i64),
    Texto(String),
    Fecha(NaiveDate),
    FechaHora(NaiveDateTime),
}

impl ClaveOrden {
    pub fn texto(valor: impl AsRef<str>) -> Self {
        let valor = valor.as_ref().trim();
        if valor.is_empty() {
            ClaveOrden::Vacio
        } else {
            ClaveOrden::Texto(valor.to_lowercase())
        }
    }
}

/// One sortable column: its header name and how to pull the key out.
pub struct Columna<T: 'static> {
    pub nombre: &'static str,
    pub clave: fn(&T) -> ClaveOrden,
}

/// Key-extractor table lookup, resolved by column name.
pub fn buscar_columna<T: 'static>(columnas: &'static [Columna<T>], nombre: &str) -> Option<&'static Columna<T>> {
    columnas
        .iter()
        .find(|c| c.nombre.eq_ignore_ascii_case(nombre))
}

/// Stable sort by the current `orden`; unknown or unset columns leave `items` as is.
pub fn ordenar<T: 'static>(items: &mut [T], columnas: &'static [Columna<T>], orden: &Orden) {
    let Some(columna) = orden.columna.and_then(|nombre| buscar_columna(columnas, nombre)) else {
        return;
    };
    let clave = columna.clave;
    items.sort_by(|a, b| {
        let cmp: Ordering = clave(a).cmp(&clave(b));
        match orden.direccion {
            Direccion::Ascendente => cmp,
            Direccion::Descendente => cmp.reverse(),
        }
    });
}
