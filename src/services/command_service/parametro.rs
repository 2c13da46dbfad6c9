use std::fmt;

/// Command parameter as a UI trigger hands it over: nothing, an id, or text
/// that may or may not hold an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parametro {
    Nulo,
    Id(i64),
    Texto(String),
}

impl Parametro {
    pub fn id(&self) -> Option<i64> {
        match self {
            Parametro::Nulo => None,
            Parametro::Id(id) => Some(*id),
            Parametro::Texto(raw) => raw.trim().parse().ok(),
        }
    }

    pub fn es_nulo(&self) -> bool {
        matches!(self, Parametro::Nulo)
    }
}

impl From<i64> for Parametro {
    fn from(id: i64) -> Self {
        Parametro::Id(id)
    }
}

impl From<Option<i64>> for Parametro {
    fn from(id: Option<i64>) -> Self {
        id.map(Parametro::Id).unwrap_or(Parametro::Nulo)
    }
}

impl From<&str> for Parametro {
    fn from(raw: &str) -> Self {
        Parametro::Texto(raw.to_string())
    }
}

impl From<String> for Parametro {
    fn from(raw: String) -> Self {
        Parametro::Texto(raw)
    }
}

impl fmt::Display for Parametro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parametro::Nulo => write!(f, "null"),
            Parametro::Id(id) => write!(f, "{id}"),
            Parametro::Texto(raw) => write!(f, "{raw:?}"),
        }
    }
}
