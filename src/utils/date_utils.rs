use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Laravel sends `hora` as `HH:MM:SS` from the database but forms post `HH:MM`.
pub fn parse_hora(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Accepts `YYYY-MM-DD` and ISO datetimes (`2025-03-10T00:00:00.000000Z`).
pub fn parse_fecha(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn formato_hora(hora: &NaiveTime) -> String {
    hora.format("%H:%M").to_string()
}

pub mod hora {
    use super::*;

    pub fn serialize<S: Serializer>(hora: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&formato_hora(hora))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_hora(&raw).ok_or_else(|| serde::de::Error::custom(format!("hora inválida: {raw}")))
    }
}

pub mod hora_opcional {
    use super::*;

    pub fn serialize<S: Serializer>(
        hora: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match hora {
            Some(h) => serializer.serialize_str(&formato_hora(h)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_hora(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("hora inválida: {raw}"))),
        }
    }
}

pub mod fecha {
    use super::*;

    pub fn serialize<S: Serializer>(fecha: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&fecha.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_fecha(&raw).ok_or_else(|| serde::de::Error::custom(format!("fecha inválida: {raw}")))
    }
}

pub mod fecha_opcional {
    use super::*;

    pub fn serialize<S: Serializer>(
        fecha: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match fecha {
            Some(f) => serializer.serialize_str(&f.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_fecha(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("fecha inválida: {raw}"))),
        }
    }
}
