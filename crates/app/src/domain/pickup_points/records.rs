//! Pickup Point Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Pickup Point UUID
pub type PickupPointUuid = TypedUuid<PickupPointRecord>;

/// Cities a pickup point may be registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Moscow,
    SaintPetersburg,
    Kazan,
}

impl City {
    /// All supported cities.
    pub const ALL: [City; 3] = [City::Moscow, City::SaintPetersburg, City::Kazan];

    /// Canonical name, as stored and rendered.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            City::Moscow => "Москва",
            City::SaintPetersburg => "Санкт-Петербург",
            City::Kazan => "Казань",
        }
    }
}

impl Display for City {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown city: {0}")]
pub struct UnknownCity(pub String);

impl FromStr for City {
    type Err = UnknownCity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Москва" | "Moscow" => Ok(City::Moscow),
            "Санкт-Петербург" | "Saint Petersburg" => Ok(City::SaintPetersburg),
            "Казань" | "Kazan" => Ok(City::Kazan),
            other => Err(UnknownCity(other.to_string())),
        }
    }
}

/// Pickup Point Record
#[derive(Debug, Clone, PartialEq)]
pub struct PickupPointRecord {
    pub uuid: PickupPointUuid,
    pub city: City,
    pub registered_at: Timestamp,
}
