//! Reception Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::{domain::pickup_points::records::PickupPointUuid, uuids::TypedUuid};

/// Reception UUID
pub type ReceptionUuid = TypedUuid<ReceptionRecord>;

/// Reception lifecycle state. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceptionStatus {
    InProgress,
    Closed,
}

impl ReceptionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ReceptionStatus::InProgress => "in_progress",
            ReceptionStatus::Closed => "close",
        }
    }
}

impl Display for ReceptionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown reception status: {0}")]
pub struct UnknownReceptionStatus(pub String);

impl FromStr for ReceptionStatus {
    type Err = UnknownReceptionStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "in_progress" => Ok(ReceptionStatus::InProgress),
            "close" => Ok(ReceptionStatus::Closed),
            other => Err(UnknownReceptionStatus(other.to_string())),
        }
    }
}

/// Reception Record
#[derive(Debug, Clone, PartialEq)]
pub struct ReceptionRecord {
    pub uuid: ReceptionUuid,
    pub pickup_point_uuid: PickupPointUuid,
    pub status: ReceptionStatus,
    pub opened_at: Timestamp,
}

impl ReceptionRecord {
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == ReceptionStatus::InProgress
    }
}
