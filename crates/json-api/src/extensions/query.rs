//! Query string parsing helpers.

use std::str::FromStr;

use jiff::Timestamp;
use salvo::prelude::{Request, StatusError};

use crate::extensions::*;

pub(crate) trait QueryExt {
    /// Parse an optional RFC 3339 query parameter. Empty values count as absent.
    fn timestamp_query(&self, name: &str) -> Result<Option<Timestamp>, StatusError>;

    /// Parse an optional numeric query parameter, falling back to `default`.
    fn number_query<T>(&self, name: &str, default: T) -> Result<T, StatusError>
    where
        T: FromStr,
        T::Err: std::fmt::Display;
}

impl QueryExt for Request {
    fn timestamp_query(&self, name: &str) -> Result<Option<Timestamp>, StatusError> {
        self.queries()
            .get(name)
            .filter(|value| !value.is_empty())
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400(&format!("could not parse \"{name}\" query parameter"))
    }

    fn number_query<T>(&self, name: &str, default: T) -> Result<T, StatusError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.queries()
            .get(name)
            .filter(|value| !value.is_empty())
            .map(|value| value.parse::<T>())
            .transpose()
            .map(|value| value.unwrap_or(default))
            .or_400(&format!("could not parse \"{name}\" query parameter"))
    }
}
