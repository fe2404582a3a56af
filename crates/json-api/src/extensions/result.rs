//! Client input errors.

use std::fmt::Display;

use salvo::prelude::StatusError;

pub(crate) trait ResultExt<T> {
    /// Reject unparseable input with a 400 whose brief names what was wrong.
    fn or_400(self, brief: &str) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_400(self, brief: &str) -> Result<T, StatusError> {
        self.map_err(|error| StatusError::bad_request().brief(format!("{brief}: {error}")))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use pvz_app::domain::pickup_points::records::City;

    use super::*;

    #[test]
    fn parse_failure_becomes_bad_request() {
        let error = "Омск".parse::<City>().or_400("Invalid city").err();

        assert_eq!(error.as_ref().map(|error| error.code), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            error.map(|error| error.brief),
            Some("Invalid city: unknown city: Омск".to_string())
        );
    }

    #[test]
    fn success_passes_through() {
        let city = "Kazan".parse::<City>().or_400("Invalid city").ok();

        assert_eq!(city, Some(City::Kazan));
    }
}
