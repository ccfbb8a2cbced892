use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

/// Errors the HTTP layer reports back to the caller.
///
/// The calculation itself never fails; everything here is about a request that
/// cannot be turned into a typed `PayrollRequest` or matched to a rate snapshot.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Invalid month '{}', expected YYYY-MM", _0)]
    InvalidMonth(String),

    #[display(fmt = "No statutory rates in force for {}", _0)]
    RatesNotEffective(String),

    #[display(fmt = "Malformed request body: {}", _0)]
    BadPayload(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidMonth(_) | ApiError::BadPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::RatesNotEffective(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_status_codes() {
        assert_eq!(
            ApiError::InvalidMonth("2025-13".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadPayload("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::RatesNotEffective("2001-01".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn message_names_the_bad_value() {
        let err = ApiError::InvalidMonth("April".into());
        assert_eq!(err.to_string(), "Invalid month 'April', expected YYYY-MM");
    }
}
