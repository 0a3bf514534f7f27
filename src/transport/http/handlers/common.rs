use crate::infra::config::ErrorMapping;
use crate::storage::{StoreError, StoreErrorClass};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Status used for a failed store operation.
///
/// In `Uniform` mode every failure is a 404, including failures that are
/// really conflicts or server errors.
pub fn store_error_status(mapping: ErrorMapping, err: &StoreError) -> StatusCode {
    match mapping {
        ErrorMapping::Uniform => StatusCode::NOT_FOUND,
        ErrorMapping::Classified => match err.class() {
            StoreErrorClass::NotFound => StatusCode::NOT_FOUND,
            StoreErrorClass::Conflict => StatusCode::CONFLICT,
            StoreErrorClass::InvalidInput => StatusCode::BAD_REQUEST,
            StoreErrorClass::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            StoreErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

/// Renders a store outcome: the payload under `success` on Ok, the raw error
/// body on Err.
pub fn respond<T: Serialize>(
    mapping: ErrorMapping,
    success: StatusCode,
    outcome: Result<T, StoreError>,
) -> Response {
    match outcome {
        Ok(payload) => (success, Json(payload)).into_response(),
        Err(err) => (store_error_status(mapping, &err), Json(err)).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_mapping_hides_the_cause() {
        for err in [
            StoreError::database("23505", "duplicate key"),
            StoreError::database("22P02", "invalid input syntax for type integer"),
            StoreError::driver("POOL_TIMED_OUT", "pool timed out"),
            StoreError::database("42P01", "relation \"produtos\" does not exist"),
        ] {
            assert_eq!(store_error_status(ErrorMapping::Uniform, &err), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn classified_mapping_follows_error_class() {
        let cases = [
            (StoreError::database("23505", "duplicate key"), StatusCode::CONFLICT),
            (StoreError::database("22P02", "invalid input"), StatusCode::BAD_REQUEST),
            (StoreError::database("P0002", "no data"), StatusCode::NOT_FOUND),
            (StoreError::driver("IO_ERROR", "reset"), StatusCode::SERVICE_UNAVAILABLE),
            (StoreError::database("42P01", "missing table"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(store_error_status(ErrorMapping::Classified, &err), expected);
        }
    }

    #[test]
    fn respond_uses_success_status_on_ok() {
        let resp = respond::<u8>(ErrorMapping::Uniform, StatusCode::CREATED, Ok(1));
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = respond::<u8>(
            ErrorMapping::Uniform,
            StatusCode::CREATED,
            Err(StoreError::database("23505", "duplicate key")),
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
