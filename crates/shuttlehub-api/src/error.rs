//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl for `AppError` lives in `shuttlehub-core` (the crate
//! that defines `AppError`) to satisfy the orphan rule; it is re-exported here
//! alongside the response DTO so callers can keep using `api::error`.

pub use shuttlehub_core::error::ApiErrorResponse;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use shuttlehub_core::error::AppError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::state_conflict("x"), StatusCode::BAD_REQUEST),
            (AppError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (AppError::forbidden("x"), StatusCode::FORBIDDEN),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::conflict("x"), StatusCode::CONFLICT),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::database("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
