use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use bastion_core::AppError;
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejections are operational errors: 400 for
/// bad JSON, the body's own status (413 when over the size limit) when it
/// cannot be read.
///
/// Field validation is left to the services so guard clauses run before
/// `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

fn rejection_error(rejection: &JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("Missing 'Content-Type: application/json' header")
        }
        JsonRejection::JsonDataError(_) => AppError::bad_request("Invalid field type in request"),
        JsonRejection::BytesRejection(_) => {
            let status = rejection.status();
            if status == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::new(status, "Request body is too large")
            } else {
                AppError::new(status, "Failed to read request body")
            }
        }
        _ => AppError::bad_request("Invalid request body"),
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| rejection_error(&rejection))?;

        Ok(JsonBody(value))
    }
}
