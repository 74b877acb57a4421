use crate::domain::error::ServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so the HTTP mapping lives in the adapter
/// layer, not in the domain.
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            ServiceError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            ServiceError::MissingSignature => (
                StatusCode::BAD_REQUEST,
                "missing_signature",
                "missing Stripe-Signature header".to_string(),
            ),
            // The signer learns only that verification failed, not why.
            ServiceError::InvalidSignature(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_signature",
                "invalid webhook signature".to_string(),
            ),
            ServiceError::MalformedPayload(_) => (
                StatusCode::BAD_REQUEST,
                "malformed_payload",
                "malformed webhook payload".to_string(),
            ),
            ServiceError::ProviderRejected(msg) => {
                (StatusCode::BAD_REQUEST, "provider_rejected", msg.clone())
            }
            ServiceError::Provider(msg) => {
                tracing::error!("provider error: {msg}");
                (StatusCode::BAD_GATEWAY, "provider_error", msg.clone())
            }
            ServiceError::Inconsistency(msg) => {
                tracing::error!("data inconsistency: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            ServiceError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            ServiceError::Serialization(err) => {
                tracing::error!("serialization error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
