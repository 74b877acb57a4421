use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("missing signature header")]
    MissingSignature,

    #[error("signature verification: {0}")]
    InvalidSignature(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Provider rejected the request (bad price reference, bad params).
    #[error("provider rejected request: {0}")]
    ProviderRejected(String),

    /// Provider-side failure: outage, timeout, auth/config problem.
    #[error("provider: {0}")]
    Provider(String),

    /// Uniqueness invariant violated at the store level.
    #[error("data inconsistency: {0}")]
    Inconsistency(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
