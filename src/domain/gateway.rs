use {
    super::checkout::{CheckoutSpec, CreatedSession},
    super::error::ServiceError,
    std::{future::Future, pin::Pin},
};

/// Seam to the payment provider's hosted-checkout API. Object-safe so the
/// service layer can run against a test double.
pub trait CheckoutGateway: Send + Sync {
    fn create_session(
        &self,
        spec: &CheckoutSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedSession, ServiceError>> + Send + '_>>;
}
