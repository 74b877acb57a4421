use super::id::IntentId;

/// A verified provider event, decoded once at the webhook boundary.
///
/// Only two event types carry business logic; everything else lands in
/// `Ignored` and is acknowledged without touching the store, so the
/// provider never retries a type we deliberately skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    PaymentSucceeded {
        payment_intent_id: IntentId,
    },
    PaymentFailed {
        payment_intent_id: IntentId,
        error_message: Option<String>,
    },
    Ignored {
        event_type: String,
    },
}
