use {
    crate::domain::{
        checkout::{CheckoutResponse, CheckoutSpec},
        error::ServiceError,
        gateway::CheckoutGateway,
        order::NewOrder,
    },
    crate::infra::postgres::order_repo,
    sqlx::PgPool,
    std::time::Duration,
};

/// Bound on the outbound provider call; an unresponsive provider fails the
/// request instead of hanging it.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a hosted checkout session, then record a pending order carrying
/// the session and payment-intent identifiers so later webhook events have
/// a row to reconcile against.
pub async fn create_checkout(
    pool: &PgPool,
    gateway: &dyn CheckoutGateway,
    spec: &CheckoutSpec,
) -> Result<CheckoutResponse, ServiceError> {
    let session = tokio::time::timeout(PROVIDER_TIMEOUT, gateway.create_session(spec))
        .await
        .map_err(|_| ServiceError::Provider("checkout session request timed out".into()))??;

    let metadata = match &spec.metadata {
        Some(m) => serde_json::to_value(m)?,
        None => serde_json::json!({}),
    };

    let order = order_repo::insert_order(
        pool,
        &NewOrder {
            user_id: None,
            amount: session.amount_total,
            currency: session.currency.clone(),
            description: spec.description.clone(),
            metadata,
            stripe_payment_intent_id: session
                .payment_intent_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
            stripe_checkout_session_id: Some(session.session_id.as_str().to_string()),
        },
    )
    .await?;

    tracing::info!(
        order_id = order.id,
        session_id = %session.session_id,
        "checkout session created, order pending"
    );

    Ok(CheckoutResponse {
        session_id: session.session_id,
        url: session.url,
    })
}
