use {
    crate::domain::{
        checkout::{CheckoutItems, CheckoutMode, CheckoutSpec, CreatedSession},
        error::ServiceError,
        gateway::CheckoutGateway,
        id::{IntentId, SessionId},
    },
    std::{future::Future, pin::Pin},
};

/// Live gateway over the Stripe API. Owns its client; nothing here is
/// process-global.
pub struct StripeGateway {
    client: stripe::Client,
}

impl StripeGateway {
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: stripe::Client::new(secret_key),
        }
    }
}

impl CheckoutGateway for StripeGateway {
    fn create_session(
        &self,
        spec: &CheckoutSpec,
    ) -> Pin<Box<dyn Future<Output = Result<CreatedSession, ServiceError>> + Send + '_>> {
        let spec = spec.clone();
        Box::pin(async move { self.create_session_inner(&spec).await })
    }
}

impl StripeGateway {
    async fn create_session_inner(
        &self,
        spec: &CheckoutSpec,
    ) -> Result<CreatedSession, ServiceError> {
        let line_items: Vec<stripe::CreateCheckoutSessionLineItems> = match &spec.items {
            CheckoutItems::Price { price_id, quantity } => {
                vec![stripe::CreateCheckoutSessionLineItems {
                    price: Some(price_id.clone()),
                    quantity: Some(*quantity),
                    ..Default::default()
                }]
            }
            CheckoutItems::LineItems(items) => items
                .iter()
                .map(|item| stripe::CreateCheckoutSessionLineItems {
                    price: Some(item.price.clone()),
                    quantity: Some(item.quantity),
                    ..Default::default()
                })
                .collect(),
        };

        let mut params = stripe::CreateCheckoutSession::new();
        params.mode = Some(convert_mode(spec.mode));
        params.success_url = Some(&spec.success_url);
        params.cancel_url = Some(&spec.cancel_url);
        params.line_items = Some(line_items);
        params.customer_email = spec.customer_email.as_deref();
        if let Some(metadata) = &spec.metadata {
            params.metadata = Some(metadata.clone());
        }

        let session = stripe::CheckoutSession::create(&self.client, params)
            .await
            .map_err(convert_error)?;

        let url = session
            .url
            .ok_or_else(|| ServiceError::Provider("checkout session has no URL".into()))?;

        // In payment mode the session already carries its payment intent;
        // that id is what later webhook events are matched on.
        let payment_intent_id = session.payment_intent.as_ref().map(|pi| {
            IntentId::new(match pi {
                stripe::Expandable::Id(id) => id.to_string(),
                stripe::Expandable::Object(pi) => pi.id.to_string(),
            })
        });

        Ok(CreatedSession {
            session_id: SessionId::new(session.id.to_string()),
            url,
            payment_intent_id,
            amount_total: session.amount_total.unwrap_or(0),
            currency: session
                .currency
                .map(|c| c.to_string())
                .unwrap_or_else(|| "usd".to_string()),
        })
    }
}

fn convert_mode(mode: CheckoutMode) -> stripe::CheckoutSessionMode {
    match mode {
        CheckoutMode::Payment => stripe::CheckoutSessionMode::Payment,
        CheckoutMode::Subscription => stripe::CheckoutSessionMode::Subscription,
        CheckoutMode::Setup => stripe::CheckoutSessionMode::Setup,
    }
}

/// A 4xx from the provider means our caller's input was bad (unknown price,
/// malformed params) and is theirs to fix; anything else is an upstream
/// failure.
fn convert_error(e: stripe::StripeError) -> ServiceError {
    match e {
        stripe::StripeError::Stripe(req) if req.http_status < 500 => {
            ServiceError::ProviderRejected(
                req.message.clone().unwrap_or_else(|| req.to_string()),
            )
        }
        other => ServiceError::Provider(other.to_string()),
    }
}
