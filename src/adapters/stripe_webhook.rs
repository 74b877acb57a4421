use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{error::ServiceError, event::ProviderEvent, id::IntentId, order::OrderStatus},
        services::reconcile::{ReconcileResult, reconcile_by_payment_intent},
    },
    axum::{Json, extract::State, http::HeaderMap},
};

#[derive(Debug)]
pub struct DecodedEvent {
    pub event_id: String,
    pub event_type: String,
    pub event: ProviderEvent,
}

/// Verify the signature over the raw body, then decode the envelope once
/// into the closed set of events this service acts on.
pub fn decode_event(
    body: &str,
    signature: &str,
    secret: &str,
) -> Result<DecodedEvent, ServiceError> {
    let event =
        stripe::Webhook::construct_event(body, signature, secret).map_err(convert_webhook_error)?;

    let event_id = event.id.to_string();
    let event_type = event.type_.to_string();

    let decoded = match event.type_ {
        stripe::EventType::PaymentIntentSucceeded => match event.data.object {
            stripe::EventObject::PaymentIntent(pi) => ProviderEvent::PaymentSucceeded {
                payment_intent_id: IntentId::new(pi.id.to_string()),
            },
            _ => {
                return Err(ServiceError::MalformedPayload(format!(
                    "{event_type} event did not carry a payment_intent object"
                )));
            }
        },
        stripe::EventType::PaymentIntentPaymentFailed => match event.data.object {
            stripe::EventObject::PaymentIntent(pi) => ProviderEvent::PaymentFailed {
                payment_intent_id: IntentId::new(pi.id.to_string()),
                error_message: pi.last_payment_error.as_ref().and_then(|e| e.message.clone()),
            },
            _ => {
                return Err(ServiceError::MalformedPayload(format!(
                    "{event_type} event did not carry a payment_intent object"
                )));
            }
        },
        _ => ProviderEvent::Ignored {
            event_type: event_type.clone(),
        },
    };

    Ok(DecodedEvent {
        event_id,
        event_type,
        event: decoded,
    })
}

fn convert_webhook_error(e: stripe::WebhookError) -> ServiceError {
    match e {
        stripe::WebhookError::BadParse(e) => ServiceError::MalformedPayload(e.to_string()),
        other => ServiceError::InvalidSignature(other.to_string()),
    }
}

#[tracing::instrument(
    name = "webhook",
    skip_all,
    fields(event_id = tracing::field::Empty, event_type = tracing::field::Empty)
)]
pub async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sig = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(ServiceError::MissingSignature)?;

    let decoded = decode_event(&body, sig, &state.stripe_webhook_secret)?;

    // Add event context to the span so all subsequent logs are correlated.
    tracing::Span::current()
        .record("event_id", tracing::field::display(&decoded.event_id))
        .record("event_type", tracing::field::display(&decoded.event_type));

    let (intent_id, status, error_message) = match decoded.event {
        ProviderEvent::PaymentSucceeded { payment_intent_id } => {
            (payment_intent_id, OrderStatus::Paid, None)
        }
        ProviderEvent::PaymentFailed {
            payment_intent_id,
            error_message,
        } => (payment_intent_id, OrderStatus::Failed, error_message),
        ProviderEvent::Ignored { event_type } => {
            tracing::info!("unhandled event type, acknowledged");
            return Ok(Json(
                serde_json::json!({"status": "ignored", "event": event_type}),
            ));
        }
    };

    let result =
        reconcile_by_payment_intent(&state.pool, &intent_id, status, error_message.as_deref())
            .await?;

    match result {
        ReconcileResult::Updated(order_id) => {
            tracing::info!(order_id, status = %status, "order reconciled");
        }
        ReconcileResult::AlreadyApplied(order_id) => {
            tracing::info!(order_id, status = %status, "event redelivered, order already reconciled");
        }
        // Not an error to the sender: a retry would find the same nothing.
        ReconcileResult::NotFound => {
            tracing::warn!(payment_intent_id = %intent_id, "no order found for payment intent");
        }
    }

    Ok(Json(
        serde_json::json!({"status": "success", "event": decoded.event_type}),
    ))
}
