use {
    crate::domain::{error::ServiceError, id::IntentId, order::OrderStatus},
    crate::infra::postgres::order_repo,
    sqlx::PgPool,
};

#[derive(Debug)]
pub enum ReconcileResult {
    /// Order found and moved to the incoming status.
    Updated(i64),
    /// Redelivered event — the order already carries this status.
    AlreadyApplied(i64),
    /// No order owns this payment intent; the caller logs and acknowledges.
    NotFound,
}

/// Find the order owning `intent_id` and transition it to `status`,
/// capturing the provider's error message on failures.
///
/// Runs as one read-match-update-commit transaction; concurrent deliveries
/// for the same intent serialize on the row lock. Applying the same
/// `(intent, status)` pair again refreshes `updated_at` and reports
/// `AlreadyApplied` — never an error, so redelivery stays cheap.
pub async fn reconcile_by_payment_intent(
    pool: &PgPool,
    intent_id: &IntentId,
    status: OrderStatus,
    error_message: Option<&str>,
) -> Result<ReconcileResult, ServiceError> {
    let mut tx = pool.begin().await?;

    let mut matches = order_repo::find_by_payment_intent(&mut tx, intent_id.as_str()).await?;

    let order = match matches.len() {
        0 => {
            tx.commit().await?;
            return Ok(ReconcileResult::NotFound);
        }
        1 => matches.remove(0),
        // The unique index makes this unreachable; refuse to pick one.
        n => {
            return Err(ServiceError::Inconsistency(format!(
                "{n} orders share payment intent {intent_id}"
            )));
        }
    };

    let already_applied = order.status == status;
    order_repo::update_status(&mut tx, order.id, status, error_message).await?;
    tx.commit().await?;

    if already_applied {
        Ok(ReconcileResult::AlreadyApplied(order.id))
    } else {
        Ok(ReconcileResult::Updated(order.id))
    }
}
