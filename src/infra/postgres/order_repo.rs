use {
    crate::domain::{
        error::ServiceError,
        order::{NewOrder, Order, OrderStatus},
    },
    chrono::{DateTime, Utc},
    sqlx::{FromRow, PgPool, Postgres, Transaction},
};

/// Raw row shape; status is re-typed on the way out.
#[derive(FromRow)]
struct OrderRow {
    id: i64,
    user_id: Option<i64>,
    amount: i64,
    currency: String,
    description: Option<String>,
    metadata: serde_json::Value,
    stripe_payment_intent_id: Option<String>,
    stripe_checkout_session_id: Option<String>,
    status: String,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = ServiceError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            currency: row.currency,
            description: row.description,
            metadata: row.metadata,
            stripe_payment_intent_id: row.stripe_payment_intent_id,
            stripe_checkout_session_id: row.stripe_checkout_session_id,
            status: OrderStatus::try_from(row.status.as_str())?,
            error_message: row.error_message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub async fn insert_order(pool: &PgPool, new: &NewOrder) -> Result<Order, ServiceError> {
    let row: OrderRow = sqlx::query_as(
        r#"
        INSERT INTO orders
            (user_id, amount, currency, description, metadata,
             stripe_payment_intent_id, stripe_checkout_session_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, amount, currency, description, metadata,
                  stripe_payment_intent_id, stripe_checkout_session_id,
                  status, error_message, created_at, updated_at
        "#,
    )
    .bind(new.user_id)
    .bind(new.amount)
    .bind(&new.currency)
    .bind(new.description.as_deref())
    .bind(&new.metadata)
    .bind(new.stripe_payment_intent_id.as_deref())
    .bind(new.stripe_checkout_session_id.as_deref())
    .fetch_one(pool)
    .await?;

    Order::try_from(row)
}

/// All orders carrying this payment intent, locked for the rest of the
/// transaction. The unique index caps this at one row; the caller treats
/// anything more as corruption.
pub async fn find_by_payment_intent(
    tx: &mut Transaction<'_, Postgres>,
    payment_intent_id: &str,
) -> Result<Vec<Order>, ServiceError> {
    let rows: Vec<OrderRow> = sqlx::query_as(
        r#"
        SELECT id, user_id, amount, currency, description, metadata,
               stripe_payment_intent_id, stripe_checkout_session_id,
               status, error_message, created_at, updated_at
        FROM orders
        WHERE stripe_payment_intent_id = $1
        FOR UPDATE
        "#,
    )
    .bind(payment_intent_id)
    .fetch_all(&mut **tx)
    .await?;

    rows.into_iter().map(Order::try_from).collect()
}

pub async fn update_status(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
    status: OrderStatus,
    error_message: Option<&str>,
) -> Result<DateTime<Utc>, ServiceError> {
    let updated_at: DateTime<Utc> = sqlx::query_scalar(
        r#"
        UPDATE orders
        SET status = $1, error_message = $2, updated_at = now()
        WHERE id = $3
        RETURNING updated_at
        "#,
    )
    .bind(status.as_str())
    .bind(error_message)
    .bind(id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(updated_at)
}
