mod common;

use common::*;
use order_sync::domain::id::IntentId;
use order_sync::domain::order::OrderStatus;
use order_sync::services::reconcile::{ReconcileResult, reconcile_by_payment_intent};
use std::time::Duration;

// ── 1. succeeded_marks_order_paid ──────────────────────────────────────────

#[tokio::test]
async fn succeeded_marks_order_paid() {
    let pool = setup_pool("order_sync_test_reconcile").await;
    let id = insert_order(&pool, Some("pi_rec_paid"), OrderStatus::Pending).await;

    let result = reconcile_by_payment_intent(
        &pool,
        &IntentId::new("pi_rec_paid"),
        OrderStatus::Paid,
        None,
    )
    .await
    .unwrap();
    assert!(matches!(result, ReconcileResult::Updated(got) if got == id));

    let row = get_order(&pool, "pi_rec_paid").await.unwrap();
    assert_eq!(row.status, "paid");
    assert_eq!(row.error_message, None);
}

// ── 2. updated_at_advances_on_transition ───────────────────────────────────

#[tokio::test]
async fn updated_at_advances_on_transition() {
    let pool = setup_pool("order_sync_test_reconcile").await;
    insert_order(&pool, Some("pi_rec_ts"), OrderStatus::Pending).await;
    let before = get_order(&pool, "pi_rec_ts").await.unwrap().updated_at;

    tokio::time::sleep(Duration::from_millis(50)).await;
    reconcile_by_payment_intent(&pool, &IntentId::new("pi_rec_ts"), OrderStatus::Paid, None)
        .await
        .unwrap();

    let after = get_order(&pool, "pi_rec_ts").await.unwrap().updated_at;
    assert!(after > before, "updated_at did not advance: {before} -> {after}");
}

// ── 3. failed_captures_error_message ───────────────────────────────────────

#[tokio::test]
async fn failed_captures_error_message() {
    let pool = setup_pool("order_sync_test_reconcile").await;
    insert_order(&pool, Some("pi_rec_fail"), OrderStatus::Pending).await;

    let result = reconcile_by_payment_intent(
        &pool,
        &IntentId::new("pi_rec_fail"),
        OrderStatus::Failed,
        Some("Your card was declined."),
    )
    .await
    .unwrap();
    assert!(matches!(result, ReconcileResult::Updated(_)));

    let row = get_order(&pool, "pi_rec_fail").await.unwrap();
    assert_eq!(row.status, "failed");
    assert_eq!(row.error_message.as_deref(), Some("Your card was declined."));
}

// ── 4. failed_without_message_leaves_it_empty ──────────────────────────────

#[tokio::test]
async fn failed_without_message_leaves_it_empty() {
    let pool = setup_pool("order_sync_test_reconcile").await;
    insert_order(&pool, Some("pi_rec_fail_nomsg"), OrderStatus::Pending).await;

    reconcile_by_payment_intent(
        &pool,
        &IntentId::new("pi_rec_fail_nomsg"),
        OrderStatus::Failed,
        None,
    )
    .await
    .unwrap();

    let row = get_order(&pool, "pi_rec_fail_nomsg").await.unwrap();
    assert_eq!(row.status, "failed");
    assert_eq!(row.error_message, None);
}

// ── 5. reconcile_is_idempotent ─────────────────────────────────────────────

#[tokio::test]
async fn reconcile_is_idempotent() {
    let pool = setup_pool("order_sync_test_reconcile").await;
    let id = insert_order(&pool, Some("pi_rec_idem"), OrderStatus::Pending).await;
    let intent = IntentId::new("pi_rec_idem");

    let first = reconcile_by_payment_intent(&pool, &intent, OrderStatus::Paid, None)
        .await
        .unwrap();
    assert!(matches!(first, ReconcileResult::Updated(got) if got == id));
    let after_first = get_order(&pool, "pi_rec_idem").await.unwrap().updated_at;

    tokio::time::sleep(Duration::from_millis(50)).await;

    // Redelivery of the same outcome: no error, same terminal state, the
    // touch still refreshes updated_at.
    let second = reconcile_by_payment_intent(&pool, &intent, OrderStatus::Paid, None)
        .await
        .unwrap();
    assert!(matches!(second, ReconcileResult::AlreadyApplied(got) if got == id));

    let row = get_order(&pool, "pi_rec_idem").await.unwrap();
    assert_eq!(row.status, "paid");
    assert!(row.updated_at > after_first);
    assert_eq!(count_orders_for_intent(&pool, "pi_rec_idem").await, 1);
}

// ── 6. unknown_intent_returns_not_found ────────────────────────────────────

#[tokio::test]
async fn unknown_intent_returns_not_found() {
    let pool = setup_pool("order_sync_test_reconcile").await;

    let result = reconcile_by_payment_intent(
        &pool,
        &IntentId::new("pi_rec_missing"),
        OrderStatus::Paid,
        None,
    )
    .await
    .unwrap();
    assert!(matches!(result, ReconcileResult::NotFound));

    // No row conjured up for an intent we have never seen.
    assert_eq!(count_orders_for_intent(&pool, "pi_rec_missing").await, 0);
}

// ── 7. late_failed_overwrites_paid ─────────────────────────────────────────

#[tokio::test]
async fn late_failed_overwrites_paid() {
    let pool = setup_pool("order_sync_test_reconcile").await;
    insert_order(&pool, Some("pi_rec_race"), OrderStatus::Pending).await;
    let intent = IntentId::new("pi_rec_race");

    reconcile_by_payment_intent(&pool, &intent, OrderStatus::Paid, None)
        .await
        .unwrap();

    // Deliveries apply in arrival order; a late "failed" wins.
    reconcile_by_payment_intent(&pool, &intent, OrderStatus::Failed, Some("expired"))
        .await
        .unwrap();

    let row = get_order(&pool, "pi_rec_race").await.unwrap();
    assert_eq!(row.status, "failed");
    assert_eq!(row.error_message.as_deref(), Some("expired"));
}

// ── 8. paid_after_failed_clears_error_message ──────────────────────────────

#[tokio::test]
async fn paid_after_failed_clears_error_message() {
    let pool = setup_pool("order_sync_test_reconcile").await;
    insert_order(&pool, Some("pi_rec_retry"), OrderStatus::Pending).await;
    let intent = IntentId::new("pi_rec_retry");

    reconcile_by_payment_intent(&pool, &intent, OrderStatus::Failed, Some("declined"))
        .await
        .unwrap();
    reconcile_by_payment_intent(&pool, &intent, OrderStatus::Paid, None)
        .await
        .unwrap();

    let row = get_order(&pool, "pi_rec_retry").await.unwrap();
    assert_eq!(row.status, "paid");
    assert_eq!(row.error_message, None);
}

// ── 9. created_at_is_untouched ─────────────────────────────────────────────

#[tokio::test]
async fn created_at_is_untouched() {
    let pool = setup_pool("order_sync_test_reconcile").await;
    insert_order(&pool, Some("pi_rec_created"), OrderStatus::Pending).await;
    let before = get_order(&pool, "pi_rec_created").await.unwrap().created_at;

    tokio::time::sleep(Duration::from_millis(50)).await;
    reconcile_by_payment_intent(&pool, &IntentId::new("pi_rec_created"), OrderStatus::Paid, None)
        .await
        .unwrap();

    let row = get_order(&pool, "pi_rec_created").await.unwrap();
    assert_eq!(row.created_at, before);
    assert!(row.updated_at > before);
}
