use order_sync::domain::checkout::{
    CheckoutMode, CheckoutRequest, CheckoutSpec, LineItem, RedirectUrls,
};
use order_sync::domain::error::ServiceError;
use order_sync::domain::order::OrderStatus;
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::Pending),
        Just(OrderStatus::Paid),
        Just(OrderStatus::Failed),
        Just(OrderStatus::Canceled),
    ]
}

fn arb_mode() -> impl Strategy<Value = CheckoutMode> {
    prop_oneof![
        Just(CheckoutMode::Payment),
        Just(CheckoutMode::Subscription),
        Just(CheckoutMode::Setup),
    ]
}

fn redirects() -> RedirectUrls {
    RedirectUrls {
        success: "http://localhost:3000/checkout/success".to_string(),
        cancel: "http://localhost:3000/checkout/cancel".to_string(),
    }
}

fn request(
    price_id: Option<String>,
    line_items: Option<Vec<LineItem>>,
    mode: &str,
) -> CheckoutRequest {
    CheckoutRequest {
        price_id,
        line_items,
        success_url: None,
        cancel_url: None,
        mode: mode.to_string(),
        customer_email: None,
        metadata: None,
        description: None,
    }
}

proptest! {
    /// as_str → try_from roundtrip is identity for any status.
    #[test]
    fn status_roundtrip(status in arb_status()) {
        let roundtripped = OrderStatus::try_from(status.as_str()).unwrap();
        prop_assert_eq!(roundtripped, status);
    }

    /// as_str → try_from roundtrip is identity for any mode.
    #[test]
    fn mode_roundtrip(mode in arb_mode()) {
        let roundtripped = CheckoutMode::try_from(mode.as_str()).unwrap();
        prop_assert_eq!(roundtripped, mode);
    }

    /// Any mode string outside the closed set is an invalid request.
    #[test]
    fn unknown_mode_is_invalid(mode in "[a-z]{1,16}") {
        prop_assume!(!matches!(mode.as_str(), "payment" | "subscription" | "setup"));
        let result = CheckoutSpec::from_request(
            request(Some("price_1".to_string()), None, &mode),
            &redirects(),
        );
        prop_assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    /// A price reference alone is always accepted, whatever the id looks
    /// like — it is opaque to us.
    #[test]
    fn any_price_id_alone_is_accepted(price_id in "price_[A-Za-z0-9]{1,24}") {
        let result = CheckoutSpec::from_request(
            request(Some(price_id), None, "payment"),
            &redirects(),
        );
        prop_assert!(result.is_ok());
    }

    /// Non-empty line items alone are always accepted.
    #[test]
    fn line_items_alone_are_accepted(
        prices in prop::collection::vec("price_[A-Za-z0-9]{1,24}", 1..8),
        quantity in 1u64..100,
    ) {
        let items = prices
            .into_iter()
            .map(|price| LineItem { price, quantity })
            .collect();
        let result = CheckoutSpec::from_request(
            request(None, Some(items), "payment"),
            &redirects(),
        );
        prop_assert!(result.is_ok());
    }

    /// Supplying both sources, or neither, is always an invalid request.
    #[test]
    fn both_or_neither_is_invalid(
        price_id in "price_[A-Za-z0-9]{1,24}",
        with_both in proptest::bool::ANY,
    ) {
        let items = vec![LineItem { price: "price_x".to_string(), quantity: 1 }];
        let req = if with_both {
            request(Some(price_id), Some(items), "payment")
        } else {
            request(None, None, "payment")
        };
        let result = CheckoutSpec::from_request(req, &redirects());
        prop_assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }
}
