//! Deserialization tests for the backend and provider payloads.

mod common;

use rust_decimal_macros::dec;

use storefront_order::models::{CaptureDetails, CreateOrderRequest, Order, PayResponse, ProviderOrder, UserInfo};

use common::{CAPTURE_JSON, ORDER_JSON, ORDER_PAID_JSON, PROVIDER_ORDER_JSON, USER_JSON};

#[test]
fn test_order_deserializes() {
    let order: Order = serde_json::from_str(ORDER_JSON).expect("Failed to deserialize order");

    assert_eq!(order.id, "6410f2b8c1a2b3c4d5e6f701");
    assert_eq!(order.payment_method, "PayPal");
    assert_eq!(order.shipping_address.city, "London");
    assert_eq!(order.shipping_address.postal_code, "N1 9GU");
    assert_eq!(order.delivered_at, None);
    assert_eq!(order.paid_at, None);

    let item = &order.order_items[1];
    assert_eq!(item.slug, "adidas-fit-pant");
    assert_eq!(item.quantity, 1);
    assert_eq!(item.price, dec!(25.5));
    assert_eq!(item.image, "/images/p3.jpg");

    assert_eq!(order.shipping_price, dec!(0));
    assert_eq!(order.tax_price, dec!(34.52));
}

#[test]
fn test_paid_order_deserializes() {
    let order: Order = serde_json::from_str(ORDER_PAID_JSON).expect("Failed to deserialize order");

    assert!(order.is_paid);
    assert!(order.is_delivered);
    assert_eq!(order.paid_at.as_deref(), Some("2024-03-01T10:05:00.000Z"));
    assert_eq!(order.delivered_at.as_deref(), Some("2024-03-03T09:00:00.000Z"));
}

#[test]
fn test_order_total_reaches_provider_unchanged() {
    let order: Order = serde_json::from_str(ORDER_JSON).unwrap();

    let request = CreateOrderRequest::for_order(&order);

    assert_eq!(request.amount(), Some("300.02"));
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{"amount": {"currency_code": "USD", "value": "300.02"}}]
        })
    );
}

#[test]
fn test_user_deserializes() {
    let user: UserInfo = serde_json::from_str(USER_JSON).expect("Failed to deserialize user");

    assert_eq!(user.email, "ada@example.com");
    assert!(!user.is_admin);
    assert_eq!(user.token, common::TOKEN);
}

#[test]
fn test_provider_payloads_deserialize() {
    let created: ProviderOrder = serde_json::from_str(PROVIDER_ORDER_JSON).unwrap();
    assert_eq!(created.status, "CREATED");
    assert_eq!(created.links.len(), 3);

    let details: CaptureDetails = serde_json::from_str(CAPTURE_JSON).unwrap();
    assert_eq!(details.id, "5O190127TN364715T");
    assert_eq!(details.update_time.as_deref(), Some("2024-03-01T10:05:00Z"));
    assert!(details.extra.contains_key("purchase_units"));
}

#[test]
fn test_pay_response_shapes() {
    let bare: PayResponse = serde_json::from_str(ORDER_PAID_JSON).unwrap();
    assert!(bare.into_order().is_paid);

    let wrapped = format!(r#"{{"message":"Order Paid","order":{ORDER_PAID_JSON}}}"#);
    let wrapped: PayResponse = serde_json::from_str(&wrapped).unwrap();
    assert!(matches!(wrapped, PayResponse::Wrapped { .. }));
    assert!(wrapped.into_order().is_paid);
}
