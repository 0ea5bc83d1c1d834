use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use sps_common::{Paise, Secret};
use storefront_engine::{
    db_types::{GatewayOrderId, LineItem, Order, PaymentStatus, Role, ShippingAddress},
    helpers::{sign_confirmation, PaymentConfirmation},
    traits::MarkPaidOutcome,
    OrderFlowApi,
};

use super::{
    helpers::{issue_token, post_request},
    mocks::{MockGateway, MockLedgerBackend},
};
use crate::routes::VerifyRoute;

const GATEWAY_SECRET: &str = "gw_test_5ecret";

fn gateway_order_id() -> GatewayOrderId {
    GatewayOrderId::from("order_N5hGG0rDkLqxyz".to_string())
}

fn settled_order(payment_id: &str) -> Order {
    Order {
        id: 42,
        customer_id: 101,
        items: vec![LineItem::new("sku-tea", Paise::from(500), 2)],
        shipping_address: ShippingAddress::default(),
        total_price: Paise::from(1000),
        currency: "INR".to_string(),
        gateway_order_id: gateway_order_id(),
        gateway_payment_id: Some(payment_id.to_string()),
        status: PaymentStatus::Paid,
        created_at: Utc.with_ymd_and_hms(2024, 8, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 8, 29, 13, 35, 0).unwrap(),
    }
}

#[actix_web::test]
async fn valid_confirmation_settles_the_order() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let secret = Secret::new(GATEWAY_SECRET.to_string());
    let signature = sign_confirmation(&gateway_order_id(), "pay_N5hHH1sEkMr", &secret).unwrap();
    let confirmation = PaymentConfirmation::new(gateway_order_id(), "pay_N5hHH1sEkMr".to_string(), signature);
    let (status, body) = post_request(&token, "/verify", &confirmation, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true,"message":"Payment verified"}"#);
}

// The response is an acknowledgement only; the order snapshot (items, address, amounts) stays server-side.
#[actix_web::test]
async fn confirmation_response_does_not_echo_the_order() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let secret = Secret::new(GATEWAY_SECRET.to_string());
    let signature = sign_confirmation(&gateway_order_id(), "pay_N5hHH1sEkMr", &secret).unwrap();
    let confirmation = PaymentConfirmation::new(gateway_order_id(), "pay_N5hHH1sEkMr".to_string(), signature);
    let (_, body) = post_request(&token, "/verify", &confirmation, configure).await.expect("Request failed");
    assert!(!body.contains("shipping_address"));
    assert!(!body.contains("sku-tea"));
    assert!(!body.contains("total_price"));
}

#[actix_web::test]
async fn forged_confirmation_is_rejected() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let confirmation =
        PaymentConfirmation::new(gateway_order_id(), "pay_N5hHH1sEkMr".to_string(), "deadbeef".to_string());
    let err = post_request(&token, "/verify", &confirmation, configure).await.expect_err("Expected error");
    assert!(err.contains("Payment confirmation could not be verified"));
}

#[actix_web::test]
async fn verify_without_token_is_rejected() {
    let _ = env_logger::try_init().ok();
    let confirmation =
        PaymentConfirmation::new(gateway_order_id(), "pay_N5hHH1sEkMr".to_string(), "deadbeef".to_string());
    let err = post_request("", "/verify", &confirmation, configure).await.expect_err("Expected error");
    assert!(err.contains("No access token was provided"));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut ledger = MockLedgerBackend::new();
    ledger
        .expect_mark_order_paid()
        .returning(|_, payment_id| Ok(MarkPaidOutcome::Updated(settled_order(payment_id))));
    let gateway = MockGateway::new();
    let orders_api = OrderFlowApi::new(ledger, gateway, Secret::new(GATEWAY_SECRET.to_string()));
    cfg.service(VerifyRoute::<MockLedgerBackend, MockGateway>::new()).app_data(web::Data::new(orders_api));
}
