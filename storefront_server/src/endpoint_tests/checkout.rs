use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use sps_common::{Paise, Secret};
use storefront_engine::{
    db_types::{GatewayOrderId, LineItem, NewOrder, Order, PaymentStatus, Role, ShippingAddress},
    traits::RemoteCharge,
    AccountApi,
    OrderFlowApi,
};

use super::{
    helpers::{issue_token, post_request},
    mocks::{MockGateway, MockLedgerBackend},
};
use crate::{
    data_objects::CheckoutRequest,
    routes::CheckoutRoute,
};

fn checkout_body() -> CheckoutRequest {
    CheckoutRequest {
        items: vec![LineItem::new("sku-tea", Paise::from(500), 2), LineItem::new("sku-biscuits", Paise::from(250), 1)],
        shipping_address: ShippingAddress {
            name: "Asha Rao".to_string(),
            phone: "+91 98765 43210".to_string(),
            street: "14 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "KA".to_string(),
            zip: "560001".to_string(),
        },
    }
}

fn order_from(new_order: NewOrder) -> Order {
    Order {
        id: 42,
        customer_id: new_order.customer_id,
        items: new_order.items,
        shipping_address: new_order.shipping_address,
        total_price: new_order.total_price,
        currency: new_order.currency,
        gateway_order_id: new_order.gateway_order_id,
        gateway_payment_id: None,
        status: PaymentStatus::Pending,
        created_at: Utc.with_ymd_and_hms(2024, 8, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 8, 29, 13, 30, 0).unwrap(),
    }
}

#[actix_web::test]
async fn checkout_without_token_is_rejected() {
    let _ = env_logger::try_init().ok();
    let err = post_request("", "/checkout", &checkout_body(), configure).await.expect_err("Expected error");
    assert!(err.contains("No access token was provided"));
}

#[actix_web::test]
async fn checkout_computes_total_and_opens_charge() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let (status, body) = post_request(&token, "/checkout", &checkout_body(), configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""gateway_order_id":"order_mock1""#));
    assert!(body.contains(r#""amount":1250"#));
    assert!(body.contains(r#""internal_order_id":42"#));
}

// Checkout needs a valid token, not any particular role. A token issued without `user` (an admin-only token, say)
// can still check out its own cart.
#[actix_web::test]
async fn checkout_does_not_require_the_user_role() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::Admin]);
    let (status, body) = post_request(&token, "/checkout", &checkout_body(), configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""internal_order_id":42"#));
}

#[actix_web::test]
async fn checkout_aborts_when_gateway_confirms_a_different_amount() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let err =
        post_request(&token, "/checkout", &checkout_body(), configure_skewed).await.expect_err("Expected error");
    assert!(err.contains("Amount mismatch"));
}

#[actix_web::test]
async fn empty_carts_are_rejected() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let body = CheckoutRequest { items: vec![], shipping_address: ShippingAddress::default() };
    let err = post_request(&token, "/checkout", &body, configure).await.expect_err("Expected error");
    assert!(err.contains("Cannot check out an empty cart"));
}

fn configure(cfg: &mut ServiceConfig) {
    configure_with_charge_amount(cfg, Paise::from(1250));
}

fn configure_skewed(cfg: &mut ServiceConfig) {
    configure_with_charge_amount(cfg, Paise::from(1251));
}

fn configure_with_charge_amount(cfg: &mut ServiceConfig, charge_amount: Paise) {
    let mut ledger = MockLedgerBackend::new();
    ledger.expect_insert_order().returning(|new_order| Ok(order_from(new_order)));
    let mut gateway = MockGateway::new();
    gateway.expect_create_remote_charge().returning(move |_, _, _| {
        Ok(RemoteCharge { gateway_order_id: GatewayOrderId::from("order_mock1".to_string()), amount: charge_amount })
    });
    let orders_api = OrderFlowApi::new(ledger, gateway, Secret::new("test-secret".to_string()));

    let mut accounts_backend = MockLedgerBackend::new();
    accounts_backend.expect_upsert_consumer().returning(|_| Ok(()));
    let accounts_api = AccountApi::new(accounts_backend);

    cfg.service(CheckoutRoute::<MockLedgerBackend, MockGateway>::new())
        .app_data(web::Data::new(orders_api))
        .app_data(web::Data::new(accounts_api));
}
