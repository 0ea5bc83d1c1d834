use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use log::debug;
use sps_common::{Paise, Secret};
use storefront_engine::{
    db_types::{GatewayOrderId, LineItem, Order, PaymentStatus, Role, ShippingAddress},
    AccountApi,
    OrderFlowApi,
    OrderWithCustomer,
};

use super::{
    helpers::{get_request, issue_token, put_request},
    mocks::{MockGateway, MockLedgerBackend},
};
use crate::{
    data_objects::UpdateStatusParams,
    routes::{AllOrdersRoute, MyOrdersRoute, UpdateOrderStatusRoute},
};

fn order(id: i64, customer_id: i64, total: i64, status: PaymentStatus) -> Order {
    Order {
        id,
        customer_id,
        items: vec![LineItem::new("sku-tea", Paise::from(total), 1)],
        shipping_address: ShippingAddress::default(),
        total_price: Paise::from(total),
        currency: "INR".to_string(),
        gateway_order_id: GatewayOrderId::from(format!("order_mock{id}")),
        gateway_payment_id: None,
        status,
        created_at: Utc.with_ymd_and_hms(2024, 8, 29, 13, 30, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 8, 29, 13, 30, 0).unwrap(),
    }
}

#[actix_web::test]
async fn fetch_my_orders_no_headers() {
    let _ = env_logger::try_init().ok();
    let err = get_request("", "/orders", configure).await.expect_err("Expected error");
    assert!(err.contains("No access token was provided"));
}

#[actix_web::test]
async fn fetch_my_orders() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let (status, body) = get_request(&token, "/orders", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""customer_id":101"#));
    assert!(body.contains(r#""total_orders":1750"#));
}

#[actix_web::test]
async fn fetch_my_orders_does_not_require_the_user_role() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::Admin]);
    let (status, body) = get_request(&token, "/orders", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""customer_id":101"#));
}

#[actix_web::test]
async fn fetch_my_orders_invalid_sig() {
    let _ = env_logger::try_init().ok();
    let mut token = issue_token(101, vec![Role::User]);
    token.replace_range(token.len() - 10..token.len() - 5, "00000");
    debug!("Calling /orders with invalid token {token}");
    let err = get_request(&token, "/orders", configure).await.expect_err("Expected error");
    assert!(err.contains("Access token is invalid"));
}

#[actix_web::test]
async fn all_orders_requires_the_admin_role() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let err = get_request(&token, "/admin/orders", configure).await.expect_err("Expected error");
    assert!(err.contains("Insufficient Permissions"));
}

#[actix_web::test]
async fn all_orders_as_admin() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(1, vec![Role::User, Role::Admin]);
    let (status, body) = get_request(&token, "/admin/orders", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""customer_name":"Asha Rao""#));
    assert!(body.contains(r#""customer_email":"asha@example.com""#));
}

#[actix_web::test]
async fn status_override_requires_the_admin_role() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(101, vec![Role::User]);
    let body = UpdateStatusParams { status: PaymentStatus::Failed };
    let err = put_request(&token, "/admin/orders/7/status", &body, configure).await.expect_err("Expected error");
    assert!(err.contains("Insufficient Permissions"));
}

#[actix_web::test]
async fn status_override_as_admin() {
    let _ = env_logger::try_init().ok();
    let token = issue_token(1, vec![Role::User, Role::Admin]);
    let body = UpdateStatusParams { status: PaymentStatus::Failed };
    let (status, body) =
        put_request(&token, "/admin/orders/7/status", &body, configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""id":7"#));
    assert!(body.contains(r#""status":"Failed""#));
}

fn configure(cfg: &mut ServiceConfig) {
    let mut accounts_backend = MockLedgerBackend::new();
    accounts_backend
        .expect_fetch_orders_for_customer()
        .returning(|customer_id| Ok(vec![order(1, customer_id, 1000, PaymentStatus::Paid), order(2, customer_id, 750, PaymentStatus::Pending)]));
    accounts_backend.expect_fetch_all_orders_with_customers().returning(|| {
        Ok(vec![OrderWithCustomer {
            order: order(1, 101, 1000, PaymentStatus::Paid),
            customer_name: Some("Asha Rao".to_string()),
            customer_email: Some("asha@example.com".to_string()),
        }])
    });
    let accounts_api = AccountApi::new(accounts_backend);

    let mut ledger = MockLedgerBackend::new();
    ledger.expect_override_order_status().returning(|order_id, status| Ok(order(order_id, 101, 1000, status)));
    let gateway = MockGateway::new();
    let orders_api = OrderFlowApi::new(ledger, gateway, Secret::new("test-secret".to_string()));

    cfg.service(MyOrdersRoute::<MockLedgerBackend>::new())
        .service(AllOrdersRoute::<MockLedgerBackend>::new())
        .service(UpdateOrderStatusRoute::<MockLedgerBackend, MockGateway>::new())
        .app_data(web::Data::new(accounts_api))
        .app_data(web::Data::new(orders_api));
}
