use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use log::debug;
use serde::Serialize;
use sps_common::Secret;
use storefront_engine::db_types::Roles;

use crate::{
    auth::{JwtClaims, TokenIssuer},
    config::AuthConfig,
};

// Creates a test `AuthConfig` for issuing tokens. DO NOT re-use this secret anywhere.
pub fn get_auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: Secret::new("endpoint-test-jwt-secret-0123456789abcdef".to_string()) }
}

pub fn issue_token(sub: i64, roles: Roles) -> String {
    let claims = JwtClaims {
        sub,
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        roles,
        exp: 0,
    };
    TokenIssuer::new(&get_auth_config()).issue_token(claims, None).expect("Failed to sign token")
}

pub async fn get_request(
    auth_header: &str,
    path: &str,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    let req = with_bearer(TestRequest::get().uri(path), auth_header);
    send(req, configure).await
}

pub async fn post_request<T: Serialize>(
    auth_header: &str,
    path: &str,
    body: &T,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    let req = with_bearer(TestRequest::post().uri(path).set_json(body), auth_header);
    send(req, configure).await
}

pub async fn put_request<T: Serialize>(
    auth_header: &str,
    path: &str,
    body: &T,
    configure: fn(&mut ServiceConfig),
) -> Result<(StatusCode, String), String> {
    let req = with_bearer(TestRequest::put().uri(path).set_json(body), auth_header);
    send(req, configure).await
}

fn with_bearer(req: TestRequest, auth_header: &str) -> TestRequest {
    if auth_header.is_empty() {
        req
    } else {
        req.insert_header(("Authorization", format!("Bearer {auth_header}")))
    }
}

async fn send(req: TestRequest, configure: fn(&mut ServiceConfig)) -> Result<(StatusCode, String), String> {
    let req = req.to_request();
    let app = App::new().app_data(actix_web::web::Data::new(get_auth_config())).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let (_, res) = test::try_call_service(&service, req).await.map_err(|e| e.to_string())?.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    Ok((status, body))
}
