//! Access control middleware for the storefront payment server.
//! This middleware can be placed on any route or service.
//!
//! It verifies the JWT bearer token on the incoming request and then checks the claims in the token against the
//! required roles for the route. If the token is valid and the user has the required roles, the validated claims are
//! stored in the request extensions (where the [`crate::auth::JwtClaims`] extractor finds them) and the request is
//! allowed to continue. Otherwise a 401 or 403 response is returned.

use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};
use storefront_engine::db_types::Role;

use crate::{
    auth::validate_bearer_token,
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

pub struct AclMiddlewareFactory {
    required_roles: Vec<Role>,
}

impl AclMiddlewareFactory {
    pub fn new(required_roles: &[Role]) -> Self {
        AclMiddlewareFactory { required_roles: required_roles.to_vec() }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AclMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = AclMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AclMiddlewareService { required_roles: self.required_roles.clone(), service: Rc::new(service) })
    }
}

pub struct AclMiddlewareService<S> {
    required_roles: Vec<Role>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AclMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required_roles = self.required_roles.clone();
        Box::pin(async move {
            let config = req.app_data::<web::Data<AuthConfig>>().ok_or_else(|| {
                log::error!("No AuthConfig found in app data");
                Error::from(ServerError::InitializeError("No AuthConfig found in app data".to_string()))
            })?;
            let jwt_claims = validate_bearer_token(req.request(), config.as_ref())
                .map_err(ServerError::AuthenticationError)?;
            if required_roles.iter().all(|role| jwt_claims.roles.contains(role)) {
                req.extensions_mut().insert(jwt_claims);
                service.call(req).await
            } else {
                Err(ServerError::AuthenticationError(AuthError::InsufficientPermissions(format!(
                    "This endpoint requires the {required_roles:?} roles"
                )))
                .into())
            }
        })
    }
}
