//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause
//! the current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation (e.g. I/O,
//! database calls, the outbound gateway call) must be awaited, never blocked on.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use storefront_engine::{
    db_types::{Consumer, Role},
    helpers::PaymentConfirmation,
    traits::{AccountManagement, PaymentGateway, PaymentLedger},
    AccountApi,
    OrderFlowApi,
};

use crate::{
    auth::JwtClaims,
    data_objects::{CheckoutRequest, JsonResponse, UpdateStatusParams},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires [$($roles:ty),*]) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>)
                    .wrap($crate::middleware::AclMiddlewareFactory::new(&[$($roles),*]));
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Checkout  ----------------------------------------------------
// An empty role list means any authenticated caller may hit the route; tokens are not required to carry the `user`
// role for a consumer to act on their own orders.
route!(checkout => Post "/checkout" impl PaymentLedger, PaymentGateway where requires []);
/// Route handler for the checkout endpoint.
///
/// Authenticated consumers submit their cart and shipping address here. The server computes the total from the line
/// items, opens a charge with the payment provider and persists a `Pending` order. The response carries the gateway
/// order id the client needs to drive the provider's checkout widget, and the amount, so the client can display what
/// will actually be charged.
///
/// The caller's display snapshot (from the JWT claims) is refreshed as a side effect, so that admin listings can show
/// who placed the order.
pub async fn checkout<B: PaymentLedger, G: PaymentGateway>(
    claims: JwtClaims,
    body: web::Json<CheckoutRequest>,
    api: web::Data<OrderFlowApi<B, G>>,
    accounts: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST checkout for consumer #{}", claims.sub);
    let consumer = Consumer { id: claims.sub, name: claims.name.clone(), email: claims.email.clone() };
    accounts.record_consumer(&consumer).await?;
    let CheckoutRequest { items, shipping_address } = body.into_inner();
    let result = api.checkout(claims.sub, items, shipping_address).await?;
    Ok(HttpResponse::Ok().json(result))
}

//----------------------------------------------   Verify  ----------------------------------------------------
route!(verify => Post "/verify" impl PaymentLedger, PaymentGateway where requires []);
/// Route handler for the payment verification endpoint.
///
/// The client posts the (gateway order id, payment id, signature) triple it received from the provider's checkout
/// widget. The engine checks the signature and settles the matching order. Repeat confirmations for an already-settled
/// order succeed without changing anything, so a client that retries after a dropped response gets a clean 200.
///
/// The response is a bare success acknowledgement. The order snapshot is not echoed back; clients that want it fetch
/// their orders through the listing endpoint.
pub async fn verify<B: PaymentLedger, G: PaymentGateway>(
    body: web::Json<PaymentConfirmation>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let confirmation = body.into_inner();
    debug!("💻️ POST verify for gateway reference {}", confirmation.gateway_order_id);
    let order = api.verify_payment(confirmation).await?;
    debug!("💻️ Order #{} is settled", order.id);
    Ok(HttpResponse::Ok().json(JsonResponse::success("Payment verified")))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(my_orders => Get "/orders" impl AccountManagement where requires []);
/// Route handler for the orders endpoint.
///
/// Authenticated consumers fetch their own orders here, newest first. The consumer id comes from the JWT claims;
/// there is no way to request someone else's orders through this endpoint.
pub async fn my_orders<B: AccountManagement>(
    claims: JwtClaims,
    api: web::Data<AccountApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET my_orders for consumer #{}", claims.sub);
    let orders = api.orders_for_customer(claims.sub).await.map_err(|e| {
        debug!("💻️ Could not fetch orders. {e}");
        ServerError::BackendError(e.to_string())
    })?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(all_orders => Get "/admin/orders" impl AccountManagement where requires [Role::Admin]);
/// Route handler for the admin order listing.
///
/// Admin users can fetch every order on the system, joined against the consumer snapshots so the listing shows who
/// placed each order.
pub async fn all_orders<B: AccountManagement>(api: web::Data<AccountApi<B>>) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET all orders");
    let orders = api.all_orders().await.map_err(|e| {
        debug!("💻️ Could not fetch orders. {e}");
        ServerError::BackendError(e.to_string())
    })?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(update_order_status => Put "/admin/orders/{id}/status" impl PaymentLedger, PaymentGateway where requires [Role::Admin]);
/// Route handler for the operator status override.
///
/// Admin users can set an order to any status. This is the only way an order becomes `Failed`; the verification flow
/// never produces that transition on its own.
pub async fn update_order_status<B: PaymentLedger, G: PaymentGateway>(
    path: web::Path<i64>,
    body: web::Json<UpdateStatusParams>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    let UpdateStatusParams { status } = body.into_inner();
    debug!("💻️ PUT order status {status} for order #{order_id}");
    let order = api.override_order_status(order_id, status).await?;
    Ok(HttpResponse::Ok().json(order))
}
