use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sps_common::Paise;
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------   GatewayOrderId   ----------------------------------------------------------
/// The order reference assigned by the payment provider when a remote charge is opened.
///
/// It is assigned exactly once at checkout, is unique per order, and is the join key used when the client submits a
/// payment confirmation for verification.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct GatewayOrderId(pub String);

impl FromStr for GatewayOrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for GatewayOrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for GatewayOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl GatewayOrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   PaymentStatus   -----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// The order has been created and the remote charge is open, but no verified payment has arrived.
    Pending,
    /// A payment confirmation with a valid gateway signature has settled the order. Terminal.
    Paid,
    /// The order was marked as failed by an operator. Never produced by the verification flow itself.
    Failed,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment status: {0}")]
pub struct ConversionError(String);

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            "Failed" => Ok(Self::Failed),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------      LineItem      ----------------------------------------------------------
/// A single order line as submitted at checkout. Stored as an opaque snapshot on the order; never re-derived from
/// the catalog at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The catalog reference for the product. Opaque to the payment flow.
    pub product_id: String,
    /// Unit price in minor currency units at the time of checkout.
    pub unit_price: Paise,
    pub quantity: i64,
}

impl LineItem {
    pub fn new<S: Into<String>>(product_id: S, unit_price: Paise, quantity: i64) -> Self {
        Self { product_id: product_id.into(), unit_price, quantity }
    }

    /// The exact line total, or `None` when `unit_price * quantity` does not fit in 64-bit paise.
    pub fn line_total(&self) -> Option<Paise> {
        self.unit_price.checked_mul(self.quantity)
    }
}

//--------------------------------------  ShippingAddress   ----------------------------------------------------------
/// Shipping address snapshot captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

//--------------------------------------        Order       ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    #[sqlx(json)]
    pub items: Vec<LineItem>,
    #[sqlx(json)]
    pub shipping_address: ShippingAddress,
    /// Server-computed total. Always equals the sum of the line totals at creation time.
    pub total_price: Paise,
    pub currency: String,
    pub gateway_order_id: GatewayOrderId,
    /// The provider's payment reference. Set exactly once, by the first successful verification.
    pub gateway_payment_id: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewOrder      ----------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
    pub total_price: Paise,
    pub currency: String,
    /// The reference returned by the provider when the remote charge was opened.
    pub gateway_order_id: GatewayOrderId,
}

impl NewOrder {
    pub fn new(customer_id: i64, items: Vec<LineItem>, total_price: Paise, gateway_order_id: GatewayOrderId) -> Self {
        Self {
            customer_id,
            items,
            shipping_address: ShippingAddress::default(),
            total_price,
            currency: sps_common::INR_CURRENCY_CODE.to_string(),
            gateway_order_id,
        }
    }

    pub fn with_shipping_address(mut self, address: ShippingAddress) -> Self {
        self.shipping_address = address;
        self
    }
}

//--------------------------------------      Consumer      ----------------------------------------------------------
/// Display-only record of who placed an order. Maintained by the account system; the payment flow only ever refreshes
/// the snapshot for an already-authenticated caller and joins against it for admin listings.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Consumer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

//--------------------------------------        Role        ----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

pub type Roles = Vec<Role>;

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            s => Err(ConversionError(format!("Invalid role: {s}"))),
        }
    }
}
