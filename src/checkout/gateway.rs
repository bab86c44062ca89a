//! Order gateway

use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use super::OrderPayload;

/// Errors returned by an order service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The service received the order and refused it.
    #[error("Order rejected: {0}")]
    Rejected(String),

    /// The service could not be reached.
    #[error("Order service unavailable: {0}")]
    Unavailable(String),
}

/// Acknowledgement of an accepted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Identifier assigned by the service.
    pub order_id: u64,
}

/// Places orders with whatever service fulfils them.
#[automock]
pub trait OrderGateway {
    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the order was not accepted. The caller
    /// must keep the cart intact in that case.
    fn place_order(&mut self, order: &OrderPayload) -> Result<OrderConfirmation, OrderError>;
}

/// Lifecycle state of a recorded order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Received, not yet processed.
    Pending,
}

/// An order recorded by [`SimulatedGateway`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedOrder {
    /// Sequential order number, starting at 1.
    pub id: u64,

    /// Customer name.
    pub customer_name: String,

    /// Contact email.
    pub customer_email: String,

    /// Contact phone number.
    pub customer_phone: String,

    /// Order total.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_amount: Decimal,

    /// Lifecycle state.
    pub status: OrderStatus,

    /// When the order was recorded.
    pub created_at: Timestamp,
}

/// Accepts every order and keeps it in memory.
#[derive(Debug, Default)]
pub struct SimulatedGateway {
    orders: Vec<PlacedOrder>,
}

impl SimulatedGateway {
    /// Create a gateway with no recorded orders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders accepted so far, oldest first.
    pub fn orders(&self) -> &[PlacedOrder] {
        &self.orders
    }
}

impl OrderGateway for SimulatedGateway {
    fn place_order(&mut self, order: &OrderPayload) -> Result<OrderConfirmation, OrderError> {
        let id = u64::try_from(self.orders.len())
            .map_err(|error| OrderError::Unavailable(error.to_string()))?
            + 1;

        let placed = PlacedOrder {
            id,
            customer_name: order.name.clone(),
            customer_email: order.email.clone(),
            customer_phone: order.phone.clone(),
            total_amount: order.total,
            status: OrderStatus::Pending,
            created_at: Timestamp::now(),
        };

        info!(
            order_id = id,
            customer = %placed.customer_name,
            items = order.items.len(),
            total = %order.total,
            "order placed"
        );

        self.orders.push(placed);

        Ok(OrderConfirmation { order_id: id })
    }
}
