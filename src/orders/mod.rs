//! Orders
//!
//! The append-only repository of submitted orders. Orders are created from a
//! cart's committed line items, keep their line items immutable afterwards,
//! and only ever mutate their status. Every mutating operation is a
//! synchronous read-modify-write of the whole persisted collection.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::{
    carts::{CartLineItem, CartService},
    customers::Customer,
    pricing,
    storage::{CartStore, OrderStore, StorageError},
};

mod status;

pub use status::OrderStatus;

/// A submitted order.
///
/// The `alias` attributes accept the field names used by previously stored
/// collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Time-ordered unique identifier.
    pub id: String,

    /// Snapshot of the customer at submission time.
    #[serde(alias = "usuario")]
    pub customer: Customer,

    /// Line items in insertion order; immutable once the order exists.
    #[serde(alias = "itens")]
    pub line_items: Vec<CartLineItem>,

    /// Sum of the line item subtotals, computed once at creation.
    pub total: Decimal,

    /// Lifecycle status; the only field that mutates post-creation.
    pub status: OrderStatus,

    /// Submission timestamp.
    #[serde(alias = "data")]
    pub created_at: Timestamp,
}

impl Order {
    /// The short id used when an order is referenced in messages and tables.
    #[must_use]
    pub fn short_id(&self) -> &str {
        let start = self.id.len().saturating_sub(6);

        self.id.get(start..).unwrap_or(&self.id)
    }
}

/// Errors returned by [`OrderService`] operations.
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// An order needs at least one line item.
    #[error("cannot submit an order with an empty cart")]
    EmptyCart,

    /// No order has the given id.
    #[error("order not found")]
    NotFound,

    /// The orders collection could not be written.
    #[error("storage error")]
    Storage(#[from] StorageError),
}

/// Order repository and lifecycle operations over an injected [`OrderStore`].
#[derive(Debug)]
pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates the service over the given order store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an order from the given line items and appends it to the
    /// collection.
    ///
    /// The order starts as [`OrderStatus::Pending`] with a fresh time-ordered
    /// id and `total` equal to the sum of the line item subtotals.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::EmptyCart`]: `line_items` is empty.
    /// - [`OrderServiceError::Storage`]: the collection could not be written.
    pub fn create(
        &self,
        customer: &Customer,
        line_items: Vec<CartLineItem>,
    ) -> Result<Order, OrderServiceError> {
        if line_items.is_empty() {
            return Err(OrderServiceError::EmptyCart);
        }

        let total = pricing::order_total(&line_items);
        let order = Order {
            id: Uuid::now_v7().to_string(),
            customer: customer.clone(),
            line_items,
            total,
            status: OrderStatus::Pending,
            created_at: Timestamp::now(),
        };

        let mut orders = self.store.load_orders();
        orders.push(order.clone());
        self.store.save_orders(&orders)?;

        info!(order = %order.id, customer = %order.customer.id, total = %order.total, "order placed");

        Ok(order)
    }

    /// Converts a cart into an order and clears the cart.
    ///
    /// The order is durably recorded before the cart is touched.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::EmptyCart`]: the cart has no line items.
    /// - [`OrderServiceError::Storage`]: either collection could not be written.
    pub fn submit_cart<C: CartStore>(
        &self,
        customer: &Customer,
        cart: &mut CartService<C>,
    ) -> Result<Order, OrderServiceError> {
        let order = self.create(customer, cart.items().to_vec())?;

        cart.clear()?;

        Ok(order)
    }

    /// All orders, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Order> {
        self.store.load_orders()
    }

    /// Orders belonging to the given customer, newest first.
    ///
    /// Matches on customer id, falling back to email for records written by
    /// variants that keyed orders by email.
    #[must_use]
    pub fn list_for_customer(&self, customer: &Customer) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .store
            .load_orders()
            .into_iter()
            .filter(|order| {
                order.customer.id == customer.id || order.customer.email == customer.email
            })
            .collect();

        orders.reverse();
        orders
    }

    /// Overwrites an order's status with no transition validation.
    ///
    /// This is the administrative override; the guided lifecycle lives in
    /// [`OrderService::advance`].
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::NotFound`]: no order has the given id.
    /// - [`OrderServiceError::Storage`]: the collection could not be written.
    pub fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Order, OrderServiceError> {
        let mut orders = self.store.load_orders();

        let slot = orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or(OrderServiceError::NotFound)?;

        slot.status = status;
        let updated = slot.clone();

        self.store.save_orders(&orders)?;

        info!(order = %order_id, status = %status, "order status overwritten");

        Ok(updated)
    }

    /// Moves an order one step along the forward-only lifecycle.
    ///
    /// A no-op for `Finalized` and `Cancelled` orders; the stored collection
    /// is only rewritten when the status actually changes.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::NotFound`]: no order has the given id.
    /// - [`OrderServiceError::Storage`]: the collection could not be written.
    pub fn advance(&self, order_id: &str) -> Result<Order, OrderServiceError> {
        let mut orders = self.store.load_orders();

        let slot = orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or(OrderServiceError::NotFound)?;

        let next = slot.status.advanced();

        if next == slot.status {
            return Ok(slot.clone());
        }

        slot.status = next;
        let updated = slot.clone();

        self.store.save_orders(&orders)?;

        info!(order = %order_id, status = %next, "order advanced");

        Ok(updated)
    }

    /// Removes an order irrevocably.
    ///
    /// # Errors
    ///
    /// - [`OrderServiceError::NotFound`]: no order has the given id; the
    ///   collection is left unchanged.
    /// - [`OrderServiceError::Storage`]: the collection could not be written.
    pub fn delete(&self, order_id: &str) -> Result<(), OrderServiceError> {
        let mut orders = self.store.load_orders();
        let before = orders.len();

        orders.retain(|order| order.id != order_id);

        if orders.len() == before {
            return Err(OrderServiceError::NotFound);
        }

        self.store.save_orders(&orders)?;

        info!(order = %order_id, "order deleted");

        Ok(())
    }
}
