//! Storage
//!
//! Injected persistence seams for the storefront. The UI layers depend only
//! on these traits; [`MemoryStore`] backs tests and ephemeral sessions,
//! [`JsonFileStore`] is the local-storage analogue used by the app.
//!
//! Reads are defensive by contract: a missing or malformed record loads as
//! its empty/default value and never errors. Writes rewrite the whole value
//! for the key and surface [`StorageError`] to the caller.

use thiserror::Error;

use crate::{
    carts::CartLineItem,
    customers::{Customer, StoredCustomer},
    orders::Order,
};

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Errors raised when a store value could not be written.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be created, written or removed.
    #[error("failed to write the store")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded.
    #[error("failed to encode a store record")]
    Encode(#[from] serde_json::Error),
}

/// Persistence seam for the orders collection.
pub trait OrderStore {
    /// Loads every stored order, in insertion order.
    fn load_orders(&self) -> Vec<Order>;

    /// Rewrites the whole orders collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the collection could not be written.
    fn save_orders(&self, orders: &[Order]) -> Result<(), StorageError>;
}

/// Persistence seam for the users collection.
pub trait UserStore {
    /// Loads every stored user record.
    fn load_users(&self) -> Vec<StoredCustomer>;

    /// Rewrites the whole users collection.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the collection could not be written.
    fn save_users(&self, users: &[StoredCustomer]) -> Result<(), StorageError>;
}

/// Persistence seam for per-customer cart snapshots.
pub trait CartStore {
    /// Loads the cart snapshot for one customer.
    fn load_cart(&self, customer_id: &str) -> Vec<CartLineItem>;

    /// Rewrites one customer's cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the snapshot could not be written.
    fn save_cart(&self, customer_id: &str, items: &[CartLineItem]) -> Result<(), StorageError>;
}

/// Persistence seam for the current-session customer.
pub trait SessionStore {
    /// The signed-in customer, if any.
    fn current_customer(&self) -> Option<Customer>;

    /// Records the signed-in customer.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the record could not be written.
    fn set_current_customer(&self, customer: &Customer) -> Result<(), StorageError>;

    /// Clears the session record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the record could not be removed.
    fn clear_current_customer(&self) -> Result<(), StorageError>;
}
