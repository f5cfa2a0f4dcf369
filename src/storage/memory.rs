//! In-memory store
//!
//! A shared, cloneable store backing tests and ephemeral sessions. Clones
//! share the same underlying state, so one instance can serve every store
//! trait at once.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    carts::CartLineItem,
    customers::{Customer, StoredCustomer},
    orders::Order,
    storage::{CartStore, OrderStore, SessionStore, StorageError, UserStore},
};

/// In-memory implementation of every store trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    orders: Vec<Order>,
    users: Vec<StoredCustomer>,
    carts: HashMap<String, Vec<CartLineItem>>,
    session: Option<Customer>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OrderStore for MemoryStore {
    fn load_orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    fn save_orders(&self, orders: &[Order]) -> Result<(), StorageError> {
        self.lock().orders = orders.to_vec();

        Ok(())
    }
}

impl UserStore for MemoryStore {
    fn load_users(&self) -> Vec<StoredCustomer> {
        self.lock().users.clone()
    }

    fn save_users(&self, users: &[StoredCustomer]) -> Result<(), StorageError> {
        self.lock().users = users.to_vec();

        Ok(())
    }
}

impl CartStore for MemoryStore {
    fn load_cart(&self, customer_id: &str) -> Vec<CartLineItem> {
        self.lock().carts.get(customer_id).cloned().unwrap_or_default()
    }

    fn save_cart(&self, customer_id: &str, items: &[CartLineItem]) -> Result<(), StorageError> {
        self.lock()
            .carts
            .insert(customer_id.to_string(), items.to_vec());

        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn current_customer(&self) -> Option<Customer> {
        self.lock().session.clone()
    }

    fn set_current_customer(&self, customer: &Customer) -> Result<(), StorageError> {
        self.lock().session = Some(customer.clone());

        Ok(())
    }

    fn clear_current_customer(&self) -> Result<(), StorageError> {
        self.lock().session = None;

        Ok(())
    }
}
