//! JSON file store
//!
//! One JSON file per key inside a store directory — the analogue of the
//! browser local storage the collections originally lived in. Key names are
//! kept byte-for-byte so a directory seeded with previously exported data
//! reads as-is.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    carts::CartLineItem,
    customers::{Customer, StoredCustomer},
    orders::Order,
    storage::{CartStore, OrderStore, SessionStore, StorageError, UserStore},
};

/// Fixed key of the orders collection.
pub const ORDERS_KEY: &str = "bem-casado-pedidos";

/// Fixed key of the users collection.
pub const USERS_KEY: &str = "bem-casado-usuarios";

/// Fixed key of the current-session customer record.
pub const SESSION_KEY: &str = "bem-casado-user";

/// Key prefix of per-customer cart snapshots; the customer id is appended.
pub const CART_KEY_PREFIX: &str = "bem-casado-carrinho-";

/// File-backed implementation of every store trait.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at the given directory. The directory is
    /// created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the store files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let path = self.path(key);

        let Ok(bytes) = fs::read(&path) else {
            return T::default();
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|error| {
            debug!(key, %error, "discarding malformed store record");

            T::default()
        })
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let bytes = serde_json::to_vec(value)?;
        fs::write(self.path(key), bytes)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Io(error)),
        }
    }

    fn cart_key(customer_id: &str) -> String {
        format!("{CART_KEY_PREFIX}{customer_id}")
    }
}

impl OrderStore for JsonFileStore {
    fn load_orders(&self) -> Vec<Order> {
        self.read(ORDERS_KEY)
    }

    fn save_orders(&self, orders: &[Order]) -> Result<(), StorageError> {
        self.write(ORDERS_KEY, &orders)
    }
}

impl UserStore for JsonFileStore {
    fn load_users(&self) -> Vec<StoredCustomer> {
        self.read(USERS_KEY)
    }

    fn save_users(&self, users: &[StoredCustomer]) -> Result<(), StorageError> {
        self.write(USERS_KEY, &users)
    }
}

impl CartStore for JsonFileStore {
    fn load_cart(&self, customer_id: &str) -> Vec<CartLineItem> {
        self.read(&Self::cart_key(customer_id))
    }

    fn save_cart(&self, customer_id: &str, items: &[CartLineItem]) -> Result<(), StorageError> {
        self.write(&Self::cart_key(customer_id), &items)
    }
}

impl SessionStore for JsonFileStore {
    fn current_customer(&self) -> Option<Customer> {
        self.read(SESSION_KEY)
    }

    fn set_current_customer(&self, customer: &Customer) -> Result<(), StorageError> {
        self.write(SESSION_KEY, customer)
    }

    fn clear_current_customer(&self) -> Result<(), StorageError> {
        self.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{carts::CartLineItem, catalog, customers::Customer, orders::OrderStatus};

    use super::*;

    fn store() -> TestResult<(tempfile::TempDir, JsonFileStore)> {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path());

        Ok((dir, store))
    }

    fn sample_item() -> TestResult<CartLineItem> {
        let filling = catalog::filling_by_id("doce-leite")
            .ok_or("doce-leite should exist")?
            .clone();
        let packaging = catalog::packaging_by_id("simples")
            .ok_or("simples should exist")?
            .clone();

        Ok(CartLineItem::build(&filling, &packaging, 50, "sem fita")?)
    }

    #[test]
    fn missing_files_load_as_empty() -> TestResult {
        let (_dir, store) = store()?;

        assert!(store.load_orders().is_empty());
        assert!(store.load_users().is_empty());
        assert!(store.load_cart("c1").is_empty());
        assert!(store.current_customer().is_none());

        Ok(())
    }

    #[test]
    fn malformed_files_load_as_empty() -> TestResult {
        let (dir, store) = store()?;

        fs::write(dir.path().join(format!("{ORDERS_KEY}.json")), b"{not json")?;

        assert!(store.load_orders().is_empty());

        Ok(())
    }

    #[test]
    fn cart_snapshot_round_trips_under_the_customer_key() -> TestResult {
        let (dir, store) = store()?;

        let item = sample_item()?;
        store.save_cart("c1", std::slice::from_ref(&item))?;

        assert!(
            dir.path()
                .join(format!("{CART_KEY_PREFIX}c1.json"))
                .exists(),
            "cart file should use the customer-scoped key"
        );

        let loaded = store.load_cart("c1");
        assert_eq!(loaded, [item]);
        assert!(store.load_cart("c2").is_empty());

        Ok(())
    }

    #[test]
    fn session_record_sets_and_clears() -> TestResult {
        let (_dir, store) = store()?;

        let customer = Customer {
            id: "c1".to_string(),
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            phone: "(11) 98888-7777".to_string(),
            address: "Rua das Flores, 10".to_string(),
            is_admin: false,
        };

        store.set_current_customer(&customer)?;
        assert_eq!(store.current_customer(), Some(customer));

        store.clear_current_customer()?;
        assert!(store.current_customer().is_none());

        // Clearing an absent record stays a no-op.
        store.clear_current_customer()?;

        Ok(())
    }

    #[test]
    fn legacy_orders_file_reads_as_is() -> TestResult {
        let (dir, store) = store()?;

        let legacy = r##"[{
            "id": "1700000000000",
            "usuario": {
                "id": "1699999999999",
                "name": "Maria Silva",
                "nome": "Maria Silva",
                "email": "maria@example.com",
                "telefone": "(11) 98888-7777",
                "endereco": "Rua das Flores, 10",
                "isAdmin": false
            },
            "itens": [{
                "id": "1700000000001",
                "recheio": {
                    "id": "nutella",
                    "nome": "Nutella",
                    "preco": 3.2,
                    "cor": "#654321",
                    "descricao": "Creme de avelã Nutella"
                },
                "embalagem": {
                    "id": "luxo",
                    "nome": "Luxo",
                    "preco": 2.0,
                    "cor": "#DDA0DD",
                    "descricao": "Caixa rígida com acabamento especial"
                },
                "quantidade": 50,
                "observacoes": "entrega sábado",
                "subtotal": 260
            }],
            "total": 260,
            "status": "Pendente",
            "data": "2024-05-01T12:00:00.000Z"
        }]"##;

        fs::write(dir.path().join(format!("{ORDERS_KEY}.json")), legacy)?;

        let orders = store.load_orders();
        let order = orders.first().ok_or("legacy order should load")?;

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, dec!(260));
        assert_eq!(order.customer.address, "Rua das Flores, 10");

        Ok(())
    }

    #[test]
    fn saved_orders_reload_in_insertion_order() -> TestResult {
        let (_dir, store) = store()?;

        let customer = Customer {
            id: "c1".to_string(),
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            phone: "(11) 98888-7777".to_string(),
            address: "Rua das Flores, 10".to_string(),
            is_admin: false,
        };

        let first = crate::orders::Order {
            id: "o1".to_string(),
            customer: customer.clone(),
            line_items: vec![sample_item()?],
            total: dec!(150.00),
            status: OrderStatus::Pending,
            created_at: jiff::Timestamp::UNIX_EPOCH,
        };
        let mut second = first.clone();
        second.id = "o2".to_string();
        second.status = OrderStatus::Delivered;

        store.save_orders(&[first.clone(), second.clone()])?;

        let loaded = store.load_orders();

        assert_eq!(loaded, [first, second]);

        Ok(())
    }
}
