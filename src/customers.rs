//! Customers
//!
//! Customer identity, self-registration and login, plus the current-session
//! record. Credentials are stored and compared as plain strings — the format
//! the accounts already on disk use — and the administrator is a
//! distinguished singleton matched against a fixed email/password pair.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::storage::{CartStore, SessionStore, StorageError, UserStore};

/// Email of the distinguished administrator account.
pub const ADMIN_EMAIL: &str = "admin@doceamor.com";

/// Password of the distinguished administrator account.
pub const ADMIN_PASSWORD: &str = "admin123";

/// A customer identity.
///
/// The `alias` attributes accept the field names used by previously stored
/// records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier. Defaults to empty for legacy records that carried
    /// none.
    #[serde(default)]
    pub id: String,

    /// Full name.
    pub name: String,

    /// Contact email; also the login key.
    pub email: String,

    /// Contact phone.
    #[serde(alias = "telefone")]
    pub phone: String,

    /// Delivery address.
    #[serde(alias = "endereco")]
    pub address: String,

    /// Whether this is the administrator singleton.
    #[serde(default)]
    pub is_admin: bool,
}

/// A customer record as persisted in the users collection, including the
/// plaintext password captured at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCustomer {
    /// Unique identifier.
    #[serde(default)]
    pub id: String,

    /// Full name.
    pub name: String,

    /// Contact email; also the login key.
    pub email: String,

    /// Contact phone.
    #[serde(alias = "telefone")]
    pub phone: String,

    /// Delivery address.
    #[serde(alias = "endereco")]
    pub address: String,

    /// Whether this is the administrator singleton.
    #[serde(default)]
    pub is_admin: bool,

    /// Plaintext password, compared verbatim at login.
    #[serde(default, alias = "senha")]
    pub password: String,
}

impl From<&StoredCustomer> for Customer {
    fn from(record: &StoredCustomer) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            is_admin: record.is_admin,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    /// Full name.
    pub name: String,
    /// Contact email; must be unused.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Plaintext password to store.
    pub password: String,
}

/// Errors returned by [`AuthService`] operations.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// A registration field was left empty.
    #[error("all registration fields are required")]
    MissingFields,

    /// The email is already registered.
    #[error("email is already registered")]
    DuplicateEmail,

    /// Email/password pair did not match any account.
    #[error("invalid email or password")]
    AuthenticationFailed,

    /// The users collection or session record could not be written.
    #[error("storage error")]
    Storage(#[from] StorageError),
}

/// Registration, login and session management over injected stores.
#[derive(Debug)]
pub struct AuthService<U: UserStore, S: SessionStore> {
    users: U,
    session: S,
}

impl<U: UserStore, S: SessionStore> AuthService<U, S> {
    /// Creates the service over the given user and session stores.
    #[must_use]
    pub fn new(users: U, session: S) -> Self {
        Self { users, session }
    }

    /// Registers a new customer and signs them in.
    ///
    /// # Errors
    ///
    /// - [`AuthServiceError::MissingFields`]: a field was left empty.
    /// - [`AuthServiceError::DuplicateEmail`]: the email is already taken.
    /// - [`AuthServiceError::Storage`]: the users collection could not be written.
    pub fn register(&self, new: NewCustomer) -> Result<Customer, AuthServiceError> {
        let required = [
            new.name.as_str(),
            new.email.as_str(),
            new.phone.as_str(),
            new.address.as_str(),
            new.password.as_str(),
        ];

        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AuthServiceError::MissingFields);
        }

        let mut users = self.users.load_users();

        if users.iter().any(|user| user.email == new.email) {
            return Err(AuthServiceError::DuplicateEmail);
        }

        let record = StoredCustomer {
            id: Uuid::now_v7().to_string(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            is_admin: false,
            password: new.password,
        };
        let customer = Customer::from(&record);

        users.push(record);
        self.users.save_users(&users)?;
        self.session.set_current_customer(&customer)?;

        debug!(customer = %customer.id, "customer registered");

        Ok(customer)
    }

    /// Signs a customer in by email and plaintext password.
    ///
    /// The administrator singleton is checked first against the fixed
    /// credential pair; every other login compares against the stored
    /// records verbatim.
    ///
    /// # Errors
    ///
    /// - [`AuthServiceError::AuthenticationFailed`]: no account matched.
    /// - [`AuthServiceError::Storage`]: the session record could not be written.
    pub fn login(&self, email: &str, password: &str) -> Result<Customer, AuthServiceError> {
        if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            let admin = admin_profile();
            self.session.set_current_customer(&admin)?;
            return Ok(admin);
        }

        let customer = self
            .users
            .load_users()
            .iter()
            .find(|user| user.email == email && user.password == password)
            .map(Customer::from)
            .ok_or(AuthServiceError::AuthenticationFailed)?;

        self.session.set_current_customer(&customer)?;

        debug!(customer = %customer.id, "customer signed in");

        Ok(customer)
    }

    /// The currently signed-in customer, if any.
    #[must_use]
    pub fn current(&self) -> Option<Customer> {
        self.session.current_customer()
    }

    /// Signs the current customer out, clearing their persisted cart along
    /// with the session record.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Storage`] when the cart or session record
    /// could not be written.
    pub fn logout<C: CartStore>(&self, carts: &C) -> Result<(), AuthServiceError> {
        if let Some(customer) = self.session.current_customer() {
            carts.save_cart(&customer.id, &[])?;
        }

        self.session.clear_current_customer()?;

        Ok(())
    }
}

/// The administrator singleton.
fn admin_profile() -> Customer {
    Customer {
        id: "admin".to_string(),
        name: "Administrador".to_string(),
        email: ADMIN_EMAIL.to_string(),
        phone: "(11) 99999-9999".to_string(),
        address: "São Paulo, SP".to_string(),
        is_admin: true,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::{CartStore, MemoryStore};

    use super::*;

    fn service(store: &MemoryStore) -> AuthService<MemoryStore, MemoryStore> {
        AuthService::new(store.clone(), store.clone())
    }

    fn maria() -> NewCustomer {
        NewCustomer {
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            phone: "(11) 98888-7777".to_string(),
            address: "Rua das Flores, 10, São Paulo".to_string(),
            password: "segredo".to_string(),
        }
    }

    #[test]
    fn register_signs_customer_in() -> TestResult {
        let store = MemoryStore::default();
        let auth = service(&store);

        let customer = auth.register(maria())?;

        assert!(!customer.id.is_empty());
        assert!(!customer.is_admin);
        assert_eq!(auth.current(), Some(customer));

        Ok(())
    }

    #[test]
    fn register_rejects_duplicate_email() -> TestResult {
        let store = MemoryStore::default();
        let auth = service(&store);

        auth.register(maria())?;
        let result = auth.register(maria());

        assert!(matches!(result, Err(AuthServiceError::DuplicateEmail)));

        Ok(())
    }

    #[test]
    fn register_rejects_blank_fields() {
        let store = MemoryStore::default();
        let auth = service(&store);

        let mut incomplete = maria();
        incomplete.address = "  ".to_string();

        let result = auth.register(incomplete);

        assert!(matches!(result, Err(AuthServiceError::MissingFields)));
    }

    #[test]
    fn login_matches_stored_credentials() -> TestResult {
        let store = MemoryStore::default();
        let auth = service(&store);

        let registered = auth.register(maria())?;
        auth.logout(&store)?;

        let signed_in = auth.login("maria@example.com", "segredo")?;

        assert_eq!(signed_in, registered);
        assert_eq!(auth.current(), Some(signed_in));

        Ok(())
    }

    #[test]
    fn login_rejects_wrong_password() -> TestResult {
        let store = MemoryStore::default();
        let auth = service(&store);

        auth.register(maria())?;

        let result = auth.login("maria@example.com", "errado");

        assert!(matches!(result, Err(AuthServiceError::AuthenticationFailed)));

        Ok(())
    }

    #[test]
    fn admin_login_uses_fixed_credentials() -> TestResult {
        let store = MemoryStore::default();
        let auth = service(&store);

        let admin = auth.login(ADMIN_EMAIL, ADMIN_PASSWORD)?;

        assert!(admin.is_admin);
        assert_eq!(admin.id, "admin");
        assert_eq!(admin.name, "Administrador");

        Ok(())
    }

    #[test]
    fn logout_clears_session_and_cart() -> TestResult {
        let store = MemoryStore::default();
        let auth = service(&store);

        let customer = auth.register(maria())?;

        let filling = crate::catalog::filling_by_id("limao")
            .expect("limao should exist")
            .clone();
        let packaging = crate::catalog::packaging_by_id("simples")
            .expect("simples should exist")
            .clone();
        let item = crate::carts::CartLineItem::build(&filling, &packaging, 50, "")?;
        store.save_cart(&customer.id, &[item])?;

        auth.logout(&store)?;

        assert!(auth.current().is_none());
        assert!(store.load_cart(&customer.id).is_empty());

        Ok(())
    }

    #[test]
    fn legacy_user_record_deserializes() -> TestResult {
        let raw = r#"{
            "id": "1700000000001",
            "name": "Maria Silva",
            "nome": "Maria Silva",
            "email": "maria@example.com",
            "telefone": "(11) 98888-7777",
            "endereco": "Rua das Flores, 10",
            "isAdmin": false,
            "senha": "segredo"
        }"#;

        let user: StoredCustomer = serde_json::from_str(raw)?;

        assert_eq!(user.name, "Maria Silva");
        assert_eq!(user.phone, "(11) 98888-7777");
        assert_eq!(user.password, "segredo");

        Ok(())
    }
}
