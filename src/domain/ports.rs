use uuid::Uuid;

use super::errors::DomainError;
use super::product::{Product, ProductId};
use super::session::StorefrontSession;

/// Supplies the catalog the storefront sells from.
pub trait CatalogSource: Send + Sync + 'static {
    /// Every product, in display order.
    fn products(&self) -> Result<Vec<Product>, DomainError>;

    fn find(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products()?.into_iter().find(|p| p.id == id))
    }
}

/// Holds live storefront sessions.
///
/// `update` runs the closure while the session is exclusively held, so
/// operations on one session never interleave. A store may expire sessions;
/// `get` and `update` then report them as absent.
pub trait SessionRepository: Send + Sync + 'static {
    fn insert(&self, session: StorefrontSession) -> Result<(), DomainError>;
    fn get(&self, id: Uuid) -> Result<Option<StorefrontSession>, DomainError>;
    fn update<T, F>(&self, id: Uuid, f: F) -> Result<Option<T>, DomainError>
    where
        F: FnOnce(&mut StorefrontSession) -> T;
    fn remove(&self, id: Uuid) -> Result<bool, DomainError>;
}
