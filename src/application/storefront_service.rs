use uuid::Uuid;

use crate::domain::cart::Cart;
use crate::domain::category::{Category, CategoryFilter, ALL_CATEGORY_ID};
use crate::domain::errors::DomainError;
use crate::domain::filter::ProductFilter;
use crate::domain::ports::{CatalogSource, SessionRepository};
use crate::domain::product::{Product, ProductId};
use crate::domain::session::{StorefrontPage, StorefrontSession};

pub struct StorefrontService<C, S> {
    catalog: C,
    sessions: S,
    categories: Vec<Category>,
}

impl<C: CatalogSource, S: SessionRepository> StorefrontService<C, S> {
    pub fn new(catalog: C, sessions: S, categories: Vec<Category>) -> Self {
        Self {
            catalog,
            sessions,
            categories,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Filter the catalog without touching any session.
    pub fn browse(&self, category_id: &str, search: &str) -> Result<Vec<Product>, DomainError> {
        let filter = ProductFilter::new(self.resolve_category(category_id)?, search);
        let catalog = self.catalog.products()?;
        Ok(filter.apply(&catalog).into_iter().cloned().collect())
    }

    // ── Session lifecycle ─────────────────────────────────────────────────────

    pub fn start_session(&self) -> Result<StorefrontSession, DomainError> {
        let session = StorefrontSession::new();
        self.sessions.insert(session.clone())?;
        log::info!("Started storefront session {}", session.id);
        Ok(session)
    }

    pub fn end_session(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.sessions.remove(id)? {
            return Err(DomainError::SessionNotFound(id));
        }
        log::info!("Ended storefront session {}", id);
        Ok(())
    }

    pub fn page(&self, id: Uuid) -> Result<StorefrontPage, DomainError> {
        self.change_page(id, |_| ())
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    pub fn select_category(
        &self,
        id: Uuid,
        category_id: &str,
    ) -> Result<StorefrontPage, DomainError> {
        let category = self.resolve_category(category_id)?;
        self.change_page(id, |s| s.select_category(category))
    }

    pub fn search(&self, id: Uuid, text: &str) -> Result<StorefrontPage, DomainError> {
        self.change_page(id, |s| s.set_search(text))
    }

    pub fn toggle_cart(&self, id: Uuid) -> Result<bool, DomainError> {
        self.with_session(id, StorefrontSession::toggle_cart)
    }

    pub fn set_cart_visible(&self, id: Uuid, visible: bool) -> Result<bool, DomainError> {
        self.with_session(id, |s| {
            s.set_cart_visible(visible);
            s.cart_visible
        })
    }

    // ── Cart ──────────────────────────────────────────────────────────────────

    pub fn cart(&self, id: Uuid) -> Result<Cart, DomainError> {
        self.with_session(id, |s| s.cart.clone())
    }

    /// Add one unit of a catalog product.
    ///
    /// Out-of-stock products are refused here; the cart itself accepts them.
    pub fn add_to_cart(&self, id: Uuid, product_id: ProductId) -> Result<Cart, DomainError> {
        let product = self
            .catalog
            .find(product_id)?
            .ok_or(DomainError::ProductNotFound(product_id))?;
        if !product.in_stock {
            log::warn!(
                "Session {} tried to add out-of-stock product {}",
                id,
                product_id
            );
            return Err(DomainError::OutOfStock(product_id));
        }
        let cart = self.with_session(id, |s| {
            s.cart.add(&product);
            s.cart.clone()
        })?;
        log::debug!(
            "Session {} added product {} ({} items in cart)",
            id,
            product_id,
            cart.total_items()
        );
        Ok(cart)
    }

    pub fn remove_from_cart(&self, id: Uuid, product_id: ProductId) -> Result<Cart, DomainError> {
        self.with_session(id, |s| {
            if s.cart.remove(product_id) {
                log::debug!("Session {} removed product {}", id, product_id);
            }
            s.cart.clone()
        })
    }

    /// Set a line's quantity; zero or less removes the line. Products not in
    /// the cart are left alone.
    pub fn set_quantity(
        &self,
        id: Uuid,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Cart, DomainError> {
        self.with_session(id, |s| {
            if s.cart.set_quantity(product_id, quantity) {
                log::debug!(
                    "Session {} set product {} quantity to {}",
                    id,
                    product_id,
                    quantity
                );
            }
            s.cart.clone()
        })
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut StorefrontSession) -> T,
    ) -> Result<T, DomainError> {
        self.sessions
            .update(id, f)?
            .ok_or(DomainError::SessionNotFound(id))
    }

    /// Apply `change` and derive the resulting page under one session lock.
    fn change_page(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut StorefrontSession),
    ) -> Result<StorefrontPage, DomainError> {
        let catalog = self.catalog.products()?;
        self.with_session(id, |s| {
            change(s);
            s.page(&catalog, &self.categories)
        })
    }

    fn resolve_category(&self, category_id: &str) -> Result<CategoryFilter, DomainError> {
        if category_id == ALL_CATEGORY_ID || self.categories.iter().any(|c| c.id == category_id) {
            Ok(CategoryFilter::from_id(category_id))
        } else {
            Err(DomainError::UnknownCategory(category_id.to_string()))
        }
    }
}
