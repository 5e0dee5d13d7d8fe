use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::cart::Cart;
use super::category::{Category, CategoryFilter};
use super::filter::ProductFilter;
use super::product::Product;

/// One visitor's storefront state.
#[derive(Debug, Clone)]
pub struct StorefrontSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Last time the visitor touched this session.
    pub last_seen: DateTime<Utc>,
    pub filter: ProductFilter,
    pub cart_visible: bool,
    pub cart: Cart,
}

impl StorefrontSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            started_at: now,
            last_seen: now,
            filter: ProductFilter::default(),
            cart_visible: false,
            cart: Cart::new(),
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = self.last_seen.max(now);
    }

    pub fn is_idle(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.last_seen > timeout
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// Flip the cart panel and return whether it is now shown.
    pub fn toggle_cart(&mut self) -> bool {
        self.cart_visible = !self.cart_visible;
        self.cart_visible
    }

    pub fn set_cart_visible(&mut self, visible: bool) {
        self.cart_visible = visible;
    }

    /// Derive what the page shows from the session and the catalog.
    pub fn page(&self, catalog: &[Product], categories: &[Category]) -> StorefrontPage {
        StorefrontPage {
            session_id: self.id,
            heading: self.filter.category.title(categories),
            filter: self.filter.clone(),
            products: self.filter.apply(catalog).into_iter().cloned().collect(),
            cart_visible: self.cart_visible,
            cart: self.cart.clone(),
        }
    }
}

impl Default for StorefrontSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of everything the storefront page renders.
#[derive(Debug, Clone)]
pub struct StorefrontPage {
    pub session_id: Uuid,
    pub heading: String,
    pub filter: ProductFilter,
    pub products: Vec<Product>,
    pub cart_visible: bool,
    pub cart: Cart,
}

impl StorefrontPage {
    pub fn result_count(&self) -> usize {
        self.products.len()
    }

    /// The grid shows its "no results" block instead of cards.
    pub fn has_no_results(&self) -> bool {
        self.products.is_empty()
    }
}
