use bigdecimal::BigDecimal;

use super::product::{Product, ProductId};

pub const EMPTY_CART_MESSAGE: &str = "Корзина пуста";

/// One product in the cart with its requested quantity (always >= 1).
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> BigDecimal {
        self.product.price.clone() * BigDecimal::from(self.quantity)
    }
}

/// Insertion-ordered cart holding at most one line per product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the product's line, appending it with quantity 1 on first add.
    ///
    /// Stock is not checked here.
    pub fn add(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Drop the product's line. Returns whether a line was there.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line; `quantity <= 0` removes it.
    ///
    /// Products not already in the cart are left out: this never adds a line.
    /// Returns whether the cart changed.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|l| l.product.id == product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub fn total_price(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::from(0), |sum, line| sum + line.line_total())
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
