use bigdecimal::{BigDecimal, ToPrimitive, Zero};

pub type ProductId = i64;

/// Number of stars a rating is drawn against.
pub const MAX_STARS: u8 = 5;

pub const ADD_TO_CART_LABEL: &str = "В корзину";
pub const OUT_OF_STOCK_LABEL: &str = "Нет в наличии";

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: BigDecimal,
    /// Pre-discount reference price, never below `price`.
    pub original_price: Option<BigDecimal>,
    pub image: String,
    pub category: String,
    pub rating: f64,
    pub reviews: u32,
    pub in_stock: bool,
}

impl Product {
    /// Percentage off the original price, rounded half-up.
    ///
    /// `None` when there is no original price or it is zero.
    pub fn discount_percent(&self) -> Option<i64> {
        let original = self.original_price.as_ref()?;
        if original.is_zero() {
            return None;
        }
        let percent = (original - &self.price) * BigDecimal::from(100) / original.clone();
        // Values are non-negative, so adding one half and truncating rounds half-up.
        (percent + BigDecimal::new(5.into(), 1)).with_scale(0).to_i64()
    }

    /// Stars drawn filled for this product's rating.
    pub fn filled_stars(&self) -> u8 {
        if self.rating.is_nan() {
            return 0;
        }
        self.rating.floor().clamp(0.0, f64::from(MAX_STARS)) as u8
    }

    /// Caption of the product card's add button.
    pub fn availability_label(&self) -> &'static str {
        if self.in_stock {
            ADD_TO_CART_LABEL
        } else {
            OUT_OF_STOCK_LABEL
        }
    }
}
