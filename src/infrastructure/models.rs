use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer};

use crate::domain::product::Product;

/// A product as written in a catalog file.
///
/// Both snake_case and the camelCase keys of the original front-end data are
/// accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "decimal")]
    pub price: BigDecimal,
    #[serde(default, alias = "originalPrice", deserialize_with = "optional_decimal")]
    pub original_price: Option<BigDecimal>,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default = "default_in_stock", alias = "inStock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        Product {
            id: r.id,
            name: r.name,
            price: r.price,
            original_price: r.original_price,
            image: r.image,
            category: r.category,
            rating: r.rating,
            reviews: r.reviews,
            in_stock: r.in_stock,
        }
    }
}

// Prices may be written as "9.99" or 9.99. Numbers go through their JSON text
// so 9.99 stays 9.99 instead of its binary float expansion.
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Text(String),
    Number(serde_json::Number),
}

impl DecimalRepr {
    fn parse<E: serde::de::Error>(self) -> Result<BigDecimal, E> {
        let text = match self {
            DecimalRepr::Text(s) => s,
            DecimalRepr::Number(n) => n.to_string(),
        };
        BigDecimal::from_str(text.trim())
            .map_err(|e| E::custom(format!("invalid decimal '{text}': {e}")))
    }
}

fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
    DecimalRepr::deserialize(deserializer)?.parse()
}

fn optional_decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BigDecimal>, D::Error> {
    Option::<DecimalRepr>::deserialize(deserializer)?
        .map(DecimalRepr::parse)
        .transpose()
}
