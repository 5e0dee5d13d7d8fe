use std::collections::HashSet;
use std::path::{Path, PathBuf};

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogSource;
use crate::domain::product::{Product, ProductId, MAX_STARS};

use super::models::ProductRecord;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Fixed in-memory catalog, validated once on construction.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate(&products)?;
        Ok(Self { products })
    }

    /// Parse a JSON array of products.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        Self::new(records.into_iter().map(Product::from).collect())
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        log::info!(
            "Loaded {} products from {}",
            catalog.products.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CatalogSource for StaticCatalog {
    fn products(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.clone())
    }

    fn find(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}

fn validate(products: &[Product]) -> Result<(), CatalogError> {
    let zero = BigDecimal::from(0);
    let mut seen = HashSet::with_capacity(products.len());
    for p in products {
        if !seen.insert(p.id) {
            return Err(CatalogError::Invalid(format!("duplicate product id {}", p.id)));
        }
        if p.price < zero {
            return Err(CatalogError::Invalid(format!(
                "product {} has negative price {}",
                p.id, p.price
            )));
        }
        if let Some(original) = &p.original_price {
            if *original < p.price {
                return Err(CatalogError::Invalid(format!(
                    "product {} original price {} is below price {}",
                    p.id, original, p.price
                )));
            }
        }
        if !(0.0..=f64::from(MAX_STARS)).contains(&p.rating) {
            return Err(CatalogError::Invalid(format!(
                "product {} rating {} is outside 0-{}",
                p.id, p.rating, MAX_STARS
            )));
        }
    }
    Ok(())
}
