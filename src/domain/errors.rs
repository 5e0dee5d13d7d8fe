use thiserror::Error;
use uuid::Uuid;

use super::product::ProductId;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),
    #[error("Internal error: {0}")]
    Internal(String),
}
