pub mod cart;
pub mod category;
pub mod errors;
pub mod filter;
pub mod money;
pub mod ports;
pub mod product;
pub mod session;
