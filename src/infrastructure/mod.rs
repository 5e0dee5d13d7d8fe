pub mod catalog;
pub mod models;
pub mod session_repo;
