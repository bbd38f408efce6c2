//! Products

pub mod data;
pub mod errors;
pub mod query;
pub mod rating;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
