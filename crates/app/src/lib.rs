//! Shared application domain and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod fixtures;

#[cfg(test)]
mod test;
