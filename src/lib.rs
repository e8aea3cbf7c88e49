//! Data core of an Opera block explorer: typed GraphQL queries, the
//! aggregation of raw entities into display values, cursor pagination and
//! the per-page view state built on top of them.

pub mod aggregator;
pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod links;
pub mod pagination;
pub mod traits;
pub mod types;
pub mod views;

#[cfg(test)]
mod testing;

pub use client::{Client, Network};
pub use config::Config;
pub use error::{ExplorerError, Result};
