//! Search module.
//!
//! Contains the catalog filter criteria.

mod filter;

pub use filter::{Filter, ProductFilter};
