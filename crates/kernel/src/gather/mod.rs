//! Item queries for sections.
//!
//! This module provides:
//! - ItemCollection: a page of items plus paging metadata
//! - StaticQueryProvider: an in-memory `QueryProvider` over a fixed item list

mod static_provider;
pub mod types;

pub use static_provider::StaticQueryProvider;
pub use types::ItemCollection;
