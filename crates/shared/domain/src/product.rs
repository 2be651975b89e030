//! Catalog entities written by the external scraper.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product record scraped from a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    #[cfg_attr(feature = "openapi", schema(example = 42))]
    pub id: i32,
    #[cfg_attr(feature = "openapi", schema(example = "Halfvolle melk 1L"))]
    pub name: String,
    #[cfg_attr(feature = "openapi", schema(example = "albert_heijn"))]
    pub store: String,
    #[cfg_attr(feature = "openapi", schema(value_type = f64, example = 1.19))]
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub url: Option<String>,
    /// Lower-cased text the full-text index is built from
    #[serde(skip)]
    pub search_text: String,
}

/// Error row appended by a scraper run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScrapeError {
    pub id: i32,
    /// Which scraper reported the error
    pub scraper: String,
    pub message: String,
}

/// Whether `name` is usable as a Postgres text-search configuration name:
/// a non-empty run of lowercase ASCII letters and underscores.
pub fn is_text_search_config(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase() || b == b'_')
}
