//! JSON handlers, one module per dashboard area.

pub mod customers;
pub mod dashboard;
pub mod invoices;

use serde::Deserialize;

/// `?query=...&page=...`; an absent query matches everything.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<i64>,
}
