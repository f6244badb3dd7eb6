//! Database module: display models, schema, and the PostgreSQL-backed store.
//!
//! Layout:
//! - `models.rs`: row and display structs handed to callers
//! - `schema.rs`: SQL DDL for initializing the database
//! - `seed.rs`: placeholder rows for local development
//! - `postgres.rs`: `DashboardStore`, one method per data operation

pub mod models;
pub mod postgres;
pub mod schema;
pub mod seed;

pub use models::{
    CardData, CustomerField, FormattedCustomersTable, InvoiceForm, InvoiceStatus, InvoiceUpdate,
    InvoicesTable, LatestInvoice, NewInvoice, Revenue, User,
};
pub use postgres::{DashboardStore, ITEMS_PER_PAGE};
pub use schema::POSTGRES_INIT;
