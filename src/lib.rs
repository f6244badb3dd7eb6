pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod handlers;
pub mod router;

pub use db::DashboardStore;
pub use error::{DashboardError, Operation};
