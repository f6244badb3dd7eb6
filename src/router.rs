use axum::{Router, routing::get};

use crate::db::DashboardStore;
use crate::handlers::{customers, dashboard, invoices};

#[derive(Clone)]
pub struct DashboardState {
    pub store: DashboardStore,
}

impl DashboardState {
    pub fn new(store: DashboardStore) -> Self {
        Self { store }
    }
}

pub fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/api/revenue", get(dashboard::revenue))
        .route("/api/cards", get(dashboard::cards))
        .route("/api/invoices", get(invoices::list).post(invoices::create))
        .route("/api/invoices/latest", get(dashboard::latest_invoices))
        .route("/api/invoices/pages", get(invoices::pages))
        .route(
            "/api/invoices/{id}",
            get(invoices::show)
                .put(invoices::update)
                .delete(invoices::destroy),
        )
        .route("/api/customers", get(customers::list))
        .route("/api/customers/table", get(customers::table))
        .with_state(state)
}
