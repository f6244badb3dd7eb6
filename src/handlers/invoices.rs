use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::db::{InvoiceForm, InvoiceUpdate, InvoicesTable, NewInvoice};
use crate::handlers::SearchParams;
use crate::{DashboardError, router::DashboardState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCount {
    pub total_pages: i64,
}

pub async fn list(
    State(state): State<DashboardState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<InvoicesTable>>, DashboardError> {
    let page = params.page.unwrap_or(1);
    Ok(Json(
        state
            .store
            .fetch_filtered_invoices(&params.query, page)
            .await?,
    ))
}

pub async fn pages(
    State(state): State<DashboardState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<PageCount>, DashboardError> {
    let total_pages = state.store.fetch_invoices_pages(&params.query).await?;
    Ok(Json(PageCount { total_pages }))
}

pub async fn show(
    State(state): State<DashboardState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceForm>, DashboardError> {
    state
        .store
        .fetch_invoice_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| DashboardError::NotFound(format!("invoice {id}")))
}

pub async fn create(
    State(state): State<DashboardState>,
    Json(invoice): Json<NewInvoice>,
) -> Result<StatusCode, DashboardError> {
    state.store.insert_invoice(&invoice).await?;
    info!(customer_id = %invoice.customer_id, amount = invoice.amount_in_cents, "invoice created");
    Ok(StatusCode::CREATED)
}

pub async fn update(
    State(state): State<DashboardState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<InvoiceUpdate>,
) -> Result<StatusCode, DashboardError> {
    state.store.update_invoice(id, &changes).await?;
    info!(%id, "invoice updated");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn destroy(
    State(state): State<DashboardState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, DashboardError> {
    state.store.delete_invoice(id).await?;
    info!(%id, "invoice deleted");
    Ok(StatusCode::NO_CONTENT)
}
