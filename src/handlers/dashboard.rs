use axum::{Json, extract::State};

use crate::db::{CardData, LatestInvoice, Revenue};
use crate::{DashboardError, router::DashboardState};

pub async fn revenue(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<Revenue>>, DashboardError> {
    Ok(Json(state.store.fetch_revenue().await?))
}

pub async fn latest_invoices(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<LatestInvoice>>, DashboardError> {
    Ok(Json(state.store.fetch_latest_invoices().await?))
}

pub async fn cards(State(state): State<DashboardState>) -> Result<Json<CardData>, DashboardError> {
    Ok(Json(state.store.fetch_card_data().await?))
}
