use axum::{
    Json,
    extract::{Query, State},
};

use crate::db::{CustomerField, FormattedCustomersTable};
use crate::handlers::SearchParams;
use crate::{DashboardError, router::DashboardState};

/// All customers (id, name) for the invoice form's select box.
pub async fn list(
    State(state): State<DashboardState>,
) -> Result<Json<Vec<CustomerField>>, DashboardError> {
    Ok(Json(state.store.fetch_customers().await?))
}

pub async fn table(
    State(state): State<DashboardState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<FormattedCustomersTable>>, DashboardError> {
    Ok(Json(
        state.store.fetch_filtered_customers(&params.query).await?,
    ))
}
