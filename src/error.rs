use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

/// Every data operation the store exposes, used to label its failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    InsertInvoice,
    UpdateInvoice,
    DeleteInvoice,
    FetchRevenue,
    FetchLatestInvoices,
    FetchCardData,
    FetchFilteredInvoices,
    FetchInvoicesPages,
    FetchInvoiceById,
    FetchCustomers,
    FetchFilteredCustomers,
    GetUser,
}

impl Operation {
    /// Caller-facing message; the underlying cause only reaches the logs.
    pub fn failure_label(self) -> &'static str {
        match self {
            Operation::InsertInvoice => "Failed to insert the invoice",
            Operation::UpdateInvoice => "Failed to edit the invoice",
            Operation::DeleteInvoice => "Failed to delete the invoice",
            Operation::FetchRevenue => "Failed to fetch revenue data",
            Operation::FetchLatestInvoices => "Failed to fetch the latest invoices",
            Operation::FetchCardData => "Failed to fetch card data",
            Operation::FetchFilteredInvoices => "Failed to fetch invoices",
            Operation::FetchInvoicesPages => "Failed to fetch total number of invoices",
            Operation::FetchInvoiceById => "Failed to fetch invoice",
            Operation::FetchCustomers => "Failed to fetch all customers",
            Operation::FetchFilteredCustomers => "Failed to fetch customer table",
            Operation::GetUser => "Failed to fetch user",
        }
    }
}

#[derive(Debug, ThisError)]
pub enum DashboardError {
    #[error("{}", .0.failure_label())]
    Database(Operation),

    #[error("Database setup error: {0}")]
    Setup(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl DashboardError {
    /// Log `cause` and replace it with the labeled failure for `op`.
    pub(crate) fn database(op: Operation, cause: SqlxError) -> Self {
        tracing::error!(
            operation = op.failure_label(),
            error = %cause,
            "Database Error"
        );
        DashboardError::Database(op)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            DashboardError::Database(op) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "DATABASE_ERROR".to_string(),
                    message: op.failure_label().to_string(),
                },
            ),
            DashboardError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: what,
                },
            ),
            DashboardError::Setup(_) | DashboardError::Config(_) | DashboardError::Io(_) => {
                tracing::error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                )
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_error_displays_only_the_label() {
        let err = DashboardError::database(Operation::FetchCardData, SqlxError::PoolTimedOut);
        assert_eq!(err.to_string(), "Failed to fetch card data");
        assert!(matches!(err, DashboardError::Database(Operation::FetchCardData)));
    }

    #[test]
    fn labeled_failure_maps_to_500() {
        let resp = DashboardError::Database(Operation::DeleteInvoice).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = DashboardError::NotFound("invoice".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
