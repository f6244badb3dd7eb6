use crate::config::Config;
use crate::db::models::{
    CardData, CustomerField, FormattedCustomersTable, InvoiceForm, InvoiceStatus, InvoiceUpdate,
    InvoicesTable, LatestInvoice, NewInvoice, Revenue, User,
};
use crate::db::{schema, seed};
use crate::error::{DashboardError, Operation};
use crate::format::{cents_to_dollars, format_currency};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Fixed page size of the invoices table.
pub const ITEMS_PER_PAGE: i64 = 6;

/// Row offset for a 1-based page. Pages below 1 are not rejected here; the
/// store refuses the negative offset. Saturates instead of overflowing.
pub fn page_offset(page: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE)
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Number of pages needed to show `count` matching rows.
pub fn total_pages(count: i64) -> i64 {
    (count + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE
}

/// Case-insensitive substring pattern for `ILIKE`.
pub fn search_pattern(query: &str) -> String {
    format!("%{query}%")
}

fn fail(op: Operation) -> impl FnOnce(sqlx::Error) -> DashboardError {
    move |e| DashboardError::database(op, e)
}

#[derive(Clone)]
pub struct DashboardStore {
    pool: PgPool,
    revenue_delay: Duration,
}

impl DashboardStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            revenue_delay: Duration::ZERO,
        }
    }

    /// Simulated latency applied before every revenue read.
    pub fn with_revenue_delay(mut self, delay: Duration) -> Self {
        self.revenue_delay = delay;
        self
    }

    /// Build the shared pool from configuration.
    pub async fn connect(cfg: &Config) -> Result<Self, DashboardError> {
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(cfg.acquire_timeout())
            .connect_with(cfg.connect_options()?)
            .await?;
        Ok(Self::new(pool).with_revenue_delay(cfg.revenue_delay()))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check out one connection for `op`. It returns to the pool when dropped.
    async fn acquire(&self, op: Operation) -> Result<PoolConnection<Postgres>, DashboardError> {
        self.pool.acquire().await.map_err(fail(op))
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), DashboardError> {
        for stmt in schema::statements() {
            sqlx::query(stmt).execute(&self.pool).await?;
        }
        info!("dashboard schema ready");
        Ok(())
    }

    /// Insert placeholder rows in one transaction. Existing rows are left alone.
    pub async fn seed(&self) -> Result<(), DashboardError> {
        let mut tx = self.pool.begin().await?;

        for user in seed::USERS {
            sqlx::query(
                "INSERT INTO users (id, email, password) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            )
            .bind(user.id)
            .bind(user.email)
            .bind(user.password)
            .execute(&mut *tx)
            .await?;
        }

        for customer in seed::CUSTOMERS {
            sqlx::query(
                r#"INSERT INTO customers (id, name, email, image_url)
                   VALUES ($1, $2, $3, $4)
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(customer.id)
            .bind(customer.name)
            .bind(customer.email)
            .bind(customer.image_url)
            .execute(&mut *tx)
            .await?;
        }

        for invoice in seed::INVOICES {
            let Some(date) = invoice.date() else {
                warn!(id = %invoice.id, date = ?invoice.date, "skipping seed invoice with invalid date");
                continue;
            };
            sqlx::query(
                r#"INSERT INTO invoices (id, customer_id, amount, status, date)
                   VALUES ($1, $2, $3, $4, $5)
                   ON CONFLICT DO NOTHING"#,
            )
            .bind(invoice.id)
            .bind(invoice.customer_id())
            .bind(invoice.amount)
            .bind(invoice.status.as_str())
            .bind(date)
            .execute(&mut *tx)
            .await?;
        }

        for (month, revenue) in seed::REVENUE {
            sqlx::query("INSERT INTO revenue (month, revenue) VALUES ($1, $2) ON CONFLICT DO NOTHING")
                .bind(*month)
                .bind(*revenue)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(
            users = seed::USERS.len(),
            customers = seed::CUSTOMERS.len(),
            invoices = seed::INVOICES.len(),
            revenue = seed::REVENUE.len(),
            "seeded placeholder data"
        );
        Ok(())
    }

    pub async fn insert_invoice(&self, invoice: &NewInvoice) -> Result<(), DashboardError> {
        let op = Operation::InsertInvoice;
        let mut conn = self.acquire(op).await?;
        sqlx::query(
            "INSERT INTO invoices (customer_id, amount, status, date) VALUES ($1, $2, $3, $4)",
        )
        .bind(invoice.customer_id)
        .bind(invoice.amount_in_cents)
        .bind(invoice.status.as_str())
        .bind(invoice.date)
        .execute(&mut *conn)
        .await
        .map_err(fail(op))?;
        Ok(())
    }

    pub async fn update_invoice(
        &self,
        id: Uuid,
        changes: &InvoiceUpdate,
    ) -> Result<(), DashboardError> {
        let op = Operation::UpdateInvoice;
        let mut conn = self.acquire(op).await?;
        sqlx::query(
            r#"UPDATE invoices SET
                customer_id = $1,
                amount = $2,
                status = $3
              WHERE id = $4"#,
        )
        .bind(changes.customer_id)
        .bind(changes.amount_in_cents)
        .bind(changes.status.as_str())
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(fail(op))?;
        Ok(())
    }

    pub async fn delete_invoice(&self, id: Uuid) -> Result<(), DashboardError> {
        let op = Operation::DeleteInvoice;
        let mut conn = self.acquire(op).await?;
        sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(fail(op))?;
        Ok(())
    }

    /// Monthly revenue in store order, after the configured artificial delay.
    pub async fn fetch_revenue(&self) -> Result<Vec<Revenue>, DashboardError> {
        let op = Operation::FetchRevenue;
        let started = Instant::now();
        if !self.revenue_delay.is_zero() {
            debug!(delay_ms = millis(self.revenue_delay), "Fetching revenue data...");
            tokio::time::sleep(self.revenue_delay).await;
        }

        let mut conn = self.acquire(op).await?;
        let rows = sqlx::query_as::<_, Revenue>("SELECT month, revenue FROM revenue")
            .fetch_all(&mut *conn)
            .await
            .map_err(fail(op))?;

        debug!(
            elapsed_ms = millis(started.elapsed()),
            rows = rows.len(),
            "revenue fetch completed"
        );
        Ok(rows)
    }

    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, DashboardError> {
        let op = Operation::FetchLatestInvoices;
        let mut conn = self.acquire(op).await?;
        let rows = sqlx::query(
            r#"SELECT invoices.amount, customers.name, customers.image_url, customers.email, invoices.id
               FROM invoices
               JOIN customers ON invoices.customer_id = customers.id
               ORDER BY invoices.date DESC
               LIMIT 5"#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(fail(op))?;

        rows.into_iter()
            .map(Self::row_to_latest)
            .collect::<Result<_, _>>()
            .map_err(fail(op))
    }

    /// Counts and paid/pending totals, read by three concurrent statements.
    pub async fn fetch_card_data(&self) -> Result<CardData, DashboardError> {
        let op = Operation::FetchCardData;

        // Each statement checks out its own connection.
        let invoice_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM invoices").fetch_one(&self.pool);
        let customer_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers").fetch_one(&self.pool);
        let invoice_status = sqlx::query_as::<_, (Option<i64>, Option<i64>)>(
            r#"SELECT
                 SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END) AS paid,
                 SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END) AS pending
               FROM invoices"#,
        )
        .fetch_one(&self.pool);

        let (number_of_invoices, number_of_customers, (paid, pending)) =
            tokio::try_join!(invoice_count, customer_count, invoice_status).map_err(fail(op))?;

        Ok(CardData {
            number_of_invoices,
            number_of_customers,
            total_paid_invoices: format_currency(paid.unwrap_or(0)),
            total_pending_invoices: format_currency(pending.unwrap_or(0)),
        })
    }

    /// One page of invoices matching `query` on name, email, amount, date or status.
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: i64,
    ) -> Result<Vec<InvoicesTable>, DashboardError> {
        let op = Operation::FetchFilteredInvoices;
        let mut conn = self.acquire(op).await?;
        let rows = sqlx::query(
            r#"SELECT
                 invoices.id,
                 invoices.customer_id,
                 invoices.amount,
                 invoices.date,
                 invoices.status,
                 customers.name,
                 customers.email,
                 customers.image_url
               FROM invoices
               JOIN customers ON invoices.customer_id = customers.id
               WHERE
                 customers.name ILIKE $1 OR
                 customers.email ILIKE $1 OR
                 invoices.amount::text ILIKE $1 OR
                 invoices.date::text ILIKE $1 OR
                 invoices.status ILIKE $1
               ORDER BY invoices.date DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(search_pattern(query))
        .bind(ITEMS_PER_PAGE)
        .bind(page_offset(current_page))
        .fetch_all(&mut *conn)
        .await
        .map_err(fail(op))?;

        rows.into_iter()
            .map(Self::row_to_invoices_table)
            .collect::<Result<_, _>>()
            .map_err(fail(op))
    }

    pub async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, DashboardError> {
        let op = Operation::FetchInvoicesPages;
        let mut conn = self.acquire(op).await?;
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*)
               FROM invoices
               JOIN customers ON invoices.customer_id = customers.id
               WHERE
                 customers.name ILIKE $1 OR
                 customers.email ILIKE $1 OR
                 invoices.amount::text ILIKE $1 OR
                 invoices.date::text ILIKE $1 OR
                 invoices.status ILIKE $1"#,
        )
        .bind(search_pattern(query))
        .fetch_one(&mut *conn)
        .await
        .map_err(fail(op))?;

        Ok(total_pages(count))
    }

    pub async fn fetch_invoice_by_id(&self, id: Uuid) -> Result<Option<InvoiceForm>, DashboardError> {
        let op = Operation::FetchInvoiceById;
        let mut conn = self.acquire(op).await?;
        let row = sqlx::query(
            r#"SELECT invoices.id, invoices.customer_id, invoices.amount, invoices.status
               FROM invoices
               WHERE invoices.id = $1"#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(fail(op))?;

        row.map(Self::row_to_form).transpose().map_err(fail(op))
    }

    pub async fn fetch_customers(&self) -> Result<Vec<CustomerField>, DashboardError> {
        let op = Operation::FetchCustomers;
        let mut conn = self.acquire(op).await?;
        sqlx::query_as::<_, CustomerField>("SELECT id, name FROM customers ORDER BY name ASC")
            .fetch_all(&mut *conn)
            .await
            .map_err(fail(op))
    }

    /// Customers matching `query` on name or email, with invoice totals.
    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
    ) -> Result<Vec<FormattedCustomersTable>, DashboardError> {
        let op = Operation::FetchFilteredCustomers;
        let mut conn = self.acquire(op).await?;
        let rows = sqlx::query(
            r#"SELECT
                 customers.id,
                 customers.name,
                 customers.email,
                 customers.image_url,
                 COUNT(invoices.id) AS total_invoices,
                 SUM(CASE WHEN invoices.status = 'pending' THEN invoices.amount ELSE 0 END) AS total_pending,
                 SUM(CASE WHEN invoices.status = 'paid' THEN invoices.amount ELSE 0 END) AS total_paid
               FROM customers
               LEFT JOIN invoices ON customers.id = invoices.customer_id
               WHERE
                 customers.name ILIKE $1 OR
                 customers.email ILIKE $1
               GROUP BY customers.id, customers.name, customers.email, customers.image_url
               ORDER BY customers.name ASC"#,
        )
        .bind(search_pattern(query))
        .fetch_all(&mut *conn)
        .await
        .map_err(fail(op))?;

        rows.into_iter()
            .map(Self::row_to_customers_table)
            .collect::<Result<_, _>>()
            .map_err(fail(op))
    }

    pub async fn get_user(&self, email: &str) -> Result<Option<User>, DashboardError> {
        let op = Operation::GetUser;
        let mut conn = self.acquire(op).await?;
        sqlx::query_as::<_, User>("SELECT id, email, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
            .map_err(fail(op))
    }

    fn status_of(row: &PgRow) -> Result<InvoiceStatus, sqlx::Error> {
        let raw: String = row.try_get("status")?;
        raw.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }

    fn row_to_latest(row: PgRow) -> Result<LatestInvoice, sqlx::Error> {
        let amount: i32 = row.try_get("amount")?;
        Ok(LatestInvoice {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            image_url: row.try_get("image_url")?,
            email: row.try_get("email")?,
            amount: format_currency(i64::from(amount)),
        })
    }

    fn row_to_invoices_table(row: PgRow) -> Result<InvoicesTable, sqlx::Error> {
        Ok(InvoicesTable {
            status: Self::status_of(&row)?,
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            image_url: row.try_get("image_url")?,
            date: row.try_get("date")?,
            amount: row.try_get("amount")?,
        })
    }

    fn row_to_form(row: PgRow) -> Result<InvoiceForm, sqlx::Error> {
        let amount: i32 = row.try_get("amount")?;
        Ok(InvoiceForm {
            status: Self::status_of(&row)?,
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            amount: cents_to_dollars(amount),
        })
    }

    fn row_to_customers_table(row: PgRow) -> Result<FormattedCustomersTable, sqlx::Error> {
        let total_pending: Option<i64> = row.try_get("total_pending")?;
        let total_paid: Option<i64> = row.try_get("total_paid")?;
        Ok(FormattedCustomersTable {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            image_url: row.try_get("image_url")?,
            total_invoices: row.try_get("total_invoices")?,
            total_pending: format_currency(total_pending.unwrap_or(0)),
            total_paid: format_currency(total_paid.unwrap_or(0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), 6);
        assert_eq!(page_offset(5), 24);
    }

    #[test]
    fn page_zero_is_passed_through_as_negative_offset() {
        assert_eq!(page_offset(0), -6);
    }

    #[test]
    fn extreme_pages_saturate_instead_of_overflowing() {
        assert_eq!(page_offset(i64::MAX), i64::MAX);
        assert_eq!(page_offset(i64::MIN), i64::MIN);
        assert!(page_offset(-1) < 0);
    }

    #[test]
    fn millis_clamps_to_u64() {
        assert_eq!(millis(Duration::from_millis(3000)), 3000);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn page_count_is_ceiling_of_matches_over_six() {
        let cases = [(0, 0), (1, 1), (6, 1), (7, 2), (12, 2), (13, 3)];
        for (matches, pages) in cases {
            assert_eq!(total_pages(matches), pages, "matches = {matches}");
        }
    }

    #[test]
    fn last_page_always_fits_in_page_count() {
        for matches in 0..40 {
            let pages = total_pages(matches);
            let on_last_page = if pages == 0 {
                0
            } else {
                matches - page_offset(pages)
            };
            assert!(pages * ITEMS_PER_PAGE >= on_last_page);
            assert!(on_last_page <= ITEMS_PER_PAGE);
        }
    }

    #[test]
    fn search_pattern_wraps_query() {
        assert_eq!(search_pattern(""), "%%");
        assert_eq!(search_pattern("PAID"), "%PAID%");
    }
}
