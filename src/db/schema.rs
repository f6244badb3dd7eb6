//! SQL DDL for the dashboard tables.
//! PostgreSQL 13+ only (`gen_random_uuid()` is built in from 13 on).

/// PostgreSQL schema with:
/// - `gen_random_uuid()` defaults for every surrogate id
/// - `invoices.amount` INT in cents
/// - `invoices.status` constrained to `pending` / `paid`
/// - `users.email` UNIQUE (lookup key)
/// - `revenue.month` UNIQUE (one precomputed row per month)
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS customers (
    id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    image_url VARCHAR(255) NOT NULL
);

CREATE TABLE IF NOT EXISTS invoices (
    id UUID DEFAULT gen_random_uuid() PRIMARY KEY,
    customer_id UUID NOT NULL REFERENCES customers(id),
    amount INT NOT NULL,
    status VARCHAR(255) NOT NULL CHECK (status IN ('pending', 'paid')),
    date DATE NOT NULL
);

CREATE TABLE IF NOT EXISTS revenue (
    month VARCHAR(4) NOT NULL UNIQUE,
    revenue INT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_invoices_date ON invoices(date DESC);
CREATE INDEX IF NOT EXISTS idx_invoices_customer_id ON invoices(customer_id);
"#;

/// Split the bundled DDL into individual statements.
pub fn statements() -> impl Iterator<Item = &'static str> {
    POSTGRES_INIT
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_statement_is_idempotent() {
        let stmts: Vec<_> = statements().collect();
        assert_eq!(stmts.len(), 6);
        assert!(stmts.iter().all(|s| s.contains("IF NOT EXISTS")));
    }

    #[test]
    fn creates_all_dashboard_tables() {
        for table in ["users", "customers", "invoices", "revenue"] {
            let needle = format!("CREATE TABLE IF NOT EXISTS {table} (");
            assert!(POSTGRES_INIT.contains(&needle), "missing {table}");
        }
    }
}
