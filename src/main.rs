use acme_dashboard::config::Config;
use acme_dashboard::db::DashboardStore;
use acme_dashboard::router::{DashboardState, dashboard_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        db_host = %cfg.db_host,
        db_port = cfg.db_port,
        db_name = %cfg.db_name,
        database_url = cfg.database_url.is_some(),
        max_connections = cfg.max_connections,
        revenue_delay_ms = cfg.revenue_delay_ms,
        loglevel = %cfg.loglevel,
        "starting dashboard data service"
    );

    let store = DashboardStore::connect(&cfg).await?;

    if cfg.init_schema {
        store.init_schema().await?;
    }
    if cfg.seed {
        store.seed().await?;
    }

    let state = DashboardState::new(store.clone());
    let app = dashboard_router(state);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.pool().close().await;
    info!("connection pool closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
