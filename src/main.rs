mod config;
mod dashboard;
mod db;
mod forms;
mod models;
mod responses;
mod routes;
mod services;
mod state;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use http::{header::HeaderValue, Method};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use config::Config;
use db::postgres_user_repository::PostgresUserRepository;
use services::lead_sink::LeadSink;
use services::postgres_lead_sink::PostgresLeadSink;
use services::webhook_lead_sink::WebhookLeadSink;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cfg = Config::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let pool = establish_connection(&cfg.database_url).await?;

    let leads: Arc<dyn LeadSink> = match &cfg.lead_webhook_url {
        Some(url) => {
            info!("Forwarding leads to {}", url);
            Arc::new(WebhookLeadSink::new(url.clone(), cfg.lead_webhook_timeout)?)
        }
        None => Arc::new(PostgresLeadSink { pool: pool.clone() }),
    };

    let state = AppState {
        db: Arc::new(PostgresUserRepository { pool }),
        leads,
    };

    let cors = CorsLayer::new()
        .allow_origin([HeaderValue::from_str(&cfg.frontend_origin)?])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    info!("Listening on http://{}", cfg.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn establish_connection(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(database_url)
        .await
        .context("Failed to connect to the database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    info!("✅ Successfully connected to the database");
    Ok(pool)
}
