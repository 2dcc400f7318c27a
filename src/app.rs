/*
 * Responsibility
 * - Config 読み込み → AuthGate 生成 → Router 組み立て
 * - HTTP layer (request id / trace / limit / timeout) の適用
 * - axum::serve() で起動
 */
use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware::http::{self, HttpLimits};
use crate::services::auth::build_auth_gate;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().inspect_err(|err| {
        tracing::error!(error = %err, "failed to load configuration");
    })?;

    let gate = build_auth_gate(&config).inspect_err(|err| {
        tracing::error!(error = %err, "refusing to start without a usable auth gate");
    })?;

    if gate.is_bypass() {
        tracing::warn!("AUTH_BYPASS is enabled: requests are not authenticated");
    }

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let app = build_router(AppState::new(gate), config.http_limits());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState, limits: HttpLimits) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api::v1::routes(state.gate.clone()))
        .with_state(state);

    http::apply(router, limits)
}
