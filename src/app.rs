/*
 * Responsibility
 * - Config読み込み → 依存生成 (pool / migrate / blacklist / token) → Router 組み立て
 * - 外側の middleware (security headers / CORS / http) の適用
 * - axum::serve() で起動, Ctrl-C で graceful shutdown
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::root::{not_found, welcome};
use crate::config::Config;
use crate::middleware::{self, PipelineError};
use crate::repos::{accommodation_repo::PgAccommodationRepo, user_repo::PgUserRepo};
use crate::services::{
    auth::TokenService, blacklist::CacheBlacklistStore, mailer::LogMailer,
};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,barefoot_nomad=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr は起動方法によっては見えないので tracing にも流す
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config).context("invalid route table")?;

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to postgres")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("run migrations")?;

    let blacklist = CacheBlacklistStore::connect(&config.redis_url)
        .await
        .context("connect to blacklist store")?;

    let tokens = TokenService::new(
        config.jwt_secret.as_bytes(),
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_ttl_seconds,
        config.verify_token_ttl_seconds,
        config.access_token_leeway_seconds,
    );

    Ok(AppState {
        users: Arc::new(PgUserRepo::new(pool.clone())),
        accommodations: Arc::new(PgAccommodationRepo::new(pool)),
        tokens: Arc::new(tokens),
        blacklist: Arc::new(blacklist),
        mailer: Arc::new(LogMailer),
        public_base_url: config.public_base_url.clone(),
    })
}

/// Routes and fallback, without the outer middleware stack.
pub(crate) fn api_router(state: AppState) -> Result<Router, PipelineError> {
    Ok(Router::new()
        .route("/", get(welcome))
        .nest("/api/v1", api::v1::routes(&state)?)
        .fallback(not_found)
        .with_state(state))
}

fn build_router(state: AppState, config: &Config) -> Result<Router, PipelineError> {
    let router = api_router(state)?;
    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    Ok(middleware::http::apply(router, config))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
