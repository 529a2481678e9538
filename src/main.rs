//! ChannelCast Server — real-time channel broadcast service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use chancast_api::AppState;
use chancast_core::config::AppConfig;
use chancast_core::error::AppError;
use chancast_core::traits::auth::AuthContext;
use chancast_core::traits::notify::{PushNotifier, WebhookNotifier};
use chancast_core::traits::storage::{MessageStore, ScheduledStore, StatsStore};
use chancast_core::types::privilege::{Privilege, PrivilegeSet};
use chancast_realtime::BroadcastEngine;
use chancast_store::{
    LogPushNotifier, LogWebhookNotifier, MemoryMessageStore, MemoryScheduledStore,
    MemoryStatsStore, StaticSessionResolver,
};
use chancast_worker::{ScheduledPromoter, StatsLogger, WorkerScheduler};

#[tokio::main]
async fn main() {
    let env = std::env::var("CHANCAST_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ChannelCast v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(config);
    let persist_timeout = std::time::Duration::from_secs(config.worker.persist_timeout_seconds);

    // ── Step 1: Collaborators ────────────────────────────────────
    let messages: Arc<dyn MessageStore> = Arc::new(MemoryMessageStore::new());
    let scheduled: Arc<dyn ScheduledStore> = Arc::new(MemoryScheduledStore::new());
    let stats: Arc<dyn StatsStore> = Arc::new(MemoryStatsStore::new());
    let webhook: Arc<dyn WebhookNotifier> = Arc::new(LogWebhookNotifier::new());
    let push: Arc<dyn PushNotifier> = Arc::new(LogPushNotifier::new());
    let sessions = Arc::new(build_session_resolver(&config));

    // ── Step 2: Broadcast engine ─────────────────────────────────
    let engine = Arc::new(BroadcastEngine::new(&config.realtime, Arc::clone(&stats)));
    engine.hydrate().await;

    // ── Step 3: Background worker ────────────────────────────────
    let promoter = Arc::new(ScheduledPromoter::new(
        Arc::clone(&messages),
        Arc::clone(&scheduled),
        Arc::clone(engine.router()),
        Arc::clone(&webhook),
        Arc::clone(&push),
        persist_timeout,
    ));
    let stats_logger = Arc::new(StatsLogger::new(
        Arc::clone(engine.hub()),
        Arc::clone(&stats),
        persist_timeout,
    ));

    let mut worker = WorkerScheduler::new(config.worker.clone(), promoter, stats_logger).await?;
    if config.worker.enabled {
        worker.register_default_tasks().await?;
        worker.start().await?;
    }

    // ── Step 4: HTTP server ──────────────────────────────────────
    let state = AppState {
        config: Arc::clone(&config),
        engine: Arc::clone(&engine),
        messages,
        scheduled,
        stats,
        webhook,
        push,
        sessions,
    };
    let app = chancast_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Graceful shutdown ────────────────────────────────
    worker.shutdown().await?;
    engine.shutdown();

    tracing::info!("ChannelCast stopped");
    Ok(())
}

/// Build the static session resolver from the configured tokens.
fn build_session_resolver(config: &AppConfig) -> StaticSessionResolver {
    let mut resolver = StaticSessionResolver::new();

    if let Some(token) = &config.auth.writer_token {
        resolver = resolver.with_token(
            token.clone(),
            AuthContext {
                user_id: "writer".to_string(),
                name: "Writer".to_string(),
                privileges: PrivilegeSet::reader().with(Privilege::Writer),
            },
        );
    }

    if let Some(token) = &config.auth.admin_token {
        resolver = resolver.with_token(
            token.clone(),
            AuthContext {
                user_id: "admin".to_string(),
                name: "Admin".to_string(),
                privileges: PrivilegeSet::reader()
                    .with(Privilege::Writer)
                    .with(Privilege::Moderator)
                    .with(Privilege::Admin),
            },
        );
    }

    resolver
}

/// Resolves when SIGINT (or ctrl-c) is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
