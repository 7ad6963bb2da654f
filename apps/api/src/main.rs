mod chat;
mod config;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::advisor::LlmAdvisor;
use crate::chat::controller::ChatService;
use crate::chat::criteria::LlmCriteriaExtractor;
use crate::chat::intent::LlmIntentClassifier;
use crate::config::{Config, SessionBackend};
use crate::jobs::fixture::FixtureJobRepository;
use crate::llm_client::{ChatModel, LlmClient};
use crate::routes::build_router;
use crate::session::{InMemorySessionStore, RedisSessionStore, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize session store
    let sessions: Arc<dyn SessionStore> = match &config.session_backend {
        SessionBackend::Memory => {
            let store = Arc::new(InMemorySessionStore::new(config.session_ttl));
            spawn_session_sweeper(store.clone(), config.session_sweep_interval);
            info!(
                "In-memory session store initialized (ttl: {}s)",
                config.session_ttl.as_secs()
            );
            store
        }
        SessionBackend::Redis { url } => {
            Arc::new(RedisSessionStore::connect(url, config.session_ttl).await?)
        }
    };

    // Initialize LLM client
    let mut client = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.llm_timeout,
        config.llm_max_attempts,
    )?;
    if let Some(base_url) = &config.llm_base_url {
        info!("LLM endpoint overridden: {base_url}");
        client = client.with_base_url(base_url.clone());
    }
    let llm: Arc<dyn ChatModel> = Arc::new(client);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let jobs = Arc::new(FixtureJobRepository::sample());
    info!("Job fixture loaded ({} postings)", jobs.len());

    let chat = ChatService::new(
        sessions,
        Arc::new(LlmIntentClassifier::new(llm.clone())),
        Arc::new(LlmCriteriaExtractor::new(llm.clone())),
        Arc::new(LlmAdvisor::new(llm)),
        jobs,
    );

    let state = AppState {
        chat: Arc::new(chat),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drops idle in-memory sessions.
fn spawn_session_sweeper(store: Arc<dyn SessionStore>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every.max(Duration::from_secs(1)));
        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => info!(removed, "expired sessions purged"),
                Err(e) => warn!("session sweep failed: {e}"),
            }
        }
    });
}
