//! Essay grader HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use essay::analysis::EssayAnalyzer;
use essay::config::Config;
use essay::embedding::{DocumentEmbedder, EmbedderConfig};
use essay::gateway::{HandlerState, create_router_with_state};
use essay::grammar::LanguageToolClient;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        languagetool = %config.languagetool_url,
        "Essay grader starting"
    );

    let grammar = LanguageToolClient::new(&config.languagetool_url, config.grammar_timeout)?;

    let embedder_config = if let Some(path) = &config.model_path {
        EmbedderConfig::new(path.clone())
    } else {
        tracing::warn!("No ESSAY_MODEL_PATH configured, scoring relevance with hashed vectors");
        EmbedderConfig::hashed()
    };
    let embedder = DocumentEmbedder::load(embedder_config)?;
    tracing::info!(
        mode = embedder.mode(),
        dim = embedder.dimension(),
        "Document embedder ready"
    );

    let analyzer = EssayAnalyzer::new(grammar, Arc::new(embedder));
    let app = create_router_with_state(HandlerState::new(analyzer));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Essay grader shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let Ok(config) = Config::from_env() else {
        return 1;
    };
    let url = config.health_check_url();

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
