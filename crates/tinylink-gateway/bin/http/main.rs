mod cli;

use crate::cli::{LogFormat, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tinylink_core::Repository;
use tinylink_gateway::{App, AppState};
use tinylink_generator::{RandomGenerator, RandomGeneratorSettings};
use tinylink_redirector::RedirectorService;
use tinylink_shortener::{ShortenerService, ShortenerSettings};
use tinylink_storage::{InMemoryRepository, SqliteRepository};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting gateway"
    );

    let generator = RandomGenerator::new(
        RandomGeneratorSettings::builder()
            .length(config.code_length)
            .build(),
    )
    .context("invalid code generator settings")?;

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(&config, InMemoryRepository::new(), generator).await?;
        }
        StorageBackendArg::Sqlite => {
            let sqlite_url = config
                .sqlite_url
                .as_deref()
                .context("sqlite url is required when storage backend is sqlite")?;
            let repository = SqliteRepository::connect(sqlite_url)
                .await
                .with_context(|| format!("failed to open sqlite database at {sqlite_url}"))?;
            repository
                .migrate()
                .await
                .context("failed to apply sqlite schema")?;
            run_server(&config, repository, generator).await?;
        }
    }

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run_server<R: Repository>(
    config: &CLI,
    repository: R,
    generator: RandomGenerator,
) -> anyhow::Result<()> {
    let repository = Arc::new(repository);
    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .build();

    let shortener = ShortenerService::with_settings(Arc::clone(&repository), generator, settings);
    let redirector = RedirectorService::new(repository);
    let state = AppState::new(
        Arc::new(shortener),
        Arc::new(redirector),
        config.base_url.clone(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
