use anyhow::Context;
use pdh_config::PdhConfig;
use pdh_server::AppState;
use pdh_storage::StorageClient;
use pdh_storage::client::BucketStatus;

use crate::bootstrap;
use crate::cli::ServeArgs;

pub async fn serve(mut config: PdhConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
        .validate_for_server()
        .context("server configuration is incomplete")?;

    let service = bootstrap::open_service(&config.database).await?;
    let state = AppState::from_config(service, &config)?;
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "Product Discovery Hub API listening");
    axum::serve(listener, pdh_server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}

pub async fn migrate(config: &PdhConfig) -> anyhow::Result<()> {
    let service = bootstrap::open_service(&config.database).await?;
    let missing = service.db().missing_tables().await?;
    if !missing.is_empty() {
        anyhow::bail!("schema incomplete after migration: {}", missing.join(", "));
    }
    println!("schema applied ({} tables)", pdh_db::REQUIRED_TABLES.len());
    Ok(())
}

pub async fn check_db(config: &PdhConfig) -> anyhow::Result<()> {
    let service = bootstrap::open_service(&config.database).await?;
    let missing = service.db().missing_tables().await?;
    for table in pdh_db::REQUIRED_TABLES {
        let mark = if missing.contains(&table) { "missing" } else { "ok" };
        println!("{table:<26} {mark}");
    }
    if !missing.is_empty() {
        anyhow::bail!("{} required table(s) missing", missing.len());
    }
    Ok(())
}

pub async fn ensure_bucket(config: &PdhConfig) -> anyhow::Result<()> {
    let client = StorageClient::from_config(&config.storage)?;
    let status = client
        .ensure_bucket()
        .await
        .with_context(|| format!("failed to provision bucket '{}'", client.bucket()))?;
    match status {
        BucketStatus::Existing => println!("bucket '{}' already exists", client.bucket()),
        BucketStatus::Created => println!("bucket '{}' created", client.bucket()),
    }
    Ok(())
}
