// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process::ExitCode, sync::Arc};

use gacha_catalog_server::{
    api::router,
    auth::{JwksFetcher, TokenVerifier},
    config::AppConfig,
    state::AppState,
    storage::CatalogDatabase,
    telemetry::init_tracing,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; real environment variables win
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = config.database_path();
    let store = CatalogDatabase::open(&db_path)?;
    tracing::info!(path = %db_path.display(), "Catalog database opened");

    let fetcher = JwksFetcher::with_timeout(&config.auth.jwks_url, config.auth.jwks_timeout)?;
    let verifier = TokenVerifier::new(
        Arc::new(fetcher),
        &config.auth.issuer,
        &config.auth.audience,
    );
    tracing::info!(
        jwks_url = %config.auth.jwks_url,
        issuer = %config.auth.issuer,
        audience = %config.auth.audience,
        "Token verification configured"
    );

    let app = router(AppState::new(store, verifier));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        "Gacha catalog server listening on http://{} (docs at /docs)",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
