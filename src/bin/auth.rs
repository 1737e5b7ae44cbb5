use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use squadgate::logging::init_tracing;
use squadgate::metrics::init_metrics;
use squadgate::router::init_auth_service_router;
use squadgate::squadgate_auth::{StaticIdentityStore, TokenService};
use squadgate::squadgate_config::AuthServiceConfig;
use squadgate::state::AuthServiceState;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = init_tracing("squadgate-auth") {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!(error = %format!("{:#}", e), "authentication service stopped");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config =
        AuthServiceConfig::from_env().context("Invalid authentication service configuration")?;

    let store = StaticIdentityStore::load(&config.users_file).await?;
    if store.is_empty() {
        warn!(file = %config.users_file.display(), "identity file has no accounts");
    }

    let state = AuthServiceState {
        tokens: Arc::new(TokenService::new(&config.jwt)),
        store: Arc::new(store),
        metrics: init_metrics()?,
    };

    let app = init_auth_service_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "authentication service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await
        .context("Server error")?;

    Ok(())
}
