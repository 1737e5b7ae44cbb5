use anyhow::Context;
use dotenvy::dotenv;
use squadgate::logging::init_tracing;
use squadgate::metrics::init_metrics;
use squadgate::router::init_router;
use squadgate::squadgate_config::GatewayConfig;
use squadgate::state::AppState;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();

    if let Err(e) = init_tracing("squadgate") {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!(error = %format!("{:#}", e), "gateway stopped");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // Configuration problems end startup before the listener binds
    let config = GatewayConfig::from_env().context("Invalid gateway configuration")?;

    let metrics = init_metrics()?;
    let state = AppState::new(&config, metrics)?;

    for rule in state.routes.rules() {
        info!(
            prefix = %rule.prefix,
            role = %rule.required_role.map(|r| r.as_str()).unwrap_or("public"),
            upstream = %config.upstreams.url_for(rule.upstream),
            "route registered"
        );
    }

    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!(addr = %config.listen_addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("gateway shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
