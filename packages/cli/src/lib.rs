// ABOUTME: Server bootstrap for the Pulse functions: config, logging, state and router
// ABOUTME: The `pulse` binary is a thin clap wrapper around `run_server`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pulse_ai::{GatewayClient, GatewayConfig};
use pulse_api::mailer::{MailerConfig, ResendMailer, DEFAULT_MAILER_TIMEOUT};
use pulse_api::AppState;
use pulse_config::{DEFAULT_LOG_FILTER, RUST_LOG};

pub mod api;
pub mod config;
pub mod middleware;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};

/// Install the global subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(RUST_LOG)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// Build the shared handler state from configuration
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let gateway_config = GatewayConfig::new(&config.gateway_url, config.gateway_api_key.clone())
        .with_timeout(config.gateway_timeout);
    let gateway = GatewayClient::new(gateway_config).context("Failed to build gateway client")?;

    let mailer = ResendMailer::new(MailerConfig {
        base_url: config.email_api_url.clone(),
        api_key: config.email_api_key.clone(),
        from: config.email_from.clone(),
        notify: config.access_request_notify.clone(),
        timeout: DEFAULT_MAILER_TIMEOUT,
    })
    .context("Failed to build email client")?;

    if config.access_code.is_none() {
        warn!("ACCESS_CODE not set - access code validation will answer 500");
    }

    Ok(AppState::new(Arc::new(gateway), &config.gateway_model)
        .with_access_code(config.access_code.clone())
        .with_mailer(Arc::new(mailer)))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    let app = api::create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    info!(
        "Serving functions on http://{}{} with model {}",
        addr,
        api::FUNCTIONS_PREFIX,
        config.gateway_model
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
