use anyhow::Result;
use quizvoxd::app::generation::forward_requests;
use quizvoxd::config::load_config;
use quizvoxd::{CommandRateLimiter, DaemonServer, DaemonState, GenerationDispatcher};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::INFO)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into()))
        .init();

    info!("quizvox daemon (quizvoxd) starting...");

    let config = load_config()?;
    let socket_path = config.server.socket_path();
    let limiter = CommandRateLimiter::from_config(&config.rate_limit)?;
    let operation_timeout = Duration::from_secs(config.timeouts.socket_operation_timeout_seconds);

    let (dispatcher, requests) = GenerationDispatcher::channel();
    tokio::spawn(forward_requests(requests));

    let daemon_state = DaemonState::new(config, dispatcher)?;
    let state = Arc::new(Mutex::new(daemon_state));

    let server = DaemonServer::new(socket_path, state, limiter, operation_timeout);

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt, shutting down");
        }
    }

    Ok(())
}
