pub(crate) mod config;
pub(crate) mod routes;
pub(crate) mod upstream;

use std::time::Duration;

use warp::Filter;

use crate::foundation::error::{WrapError, WrapResult};
use config::ServerConfig;
use routes::{ServerState, routes};

/// Upper bound on any single upstream call.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Bind the proxy and serve until the process is stopped.
pub async fn serve(config: ServerConfig) -> WrapResult<()> {
    if config.api_key.is_none() {
        tracing::warn!("SERP_API_KEY is not set; /search will answer 500");
    }
    if config.allowed_origins.is_empty() {
        tracing::warn!("no allowed origins configured; cross-origin /search requests are refused");
    }

    let http = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .map_err(|e| WrapError::config(format!("build http client: {e}")))?;

    let addr = config.addr();
    let filter = routes(ServerState::new(config, http)).with(warp::trace::request());
    let (bound, server) = warp::serve(filter)
        .try_bind_ephemeral(addr)
        .map_err(|e| WrapError::config(format!("bind {addr}: {e}")))?;

    tracing::info!(addr = %bound, "server is running");
    server.await;
    Ok(())
}

/// Any panic is logged and terminates the process with a non-zero status, so a supervisor
/// can restart it instead of leaving a half-working server behind.
pub fn install_fail_fast_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "unhandled failure; exiting");
        default_hook(info);
        std::process::exit(1);
    }));
}
