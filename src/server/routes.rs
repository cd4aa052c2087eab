use std::{convert::Infallible, sync::Arc};

use anyhow::Context;
use serde::Deserialize;
use warp::{
    Filter, Rejection, Reply,
    http::{StatusCode, header},
    reply::Response,
};

use crate::assets::normalize::normalize_thumbnail;
use crate::foundation::error::{WrapError, WrapResult};
use crate::server::{config::ServerConfig, upstream};

const LIVENESS_TEXT: &str = "server is running.";
const MISSING_KEY_MESSAGE: &str = "API key is missing. Check environment variables.";
const IMAGE_FAILURE_MESSAGE: &str = "Failed to process image";

/// Shared, read-only handler state.
#[derive(Clone, Debug)]
pub struct ServerState {
    config: Arc<ServerConfig>,
    http: reqwest::Client,
}

impl ServerState {
    pub fn new(config: ServerConfig, http: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            http,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageParams {
    url: Option<String>,
}

/// All proxy routes.
///
/// `/image` (GET and OPTIONS) is open to any origin. `/` and `/search` sit behind a CORS
/// policy built from the configured allowed origins.
pub fn routes(state: ServerState) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let cors = cors_policy(state.config());

    let image = warp::path!("image")
        .and(warp::get())
        .and(warp::query::<ImageParams>())
        .and(with_state(state.clone()))
        .and_then(handle_image);
    let preflight = warp::path!("image")
        .and(warp::options())
        .map(image_preflight);

    let root = warp::path::end().and(warp::get()).map(|| {
        tracing::info!("root route hit: server is running");
        LIVENESS_TEXT
    });
    let search = warp::path!("search")
        .and(warp::get())
        .and(warp::query::<SearchParams>())
        .and(with_state(state))
        .and_then(handle_search);

    image.or(preflight).or(root.or(search).with(cors))
}

fn with_state(
    state: ServerState,
) -> impl Filter<Extract = (ServerState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn cors_policy(config: &ServerConfig) -> warp::cors::Cors {
    warp::cors()
        .allow_origins(config.allowed_origins.iter().map(String::as_str))
        .allow_methods(["GET", "HEAD", "PUT", "PATCH", "POST", "DELETE"])
        .allow_header("content-type")
        .allow_credentials(true)
        .build()
}

async fn handle_search(params: SearchParams, state: ServerState) -> Result<Response, Infallible> {
    let query = params.q.unwrap_or_default();
    tracing::info!(query = %query, "search request received");

    let Some(api_key) = state.config.api_key.as_deref() else {
        tracing::error!("API key is missing; check environment variables");
        return Ok(error_reply(MISSING_KEY_MESSAGE));
    };

    match upstream::search(&state.http, &state.config.search_api_url, &query, api_key).await {
        Ok(body) => {
            tracing::info!(query = %query, bytes = body.len(), "search results returned");
            Ok(warp::reply::with_header(body, header::CONTENT_TYPE, "application/json")
                .into_response())
        }
        Err(err) => {
            tracing::error!(error = %err, "error fetching search results");
            Ok(error_reply(&err.detail()))
        }
    }
}

async fn handle_image(params: ImageParams, state: ServerState) -> Result<Response, Infallible> {
    tracing::info!(
        url = params.url.as_deref().unwrap_or_default(),
        "image proxy request received"
    );

    let reply = match normalize_remote(&state, params.url).await {
        Ok(png) => {
            tracing::info!(bytes = png.len(), "image processed and sent");
            warp::reply::with_header(png, header::CONTENT_TYPE, "image/png").into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "error processing image");
            error_reply(IMAGE_FAILURE_MESSAGE)
        }
    };
    Ok(warp::reply::with_header(reply, header::ACCESS_CONTROL_ALLOW_ORIGIN, "*").into_response())
}

async fn normalize_remote(state: &ServerState, url: Option<String>) -> WrapResult<Vec<u8>> {
    let url = url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| WrapError::validation("missing url query parameter"))?;
    let raw = upstream::fetch_image(&state.http, &url).await?;
    let png = tokio::task::spawn_blocking(move || normalize_thumbnail(&raw))
        .await
        .context("join thumbnail task")??;
    Ok(png)
}

fn image_preflight() -> Response {
    tracing::info!("CORS preflight request received");
    let reply = warp::reply::with_header(warp::reply(), header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
    let reply = warp::reply::with_header(
        reply,
        header::ACCESS_CONTROL_ALLOW_METHODS,
        "GET, POST, OPTIONS",
    );
    let reply =
        warp::reply::with_header(reply, header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type");
    warp::reply::with_status(reply, StatusCode::OK).into_response()
}

fn error_reply(message: &str) -> Response {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": message })),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response()
}
