use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::Url;

use crate::foundation::error::{WrapError, WrapResult};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SEARCH_API_URL: &str = "https://serpapi.com/search";

/// Server settings, read from the process environment (and `.env`).
///
/// | Variable | Meaning |
/// |---|---|
/// | `PORT` | listen port, default 5000 |
/// | `HOST` | listen address, default `0.0.0.0` |
/// | `SERP_API_KEY` | image-search credential; `/search` answers 500 without it |
/// | `FRONTEND_URL`, `ALLOWED_ORIGINS` | comma-separated origins admitted by CORS |
/// | `SEARCH_API_URL` | upstream search endpoint |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub api_key: Option<String>,
    /// Normalized `scheme://host[:port]` origins.
    pub allowed_origins: Vec<String>,
    pub search_api_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            api_key: None,
            allowed_origins: Vec::new(),
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> WrapResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::info!(path = %path.display(), "loaded environment file"),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(WrapError::config(format!("read .env: {err}"))),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> WrapResult<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();

        if let Some(port) = var("PORT") {
            cfg.port = port
                .parse()
                .map_err(|e| WrapError::config(format!("PORT '{port}': {e}")))?;
        }
        if let Some(host) = var("HOST") {
            cfg.host = host
                .parse()
                .map_err(|e| WrapError::config(format!("HOST '{host}': {e}")))?;
        }
        cfg.api_key = var("SERP_API_KEY");
        if let Some(url) = var("SEARCH_API_URL") {
            Url::parse(&url)
                .map_err(|e| WrapError::config(format!("SEARCH_API_URL '{url}': {e}")))?;
            cfg.search_api_url = url;
        }

        let origins = [var("FRONTEND_URL"), var("ALLOWED_ORIGINS")];
        for raw in origins.iter().flatten().flat_map(|list| list.split(',')) {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match normalize_origin(raw) {
                Some(origin) if !cfg.allowed_origins.contains(&origin) => {
                    cfg.allowed_origins.push(origin)
                }
                Some(_) => {}
                None => tracing::warn!(origin = raw, "ignoring malformed allowed origin"),
            }
        }

        Ok(cfg)
    }

    pub fn with_overrides(mut self, host: Option<IpAddr>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// `https://app.example.com/some/page` becomes `https://app.example.com`.
fn normalize_origin(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

#[cfg(test)]
#[path = "../../tests/unit/server/config.rs"]
mod tests;
