use std::sync::Arc;

use futures::future::join_all;
use reqwest::Url;
use serde::Deserialize;

use crate::assets::decode::sniff_mime;
use crate::foundation::core::GRID_SLOTS;
use crate::foundation::error::{WrapError, WrapResult};
use crate::gallery::descriptor::ImageDescriptor;

/// Backend used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Appended to every name so the image search favours portrait crops.
const QUERY_SUFFIX: &str = " headshot";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    images_results: Option<Vec<serde_json::Value>>,
}

/// Source URL of one result item, `thumbnail` preferred over `original`.
///
/// Items are taken loosely: a missing field, a non-string value or a non-object item yields
/// no source instead of failing the whole search.
fn source_url(item: &serde_json::Value) -> Option<&str> {
    ["thumbnail", "original"]
        .into_iter()
        .filter_map(|key| item.get(key)?.as_str())
        .find(|s| !s.is_empty())
}

/// Talks to the WrapStar backend: `/search` for candidates, `/image` for thumbnails.
#[derive(Clone, Debug)]
pub struct SearchClient {
    http: reqwest::Client,
    backend: Url,
}

impl SearchClient {
    pub fn new(backend: &str) -> WrapResult<Self> {
        Self::with_client(reqwest::Client::new(), backend)
    }

    pub fn with_client(http: reqwest::Client, backend: &str) -> WrapResult<Self> {
        let mut backend = Url::parse(backend)
            .map_err(|e| WrapError::config(format!("invalid backend url '{backend}': {e}")))?;
        if backend.cannot_be_a_base() {
            return Err(WrapError::config(format!(
                "backend url '{backend}' cannot carry a path"
            )));
        }
        if !backend.path().ends_with('/') {
            let path = format!("{}/", backend.path());
            backend.set_path(&path);
        }
        Ok(Self { http, backend })
    }

    pub fn backend(&self) -> &Url {
        &self.backend
    }

    pub fn search_url(&self, name: &str) -> WrapResult<Url> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{name}{QUERY_SUFFIX}"));
        Ok(url)
    }

    /// Proxy URL that renders `source` as a normalized thumbnail.
    pub fn image_url(&self, source: &str) -> WrapResult<Url> {
        let mut url = self.endpoint("image")?;
        url.query_pairs_mut().append_pair("url", source);
        Ok(url)
    }

    fn endpoint(&self, route: &str) -> WrapResult<Url> {
        self.backend
            .join(route)
            .map_err(|e| WrapError::config(format!("build {route} url: {e}")))
    }

    /// Search for `name` and localize up to [`GRID_SLOTS`] results.
    ///
    /// Results keep the upstream order. Individual thumbnails that fail are logged and left
    /// out; only a failure of the search call itself is an error.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, name: &str) -> WrapResult<Vec<ImageDescriptor>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WrapError::EmptyQuery);
        }

        let url = self.search_url(name)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| WrapError::fetch(format!("search request failed: {e}")))?;
        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| WrapError::fetch(format!("search response is not valid JSON: {e}")))?;
        let results = body
            .images_results
            .ok_or_else(|| WrapError::fetch("search response has no images_results"))?;

        let sources: Vec<String> = results
            .iter()
            .take(GRID_SLOTS)
            .filter_map(source_url)
            .map(str::to_owned)
            .collect();
        tracing::info!(count = sources.len(), "search returned image sources");

        let fetched = join_all(sources.iter().map(|s| self.fetch_thumbnail(s))).await;
        Ok(fetched
            .into_iter()
            .zip(&sources)
            .filter_map(|(result, source)| keep_or_log(result, source))
            .map(ImageDescriptor::blob)
            .collect())
    }

    /// Fetch one normalized thumbnail through the proxy.
    pub async fn fetch_thumbnail(&self, source: &str) -> WrapResult<Arc<[u8]>> {
        let url = self.image_url(source)?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| WrapError::fetch(format!("image request failed: {e}")))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WrapError::fetch(format!("read image body: {e}")))?;
        if sniff_mime(&bytes).is_none() {
            return Err(WrapError::image("proxy answered with a non-image body"));
        }
        Ok(Arc::from(&bytes[..]))
    }

    /// Resolve every `Remote` descriptor into a blob, dropping the ones that fail.
    /// `Custom` descriptors pass through untouched; order is preserved.
    pub async fn localize(&self, descriptors: Vec<ImageDescriptor>) -> Vec<ImageDescriptor> {
        let resolved = join_all(descriptors.into_iter().map(|d| async move {
            match d {
                ImageDescriptor::Remote { url } => {
                    let result = self.fetch_thumbnail(&url).await;
                    keep_or_log(result, &url).map(ImageDescriptor::blob)
                }
                custom => Some(custom),
            }
        }))
        .await;
        resolved.into_iter().flatten().collect()
    }
}

fn keep_or_log(result: WrapResult<Arc<[u8]>>, source: &str) -> Option<Arc<[u8]>> {
    match result {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            tracing::warn!(source, error = %err, "dropping image that failed to load");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/search.rs"]
mod tests;
