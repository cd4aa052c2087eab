//! Outbound calls made by the proxy. Every call is fresh: no retry, no caching.

use crate::foundation::error::{WrapError, WrapResult};

/// Image-search vertical requested from the upstream API.
const IMAGE_SEARCH_MODE: &str = "isch";

/// Run an image search upstream and return its JSON body untouched.
pub(crate) async fn search(
    http: &reqwest::Client,
    endpoint: &str,
    query: &str,
    api_key: &str,
) -> WrapResult<Vec<u8>> {
    let response = http
        .get(endpoint)
        .query(&[("q", query), ("tbm", IMAGE_SEARCH_MODE), ("api_key", api_key)])
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| WrapError::fetch(describe(&e)))?;
    let body = response
        .bytes()
        .await
        .map_err(|e| WrapError::fetch(describe(&e)))?;
    Ok(body.to_vec())
}

/// Download the raw bytes of a source image.
pub(crate) async fn fetch_image(http: &reqwest::Client, url: &str) -> WrapResult<Vec<u8>> {
    let response = http
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| WrapError::fetch(describe(&e)))?;
    let body = response
        .bytes()
        .await
        .map_err(|e| WrapError::fetch(describe(&e)))?;
    Ok(body.to_vec())
}

/// Error text without the request URL, which would leak the API key into responses.
fn describe(err: &reqwest::Error) -> String {
    if let Some(status) = err.status() {
        format!("upstream responded with status {}", status.as_u16())
    } else if err.is_timeout() {
        "upstream request timed out".to_string()
    } else if err.is_connect() {
        "could not connect to upstream".to_string()
    } else if err.is_builder() {
        "invalid upstream url".to_string()
    } else if err.is_body() || err.is_decode() {
        "could not read upstream response".to_string()
    } else {
        "upstream request failed".to_string()
    }
}
