use super::*;

#[test]
fn search_url_appends_headshot_suffix() {
    let client = SearchClient::new("http://localhost:5000").unwrap();
    let url = client.search_url("Tom Hanks").unwrap();
    assert_eq!(url.path(), "/search");
    let pairs: Vec<_> = url.query_pairs().collect();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, "q");
    assert_eq!(pairs[0].1, "Tom Hanks headshot");
}

#[test]
fn image_url_encodes_source() {
    let client = SearchClient::new("https://wrap.example/api").unwrap();
    let url = client
        .image_url("https://cdn.example/a b.jpg?x=1&y=2")
        .unwrap();
    assert_eq!(url.path(), "/api/image");
    let (key, value) = url.query_pairs().next().unwrap();
    assert_eq!(key, "url");
    assert_eq!(value, "https://cdn.example/a b.jpg?x=1&y=2");
}

#[test]
fn invalid_backend_is_config_error() {
    assert!(matches!(
        SearchClient::new("not a url"),
        Err(WrapError::Config(_))
    ));
    assert!(matches!(
        SearchClient::new("mailto:someone@example.com"),
        Err(WrapError::Config(_))
    ));
}

#[test]
fn source_prefers_thumbnail_then_original() {
    let both = serde_json::json!({ "thumbnail": "t", "original": "o" });
    assert_eq!(source_url(&both), Some("t"));

    let empty_thumb = serde_json::json!({ "thumbnail": "", "original": "o" });
    assert_eq!(source_url(&empty_thumb), Some("o"));

    assert_eq!(source_url(&serde_json::json!({})), None);
}

#[test]
fn malformed_items_yield_no_source() {
    let odd_thumb = serde_json::json!({ "thumbnail": 42, "original": "o" });
    assert_eq!(source_url(&odd_thumb), Some("o"));

    let nothing_usable = serde_json::json!({ "thumbnail": null, "original": ["x"] });
    assert_eq!(source_url(&nothing_usable), None);

    assert_eq!(source_url(&serde_json::json!("just a string")), None);
    assert_eq!(source_url(&serde_json::Value::Null), None);
}

#[tokio::test]
async fn empty_name_fails_before_any_request() {
    // Port 9 (discard) is never contacted: the name check comes first.
    let client = SearchClient::new("http://127.0.0.1:9").unwrap();
    assert!(matches!(client.search("   ").await, Err(WrapError::EmptyQuery)));
}
