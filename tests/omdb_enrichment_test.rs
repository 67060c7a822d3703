use httpmock::prelude::*;
use movie_eda::{fill_from_omdb, ApiKey, EnrichColumns, OmdbClient, Row, Value};

fn row(title: &str, rating: Value, revenue: Value, genre: Value) -> Row {
    [
        ("Title", Value::from(title)),
        ("IMDB_Rating", rating),
        ("Revenue", revenue),
        ("Genre", genre),
    ]
    .into_iter()
    .collect()
}

/// 沒有缺值的列不應發出任何請求
#[tokio::test]
async fn test_complete_row_issues_no_request() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).json_body(serde_json::json!({"Response": "True"}));
    });

    let client = OmdbClient::new(server.url("/"), ApiKey::new("test-key"));
    let complete = row(
        "Heat",
        Value::Float(8.3),
        Value::from("$67,436,818"),
        Value::from("Action"),
    );

    let result = fill_from_omdb(complete.clone(), &client, &EnrichColumns::default()).await;

    api_mock.assert_hits(0);
    assert_eq!(result, complete);
}

#[tokio::test]
async fn test_success_fills_missing_fields() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/")
            .query_param("t", "Mad Max: Fury Road")
            .query_param("apikey", "test-key");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "Title": "Mad Max: Fury Road",
                "imdbRating": "8.1",
                "BoxOffice": "$154,280,290",
                "Genre": "Action, Drama",
                "Response": "True"
            }));
    });

    let client = OmdbClient::new(server.url("/"), ApiKey::new("test-key"));
    let incomplete = row(
        "Mad Max: Fury Road",
        Value::Missing,
        Value::Missing,
        Value::Missing,
    );

    let result = fill_from_omdb(incomplete, &client, &EnrichColumns::default()).await;

    api_mock.assert_hits(1);
    assert_eq!(result.get("IMDB_Rating"), &Value::Float(8.1));
    assert_eq!(result.get("Revenue"), &Value::from("$154,280,290"));
    assert_eq!(result.get("Genre"), &Value::from("Action"));
}

#[tokio::test]
async fn test_title_not_found_keeps_fields_missing() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/").query_param("t", "Not A Real Movie");
        then.status(200).json_body(serde_json::json!({
            "Response": "False",
            "Error": "Movie not found!"
        }));
    });

    let client = OmdbClient::new(server.url("/"), ApiKey::new("test-key"));
    let incomplete = row(
        "Not A Real Movie",
        Value::Missing,
        Value::Missing,
        Value::from("Drama"),
    );

    let result = fill_from_omdb(incomplete.clone(), &client, &EnrichColumns::default()).await;

    api_mock.assert_hits(1);
    assert!(result.is_missing("IMDB_Rating"));
    assert!(result.is_missing("Revenue"));
    assert_eq!(result, incomplete);
}

#[tokio::test]
async fn test_http_error_is_absorbed() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(500);
    });

    let client = OmdbClient::new(server.url("/"), ApiKey::new("test-key"));
    let incomplete = row("Heat", Value::Missing, Value::Missing, Value::Missing);

    let result = fill_from_omdb(incomplete.clone(), &client, &EnrichColumns::default()).await;

    api_mock.assert();
    assert_eq!(result, incomplete);
}

#[tokio::test]
async fn test_unreachable_service_is_absorbed() {
    // 沒有伺服器在聽的埠
    let client = OmdbClient::new("http://127.0.0.1:9/", ApiKey::new("test-key"));
    let incomplete = row("Heat", Value::Missing, Value::Missing, Value::Missing);

    let result = fill_from_omdb(incomplete.clone(), &client, &EnrichColumns::default()).await;

    assert_eq!(result, incomplete);
}
