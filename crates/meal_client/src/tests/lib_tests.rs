use super::*;
use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

const PIZZA: &str = "https://foodish-api.com/images/pizza/pizza42.jpg";

async fn spawn_meal_server() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/", get(|| async { Json(json!({ "image": PIZZA })) }))
        .route(
            "/no-image",
            get(|| async { Json(json!({ "message": "no food today" })) }),
        )
        .route("/numeric-image", get(|| async { Json(json!({ "image": 42 })) }))
        .route("/empty-image", get(|| async { Json(json!({ "image": "" })) }))
        .route("/html", get(|| async { "<html>maintenance</html>" }))
        .route(
            "/down",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn fetches_image_url() {
    let base = spawn_meal_server().await.expect("spawn server");
    let client = FoodishClient::new(format!("{base}/api/"));

    let suggestion = client.fetch_suggestion().await.expect("suggestion");
    assert_eq!(suggestion.image, PIZZA);
}

#[tokio::test]
async fn missing_or_non_string_image_is_rejected() {
    let base = spawn_meal_server().await.expect("spawn server");
    for path in ["/no-image", "/numeric-image", "/empty-image"] {
        let client = FoodishClient::new(format!("{base}{path}"));
        let err = client.fetch_suggestion().await.expect_err("should fail");
        assert!(matches!(err, FetchError::MissingImage), "{path}: {err}");
        assert_eq!(err.user_message(), "Unable to retrieve meal suggestion.");
    }
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let base = spawn_meal_server().await.expect("spawn server");
    let client = FoodishClient::new(format!("{base}/html"));

    let err = client.fetch_suggestion().await.expect_err("should fail");
    assert!(matches!(err, FetchError::Malformed(_)), "{err}");
    assert_eq!(err.user_message(), "Error fetching meal suggestion");
}

#[tokio::test]
async fn error_status_is_a_transport_failure() {
    let base = spawn_meal_server().await.expect("spawn server");
    let client = FoodishClient::new(format!("{base}/down"));

    let err = client.fetch_suggestion().await.expect_err("should fail");
    assert!(matches!(err, FetchError::Transport(_)), "{err}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = FoodishClient::new(format!("http://{addr}/api/"));
    let err = client.fetch_suggestion().await.expect_err("should fail");
    assert!(matches!(err, FetchError::Transport(_)), "{err}");
}

#[test]
fn parses_extra_fields_alongside_image() {
    let suggestion =
        parse_suggestion(r#"{"image":"https://x/y.jpg","category":"pizza"}"#).expect("parse");
    assert_eq!(suggestion.image, "https://x/y.jpg");
    assert!(matches!(
        parse_suggestion("[]"),
        Err(FetchError::MissingImage)
    ));
}

#[test]
fn default_client_targets_foodish() {
    assert_eq!(FoodishClient::default().endpoint(), DEFAULT_MEAL_API_URL);
}
