mod common;

use common::{spawn_app, spawn_backend, unreachable_backend};
use serde_json::{Value, json};

fn backend_record() -> Value {
    json!({
        "short_code": "abc123",
        "original_url": "https://example.com",
        "short_url": "http://short.url/abc123",
        "created_at": "2025-01-15T10:30:00Z",
    })
}

#[tokio::test]
async fn the_create_flow_saves_the_returned_record() {
    let backend = spawn_backend(200, backend_record()).await;
    let app = spawn_app(backend).await;

    let response = app
        .client
        .post(format!("{}/create", app.address))
        .form(&[("url", "https://example.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/?created=true");

    let page = app
        .client
        .get(format!("{}/?created=true", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Short URL created successfully!"));
    assert!(page.contains("abc123"));
    assert!(page.contains("https://example.com"));

    let slot = std::fs::read_to_string(app.slot_path()).unwrap();
    let records: Value = serde_json::from_str(&slot).unwrap();
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[0]["code"], "abc123");
    assert_eq!(records[0]["short_url"], "http://short.url/abc123");
}

#[tokio::test]
async fn an_invalid_url_is_rejected_before_the_backend_is_called() {
    // Pointed at a dead backend: reaching it would fail the flow outright,
    // so the validation message proves the call was never made.
    let app = spawn_app(unreachable_backend().await).await;

    let response = app
        .client
        .post(format!("{}/create", app.address))
        .form(&[("url", "not a url")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let page = response.text().await.unwrap();
    assert!(page.contains("Please enter a valid URL (must start with http:// or https://)"));
}

#[tokio::test]
async fn a_backend_failure_re_renders_the_form_with_the_failure_message() {
    let backend = spawn_backend(422, json!({ "error": "invalid url" })).await;
    let app = spawn_app(backend).await;

    let response = app
        .client
        .post(format!("{}/create", app.address))
        .form(&[("url", "https://example.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let page = response.text().await.unwrap();
    assert!(page.contains("Failed to create short URL. Please try again."));
    assert!(!app.slot_path().exists());
}

#[tokio::test]
async fn a_transport_failure_re_renders_the_form_with_the_failure_message() {
    let app = spawn_app(unreachable_backend().await).await;

    let response = app
        .client
        .post(format!("{}/create", app.address))
        .form(&[("url", "https://example.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let page = response.text().await.unwrap();
    assert!(page.contains("Failed to create short URL. Please try again."));
}

#[tokio::test]
async fn delete_and_clear_round_trip_through_the_list() {
    let backend = spawn_backend(200, backend_record()).await;
    let app = spawn_app(backend).await;

    app.client
        .post(format!("{}/create", app.address))
        .form(&[("url", "https://example.com")])
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .post(format!("{}/links/abc123/delete", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/?deleted=true");

    // Deleting the only record drops the slot file entirely.
    assert!(!app.slot_path().exists());

    let page = app
        .client
        .get(format!("{}/?deleted=true", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("URL deleted successfully"));
    assert!(page.contains("No URLs yet"));

    // The same code can be saved again once it is gone.
    app.client
        .post(format!("{}/create", app.address))
        .form(&[("url", "https://example.com")])
        .send()
        .await
        .unwrap();
    assert!(app.slot_path().exists());

    let response = app
        .client
        .post(format!("{}/links/clear", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers()["location"], "/?cleared=true");
    assert!(!app.slot_path().exists());

    let page = app
        .client
        .get(format!("{}/?cleared=true", app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("All URLs cleared"));
}

#[tokio::test]
async fn saving_the_same_code_twice_is_rejected() {
    let backend = spawn_backend(200, backend_record()).await;
    let app = spawn_app(backend).await;

    app.client
        .post(format!("{}/create", app.address))
        .form(&[("url", "https://example.com")])
        .send()
        .await
        .unwrap();

    // The stub backend hands out the same code again; the store refuses it
    // and the form reports the failure.
    let response = app
        .client
        .post(format!("{}/create", app.address))
        .form(&[("url", "https://example.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let page = response.text().await.unwrap();
    assert!(page.contains("Failed to create short URL. Please try again."));

    let slot = std::fs::read_to_string(app.slot_path()).unwrap();
    let records: Value = serde_json::from_str(&slot).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
}
