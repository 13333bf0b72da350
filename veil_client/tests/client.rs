use std::{net::Ipv4Addr, sync::Arc};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;
use veil_client::{
    ContactApi, ContactApiError, ContactClient, ContactForm, ContactFormData, ContactFormField,
    ContactFormStatus,
};

#[test]
fn endpoint() {
    for (base_url, expected) in [
        ("https://veilstudio.ai/", "https://veilstudio.ai/api/contact"),
        ("https://veilstudio.ai", "https://veilstudio.ai/api/contact"),
        ("http://127.0.0.1:8000/preview/", "http://127.0.0.1:8000/preview/api/contact"),
    ] {
        let sut = ContactClient::new(&base_url.parse().unwrap()).unwrap();
        assert_eq!(sut.endpoint().as_str(), expected);
    }
}

#[tokio::test]
async fn submit_ok() {
    // Arrange
    let server = spawn(StatusCode::OK, r#"{"message":"Message sent successfully!","id":"abc123"}"#)
        .await;
    let sut = ContactClient::new(&server.url).unwrap();

    // Act
    let result = sut.submit(make_data()).await.unwrap();

    // Assert
    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some("Message sent successfully!"));
    assert_eq!(
        server.received.lock().await.as_ref(),
        Some(&json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "phone": "",
            "message": "Hello",
        }))
    );
}

#[tokio::test]
async fn submit_refused() {
    // Arrange
    let server = spawn(
        StatusCode::BAD_REQUEST,
        r#"{"message":"Please provide a valid email address."}"#,
    )
    .await;
    let sut = ContactClient::new(&server.url).unwrap();

    // Act
    let result = sut.submit(make_data()).await.unwrap();

    // Assert
    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("Please provide a valid email address.")
    );
}

#[tokio::test]
async fn submit_unreadable_body() {
    // Arrange
    let server = spawn(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").await;
    let sut = ContactClient::new(&server.url).unwrap();

    // Act
    let result = sut.submit(make_data()).await.unwrap();

    // Assert
    assert!(!result.success);
    assert_eq!(result.message, None);
}

#[tokio::test]
async fn submit_unreachable() {
    // Arrange
    let sut = ContactClient::new(&"http://127.0.0.1:1/".parse().unwrap()).unwrap();

    // Act
    let result = sut.submit(make_data()).await;

    // Assert
    assert!(matches!(result, Err(ContactApiError::Network(_))));
}

#[tokio::test]
async fn form_end_to_end() {
    // Arrange
    let server = spawn(StatusCode::OK, r#"{"message":"Message sent successfully!"}"#).await;
    let mut sut = ContactForm::new(ContactClient::new(&server.url).unwrap());
    for (field, value) in [
        ("fullName", "Jane Doe"),
        ("email", "jane@example.com"),
        ("message", "Hello"),
    ] {
        sut.update_field(field.parse::<ContactFormField>().unwrap(), value);
    }

    // Act
    let status = sut.submit().await;

    // Assert
    assert_eq!(
        status,
        ContactFormStatus::Success("Message sent successfully!".into())
    );
    assert_eq!(sut.data(), &ContactFormData::default());
    assert!(server.received.lock().await.is_some());
}

struct TestServer {
    url: Url,
    received: Arc<Mutex<Option<Value>>>,
}

async fn spawn(status: StatusCode, body: &'static str) -> TestServer {
    let received = Arc::new(Mutex::new(None));
    let router = Router::new().route(
        "/api/contact",
        routing::post({
            let received = Arc::clone(&received);
            move |Json(payload): Json<Value>| async move {
                *received.lock().await = Some(payload);
                respond(status, body)
            }
        }),
    );

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await });

    TestServer {
        url: format!("http://{addr}/").parse().unwrap(),
        received,
    }
}

fn respond(status: StatusCode, body: &'static str) -> Response {
    (status, [("content-type", "application/json")], body).into_response()
}

fn make_data() -> ContactFormData {
    ContactFormData {
        full_name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        phone: String::new(),
        message: "Hello".into(),
    }
}
