use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use veil_core_contact_contracts::{ContactSendMessageError, ContactService};
use veil_models::contact::{ContactSubmission, ContactSubmissionError};

use super::{error, internal_server_error};
use crate::models::contact::{ApiContactReceipt, ApiContactSubmission};

pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const MISSING_FIELDS_MESSAGE: &str = "Full name, email, and message are required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address.";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again later.";

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

/// The body is parsed as JSON whatever its `Content-Type`.
async fn send_message(service: State<Arc<impl ContactService>>, body: Bytes) -> Response {
    let payload = match serde_json::from_slice::<ApiContactSubmission>(&body) {
        Ok(payload) => payload,
        Err(err) => return internal_server_error(err),
    };

    let submission = match ContactSubmission::try_from(payload) {
        Ok(submission) => submission,
        Err(ContactSubmissionError::MissingRequiredField) => {
            return error(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
        }
        Err(ContactSubmissionError::InvalidEmail) => {
            return error(StatusCode::BAD_REQUEST, INVALID_EMAIL_MESSAGE)
        }
    };

    match service.send_message(submission).await {
        Ok(receipt) => Json(ApiContactReceipt::new(SENT_MESSAGE, receipt)).into_response(),
        Err(ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED_MESSAGE)
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{body::Body, http::Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use veil_core_contact_contracts::MockContactService;
    use veil_models::contact::ContactReceipt;

    use super::*;
    use crate::routes::UNEXPECTED_ERROR_MESSAGE;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let contact = MockContactService::new().with_send_message(
            make_submission(""),
            Ok(ContactReceipt {
                id: Some("abc123".into()),
            }),
        );

        // Act
        let (status, body) = post(
            contact,
            json!({
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "phone": "",
                "message": "Hello",
            }),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "Message sent successfully!", "id": "abc123" })
        );
    }

    #[tokio::test]
    async fn ok_without_id() {
        // Arrange
        let contact = MockContactService::new().with_send_message(
            make_submission("+1 555 0100"),
            Ok(ContactReceipt { id: None }),
        );

        // Act
        let (status, body) = post(
            contact,
            json!({
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "phone": "+1 555 0100",
                "message": "Hello",
            }),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Message sent successfully!" }));
    }

    #[tokio::test]
    async fn missing_required_fields() {
        for payload in [
            json!({ "fullName": "", "email": "jane@example.com", "message": "Hello" }),
            json!({ "email": "jane@example.com", "message": "Hello" }),
            json!({ "fullName": "Jane Doe", "email": null, "message": "Hello" }),
            json!({ "fullName": "Jane Doe", "email": "jane@example.com", "message": "" }),
            json!({}),
        ] {
            // Arrange
            let contact = MockContactService::new();

            // Act
            let (status, body) = post(contact, payload).await;

            // Assert
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body,
                json!({ "message": "Full name, email, and message are required." })
            );
        }
    }

    #[tokio::test]
    async fn invalid_email() {
        // Arrange
        let contact = MockContactService::new();

        // Act
        let (status, body) = post(
            contact,
            json!({ "fullName": "Jane Doe", "email": "not-an-email", "message": "Hello" }),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "message": "Please provide a valid email address." })
        );
    }

    #[tokio::test]
    async fn send_failed() {
        // Arrange
        let contact = MockContactService::new()
            .with_send_message(make_submission(""), Err(ContactSendMessageError::Send));

        // Act
        let (status, body) = post(
            contact,
            json!({ "fullName": "Jane Doe", "email": "jane@example.com", "message": "Hello" }),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "message": "Failed to send message. Please try again later." })
        );
    }

    #[tokio::test]
    async fn unexpected_fault_is_not_leaked() {
        // Arrange
        let contact = MockContactService::new().with_send_message(
            make_submission(""),
            Err(ContactSendMessageError::Other(anyhow!("smtp password expired"))),
        );

        // Act
        let (status, body) = post(
            contact,
            json!({ "fullName": "Jane Doe", "email": "jane@example.com", "message": "Hello" }),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": UNEXPECTED_ERROR_MESSAGE }));
    }

    #[tokio::test]
    async fn json_without_json_content_type() {
        for content_type in [Some("text/plain;charset=UTF-8"), None] {
            // Arrange
            let contact = MockContactService::new()
                .with_send_message(make_submission(""), Ok(ContactReceipt { id: None }));
            let sut = router(Arc::new(contact));
            let mut request = Request::post("/api/contact");
            if let Some(content_type) = content_type {
                request = request.header("content-type", content_type);
            }
            let request = request
                .body(Body::from(
                    json!({
                        "fullName": "Jane Doe",
                        "email": "jane@example.com",
                        "phone": "",
                        "message": "Hello",
                    })
                    .to_string(),
                ))
                .unwrap();

            // Act
            let response = sut.oneshot(request).await.unwrap();

            // Assert
            let (status, body) = read(response).await;
            assert_eq!(status, StatusCode::OK, "{content_type:?}");
            assert_eq!(body, json!({ "message": "Message sent successfully!" }));
        }
    }

    #[tokio::test]
    async fn malformed_payload() {
        for payload in ["", "{", "[]", r#"{"fullName": 42}"#] {
            // Arrange
            let sut = router(Arc::new(MockContactService::new()));
            let request = Request::post("/api/contact")
                .header("content-type", "application/json")
                .body(Body::from(payload))
                .unwrap();

            // Act
            let response = sut.oneshot(request).await.unwrap();

            // Assert
            let (status, body) = read(response).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{payload}");
            assert_eq!(body, json!({ "message": UNEXPECTED_ERROR_MESSAGE }));
        }
    }

    async fn post(contact: MockContactService, payload: Value) -> (StatusCode, Value) {
        let sut = router(Arc::new(contact));
        let request = Request::post("/api/contact")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        read(sut.oneshot(request).await.unwrap()).await
    }

    async fn read(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn make_submission(phone: &str) -> ContactSubmission {
        ContactSubmission::new(
            "Jane Doe".into(),
            "jane@example.com".into(),
            phone.into(),
            "Hello".into(),
        )
        .unwrap()
    }
}
