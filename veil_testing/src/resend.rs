//! Minimal stand-in for the Resend email API.
//!
//! `POST /emails` accepts an email when the bearer token matches the
//! configured api key and answers with a fresh id. Accepted emails can be
//! fetched again with `GET /emails/{id}`.

use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::info;
use url::Url;
use uuid::Uuid;

const EMAILS_ROUTE: &str = "/emails";

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting resend testing server on {host}:{port}");
    info!("Resend endpoint override: http://{host}:{port}/");
    info!("Api key: {api_key:?}");

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(Arc::new(ServerState::new(api_key))))
        .await
        .context("Failed to start HTTP server")
}

/// Handle to a testing server running in the background on a random port.
pub struct MockResendServer {
    url: Url,
    state: Arc<ServerState>,
}

impl MockResendServer {
    pub async fn spawn(api_key: impl Into<String>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(ServerState::new(api_key.into()));

        let router = router(Arc::clone(&state));
        tokio::spawn(async move { axum::serve(listener, router).await });

        Ok(Self {
            url: format!("http://{addr}/").parse()?,
            state,
        })
    }

    /// Base url to use as the api endpoint override.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// All emails accepted so far.
    pub async fn received(&self) -> Vec<ReceivedEmail> {
        self.state.emails.lock().await.values().cloned().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedEmail {
    pub id: Uuid,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Debug)]
struct ServerState {
    api_key: String,
    emails: Mutex<HashMap<Uuid, ReceivedEmail>>,
}

impl ServerState {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            emails: Default::default(),
        }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            None => Err(error(
                StatusCode::UNAUTHORIZED,
                "missing_api_key",
                "Missing API key in the authorization header.",
            )),
            Some(token) if token != self.api_key => Err(error(
                StatusCode::FORBIDDEN,
                "invalid_api_key",
                "API key is invalid",
            )),
            Some(_) => Ok(()),
        }
    }
}

fn router(state: Arc<ServerState>) -> Router<()> {
    Router::new()
        .route(EMAILS_ROUTE, routing::post(send_email))
        .route(&format!("{EMAILS_ROUTE}/:id"), routing::get(get_email))
        .with_state(state)
}

#[derive(Deserialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
}

async fn send_email(
    state: State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }

    if request.to.is_empty() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing `to` field.",
        );
    }

    if request.html.is_none() && request.text.is_none() {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Missing `html` or `text` field.",
        );
    }

    let id = Uuid::new_v4();
    info!(%id, to = ?request.to, subject = request.subject, "received email");

    state.emails.lock().await.insert(
        id,
        ReceivedEmail {
            id,
            from: request.from,
            to: request.to,
            subject: request.subject,
            html: request.html,
            text: request.text,
            reply_to: request.reply_to,
        },
    );

    Json(json!({ "id": id })).into_response()
}

async fn get_email(
    state: State<Arc<ServerState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(response) = state.authorize(&headers) {
        return response;
    }

    match state.emails.lock().await.get(&id) {
        Some(email) => Json(email.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "not_found", "Email not found"),
    }
}

fn error(status: StatusCode, name: &str, message: &str) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "message": message,
        "name": name,
    });
    (status, Json(body)).into_response()
}
