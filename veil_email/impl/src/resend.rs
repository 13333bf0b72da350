//! Delivery through the Resend HTTP API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use veil_email_contracts::{Email, EmailDelivery, EmailService};
use veil_models::{email_address::EmailAddressWithName, Sensitive};

use crate::http::HttpClient;

const API_ENDPOINT: &str = "https://api.resend.com/";

#[derive(Debug, Clone)]
pub struct ResendEmailServiceImpl {
    config: ResendEmailServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ResendEmailServiceConfig {
    emails_endpoint: Arc<Url>,
    api_key: Arc<Sensitive<String>>,
    from: Arc<EmailAddressWithName>,
}

impl ResendEmailServiceConfig {
    /// `endpoint_override` replaces the API base url and must end with a `/`.
    pub fn new(
        api_key: Sensitive<String>,
        from: EmailAddressWithName,
        endpoint_override: Option<Url>,
    ) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => API_ENDPOINT.parse()?,
        };

        Ok(Self {
            emails_endpoint: endpoint.join("emails")?.into(),
            api_key: api_key.into(),
            from: from.into(),
        })
    }
}

impl ResendEmailServiceImpl {
    pub fn new(config: ResendEmailServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: HttpClient::new()?,
        })
    }
}

impl EmailService for ResendEmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<EmailDelivery> {
        let request = SendEmailRequest {
            from: self.config.from.to_string(),
            to: email.recipients.iter().map(|r| r.as_str()).collect(),
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
            reply_to: email.reply_to.as_ref().map(|r| r.as_str()),
        };

        let response = match self
            .client
            .post((*self.config.emails_endpoint).clone())
            .bearer_auth(self.config.api_key.as_str())
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                return Ok(EmailDelivery::Rejected {
                    reason: format!("Failed to reach email provider: {err}"),
                })
            }
        };

        let status = response.status();
        debug!(%status, "email provider responded");

        if status.is_success() {
            let id = response
                .json::<SendEmailResponse>()
                .await
                .ok()
                .and_then(|response| response.id);
            return Ok(EmailDelivery::Sent { id });
        }

        let reason = match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse {
                name: Some(name),
                message: Some(message),
            }) => format!("{name}: {message} ({status})"),
            Ok(ErrorResponse {
                message: Some(message),
                ..
            }) => format!("{message} ({status})"),
            _ => format!("Email provider responded with {status}"),
        };

        Ok(EmailDelivery::Rejected { reason })
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    name: Option<String>,
    message: Option<String>,
}
