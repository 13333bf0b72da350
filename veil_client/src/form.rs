use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::{ContactApi, ContactApiError, ContactApiResponse};

pub const SENDING_MESSAGE: &str = "Sending message...";
pub const SUCCESS_FALLBACK_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";
pub const ERROR_FALLBACK_MESSAGE: &str = "Failed to send message. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactFormField {
    FullName,
    Email,
    Phone,
    Message,
}

#[derive(Debug, Error)]
#[error("Unknown contact form field {0:?}")]
pub struct UnknownFieldError(pub String);

impl FromStr for ContactFormField {
    type Err = UnknownFieldError;

    /// Parse the name of the form input, e.g. `fullName`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullName" => Ok(Self::FullName),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "message" => Ok(Self::Message),
            _ => Err(UnknownFieldError(s.into())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormData {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactFormData {
    fn field_mut(&mut self, field: ContactFormField) -> &mut String {
        match field {
            ContactFormField::FullName => &mut self.full_name,
            ContactFormField::Email => &mut self.email,
            ContactFormField::Phone => &mut self.phone,
            ContactFormField::Message => &mut self.message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContactFormStatus {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl ContactFormStatus {
    /// Text to show next to the form.
    pub fn message(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Loading => SENDING_MESSAGE,
            Self::Success(message) | Self::Error(message) => message,
        }
    }
}

/// In-memory state of the contact form.
///
/// No validation happens here, the server is the only authority on what a
/// valid submission is.
#[derive(Debug)]
pub struct ContactForm<Api> {
    api: Api,
    data: ContactFormData,
    status: watch::Sender<ContactFormStatus>,
}

impl<Api: ContactApi> ContactForm<Api> {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            data: Default::default(),
            status: watch::Sender::new(Default::default()),
        }
    }

    pub fn update_field(&mut self, field: ContactFormField, value: impl Into<String>) {
        *self.data.field_mut(field) = value.into();
    }

    pub fn data(&self) -> &ContactFormData {
        &self.data
    }

    pub fn status(&self) -> ContactFormStatus {
        self.status.borrow().clone()
    }

    /// Observe status changes, e.g. to render them.
    pub fn subscribe(&self) -> watch::Receiver<ContactFormStatus> {
        self.status.subscribe()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        *self.status.borrow() != ContactFormStatus::Loading
    }

    /// Submit the current form data once and return the resulting status.
    pub async fn submit(&mut self) -> ContactFormStatus {
        self.status.send_replace(ContactFormStatus::Loading);

        let status = match self.api.submit(self.data.clone()).await {
            Ok(ContactApiResponse {
                success: true,
                message,
            }) => {
                self.data = Default::default();
                ContactFormStatus::Success(
                    message.unwrap_or_else(|| SUCCESS_FALLBACK_MESSAGE.into()),
                )
            }
            Ok(ContactApiResponse {
                success: false,
                message,
            }) => {
                debug!(?message, "contact form submission has been refused");
                ContactFormStatus::Error(message.unwrap_or_else(|| ERROR_FALLBACK_MESSAGE.into()))
            }
            Err(ContactApiError::Network(err)) => {
                warn!("failed to submit contact form: {err:#}");
                ContactFormStatus::Error(NETWORK_ERROR_MESSAGE.into())
            }
        };

        self.status.send_replace(status.clone());
        status
    }
}
