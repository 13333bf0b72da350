use serde::{Deserialize, Serialize};
use veil_models::contact::{ContactReceipt, ContactSubmission, ContactSubmissionError};

/// Raw contact form fields. Absent and `null` fields count as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactSubmission {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TryFrom<ApiContactSubmission> for ContactSubmission {
    type Error = ContactSubmissionError;

    fn try_from(value: ApiContactSubmission) -> Result<Self, Self::Error> {
        ContactSubmission::new(
            value.full_name.unwrap_or_default(),
            value.email.unwrap_or_default(),
            value.phone.unwrap_or_default(),
            value.message.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactReceipt {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ApiContactReceipt {
    pub fn new(message: &'static str, receipt: ContactReceipt) -> Self {
        Self {
            message,
            id: receipt.id,
        }
    }
}
