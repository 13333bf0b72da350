use thiserror::Error;

use crate::{email_address::EmailAddress, macros::nutype_string};

/// A single contact form submission. Lives for exactly one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub full_name: ContactSubmissionName,
    pub email: EmailAddress,
    pub phone: Option<ContactSubmissionPhone>,
    pub message: ContactSubmissionMessage,
}

nutype_string!(pub ContactSubmissionName(validate(not_empty)));
nutype_string!(pub ContactSubmissionPhone(validate(not_empty)));
nutype_string!(pub ContactSubmissionMessage(validate(not_empty)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactSubmissionError {
    #[error("full name, email or message is missing")]
    MissingRequiredField,
    #[error("the email address is malformed")]
    InvalidEmail,
}

impl ContactSubmission {
    /// Validate the raw form fields.
    ///
    /// All required fields are checked before the email address shape, so a
    /// submission without a name is reported as incomplete even if its email
    /// address is malformed too. An empty phone number means no phone number.
    pub fn new(
        full_name: String,
        email: String,
        phone: String,
        message: String,
    ) -> Result<Self, ContactSubmissionError> {
        let (Ok(full_name), Ok(message), false) = (
            ContactSubmissionName::try_new(full_name),
            ContactSubmissionMessage::try_new(message),
            email.is_empty(),
        ) else {
            return Err(ContactSubmissionError::MissingRequiredField);
        };

        let email = EmailAddress::try_new(email).map_err(|_| ContactSubmissionError::InvalidEmail)?;

        Ok(Self {
            full_name,
            email,
            phone: ContactSubmissionPhone::try_new(phone).ok(),
            message,
        })
    }
}

/// Outcome of a successfully delivered submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactReceipt {
    /// Identifier assigned by the email provider, if it reported one.
    pub id: Option<String>,
}
