use std::future::Future;

use veil_models::email_address::EmailAddress;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Deliver the email with a single attempt.
    ///
    /// A failure reported by the provider (or a provider that cannot be
    /// reached) is returned as [`EmailDelivery::Rejected`]. `Err` is reserved
    /// for faults on our side, e.g. an email that cannot be assembled.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<EmailDelivery>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipients: Vec<EmailAddress>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: Option<EmailAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailDelivery {
    Sent {
        /// Message id assigned by the provider.
        id: Option<String>,
    },
    Rejected {
        reason: String,
    },
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: EmailDelivery) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
