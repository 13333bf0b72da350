use veil_email_contracts::{Email, EmailDelivery, EmailService};

pub use crate::{
    resend::{ResendEmailServiceConfig, ResendEmailServiceImpl},
    smtp::SmtpEmailServiceImpl,
};

mod http;
pub mod resend;
pub mod smtp;

/// Email service backed by whichever provider has been configured.
#[derive(Debug, Clone)]
pub enum EmailServiceImpl {
    Resend(ResendEmailServiceImpl),
    Smtp(SmtpEmailServiceImpl),
}

impl From<ResendEmailServiceImpl> for EmailServiceImpl {
    fn from(value: ResendEmailServiceImpl) -> Self {
        Self::Resend(value)
    }
}

impl From<SmtpEmailServiceImpl> for EmailServiceImpl {
    fn from(value: SmtpEmailServiceImpl) -> Self {
        Self::Smtp(value)
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<EmailDelivery> {
        match self {
            Self::Resend(resend) => resend.send(email).await,
            Self::Smtp(smtp) => smtp.send(email).await,
        }
    }
}
