use std::sync::Arc;

use anyhow::anyhow;
use tracing::{error, info};
use veil_core_contact_contracts::{ContactSendMessageError, ContactService};
use veil_email_contracts::{Email, EmailDelivery, EmailService};
use veil_models::{
    contact::{ContactReceipt, ContactSubmission},
    email_address::EmailAddress,
};
use veil_shared_contracts::time::TimeService;
use veil_templates_contracts::{
    ContactSubmissionHtmlTemplate, ContactSubmissionTextTemplate, TemplateService,
};

/// Recipient used when no override has been configured.
pub const DEFAULT_RECIPIENT: &str = "rycwells@proton.me";

pub const PHONE_PLACEHOLDER: &str = "Not provided";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Time, Template, Email> {
    time: Time,
    template: Template,
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    pub recipient: Arc<EmailAddress>,
}

impl ContactServiceConfig {
    pub fn new(recipient_override: Option<EmailAddress>) -> anyhow::Result<Self> {
        let recipient = match recipient_override {
            Some(recipient) => recipient,
            None => DEFAULT_RECIPIENT
                .parse()
                .map_err(|_| anyhow!("Invalid default recipient {DEFAULT_RECIPIENT:?}"))?,
        };

        Ok(Self {
            recipient: recipient.into(),
        })
    }
}

impl<Time, Template, Email> ContactServiceImpl<Time, Template, Email> {
    pub fn new(time: Time, template: Template, email: Email, config: ContactServiceConfig) -> Self {
        Self {
            time,
            template,
            email,
            config,
        }
    }
}

impl<Time, Template, EmailS> ContactService for ContactServiceImpl<Time, Template, EmailS>
where
    Time: TimeService,
    Template: TemplateService,
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactReceipt, ContactSendMessageError> {
        let submitted_at = self.time.now().format(TIMESTAMP_FORMAT).to_string();
        let phone = submission
            .phone
            .as_deref()
            .map_or(PHONE_PLACEHOLDER, |phone| phone.as_str());

        let html = self.template.render(&ContactSubmissionHtmlTemplate {
            full_name: submission.full_name.to_string(),
            email: submission.email.to_string(),
            phone: phone.into(),
            message: submission.message.to_string(),
            submitted_at: submitted_at.clone(),
        })?;

        let text = self.template.render(&ContactSubmissionTextTemplate {
            full_name: submission.full_name.to_string(),
            email: submission.email.to_string(),
            phone: phone.into(),
            message: submission.message.to_string(),
            submitted_at,
        })?;

        let email = Email {
            recipients: vec![(*self.config.recipient).clone()],
            subject: format!("New Contact Form Submission from {}", *submission.full_name),
            html,
            text,
            reply_to: Some(submission.email),
        };

        match self.email.send(email).await? {
            EmailDelivery::Sent { id } => {
                info!(?id, "contact submission delivered");
                Ok(ContactReceipt { id })
            }
            EmailDelivery::Rejected { reason } => {
                error!(%reason, "email provider rejected contact submission");
                Err(ContactSendMessageError::Send)
            }
        }
    }
}
