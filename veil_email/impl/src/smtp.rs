use lettre::{message::MultiPart, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use veil_email_contracts::{Email, EmailDelivery, EmailService};
use veil_models::email_address::EmailAddressWithName;

#[derive(Debug, Clone)]
pub struct SmtpEmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailServiceImpl {
    pub fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }
}

impl EmailService for SmtpEmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<EmailDelivery> {
        let mut builder = Message::builder()
            .from(self.from.0.clone())
            .subject(email.subject);
        for recipient in &email.recipients {
            builder = builder.to(recipient.as_str().parse()?);
        }
        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(reply_to.as_str().parse()?);
        }
        let message = builder.multipart(MultiPart::alternative_plain_html(email.text, email.html))?;

        Ok(match self.transport.send(message).await {
            Ok(response) if response.is_positive() => EmailDelivery::Sent { id: None },
            Ok(response) => EmailDelivery::Rejected {
                reason: format!("SMTP server replied with {}", response.code()),
            },
            Err(err) => EmailDelivery::Rejected {
                reason: err.to_string(),
            },
        })
    }
}
