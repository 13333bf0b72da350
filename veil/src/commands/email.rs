use anyhow::bail;
use clap::Subcommand;
use tracing::info;
use veil_config::Config;
use veil_email_contracts::{Email, EmailDelivery, EmailService};
use veil_models::email_address::EmailAddress;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddress },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    let delivery = email_service
        .send(Email {
            recipients: vec![recipient],
            subject: "Email Deliverability Test".into(),
            html: "<p>Email deliverability seems to be working!</p>".into(),
            text: "Email deliverability seems to be working!".into(),
            reply_to: None,
        })
        .await?;

    match delivery {
        EmailDelivery::Sent { id } => {
            info!(?id, "Email has been sent");
            Ok(())
        }
        EmailDelivery::Rejected { reason } => bail!("Failed to send email: {reason}"),
    }
}
