use std::net::SocketAddr;

use anyhow::bail;
use clap::Subcommand;
use tracing::info;
use url::Url;
use veil_client::{ContactClient, ContactForm, ContactFormField, ContactFormStatus};
use veil_config::Config;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Fill in the contact form and submit it like a visitor would
    Submit {
        /// Base url of the site [default: the configured http address]
        #[arg(long)]
        url: Option<Url>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        message: String,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            ContactCommand::Submit {
                url,
                name,
                email,
                phone,
                message,
            } => {
                let url = match url {
                    Some(url) => url,
                    None => {
                        let addr = SocketAddr::from((config.http.host, config.http.port));
                        format!("http://{addr}/").parse()?
                    }
                };
                submit(url, [name, email, phone, message]).await
            }
        }
    }
}

async fn submit(url: Url, [name, email, phone, message]: [String; 4]) -> anyhow::Result<()> {
    let client = ContactClient::new(&url)?;
    info!(endpoint = %client.endpoint(), "Submitting contact form");
    let mut form = ContactForm::new(client);
    form.update_field(ContactFormField::FullName, name);
    form.update_field(ContactFormField::Email, email);
    form.update_field(ContactFormField::Phone, phone);
    form.update_field(ContactFormField::Message, message);

    match form.submit().await {
        ContactFormStatus::Success(message) => {
            println!("{message}");
            Ok(())
        }
        status => bail!("{}", status.message()),
    }
}
