use anyhow::Context;
use veil_config::{EmailConfig, EmailTransport};
use veil_email_impl::{
    EmailServiceImpl, ResendEmailServiceConfig, ResendEmailServiceImpl, SmtpEmailServiceImpl,
};

/// Set up the configured email transport
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    match config.transport {
        EmailTransport::Resend => {
            let resend = config
                .resend
                .as_ref()
                .context("The resend transport requires an [email.resend] section")?;
            let config = ResendEmailServiceConfig::new(
                resend.api_key.clone(),
                config.from.clone(),
                resend.endpoint_override.clone(),
            )?;
            ResendEmailServiceImpl::new(config)
                .map(Into::into)
                .context("Failed to set up resend transport")
        }
        EmailTransport::Smtp => {
            let smtp = config
                .smtp
                .as_ref()
                .context("The smtp transport requires an [email.smtp] section")?;
            SmtpEmailServiceImpl::new(&smtp.url, config.from.clone())
                .map(Into::into)
                .context("Failed to set up smtp transport")
        }
    }
}
