use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{Environment, File, FileFormat, Map};
use serde::Deserialize;
use url::Url;
use veil_models::{
    email_address::{EmailAddress, EmailAddressWithName},
    Sensitive,
};

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files take precedence.
pub const CONFIG_PATH_ENV: &str = "VEIL_CONFIG";

const ENV_PREFIX: &str = "VEIL";
const LEGACY_RESEND_API_KEY_ENV: &str = "RESEND_API_KEY";
const LEGACY_CONTACT_EMAIL_ENV: &str = "CONTACT_EMAIL";

pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let files = paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    build(&files, std::env::vars().collect())
}

/// Layer the toml `files`, then `VEIL_*` variables (`__` separates nested
/// keys), then the legacy `RESEND_API_KEY` and `CONTACT_EMAIL` variables.
fn build(files: &[String], env: Map<String, String>) -> anyhow::Result<Config> {
    let legacy = |key: &str| env.get(key).filter(|value| !value.is_empty()).cloned();
    let resend_api_key = legacy(LEGACY_RESEND_API_KEY_ENV);
    let contact_email = legacy(LEGACY_CONTACT_EMAIL_ENV);

    files
        .iter()
        .fold(config::Config::builder(), |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(Some(env)),
        )
        .set_override_option("email.resend.api_key", resend_api_key)?
        .set_override_option("contact.recipient", contact_email)?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub transport: EmailTransport,
    pub from: EmailAddressWithName,
    pub resend: Option<ResendConfig>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTransport {
    Resend,
    Smtp,
}

#[derive(Debug, Deserialize)]
pub struct ResendConfig {
    pub api_key: Sensitive<String>,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub url: Sensitive<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    /// Where submissions are delivered to. Falls back to the built-in
    /// default recipient.
    pub recipient: Option<EmailAddress>,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: Url,
}
