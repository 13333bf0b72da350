use veil_api_rest::RestServerConfig;
use veil_config::Config;
use veil_core_contact_impl::ContactServiceConfig;
use veil_templates_impl::TemplateServiceImpl;

use self::types::{Contact, Email, RestServer, Time};

pub mod types;

/// Wire up the http server and every service behind it.
pub fn rest_server(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let contact = contact_service(config, email)?;
    let rest_server_config = RestServerConfig {
        host: config.http.host,
        port: config.http.port,
    };

    Ok(RestServer::new(contact, rest_server_config))
}

fn contact_service(config: &Config, email: Email) -> anyhow::Result<Contact> {
    let contact_service_config = ContactServiceConfig::new(config.contact.recipient.clone())?;

    Ok(Contact::new(
        Time::default(),
        TemplateServiceImpl::new()?,
        email,
        contact_service_config,
    ))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::email;

    #[test]
    fn build_from_default_config() {
        let config = veil_config::load_paths(&[Path::new(veil_config::DEFAULT_CONFIG_PATH)]).unwrap();
        let email = email::connect(&config.email).unwrap();
        rest_server(&config, email).unwrap();
    }
}
