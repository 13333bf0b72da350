use tracing::info;
use veil_config::Config;

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Setting up {:?} email transport", config.email.transport);
    let email = email::connect(&config.email)?;

    let server = environment::rest_server(&config, email)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
