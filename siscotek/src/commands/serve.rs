use siscotek_config::Config;
use tracing::info;

use crate::environment::ConfigProvider;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let config_provider = ConfigProvider::new(&config)?;

    info!(
        "Delivering contact messages via {} (service {:?}, template {:?})",
        config_provider.delivery.send_endpoint(),
        config.delivery.service_id,
        config.delivery.template_id,
    );
    let server = config_provider.rest_server()?;

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
