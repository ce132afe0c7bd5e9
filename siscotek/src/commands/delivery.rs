use anyhow::bail;
use clap::Subcommand;
use siscotek_config::Config;
use siscotek_delivery_contracts::{DeliveryRequest, DeliveryService};
use siscotek_models::contact::ContactDraft;
use tracing::info;

use crate::environment::ConfigProvider;

#[derive(Debug, Subcommand)]
pub enum DeliveryCommand {
    /// Validate a contact message and send it through the configured delivery service
    Test {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
    },
}

impl DeliveryCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            DeliveryCommand::Test {
                first_name,
                last_name,
                email,
                phone,
                message,
            } => {
                let draft = ContactDraft {
                    first_name,
                    last_name,
                    email,
                    phone,
                    message,
                };
                test(config, draft).await
            }
        }
    }
}

async fn test(config: Config, draft: ContactDraft) -> anyhow::Result<()> {
    let message = match draft.validate() {
        Ok(message) => message,
        Err(errors) => {
            let errors = errors
                .iter()
                .map(|(field, error)| error.message(field))
                .collect::<Vec<_>>();
            bail!("Invalid contact message: {}", errors.join(" "));
        }
    };

    let config_provider = ConfigProvider::new(&config)?;
    let delivery = config_provider.delivery()?;
    let identifiers = &config_provider.contact.delivery;

    delivery
        .send(DeliveryRequest {
            service_id: identifiers.service_id.clone(),
            template_id: identifiers.template_id.clone(),
            account_id: identifiers.account_id.clone(),
            params: message,
        })
        .await?;

    info!(
        "Contact message delivered via {}",
        config_provider.delivery.send_endpoint()
    );

    Ok(())
}
