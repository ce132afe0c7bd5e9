use std::sync::Arc;

use siscotek_config::Config;
use siscotek_core_contact_impl::{ContactFeatureConfig, DeliveryIdentifiers};
use siscotek_core_theme_impl::ThemeFeatureConfig;
use siscotek_delivery_impl::EmailJsDeliveryServiceConfig;
use types::{ContactFeature, Delivery, RestServer, ThemeFeature, ThemeRepo};

pub mod types;

/// Everything the services need from the configuration, converted once at
/// startup.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    pub delivery: EmailJsDeliveryServiceConfig,
    pub contact: ContactFeatureConfig,
    pub theme: ThemeFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let delivery = EmailJsDeliveryServiceConfig::new(
            config.delivery.endpoint_override.clone(),
            config.delivery.access_token.clone(),
        )?;

        let contact = ContactFeatureConfig {
            delivery: Arc::new(DeliveryIdentifiers {
                service_id: config.delivery.service_id.clone(),
                template_id: config.delivery.template_id.clone(),
                account_id: config.delivery.account_id.clone(),
            }),
            max_open_forms: config.contact.max_open_forms,
            form_ttl: config.contact.form_ttl.into(),
        };

        let theme = ThemeFeatureConfig {
            default_theme: config.theme.default,
        };

        Ok(Self {
            delivery,
            contact,
            theme,
        })
    }

    pub fn delivery(&self) -> anyhow::Result<Delivery> {
        Delivery::new(self.delivery.clone())
    }

    pub fn contact_feature(&self) -> anyhow::Result<ContactFeature> {
        Ok(ContactFeature::new(self.delivery()?, self.contact.clone()))
    }

    pub fn theme_feature(&self) -> ThemeFeature {
        ThemeFeature::new(ThemeRepo::default(), self.theme)
    }

    pub fn rest_server(&self) -> anyhow::Result<RestServer> {
        Ok(RestServer::new(
            self.contact_feature()?,
            self.theme_feature(),
        ))
    }
}
