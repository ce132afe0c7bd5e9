use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use siscotek_delivery_contracts::{DeliveryError, DeliveryRequest, DeliveryService};
use siscotek_models::contact::ContactMessage;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

pub mod http;

/// https://www.emailjs.com/docs/rest-api/send/
const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsDeliveryServiceImpl {
    config: EmailJsDeliveryServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsDeliveryServiceConfig {
    send_endpoint: Arc<Url>,
    access_token: Option<Arc<str>>,
}

impl EmailJsDeliveryServiceConfig {
    pub fn new(
        send_endpoint_override: Option<Url>,
        access_token: Option<String>,
    ) -> anyhow::Result<Self> {
        let send_endpoint = match send_endpoint_override {
            Some(url) => url,
            None => SEND_ENDPOINT
                .parse()
                .context("Failed to parse default EmailJS endpoint")?,
        };

        Ok(Self {
            send_endpoint: send_endpoint.into(),
            access_token: access_token.map(Into::into),
        })
    }

    pub fn send_endpoint(&self) -> &Url {
        &self.send_endpoint
    }
}

impl EmailJsDeliveryServiceImpl {
    pub fn new(config: EmailJsDeliveryServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            http: HttpClient::new()?,
        })
    }
}

impl DeliveryService for EmailJsDeliveryServiceImpl {
    #[tracing::instrument(skip_all, fields(service_id = %request.service_id, template_id = %request.template_id))]
    async fn send(&self, request: DeliveryRequest) -> Result<(), DeliveryError> {
        let body = SendRequest {
            service_id: &request.service_id,
            template_id: &request.template_id,
            user_id: &request.account_id,
            template_params: &request.params,
            access_token: self.config.access_token.as_deref(),
        };

        let response = self
            .http
            .post((*self.config.send_endpoint).clone())
            .json(&body)
            .send()
            .await
            .context("Failed to send request to the delivery service")?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "message accepted by the delivery service");
            return Ok(());
        }

        let reason = response
            .text()
            .await
            .context("Failed to read the delivery service's response")?;

        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactMessage,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}
