use std::future::Future;

use siscotek_models::contact::ContactMessage;
use thiserror::Error;

/// Hands a validated contact message to an external email delivery service.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait DeliveryService: Send + Sync + 'static {
    fn send(
        &self,
        request: DeliveryRequest,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub service_id: String,
    pub template_id: String,
    pub account_id: String,
    /// The template parameters, keyed by the contact form's field names.
    pub params: ContactMessage,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("The delivery service rejected the message with status {status}: {reason}")]
    Rejected { status: u16, reason: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockDeliveryService {
    pub fn with_send(
        mut self,
        request: DeliveryRequest,
        result: Result<(), DeliveryError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
