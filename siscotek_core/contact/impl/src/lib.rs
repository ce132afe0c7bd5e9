use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context;
use siscotek_core_contact_contracts::{
    ContactFeatureService, ContactFormNotFoundError, ContactOpenFormError, ContactSubmitError,
    ContactSubmitResult,
};
use siscotek_delivery_contracts::DeliveryService;
use siscotek_models::contact::{ContactField, ContactFormId, ContactFormSnapshot};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::controller::ContactFormController;

pub mod controller;

#[derive(Debug)]
pub struct ContactFeatureServiceImpl<Delivery> {
    delivery: Arc<Delivery>,
    config: ContactFeatureConfig,
    state: Arc<State<Delivery>>,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub delivery: Arc<DeliveryIdentifiers>,
    /// Maximum number of contact forms that may be open at the same time.
    pub max_open_forms: usize,
    /// Idle forms older than this are discarded before a new form is opened.
    pub form_ttl: Duration,
}

/// The account a contact message is delivered through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryIdentifiers {
    pub service_id: String,
    pub template_id: String,
    pub account_id: String,
}

#[derive(Debug)]
struct State<Delivery> {
    forms: RwLock<HashMap<ContactFormId, Arc<ContactFormController<Delivery>>>>,
}

impl<Delivery> Default for State<Delivery> {
    fn default() -> Self {
        Self {
            forms: Default::default(),
        }
    }
}

impl<Delivery> ContactFeatureServiceImpl<Delivery> {
    pub fn new(delivery: Delivery, config: ContactFeatureConfig) -> Self {
        Self {
            delivery: Arc::new(delivery),
            config,
            state: Default::default(),
        }
    }
}

impl<Delivery> ContactFeatureServiceImpl<Delivery>
where
    Delivery: DeliveryService,
{
    async fn controller(&self, id: ContactFormId) -> Option<Arc<ContactFormController<Delivery>>> {
        self.state.forms.read().await.get(&id).map(Arc::clone)
    }
}

impl<Delivery> ContactFeatureService for ContactFeatureServiceImpl<Delivery>
where
    Delivery: DeliveryService,
{
    async fn open_form(&self) -> Result<ContactFormSnapshot, ContactOpenFormError> {
        let mut forms = self.state.forms.write().await;

        let now = Instant::now();
        let open = forms.len();
        forms.retain(|_, form| !form.is_expired(now, self.config.form_ttl));
        if forms.len() < open {
            debug!(
                discarded = open - forms.len(),
                "discarded abandoned contact forms"
            );
        }

        if forms.len() >= self.config.max_open_forms {
            warn!(
                open_forms = forms.len(),
                "refusing to open another contact form"
            );
            return Err(ContactOpenFormError::TooManyForms);
        }

        let id = ContactFormId::from(Uuid::new_v4());
        let controller = Arc::new(ContactFormController::new(
            id,
            Arc::clone(&self.delivery),
            Arc::clone(&self.config.delivery),
        ));
        let snapshot = controller.snapshot().await;
        forms.insert(id, controller);

        debug!(form_id = %*id, open_forms = forms.len(), "contact form opened");

        Ok(snapshot)
    }

    async fn get_form(
        &self,
        id: ContactFormId,
    ) -> Result<ContactFormSnapshot, ContactFormNotFoundError> {
        let controller = self.controller(id).await.ok_or(ContactFormNotFoundError)?;
        Ok(controller.snapshot().await)
    }

    async fn update_field(
        &self,
        id: ContactFormId,
        field: ContactField,
        value: String,
    ) -> Result<ContactFormSnapshot, ContactFormNotFoundError> {
        let controller = self.controller(id).await.ok_or(ContactFormNotFoundError)?;
        Ok(controller.update_field(field, value).await)
    }

    async fn submit(&self, id: ContactFormId) -> Result<ContactSubmitResult, ContactSubmitError> {
        let controller = self
            .controller(id)
            .await
            .ok_or(ContactSubmitError::NotFound)?;

        // The submission must run to completion even if the caller goes away,
        // otherwise the form would stay flagged as in progress.
        let outcome = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.submit().await }
        })
        .await
        .context("Contact form submission task failed")?;

        Ok(ContactSubmitResult {
            outcome,
            form: controller.snapshot().await,
        })
    }

    async fn close_form(&self, id: ContactFormId) -> bool {
        let removed = self.state.forms.write().await.remove(&id).is_some();
        if removed {
            debug!(form_id = %*id, "contact form closed");
        }
        removed
    }
}
