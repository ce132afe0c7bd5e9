use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use siscotek_core_contact_contracts::SubmitOutcome;
use siscotek_delivery_contracts::{DeliveryRequest, DeliveryService};
use siscotek_models::contact::{
    ContactDraft, ContactField, ContactFormErrors, ContactFormId, ContactFormSnapshot,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::DeliveryIdentifiers;

/// Owns the draft, the field errors and the in-progress flag of one contact
/// form for the lifetime of one page visit.
#[derive(Debug)]
pub struct ContactFormController<Delivery> {
    id: ContactFormId,
    delivery: Arc<Delivery>,
    identifiers: Arc<DeliveryIdentifiers>,
    state: Mutex<FormState>,
}

#[derive(Debug)]
struct FormState {
    draft: ContactDraft,
    errors: ContactFormErrors,
    submitting: bool,
    /// Set by the first submit attempt, cleared again by a successful delivery.
    /// While set, edited fields are validated on change.
    submit_attempted: bool,
    last_touched: Instant,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            draft: Default::default(),
            errors: Default::default(),
            submitting: false,
            submit_attempted: false,
            last_touched: Instant::now(),
        }
    }
}

impl<Delivery> ContactFormController<Delivery>
where
    Delivery: DeliveryService,
{
    pub fn new(
        id: ContactFormId,
        delivery: Arc<Delivery>,
        identifiers: Arc<DeliveryIdentifiers>,
    ) -> Self {
        Self {
            id,
            delivery,
            identifiers,
            state: Default::default(),
        }
    }

    /// Whether nobody has looked at the form for at least `ttl`.
    ///
    /// A form with a submission in flight never expires, neither does one whose
    /// state is currently being accessed.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        let Ok(state) = self.state.try_lock() else {
            return false;
        };
        !state.submitting && now.saturating_duration_since(state.last_touched) >= ttl
    }

    pub async fn snapshot(&self) -> ContactFormSnapshot {
        let mut state = self.state.lock().await;
        state.last_touched = Instant::now();
        self.make_snapshot(&state)
    }

    pub async fn update_field(&self, field: ContactField, value: String) -> ContactFormSnapshot {
        let mut state = self.state.lock().await;
        state.last_touched = Instant::now();
        state.draft.set(field, value);

        if state.submit_attempted {
            let error = state.draft.validate_field(field);
            state.errors.set(field, error);
        }

        self.make_snapshot(&state)
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let message = {
            let mut state = self.state.lock().await;
            state.last_touched = Instant::now();
            if state.submitting {
                debug!(form_id = %*self.id, "submission already in progress");
                return SubmitOutcome::Busy;
            }

            state.submit_attempted = true;
            match state.draft.validate() {
                Ok(message) => {
                    state.errors = ContactFormErrors::default();
                    state.submitting = true;
                    message
                }
                Err(errors) => {
                    debug!(
                        form_id = %*self.id,
                        invalid_fields = errors.len(),
                        "contact form is invalid"
                    );
                    state.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        debug!(form_id = %*self.id, ?message, "submitting contact message");

        let request = DeliveryRequest {
            service_id: self.identifiers.service_id.clone(),
            template_id: self.identifiers.template_id.clone(),
            account_id: self.identifiers.account_id.clone(),
            params: message,
        };
        let result = self.delivery.send(request).await;

        let mut state = self.state.lock().await;
        state.submitting = false;
        match result {
            Ok(()) => {
                info!(form_id = %*self.id, "contact message delivered");
                *state = FormState::default();
                SubmitOutcome::Sent
            }
            Err(err) => {
                error!(form_id = %*self.id, "Failed to deliver contact message: {err}");
                SubmitOutcome::Failed
            }
        }
    }

    fn make_snapshot(&self, state: &FormState) -> ContactFormSnapshot {
        ContactFormSnapshot {
            id: self.id,
            draft: state.draft.clone(),
            errors: state.errors.clone(),
            submitting: state.submitting,
        }
    }
}
