use std::future::Future;

use siscotek_models::contact::{
    ContactField, ContactFormErrors, ContactFormId, ContactFormSnapshot,
};
use thiserror::Error;

/// Hosts the contact forms of all current page visits.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Open a new, empty contact form.
    fn open_form(
        &self,
    ) -> impl Future<Output = Result<ContactFormSnapshot, ContactOpenFormError>> + Send;

    fn get_form(
        &self,
        id: ContactFormId,
    ) -> impl Future<Output = Result<ContactFormSnapshot, ContactFormNotFoundError>> + Send;

    /// Store the raw input of one field.
    fn update_field(
        &self,
        id: ContactFormId,
        field: ContactField,
        value: String,
    ) -> impl Future<Output = Result<ContactFormSnapshot, ContactFormNotFoundError>> + Send;

    /// Validate the form and, if it is valid, hand it to the delivery service.
    fn submit(
        &self,
        id: ContactFormId,
    ) -> impl Future<Output = Result<ContactSubmitResult, ContactSubmitError>> + Send;

    /// Discard the form. Returns `false` if no such form was open.
    fn close_form(&self, id: ContactFormId) -> impl Future<Output = bool> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The message was delivered and the form has been reset.
    Sent,
    /// At least one field is invalid. Nothing was sent.
    Invalid(ContactFormErrors),
    /// The delivery service failed. The draft is kept so the user can retry.
    Failed,
    /// Another submission of this form is still in progress. Nothing was sent.
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmitResult {
    pub outcome: SubmitOutcome,
    pub form: ContactFormSnapshot,
}

#[derive(Debug, Error)]
pub enum ContactOpenFormError {
    #[error("Too many contact forms are open.")]
    TooManyForms,
}

#[derive(Debug, Error)]
#[error("Contact form not found.")]
pub struct ContactFormNotFoundError;

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Contact form not found.")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_open_form(
        mut self,
        result: Result<ContactFormSnapshot, ContactOpenFormError>,
    ) -> Self {
        self.expect_open_form()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_get_form(
        mut self,
        id: ContactFormId,
        result: Result<ContactFormSnapshot, ContactFormNotFoundError>,
    ) -> Self {
        self.expect_get_form()
            .once()
            .with(mockall::predicate::eq(id))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_update_field(
        mut self,
        id: ContactFormId,
        field: ContactField,
        value: String,
        result: Result<ContactFormSnapshot, ContactFormNotFoundError>,
    ) -> Self {
        self.expect_update_field()
            .once()
            .with(
                mockall::predicate::eq(id),
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_submit(
        mut self,
        id: ContactFormId,
        result: Result<ContactSubmitResult, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(id))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_close_form(mut self, id: ContactFormId, result: bool) -> Self {
        self.expect_close_form()
            .once()
            .with(mockall::predicate::eq(id))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
