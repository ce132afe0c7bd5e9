use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use siscotek_models::contact::{
    ContactDraft, ContactField, ContactFormErrors, ContactFormId, ContactFormSnapshot,
};

#[derive(Debug, Serialize)]
pub struct ApiContactForm {
    pub id: ContactFormId,
    /// The raw input of every field
    pub values: ContactDraft,
    /// The error message of every invalid field
    pub errors: ApiContactFormErrors,
    /// Whether a submission of this form is in progress
    pub submitting: bool,
}

impl From<ContactFormSnapshot> for ApiContactForm {
    fn from(value: ContactFormSnapshot) -> Self {
        Self {
            id: value.id,
            values: value.draft,
            errors: (&value.errors).into(),
            submitting: value.submitting,
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ApiContactFormErrors(BTreeMap<ContactField, String>);

impl From<&ContactFormErrors> for ApiContactFormErrors {
    fn from(value: &ContactFormErrors) -> Self {
        Self(
            value
                .iter()
                .map(|(field, error)| (field, error.message(field)))
                .collect(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactFormInvalid {
    pub detail: &'static str,
    pub errors: ApiContactFormErrors,
}

#[derive(Debug, Deserialize)]
pub struct ApiFieldValue {
    pub value: String,
}
