use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use siscotek_core_contact_contracts::{
    ContactFeatureService, ContactFormNotFoundError, ContactOpenFormError, ContactSubmitError,
    ContactSubmitResult, SubmitOutcome,
};
use siscotek_models::contact::{ContactField, ContactFormId};

use super::{error, internal_server_error};
use crate::{
    extractors::{ApiJson, ApiPath},
    models::contact::{ApiContactForm, ApiContactFormInvalid, ApiFieldValue},
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact/forms", routing::post(open_form))
        .route(
            "/contact/forms/:form_id",
            routing::get(get_form).delete(close_form),
        )
        .route(
            "/contact/forms/:form_id/fields/:field",
            routing::put(update_field),
        )
        .route("/contact/forms/:form_id/submit", routing::post(submit))
        .with_state(service)
}

async fn open_form(service: State<Arc<impl ContactFeatureService>>) -> Response {
    match service.open_form().await {
        Ok(form) => Json(ApiContactForm::from(form)).into_response(),
        Err(ContactOpenFormError::TooManyForms) => error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Too many open contact forms",
        ),
    }
}

async fn get_form(
    service: State<Arc<impl ContactFeatureService>>,
    ApiPath(form_id): ApiPath<ContactFormId>,
) -> Response {
    match service.get_form(form_id).await {
        Ok(form) => Json(ApiContactForm::from(form)).into_response(),
        Err(ContactFormNotFoundError) => form_not_found(),
    }
}

async fn update_field(
    service: State<Arc<impl ContactFeatureService>>,
    ApiPath((form_id, field)): ApiPath<(ContactFormId, String)>,
    ApiJson(ApiFieldValue { value }): ApiJson<ApiFieldValue>,
) -> Response {
    let Ok(field) = field.parse::<ContactField>() else {
        return error(StatusCode::BAD_REQUEST, "Unknown contact form field");
    };

    match service.update_field(form_id, field, value).await {
        Ok(form) => Json(ApiContactForm::from(form)).into_response(),
        Err(ContactFormNotFoundError) => form_not_found(),
    }
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    ApiPath(form_id): ApiPath<ContactFormId>,
) -> Response {
    match service.submit(form_id).await {
        // A failed delivery is only logged, the form keeps its values.
        Ok(ContactSubmitResult {
            outcome: SubmitOutcome::Sent | SubmitOutcome::Failed,
            form,
        }) => Json(ApiContactForm::from(form)).into_response(),
        Ok(ContactSubmitResult {
            outcome: SubmitOutcome::Invalid(errors),
            ..
        }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiContactFormInvalid {
                detail: "Invalid contact form",
                errors: (&errors).into(),
            }),
        )
            .into_response(),
        Ok(ContactSubmitResult {
            outcome: SubmitOutcome::Busy,
            ..
        }) => error(StatusCode::CONFLICT, "Submission already in progress"),
        Err(ContactSubmitError::NotFound) => form_not_found(),
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

async fn close_form(
    service: State<Arc<impl ContactFeatureService>>,
    ApiPath(form_id): ApiPath<ContactFormId>,
) -> Response {
    if service.close_form(form_id).await {
        Json(true).into_response()
    } else {
        form_not_found()
    }
}

fn form_not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Contact form not found")
}
