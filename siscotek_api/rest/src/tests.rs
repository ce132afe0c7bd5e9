use axum::{
    body::Body,
    http::{self, Method, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use siscotek_core_contact_contracts::{
    ContactFormNotFoundError, ContactOpenFormError, ContactSubmitError, ContactSubmitResult,
    MockContactFeatureService, SubmitOutcome,
};
use siscotek_core_theme_contracts::MockThemeFeatureService;
use siscotek_demo::{JOHN, SHORT_FIRST_NAME, UUID1};
use siscotek_models::{
    contact::{
        ContactDraft, ContactField, ContactFieldError, ContactFormErrors, ContactFormSnapshot,
    },
    theme::Theme,
};
use tower::ServiceExt;

use crate::{middlewares::request_id::REQUEST_ID_HEADER, RestServer};

const FORM_PATH: &str = "/contact/forms/eb1cd87a-4475-4d68-a2c2-0216bdaac8f7";

struct TestResponse {
    status: StatusCode,
    request_id: Option<String>,
    body: Value,
}

async fn call(
    contact: MockContactFeatureService,
    theme: MockThemeFeatureService,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> TestResponse {
    let router = RestServer::new(contact, theme).router();

    let request = http::Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(match body {
            Some(body) => Body::from(serde_json::to_vec(&body).unwrap()),
            None => Body::empty(),
        })
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .map(|value| value.to_str().unwrap().to_owned());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        request_id,
        body,
    }
}

fn snapshot(draft: ContactDraft, errors: ContactFormErrors) -> ContactFormSnapshot {
    ContactFormSnapshot {
        id: UUID1.into(),
        draft,
        errors,
        submitting: false,
    }
}

fn short_first_name_errors() -> ContactFormErrors {
    let too_short = ContactFieldError::TooShort { min: 3 };
    [(ContactField::FirstName, too_short)].into_iter().collect()
}

#[tokio::test]
async fn open_form() {
    // Arrange
    let contact = MockContactFeatureService::new()
        .with_open_form(Ok(snapshot(ContactDraft::default(), Default::default())));

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::POST,
        "/contact/forms",
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "id": "eb1cd87a-4475-4d68-a2c2-0216bdaac8f7",
            "values": {
                "firstName": "",
                "lastName": "",
                "email": "",
                "phone": "",
                "message": "",
            },
            "errors": {},
            "submitting": false,
        })
    );
}

#[tokio::test]
async fn open_form_too_many() {
    // Arrange
    let contact =
        MockContactFeatureService::new().with_open_form(Err(ContactOpenFormError::TooManyForms));

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::POST,
        "/contact/forms",
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.body,
        json!({"detail": "Too many open contact forms"})
    );
}

#[tokio::test]
async fn get_form() {
    // Arrange
    let contact = MockContactFeatureService::new().with_get_form(
        UUID1.into(),
        Ok(snapshot(JOHN.draft.clone(), Default::default())),
    );

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::GET,
        FORM_PATH,
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["values"]["firstName"], "John");
    assert_eq!(response.body["values"]["email"], "john@x.com");
}

#[tokio::test]
async fn get_form_not_found() {
    // Arrange
    let contact = MockContactFeatureService::new()
        .with_get_form(UUID1.into(), Err(ContactFormNotFoundError));

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::GET,
        FORM_PATH,
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({"detail": "Contact form not found"}));
}

#[tokio::test]
async fn get_form_malformed_id() {
    // Act
    let response = call(
        MockContactFeatureService::new(),
        MockThemeFeatureService::new(),
        Method::GET,
        "/contact/forms/not-a-uuid",
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({"detail": "Invalid path parameters"}));
}

#[tokio::test]
async fn update_field() {
    // Arrange
    let contact = MockContactFeatureService::new().with_update_field(
        UUID1.into(),
        ContactField::FirstName,
        "Jo".into(),
        Ok(snapshot(
            ContactDraft {
                first_name: "Jo".into(),
                ..Default::default()
            },
            short_first_name_errors(),
        )),
    );

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::PUT,
        &format!("{FORM_PATH}/fields/firstName"),
        Some(json!({"value": "Jo"})),
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["values"]["firstName"], "Jo");
    assert_eq!(
        response.body["errors"],
        json!({"firstName": "First Name must be at least 3 characters."})
    );
}

#[tokio::test]
async fn update_field_unknown_field() {
    // Act
    let response = call(
        MockContactFeatureService::new(),
        MockThemeFeatureService::new(),
        Method::PUT,
        &format!("{FORM_PATH}/fields/subject"),
        Some(json!({"value": "Hello"})),
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({"detail": "Unknown contact form field"})
    );
}

#[tokio::test]
async fn update_field_malformed_body() {
    for body in [json!({"val": "Hello"}), json!({"value": 7}), json!("Hello")] {
        // Act
        let response = call(
            MockContactFeatureService::new(),
            MockThemeFeatureService::new(),
            Method::PUT,
            &format!("{FORM_PATH}/fields/firstName"),
            Some(body),
        )
        .await;

        // Assert
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.body, json!({"detail": "Invalid request body"}));
    }
}

#[tokio::test]
async fn update_field_body_not_json() {
    // Arrange
    let contact = MockContactFeatureService::new();
    let router = RestServer::new(contact, MockThemeFeatureService::new()).router();
    let request = http::Request::builder()
        .method(Method::PUT)
        .uri(format!("{FORM_PATH}/fields/firstName"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"value\":"))
        .unwrap();

    // Act
    let response = router.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice::<Value>(&bytes).unwrap();
    assert_eq!(body, json!({"detail": "Invalid request body"}));
}

#[tokio::test]
async fn update_field_not_found() {
    // Arrange
    let contact = MockContactFeatureService::new().with_update_field(
        UUID1.into(),
        ContactField::Phone,
        "1234567890".into(),
        Err(ContactFormNotFoundError),
    );

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::PUT,
        &format!("{FORM_PATH}/fields/phone"),
        Some(json!({"value": "1234567890"})),
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_sent() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        UUID1.into(),
        Ok(ContactSubmitResult {
            outcome: SubmitOutcome::Sent,
            form: snapshot(ContactDraft::default(), Default::default()),
        }),
    );

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::POST,
        &format!("{FORM_PATH}/submit"),
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["values"]["message"], "");
    assert_eq!(response.body["submitting"], false);
}

#[tokio::test]
async fn submit_failed_looks_like_idle_form() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        UUID1.into(),
        Ok(ContactSubmitResult {
            outcome: SubmitOutcome::Failed,
            form: snapshot(JOHN.draft.clone(), Default::default()),
        }),
    );

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::POST,
        &format!("{FORM_PATH}/submit"),
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["values"]["firstName"], "John");
    assert_eq!(response.body["errors"], json!({}));
}

#[tokio::test]
async fn submit_invalid() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        UUID1.into(),
        Ok(ContactSubmitResult {
            outcome: SubmitOutcome::Invalid(short_first_name_errors()),
            form: snapshot(SHORT_FIRST_NAME.clone(), short_first_name_errors()),
        }),
    );

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::POST,
        &format!("{FORM_PATH}/submit"),
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body,
        json!({
            "detail": "Invalid contact form",
            "errors": {"firstName": "First Name must be at least 3 characters."},
        })
    );
}

#[tokio::test]
async fn submit_busy() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        UUID1.into(),
        Ok(ContactSubmitResult {
            outcome: SubmitOutcome::Busy,
            form: ContactFormSnapshot {
                submitting: true,
                ..snapshot(JOHN.draft.clone(), Default::default())
            },
        }),
    );

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::POST,
        &format!("{FORM_PATH}/submit"),
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.body,
        json!({"detail": "Submission already in progress"})
    );
}

#[tokio::test]
async fn submit_not_found() {
    // Arrange
    let contact = MockContactFeatureService::new()
        .with_submit(UUID1.into(), Err(ContactSubmitError::NotFound));

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::POST,
        &format!("{FORM_PATH}/submit"),
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_internal_error() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        UUID1.into(),
        Err(ContactSubmitError::Other(anyhow::anyhow!("task panicked"))),
    );

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::POST,
        &format!("{FORM_PATH}/submit"),
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"detail": "Internal server error"}));
}

#[tokio::test]
async fn close_form() {
    // Arrange
    let contact = MockContactFeatureService::new().with_close_form(UUID1.into(), true);

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::DELETE,
        FORM_PATH,
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!(true));
}

#[tokio::test]
async fn close_form_not_found() {
    // Arrange
    let contact = MockContactFeatureService::new().with_close_form(UUID1.into(), false);

    // Act
    let response = call(
        contact,
        MockThemeFeatureService::new(),
        Method::DELETE,
        FORM_PATH,
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_theme() {
    // Arrange
    let theme = MockThemeFeatureService::new().with_get_theme(Theme::Dark);

    // Act
    let response = call(
        MockContactFeatureService::new(),
        theme,
        Method::GET,
        "/theme",
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("dark"));
}

#[tokio::test]
async fn set_theme() {
    // Arrange
    let theme = MockThemeFeatureService::new().with_set_theme(Theme::Light);

    // Act
    let response = call(
        MockContactFeatureService::new(),
        theme,
        Method::PUT,
        "/theme",
        Some(json!("light")),
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("light"));
}

#[tokio::test]
async fn set_theme_invalid() {
    // Act
    let response = call(
        MockContactFeatureService::new(),
        MockThemeFeatureService::new(),
        Method::PUT,
        "/theme",
        Some(json!("sepia")),
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body, json!({"detail": "Invalid request body"}));
}

#[tokio::test]
async fn toggle_theme() {
    // Arrange
    let theme = MockThemeFeatureService::new().with_toggle_theme(Theme::Light);

    // Act
    let response = call(
        MockContactFeatureService::new(),
        theme,
        Method::POST,
        "/theme/toggle",
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!("light"));
}

#[tokio::test]
async fn get_theme_error() {
    // Arrange
    let mut theme = MockThemeFeatureService::new();
    let err = anyhow::anyhow!("storage unavailable");
    theme
        .expect_get_theme()
        .once()
        .return_once(|| Box::pin(std::future::ready(Err(err))));

    // Act
    let response = call(
        MockContactFeatureService::new(),
        theme,
        Method::GET,
        "/theme",
        None,
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn method_not_allowed() {
    // Act
    let response = call(
        MockContactFeatureService::new(),
        MockThemeFeatureService::new(),
        Method::PATCH,
        "/theme",
        Some(json!("light")),
    )
    .await;

    // Assert
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body, json!({"detail": "Method not allowed"}));
}

#[tokio::test]
async fn responses_carry_request_id() {
    // Act
    let first = call(
        MockContactFeatureService::new(),
        MockThemeFeatureService::new(),
        Method::GET,
        "/does-not-exist",
        None,
    )
    .await;
    let second = call(
        MockContactFeatureService::new(),
        MockThemeFeatureService::new(),
        Method::PUT,
        &format!("{FORM_PATH}/fields/subject"),
        Some(json!({"value": ""})),
    )
    .await;

    // Assert
    assert_eq!(first.status, StatusCode::NOT_FOUND);
    assert_eq!(first.body, json!({"detail": "Not found"}));
    let first_id = first.request_id.unwrap();
    let second_id = second.request_id.unwrap();
    assert_eq!(first_id.len(), 22);
    assert_ne!(first_id, second_id);
}
