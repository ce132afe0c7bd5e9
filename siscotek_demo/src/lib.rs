use std::sync::LazyLock;

use siscotek_models::contact::{ContactDraft, ContactMessage};
use uuid::{uuid, Uuid};

pub const UUID1: Uuid = uuid!("eb1cd87a-4475-4d68-a2c2-0216bdaac8f7");

pub const SERVICE_ID: &str = "service_siscotek";
pub const TEMPLATE_ID: &str = "template_contact";
pub const ACCOUNT_ID: &str = "public_key_siscotek";

pub struct DemoContact {
    pub draft: ContactDraft,
    pub message: ContactMessage,
}

impl DemoContact {
    fn new(draft: ContactDraft) -> Self {
        let message = draft.validate().unwrap();
        Self { draft, message }
    }
}

pub static JOHN: LazyLock<DemoContact> = LazyLock::new(|| {
    DemoContact::new(ContactDraft {
        first_name: "John".into(),
        last_name: "Smith".into(),
        email: "john@x.com".into(),
        phone: "1234567890".into(),
        message: "Hello there".into(),
    })
});

pub static JANE: LazyLock<DemoContact> = LazyLock::new(|| {
    DemoContact::new(ContactDraft {
        first_name: "Jane".into(),
        last_name: "Doe-Miller".into(),
        email: "jane.doe@example.org".into(),
        phone: "+49 170 1234567".into(),
        message: "We would like to hear more about your services.".into(),
    })
});

/// First name is one character short of the minimum.
pub static SHORT_FIRST_NAME: LazyLock<ContactDraft> = LazyLock::new(|| ContactDraft {
    first_name: "Jo".into(),
    ..JOHN.draft.clone()
});

pub static INVALID_EMAIL: LazyLock<ContactDraft> = LazyLock::new(|| ContactDraft {
    email: "not-an-email".into(),
    ..JOHN.draft.clone()
});
