use std::{collections::BTreeMap, fmt, str::FromStr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::macros::id;

id!(
    /// Identifies one open contact form, i.e. one page visit.
    ContactFormId
);

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 20;
pub const PHONE_MIN_LEN: usize = 10;
pub const MESSAGE_MIN_LEN: usize = 5;
pub const MESSAGE_MAX_LEN: usize = 800;

#[nutype(
    sanitize(trim),
    validate(len_char_min = 3, len_char_max = 20),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactFirstName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 3, len_char_max = 20),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactLastName(String);

#[nutype(
    sanitize(trim),
    validate(predicate = is_email_shaped),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

/// Phone numbers are deliberately not trimmed.
#[nutype(
    validate(len_char_min = 10),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactPhone(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 5, len_char_max = 800),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// Local part and domain of an address as commonly accepted by web forms.
/// Leading dots and consecutive dots are checked separately.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .unwrap()
});

fn is_email_shaped(s: &str) -> bool {
    !s.starts_with('.') && !s.contains("..") && EMAIL_REGEX.is_match(s)
}

/// A contact message in which every field satisfies its constraint.
///
/// This is also the payload handed to the delivery service, so the field
/// names on the wire match the ones of [`ContactDraft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub first_name: ContactFirstName,
    pub last_name: ContactLastName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
    pub message: ContactMessageContent,
}

impl From<ContactMessage> for ContactDraft {
    fn from(value: ContactMessage) -> Self {
        Self {
            first_name: value.first_name.into_inner(),
            last_name: value.last_name.into_inner(),
            email: value.email.into_inner(),
            phone: value.phone.into_inner(),
            message: value.message.into_inner(),
        }
    }
}

/// The raw, possibly invalid input of a contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactDraft {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validates a single field of the draft.
    pub fn validate_field(&self, field: ContactField) -> Option<ContactFieldError> {
        let value = self.get(field).to_owned();
        match field {
            ContactField::FirstName => ContactFirstName::try_new(value).err().map(Into::into),
            ContactField::LastName => ContactLastName::try_new(value).err().map(Into::into),
            ContactField::Email => ContactEmail::try_new(value).err().map(Into::into),
            ContactField::Phone => ContactPhone::try_new(value).err().map(Into::into),
            ContactField::Message => ContactMessageContent::try_new(value).err().map(Into::into),
        }
    }

    /// Validates the whole draft.
    ///
    /// Either every field is valid and the validated [`ContactMessage`] is
    /// returned, or the errors of all invalid fields are returned.
    pub fn validate(&self) -> Result<ContactMessage, ContactFormErrors> {
        let mut errors = ContactFormErrors::default();

        let first_name = ContactFirstName::try_new(self.first_name.clone())
            .map_err(|err| errors.set(ContactField::FirstName, Some(err.into())))
            .ok();
        let last_name = ContactLastName::try_new(self.last_name.clone())
            .map_err(|err| errors.set(ContactField::LastName, Some(err.into())))
            .ok();
        let email = ContactEmail::try_new(self.email.clone())
            .map_err(|err| errors.set(ContactField::Email, Some(err.into())))
            .ok();
        let phone = ContactPhone::try_new(self.phone.clone())
            .map_err(|err| errors.set(ContactField::Phone, Some(err.into())))
            .ok();
        let message = ContactMessageContent::try_new(self.message.clone())
            .map_err(|err| errors.set(ContactField::Message, Some(err.into())))
            .ok();

        match (first_name, last_name, email, phone, message) {
            (Some(first_name), Some(last_name), Some(email), Some(phone), Some(message)) => {
                Ok(ContactMessage {
                    first_name,
                    last_name,
                    email,
                    phone,
                    message,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Message,
    ];

    /// The name used on the wire and in the delivery payload.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }

    /// The human readable name shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown contact form field: {0:?}")]
pub struct UnknownContactFieldError(pub String);

impl FromStr for ContactField {
    type Err = UnknownContactFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownContactFieldError(s.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContactFieldError {
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidEmail,
}

impl ContactFieldError {
    /// The message displayed next to the offending input.
    pub fn message(self, field: ContactField) -> String {
        match (self, field) {
            (Self::InvalidEmail, _) => "Invalid email address.".into(),
            (Self::TooShort { min }, ContactField::Phone) => {
                format!("Phone number must be at least {min} digits.")
            }
            (Self::TooShort { min }, field) => {
                format!("{} must be at least {min} characters.", field.label())
            }
            (Self::TooLong { max }, field) => {
                format!("{} cannot exceed {max} characters.", field.label())
            }
        }
    }
}

impl From<ContactFirstNameError> for ContactFieldError {
    fn from(value: ContactFirstNameError) -> Self {
        match value {
            ContactFirstNameError::LenCharMinViolated => Self::TooShort { min: NAME_MIN_LEN },
            ContactFirstNameError::LenCharMaxViolated => Self::TooLong { max: NAME_MAX_LEN },
        }
    }
}

impl From<ContactLastNameError> for ContactFieldError {
    fn from(value: ContactLastNameError) -> Self {
        match value {
            ContactLastNameError::LenCharMinViolated => Self::TooShort { min: NAME_MIN_LEN },
            ContactLastNameError::LenCharMaxViolated => Self::TooLong { max: NAME_MAX_LEN },
        }
    }
}

impl From<ContactEmailError> for ContactFieldError {
    fn from(value: ContactEmailError) -> Self {
        match value {
            ContactEmailError::PredicateViolated => Self::InvalidEmail,
        }
    }
}

impl From<ContactPhoneError> for ContactFieldError {
    fn from(value: ContactPhoneError) -> Self {
        match value {
            ContactPhoneError::LenCharMinViolated => Self::TooShort { min: PHONE_MIN_LEN },
        }
    }
}

impl From<ContactMessageContentError> for ContactFieldError {
    fn from(value: ContactMessageContentError) -> Self {
        match value {
            ContactMessageContentError::LenCharMinViolated => Self::TooShort {
                min: MESSAGE_MIN_LEN,
            },
            ContactMessageContentError::LenCharMaxViolated => Self::TooLong {
                max: MESSAGE_MAX_LEN,
            },
        }
    }
}

/// Maps each invalid field to its error. Empty if the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormErrors(BTreeMap<ContactField, ContactFieldError>);

impl ContactFormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ContactField) -> Option<ContactFieldError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.0.contains_key(&field)
    }

    /// Sets or clears the error of `field`.
    pub fn set(&mut self, field: ContactField, error: Option<ContactFieldError>) {
        match error {
            Some(error) => self.0.insert(field, error),
            None => self.0.remove(&field),
        };
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, ContactFieldError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }
}

impl FromIterator<(ContactField, ContactFieldError)> for ContactFormErrors {
    fn from_iter<T: IntoIterator<Item = (ContactField, ContactFieldError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The state of a contact form as a page would render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormSnapshot {
    pub id: ContactFormId,
    pub draft: ContactDraft,
    pub errors: ContactFormErrors,
    pub submitting: bool,
}
