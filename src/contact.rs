use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Contact form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn has(&self, field: ContactField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

impl ContactForm {
    /// Checks a single field against its rule, on the trimmed value.
    pub fn validate_field(&self, field: ContactField) -> Option<FieldError> {
        let (ok, message) = match field {
            ContactField::Name => (
                self.name.trim().chars().count() >= 2,
                "Name must be at least 2 characters",
            ),
            ContactField::Email => (
                is_valid_email(self.email.trim()),
                "Please enter a valid email address",
            ),
            ContactField::Subject => (
                self.subject.trim().chars().count() >= 3,
                "Subject must be at least 3 characters",
            ),
            ContactField::Message => (
                self.message.trim().chars().count() >= 10,
                "Message must be at least 10 characters",
            ),
        };

        if ok {
            None
        } else {
            Some(FieldError {
                field,
                message: message.to_string(),
            })
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = [
            ContactField::Name,
            ContactField::Email,
            ContactField::Subject,
            ContactField::Message,
        ]
        .into_iter()
        .filter_map(|field| self.validate_field(field))
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}
