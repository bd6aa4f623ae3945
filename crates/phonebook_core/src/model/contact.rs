//! Contact domain model.
//!
//! # Responsibility
//! - Define the persisted `Contact` row and the `ContactDraft` input shape.
//! - Own the presence-of-text validation applied before every write.
//!
//! # Invariants
//! - `name` and `phone` always carry text; `email` may be empty.
//! - Field values are stored exactly as entered.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate key (`contacts.id`).
pub type ContactId = i64;

/// One persisted address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Auto-incremented row id, never reused by SQLite `AUTOINCREMENT`.
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    /// Empty when the contact has no email.
    pub email: String,
}

impl Contact {
    /// Renders the single-line list form: `name - phone (email)`.
    ///
    /// The email suffix is omitted when `email` is empty.
    pub fn display_line(&self) -> String {
        let mut line = format!("{} - {}", self.name, self.phone);
        if !self.email.is_empty() {
            line.push_str(&format!(" ({})", self.email));
        }
        line
    }

    /// Returns the editable field values of this contact.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

/// User-supplied field values for add and full-overwrite edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Checks the required fields are non-empty.
    ///
    /// Any text counts, including whitespace.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if self.phone.is_empty() {
            return Err(ContactValidationError::EmptyPhone);
        }
        Ok(())
    }
}

/// Required field missing on a contact write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    EmptyName,
    EmptyPhone,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name must not be empty"),
            Self::EmptyPhone => write!(f, "contact phone must not be empty"),
        }
    }
}

impl Error for ContactValidationError {}

#[cfg(test)]
mod tests {
    use super::{Contact, ContactDraft, ContactValidationError};

    fn contact(email: &str) -> Contact {
        Contact {
            id: 1,
            name: "Alice".to_string(),
            phone: "555-1000".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn display_line_omits_empty_email() {
        assert_eq!(contact("").display_line(), "Alice - 555-1000");
    }

    #[test]
    fn display_line_appends_email_in_parentheses() {
        assert_eq!(
            contact("a@x.com").display_line(),
            "Alice - 555-1000 (a@x.com)"
        );
    }

    #[test]
    fn validate_requires_name_then_phone() {
        assert_eq!(
            ContactDraft::new("", "", "").validate(),
            Err(ContactValidationError::EmptyName)
        );
        assert_eq!(
            ContactDraft::new("Bob", "", "").validate(),
            Err(ContactValidationError::EmptyPhone)
        );
        assert!(ContactDraft::new("Bob", "1", "").validate().is_ok());
    }

    #[test]
    fn whitespace_counts_as_text() {
        assert!(ContactDraft::new(" ", "555", "").validate().is_ok());
        assert!(ContactDraft::new("Bob", "  ", "").validate().is_ok());
    }

    #[test]
    fn to_draft_copies_all_fields() {
        let draft = contact("a@x.com").to_draft();
        assert_eq!(draft, ContactDraft::new("Alice", "555-1000", "a@x.com"));
    }
}
