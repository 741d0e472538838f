//! Contact-form submissions.
//!
//! Submissions are created write-only from the public surface and managed
//! (status changes, deletion) from the administrative surface. Status
//! transitions are deliberately unordered: any status may follow any other.

use crate::{SubmissionId, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a submission in the admin inbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Read => "read",
            SubmissionStatus::Replied => "replied",
            SubmissionStatus::Archived => "archived",
        };
        f.write_str(s)
    }
}

/// What a public visitor types into the contact form.
///
/// Validated before any store call; a rejected form never creates a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Checks required fields and the email shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Missing("email"));
        }
        if !plausible_email(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::Missing("message"));
        }
        if self.message.chars().count() > 5000 {
            return Err(ValidationError::TooLong {
                field: "message",
                max: 5000,
            });
        }
        Ok(())
    }
}

/// Minimal shape check: nonempty local part, nonempty domain with a dot.
/// Real verification happens when someone replies to the address.
fn plausible_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Builds a submission from a validated form.
    ///
    /// The public surface always creates submissions with status `new`;
    /// there is no way for a visitor to set anything else.
    #[must_use]
    pub fn from_form(form: ContactForm) -> Self {
        let now = Utc::now();
        Self {
            id: SubmissionId::new(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            message: form.message,
            status: SubmissionStatus::New,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with the status changed and `updated_at` bumped.
    #[must_use]
    pub fn with_status(&self, status: SubmissionStatus) -> Self {
        let mut sub = self.clone();
        sub.status = status;
        sub.updated_at = Utc::now();
        sub
    }
}
