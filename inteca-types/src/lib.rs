//! Core type definitions for the iNTECA content platform.
//!
//! This crate defines the domain model shared by the storage, remote-adapter
//! and synchronization crates:
//! - Locale tags (closed set of three languages)
//! - Post and submission identifiers (UUID v7)
//! - Per-locale content documents with a typed section schema and
//!   shallow-merge patch semantics
//! - Blog posts and contact submissions
//! - Caller-side validation, rejected before any store call
//!
//! Nothing in here performs I/O. The remote and fallback stores both speak
//! these types, so the merge contract lives in exactly one place.

mod blog;
mod contact;
mod content;
mod ids;
mod kind;
mod locale;

pub use blog::BlogPost;
pub use contact::{ContactForm, ContactSubmission, SubmissionStatus};
pub use content::{
    AboutSection, BenefitItem, BenefitsSection, ContactsSection, ContentDocument, ContentPatch,
    CourseCard, CoursesSection, FooterSection, FounderSection, HeroSection, Sections, SocialLink,
};
pub use ids::{PostId, SubmissionId};
pub use kind::ResourceKind;
pub use locale::Locale;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

/// A caller-side validation failure.
///
/// Raised before any remote or fallback store call is attempted, so a
/// rejected input never produces a partial write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty or missing.
    #[error("missing required field: {0}")]
    Missing(&'static str),

    /// The email address does not have a plausible shape.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A field exceeded its maximum length.
    #[error("field {field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
}
