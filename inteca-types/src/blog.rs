//! Blog post records.

use crate::{Locale, PostId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A blog post, authored independently per locale.
///
/// The `id` is immutable once assigned. The same conceptual article written
/// for two locales is two distinct posts with two distinct ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: PostId,
    pub locale: Locale,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Rich text body (sanitized HTML).
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    pub publish_date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Pinned to the top of the public listing.
    #[serde(default)]
    pub featured: bool,
    /// Drafts stay invisible on the public surface.
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl BlogPost {
    /// Creates a new post with a fresh id, published by default.
    #[must_use]
    pub fn new(locale: Locale, title: impl Into<String>, publish_date: NaiveDate) -> Self {
        Self {
            id: PostId::new(),
            locale,
            title: title.into(),
            excerpt: String::new(),
            content: String::new(),
            author: String::new(),
            publish_date,
            tags: Vec::new(),
            cover_image: None,
            featured: false,
            published: true,
        }
    }

    /// Validates editor input before any store call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Missing("title"));
        }
        if self.title.chars().count() > 300 {
            return Err(ValidationError::TooLong {
                field: "title",
                max: 300,
            });
        }
        Ok(())
    }
}
