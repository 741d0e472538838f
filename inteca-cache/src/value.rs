//! Cached values.

use inteca_types::{BlogPost, ContactSubmission, ContentDocument};

/// The value held by a cache entry, tagged by resource shape.
///
/// The variant always matches the key's kind (`Content` keys hold `Content`
/// values, and so on); the registry itself does not enforce this — the
/// coordinator is the only writer and keeps the pairing by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Content(ContentDocument),
    Posts(Vec<BlogPost>),
    Submissions(Vec<ContactSubmission>),
}

impl CachedValue {
    /// Returns the content document, if this is a content value.
    #[must_use]
    pub fn as_content(&self) -> Option<&ContentDocument> {
        match self {
            CachedValue::Content(doc) => Some(doc),
            _ => None,
        }
    }

    /// Returns the post list, if this is a posts value.
    #[must_use]
    pub fn as_posts(&self) -> Option<&[BlogPost]> {
        match self {
            CachedValue::Posts(posts) => Some(posts),
            _ => None,
        }
    }

    /// Returns the submission list, if this is a submissions value.
    #[must_use]
    pub fn as_submissions(&self) -> Option<&[ContactSubmission]> {
        match self {
            CachedValue::Submissions(subs) => Some(subs),
            _ => None,
        }
    }
}
