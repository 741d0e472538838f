//! Logical resource kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three logical tables the platform stores content in.
///
/// The same kind names the remote table and the local fallback key space,
/// so the two key spaces mirror each other one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Per-locale page content documents.
    SiteContent,
    /// Blog posts, independent per locale.
    BlogPosts,
    /// Contact-form submissions.
    ContactSubmissions,
}

impl ResourceKind {
    /// Returns the table name used on the wire and in fallback keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::SiteContent => "site_content",
            ResourceKind::BlogPosts => "blog_posts",
            ResourceKind::ContactSubmissions => "contact_submissions",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
