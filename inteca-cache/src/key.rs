//! Cache keys.

use inteca_types::Locale;
use std::fmt;

/// Identifies one cache entry: resource kind plus locale where the resource
/// is locale-partitioned.
///
/// Blog posts are cached as one list entry per locale; a single post is
/// addressed inside its list, and the list key is the "broader key" that
/// gets invalidated when any one post changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The content document for a locale.
    Content(Locale),
    /// The blog post list for a locale.
    Posts(Locale),
    /// The contact submission inbox (admin surface, not locale-partitioned).
    Submissions,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Content(locale) => write!(f, "content:{locale}"),
            CacheKey::Posts(locale) => write!(f, "posts:{locale}"),
            CacheKey::Submissions => f.write_str("submissions"),
        }
    }
}
