//! Per-locale page content documents.
//!
//! A `ContentDocument` is the full tree of editable page copy for one
//! locale. Sections are a fixed, typed schema with explicit optional fields
//! rather than a loose map, so the merge operation has a precise contract:
//! a patch replaces whole sections at the top-level key and leaves absent
//! sections untouched. Nested arrays inside a section are replaced
//! wholesale, never element-merged.
//!
//! Exactly one document is current per locale. Documents are never hard
//! deleted, only reset to the seeded default.

use crate::Locale;
use serde::{Deserialize, Serialize};

/// The full page-content tree for one locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Which locale this document belongs to.
    pub locale: Locale,
    /// The named content sections.
    #[serde(default)]
    pub sections: Sections,
}

impl ContentDocument {
    /// Creates an empty document for a locale (all sections absent).
    #[must_use]
    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            sections: Sections::default(),
        }
    }

    /// The seeded default document for a locale.
    ///
    /// A minimal branded skeleton, used when the remote store has no row for
    /// the locale and no fallback copy exists. Full marketing copy is
    /// authored by editors, not shipped in code.
    #[must_use]
    pub fn seeded(locale: Locale) -> Self {
        let hero_title = match locale {
            Locale::Ru => "iNTECA — бизнес-образование",
            Locale::En => "iNTECA — business education",
            Locale::Kz => "iNTECA — бизнес-білім",
        };
        Self {
            locale,
            sections: Sections {
                hero: Some(HeroSection {
                    title: Some(hero_title.to_string()),
                    ..HeroSection::default()
                }),
                footer: Some(FooterSection {
                    tagline: Some("iNTECA".to_string()),
                    social: Vec::new(),
                }),
                ..Sections::default()
            },
        }
    }

    /// Applies a patch in place: every section present in the patch replaces
    /// the corresponding section of this document.
    pub fn apply(&mut self, patch: &ContentPatch) {
        self.sections.apply(patch);
    }

    /// Returns a copy of this document with the patch applied.
    #[must_use]
    pub fn merged(&self, patch: &ContentPatch) -> Self {
        let mut doc = self.clone();
        doc.apply(patch);
        doc
    }
}

/// The named sections of a content document.
///
/// Every field is optional: an absent section renders with component
/// defaults. This same shape doubles as the patch type — a patch is a
/// `Sections` value whose present fields win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<BenefitsSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founder: Option<FounderSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<CoursesSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<ContactsSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterSection>,
}

/// A partial content update: present sections replace, absent sections keep.
pub type ContentPatch = Sections;

impl Sections {
    /// Shallow merge at the section key: each section present in `patch`
    /// replaces ours wholesale.
    pub fn apply(&mut self, patch: &ContentPatch) {
        if let Some(hero) = &patch.hero {
            self.hero = Some(hero.clone());
        }
        if let Some(benefits) = &patch.benefits {
            self.benefits = Some(benefits.clone());
        }
        if let Some(founder) = &patch.founder {
            self.founder = Some(founder.clone());
        }
        if let Some(about) = &patch.about {
            self.about = Some(about.clone());
        }
        if let Some(courses) = &patch.courses {
            self.courses = Some(courses.clone());
        }
        if let Some(contacts) = &patch.contacts {
            self.contacts = Some(contacts.clone());
        }
        if let Some(footer) = &patch.footer {
            self.footer = Some(footer.clone());
        }
    }

    /// Returns true if no section is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hero.is_none()
            && self.benefits.is_none()
            && self.founder.is_none()
            && self.about.is_none()
            && self.courses.is_none()
            && self.contacts.is_none()
            && self.footer.is_none()
    }
}

// ── Section schemas ──────────────────────────────────────────────

/// Landing hero block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSection {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub background_image: Option<String>,
}

/// "Why iNTECA" benefit list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitsSection {
    pub heading: Option<String>,
    pub items: Vec<BenefitItem>,
}

/// One benefit card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Founder biography block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FounderSection {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub photo: Option<String>,
}

/// About page body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutSection {
    pub heading: Option<String>,
    pub paragraphs: Vec<String>,
    pub image: Option<String>,
}

/// Courses page listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoursesSection {
    pub heading: Option<String>,
    pub intro: Option<String>,
    pub courses: Vec<CourseCard>,
}

/// One course card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseCard {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub image: Option<String>,
}

/// Contacts page block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsSection {
    pub heading: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub map_embed: Option<String>,
}

/// Site footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterSection {
    pub tagline: Option<String>,
    pub social: Vec<SocialLink>,
}

/// One social media link in the footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    pub label: Option<String>,
    pub url: Option<String>,
}
