//! Slug derivation for category and course titles.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Anything that is not a word character, whitespace or hyphen
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHEN_RUN: Regex = Regex::new(r"-+").unwrap();
}

/// Turn a human title into a URL-safe slug.
///
/// Lowercases, strips punctuation, turns whitespace runs into single hyphens,
/// collapses repeated hyphens and trims hyphens from both ends. An empty or
/// all-punctuation title yields an empty slug.
pub fn derive_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed
        .trim_matches(|c: char| c == '-' || c.is_whitespace())
        .to_string()
}

/// Slug field state for one form-editing session.
///
/// The slug follows the title for as long as it still equals the value that
/// was last generated; once the operator types something else it is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugAutoFill {
    last_generated: String,
    slug: String,
}

impl SlugAutoFill {
    /// Fresh form with empty title and slug
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit form seeded from a stored record
    pub fn from_existing(title: &str, slug: &str) -> Self {
        Self {
            last_generated: derive_slug(title),
            slug: slug.to_string(),
        }
    }

    /// Whether the current slug is still tracking the title
    pub fn is_auto(&self) -> bool {
        self.slug.is_empty() || self.slug == self.last_generated
    }

    pub fn title_changed(&mut self, title: &str) -> &str {
        let generated = derive_slug(title);
        if self.is_auto() {
            self.slug = generated.clone();
        }
        self.last_generated = generated;
        &self.slug
    }

    pub fn slug_edited(&mut self, value: &str) {
        self.slug = value.trim().to_string();
    }

    pub fn into_value(self) -> String {
        self.slug
    }
}

/// Slug to store for a create (`existing == None`) or edit submission.
///
/// `existing` is the stored `(title, slug)` pair; `submitted` is the slug
/// field as posted, blank meaning "generate".
pub fn slug_for_submission(existing: Option<(&str, &str)>, title: &str, submitted: Option<&str>) -> String {
    let mut form = match existing {
        Some((stored_title, stored_slug)) => SlugAutoFill::from_existing(stored_title, stored_slug),
        None => SlugAutoFill::new(),
    };
    if let Some(slug) = submitted {
        form.slug_edited(slug);
    }
    form.title_changed(title);
    form.into_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::SLUG_REGEX;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    #[test]
    fn test_derive_slug_examples() {
        assert_eq!(derive_slug("Web Development!!"), "web-development");
        assert_eq!(derive_slug("  a   b  "), "a-b");
        assert_eq!(derive_slug(""), "");
    }

    #[test]
    fn test_derive_slug_collapses_hyphens_and_keeps_underscores() {
        assert_eq!(derive_slug("Rust -- The  Book"), "rust-the-book");
        assert_eq!(derive_slug("--Intro--"), "intro");
        assert_eq!(derive_slug("snake_case Title"), "snake_case-title");
        assert_eq!(derive_slug("C++ & Go: 2024"), "c-go-2024");
    }

    #[test]
    fn test_derive_slug_punctuation_only_is_empty() {
        assert_eq!(derive_slug("!!! ???"), "");
        assert_eq!(derive_slug("   "), "");
    }

    #[test]
    fn test_derive_slug_drops_non_ascii_letters() {
        assert_eq!(derive_slug("Café Déjà vu"), "caf-dj-vu");
    }

    #[test]
    fn test_derive_slug_is_idempotent_and_well_formed() {
        for _ in 0..50 {
            let title: String = Sentence(1..8).fake();
            let slug = derive_slug(&title);
            assert_eq!(derive_slug(&slug), slug);
            assert!(slug.is_empty() || SLUG_REGEX.is_match(&slug), "bad slug {slug:?}");
        }
    }

    #[test]
    fn test_auto_fill_follows_title_until_edited() {
        let mut form = SlugAutoFill::new();
        assert_eq!(form.title_changed("Intro to Rust"), "intro-to-rust");
        assert_eq!(form.title_changed("Intro to Rust 2"), "intro-to-rust-2");
        assert!(form.is_auto());

        form.slug_edited("my-custom");
        assert!(!form.is_auto());
        assert_eq!(form.title_changed("Something Else"), "my-custom");
        assert_eq!(form.title_changed("Another"), "my-custom");
    }

    #[test]
    fn test_auto_fill_resumes_when_slug_cleared() {
        let mut form = SlugAutoFill::new();
        form.title_changed("First");
        form.slug_edited("custom");
        form.slug_edited("");
        assert_eq!(form.title_changed("Second Title"), "second-title");
    }

    #[test]
    fn test_auto_fill_from_existing_record() {
        let mut tracking = SlugAutoFill::from_existing("Web Development", "web-development");
        assert_eq!(tracking.title_changed("Web Design"), "web-design");

        let mut custom = SlugAutoFill::from_existing("Web Development", "webdev");
        assert_eq!(custom.title_changed("Web Design"), "webdev");
        assert_eq!(custom.into_value(), "webdev");
    }

    #[test]
    fn test_slug_for_create_submission() {
        assert_eq!(slug_for_submission(None, "Web Development!!", None), "web-development");
        assert_eq!(slug_for_submission(None, "Web Development", Some("  ")), "web-development");
        assert_eq!(slug_for_submission(None, "Web Development", Some("webdev")), "webdev");
        assert_eq!(slug_for_submission(None, "!!!", None), "");
    }

    #[test]
    fn test_slug_for_edit_submission() {
        let stored = Some(("Web Development", "web-development"));
        // Pre-filled form posts the old slug back unchanged
        assert_eq!(
            slug_for_submission(stored, "Web Design", Some("web-development")),
            "web-design"
        );
        assert_eq!(slug_for_submission(stored, "Web Design", None), "web-design");
        assert_eq!(slug_for_submission(stored, "Web Design", Some("webdev")), "webdev");

        let custom = Some(("Web Development", "webdev"));
        assert_eq!(slug_for_submission(custom, "Web Design", Some("webdev")), "webdev");
        assert_eq!(slug_for_submission(custom, "Web Development", None), "webdev");
    }

    #[test]
    fn test_auto_fill_edit_back_to_generated_value_tracks_again() {
        let mut form = SlugAutoFill::from_existing("Title", "custom");
        form.slug_edited("title");
        assert!(form.is_auto());
        assert_eq!(form.title_changed("New Title"), "new-title");
    }
}
