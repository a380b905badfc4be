use itertools::Itertools;

pub trait StringExtensions {
    /// URL-safe slug of an author name, as used in author profile links.
    /// E.g. `"Bob's Burgers 2".slugify() == "bobs-burgers-2"`
    fn slugify(&self) -> String;
}

impl StringExtensions for str {
    fn slugify(&self) -> String {
        const QUOTE_CHARS: &[char] = &['\'', '"'];

        self
            .split(|c: char| !(QUOTE_CHARS.contains(&c) || c.is_alphanumeric()))
            .filter(|s| !s.is_empty())
            .map(|s| s.replace(QUOTE_CHARS, "").to_lowercase())
            .filter(|s| !s.is_empty())
            .join("-")
    }
}

#[test]
fn test_slugify() {
    assert_eq!("Bob's Burgers 2".slugify(), "bobs-burgers-2");
    assert_eq!("  DJ -- Shadow!! ".slugify(), "dj-shadow");
    assert_eq!("Zoë Keating".slugify(), "zoë-keating");
    assert_eq!("'''".slugify(), "");
}
