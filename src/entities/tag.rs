use std::fmt;
use std::str::FromStr;
use itertools::Itertools;

const TAGS_SEPARATOR: char = ',';

/// A single tag: trimmed, never empty and free of the list separator.
/// Casing is kept as typed.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains(TAGS_SEPARATOR) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link to the filter-by-tag listing.
    pub fn filter_href(&self) -> String {
        format!("/filter?tag={}", urlencoding::encode(&self.0))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tag::parse(&value).ok_or("tag must be non-empty and contain no comma")
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0
    }
}

/// Ordered set of tags as stored on the server: a comma-joined string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits on commas, trims every segment and drops empty ones.
    /// Later duplicates of an already seen tag are dropped.
    pub fn parse(tags_str: &str) -> Self {
        let mut set = Self::new();
        for tag in tags_str.split(TAGS_SEPARATOR).filter_map(Tag::parse) {
            set.insert(tag);
        }
        set
    }

    pub fn to_tags_string(&self) -> String {
        self.tags.iter().map(Tag::as_str).join(",")
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|x| x.as_str() == tag)
    }

    /// Appends the tag unless an identical one is already present.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.contains(tag.as_str()) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove(&mut self, tag: &str) -> Option<Tag> {
        let position = self.tags.iter().position(|x| x.as_str() == tag)?;
        Some(self.tags.remove(position))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_tags_string())
    }
}

impl FromStr for TagSet {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
