pub type CommentId = i64;

/// A comment as returned by the server after it was stored.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub author_slug: String,
    #[serde(default)]
    pub author_avatar: Option<String>,
    pub content: String,
    pub timestamp: String,
    #[serde(default)]
    pub likes: i64,
}

/// Author and text typed into the comment form, trimmed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewComment {
    pub author: String,
    pub content: String,
}

impl NewComment {
    pub fn parse(author: &str, content: &str) -> Option<Self> {
        let author = author.trim();
        let content = content.trim();
        if author.is_empty() || content.is_empty() {
            return None;
        }
        Some(Self { author: author.to_string(), content: content.to_string() })
    }
}
