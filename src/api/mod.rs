use serde::Deserialize;
use crate::entities::{Comment, CommentId, VideoId};
use crate::error::Result;

pub mod client;
pub mod memory;

pub use client::ApiClient;
pub use memory::{BackendCall, Endpoint, InMemoryBackend, StoredVideo};

/// The REST endpoints the video page talks to.
///
/// Implementations turn an application-level failure (`success: false`, or an
/// error status carrying `{"error": ...}`) into [`crate::error::PageError::Rejected`].
pub trait Backend {
    /// Raw HTML of the video page, used to read the embedded page data.
    async fn load_page(&self, video_id: &VideoId) -> Result<String>;
    /// Replaces the whole tag list of the video with `tags` (comma-joined).
    async fn edit_tags(&self, video_id: &VideoId, tags: &str) -> Result<()>;
    async fn tag_suggestions(&self, query: &str) -> Result<Vec<String>>;
    async fn edit_description(&self, video_id: &VideoId, description: &str) -> Result<()>;
    async fn edit_title(&self, video_id: &VideoId, title: &str) -> Result<()>;
    /// Returns the new like count.
    async fn like_video(&self, video_id: &VideoId) -> Result<i64>;
    async fn add_comment(&self, video_id: &VideoId, author: &str, content: &str) -> Result<Comment>;
    /// Returns the new like count of the comment.
    async fn like_comment(&self, comment_id: CommentId) -> Result<i64>;
    async fn move_to_regular(&self, video_id: &VideoId) -> Result<()>;
    /// Returns the new view count.
    async fn increment_view(&self, video_id: &VideoId) -> Result<i64>;
}

/// Every JSON reply of the site shares this envelope; the payload fields are
/// present only for the endpoints that produce them.
#[derive(Deserialize, Debug, Default)]
pub struct Reply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub new_like_count: Option<i64>,
    #[serde(default)]
    pub new_view_count: Option<i64>,
    #[serde(default)]
    pub comment: Option<Comment>,
}
