use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use html_escape::{encode_double_quoted_attribute, encode_text};
use itertools::Itertools;
use crate::api::Backend;
use crate::entities::{Comment, CommentId, TagSet, VideoId};
use crate::error::{PageError, Result};
use crate::utils::str_utils::StringExtensions;

const MAX_SUGGESTIONS: usize = 10;
const COMMENT_TIMESTAMP: &str = "01/01/2024 12:00 PM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    LoadPage,
    EditTags,
    TagSuggestions,
    EditDescription,
    EditTitle,
    LikeVideo,
    AddComment,
    LikeComment,
    MoveToRegular,
    IncrementView,
}

/// A request as it reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    LoadPage(VideoId),
    EditTags { video_id: VideoId, tags: String },
    TagSuggestions(String),
    EditDescription { video_id: VideoId, description: String },
    EditTitle { video_id: VideoId, title: String },
    LikeVideo(VideoId),
    AddComment { video_id: VideoId, author: String, content: String },
    LikeComment(CommentId),
    MoveToRegular(VideoId),
    IncrementView(VideoId),
}

impl BackendCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            BackendCall::LoadPage(_) => Endpoint::LoadPage,
            BackendCall::EditTags { .. } => Endpoint::EditTags,
            BackendCall::TagSuggestions(_) => Endpoint::TagSuggestions,
            BackendCall::EditDescription { .. } => Endpoint::EditDescription,
            BackendCall::EditTitle { .. } => Endpoint::EditTitle,
            BackendCall::LikeVideo(_) => Endpoint::LikeVideo,
            BackendCall::AddComment { .. } => Endpoint::AddComment,
            BackendCall::LikeComment(_) => Endpoint::LikeComment,
            BackendCall::MoveToRegular(_) => Endpoint::MoveToRegular,
            BackendCall::IncrementView(_) => Endpoint::IncrementView,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredVideo {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub likes: i64,
    pub views: i64,
    pub in_stealth_uploads: bool,
}

impl StoredVideo {
    pub fn new(title: &str, tags: &str) -> Self {
        Self { title: title.to_string(), tags: tags.to_string(), ..Default::default() }
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    videos: HashMap<VideoId, StoredVideo>,
    comments: HashMap<CommentId, Comment>,
    next_comment_id: CommentId,
    calls: Vec<BackendCall>,
    rejections: HashMap<Endpoint, Option<String>>,
}

/// Backend that keeps the site's data in memory and answers the way the real
/// server does. Every request is recorded.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: Mutex<InMemoryState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(self, video_id: VideoId, video: StoredVideo) -> Self {
        self.lock().videos.insert(video_id, video);
        self
    }

    pub fn with_comment(self, comment: Comment) -> Self {
        {
            let mut state = self.lock();
            state.next_comment_id = state.next_comment_id.max(comment.id);
            state.comments.insert(comment.id, comment);
        }
        self
    }

    /// Makes every later request to `endpoint` fail with `success: false`.
    pub fn reject(&self, endpoint: Endpoint, message: Option<&str>) {
        self.lock().rejections.insert(endpoint, message.map(|x| x.to_string()));
    }

    pub fn accept(&self, endpoint: Endpoint) {
        self.lock().rejections.remove(&endpoint);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<BackendCall> {
        self.lock().calls.iter().filter(|x| x.endpoint() == endpoint).cloned().collect()
    }

    /// Tag strings sent to the tags endpoint, in order.
    pub fn persisted_tags(&self) -> Vec<String> {
        self.lock().calls.iter()
            .filter_map(|x| match x {
                BackendCall::EditTags { tags, .. } => Some(tags.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn video(&self, video_id: &VideoId) -> Option<StoredVideo> {
        self.lock().videos.get(video_id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records the call and applies a configured rejection, if any.
    fn begin(&self, call: BackendCall) -> Result<MutexGuard<'_, InMemoryState>> {
        let mut state = self.lock();
        let endpoint = call.endpoint();
        state.calls.push(call);
        if let Some(message) = state.rejections.get(&endpoint) {
            return Err(PageError::rejected(200, message.clone()));
        }
        Ok(state)
    }
}

fn not_found() -> PageError {
    PageError::rejected(404, None)
}

fn video_mut<'a>(state: &'a mut InMemoryState, video_id: &VideoId) -> Result<&'a mut StoredVideo> {
    state.videos.get_mut(video_id).ok_or_else(not_found)
}

fn render_page(video_id: &VideoId, video: &StoredVideo) -> String {
    format!(
        concat!(
            "<html><body>\n",
            "<h1 id=\"video-title\">{title}</h1>\n",
            "<p id=\"description-display\">{description}</p>\n",
            "<span class=\"like-count\">{likes} likes</span>\n",
            "<div id=\"tag-input-container\" data-video-id=\"{id}\" data-tags=\"{tags}\"></div>\n",
            "<input type=\"text\" id=\"tag-input\">\n",
            "</body></html>\n",
        ),
        title = encode_text(&video.title),
        description = encode_text(&video.description),
        likes = video.likes,
        id = encode_double_quoted_attribute(video_id.as_str()),
        tags = encode_double_quoted_attribute(&video.tags),
    )
}

impl Backend for InMemoryBackend {
    async fn load_page(&self, video_id: &VideoId) -> Result<String> {
        let state = self.begin(BackendCall::LoadPage(video_id.clone()))?;
        let video = state.videos.get(video_id).ok_or_else(not_found)?;
        Ok(render_page(video_id, video))
    }

    async fn edit_tags(&self, video_id: &VideoId, tags: &str) -> Result<()> {
        let mut state = self.begin(BackendCall::EditTags { video_id: video_id.clone(), tags: tags.to_string() })?;
        video_mut(&mut state, video_id)?.tags = tags.to_string();
        Ok(())
    }

    async fn tag_suggestions(&self, query: &str) -> Result<Vec<String>> {
        let state = self.begin(BackendCall::TagSuggestions(query.to_string()))?;
        let query = query.to_lowercase();
        let suggestions = state.videos.values()
            .flat_map(|x| TagSet::parse(&x.tags).iter().map(|t| t.as_str().to_lowercase()).collect::<Vec<String>>())
            .unique()
            .filter_map(|tag| tag.find(&query).map(|position| (position, tag)))
            .sorted()
            .map(|(_, tag)| tag)
            .take(MAX_SUGGESTIONS)
            .collect();
        Ok(suggestions)
    }

    async fn edit_description(&self, video_id: &VideoId, description: &str) -> Result<()> {
        let mut state = self.begin(BackendCall::EditDescription { video_id: video_id.clone(), description: description.to_string() })?;
        video_mut(&mut state, video_id)?.description = description.to_string();
        Ok(())
    }

    async fn edit_title(&self, video_id: &VideoId, title: &str) -> Result<()> {
        let mut state = self.begin(BackendCall::EditTitle { video_id: video_id.clone(), title: title.to_string() })?;
        let video = video_mut(&mut state, video_id)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(PageError::rejected(400, Some("Title cannot be empty".to_string())));
        }
        video.title = title.to_string();
        Ok(())
    }

    async fn like_video(&self, video_id: &VideoId) -> Result<i64> {
        let mut state = self.begin(BackendCall::LikeVideo(video_id.clone()))?;
        let video = video_mut(&mut state, video_id)?;
        video.likes += 1;
        Ok(video.likes)
    }

    async fn add_comment(&self, video_id: &VideoId, author: &str, content: &str) -> Result<Comment> {
        let mut state = self.begin(BackendCall::AddComment {
            video_id: video_id.clone(),
            author: author.to_string(),
            content: content.to_string(),
        })?;
        video_mut(&mut state, video_id)?;
        let author = author.trim();
        let content = content.trim();
        if author.is_empty() || content.is_empty() {
            return Err(PageError::rejected(400, Some("Name and comment are required".to_string())));
        }
        state.next_comment_id += 1;
        let comment = Comment {
            id: state.next_comment_id,
            author: author.to_string(),
            author_slug: author.slugify(),
            author_avatar: None,
            content: content.to_string(),
            timestamp: COMMENT_TIMESTAMP.to_string(),
            likes: 0,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn like_comment(&self, comment_id: CommentId) -> Result<i64> {
        let mut state = self.begin(BackendCall::LikeComment(comment_id))?;
        let comment = state.comments.get_mut(&comment_id).ok_or_else(not_found)?;
        comment.likes += 1;
        Ok(comment.likes)
    }

    async fn move_to_regular(&self, video_id: &VideoId) -> Result<()> {
        let mut state = self.begin(BackendCall::MoveToRegular(video_id.clone()))?;
        let video = video_mut(&mut state, video_id)?;
        if !video.in_stealth_uploads {
            return Err(PageError::rejected(400, Some("Video is not in stealth uploads".to_string())));
        }
        video.in_stealth_uploads = false;
        Ok(())
    }

    async fn increment_view(&self, video_id: &VideoId) -> Result<i64> {
        let mut state = self.begin(BackendCall::IncrementView(video_id.clone()))?;
        let video = video_mut(&mut state, video_id)?;
        video.views += 1;
        Ok(video.views)
    }
}
