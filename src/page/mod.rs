//! Controller of the video-detail page.
//!
//! One [`VideoPageController`] lives for one page view. It owns the tag set
//! and the editor states, talks to the site through a [`Backend`] and shows
//! every change through a [`PageView`].

use log::info;
use crate::api::Backend;
use crate::config::PageConfig;
use crate::entities::{CommentId, PageData, VideoId};
use crate::error::{PageError, Result};
use crate::view::{EditableField, PageView};

mod editors;
mod social;
mod suggestions;
mod tags;

pub use editors::{EditorState, InlineEditor};
pub use social::LikeState;
pub use suggestions::{SuggestionState, SuggestionTicket};
pub use tags::TagEditor;

pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Where a click on the page landed, as far as the suggestion list cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    TagInput,
    SuggestionList,
    Elsewhere,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    TagInputChanged(String),
    TagInputEnter(String),
    SuggestionClicked(String),
    RemoveTagClicked(String),
    DocumentClicked(ClickTarget),
    EditClicked(EditableField),
    SaveClicked { field: EditableField, value: String },
    LikeClicked,
    CommentSubmitted { author: String, content: String },
    CommentLikeClicked(CommentId),
    MoveToRegularClicked,
    VideoStarted,
}

pub struct VideoPageController<B: Backend, V: PageView> {
    backend: B,
    view: V,
    config: PageConfig,
    video_id: VideoId,
    tags: TagEditor,
    suggestions: SuggestionState,
    title: InlineEditor,
    description: InlineEditor,
    like: LikeState,
}

impl<B: Backend, V: PageView> VideoPageController<B, V> {
    /// Reads the embedded page data, populates the tag set and renders it.
    pub fn initialize(backend: B, view: V, config: PageConfig, data: PageData) -> Result<Self> {
        let video_id = data.video_id.ok_or(PageError::MissingPageData("data-video-id"))?;
        let tags = TagEditor::new(&data.tags);
        info!("video {}: initialized with {} tags", &video_id, tags.len());
        let mut controller = Self {
            backend,
            view,
            config,
            video_id,
            tags,
            suggestions: SuggestionState::default(),
            title: InlineEditor::new(EditableField::Title, &data.title),
            description: InlineEditor::new(EditableField::Description, &data.description),
            like: LikeState::default(),
        };
        controller.render_tags();
        controller.view.show_display(EditableField::Title, &data.title);
        controller.view.show_display(EditableField::Description, &data.description);
        Ok(controller)
    }

    /// Fetches the video page and initializes from the data embedded in it.
    pub async fn load(backend: B, view: V, config: PageConfig, video_id: &VideoId) -> Result<Self> {
        let html = backend.load_page(video_id).await?;
        let mut data = PageData::from_html(&html)?;
        if data.video_id.is_none() {
            data.video_id = Some(video_id.clone());
        }
        Self::initialize(backend, view, config, data)
    }

    pub async fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::TagInputChanged(input) => self.on_tag_input(&input).await,
            PageEvent::TagInputEnter(input) => self.on_tag_input_enter(&input).await,
            PageEvent::SuggestionClicked(tag) => self.on_suggestion_clicked(&tag).await,
            PageEvent::RemoveTagClicked(tag) => { self.remove_tag(&tag).await; },
            PageEvent::DocumentClicked(target) => self.on_document_click(target),
            PageEvent::EditClicked(field) => self.begin_edit(field),
            PageEvent::SaveClicked { field, value } => { self.save_field(field, &value).await; },
            PageEvent::LikeClicked => self.like_video().await,
            PageEvent::CommentSubmitted { author, content } => self.submit_comment(&author, &content).await,
            PageEvent::CommentLikeClicked(comment_id) => self.like_comment(comment_id).await,
            PageEvent::MoveToRegularClicked => self.move_to_regular().await,
            PageEvent::VideoStarted => self.record_view().await,
        }
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn tags(&self) -> &TagEditor {
        &self.tags
    }

    pub fn editor(&self, field: EditableField) -> &InlineEditor {
        match field {
            EditableField::Title => &self.title,
            EditableField::Description => &self.description,
        }
    }

    pub fn like_state(&self) -> LikeState {
        self.like
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_parts(self) -> (B, V) {
        (self.backend, self.view)
    }

    /// Logs a failed user action and alerts with the server's text when it
    /// sent one. `action` reads like "updating title".
    fn report_failure(&mut self, action: &str, err: &PageError) {
        log::error!("video {}: error {}: {}", &self.video_id, action, err);
        let message = match err.server_message() {
            Some(text) => format!("Error {}: {}", action, text),
            None if err.is_transport() => GENERIC_ERROR_MESSAGE.to_string(),
            None => format!("Error {}.", action),
        };
        self.view.alert(&message);
    }
}
