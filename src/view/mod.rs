//! Everything the page controller shows goes through [`PageView`], so the
//! controller itself never touches markup or a terminal.

use serde::Serialize;
use crate::entities::{Comment, CommentId, Tag};
use crate::utils::color_utils::{get_bg_color, get_fg_color};

pub mod html;
pub mod terminal;

pub use html::HtmlPageView;
pub use terminal::TerminalView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    Title,
    Description,
}

impl EditableField {
    pub fn label(&self) -> &'static str {
        match self {
            EditableField::Title => "title",
            EditableField::Description => "description",
        }
    }
}

/// A rendered tag: filter link plus a remove control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagPill {
    pub name: String,
    pub href: String,
    pub bg_color: String,
    pub fg_color: String,
}

impl From<&Tag> for TagPill {
    fn from(tag: &Tag) -> Self {
        let bg_color = get_bg_color(tag.as_str());
        let fg_color = get_fg_color(&bg_color);
        Self {
            name: tag.to_string(),
            href: tag.filter_href(),
            bg_color,
            fg_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentCard {
    pub id: CommentId,
    pub author: String,
    pub author_href: String,
    pub avatar_src: String,
    pub content: String,
    pub timestamp: String,
    pub likes: i64,
}

impl CommentCard {
    pub fn new(comment: Comment, default_avatar: &str) -> Self {
        let avatar_src = match comment.author_avatar.as_deref().map(str::trim) {
            Some(path) if path.starts_with('/') || path.starts_with("http://") || path.starts_with("https://") => path.to_string(),
            Some(path) if !path.is_empty() => format!("/static/{}", path),
            _ => default_avatar.to_string(),
        };
        Self {
            id: comment.id,
            author_href: format!("/artist/{}", urlencoding::encode(&comment.author_slug)),
            author: comment.author,
            avatar_src,
            content: comment.content,
            timestamp: comment.timestamp,
            likes: comment.likes,
        }
    }
}

pub fn like_count_text(count: i64) -> String {
    format!("{} likes", count)
}

pub fn view_count_text(count: i64) -> String {
    format!("{} views", count)
}

/// The page surface. Implementations only display what they are told.
pub trait PageView {
    /// Replaces every tag pill with `pills`.
    fn render_tags(&mut self, pills: &[TagPill]);
    fn clear_tag_input(&mut self);
    fn show_suggestions(&mut self, suggestions: &[String]);
    fn hide_suggestions(&mut self);
    /// Hides the display element of `field` and shows its editor holding `value`.
    fn show_editor(&mut self, field: EditableField, value: &str);
    /// Hides the editor of `field` and shows `text` in its display element.
    fn show_display(&mut self, field: EditableField, text: &str);
    fn set_like_count(&mut self, text: &str);
    /// Marks the like control as liked and disables it.
    fn mark_liked(&mut self);
    fn set_view_count(&mut self, text: &str);
    fn prepend_comment(&mut self, card: &CommentCard);
    fn clear_comment_form(&mut self);
    fn set_comment_like_count(&mut self, comment_id: CommentId, likes: i64);
    /// Blocking notification.
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
    fn reload(&mut self);
}
