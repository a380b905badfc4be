use log::{debug, error, info, warn};
use crate::api::Backend;
use crate::entities::{CommentId, NewComment};
use crate::page::VideoPageController;
use crate::view::{like_count_text, view_count_text, CommentCard, PageView};

pub const COMMENT_REQUIRED_MESSAGE: &str = "Please enter both your name and a comment.";
pub const COMMENT_FAILED_MESSAGE: &str = "Error adding comment. Please try again.";
pub const MOVE_TO_REGULAR_PROMPT: &str = "Are you sure you want to move this video to regular uploads?";

/// Like state of the video for this page view. Once liked, the control is
/// disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
}

impl<B: Backend, V: PageView> VideoPageController<B, V> {
    pub async fn like_video(&mut self) {
        if self.like.liked {
            debug!("video {}: already liked", &self.video_id);
            return;
        }
        match self.backend.like_video(&self.video_id).await {
            Ok(count) => {
                info!("video {}: liked, {} likes", &self.video_id, count);
                self.like.liked = true;
                self.view.set_like_count(&like_count_text(count));
                self.view.mark_liked();
            }
            Err(err) => self.report_failure("liking video", &err),
        }
    }

    /// Posts a comment. Both fields must be non-blank; otherwise nothing is
    /// sent.
    pub async fn submit_comment(&mut self, author: &str, content: &str) {
        let Some(comment) = NewComment::parse(author, content) else {
            self.view.alert(COMMENT_REQUIRED_MESSAGE);
            return;
        };
        match self.backend.add_comment(&self.video_id, &comment.author, &comment.content).await {
            Ok(created) => {
                info!("video {}: comment {} added", &self.video_id, created.id);
                let card = CommentCard::new(created, &self.config.default_avatar);
                self.view.prepend_comment(&card);
                self.view.clear_comment_form();
            }
            Err(err) => {
                error!("video {}: error adding comment: {}", &self.video_id, err);
                self.view.alert(COMMENT_FAILED_MESSAGE);
            }
        }
    }

    pub async fn like_comment(&mut self, comment_id: CommentId) {
        match self.backend.like_comment(comment_id).await {
            Ok(count) => {
                debug!("comment {}: {} likes", comment_id, count);
                self.view.set_comment_like_count(comment_id, count);
            }
            Err(err) => self.report_failure("liking comment", &err),
        }
    }

    /// Moves the video out of the stealth uploads after a confirmation and
    /// reloads the page.
    pub async fn move_to_regular(&mut self) {
        if !self.view.confirm(MOVE_TO_REGULAR_PROMPT) {
            debug!("video {}: move to regular uploads cancelled", &self.video_id);
            return;
        }
        match self.backend.move_to_regular(&self.video_id).await {
            Ok(()) => {
                info!("video {}: moved to regular uploads", &self.video_id);
                self.view.reload();
            }
            Err(err) => self.report_failure("moving video", &err),
        }
    }

    /// Counts a view of the video. Failures are only logged.
    pub async fn record_view(&mut self) {
        match self.backend.increment_view(&self.video_id).await {
            Ok(count) => self.view.set_view_count(&view_count_text(count)),
            Err(err) => warn!("video {}: failed to count view: {}", &self.video_id, err),
        }
    }
}
