use log::{debug, warn};
use crate::api::Backend;
use crate::error::Result;
use crate::page::{ClickTarget, VideoPageController};
use crate::utils::normalize_suggestion_query;
use crate::view::PageView;

/// Identity of one suggestion request. Later requests get greater tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuggestionTicket(u64);

/// Tracks the latest suggestion request so that replies to older ones can be
/// dropped.
#[derive(Debug, Default)]
pub struct SuggestionState {
    latest: u64,
}

impl SuggestionState {
    pub fn issue(&mut self) -> SuggestionTicket {
        self.latest += 1;
        SuggestionTicket(self.latest)
    }

    /// Makes every ticket issued so far stale.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: SuggestionTicket) -> bool {
        ticket.0 == self.latest
    }
}

impl<B: Backend, V: PageView> VideoPageController<B, V> {
    /// Handles a change of the tag input: asks for suggestions, or hides the
    /// list when the input is empty.
    pub async fn on_tag_input(&mut self, input: &str) {
        let Some((ticket, query)) = self.begin_suggestions(input) else {
            return;
        };
        let result = self.backend.tag_suggestions(&query).await;
        self.apply_suggestions(ticket, result);
    }

    /// First half of [`Self::on_tag_input`]: issues a ticket and returns the
    /// query to send, or hides the list and returns `None` for empty input.
    pub fn begin_suggestions(&mut self, input: &str) -> Option<(SuggestionTicket, String)> {
        match normalize_suggestion_query(input) {
            Some(query) => Some((self.suggestions.issue(), query)),
            None => {
                self.suggestions.invalidate();
                self.view.hide_suggestions();
                None
            }
        }
    }

    /// Second half of [`Self::on_tag_input`]. Returns `false` when the reply
    /// was dropped because a newer request exists or the request failed.
    pub fn apply_suggestions(&mut self, ticket: SuggestionTicket, result: Result<Vec<String>>) -> bool {
        if !self.suggestions.is_current(ticket) {
            debug!("dropping stale suggestions {:?}", ticket);
            return false;
        }
        match result {
            Ok(suggestions) => {
                self.view.show_suggestions(&suggestions);
                true
            }
            Err(err) => {
                warn!("failed to fetch tag suggestions: {}", err);
                false
            }
        }
    }

    pub(crate) fn on_document_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Elsewhere {
            self.view.hide_suggestions();
        }
    }
}
