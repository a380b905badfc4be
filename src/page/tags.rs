use itertools::Itertools;
use log::{debug, error, info};
use crate::api::Backend;
use crate::entities::{Tag, TagSet};
use crate::page::VideoPageController;
use crate::view::{PageView, TagPill};

/// Tag state of the page. Holds no view or network handles so it can be
/// exercised on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEditor {
    set: TagSet,
}

impl TagEditor {
    pub fn new(tags_str: &str) -> Self {
        Self { set: TagSet::parse(tags_str) }
    }

    /// Adds every comma-separated part of `raw`. Returns the tags actually
    /// added; blank parts and tags already present are skipped.
    pub fn add(&mut self, raw: &str) -> Vec<Tag> {
        TagSet::parse(raw)
            .iter()
            .filter(|tag| self.set.insert((*tag).clone()))
            .cloned()
            .collect()
    }

    pub fn remove(&mut self, tag: &str) -> Option<Tag> {
        self.set.remove(tag)
    }

    pub fn pills(&self) -> Vec<TagPill> {
        self.set.iter().map(TagPill::from).collect()
    }

    pub fn tags(&self) -> &TagSet {
        &self.set
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.set.contains(tag)
    }

    pub fn to_tags_string(&self) -> String {
        self.set.to_tags_string()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl<B: Backend, V: PageView> VideoPageController<B, V> {
    /// Adds a tag typed or picked by the user. Blank and duplicate tags are
    /// ignored without a request.
    pub async fn add_tag(&mut self, raw: &str) -> bool {
        let added = self.tags.add(raw);
        if added.is_empty() {
            debug!("video {}: ignoring tag '{}'", &self.video_id, raw);
            return false;
        }
        info!("video {}: adding {}", &self.video_id, added.iter().map(|x| format!("'{}'", x)).join(", "));
        self.render_tags();
        self.view.clear_tag_input();
        self.persist_tags().await;
        true
    }

    pub async fn remove_tag(&mut self, tag: &str) -> bool {
        if self.tags.remove(tag).is_none() {
            debug!("video {}: tag '{}' is not set", &self.video_id, tag);
            return false;
        }
        info!("video {}: removing tag '{}'", &self.video_id, tag);
        self.render_tags();
        self.persist_tags().await;
        true
    }

    pub fn render_tags(&mut self) {
        let pills = self.tags.pills();
        self.view.render_tags(&pills);
    }

    /// Sends the whole tag list. A rejected update is only logged; the local
    /// list is kept as it is.
    pub async fn persist_tags(&mut self) {
        let tags_str = self.tags.to_tags_string();
        match self.backend.edit_tags(&self.video_id, &tags_str).await {
            Ok(()) => debug!("video {}: tags saved: {}", &self.video_id, &tags_str),
            Err(err) => error!("video {}: error updating tags: {}", &self.video_id, &err),
        }
    }

    pub(crate) async fn on_tag_input_enter(&mut self, input: &str) {
        self.add_tag(input.trim()).await;
    }

    pub(crate) async fn on_suggestion_clicked(&mut self, tag: &str) {
        self.add_tag(tag).await;
        self.view.hide_suggestions();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Endpoint;
    use crate::page::test_support::*;
    use crate::page::{ClickTarget, PageEvent};

    #[test]
    fn test_tag_editor_add_and_remove() {
        let mut editor = TagEditor::new("a");
        assert_eq!(editor.add(" b "), vec![Tag::parse("b").unwrap()]);
        assert!(editor.add("a").is_empty());
        assert!(editor.add("   ").is_empty());
        assert_eq!(editor.to_tags_string(), "a,b");
        assert!(editor.remove("a").is_some());
        assert!(editor.remove("a").is_none());
        assert_eq!(editor.to_tags_string(), "b");
    }

    #[tokio::test]
    async fn test_add_duplicate_is_noop() {
        let mut controller = controller("a,b");
        controller.view_mut().type_tag_input("a");
        assert!(!controller.add_tag("a").await);
        assert_eq!(controller.tags().len(), 2);
        assert!(controller.backend().persisted_tags().is_empty());
        assert_eq!(controller.view().tag_input(), "a");
    }

    #[tokio::test]
    async fn test_add_empty_is_noop() {
        let mut controller = controller("a");
        assert!(!controller.add_tag("").await);
        assert!(!controller.add_tag("  ").await);
        assert!(controller.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_remove_restores_tags() {
        let mut controller = controller("a,b");
        controller.view_mut().type_tag_input("x");
        assert!(controller.add_tag("x").await);
        assert_eq!(controller.view().tag_input(), "");
        assert!(controller.remove_tag("x").await);

        assert_eq!(controller.tags().to_tags_string(), "a,b");
        assert_eq!(controller.backend().persisted_tags(), vec!["a,b,x", "a,b"]);
        assert_eq!(controller.backend().video(&video_id()).unwrap().tags, "a,b");
    }

    #[tokio::test]
    async fn test_pills_follow_tag_set() {
        let mut controller = controller("a");
        controller.add_tag("b").await;
        controller.add_tag("c").await;
        controller.remove_tag("a").await;
        let names = controller.view().pills().iter().map(|x| x.name.clone()).collect::<Vec<String>>();
        let tags = controller.tags().tags().iter().map(|x| x.to_string()).collect::<Vec<String>>();
        assert_eq!(names, tags);
        assert_eq!(names, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_remove_missing_tag_is_noop() {
        let mut controller = controller("a");
        assert!(!controller.remove_tag("b").await);
        assert!(controller.backend().persisted_tags().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_persist_keeps_local_state() {
        let mut controller = controller("a");
        controller.backend().reject(Endpoint::EditTags, Some("database is locked"));
        assert!(controller.add_tag("b").await);
        assert_eq!(controller.tags().to_tags_string(), "a,b");
        assert_eq!(controller.view().pills().len(), 2);
        assert!(controller.view().alerts().is_empty());
        assert_eq!(controller.backend().video(&video_id()).unwrap().tags, "a");
    }

    #[tokio::test]
    async fn test_suggestion_click_adds_and_hides() {
        let mut controller = controller("jazz,rock");
        controller.handle(PageEvent::TagInputChanged("ro".to_string())).await;
        assert!(controller.view().suggestions_visible());
        controller.handle(PageEvent::SuggestionClicked("rocksteady".to_string())).await;
        assert!(!controller.view().suggestions_visible());
        assert_eq!(controller.tags().to_tags_string(), "jazz,rock,rocksteady");

        controller.handle(PageEvent::DocumentClicked(ClickTarget::Elsewhere)).await;
        assert!(!controller.view().suggestions_visible());
    }

    #[tokio::test]
    async fn test_comma_input_adds_each_part() {
        let mut controller = controller("b");
        assert!(controller.add_tag("a, b,,c").await);

        let local = controller.tags().tags().clone();
        let persisted = controller.backend().persisted_tags();
        assert_eq!(persisted, vec!["b,a,c"]);
        assert_eq!(TagSet::parse(&persisted[0]), local);
        assert_eq!(controller.view().pills().len(), 3);
    }
}
