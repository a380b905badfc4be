use log::{debug, info};
use crate::api::Backend;
use crate::page::VideoPageController;
use crate::view::{EditableField, PageView};

pub const DESCRIPTION_SAVED_MESSAGE: &str = "Description updated successfully!";
pub const EMPTY_TITLE_MESSAGE: &str = "Title cannot be empty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Viewing,
    Editing,
}

/// Display/edit toggle of one text field. There is no cancel: the only way
/// back to `Viewing` is a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEditor {
    field: EditableField,
    value: String,
    state: EditorState,
}

impl InlineEditor {
    pub fn new(field: EditableField, value: &str) -> Self {
        Self { field, value: value.to_string(), state: EditorState::Viewing }
    }

    pub fn field(&self) -> EditableField {
        self.field
    }

    /// Last saved value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditorState::Editing
    }

    /// Returns `false` if the editor was already open.
    pub fn begin(&mut self) -> bool {
        if self.is_editing() {
            return false;
        }
        self.state = EditorState::Editing;
        true
    }

    pub fn finish(&mut self, value: &str) {
        self.value = value.to_string();
        self.state = EditorState::Viewing;
    }
}

impl<B: Backend, V: PageView> VideoPageController<B, V> {
    fn editor_mut(&mut self, field: EditableField) -> &mut InlineEditor {
        match field {
            EditableField::Title => &mut self.title,
            EditableField::Description => &mut self.description,
        }
    }

    /// Opens the editor of `field`, pre-filled with the current value.
    pub fn begin_edit(&mut self, field: EditableField) {
        let editor = self.editor_mut(field);
        if !editor.begin() {
            debug!("{} editor is already open", field.label());
            return;
        }
        let value = editor.value().to_string();
        self.view.show_editor(field, &value);
    }

    /// Saves `value` for `field`. On failure the editor stays open.
    pub async fn save_field(&mut self, field: EditableField, value: &str) -> bool {
        if !self.editor(field).is_editing() {
            debug!("{} editor is not open, nothing to save", field.label());
            return false;
        }
        let action = format!("updating {}", field.label());
        let result = match field {
            EditableField::Title => {
                let title = value.trim();
                if title.is_empty() {
                    self.view.alert(EMPTY_TITLE_MESSAGE);
                    return false;
                }
                self.backend.edit_title(&self.video_id, title).await.map(|_| title)
            }
            EditableField::Description => {
                self.backend.edit_description(&self.video_id, value).await.map(|_| value)
            }
        };
        match result {
            Ok(saved) => {
                info!("video {}: {} updated", &self.video_id, field.label());
                self.editor_mut(field).finish(saved);
                self.view.show_display(field, saved);
                if field == EditableField::Description {
                    self.view.alert(DESCRIPTION_SAVED_MESSAGE);
                }
                true
            }
            Err(err) => {
                self.report_failure(&action, &err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BackendCall, Endpoint, StoredVideo};
    use crate::page::test_support::*;
    use crate::page::PageEvent;

    fn described(description: &str) -> StoredVideo {
        let mut video = StoredVideo::new("Old title", "a");
        video.description = description.to_string();
        video
    }

    #[test]
    fn test_inline_editor_states() {
        let mut editor = InlineEditor::new(EditableField::Title, "x");
        assert_eq!(editor.state(), EditorState::Viewing);
        assert!(editor.begin());
        assert!(!editor.begin());
        editor.finish("y");
        assert_eq!(editor.state(), EditorState::Viewing);
        assert_eq!(editor.value(), "y");
    }

    #[test]
    fn test_begin_edit_prefills_editor() {
        let mut controller = controller_with(described("about"));
        controller.begin_edit(EditableField::Description);
        let field = controller.view().field(EditableField::Description);
        assert!(field.editing);
        assert_eq!(field.editor_value, "about");
        assert!(controller.editor(EditableField::Description).is_editing());
        assert!(!controller.editor(EditableField::Title).is_editing());
    }

    #[tokio::test]
    async fn test_save_description() {
        let mut controller = controller_with(described("about"));
        controller.handle(PageEvent::EditClicked(EditableField::Description)).await;
        controller.handle(PageEvent::SaveClicked { field: EditableField::Description, value: "new text".to_string() }).await;

        let field = controller.view().field(EditableField::Description);
        assert!(!field.editing);
        assert_eq!(field.display_text, "new text");
        assert_eq!(controller.editor(EditableField::Description).state(), EditorState::Viewing);
        assert_eq!(controller.view().alerts(), &[DESCRIPTION_SAVED_MESSAGE.to_string()]);
        assert_eq!(controller.backend().video(&video_id()).unwrap().description, "new text");
    }

    #[tokio::test]
    async fn test_save_title_trims() {
        let mut controller = controller_with(described(""));
        controller.begin_edit(EditableField::Title);
        assert!(controller.save_field(EditableField::Title, "  New title ").await);
        assert_eq!(controller.view().field(EditableField::Title).display_text, "New title");
        assert_eq!(controller.backend().calls(), vec![BackendCall::EditTitle { video_id: video_id(), title: "New title".to_string() }]);
        assert!(controller.view().alerts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_title_is_refused_locally() {
        let mut controller = controller_with(described(""));
        controller.begin_edit(EditableField::Title);
        assert!(!controller.save_field(EditableField::Title, "   ").await);
        assert!(controller.editor(EditableField::Title).is_editing());
        assert!(controller.backend().calls().is_empty());
        assert_eq!(controller.view().alerts(), &[EMPTY_TITLE_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_rejected_save_stays_in_editing() {
        let mut controller = controller_with(described("about"));
        controller.backend().reject(Endpoint::EditDescription, Some("disk full"));
        controller.begin_edit(EditableField::Description);
        assert!(!controller.save_field(EditableField::Description, "changed").await);

        assert!(controller.editor(EditableField::Description).is_editing());
        assert_eq!(controller.editor(EditableField::Description).value(), "about");
        assert!(controller.view().field(EditableField::Description).editing);
        assert_eq!(controller.view().alerts(), &["Error updating description: disk full".to_string()]);
    }

    #[tokio::test]
    async fn test_save_without_open_editor_is_ignored() {
        let mut controller = controller_with(described("about"));
        assert!(!controller.save_field(EditableField::Description, "changed").await);
        assert!(controller.backend().calls().is_empty());
    }
}
