use askama::Template;
use crate::entities::{CommentId, TagSet};
use crate::error::Result;
use crate::view::{CommentCard, EditableField, PageView, TagPill};

#[derive(Template)]
#[template(path = "tag_pills.html")]
struct TagPillsTemplate<'a> {
    pills: &'a [TagPill],
}

#[derive(Template)]
#[template(path = "tag_links.html")]
struct TagLinksTemplate<'a> {
    pills: &'a [TagPill],
}

#[derive(Template)]
#[template(path = "suggestions.html")]
struct SuggestionsTemplate<'a> {
    suggestions: &'a [String],
}

#[derive(Template)]
#[template(path = "comment_card.html")]
struct CommentCardTemplate<'a> {
    card: &'a CommentCard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldView {
    pub display_text: String,
    pub editor_value: String,
    pub editing: bool,
}

/// Headless page: keeps what is displayed and renders the widgets as HTML
/// fragments on request.
#[derive(Debug, Default)]
pub struct HtmlPageView {
    pills: Vec<TagPill>,
    tag_input: String,
    suggestions: Vec<String>,
    suggestions_visible: bool,
    title: FieldView,
    description: FieldView,
    like_count: String,
    liked: bool,
    view_count: String,
    comments: Vec<CommentCard>,
    comment_author: String,
    comment_content: String,
    alerts: Vec<String>,
    confirmations: Vec<String>,
    confirm_answer: bool,
    reloads: usize,
}

impl HtmlPageView {
    pub fn new() -> Self {
        Self { confirm_answer: true, ..Default::default() }
    }

    /// Answer given to every later confirmation prompt.
    pub fn answer_confirmations(&mut self, answer: bool) {
        self.confirm_answer = answer;
    }

    pub fn type_tag_input(&mut self, text: &str) {
        self.tag_input = text.to_string();
    }

    pub fn fill_comment_form(&mut self, author: &str, content: &str) {
        self.comment_author = author.to_string();
        self.comment_content = content.to_string();
    }

    pub fn pills(&self) -> &[TagPill] {
        &self.pills
    }

    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn field(&self, field: EditableField) -> &FieldView {
        match field {
            EditableField::Title => &self.title,
            EditableField::Description => &self.description,
        }
    }

    pub fn like_count(&self) -> &str {
        &self.like_count
    }

    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn view_count(&self) -> &str {
        &self.view_count
    }

    pub fn comments(&self) -> &[CommentCard] {
        &self.comments
    }

    pub fn comment_form(&self) -> (&str, &str) {
        (&self.comment_author, &self.comment_content)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn confirmations(&self) -> &[String] {
        &self.confirmations
    }

    pub fn reloads(&self) -> usize {
        self.reloads
    }

    pub fn tag_container_html(&self) -> Result<String> {
        Ok(TagPillsTemplate { pills: &self.pills }.render()?)
    }

    pub fn suggestions_html(&self) -> Result<String> {
        Ok(SuggestionsTemplate { suggestions: &self.suggestions }.render()?)
    }

    pub fn comments_html(&self) -> Result<String> {
        let mut html = String::new();
        for card in &self.comments {
            html.push_str(&render_comment_card(card)?);
        }
        Ok(html)
    }

    /// Read-only tag links, as shown on video cards.
    pub fn render_tag_links(tags_str: &str) -> Result<String> {
        let pills = TagSet::parse(tags_str).iter().map(TagPill::from).collect::<Vec<TagPill>>();
        Ok(TagLinksTemplate { pills: &pills }.render()?)
    }

    fn field_mut(&mut self, field: EditableField) -> &mut FieldView {
        match field {
            EditableField::Title => &mut self.title,
            EditableField::Description => &mut self.description,
        }
    }
}

pub fn render_comment_card(card: &CommentCard) -> Result<String> {
    Ok(CommentCardTemplate { card }.render()?)
}

impl PageView for HtmlPageView {
    fn render_tags(&mut self, pills: &[TagPill]) {
        self.pills = pills.to_vec();
    }

    fn clear_tag_input(&mut self) {
        self.tag_input.clear();
    }

    fn show_suggestions(&mut self, suggestions: &[String]) {
        self.suggestions = suggestions.to_vec();
        self.suggestions_visible = true;
    }

    fn hide_suggestions(&mut self) {
        self.suggestions_visible = false;
    }

    fn show_editor(&mut self, field: EditableField, value: &str) {
        let field = self.field_mut(field);
        field.editor_value = value.to_string();
        field.editing = true;
    }

    fn show_display(&mut self, field: EditableField, text: &str) {
        let field = self.field_mut(field);
        field.display_text = text.to_string();
        field.editing = false;
    }

    fn set_like_count(&mut self, text: &str) {
        self.like_count = text.to_string();
    }

    fn mark_liked(&mut self) {
        self.liked = true;
    }

    fn set_view_count(&mut self, text: &str) {
        self.view_count = text.to_string();
    }

    fn prepend_comment(&mut self, card: &CommentCard) {
        self.comments.insert(0, card.clone());
    }

    fn clear_comment_form(&mut self) {
        self.comment_author.clear();
        self.comment_content.clear();
    }

    fn set_comment_like_count(&mut self, comment_id: CommentId, likes: i64) {
        if let Some(card) = self.comments.iter_mut().find(|x| x.id == comment_id) {
            card.likes = likes;
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_string());
        self.confirm_answer
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}
