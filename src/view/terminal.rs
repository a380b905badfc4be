use std::io::{BufRead, Write};
use colored::Colorize;
use crate::entities::CommentId;
use crate::utils::color_utils::parse_hex_color;
use crate::view::{CommentCard, EditableField, PageView, TagPill};

/// Prints page changes to stdout; prompts are answered on stdin.
#[derive(Debug, Default)]
pub struct TerminalView {
    assume_yes: bool,
}

impl TerminalView {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

fn paint_pill(pill: &TagPill) -> String {
    let text = format!(" {} ", pill.name);
    match (parse_hex_color(&pill.bg_color), pill.fg_color.as_str()) {
        (Some((r, g, b)), "black") => text.black().on_truecolor(r, g, b).to_string(),
        (Some((r, g, b)), _) => text.white().on_truecolor(r, g, b).to_string(),
        (None, _) => text,
    }
}

impl PageView for TerminalView {
    fn render_tags(&mut self, pills: &[TagPill]) {
        if pills.is_empty() {
            println!("{} {}", "tags:".bold(), "(none)".dimmed());
            return;
        }
        let painted = pills.iter().map(paint_pill).collect::<Vec<String>>();
        println!("{} {}", "tags:".bold(), painted.join(" "));
    }

    fn clear_tag_input(&mut self) {}

    fn show_suggestions(&mut self, suggestions: &[String]) {
        if suggestions.is_empty() {
            println!("{}", "no suggestions".dimmed());
            return;
        }
        println!("{}", "suggestions:".bold());
        for suggestion in suggestions {
            println!("  {}", suggestion);
        }
    }

    fn hide_suggestions(&mut self) {}

    fn show_editor(&mut self, field: EditableField, value: &str) {
        println!("{} {}", format!("editing {}:", field.label()).bold(), value);
    }

    fn show_display(&mut self, field: EditableField, text: &str) {
        println!("{} {}", format!("{}:", field.label()).bold(), text);
    }

    fn set_like_count(&mut self, text: &str) {
        println!("{}", text.red());
    }

    fn mark_liked(&mut self) {
        println!("{}", "liked".red().bold());
    }

    fn set_view_count(&mut self, text: &str) {
        println!("{}", text);
    }

    fn prepend_comment(&mut self, card: &CommentCard) {
        println!("{} {} {}", format!("#{}", card.id).dimmed(), card.author.bold(), card.timestamp.dimmed());
        println!("  {}", card.content);
    }

    fn clear_comment_form(&mut self) {}

    fn set_comment_like_count(&mut self, comment_id: CommentId, likes: i64) {
        println!("comment #{}: {}", comment_id, format!("{} likes", likes).red());
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message.yellow().bold());
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", message);
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn reload(&mut self) {
        println!("{}", "page changed, reload it to see the result".dimmed());
    }
}
