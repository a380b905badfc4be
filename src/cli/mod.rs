use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use crate::api::ApiClient;
use crate::config::{Config, FlatConfig};
use crate::entities::{CommentId, VideoId};
use crate::page::{PageEvent, VideoPageController};
use crate::view::{EditableField, TerminalView};

#[derive(Parser, Debug)]
#[command(name = "vidtag", version, about = "Edit tags, title and comments of a video on the site")]
pub struct Cli {
    #[command(flatten)]
    pub config: FlatConfig,

    #[arg(short = 'y', long, help = "Answer yes to confirmation prompts")]
    pub yes: bool,

    #[arg(help = "Id of the video whose page to act on")]
    pub video_id: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the tags, title and description of the video
    Show,
    /// Add or remove tags
    #[command(subcommand)]
    Tags(TagsCommand),
    /// List tag suggestions for the typed text
    Suggest { input: String },
    /// Change the title
    Title { title: String },
    /// Change the description
    Description { description: String },
    /// Like the video
    Like,
    /// Post a comment
    Comment {
        #[arg(long)]
        author: String,
        content: String,
    },
    /// Like a comment
    LikeComment { comment_id: CommentId },
    /// Move the video out of the stealth uploads
    MoveToRegular,
    /// Count a view of the video
    View,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TagsCommand {
    Add { tags: Vec<String> },
    Remove { tags: Vec<String> },
}

/// Events a command turns into, in the order they are fired.
pub fn command_events(command: Command) -> Vec<PageEvent> {
    match command {
        Command::Show => vec![],
        Command::Tags(TagsCommand::Add { tags }) => tags.into_iter().map(PageEvent::TagInputEnter).collect(),
        Command::Tags(TagsCommand::Remove { tags }) => tags.into_iter().map(PageEvent::RemoveTagClicked).collect(),
        Command::Suggest { input } => vec![PageEvent::TagInputChanged(input)],
        Command::Title { title } => vec![
            PageEvent::EditClicked(EditableField::Title),
            PageEvent::SaveClicked { field: EditableField::Title, value: title },
        ],
        Command::Description { description } => vec![
            PageEvent::EditClicked(EditableField::Description),
            PageEvent::SaveClicked { field: EditableField::Description, value: description },
        ],
        Command::Like => vec![PageEvent::LikeClicked],
        Command::Comment { author, content } => vec![PageEvent::CommentSubmitted { author, content }],
        Command::LikeComment { comment_id } => vec![PageEvent::CommentLikeClicked(comment_id)],
        Command::MoveToRegular => vec![PageEvent::MoveToRegularClicked],
        Command::View => vec![PageEvent::VideoStarted],
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from(cli.config);
    info!("server: {}", &config.server.base_url);
    let client = ApiClient::new(config.server.clone()).context("failed to build HTTP client")?;
    let video_id = VideoId::new(cli.video_id);
    let view = TerminalView::new(cli.yes);
    let mut page = VideoPageController::load(client, view, config.page, &video_id)
        .await
        .with_context(|| format!("failed to load the page of video {}", &video_id))?;
    for event in command_events(cli.command) {
        page.handle(event).await;
    }
    Ok(())
}
