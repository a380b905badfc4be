use std::fmt;
use std::sync::LazyLock;
use scraper::{Html, Selector};
use crate::error::{PageError, Result};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inputs the server embeds into the rendered video page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageData {
    pub video_id: Option<VideoId>,
    pub tags: String,
    pub title: String,
    pub description: String,
}

static TAG_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#tag-input-container").expect("valid selector")
});
static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#video-title").expect("valid selector")
});
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#description-display").expect("valid selector")
});

fn element_text(document: &Html, selector: &Selector) -> String {
    document.select(selector)
        .next()
        .map(|x| x.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

impl PageData {
    pub fn new(video_id: VideoId, tags: &str) -> Self {
        Self { video_id: Some(video_id), tags: tags.to_string(), ..Default::default() }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Reads the data attributes of the `tag-input-container` element and the
    /// texts of the title and description elements.
    pub fn from_html(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let container = document.select(&TAG_CONTAINER)
            .next()
            .ok_or(PageError::MissingPageData("tag-input-container"))?
            .value();
        let video_id = container.attr("data-video-id")
            .filter(|x| !x.trim().is_empty())
            .map(VideoId::new);
        let tags = container.attr("data-tags").unwrap_or_default().to_string();
        let title = element_text(&document, &TITLE);
        let description = element_text(&document, &DESCRIPTION);
        Ok(Self { video_id, tags, title, description })
    }
}
