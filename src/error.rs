use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server rejected the request ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, message: Option<String> },
    #[error("server response is missing `{0}`")]
    IncompleteResponse(&'static str),
    #[error("page data is missing `{0}`")]
    MissingPageData(&'static str),
    #[error("failed to render template: {0}")]
    Render(#[from] askama::Error),
}

impl PageError {
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    /// Error text supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Network or decoding problem rather than an answer from the application.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_) | Self::IncompleteResponse(_))
    }
}

pub type Result<T, E = PageError> = std::result::Result<T, E>;
