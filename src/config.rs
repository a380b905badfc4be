use std::time::Duration;
use clap::Parser;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_AVATAR: &str = "/static/images/default_avatar.png";

#[derive(Parser, Debug, Clone)]
pub struct FlatConfig {
    #[arg(long, env = "VIDTAG_SERVER_URL", default_value = DEFAULT_SERVER_URL, help = "Base URL of the video site")]
    pub server_url: String,

    #[arg(long, env = "VIDTAG_TIMEOUT_SECS", default_value_t = 10, help = "Timeout of a single request, in seconds")]
    pub timeout_secs: u64,

    #[arg(long, env = "VIDTAG_LOG_LEVEL", default_value = "info", help = "Log level: error, warn, info, debug or trace")]
    pub log_level: log::LevelFilter,

    #[arg(long, env = "VIDTAG_DEFAULT_AVATAR", default_value = DEFAULT_AVATAR, help = "Avatar shown for comment authors without one")]
    pub default_avatar: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub page: PageConfig,
    pub log_level: log::LevelFilter,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub base_url: String, // VIDTAG_SERVER_URL
    pub timeout: Duration, // VIDTAG_TIMEOUT_SECS
}

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub default_avatar: String, // VIDTAG_DEFAULT_AVATAR
}

impl ServerConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self { default_avatar: DEFAULT_AVATAR.to_string() }
    }
}

impl From<FlatConfig> for Config {
    fn from(value: FlatConfig) -> Self {
        Config {
            server: ServerConfig {
                base_url: value.server_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_secs(value.timeout_secs.max(1)),
            },
            page: PageConfig {
                default_avatar: value.default_avatar,
            },
            log_level: value.log_level,
        }
    }
}
