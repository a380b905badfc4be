use std::sync::Arc;
use log::debug;
use reqwest::{Client, Response};
use serde_json::json;
use crate::api::{Backend, Reply};
use crate::config::ServerConfig;
use crate::entities::{Comment, CommentId, VideoId};
use crate::error::{PageError, Result};

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: Arc<ServerConfig>,
}

impl ApiClient {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config: Arc::new(config) })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn post_empty(&self, path: &str) -> Result<Reply> {
        let url = self.url(path);
        debug!("POST {}", &url);
        let res = self.client.post(&url).send().await?;
        read_reply(res).await
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Reply> {
        let url = self.url(path);
        debug!("POST {} (form)", &url);
        let res = self.client.post(&url).form(form).send().await?;
        read_reply(res).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<Reply> {
        let url = self.url(path);
        debug!("POST {} (json)", &url);
        let res = self.client.post(&url).json(body).send().await?;
        read_reply(res).await
    }
}

/// Decodes the shared reply envelope. An error status whose body is not JSON
/// still counts as a rejection, not as a decoding failure.
async fn read_reply(res: Response) -> Result<Reply> {
    let status = res.status();
    let body = res.text().await?;
    let reply: Reply = match serde_json::from_str(&body) {
        Ok(reply) => reply,
        Err(_) if !status.is_success() => return Err(PageError::rejected(status.as_u16(), None)),
        Err(e) => return Err(PageError::Decode(e)),
    };
    if !status.is_success() || !reply.success {
        return Err(PageError::rejected(status.as_u16(), reply.error));
    }
    Ok(reply)
}

impl Backend for ApiClient {
    async fn load_page(&self, video_id: &VideoId) -> Result<String> {
        let url = self.url(&format!("/video/{}", video_id));
        debug!("GET {}", &url);
        let res = self.client.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(PageError::rejected(status.as_u16(), None));
        }
        Ok(res.text().await?)
    }

    async fn edit_tags(&self, video_id: &VideoId, tags: &str) -> Result<()> {
        self.post_form(&format!("/edit_tags/{}", video_id), &[("tags", tags)]).await?;
        Ok(())
    }

    async fn tag_suggestions(&self, query: &str) -> Result<Vec<String>> {
        let url = self.url("/get_tag_suggestions");
        debug!("GET {}?q={}", &url, query);
        let res = self.client.get(&url).query(&[("q", query)]).send().await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<Reply>(&body).ok().and_then(|x| x.error);
            return Err(PageError::rejected(status.as_u16(), message));
        }
        let suggestions: Vec<String> = serde_json::from_str(&body)?;
        Ok(suggestions)
    }

    async fn edit_description(&self, video_id: &VideoId, description: &str) -> Result<()> {
        self.post_form(&format!("/edit_description/{}", video_id), &[("description", description)]).await?;
        Ok(())
    }

    async fn edit_title(&self, video_id: &VideoId, title: &str) -> Result<()> {
        self.post_json(&format!("/edit_title/{}", video_id), &json!({ "title": title })).await?;
        Ok(())
    }

    async fn like_video(&self, video_id: &VideoId) -> Result<i64> {
        let reply = self.post_empty(&format!("/like/{}", video_id)).await?;
        reply.new_like_count.ok_or(PageError::IncompleteResponse("new_like_count"))
    }

    async fn add_comment(&self, video_id: &VideoId, author: &str, content: &str) -> Result<Comment> {
        let reply = self.post_form(&format!("/add_comment/{}", video_id), &[("author", author), ("content", content)]).await?;
        reply.comment.ok_or(PageError::IncompleteResponse("comment"))
    }

    async fn like_comment(&self, comment_id: CommentId) -> Result<i64> {
        let reply = self.post_empty(&format!("/like_comment/{}", comment_id)).await?;
        reply.new_like_count.ok_or(PageError::IncompleteResponse("new_like_count"))
    }

    async fn move_to_regular(&self, video_id: &VideoId) -> Result<()> {
        self.post_empty(&format!("/move_to_regular/{}", video_id)).await?;
        Ok(())
    }

    async fn increment_view(&self, video_id: &VideoId) -> Result<i64> {
        let reply = self.post_empty(&format!("/increment_view/{}", video_id)).await?;
        reply.new_view_count.ok_or(PageError::IncompleteResponse("new_view_count"))
    }
}
