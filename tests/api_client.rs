use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use vidtag_lib::api::{ApiClient, Backend};
use vidtag_lib::config::{PageConfig, ServerConfig};
use vidtag_lib::entities::VideoId;
use vidtag_lib::error::PageError;
use vidtag_lib::page::{PageEvent, VideoPageController};
use vidtag_lib::view::{EditableField, HtmlPageView};

type Requests = Arc<Mutex<Vec<(String, String)>>>;

const PAGE: &str = r#"<html><body>
<h1 id="video-title">Sunset &amp; Sea</h1>
<p id="description-display">Filmed at dusk</p>
<div id="tag-input-container" data-video-id="5" data-tags="beach,sunset"></div>
</body></html>"#;

fn record(requests: &Requests, path: String, body: String) {
    requests.lock().unwrap().push((path, body));
}

async fn video_page(Path(id): Path<String>) -> Response {
    if id == "5" {
        Html(PAGE).into_response()
    } else {
        (StatusCode::NOT_FOUND, "Not Found").into_response()
    }
}

async fn edit_tags(State(requests): State<Requests>, Path(id): Path<String>, Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    record(&requests, format!("/edit_tags/{}", id), form.get("tags").cloned().unwrap_or_default());
    Json(json!({ "success": true }))
}

async fn suggestions(Query(query): Query<HashMap<String, String>>) -> Json<Vec<String>> {
    let q = query.get("q").cloned().unwrap_or_default();
    let all = ["sunset", "sunrise", "beach"];
    Json(all.iter().filter(|x| x.contains(q.as_str())).map(|x| x.to_string()).collect())
}

async fn edit_description(State(requests): State<Requests>, Path(id): Path<String>, Form(form): Form<HashMap<String, String>>) -> Response {
    let description = form.get("description").cloned().unwrap_or_default();
    record(&requests, format!("/edit_description/{}", id), description.clone());
    if description == "fail" {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false, "error": "disk full" }))).into_response();
    }
    Json(json!({ "success": true })).into_response()
}

async fn edit_title(State(requests): State<Requests>, Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    record(&requests, format!("/edit_title/{}", id), body.to_string());
    Json(json!({ "success": true }))
}

async fn like(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({ "success": true, "new_like_count": 3 }))
}

async fn like_comment(Path(id): Path<i64>) -> Response {
    if id == 1 {
        return Json(json!({ "success": true, "new_like_count": 8 })).into_response();
    }
    (StatusCode::NOT_FOUND, Json(json!({ "success": false, "error": "Comment not found" }))).into_response()
}

async fn add_comment(State(requests): State<Requests>, Path(id): Path<String>, Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    let author = form.get("author").cloned().unwrap_or_default();
    let content = form.get("content").cloned().unwrap_or_default();
    record(&requests, format!("/add_comment/{}", id), format!("{}|{}", &author, &content));
    Json(json!({
        "success": true,
        "comment": {
            "id": 12,
            "author": author,
            "author_slug": "ann-lee",
            "author_avatar": "avatars/ann.png",
            "content": content,
            "timestamp": "01/01/2024 12:00 PM"
        }
    }))
}

async fn move_to_regular() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

async fn increment_view() -> Json<Value> {
    Json(json!({ "success": true }))
}

async fn start_server() -> (SocketAddr, Requests) {
    let requests = Requests::default();
    let app = Router::new()
        .route("/video/:id", get(video_page))
        .route("/edit_tags/:id", post(edit_tags))
        .route("/get_tag_suggestions", get(suggestions))
        .route("/edit_description/:id", post(edit_description))
        .route("/edit_title/:id", post(edit_title))
        .route("/like/:id", post(like))
        .route("/like_comment/:id", post(like_comment))
        .route("/add_comment/:id", post(add_comment))
        .route("/move_to_regular/:id", post(move_to_regular))
        .route("/increment_view/:id", post(increment_view))
        .with_state(requests.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, requests)
}

fn client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(ServerConfig::new(&format!("http://{}/", addr))).unwrap()
}

fn video() -> VideoId {
    VideoId::new("5")
}

#[tokio::test]
async fn test_successful_calls() {
    let (addr, requests) = start_server().await;
    let client = client(addr);
    assert_eq!(client.base_url(), format!("http://{}", addr));

    client.edit_tags(&video(), "beach,sunset,sea").await.unwrap();
    client.edit_title(&video(), "New title").await.unwrap();
    assert_eq!(client.like_video(&video()).await.unwrap(), 3);
    assert_eq!(client.like_comment(1).await.unwrap(), 8);

    let requests = requests.lock().unwrap().clone();
    assert_eq!(requests[0], ("/edit_tags/5".to_string(), "beach,sunset,sea".to_string()));
    assert_eq!(requests[1].0, "/edit_title/5");
    let body: Value = serde_json::from_str(&requests[1].1).unwrap();
    assert_eq!(body, json!({ "title": "New title" }));
}

#[tokio::test]
async fn test_suggestions_are_queried() {
    let (addr, _) = start_server().await;
    let client = client(addr);
    assert_eq!(client.tag_suggestions("sun").await.unwrap(), vec!["sunset", "sunrise"]);
    assert!(client.tag_suggestions("zzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_added_comment_is_decoded() {
    let (addr, requests) = start_server().await;
    let client = client(addr);
    let comment = client.add_comment(&video(), "Ann Lee", "great & calm").await.unwrap();
    assert_eq!(comment.id, 12);
    assert_eq!(comment.author_slug, "ann-lee");
    assert_eq!(comment.author_avatar.as_deref(), Some("avatars/ann.png"));
    assert_eq!(comment.likes, 0);
    assert_eq!(requests.lock().unwrap()[0].1, "Ann Lee|great & calm");
}

#[tokio::test]
async fn test_rejections() {
    let (addr, _) = start_server().await;
    let client = client(addr);

    let err = client.edit_description(&video(), "fail").await.unwrap_err();
    assert!(matches!(err, PageError::Rejected { status: 500, .. }));
    assert_eq!(err.server_message(), Some("disk full"));

    let err = client.like_comment(99).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Comment not found"));

    let err = client.move_to_regular(&video()).await.unwrap_err();
    assert!(matches!(err, PageError::Rejected { status: 404, message: None }));
    assert!(!err.is_transport());

    let err = client.increment_view(&video()).await.unwrap_err();
    assert!(matches!(err, PageError::IncompleteResponse("new_view_count")));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = client(addr).like_video(&video()).await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_controller_over_http() {
    let (addr, requests) = start_server().await;
    let mut page = VideoPageController::load(client(addr), HtmlPageView::new(), PageConfig::default(), &video())
        .await
        .unwrap();
    assert_eq!(page.tags().to_tags_string(), "beach,sunset");
    assert_eq!(page.view().field(EditableField::Title).display_text, "Sunset & Sea");

    page.handle(PageEvent::TagInputChanged("SUN".to_string())).await;
    assert_eq!(page.view().suggestions(), &["sunset".to_string(), "sunrise".to_string()]);
    page.handle(PageEvent::SuggestionClicked("sunrise".to_string())).await;
    page.handle(PageEvent::EditClicked(EditableField::Description)).await;
    page.handle(PageEvent::SaveClicked { field: EditableField::Description, value: "fail".to_string() }).await;
    page.handle(PageEvent::CommentSubmitted { author: "Ann Lee".to_string(), content: "lovely".to_string() }).await;

    assert_eq!(page.tags().to_tags_string(), "beach,sunset,sunrise");
    assert!(page.editor(EditableField::Description).is_editing());
    assert_eq!(page.view().alerts(), &["Error updating description: disk full".to_string()]);
    assert_eq!(page.view().comments()[0].avatar_src, "/static/avatars/ann.png");
    assert_eq!(page.view().comments()[0].author_href, "/artist/ann-lee");

    let requests = requests.lock().unwrap().clone();
    assert_eq!(requests[0], ("/edit_tags/5".to_string(), "beach,sunset,sunrise".to_string()));
}

#[tokio::test]
async fn test_load_of_missing_page_fails() {
    let (addr, _) = start_server().await;
    let result = VideoPageController::load(client(addr), HtmlPageView::new(), PageConfig::default(), &VideoId::new("404")).await;
    assert!(matches!(result, Err(PageError::Rejected { status: 404, .. })));
}
