use axum::Json;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::previews::dtos::{
    SlugPreviewDto, SlugPreviewQuery, VideoPreviewDto, VideoResolveQuery,
};
use crate::shared::slug::{derive_slug, SlugAutoFill};
use crate::shared::types::ApiResponse;
use crate::shared::video::resolve_video;

/// Preview the slug for a title
#[utoipa::path(
    get,
    path = "/api/slugs/preview",
    params(SlugPreviewQuery),
    responses(
        (status = 200, description = "Derived slug", body = ApiResponse<SlugPreviewDto>),
        (status = 400, description = "Missing title")
    ),
    tag = "previews"
)]
pub async fn preview_slug(
    AppQuery(query): AppQuery<SlugPreviewQuery>,
) -> Result<Json<ApiResponse<SlugPreviewDto>>> {
    let mut form = match (&query.previous_title, &query.current_slug) {
        (Some(title), Some(slug)) => SlugAutoFill::from_existing(title, slug),
        (None, Some(slug)) => {
            let mut form = SlugAutoFill::new();
            form.slug_edited(slug);
            form
        }
        _ => SlugAutoFill::new(),
    };
    form.title_changed(&query.title);

    Ok(Json(ApiResponse::success(
        Some(SlugPreviewDto {
            derived: derive_slug(&query.title),
            is_auto: form.is_auto(),
            slug: form.into_value(),
        }),
        None,
        None,
    )))
}

/// Resolve a lesson video URL
#[utoipa::path(
    get,
    path = "/api/videos/resolve",
    params(VideoResolveQuery),
    responses(
        (status = 200, description = "Resolved video; unrecognised URLs are `unknown`", body = ApiResponse<VideoPreviewDto>),
        (status = 400, description = "Missing url")
    ),
    tag = "previews"
)]
pub async fn resolve_video_url(
    AppQuery(query): AppQuery<VideoResolveQuery>,
) -> Result<Json<ApiResponse<VideoPreviewDto>>> {
    let video = resolve_video(&query.url);
    tracing::debug!("Video URL resolved as {}", video.provider());
    let embed_url = video.embed_url();
    Ok(Json(ApiResponse::success(
        Some(VideoPreviewDto { video, embed_url }),
        None,
        None,
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::previews::routes;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    fn server() -> TestServer {
        TestServer::new(routes::routes()).unwrap()
    }

    #[tokio::test]
    async fn test_slug_preview_for_new_form() {
        let response = server()
            .get("/api/slugs/preview")
            .add_query_param("title", "Web Development!!")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["slug"], "web-development");
        assert_eq!(body["data"]["derived"], "web-development");
        assert_eq!(body["data"]["is_auto"], true);
    }

    #[tokio::test]
    async fn test_slug_preview_keeps_custom_slug() {
        let response = server()
            .get("/api/slugs/preview")
            .add_query_param("title", "Web Design")
            .add_query_param("previous_title", "Web Development")
            .add_query_param("current_slug", "webdev")
            .await;

        let body: Value = response.json();
        assert_eq!(body["data"]["slug"], "webdev");
        assert_eq!(body["data"]["derived"], "web-design");
        assert_eq!(body["data"]["is_auto"], false);
    }

    #[tokio::test]
    async fn test_slug_preview_follows_generated_slug() {
        let response = server()
            .get("/api/slugs/preview")
            .add_query_param("title", "Web Design")
            .add_query_param("previous_title", "Web Development")
            .add_query_param("current_slug", "web-development")
            .await;

        let body: Value = response.json();
        assert_eq!(body["data"]["slug"], "web-design");
    }

    #[tokio::test]
    async fn test_slug_preview_requires_title() {
        server()
            .get("/api/slugs/preview")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resolve_youtube() {
        let response = server()
            .get("/api/videos/resolve")
            .add_query_param("url", "https://youtube.com/watch?v=abc123&t=5")
            .await;

        let body: Value = response.json();
        assert_eq!(body["data"]["video"]["provider"], "youtube");
        assert_eq!(body["data"]["video"]["video_id"], "abc123");
        assert_eq!(
            body["data"]["embed_url"],
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[tokio::test]
    async fn test_resolve_unknown_is_not_an_error() {
        let response = server()
            .get("/api/videos/resolve")
            .add_query_param("url", "not a url")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["video"]["provider"], "unknown");
        assert_eq!(body["data"]["video"]["url"], "not a url");
        assert!(body["data"]["embed_url"].is_null());
    }
}
