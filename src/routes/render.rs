//! Page render endpoint
//!
//! `POST /` renders page 1 of the server's input PDF and returns it as PNG.
//! Any request body, multipart or otherwise, is ignored.

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    routing::post,
    Router,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the render router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(render_first_page))
}

async fn render_first_page(State(state): State<AppState>) -> Result<Response> {
    let page = state.rasterizer().render_first_page().await?;

    tracing::info!(
        "Rendered page {} at {}x{} ({} bytes)",
        page.page,
        page.width,
        page.height,
        page.data.len()
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, page.content_type())
        .header(header::CONTENT_LENGTH, page.data.len())
        .body(Body::from(page.data))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::pdf::{PageRasterizer, RenderError, RenderResult, RenderedPage};

    enum StubRasterizer {
        Png(Vec<u8>),
        Missing,
        Broken,
    }

    #[async_trait]
    impl PageRasterizer for StubRasterizer {
        async fn render_first_page(&self) -> RenderResult<RenderedPage> {
            match self {
                StubRasterizer::Png(data) => Ok(RenderedPage {
                    page: 1,
                    data: data.clone(),
                    width: 2,
                    height: 2,
                }),
                StubRasterizer::Missing => {
                    Err(RenderError::InputNotFound(PathBuf::from("sample.pdf")))
                }
                StubRasterizer::Broken => Err(RenderError::DocumentLoad(
                    "no objects found".to_string(),
                )),
            }
        }
    }

    fn app(stub: StubRasterizer) -> Router {
        router().with_state(AppState::with_rasterizer(Arc::new(stub)))
    }

    async fn post_root(app: Router) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app
            .oneshot(Request::post("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, body.to_vec())
    }

    #[tokio::test]
    async fn test_success_returns_png() {
        let (status, content_type, body) =
            post_root(app(StubRasterizer::Png(vec![1, 2, 3]))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/png"));
        assert_eq!(body, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_input_returns_500() {
        let (status, _, body) = post_root(app(StubRasterizer::Missing)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(String::from_utf8(body).unwrap(), "Input file not found: sample.pdf");
    }

    #[tokio::test]
    async fn test_load_failure_returns_500() {
        let (status, _, body) = post_root(app(StubRasterizer::Broken)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "Failed to load document: no objects found"
        );
    }

    #[tokio::test]
    async fn test_get_is_not_routed() {
        let response = app(StubRasterizer::Png(vec![]))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
