// src/api/server.rs

//! HTTP surface: `GET /notifications?limit=<n>`.

use std::sync::Arc;

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use super::{CONTENT_TYPE_JSON, FeedResponse, respond};
use crate::error::Result;
use crate::pipeline::FeedPipeline;

/// Build the feed router.
pub fn router(pipeline: Arc<FeedPipeline>) -> Router {
    Router::new()
        .route("/notifications", get(notifications))
        .with_state(pipeline)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(pipeline: Arc<FeedPipeline>, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!(
        "Serving notifications on http://{}/notifications",
        listener.local_addr()?
    );
    axum::serve(listener, router(pipeline)).await?;
    Ok(())
}

async fn notifications(
    State(pipeline): State<Arc<FeedPipeline>>,
    RawQuery(query): RawQuery,
) -> Response {
    let limit = query.as_deref().and_then(limit_param);
    respond(&pipeline, limit.as_deref()).await.into_response()
}

/// First `limit` value of a query string, kept raw.
///
/// Repeated or malformed parameters never reject the request; the responder
/// decides what an unusable value means.
fn limit_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "limit")
        .map(|(_, value)| value.into_owned())
}

impl IntoResponse for FeedResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CONTENT_TYPE_JSON),
        );
        if let Some(value) = self
            .cache_control
            .and_then(|cc| HeaderValue::from_str(&cc).ok())
        {
            headers.insert(header::CACHE_CONTROL, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::models::Config;
    use crate::utils::http::StaticFetcher;

    const INDEX_URL: &str = "https://psc.example.gov/notifications";

    fn pipeline(fetcher: StaticFetcher) -> Arc<FeedPipeline> {
        let mut config = Config::default();
        config.source.index_url = INDEX_URL.to_string();
        Arc::new(FeedPipeline::new(Arc::new(config), Arc::new(fetcher)).unwrap())
    }

    async fn get_json(
        app: Router,
        uri: &str,
    ) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_serves_feed_with_cache_header() {
        let fetcher = StaticFetcher::new()
            .with_page(
                INDEX_URL,
                r#"<a href="/gazette-date-15-08-2025">EXTRA ORDINARY GAZETTE DATE 15/08/2025</a>"#,
            )
            .with_page(
                "https://psc.example.gov/gazette-date-15-08-2025",
                r#"<a href="/files/382.pdf">Lecturer (Cat.No.382/2025)</a>"#,
            );

        let (status, cache, body) =
            get_json(router(pipeline(fetcher)), "/notifications?limit=abc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            cache.as_deref(),
            Some("public, s-maxage=10800, stale-while-revalidate=86400")
        );
        assert_eq!(body["count"], 1);
        assert_eq!(body["items"][0]["pdfUrl"], "https://psc.example.gov/files/382.pdf");
    }

    #[test]
    fn test_limit_param_takes_first_value() {
        assert_eq!(limit_param("limit=10&limit=20").as_deref(), Some("10"));
        assert_eq!(limit_param("x=1&limit=%2012").as_deref(), Some(" 12"));
        assert_eq!(limit_param("limits=3"), None);
        assert_eq!(limit_param(""), None);
    }

    #[tokio::test]
    async fn test_repeated_limit_uses_first_value() {
        let mut gazette = String::new();
        for cat in 1..=30 {
            gazette.push_str(&format!(
                r#"<a href="/files/{cat}.pdf">Post (Cat.No.{cat}/2025)</a>"#
            ));
        }
        let fetcher = StaticFetcher::new()
            .with_page(
                INDEX_URL,
                r#"<a href="/gazette-date-15-08-2025">EXTRA ORDINARY GAZETTE DATE 15/08/2025</a>"#,
            )
            .with_page("https://psc.example.gov/gazette-date-15-08-2025", gazette);

        let (status, cache, body) =
            get_json(router(pipeline(fetcher)), "/notifications?limit=10&limit=20").await;

        assert_eq!(status, StatusCode::OK);
        assert!(cache.is_some());
        assert_eq!(body["count"], 10);
        assert_eq!(body["items"][0]["catNo"], "30/2025");
    }

    #[tokio::test]
    async fn test_index_failure_returns_500_envelope() {
        let fetcher = StaticFetcher::new().with_status(INDEX_URL, 503, "unavailable");

        let (status, cache, body) = get_json(router(pipeline(fetcher)), "/notifications").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(cache.is_none());
        assert!(body["error"].as_str().unwrap().contains("503"));
        assert!(body.get("items").is_none());
    }
}
