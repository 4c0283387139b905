//! HTTP server exposing rendered content to a page shell

use anyhow::Result;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{ContentLoader, ContentRecord};
use crate::Docsite;

/// Server state
struct ServerState {
    loader: ContentLoader,
}

/// Build the router serving a site's content
pub fn router(site: &Docsite) -> Result<Router> {
    let state = Arc::new(ServerState {
        loader: site.loader()?,
    });

    Ok(Router::new()
        .route("/api/slugs", get(slugs_handler))
        .route("/api/content/*slug", get(content_handler))
        .route("/docs/*slug", get(page_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the content server
pub async fn start(site: &Docsite, ip: &str, port: u16) -> Result<()> {
    let app = router(site)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Serving {:?} at http://{}:{}", site.content_dir, ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Render on the blocking pool; file reads and highlighting are synchronous
async fn render(state: Arc<ServerState>, slug: String) -> ContentRecord {
    let fallback = state.loader.fallback();
    let slug = slug.trim_start_matches('/').to_string();
    let task_slug = slug.clone();

    match tokio::task::spawn_blocking(move || state.loader.content(&task_slug)).await {
        Ok(record) => record,
        Err(e) => {
            tracing::error!("Render task for {} failed: {}", slug, e);
            fallback
        }
    }
}

async fn content_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Json<ContentRecord> {
    Json(render(state, slug).await)
}

async fn page_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    Html(render(state, slug).await.content)
}

async fn slugs_handler(State(state): State<Arc<ServerState>>) -> Json<Vec<String>> {
    let slugs = tokio::task::spawn_blocking(move || state.loader.slugs())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Slug listing task failed: {}", e);
            Vec::new()
        });
    Json(slugs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::fs;
    use tower::ServiceExt;

    fn site_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Docsite) {
        let dir = tempfile::tempdir().unwrap();
        let site = Docsite::new(dir.path()).unwrap();
        fs::create_dir_all(&site.content_dir).unwrap();
        for (name, content) in files {
            fs::write(site.content_dir.join(name), content).unwrap();
        }
        (dir, site)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_content_endpoint() {
        let (_dir, site) = site_with(&[("agents.md", "---\ntitle: Agents\n---\nHello")]);
        let (status, body) = get_body(router(&site).unwrap(), "/api/content/agents").await;

        assert_eq!(status, StatusCode::OK);
        let record: ContentRecord = serde_json::from_str(&body).unwrap();
        assert_eq!(record.content, "<p>Hello</p>\n");
        assert_eq!(record.title(), Some("Agents"));
    }

    #[tokio::test]
    async fn test_missing_content_degrades_to_fallback() {
        let (_dir, site) = site_with(&[]);
        let (status, body) = get_body(router(&site).unwrap(), "/api/content/nope").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"content":"<p>Content not found.</p>","data":{}}"#);
    }

    #[tokio::test]
    async fn test_page_endpoint_returns_html() {
        let (_dir, site) = site_with(&[("graphs.md", "# Graphs")]);
        let (status, body) = get_body(router(&site).unwrap(), "/docs/graphs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>Graphs</h1>\n");
    }

    #[tokio::test]
    async fn test_slugs_endpoint() {
        let (_dir, site) = site_with(&[("b.md", ""), ("a.md", "")]);
        let (_, body) = get_body(router(&site).unwrap(), "/api/slugs").await;
        assert_eq!(body, r#"["a","b"]"#);
    }
}
