//! Public site server.
//!
//! Every page request goes through the stale-while-revalidate cache: fresh
//! entries serve directly, stale entries serve while one background task
//! regenerates, and unknown paths either get a placeholder plus on-demand
//! generation or a 404, per the cache policy.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use fascia_client::{fetch_page_data, ClientError, ContentApi};
use fascia_static::{AssetPipeline, PageRenderer, RenderError, RenderedPage};

use crate::cache::{CacheDecision, PageCache};

/// Configuration for the site server.
#[derive(Debug, Clone)]
pub struct SiteServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// CMS model holding page documents
    pub page_model: String,

    /// CMS model holding the auxiliary data collection
    pub data_model: String,

    /// Built site directory (assets are served from here)
    pub output_dir: PathBuf,
}

impl Default for SiteServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4000,
            page_model: "page".to_string(),
            data_model: "artworks".to_string(),
            output_dir: PathBuf::from("dist"),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}: {1}")]
    InvalidAddress(String, String),

    #[error("Failed to bind to {0}: {1}")]
    Bind(SocketAddr, String),

    #[error("Failed to write assets: {0}")]
    Assets(String),
}

/// Shared server state.
struct ServerState {
    api: ContentApi,
    renderer: Arc<PageRenderer>,
    cache: Arc<PageCache>,
    page_model: String,
    data_model: String,
}

/// Why a background regeneration failed.
#[derive(Debug, thiserror::Error)]
enum RegenerateError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Public site server.
pub struct SiteServer {
    config: SiteServerConfig,
    state: Arc<ServerState>,
}

impl SiteServer {
    /// Create a new site server.
    ///
    /// The renderer's widget registry must be fully populated before this
    /// point; the server only reads it.
    pub fn new(
        config: SiteServerConfig,
        api: ContentApi,
        renderer: Arc<PageRenderer>,
        cache: Arc<PageCache>,
    ) -> Self {
        let state = Arc::new(ServerState {
            api,
            renderer,
            cache,
            page_model: config.page_model.clone(),
            data_model: config.data_model.clone(),
        });

        Self { config, state }
    }

    /// Start the server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::InvalidAddress(
                    format!("{}:{}", self.config.host, self.config.port),
                    e.to_string(),
                )
            })?;

        let assets_dir = self.config.output_dir.join("assets");
        ensure_assets(&assets_dir)?;

        let app = Router::new()
            .nest_service("/assets", ServeDir::new(&assets_dir))
            .fallback(get(page_handler))
            .with_state(Arc::clone(&self.state));

        tracing::info!("Serving site at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        Ok(())
    }
}

/// Write the stylesheet if a prior build did not.
fn ensure_assets(assets_dir: &std::path::Path) -> Result<(), ServerError> {
    let css_path = assets_dir.join("main.css");
    if !css_path.exists() {
        std::fs::create_dir_all(assets_dir).map_err(|e| ServerError::Assets(e.to_string()))?;
        std::fs::write(&css_path, AssetPipeline::generate_css())
            .map_err(|e| ServerError::Assets(e.to_string()))?;
    }
    Ok(())
}

/// Normalize a request path into a cache key.
///
/// `/about` and `/about/` target the same document; collapsing the trailing
/// slash keeps them on one cache entry instead of generating twice.
fn cache_key(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Handler for all page routes.
async fn page_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    let path = cache_key(uri.path());

    match state.cache.lookup(&path).await {
        CacheDecision::Fresh(rendered) => respond(rendered),

        CacheDecision::Stale {
            rendered,
            claimed_refresh,
        } => {
            if claimed_refresh {
                spawn_regeneration(Arc::clone(&state), path);
            }
            respond(rendered)
        }

        CacheDecision::MissGenerate => {
            spawn_regeneration(Arc::clone(&state), path);

            // Fallback route: placeholder now, real page on the next visit
            match state.renderer.render(None, &[], true, false) {
                Ok(rendered) => respond(rendered),
                Err(e) => internal_error(&e),
            }
        }

        CacheDecision::MissNotFound => match state.renderer.render(None, &[], false, false) {
            Ok(rendered) => respond(rendered),
            Err(e) => internal_error(&e),
        },
    }
}

/// Spawn a background regeneration for one path.
///
/// Failures log and release the refresh claim; the in-flight request already
/// got its response, so nothing surfaces to it.
fn spawn_regeneration(state: Arc<ServerState>, path: String) {
    tokio::spawn(async move {
        if let Err(e) = regenerate(&state, &path).await {
            tracing::warn!("Failed to regenerate {}: {}", path, e);
            state.cache.release_refresh(&path).await;
        }
    });
}

/// Fetch, render, and cache one path.
async fn regenerate(state: &ServerState, path: &str) -> Result<(), RegenerateError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let data = fetch_page_data(&state.api, &state.page_model, &state.data_model, &segments).await?;

    let rendered = state
        .renderer
        .render(data.page.as_ref(), &data.artworks, false, false)?;

    state.cache.insert(path, rendered).await;
    tracing::debug!("Regenerated {}", path);

    Ok(())
}

fn respond(rendered: RenderedPage) -> Response {
    let status =
        StatusCode::from_u16(rendered.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Html(rendered.html)).into_response()
}

fn internal_error(e: &RenderError) -> Response {
    tracing::error!("Render failure: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CachePolicy;
    use fascia_static::{PageView, RendererConfig};
    use fascia_widgets::{register_builtin_widgets, WidgetRegistry};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn renderer() -> Arc<PageRenderer> {
        let mut registry = WidgetRegistry::new();
        register_builtin_widgets(&mut registry);
        Arc::new(PageRenderer::new(
            RendererConfig::default(),
            Arc::new(registry),
        ))
    }

    fn state(server: &MockServer, policy: CachePolicy) -> Arc<ServerState> {
        Arc::new(ServerState {
            api: ContentApi::new(&server.base_url(), "test-key").unwrap(),
            renderer: renderer(),
            cache: Arc::new(PageCache::new(policy)),
            page_model: "page".to_string(),
            data_model: "artworks".to_string(),
        })
    }

    async fn mock_cms(server: &MockServer, text: &str) {
        let body = json!({ "results": [{
            "name": "Page",
            "data": { "blocks": [{ "component": { "name": "Text", "options": { "text": text } } }] }
        }] });
        server
            .mock_async(move |when, then| {
                when.method(GET).path("/content/page");
                then.status(200).json_body(body);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/content/artworks");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;
    }

    async fn wait_for_cache(cache: &PageCache) {
        for _ in 0..50 {
            if !cache.is_empty().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("timed out waiting for background generation");
    }

    #[tokio::test]
    async fn miss_serves_placeholder_then_generated_page() {
        let server = MockServer::start_async().await;
        mock_cms(&server, "Generated").await;

        let state = state(&server, CachePolicy::default());

        let first = page_handler(State(Arc::clone(&state)), Uri::from_static("/about")).await;
        assert_eq!(first.status(), StatusCode::OK);

        wait_for_cache(&state.cache).await;

        match state.cache.lookup("/about").await {
            CacheDecision::Fresh(rendered) => {
                assert_eq!(rendered.view, PageView::Content);
                assert!(rendered.html.contains("Generated"));
            }
            other => panic!("expected generated page in cache, got {other:?}"),
        }
    }

    #[test]
    fn cache_key_collapses_trailing_slash() {
        assert_eq!(cache_key("/about/"), "/about");
        assert_eq!(cache_key("/about"), "/about");
        assert_eq!(cache_key("/"), "/");
    }

    #[tokio::test]
    async fn trailing_slash_variants_share_one_cache_entry() {
        let server = MockServer::start_async().await;
        mock_cms(&server, "Shared").await;

        let state = state(&server, CachePolicy::default());

        let first = page_handler(State(Arc::clone(&state)), Uri::from_static("/about/")).await;
        assert_eq!(first.status(), StatusCode::OK);

        wait_for_cache(&state.cache).await;

        let second = page_handler(State(Arc::clone(&state)), Uri::from_static("/about")).await;
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(state.cache.len().await, 1);
    }

    #[tokio::test]
    async fn miss_without_on_demand_generation_is_404() {
        let server = MockServer::start_async().await;

        let state = state(
            &server,
            CachePolicy {
                ttl_seconds: 5,
                allow_on_demand_generation: false,
            },
        );

        let response = page_handler(State(state), Uri::from_static("/unknown")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stale_hit_serves_immediately_and_refreshes_in_background() {
        let server = MockServer::start_async().await;
        mock_cms(&server, "Fresh copy").await;

        let state = state(
            &server,
            CachePolicy {
                ttl_seconds: 0,
                allow_on_demand_generation: true,
            },
        );

        state
            .cache
            .insert(
                "/",
                RenderedPage {
                    view: PageView::Content,
                    html: "Stale copy".to_string(),
                    status: 200,
                    noindex: false,
                },
            )
            .await;

        let response = page_handler(State(Arc::clone(&state)), Uri::from_static("/")).await;
        assert_eq!(response.status(), StatusCode::OK);

        // The refresh eventually lands without having blocked the request
        for _ in 0..50 {
            if let CacheDecision::Stale { rendered, .. } = state.cache.lookup("/").await {
                if rendered.html.contains("Fresh copy") {
                    return;
                }
                state.cache.release_refresh("/").await;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("background refresh never replaced the stale entry");
    }

    #[tokio::test]
    async fn failed_regeneration_leaves_the_cache_unchanged() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/content/");
                then.status(500);
            })
            .await;

        let state = state(&server, CachePolicy::default());

        let err = regenerate(&state, "/broken").await.unwrap_err();
        assert!(matches!(err, RegenerateError::Client(_)));
        assert!(state.cache.is_empty().await);
    }
}
