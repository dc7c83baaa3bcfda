//! Editor preview server.
//!
//! Fetches content per request from the preview-environment data source and
//! renders with the preview flag set, so unpublished or absent pages show the
//! content view instead of a 404. No caching: editors expect to see every
//! save immediately.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use fascia_client::{ContentApi, GetAllOptions, GetQuery};
use fascia_static::{AssetPipeline, PageRenderer};

use crate::server::ServerError;

/// Configuration for the preview server.
#[derive(Debug, Clone)]
pub struct PreviewServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// CMS model holding page documents
    pub page_model: String,

    /// CMS model holding the auxiliary data collection
    pub data_model: String,
}

impl Default for PreviewServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7777,
            page_model: "page".to_string(),
            data_model: "artworks".to_string(),
        }
    }
}

/// Shared preview state.
struct PreviewState {
    api: ContentApi,
    renderer: Arc<PageRenderer>,
    page_model: String,
    data_model: String,
}

/// Editor preview server.
pub struct PreviewServer {
    config: PreviewServerConfig,
    state: Arc<PreviewState>,
}

impl PreviewServer {
    /// Create a new preview server.
    pub fn new(config: PreviewServerConfig, api: ContentApi, renderer: Arc<PageRenderer>) -> Self {
        let state = Arc::new(PreviewState {
            api,
            renderer,
            page_model: config.page_model.clone(),
            data_model: config.data_model.clone(),
        });

        Self { config, state }
    }

    /// Start the preview server.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ServerError::InvalidAddress(
                    format!("{}:{}", self.config.host, self.config.port),
                    e.to_string(),
                )
            })?;

        let app = Router::new()
            .route("/assets/main.css", get(css_handler))
            .fallback(get(preview_handler))
            .with_state(Arc::clone(&self.state));

        tracing::info!("Preview session at http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handler for all preview page routes.
async fn preview_handler(State(state): State<Arc<PreviewState>>, uri: Uri) -> Response {
    let path = uri.path();

    let page_query = GetQuery::url_path(path).with_preview();
    let data_options = GetAllOptions {
        preview: true,
        ..Default::default()
    };

    let (page, artworks) = tokio::join!(
        state.api.get(&state.page_model, &page_query),
        state.api.get_all(&state.data_model, &data_options),
    );

    // Hard CMS failures surface as the generic error page
    let (page, artworks) = match (page, artworks) {
        (Ok(page), Ok(artworks)) => (page, artworks),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("Preview fetch failed for {}: {}", path, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response();
        }
    };

    match state.renderer.render(page.as_ref(), &artworks, false, true) {
        Ok(rendered) => {
            let status =
                StatusCode::from_u16(rendered.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Html(rendered.html)).into_response()
        }
        Err(e) => {
            tracing::error!("Preview render failed for {}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Handler for the stylesheet.
async fn css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        AssetPipeline::generate_css(),
    )
}
