//! Static site builder.
//!
//! Drives the full pipeline once: enumerate every routable path from the
//! CMS, fetch each path's data, render it, and write the result under the
//! output directory. Page fetches are IO-bound, so paths build concurrently
//! on the runtime rather than on a thread pool.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use fascia_client::{enumerate_paths, fetch_page_data, ClientError, ContentApi};

use crate::assets::AssetPipeline;
use crate::renderer::{PageRenderer, RenderError};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// CMS model holding page documents
    pub page_model: String,

    /// CMS model holding the auxiliary data collection
    pub data_model: String,

    /// Minify CSS output
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            page_model: "page".to_string(),
            data_model: "artworks".to_string(),
            minify: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("CMS query failed: {0}")]
    Client(#[from] ClientError),

    #[error("Failed to render page: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Build task failed: {0}")]
    Task(String),
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    api: ContentApi,
    renderer: Arc<PageRenderer>,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig, api: ContentApi, renderer: Arc<PageRenderer>) -> Self {
        Self {
            config,
            api,
            renderer,
        }
    }

    /// Build the static site.
    ///
    /// An empty path enumeration is a valid zero-page build; any CMS error
    /// aborts the build.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        let path_set = enumerate_paths(&self.api, &self.config.page_model).await?;

        // Duplicates are tolerated in the enumeration; build each path once.
        let mut seen = HashSet::new();
        let paths: Vec<String> = path_set
            .paths
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();

        let mut tasks = JoinSet::new();
        for path in paths {
            let api = self.api.clone();
            let renderer = Arc::clone(&self.renderer);
            let page_model = self.config.page_model.clone();
            let data_model = self.config.data_model.clone();
            let output_dir = self.config.output_dir.clone();

            tasks.spawn(async move {
                build_page(&api, &renderer, &page_model, &data_model, &output_dir, &path).await
            });
        }

        let mut total_pages = 0;
        while let Some(joined) = tasks.join_next().await {
            joined.map_err(|e| BuildError::Task(e.to_string()))??;
            total_pages += 1;
        }

        self.generate_assets()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: total_pages,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::Write(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        Ok(())
    }
}

/// Fetch, render, and write one path.
async fn build_page(
    api: &ContentApi,
    renderer: &PageRenderer,
    page_model: &str,
    data_model: &str,
    output_dir: &Path,
    path: &str,
) -> Result<(), BuildError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let data = fetch_page_data(api, page_model, data_model, &segments).await?;

    // Build-time renders are never fallback routes or preview sessions; an
    // enumerated path whose page has vanished still gets its 404 shell.
    let rendered = renderer.render(data.page.as_ref(), &data.artworks, false, false)?;

    let output_path = page_output_path(output_dir, path);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::Write(e.to_string()))?;
    }
    fs::write(&output_path, &rendered.html).map_err(|e| BuildError::Write(e.to_string()))?;

    tracing::debug!("Wrote {} ({})", output_path.display(), rendered.status);

    Ok(())
}

/// Calculate the output file for a URL path.
///
/// `/` maps to `index.html`; `/about/team` maps to `about/team/index.html`.
fn page_output_path(output_dir: &Path, path: &str) -> PathBuf {
    let mut out = output_dir.to_path_buf();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push(segment);
    }
    out.join("index.html")
}
