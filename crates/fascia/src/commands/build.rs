//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use fascia_static::{BuildConfig, SiteBuilder};

use super::startup;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    api_key: Option<String>,
    output: Option<PathBuf>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let ctx = startup(config_path, api_key)?;

    let build_config = BuildConfig {
        output_dir: output.unwrap_or_else(|| PathBuf::from(&ctx.config.site.output)),
        page_model: ctx.config.cms.page_model.clone(),
        data_model: ctx.config.cms.data_model.clone(),
        minify: minify.unwrap_or(ctx.config.build.minify),
    };

    let result = SiteBuilder::new(build_config, ctx.api, ctx.renderer)
        .build()
        .await?;

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
