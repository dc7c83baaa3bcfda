//! CLI command implementations.

pub mod build;
pub mod init;
pub mod preview;
pub mod serve;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use fascia_client::ContentApi;
use fascia_static::{PageRenderer, RendererConfig};
use fascia_widgets::{register_builtin_widgets, WidgetRegistry};

use crate::config::{load_config, ConfigFile};

/// Everything a command needs after startup.
pub(crate) struct AppContext {
    pub config: ConfigFile,
    pub api: ContentApi,
    pub renderer: Arc<PageRenderer>,
}

/// One-time startup: load config, initialize the CMS client, and populate
/// the widget registry before any rendering happens.
pub(crate) fn startup(config_path: &Path, api_key: Option<String>) -> Result<AppContext> {
    let config = load_config(config_path)?;

    let api_key = api_key
        .or_else(|| config.cms.api_key.clone())
        .context("No CMS API key configured; set cms.api_key in fascia.toml or pass --api-key")?;

    let api = ContentApi::new(&config.cms.base_url, api_key)
        .context("Invalid CMS base URL in configuration")?;

    // Widget registration happens exactly once, before any reads
    let mut registry = WidgetRegistry::new();
    register_builtin_widgets(&mut registry);
    tracing::debug!("Registered {} widgets", registry.len());

    let renderer = Arc::new(PageRenderer::new(
        RendererConfig {
            site_title: config.site.title.clone(),
            base_url: config.site.base_url.clone(),
            page_model: config.cms.page_model.clone(),
        },
        Arc::new(registry),
    ));

    Ok(AppContext {
        config,
        api,
        renderer,
    })
}
