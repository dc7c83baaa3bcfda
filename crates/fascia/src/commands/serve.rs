//! Site server command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use fascia_server::{CachePolicy, PageCache, SiteServer, SiteServerConfig};

use super::startup;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    api_key: Option<String>,
    port: Option<u16>,
    open: bool,
) -> Result<()> {
    let ctx = startup(config_path, api_key)?;

    let policy = CachePolicy {
        ttl_seconds: ctx.config.cache.ttl_seconds,
        allow_on_demand_generation: ctx.config.cache.allow_on_demand,
    };

    let server_config = SiteServerConfig {
        host: ctx.config.serve.host.clone(),
        port: port.unwrap_or(ctx.config.serve.port),
        page_model: ctx.config.cms.page_model.clone(),
        data_model: ctx.config.cms.data_model.clone(),
        output_dir: PathBuf::from(&ctx.config.site.output),
    };

    tracing::info!(
        "Starting site server on port {} (ttl {}s, on-demand: {})",
        server_config.port,
        policy.ttl_seconds,
        policy.allow_on_demand_generation
    );

    if open {
        let url = format!("http://{}:{}", server_config.host, server_config.port);
        let _ = open::that(&url);
    }

    let cache = Arc::new(PageCache::new(policy));
    SiteServer::new(server_config, ctx.api, ctx.renderer, cache)
        .start()
        .await?;

    Ok(())
}
