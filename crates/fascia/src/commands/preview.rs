//! Editor preview session command.

use std::path::Path;

use anyhow::Result;

use fascia_server::{PreviewServer, PreviewServerConfig};

use super::startup;

/// Run the preview command.
pub async fn run(
    config_path: &Path,
    api_key: Option<String>,
    port: Option<u16>,
    open: bool,
) -> Result<()> {
    let ctx = startup(config_path, api_key)?;

    let server_config = PreviewServerConfig {
        host: ctx.config.serve.host.clone(),
        port: port.unwrap_or(ctx.config.serve.preview_port),
        page_model: ctx.config.cms.page_model.clone(),
        data_model: ctx.config.cms.data_model.clone(),
    };

    tracing::info!("Starting preview session on port {}", server_config.port);

    if open {
        let url = format!("http://{}:{}", server_config.host, server_config.port);
        let _ = open::that(&url);
    }

    PreviewServer::new(server_config, ctx.api, ctx.renderer)
        .start()
        .await?;

    Ok(())
}
