//! Initialize fascia in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing fascia...");

    let config_path = Path::new("fascia.toml");
    if config_path.exists() && !yes {
        tracing::warn!("fascia.toml already exists. Use --yes to overwrite.");
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG).context("Failed to write fascia.toml")?;
    tracing::info!("Created fascia.toml");

    tracing::info!("Initialization complete!");
    tracing::info!("Set cms.api_key, then run 'fascia build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Fascia Configuration

[cms]
# Content API key for the hosted CMS
api_key = ""

# Content API base URL
base_url = "https://cdn.builder.io/api/v3"

# Model holding page documents
page_model = "page"

# Model holding the auxiliary data collection
data_model = "artworks"

[site]
# Site title
title = "My Site"

# Output directory for the built site
output = "dist"

# Base URL (for deployment)
base_url = "/"

[cache]
# Maximum age in seconds before a served page attempts a refresh
ttl_seconds = 5

# Generate unknown paths on demand instead of returning 404
allow_on_demand = true

[serve]
host = "127.0.0.1"
port = 4000
preview_port = 7777

[build]
# Enable minification
minify = true
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config: crate::config::ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.cms.page_model, "page");
        assert_eq!(config.cache.ttl_seconds, 5);
        assert_eq!(config.serve.preview_port, 7777);
    }
}
