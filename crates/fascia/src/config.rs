//! Configuration file (fascia.toml) loading.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Configuration file structure (fascia.toml).
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub cms: CmsConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub serve: ServeConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct CmsConfig {
    /// Content API key; may instead come from --api-key or FASCIA_API_KEY
    pub api_key: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_model")]
    pub page_model: String,
    #[serde(default = "default_data_model")]
    pub data_model: String,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    #[serde(default = "default_allow_on_demand")]
    pub allow_on_demand: bool,
}

#[derive(Debug, Deserialize)]
pub struct ServeConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_preview_port")]
    pub preview_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

fn default_api_base_url() -> String {
    "https://cdn.builder.io/api/v3".to_string()
}
fn default_page_model() -> String {
    "page".to_string()
}
fn default_data_model() -> String {
    "artworks".to_string()
}
fn default_title() -> String {
    "My Site".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_ttl_seconds() -> u64 {
    5
}
fn default_allow_on_demand() -> bool {
    true
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    4000
}
fn default_preview_port() -> u16 {
    7777
}
fn default_minify() -> bool {
    true
}

macro_rules! default_section {
    ($ty:ty) => {
        impl Default for $ty {
            fn default() -> Self {
                // Empty tables pick up every serde default
                toml::from_str("").expect("section defaults must deserialize")
            }
        }
    };
}

default_section!(CmsConfig);
default_section!(SiteConfig);
default_section!(CacheConfig);
default_section!(ServeConfig);
default_section!(BuildSettings);

/// Load configuration from fascia.toml if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }

    Ok(toml::from_str("").expect("empty config must deserialize"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_yields_full_defaults() {
        let config = load_config(Path::new("does-not-exist.toml")).unwrap();

        assert_eq!(config.cms.base_url, "https://cdn.builder.io/api/v3");
        assert_eq!(config.cms.page_model, "page");
        assert_eq!(config.cms.data_model, "artworks");
        assert!(config.cms.api_key.is_none());
        assert_eq!(config.cache.ttl_seconds, 5);
        assert!(config.cache.allow_on_demand);
        assert_eq!(config.site.output, "dist");
        assert!(config.build.minify);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[cms]
api_key = "key-123"

[cache]
ttl_seconds = 30
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.cms.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.cache.ttl_seconds, 30);
        assert!(config.cache.allow_on_demand);
        assert_eq!(config.serve.port, 4000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not [valid toml").unwrap();

        assert!(load_config(file.path()).is_err());
    }
}
