//! HTTP client for the CMS content read API.
//!
//! Two operations, mirroring the API surface the CMS exposes: `get` resolves
//! a single document for a set of user attributes, `get_all` lists every
//! document of a model. Transport and server failures propagate to the
//! caller; the framework's error boundary owns resilience.

use serde::Deserialize;
use url::Url;

use crate::document::Document;

/// Errors from the content API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid API base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("Content API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Content API returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode content API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Query for resolving a single document.
#[derive(Debug, Clone, Default)]
pub struct GetQuery {
    /// Matched against each document's URL targeting (`userAttributes.urlPath`)
    pub url_path: Option<String>,

    /// Read from the preview-environment data source
    pub preview: bool,
}

impl GetQuery {
    /// Target a specific URL path.
    pub fn url_path(path: impl Into<String>) -> Self {
        Self {
            url_path: Some(path.into()),
            preview: false,
        }
    }

    /// Read from the preview-environment data source.
    pub fn with_preview(mut self) -> Self {
        self.preview = true;
        self
    }
}

/// Options for listing all documents of a model.
#[derive(Debug, Clone, Default)]
pub struct GetAllOptions {
    /// Bypass audience targeting rules (`noTargeting`)
    pub no_targeting: bool,

    /// Response fields to omit, e.g. `data.blocks` to skip nested content
    pub omit: Option<String>,

    /// Read from the preview-environment data source
    pub preview: bool,
}

/// Wire envelope around list responses.
#[derive(Debug, Deserialize)]
struct ResultsEnvelope {
    #[serde(default)]
    results: Vec<Document>,
}

/// Client for the CMS content read API.
#[derive(Debug, Clone)]
pub struct ContentApi {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl ContentApi {
    /// Create a client for the given API base URL and key.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
        })
    }

    /// Resolve the single document of `model` matching `query`.
    ///
    /// An absent match is a valid outcome and yields `None`, not an error.
    pub async fn get(&self, model: &str, query: &GetQuery) -> Result<Option<Document>, ClientError> {
        let mut url = self.content_url(model)?;
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("apiKey", &self.api_key);
            params.append_pair("limit", "1");
            if let Some(path) = &query.url_path {
                params.append_pair("userAttributes.urlPath", path);
            }
            if query.preview {
                params.append_pair("preview", "true");
            }
        }

        let envelope = self.fetch(url).await?;
        Ok(envelope.results.into_iter().next())
    }

    /// List every document of `model`.
    pub async fn get_all(
        &self,
        model: &str,
        options: &GetAllOptions,
    ) -> Result<Vec<Document>, ClientError> {
        let mut url = self.content_url(model)?;
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("apiKey", &self.api_key);
            if options.no_targeting {
                params.append_pair("noTargeting", "true");
            }
            if let Some(omit) = &options.omit {
                params.append_pair("omit", omit);
            }
            if options.preview {
                params.append_pair("preview", "true");
            }
        }

        let envelope = self.fetch(url).await?;
        Ok(envelope.results)
    }

    /// Build the endpoint URL for a model.
    fn content_url(&self, model: &str) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push("content")
            .push(model);
        Ok(url)
    }

    /// Issue the request and decode the results envelope.
    async fn fetch(&self, url: Url) -> Result<ResultsEnvelope, ClientError> {
        tracing::debug!("GET {}", url.path());

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url: url.path().to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn api(server: &MockServer) -> ContentApi {
        ContentApi::new(&server.base_url(), "test-key").unwrap()
    }

    #[tokio::test]
    async fn get_resolves_first_matching_document() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/content/page")
                    .query_param("apiKey", "test-key")
                    .query_param("limit", "1")
                    .query_param("userAttributes.urlPath", "/pricing");
                then.status(200)
                    .json_body(json!({ "results": [{ "id": "p1", "data": { "url": "/pricing" } }] }));
            })
            .await;

        let page = api(&server)
            .get("page", &GetQuery::url_path("/pricing"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.unwrap().id.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn get_yields_none_when_no_document_matches() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/content/page");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;

        let page = api(&server)
            .get("page", &GetQuery::url_path("/missing"))
            .await
            .unwrap();

        assert!(page.is_none());
    }

    #[tokio::test]
    async fn get_all_forwards_listing_options() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/content/page")
                    .query_param("noTargeting", "true")
                    .query_param("omit", "data.blocks");
                then.status(200).json_body(json!({ "results": [
                    { "data": { "url": "/" } },
                    { "data": { "url": "/about" } }
                ] }));
            })
            .await;

        let docs = api(&server)
            .get_all(
                "page",
                &GetAllOptions {
                    no_targeting: true,
                    omit: Some("data.blocks".to_string()),
                    preview: false,
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn get_all_requests_preview_data_source() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/content/artworks")
                    .query_param("preview", "true");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;

        let docs = api(&server)
            .get_all(
                "artworks",
                &GetAllOptions {
                    preview: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn server_errors_propagate_as_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/content/page");
                then.status(503);
            })
            .await;

        let err = api(&server)
            .get("page", &GetQuery::default())
            .await
            .unwrap_err();

        match err {
            ClientError::Status { status, .. } => assert_eq!(status, 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_propagates_as_decode() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/content/page");
                then.status(200).body("not json");
            })
            .await;

        let err = api(&server)
            .get("page", &GetQuery::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }
}
