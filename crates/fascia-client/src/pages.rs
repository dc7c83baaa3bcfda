//! Path enumeration and per-page data fetch.
//!
//! These are the two data operations the rendering pipeline runs against the
//! CMS: a build-time enumeration of every routable path, and a per-path fetch
//! of one page document plus the auxiliary data collection.

use crate::api::{ClientError, ContentApi, GetAllOptions, GetQuery};
use crate::document::Document;

/// What the serving layer should do with a path that was not enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Attempt an on-demand render and cache the result
    AllowOnDemand,

    /// Unknown paths are an immediate 404
    NotFound,
}

/// The set of routable paths known to the CMS.
///
/// Ordering is irrelevant and duplicates are tolerated; the renderer's
/// not-found branch covers any miss.
#[derive(Debug, Clone)]
pub struct PathSet {
    pub paths: Vec<String>,
    pub fallback: FallbackPolicy,
}

/// Everything one page render needs from the CMS.
#[derive(Debug, Clone)]
pub struct PageData {
    /// The matching page document, absent when no document targets the path
    pub page: Option<Document>,

    /// The auxiliary collection, passed through to the render context
    pub artworks: Vec<Document>,
}

/// Join URL path segments into the path the CMS targets.
///
/// An empty segment list maps to the root path.
pub fn url_path(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

/// Enumerate every routable path for `model`.
///
/// Targeting rules are bypassed and nested content is omitted to keep the
/// listing cheap. Documents without a URL are skipped; an empty result set is
/// a valid, zero-path outcome. CMS errors propagate.
pub async fn enumerate_paths(api: &ContentApi, model: &str) -> Result<PathSet, ClientError> {
    let options = GetAllOptions {
        no_targeting: true,
        omit: Some("data.blocks".to_string()),
        preview: false,
    };

    let documents = api.get_all(model, &options).await?;

    let paths = documents
        .iter()
        .filter_map(|doc| match doc.url() {
            Some(url) => Some(url.to_string()),
            None => {
                tracing::warn!(
                    "Skipping {} document without a url: {:?}",
                    model,
                    doc.id
                );
                None
            }
        })
        .collect();

    Ok(PathSet {
        paths,
        fallback: FallbackPolicy::AllowOnDemand,
    })
}

/// Fetch the page document targeting `segments` plus the auxiliary collection.
///
/// The two reads are independent and issued concurrently; both complete
/// before the combined result is produced. An absent page is `None`, not an
/// error. CMS errors propagate without retry.
pub async fn fetch_page_data(
    api: &ContentApi,
    page_model: &str,
    data_model: &str,
    segments: &[&str],
) -> Result<PageData, ClientError> {
    let path = url_path(segments);

    let page_query = GetQuery::url_path(path);
    let data_options = GetAllOptions {
        preview: true,
        ..Default::default()
    };

    let (page, artworks) = tokio::join!(
        api.get(page_model, &page_query),
        api.get_all(data_model, &data_options),
    );

    Ok(PageData {
        page: page?,
        artworks: artworks?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn api(server: &MockServer) -> ContentApi {
        ContentApi::new(&server.base_url(), "test-key").unwrap()
    }

    #[test]
    fn joins_segments_with_leading_slash() {
        assert_eq!(url_path(&["about", "team"]), "/about/team");
        assert_eq!(url_path(&["pricing"]), "/pricing");
    }

    #[test]
    fn empty_segments_map_to_root() {
        assert_eq!(url_path(&[]), "/");
    }

    #[tokio::test]
    async fn enumerates_one_path_per_document() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/content/page")
                    .query_param("noTargeting", "true")
                    .query_param("omit", "data.blocks");
                then.status(200).json_body(json!({ "results": [
                    { "data": { "url": "/" } },
                    { "data": { "url": "/about" } },
                    { "id": "broken", "data": {} }
                ] }));
            })
            .await;

        let set = enumerate_paths(&api(&server), "page").await.unwrap();

        assert_eq!(set.paths, vec!["/", "/about"]);
        assert_eq!(set.fallback, FallbackPolicy::AllowOnDemand);
    }

    #[tokio::test]
    async fn empty_result_set_yields_empty_path_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/content/page");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;

        let set = enumerate_paths(&api(&server), "page").await.unwrap();

        assert!(set.paths.is_empty());
    }

    #[tokio::test]
    async fn fetch_requests_joined_path_and_preview_data() {
        let server = MockServer::start_async().await;
        let page_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/content/page")
                    .query_param("userAttributes.urlPath", "/about/team");
                then.status(200)
                    .json_body(json!({ "results": [{ "data": { "url": "/about/team" } }] }));
            })
            .await;
        let data_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/content/artworks")
                    .query_param("preview", "true");
                then.status(200)
                    .json_body(json!({ "results": [{ "name": "sunflowers" }] }));
            })
            .await;

        let data = fetch_page_data(&api(&server), "page", "artworks", &["about", "team"])
            .await
            .unwrap();

        page_mock.assert_async().await;
        data_mock.assert_async().await;
        assert!(data.page.is_some());
        assert_eq!(data.artworks.len(), 1);
    }

    #[tokio::test]
    async fn fetch_with_no_segments_requests_root() {
        let server = MockServer::start_async().await;
        let page_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/content/page")
                    .query_param("userAttributes.urlPath", "/");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/content/artworks");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;

        let data = fetch_page_data(&api(&server), "page", "artworks", &[])
            .await
            .unwrap();

        page_mock.assert_async().await;
        assert!(data.page.is_none());
        assert!(data.artworks.is_empty());
    }

    #[tokio::test]
    async fn cms_errors_propagate_from_either_read() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/content/page");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/content/artworks");
                then.status(500);
            })
            .await;

        let err = fetch_page_data(&api(&server), "page", "artworks", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Status { status: 500, .. }));
    }
}
