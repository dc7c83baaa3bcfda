//! Read-only client for the hosted CMS content API.
//!
//! The CMS owns all page and data records; this crate fetches them over HTTP
//! and exposes the two operations the rendering pipeline needs: enumerating
//! routable paths at build time and fetching one page's data per request.
//! Nothing here is persisted or mutated locally.

pub mod api;
pub mod document;
pub mod pages;

pub use api::{ClientError, ContentApi, GetAllOptions, GetQuery};
pub use document::Document;
pub use pages::{enumerate_paths, fetch_page_data, url_path, FallbackPolicy, PageData, PathSet};
