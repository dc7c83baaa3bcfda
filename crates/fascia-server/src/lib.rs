//! Serving layer for CMS-rendered pages.
//!
//! Replaces the original hosting framework's implicit lifecycle with explicit
//! pieces: a `CachePolicy` stating how stale a page may get and whether
//! unknown paths may be generated on demand, a stale-while-revalidate page
//! cache, and two axum servers (the public site and the editor preview).

pub mod cache;
pub mod preview;
pub mod server;

pub use cache::{CacheDecision, CachePolicy, PageCache};
pub use preview::{PreviewServer, PreviewServerConfig};
pub use server::{ServerError, SiteServer, SiteServerConfig};
