//! Page rendering and static generation for CMS-hosted pages.
//!
//! Turns fetched CMS documents into full HTML pages: a three-state renderer
//! (loading, not-found, content) backed by compiled-in templates, and a
//! builder that enumerates every routable path and writes the rendered site
//! to disk.

pub mod assets;
pub mod builder;
pub mod fixtures;
pub mod renderer;
pub mod templates;

pub use assets::AssetPipeline;
pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use fixtures::{car_fixtures, Car};
pub use renderer::{
    BlockRenderer, ContentRenderer, PageRenderer, PageView, RenderData, RenderError, RenderedPage,
    RendererConfig,
};
pub use templates::{PageContext, TemplateEngine};
