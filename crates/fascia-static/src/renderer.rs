//! Page renderer: decides between loading, not-found, and content views.
//!
//! The decision order is fixed: a fallback route always gets the loading
//! placeholder; an absent page outside a preview session is a 404; everything
//! else delegates to the content renderer. Page presence and preview state
//! are independent, so a preview of absent content renders the content view
//! with indexing suppressed but without a 404.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use fascia_client::Document;
use fascia_widgets::{widget_element, WidgetRegistry};

use crate::fixtures::{car_fixtures, Car};
use crate::templates::{PageContext, TemplateEngine};

/// Errors that can occur while rendering a page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to serialize render data: {0}")]
    Data(#[from] serde_json::Error),
}

/// Which terminal view a render produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    /// Fallback route not yet resolved; placeholder until data arrives
    Loading,

    /// Page absent outside a preview session
    NotFound,

    /// Content delegate view
    Content,
}

/// A fully rendered page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub view: PageView,
    pub html: String,
    pub status: u16,
    pub noindex: bool,
}

/// Auxiliary context handed to the content renderer alongside the page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderData {
    /// Local fixture collection
    #[serde(rename = "myCars")]
    pub my_cars: Vec<Car>,

    /// CMS auxiliary collection, forwarded unchanged
    pub artworks: Vec<Document>,
}

/// Delegate that turns a content document into body HTML.
///
/// Stands in for the CMS's own rendering engine, whose internals this system
/// does not know. Implementations receive the model name, the content
/// document (absent during previews of unpublished pages), and the auxiliary
/// render data.
pub trait ContentRenderer: Send + Sync {
    fn render_content(
        &self,
        model: &str,
        content: Option<&Document>,
        data: &RenderData,
    ) -> Result<String, RenderError>;
}

/// Default content renderer: walks `data.blocks` and resolves widgets.
pub struct BlockRenderer {
    registry: Arc<WidgetRegistry>,
}

impl BlockRenderer {
    /// Create a block renderer over the given widget registry.
    pub fn new(registry: Arc<WidgetRegistry>) -> Self {
        Self { registry }
    }

    /// Render a list of content blocks.
    fn render_blocks(&self, blocks: &[Value], out: &mut String) {
        for block in blocks {
            self.render_block(block, out);
        }
    }

    /// Render one block, recursing into its children.
    fn render_block(&self, block: &Value, out: &mut String) {
        if let Some(component) = block.get("component") {
            let name = component.get("name").and_then(Value::as_str).unwrap_or("");
            let empty = serde_json::Map::new();
            let options = component
                .get("options")
                .and_then(Value::as_object)
                .unwrap_or(&empty);

            if name == "Text" {
                let text = options.get("text").and_then(Value::as_str).unwrap_or("");
                out.push_str("<div class=\"block-text\">");
                out.push_str(&escape_html(text));
                out.push_str("</div>\n");
            } else if let Some(descriptor) = self.registry.get(name) {
                out.push_str(&widget_element(descriptor, options));
                out.push('\n');
            } else {
                tracing::warn!("Unknown component '{}' in content; skipping", name);
                out.push_str(&format!("<!-- unknown component: {} -->\n", escape_html(name)));
            }
        }

        if let Some(children) = block.get("children").and_then(Value::as_array) {
            self.render_blocks(children, out);
        }
    }
}

impl ContentRenderer for BlockRenderer {
    fn render_content(
        &self,
        _model: &str,
        content: Option<&Document>,
        data: &RenderData,
    ) -> Result<String, RenderError> {
        let mut out = String::new();

        if let Some(blocks) = content.and_then(Document::blocks) {
            self.render_blocks(blocks, &mut out);
        }

        // Render data rides along as a JSON script for client-side consumers
        out.push_str("<script type=\"application/json\" id=\"__data\">");
        out.push_str(&serde_json::to_string(data)?);
        out.push_str("</script>");

        Ok(out)
    }
}

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Site title for the page shell
    pub site_title: String,

    /// Base URL for asset links
    pub base_url: String,

    /// Model name passed to the content delegate
    pub page_model: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            site_title: "Site".to_string(),
            base_url: "/".to_string(),
            page_model: "page".to_string(),
        }
    }
}

/// Page renderer.
pub struct PageRenderer {
    config: RendererConfig,
    templates: TemplateEngine,
    delegate: Box<dyn ContentRenderer>,
}

impl PageRenderer {
    /// Create a renderer using the default block-walking content delegate.
    pub fn new(config: RendererConfig, registry: Arc<WidgetRegistry>) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
            delegate: Box::new(BlockRenderer::new(registry)),
        }
    }

    /// Create a renderer with a custom content delegate.
    pub fn with_delegate(config: RendererConfig, delegate: Box<dyn ContentRenderer>) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
            delegate,
        }
    }

    /// Render a page from its fetched data.
    ///
    /// `is_fallback` marks a path not yet resolved on this instance;
    /// `is_preview` marks an editor preview session, where absent content
    /// must not 404.
    pub fn render(
        &self,
        page: Option<&Document>,
        artworks: &[Document],
        is_fallback: bool,
        is_preview: bool,
    ) -> Result<RenderedPage, RenderError> {
        if is_fallback {
            return Ok(RenderedPage {
                view: PageView::Loading,
                html: self.templates.render_loading()?,
                status: 200,
                noindex: false,
            });
        }

        // Indexing is suppressed whenever the page is absent; the 404
        // decision additionally requires not being in a preview session.
        let noindex = page.is_none();

        if page.is_none() && !is_preview {
            let html = self.templates.render_not_found(&self.page_context(
                "Page not found".to_string(),
                String::new(),
                noindex,
            ))?;

            return Ok(RenderedPage {
                view: PageView::NotFound,
                html,
                status: 404,
                noindex,
            });
        }

        let data = RenderData {
            my_cars: car_fixtures(),
            artworks: artworks.to_vec(),
        };

        let content = self
            .delegate
            .render_content(&self.config.page_model, page, &data)?;

        let title = page
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| self.config.site_title.clone());

        let html = self
            .templates
            .render_content(&self.page_context(title, content, noindex))?;

        Ok(RenderedPage {
            view: PageView::Content,
            html,
            status: 200,
            noindex,
        })
    }

    fn page_context(&self, title: String, content: String, noindex: bool) -> PageContext {
        PageContext {
            title,
            site_title: self.config.site_title.clone(),
            content,
            noindex,
            base_url: self.config.base_url.clone(),
        }
    }
}

/// Escape text for HTML body context.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
