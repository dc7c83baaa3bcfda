//! Template engine for rendering page shells.

use minijinja::{context, Environment};

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageContext {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Rendered content HTML
    pub content: String,
    /// Suppress search-engine indexing for this page
    pub noindex: bool,
    /// Base URL for asset links
    pub base_url: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("content.html".to_string(), CONTENT_TEMPLATE.to_string())
            .expect("Failed to add content template");

        env.add_template_owned("not_found.html".to_string(), NOT_FOUND_TEMPLATE.to_string())
            .expect("Failed to add not-found template");

        env.add_template_owned("loading.html".to_string(), LOADING_TEMPLATE.to_string())
            .expect("Failed to add loading template");

        Self { env }
    }

    /// Render the content page shell.
    pub fn render_content(&self, ctx: &PageContext) -> Result<String, minijinja::Error> {
        self.render("content.html", ctx)
    }

    /// Render the not-found page shell.
    pub fn render_not_found(&self, ctx: &PageContext) -> Result<String, minijinja::Error> {
        self.render("not_found.html", ctx)
    }

    /// Render the loading placeholder.
    ///
    /// The placeholder is deliberately bare: the serving layer re-renders the
    /// path once data resolves, so no metas are attached here.
    pub fn render_loading(&self) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("loading.html")?;
        tmpl.render(context! {})
    }

    fn render(&self, template: &str, ctx: &PageContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &ctx.title,
            site_title => &ctx.site_title,
            content => &ctx.content,
            noindex => ctx.noindex,
            base_url => &ctx.base_url,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  {% if noindex %}<meta name="robots" content="noindex">
  {% endif %}<title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <main class="page">
    {% block content %}{% endblock %}
  </main>
</body>
</html>"##;

const CONTENT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="content">
{{ content | safe }}
</article>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<section class="not-found">
  <h1>404</h1>
  <p>This page could not be found.</p>
</section>
{% endblock %}"##;

const LOADING_TEMPLATE: &str = r##"<h1>Loading...</h1>"##;
