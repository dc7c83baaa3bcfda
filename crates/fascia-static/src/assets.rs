//! Asset pipeline for the page shell stylesheet.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* fascia page shell */

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.6;
  color: #1a1a1a;
  background: #ffffff;
}

.page {
  max-width: 960px;
  margin: 0 auto;
  padding: 2rem 1rem;
}

.content h1 {
  font-size: 2.25rem;
  font-weight: 700;
  margin-bottom: 1.5rem;
}

.content p,
.block-text {
  margin-bottom: 1rem;
}

/* Widget placeholders keep their configured footprint before hydration */
trustpilot-widget {
  display: block;
  min-height: 140px;
}

.not-found {
  text-align: center;
  padding: 6rem 1rem;
}

.not-found h1 {
  font-size: 4rem;
  font-weight: 700;
  margin-bottom: 0.5rem;
}

.not-found p {
  color: #666666;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(".not-found"));
        assert!(css.contains("trustpilot-widget"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.content {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".content"));
    }
}
