//! Widget instance to custom-element HTML emission.
//!
//! The content renderer resolves a widget reference in page content to its
//! descriptor, then asks this module for the HTML element standing in for
//! the widget. Instance options from the content override descriptor
//! defaults; inputs the instance does not set keep their defaults.

use serde_json::{Map, Value};

use crate::descriptor::WidgetDescriptor;

/// Derive the custom-element tag name for a widget.
///
/// "Trustpilot Widget" becomes `trustpilot-widget`.
pub fn tag_name(widget_name: &str) -> String {
    widget_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Emit the HTML element for a widget instance.
///
/// Only inputs the descriptor declares become attributes; unknown keys in
/// `options` are dropped, since the CMS enforces the schema editor-side.
pub fn widget_element(descriptor: &WidgetDescriptor, options: &Map<String, Value>) -> String {
    let tag = tag_name(&descriptor.name);

    let mut attrs = String::new();
    for input in &descriptor.inputs {
        let value = options
            .get(&input.name)
            .and_then(option_as_string)
            .unwrap_or_else(|| input.default_value.clone());

        attrs.push(' ');
        attrs.push_str(&input.name);
        attrs.push_str("=\"");
        attrs.push_str(&escape_attr(&value));
        attrs.push('"');
    }

    format!("<{tag}{attrs}></{tag}>")
}

/// Coerce a JSON option value to an attribute string.
fn option_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Escape a string for use inside a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
