//! Declarative schema for embeddable widgets.

use serde::{Deserialize, Serialize};

/// Primitive input kinds understood by the CMS editor.
///
/// Every input the built-in widgets declare is a string today; the kind is
/// kept explicit so the serialized schema matches what the CMS palette
/// expects (`"type": "string"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    String,
}

/// A single configurable input on a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetInput {
    /// Field name as the CMS editor sees it (e.g. `businessUnitId`)
    pub name: String,

    /// Primitive type of the field
    #[serde(rename = "type")]
    pub kind: InputKind,

    /// Value used when the editor leaves the field untouched
    #[serde(rename = "defaultValue")]
    pub default_value: String,

    /// Closed set of allowed values, when the field is an enumeration
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl WidgetInput {
    /// Declare a free-form string input with a default value.
    pub fn string(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::String,
            default_value: default_value.into(),
            allowed: None,
        }
    }

    /// Restrict this input to a closed set of allowed values.
    pub fn with_allowed<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(allowed.into_iter().map(Into::into).collect());
        self
    }
}

/// A named embeddable unit and its ordered configuration fields.
///
/// Descriptors are immutable once registered: they are defined at startup and
/// consumed by the content renderer when page content references the widget
/// by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Human-readable widget name used for content resolution
    pub name: String,

    /// Configuration fields, in declaration order
    pub inputs: Vec<WidgetInput>,
}

impl WidgetDescriptor {
    /// Create a descriptor with no inputs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
        }
    }

    /// Append an input declaration.
    pub fn input(mut self, input: WidgetInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// Look up an input declaration by field name.
    pub fn get_input(&self, name: &str) -> Option<&WidgetInput> {
        self.inputs.iter().find(|i| i.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_descriptor_in_declaration_order() {
        let descriptor = WidgetDescriptor::new("Example")
            .input(WidgetInput::string("first", "a"))
            .input(WidgetInput::string("second", "b"));

        let names: Vec<&str> = descriptor.inputs.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn serializes_enum_field_with_cms_key_names() {
        let input = WidgetInput::string("theme", "light").with_allowed(["light", "dark"]);

        let json = serde_json::to_value(&input).unwrap();

        assert_eq!(json["type"], "string");
        assert_eq!(json["defaultValue"], "light");
        assert_eq!(json["enum"], serde_json::json!(["light", "dark"]));
    }

    #[test]
    fn omits_enum_key_for_free_form_inputs() {
        let input = WidgetInput::string("locale", "en-US");

        let json = serde_json::to_value(&input).unwrap();

        assert!(json.get("enum").is_none());
    }
}
