//! Built-in widget descriptors.

use crate::descriptor::{WidgetDescriptor, WidgetInput};
use crate::registry::WidgetRegistry;

/// Name of the third-party reviews badge widget.
pub const REVIEWS_BADGE: &str = "Trustpilot Widget";

/// Descriptor for the Trustpilot reviews badge.
///
/// Field names and defaults mirror the embed parameters the badge script
/// expects; the CMS editor overrides them per instance.
pub fn reviews_badge() -> WidgetDescriptor {
    WidgetDescriptor::new(REVIEWS_BADGE)
        .input(WidgetInput::string("locale", "en-US"))
        .input(WidgetInput::string("templateId", "53aa8912dec7e10d38f59f36"))
        .input(WidgetInput::string(
            "businessUnitId",
            "639f548cf3952ee4a156d9ce",
        ))
        .input(WidgetInput::string("styleHeight", "140px"))
        .input(WidgetInput::string("styleWidth", "100%"))
        .input(WidgetInput::string("theme", "light").with_allowed(["light", "dark"]))
        .input(WidgetInput::string("stars", "4,5"))
        .input(WidgetInput::string("reviewLanguages", "en"))
}

/// Register every built-in widget.
///
/// Called exactly once at startup, before the renderer sees any content, so
/// reads never observe a partially populated registry.
pub fn register_builtin_widgets(registry: &mut WidgetRegistry) {
    registry.register(reviews_badge());
}
