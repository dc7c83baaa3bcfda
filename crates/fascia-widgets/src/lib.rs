//! Widget descriptors and the process-wide widget registry.
//!
//! A widget is an embeddable unit the CMS editor can drop into page content.
//! This crate owns the declarative side only: each widget declares a name and
//! an ordered list of typed, defaulted configuration inputs. The CMS platform
//! enforces field constraints when an editor configures an instance; nothing
//! here validates instance data.

pub mod builtin;
pub mod descriptor;
pub mod element;
pub mod registry;

pub use builtin::{register_builtin_widgets, reviews_badge, REVIEWS_BADGE};
pub use descriptor::{InputKind, WidgetDescriptor, WidgetInput};
pub use element::{tag_name, widget_element};
pub use registry::WidgetRegistry;
