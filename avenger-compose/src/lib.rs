pub mod apply;
pub mod calculate;
pub mod compose;
pub mod composite;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod hover;
pub mod item;
pub mod parse;
pub mod reconcile;
pub mod registry;
pub mod scene;
pub mod spec;
pub mod transition;
pub mod types;

// Re-export the types most callers need
pub use crate::compose::Compose;
pub use crate::config::ComposeConfig;
pub use crate::error::ComposeError;
pub use crate::item::{Hoverable, Item, Measurable, Placeable};
pub use crate::registry::{ItemRegistry, TypeMetadata};
pub use crate::spec::{layered, ItemSpec, LayoutSpec};

#[cfg(test)]
pub mod test_utils;
