//! Typed registry of item constructors
//!
//! The registry is built up front and injected into the container; nothing is
//! registered globally. Declarative layouts refer to registered types by name.

use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::config::ComposeConfig;
use crate::constants::{ZINDEX_CHART, ZINDEX_COMPONENT};
use crate::error::ComposeError;
use crate::item::{CreateContext, Item};
use crate::scene::LayerType;
use crate::spec::Props;

pub type Constructor =
    Arc<dyn Fn(&CreateContext, &Props) -> Result<Box<dyn Item>, ComposeError> + Send + Sync>;

/// Static metadata of an item type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMetadata {
    /// Name of the layer creation strategy. Parsed into a [`LayerType`] on creation.
    pub layer_type: Cow<'static, str>,
    pub z_index: i32,
}

impl TypeMetadata {
    pub fn new(layer_type: LayerType, z_index: i32) -> Self {
        Self {
            layer_type: Cow::Owned(layer_type.to_string()),
            z_index,
        }
    }

    pub fn chart() -> Self {
        Self::new(LayerType::Chart, ZINDEX_CHART)
    }

    pub fn component() -> Self {
        Self::new(LayerType::Component, ZINDEX_COMPONENT)
    }

    pub fn overlay() -> Self {
        Self::new(LayerType::Overlay, ZINDEX_COMPONENT)
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Resolve the layer creation strategy for `item_type`
    pub fn resolve_layer_type(&self, item_type: &str) -> Result<LayerType, ComposeError> {
        LayerType::from_str(&self.layer_type).map_err(|_| ComposeError::UnrecognizedLayerType {
            item_type: item_type.to_string(),
            layer_type: self.layer_type.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct Registration {
    pub constructor: Constructor,
    pub metadata: TypeMetadata,
}

impl Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    types: IndexMap<String, Registration>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `name`, replacing any previous registration
    pub fn register<F>(&mut self, name: impl Into<String>, metadata: TypeMetadata, constructor: F)
    where
        F: Fn(&CreateContext, &Props) -> Result<Box<dyn Item>, ComposeError>
            + Send
            + Sync
            + 'static,
    {
        self.types.insert(
            name.into(),
            Registration {
                constructor: Arc::new(constructor),
                metadata,
            },
        );
    }

    /// Builder-style variant of [`ItemRegistry::register`]
    pub fn with<F>(mut self, name: impl Into<String>, metadata: TypeMetadata, constructor: F) -> Self
    where
        F: Fn(&CreateContext, &Props) -> Result<Box<dyn Item>, ComposeError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, metadata, constructor);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&Registration> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|k| k.as_str())
    }

    pub fn layer_type_of(&self, name: &str) -> Result<LayerType, ComposeError> {
        let registration = self
            .resolve(name)
            .ok_or_else(|| ComposeError::UnknownType(name.to_string()))?;
        registration.metadata.resolve_layer_type(name)
    }

    pub fn z_index_of(&self, name: &str) -> Option<i32> {
        self.resolve(name).map(|r| r.metadata.z_index)
    }

    /// Apply aliases and z-index overrides from configuration.
    ///
    /// Alias bases must already be registered. Alias layer types are kept as written
    /// and only validated when an item of that type is created.
    pub fn apply_config(&mut self, config: &ComposeConfig) -> Result<(), ComposeError> {
        for (name, alias) in &config.aliases {
            let base = self
                .resolve(&alias.base)
                .ok_or_else(|| ComposeError::UnknownType(alias.base.clone()))?;

            let mut metadata = base.metadata.clone();
            if let Some(layer_type) = &alias.layer_type {
                metadata.layer_type = Cow::Owned(layer_type.clone());
            }
            if let Some(z_index) = alias.z_index {
                metadata.z_index = z_index;
            }

            let registration = Registration {
                constructor: base.constructor.clone(),
                metadata,
            };
            self.types.insert(name.clone(), registration);
        }

        for (name, z_index) in &config.z_index {
            match self.types.get_mut(name) {
                Some(registration) => registration.metadata.z_index = *z_index,
                None => return Err(ComposeError::UnknownType(name.clone())),
            }
        }

        Ok(())
    }
}
