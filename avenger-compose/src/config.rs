use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::ComposeError;
use crate::scene::RootKind;
use crate::types::{Margins, Size};

/// Register an existing item type under a new name with different metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAlias {
    pub base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    pub width: f32,
    pub height: f32,
    /// Base margins, grown by the footprint of every edge item
    pub margins: Margins,
    pub root: RootKind,
    /// Paint order overrides keyed by item type
    pub z_index: HashMap<String, i32>,
    pub aliases: IndexMap<String, TypeAlias>,
}

impl ComposeConfig {
    pub fn from_json(json: &str) -> Result<Self, ComposeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_root(mut self, root: RootKind) -> Self {
        self.root = root;
        self
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            margins: Margins::default(),
            root: RootKind::default(),
            z_index: HashMap::new(),
            aliases: IndexMap::new(),
        }
    }
}
