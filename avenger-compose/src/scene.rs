//! Render surfaces owned by the container
//!
//! Every live item draws into its own [`Layer`]. Chart and component layers are
//! children of the root drawing surface; overlay layers are siblings of the drawing
//! surface and only exist when the root is a block container wrapping it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::ComposeError;
use crate::types::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(u64);

/// Layer creation strategy an item type asks for
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayerType {
    Chart,
    Component,
    Overlay,
}

/// What the container renders into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    /// A block element wrapping the drawing surface. Supports overlays.
    #[default]
    Block,
    /// A bare drawing surface with no room for sibling overlays
    Surface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Primitive drawn into a layer, in layer-local coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mark {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        class: Option<String>,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        angle: f32,
        anchor: TextAnchor,
    },
    Path {
        points: Vec<[f32; 2]>,
        #[serde(skip_serializing_if = "Option::is_none")]
        class: Option<String>,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub item_id: String,
    pub layer_type: LayerType,
    pub zindex: i32,
    pub origin: [f32; 2],
    pub marks: Vec<Mark>,
    /// Duration of the transition used for the most recent render
    pub transition: Option<Duration>,
}

impl Layer {
    pub fn clear(&mut self) {
        self.marks.clear();
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }
}

/// Options passed to the layer creation strategies
#[derive(Debug, Clone)]
pub struct LayerOptions {
    pub item_id: String,
    pub z_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    root: RootKind,
    size: Size,
    /// Children of the drawing surface, in paint order
    layers: Vec<Layer>,
    /// Siblings of the drawing surface, in paint order
    overlays: Vec<Layer>,
    next_id: u64,
}

impl Scene {
    pub fn new(root: RootKind, size: Size) -> Self {
        Self {
            root,
            size,
            layers: Vec::new(),
            overlays: Vec::new(),
            next_id: 0,
        }
    }

    pub fn root(&self) -> RootKind {
        self.root
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn overlays(&self) -> &[Layer] {
        &self.overlays
    }

    pub fn create_layer(
        &mut self,
        layer_type: LayerType,
        opts: LayerOptions,
    ) -> Result<LayerId, ComposeError> {
        match layer_type {
            LayerType::Chart => Ok(self.create_chart_layer(opts)),
            LayerType::Component => Ok(self.create_component_layer(opts)),
            LayerType::Overlay => self.create_overlay_layer(opts),
        }
    }

    pub fn create_chart_layer(&mut self, opts: LayerOptions) -> LayerId {
        let layer = self.new_layer(LayerType::Chart, opts);
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    pub fn create_component_layer(&mut self, opts: LayerOptions) -> LayerId {
        let layer = self.new_layer(LayerType::Component, opts);
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    pub fn create_overlay_layer(&mut self, opts: LayerOptions) -> Result<LayerId, ComposeError> {
        if self.root == RootKind::Surface {
            return Err(ComposeError::OverlayUnsupported(opts.item_id));
        }
        let layer = self.new_layer(LayerType::Overlay, opts);
        let id = layer.id;
        self.overlays.push(layer);
        Ok(id)
    }

    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        if let Some(index) = self.layers.iter().position(|l| l.id == id) {
            return Some(self.layers.remove(index));
        }
        let index = self.overlays.iter().position(|l| l.id == id)?;
        Some(self.overlays.remove(index))
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers
            .iter()
            .chain(self.overlays.iter())
            .find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers
            .iter_mut()
            .chain(self.overlays.iter_mut())
            .find(|l| l.id == id)
    }

    pub(crate) fn layers_mut(&mut self) -> (&mut Vec<Layer>, &mut Vec<Layer>) {
        (&mut self.layers, &mut self.overlays)
    }

    fn new_layer(&mut self, layer_type: LayerType, opts: LayerOptions) -> Layer {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        Layer {
            id,
            item_id: opts.item_id,
            layer_type,
            zindex: opts.z_index,
            origin: [0.0, 0.0],
            marks: Vec::new(),
            transition: None,
        }
    }
}
