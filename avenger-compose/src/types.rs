use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// One of the four stacking zones around the plot rectangle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Top and bottom items claim height, left and right items claim width
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Space reserved around the plot area before any item is measured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(crate::constants::DEFAULT_MARGIN)
    }
}

/// The central area left over once margins and edge items have claimed their space.
///
/// `top`, `right`, `bottom` and `left` are distances from the matching canvas edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotRect {
    /// Build the plot rectangle from the canvas size and the total claimed on each edge
    pub fn from_insets(canvas: Size, insets: Margins) -> Self {
        Self {
            top: insets.top,
            right: insets.right,
            bottom: insets.bottom,
            left: insets.left,
            width: (canvas.width - insets.left - insets.right).max(0.0),
            height: (canvas.height - insets.top - insets.bottom).max(0.0),
        }
    }

    pub fn origin(&self) -> [f32; 2] {
        [self.left, self.top]
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, position: [f32; 2]) -> bool {
        position[0] >= self.left
            && position[0] <= self.left + self.width
            && position[1] >= self.top
            && position[1] <= self.top + self.height
    }

    /// Translate a canvas position into plot coordinates
    pub fn to_plot_coords(&self, position: [f32; 2]) -> [f32; 2] {
        [position[0] - self.left, position[1] - self.top]
    }
}

/// Absolute placement handed to an item by the layout applier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Placement {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn origin(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Natural footprint reported by a measurable item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Edge the item wants to sit on. `None` keeps it out of the edge layout.
    pub position: Option<Edge>,
    pub width: f32,
    pub height: f32,
}

impl Measurement {
    pub fn new(position: Option<Edge>, size: Size) -> Self {
        Self {
            position,
            width: size.width,
            height: size.height,
        }
    }

    pub fn zero(position: Option<Edge>) -> Self {
        Self::new(position, Size::zero())
    }

    /// Space claimed on the item's edge
    pub fn offset(&self) -> Option<f32> {
        self.position.map(|edge| {
            if edge.is_horizontal() {
                self.height
            } else {
                self.width
            }
        })
    }
}
