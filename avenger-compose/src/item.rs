use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ComposeError;
use crate::hover::PointerEvent;
use crate::scene::Layer;
use crate::spec::Props;
use crate::types::{Edge, Measurement, Placement, PlotRect, Size};

/// Context handed to an item constructor
#[derive(Debug, Clone)]
pub struct CreateContext {
    pub id: String,
    /// Edge assigned by the layout. `None` for charts in the layered group.
    pub position: Option<Edge>,
}

/// Layout state available while rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub id: &'a str,
    pub canvas: Size,
    pub plot: &'a PlotRect,
    /// Placement from the layout applier. `None` for charts and skip-layout items.
    pub placement: Option<Placement>,
}

/// Anything the container can position and draw.
///
/// The engine only relies on this trait and the capability traits exposed through
/// the `as_*` accessors, never on concrete item types.
pub trait Item: Debug {
    /// Replace the item's props. Called only when the props changed.
    fn set_props(&mut self, props: &Props) -> Result<(), ComposeError>;

    /// Draw the item into its layer using the committed layout
    fn render(
        &mut self,
        data: &Value,
        ctx: &RenderContext,
        layer: &mut Layer,
    ) -> Result<(), ComposeError>;

    /// Items that position themselves are left out of edge layout
    fn skip_layout(&self) -> bool {
        false
    }

    fn as_measurable(&mut self) -> Option<&mut dyn Measurable> {
        None
    }

    fn as_placeable(&mut self) -> Option<&mut dyn Placeable> {
        None
    }

    fn as_hoverable(&mut self) -> Option<&mut dyn Hoverable> {
        None
    }
}

/// Reports the natural footprint of an item for the given data
pub trait Measurable {
    fn measure(&mut self, data: &Value) -> Result<Measurement, ComposeError>;
}

/// Receives the absolute placement computed by the layout applier
pub trait Placeable {
    fn place(&mut self, placement: Placement);
}

/// Receives pointer events translated into plot coordinates
pub trait Hoverable {
    fn on_pointer(&mut self, event: &PointerEvent);
}

/// Decode item props into a typed struct
pub fn decode_props<T: DeserializeOwned>(id: &str, props: &Props) -> Result<T, ComposeError> {
    serde_json::from_value(Value::Object(props.clone())).map_err(|source| {
        ComposeError::InvalidProps {
            id: id.to_string(),
            source,
        }
    })
}
