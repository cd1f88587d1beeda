pub mod axis;
pub mod charts;
pub mod error;
pub mod gridlines;
pub mod legend;
pub mod scale;
pub mod text;
pub mod ticks;
pub mod title;

use std::sync::Arc;

use avenger_compose::constants::{
    ZINDEX_AXIS, ZINDEX_CHART, ZINDEX_GRIDLINES, ZINDEX_LEGEND, ZINDEX_TITLE,
};
use avenger_compose::item::{CreateContext, Item};
use avenger_compose::spec::Props;
use avenger_compose::{ComposeError, ItemRegistry, TypeMetadata};

use crate::axis::Axis;
use crate::charts::{Bars, Lines};
use crate::gridlines::Gridlines;
use crate::legend::Legend;
use crate::text::TextMeasurer;
use crate::title::Title;

/// Registry holding every built-in item type
pub fn default_registry(measurer: Arc<dyn TextMeasurer>) -> ItemRegistry {
    let mut registry = ItemRegistry::new();

    let m = measurer.clone();
    registry.register(
        "title",
        TypeMetadata::component().z_index(ZINDEX_TITLE),
        move |ctx: &CreateContext, props: &Props| -> Result<Box<dyn Item>, ComposeError> {
            Ok(Box::new(Title::new(ctx, props, m.clone())?))
        },
    );

    let m = measurer.clone();
    registry.register(
        "axis",
        TypeMetadata::component().z_index(ZINDEX_AXIS),
        move |ctx: &CreateContext, props: &Props| -> Result<Box<dyn Item>, ComposeError> {
            Ok(Box::new(Axis::new(ctx, props, m.clone())?))
        },
    );

    let m = measurer.clone();
    registry.register(
        "legend",
        TypeMetadata::component().z_index(ZINDEX_LEGEND),
        move |ctx: &CreateContext, props: &Props| -> Result<Box<dyn Item>, ComposeError> {
            Ok(Box::new(Legend::new(ctx, props, m.clone())?))
        },
    );

    let m = measurer;
    registry.register(
        "inset-legend",
        TypeMetadata::component().z_index(ZINDEX_LEGEND),
        move |ctx: &CreateContext, props: &Props| -> Result<Box<dyn Item>, ComposeError> {
            Ok(Box::new(Legend::new_inset(ctx, props, m.clone())?))
        },
    );

    registry.register(
        "gridlines",
        TypeMetadata::chart().z_index(ZINDEX_GRIDLINES),
        |ctx: &CreateContext, props: &Props| -> Result<Box<dyn Item>, ComposeError> {
            Ok(Box::new(Gridlines::new(ctx, props)?))
        },
    );

    registry.register(
        "lines",
        TypeMetadata::chart().z_index(ZINDEX_CHART),
        |ctx: &CreateContext, props: &Props| -> Result<Box<dyn Item>, ComposeError> {
            Ok(Box::new(Lines::new(ctx, props)?))
        },
    );

    registry.register(
        "bars",
        TypeMetadata::chart().z_index(ZINDEX_CHART),
        |ctx: &CreateContext, props: &Props| -> Result<Box<dyn Item>, ComposeError> {
            Ok(Box::new(Bars::new(ctx, props)?))
        },
    );

    registry
}
