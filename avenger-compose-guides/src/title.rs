use std::sync::Arc;

use avenger_compose::item::{decode_props, CreateContext, RenderContext};
use avenger_compose::scene::{Layer, Mark, TextAnchor};
use avenger_compose::spec::Props;
use avenger_compose::types::{Edge, Margins, Measurement, Placement, Size};
use avenger_compose::{ComposeError, Item, Measurable, Placeable};
use serde::Deserialize;
use serde_json::Value;

use crate::text::{TextBounds, TextMeasurementConfig, TextMeasurer};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TitleProps {
    pub text: String,
    pub font_size: f32,
    /// Space around the text inside the title's slot
    pub margins: Margins,
}

impl Default for TitleProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 16.0,
            margins: Margins::uniform(8.0),
        }
    }
}

/// Text label on one edge of the plot. Left and right titles read bottom-to-top
/// and top-to-bottom respectively.
#[derive(Debug)]
pub struct Title {
    id: String,
    position: Edge,
    props: TitleProps,
    measurer: Arc<dyn TextMeasurer>,
    placement: Option<Placement>,
}

impl Title {
    pub fn new(
        ctx: &CreateContext,
        props: &Props,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Result<Self, ComposeError> {
        Ok(Self {
            id: ctx.id.clone(),
            position: ctx.position.unwrap_or(Edge::Top),
            props: decode_props(&ctx.id, props)?,
            measurer,
            placement: None,
        })
    }

    pub fn props(&self) -> &TitleProps {
        &self.props
    }

    fn rotation(&self) -> f32 {
        match self.position {
            Edge::Left => -90.0,
            Edge::Right => 90.0,
            Edge::Top | Edge::Bottom => 0.0,
        }
    }

    fn text_bounds(&self) -> Result<TextBounds, ComposeError> {
        let bounds = self.measurer.measure_text_bounds(&TextMeasurementConfig::new(
            &self.props.text,
            self.props.font_size,
        ))?;
        Ok(if self.position.is_horizontal() {
            bounds
        } else {
            bounds.rotated()
        })
    }
}

impl Item for Title {
    fn set_props(&mut self, props: &Props) -> Result<(), ComposeError> {
        self.props = decode_props(&self.id, props)?;
        Ok(())
    }

    fn render(
        &mut self,
        _data: &Value,
        ctx: &RenderContext,
        layer: &mut Layer,
    ) -> Result<(), ComposeError> {
        layer.clear();
        let bounds = self.text_bounds()?;
        let margins = &self.props.margins;
        let placement = self.placement.or(ctx.placement);

        let (x, y) = match self.position {
            Edge::Top | Edge::Bottom => {
                let width = placement
                    .and_then(|p| p.width)
                    .unwrap_or(ctx.plot.width);
                (width / 2.0, margins.top + bounds.ascent)
            }
            Edge::Left => {
                let height = placement
                    .and_then(|p| p.height)
                    .unwrap_or(ctx.plot.height);
                (margins.left + bounds.ascent, height / 2.0)
            }
            Edge::Right => {
                let height = placement
                    .and_then(|p| p.height)
                    .unwrap_or(ctx.plot.height);
                (margins.left + bounds.descent, height / 2.0)
            }
        };

        layer.push(Mark::Text {
            x,
            y,
            text: self.props.text.clone(),
            font_size: self.props.font_size,
            angle: self.rotation(),
            anchor: TextAnchor::Middle,
        });
        Ok(())
    }

    fn as_measurable(&mut self) -> Option<&mut dyn Measurable> {
        Some(self)
    }

    fn as_placeable(&mut self) -> Option<&mut dyn Placeable> {
        Some(self)
    }
}

impl Measurable for Title {
    fn measure(&mut self, _data: &Value) -> Result<Measurement, ComposeError> {
        let bounds = self.text_bounds()?;
        let margins = &self.props.margins;
        let size = Size::new(
            bounds.width + margins.left + margins.right,
            bounds.height + margins.top + margins.bottom,
        );
        Ok(Measurement::new(Some(self.position), size))
    }
}

impl Placeable for Title {
    fn place(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ApproxTextMeasurer;
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    fn title(position: Edge, props: Value) -> Title {
        let ctx = CreateContext {
            id: "title".to_string(),
            position: Some(position),
        };
        let props = props.as_object().cloned().unwrap_or_default();
        Title::new(&ctx, &props, Arc::new(ApproxTextMeasurer::new())).unwrap()
    }

    #[test]
    fn test_top_title_height() {
        let mut item = title(Edge::Top, json!({"text": "Sales", "font_size": 20}));
        let measurement = item.measure(&Value::Null).unwrap();
        assert_eq!(measurement.position, Some(Edge::Top));
        assert_approx_eq!(f32, measurement.offset().unwrap(), 36.0);
    }

    #[test]
    fn test_side_titles_are_rotated() {
        let mut item = title(
            Edge::Left,
            json!({"text": "Revenue", "font_size": 10, "margins": {"left": 2, "right": 2}}),
        );
        let measurement = item.measure(&Value::Null).unwrap();
        // Rotated: width is the text height
        assert_approx_eq!(f32, measurement.offset().unwrap(), 14.0);
        assert_approx_eq!(f32, item.rotation(), -90.0);
    }

    #[test]
    fn test_invalid_font_size_is_measurement_error() {
        let mut item = title(Edge::Bottom, json!({"text": "x", "font_size": 0}));
        let err = item.measure(&Value::Null).unwrap_err();
        assert!(matches!(err, ComposeError::Measurement(_)));
    }
}
