use std::sync::Arc;

use avenger_compose::item::{decode_props, CreateContext, RenderContext};
use avenger_compose::scene::{Layer, Mark, TextAnchor};
use avenger_compose::spec::Props;
use avenger_compose::types::{Edge, Measurement, Placement, PlotRect, Size};
use avenger_compose::{ComposeError, Item, Measurable, Placeable};
use serde::Deserialize;
use serde_json::Value;
use strum::{Display, EnumString};

use crate::text::{TextMeasurementConfig, TextMeasurer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwatchShape {
    #[default]
    Rect,
    Line,
    Circle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub shape: SwatchShape,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegendProps {
    /// Entries to show. Falls back to `{label}` objects in the data.
    pub entries: Vec<LegendEntry>,
    pub swatch_size: f32,
    pub swatch_padding: f32,
    pub entry_padding: f32,
    pub font_size: f32,
}

impl Default for LegendProps {
    fn default() -> Self {
        Self {
            entries: vec![],
            swatch_size: 12.0,
            swatch_padding: 4.0,
            entry_padding: 6.0,
            font_size: 10.0,
        }
    }
}

/// Plot corner an inset legend is positioned from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, EnumString, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InsetProps {
    /// Offset from the corner, pointing into the plot
    pub translation: [f32; 2],
    pub relative_to: Corner,
}

impl Default for InsetProps {
    fn default() -> Self {
        Self {
            translation: [10.0, 10.0],
            relative_to: Corner::TopLeft,
        }
    }
}

#[derive(Debug)]
pub struct Legend {
    id: String,
    position: Edge,
    props: LegendProps,
    /// Set for inset legends, which position themselves inside the plot
    inset: Option<InsetProps>,
    measurer: Arc<dyn TextMeasurer>,
    placement: Option<Placement>,
}

impl Legend {
    pub fn new(
        ctx: &CreateContext,
        props: &Props,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Result<Self, ComposeError> {
        Ok(Self {
            id: ctx.id.clone(),
            position: ctx.position.unwrap_or(Edge::Right),
            props: decode_props(&ctx.id, props)?,
            inset: None,
            measurer,
            placement: None,
        })
    }

    pub fn new_inset(
        ctx: &CreateContext,
        props: &Props,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Result<Self, ComposeError> {
        let mut legend = Self::new(ctx, props, measurer)?;
        legend.inset = Some(decode_props(&ctx.id, props)?);
        Ok(legend)
    }

    fn entries(&self, data: &Value) -> Vec<LegendEntry> {
        if !self.props.entries.is_empty() {
            return self.props.entries.clone();
        }
        data.as_array()
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| serde_json::from_value(row.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn stacks_vertically(&self) -> bool {
        self.inset.is_some() || !self.position.is_horizontal()
    }

    /// Entry offsets along the stacking direction plus the overall size
    fn layout(&self, entries: &[LegendEntry]) -> Result<(Vec<f32>, Size), ComposeError> {
        let props = &self.props;
        let mut offsets = Vec::with_capacity(entries.len());
        let mut size = Size::zero();

        for entry in entries {
            let text = self
                .measurer
                .measure_text_bounds(&TextMeasurementConfig::new(&entry.label, props.font_size))?;
            let width = props.swatch_size + props.swatch_padding + text.width;
            let height = props.swatch_size.max(text.height);

            if self.stacks_vertically() {
                offsets.push(size.height);
                size.height += height + props.entry_padding;
                size.width = size.width.max(width);
            } else {
                offsets.push(size.width);
                size.width += width + props.entry_padding;
                size.height = size.height.max(height);
            }
        }

        // No trailing padding after the last entry
        if !entries.is_empty() {
            if self.stacks_vertically() {
                size.height -= props.entry_padding;
            } else {
                size.width -= props.entry_padding;
            }
        }
        Ok((offsets, size))
    }

    fn inset_origin(&self, inset: &InsetProps, plot: &PlotRect, size: Size) -> [f32; 2] {
        let [dx, dy] = inset.translation;
        let x = match inset.relative_to {
            Corner::TopLeft | Corner::BottomLeft => plot.left + dx,
            Corner::TopRight | Corner::BottomRight => plot.left + plot.width - dx - size.width,
        };
        let y = match inset.relative_to {
            Corner::TopLeft | Corner::TopRight => plot.top + dy,
            Corner::BottomLeft | Corner::BottomRight => plot.top + plot.height - dy - size.height,
        };
        [x, y]
    }
}

impl Item for Legend {
    fn set_props(&mut self, props: &Props) -> Result<(), ComposeError> {
        self.props = decode_props(&self.id, props)?;
        if self.inset.is_some() {
            self.inset = Some(decode_props(&self.id, props)?);
        }
        Ok(())
    }

    fn render(
        &mut self,
        data: &Value,
        ctx: &RenderContext,
        layer: &mut Layer,
    ) -> Result<(), ComposeError> {
        layer.clear();
        let entries = self.entries(data);
        let (offsets, size) = self.layout(&entries)?;

        if let Some(inset) = &self.inset {
            layer.origin = self.inset_origin(inset, ctx.plot, size);
        }

        let props = &self.props;
        let swatch = props.swatch_size;
        for (entry, offset) in entries.iter().zip(offsets) {
            let (x, y) = if self.stacks_vertically() {
                (0.0, offset)
            } else {
                (offset, 0.0)
            };

            let mark = match entry.shape {
                SwatchShape::Rect => Mark::Rect {
                    x,
                    y,
                    width: swatch,
                    height: swatch,
                    class: entry.class.clone(),
                },
                SwatchShape::Line => Mark::Path {
                    points: vec![[x, y + swatch / 2.0], [x + swatch, y + swatch / 2.0]],
                    class: entry.class.clone(),
                },
                SwatchShape::Circle => Mark::Circle {
                    cx: x + swatch / 2.0,
                    cy: y + swatch / 2.0,
                    r: swatch / 2.0,
                },
            };
            layer.push(mark);
            layer.push(Mark::Text {
                x: x + swatch + props.swatch_padding,
                y: y + swatch / 2.0 + props.font_size * 0.3,
                text: entry.label.clone(),
                font_size: props.font_size,
                angle: 0.0,
                anchor: TextAnchor::Start,
            });
        }
        Ok(())
    }

    fn skip_layout(&self) -> bool {
        self.inset.is_some()
    }

    fn as_measurable(&mut self) -> Option<&mut dyn Measurable> {
        Some(self)
    }

    fn as_placeable(&mut self) -> Option<&mut dyn Placeable> {
        Some(self)
    }
}

impl Measurable for Legend {
    fn measure(&mut self, data: &Value) -> Result<Measurement, ComposeError> {
        let (_, size) = self.layout(&self.entries(data))?;
        Ok(Measurement::new(Some(self.position), size))
    }
}

impl Placeable for Legend {
    fn place(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ApproxTextMeasurer;
    use avenger_compose::scene::{LayerOptions, RootKind, Scene};
    use avenger_compose::types::Margins;
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    fn ctx(position: Edge) -> CreateContext {
        CreateContext {
            id: "legend".to_string(),
            position: Some(position),
        }
    }

    fn props(value: Value) -> Props {
        value.as_object().cloned().unwrap_or_default()
    }

    fn entries() -> Value {
        json!({"entries": [{"label": "abc"}, {"label": "abcdef", "shape": "line"}]})
    }

    #[test]
    fn test_side_legend_stacks_vertically() {
        let measurer = Arc::new(ApproxTextMeasurer::new());
        let mut legend = Legend::new(&ctx(Edge::Right), &props(entries()), measurer).unwrap();
        let measurement = legend.measure(&Value::Null).unwrap();
        // Widest entry: 12 swatch + 4 padding + 6 chars * 6px
        assert_approx_eq!(f32, measurement.width, 52.0);
        assert_approx_eq!(f32, measurement.height, 12.0 + 6.0 + 12.0);
        assert_approx_eq!(f32, measurement.offset().unwrap(), 52.0);
    }

    #[test]
    fn test_bottom_legend_stacks_horizontally() {
        let measurer = Arc::new(ApproxTextMeasurer::new());
        let mut legend = Legend::new(&ctx(Edge::Bottom), &props(entries()), measurer).unwrap();
        let measurement = legend.measure(&Value::Null).unwrap();
        assert_approx_eq!(f32, measurement.width, 34.0 + 6.0 + 52.0);
        assert_approx_eq!(f32, measurement.offset().unwrap(), 12.0);
    }

    #[test]
    fn test_entries_from_data() {
        let measurer = Arc::new(ApproxTextMeasurer::new());
        let legend = Legend::new(&ctx(Edge::Right), &Props::new(), measurer).unwrap();
        let entries = legend.entries(&json!([{"label": "a", "class": "series-a"}, {"other": 1}]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].class.as_deref(), Some("series-a"));
    }

    #[test]
    fn test_inset_legend_positions_itself() {
        let measurer = Arc::new(ApproxTextMeasurer::new());
        let mut legend = Legend::new_inset(
            &ctx(Edge::Right),
            &props(json!({
                "entries": [{"label": "abc"}],
                "translation": [5, 5],
                "relative_to": "bottom-right"
            })),
            measurer,
        )
        .unwrap();
        assert!(legend.skip_layout());

        let mut scene = Scene::new(RootKind::Block, Size::new(300.0, 200.0));
        let id = scene.create_component_layer(LayerOptions {
            item_id: "legend".to_string(),
            z_index: 200,
        });
        let plot = PlotRect::from_insets(Size::new(300.0, 200.0), Margins::uniform(20.0));
        let render_ctx = RenderContext {
            id: "legend",
            canvas: Size::new(300.0, 200.0),
            plot: &plot,
            placement: None,
        };
        let layer = scene.layer_mut(id).unwrap();
        legend.render(&Value::Null, &render_ctx, layer).unwrap();

        // 34x12 legend, 5px in from the plot's bottom-right corner
        assert_approx_eq!(f32, layer.origin[0], 280.0 - 5.0 - 34.0);
        assert_approx_eq!(f32, layer.origin[1], 180.0 - 5.0 - 12.0);
        assert_eq!(layer.marks.len(), 2);
    }

    #[test]
    fn test_corner_names() {
        assert_eq!("bottom-right".parse::<Corner>().unwrap(), Corner::BottomRight);
        assert_eq!(Corner::TopLeft.to_string(), "top-left");
        assert!("middle".parse::<Corner>().is_err());
    }
}
