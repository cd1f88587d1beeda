use avenger_compose::item::{decode_props, CreateContext, RenderContext};
use avenger_compose::scene::{Layer, Mark};
use avenger_compose::spec::Props;
use avenger_compose::{ComposeError, Item};
use serde::Deserialize;
use serde_json::Value;

use crate::scale::{extent, field_values, LinearScale};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridOrientation {
    /// Lines across the plot at y ticks
    #[default]
    Horizontal,
    /// Lines down the plot at x ticks
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridlinesProps {
    pub orientation: GridOrientation,
    pub domain: Option<[f32; 2]>,
    pub key: Option<String>,
    pub ticks: usize,
}

impl Default for GridlinesProps {
    fn default() -> Self {
        Self {
            orientation: GridOrientation::default(),
            domain: None,
            key: None,
            ticks: 10,
        }
    }
}

/// Rules across the plot area, drawn on a chart layer
#[derive(Debug)]
pub struct Gridlines {
    id: String,
    props: GridlinesProps,
}

impl Gridlines {
    pub fn new(ctx: &CreateContext, props: &Props) -> Result<Self, ComposeError> {
        Ok(Self {
            id: ctx.id.clone(),
            props: decode_props(&ctx.id, props)?,
        })
    }
}

impl Item for Gridlines {
    fn set_props(&mut self, props: &Props) -> Result<(), ComposeError> {
        self.props = decode_props(&self.id, props)?;
        Ok(())
    }

    fn render(
        &mut self,
        data: &Value,
        ctx: &RenderContext,
        layer: &mut Layer,
    ) -> Result<(), ComposeError> {
        layer.clear();
        let domain = match self.props.domain {
            Some([d0, d1]) => (d0, d1),
            None => extent(&field_values(data, self.props.key.as_deref())).unwrap_or((0.0, 1.0)),
        };
        let (width, height) = (ctx.plot.width, ctx.plot.height);

        let marks = match self.props.orientation {
            GridOrientation::Horizontal => {
                let scale = LinearScale::new(domain, (height, 0.0)).nice(self.props.ticks);
                scale
                    .ticks(self.props.ticks)
                    .into_iter()
                    .map(|tick| {
                        let y = scale.scale(tick);
                        Mark::Rule { x1: 0.0, y1: y, x2: width, y2: y }
                    })
                    .collect::<Vec<_>>()
            }
            GridOrientation::Vertical => {
                let scale = LinearScale::new(domain, (0.0, width)).nice(self.props.ticks);
                scale
                    .ticks(self.props.ticks)
                    .into_iter()
                    .map(|tick| {
                        let x = scale.scale(tick);
                        Mark::Rule { x1: x, y1: 0.0, x2: x, y2: height }
                    })
                    .collect()
            }
        };
        layer.marks.extend(marks);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avenger_compose::scene::{LayerOptions, RootKind, Scene};
    use avenger_compose::types::{Margins, PlotRect, Size};
    use serde_json::json;

    #[test]
    fn test_horizontal_gridlines_span_plot() {
        let ctx = CreateContext {
            id: "grid".to_string(),
            position: None,
        };
        let props = json!({"domain": [0, 10], "ticks": 2});
        let mut grid = Gridlines::new(&ctx, props.as_object().unwrap()).unwrap();

        let mut scene = Scene::new(RootKind::Block, Size::new(120.0, 120.0));
        let id = scene.create_chart_layer(LayerOptions {
            item_id: "grid".to_string(),
            z_index: 55,
        });
        let plot = PlotRect::from_insets(Size::new(120.0, 120.0), Margins::uniform(10.0));
        let render_ctx = RenderContext {
            id: "grid",
            canvas: Size::new(120.0, 120.0),
            plot: &plot,
            placement: None,
        };
        let layer = scene.layer_mut(id).unwrap();
        grid.render(&Value::Null, &render_ctx, layer).unwrap();

        assert_eq!(
            layer.marks,
            vec![
                Mark::Rule { x1: 0.0, y1: 100.0, x2: 100.0, y2: 100.0 },
                Mark::Rule { x1: 0.0, y1: 50.0, x2: 100.0, y2: 50.0 },
                Mark::Rule { x1: 0.0, y1: 0.0, x2: 100.0, y2: 0.0 },
            ]
        );
    }
}
