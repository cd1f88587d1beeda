//! Basic charts drawn inside the plot rectangle

use avenger_compose::hover::{PointerEvent, PointerKind};
use avenger_compose::item::{decode_props, CreateContext, RenderContext};
use avenger_compose::scene::{Layer, Mark};
use avenger_compose::spec::Props;
use avenger_compose::{ComposeError, Hoverable, Item};
use serde::Deserialize;
use serde_json::Value;

use crate::scale::{extent, field_values, LinearScale};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeriesProps {
    pub x_key: String,
    pub y_key: String,
    pub x_domain: Option<[f32; 2]>,
    pub y_domain: Option<[f32; 2]>,
    pub class: Option<String>,
}

impl Default for SeriesProps {
    fn default() -> Self {
        Self {
            x_key: "x".to_string(),
            y_key: "y".to_string(),
            x_domain: None,
            y_domain: None,
            class: None,
        }
    }
}

impl SeriesProps {
    fn points(&self, data: &Value) -> Vec<[f32; 2]> {
        let Some(rows) = data.as_array() else {
            return vec![];
        };
        rows.iter()
            .filter_map(|row| {
                let x = row.get(&self.x_key)?.as_f64()?;
                let y = row.get(&self.y_key)?.as_f64()?;
                Some([x as f32, y as f32])
            })
            .collect()
    }

    fn y_domain(&self, data: &Value, include_zero: bool) -> (f32, f32) {
        if let Some([y0, y1]) = self.y_domain {
            return (y0, y1);
        }
        let (lo, hi) = extent(&field_values(data, Some(self.y_key.as_str()))).unwrap_or((0.0, 1.0));
        if include_zero {
            (lo.min(0.0), hi.max(0.0))
        } else {
            (lo, hi)
        }
    }
}

/// Line chart. Hovering highlights the point nearest the pointer along x.
#[derive(Debug)]
pub struct Lines {
    id: String,
    props: SeriesProps,
    /// Rendered points in plot coordinates
    points: Vec<[f32; 2]>,
    highlighted: Option<usize>,
}

impl Lines {
    pub fn new(ctx: &CreateContext, props: &Props) -> Result<Self, ComposeError> {
        Ok(Self {
            id: ctx.id.clone(),
            props: decode_props(&ctx.id, props)?,
            points: vec![],
            highlighted: None,
        })
    }

    pub fn highlighted(&self) -> Option<[f32; 2]> {
        self.highlighted.and_then(|index| self.points.get(index).copied())
    }

    fn nearest(&self, x: f32) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (a[0] - x).abs().total_cmp(&(b[0] - x).abs()))
            .map(|(index, _)| index)
    }
}

impl Item for Lines {
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
        let values = self.props.points(data);
        let x_domain = match self.props.x_domain {
            Some([x0, x1]) => (x0, x1),
            None => extent(&values.iter().map(|p| p[0]).collect::<Vec<_>>()).unwrap_or((0.0, 1.0)),
        };
        let x_scale = LinearScale::new(x_domain, (0.0, ctx.plot.width));
        let y_scale = LinearScale::new(self.props.y_domain(data, false), (ctx.plot.height, 0.0));

        self.points = values
            .iter()
            .map(|[x, y]| [x_scale.scale(*x), y_scale.scale(*y)])
            .collect();
        if self.highlighted.is_some_and(|index| index >= self.points.len()) {
            self.highlighted = None;
        }

        layer.push(Mark::Path {
            points: self.points.clone(),
            class: self.props.class.clone(),
        });
        if let Some([cx, cy]) = self.highlighted() {
            layer.push(Mark::Circle { cx, cy, r: 4.0 });
        }
        Ok(())
    }

    fn as_hoverable(&mut self) -> Option<&mut dyn Hoverable> {
        Some(self)
    }
}

impl Hoverable for Lines {
    fn on_pointer(&mut self, event: &PointerEvent) {
        self.highlighted = match event.kind {
            PointerKind::Leave => None,
            PointerKind::Enter | PointerKind::Move if event.inside => {
                self.nearest(event.chart_position[0])
            }
            PointerKind::Enter | PointerKind::Move => None,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarsProps {
    #[serde(flatten)]
    pub series: SeriesProps,
    /// Fraction of each band left empty
    pub padding: f32,
}

impl Default for BarsProps {
    fn default() -> Self {
        Self {
            series: SeriesProps::default(),
            padding: 0.1,
        }
    }
}

/// Bar chart with one band per data row, in data order
#[derive(Debug)]
pub struct Bars {
    id: String,
    props: BarsProps,
}

impl Bars {
    pub fn new(ctx: &CreateContext, props: &Props) -> Result<Self, ComposeError> {
        Ok(Self {
            id: ctx.id.clone(),
            props: decode_props(&ctx.id, props)?,
        })
    }
}

impl Item for Bars {
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
        let series = &self.props.series;
        let values = field_values(data, Some(series.y_key.as_str()));
        if values.is_empty() {
            return Ok(());
        }

        let y_scale = LinearScale::new(series.y_domain(data, true), (ctx.plot.height, 0.0));
        let band = ctx.plot.width / values.len() as f32;
        let inset = band * self.props.padding.clamp(0.0, 1.0) / 2.0;
        let baseline = y_scale.scale(0.0);

        for (index, value) in values.iter().enumerate() {
            let y = y_scale.scale(*value);
            layer.push(Mark::Rect {
                x: index as f32 * band + inset,
                y: y.min(baseline),
                width: band - 2.0 * inset,
                height: (baseline - y).abs(),
                class: series.class.clone(),
            });
        }
        Ok(())
    }
}
