//! Numeric axis
//!
//! Ticks come from the `domain` prop or from the `key` field of the data. The axis
//! animates between tick sets, so measurement goes through
//! [`measure_without_transition`] to size it for the incoming ticks while the
//! rendered ticks stay as they are.

use std::sync::Arc;

use avenger_compose::item::{decode_props, CreateContext, RenderContext};
use avenger_compose::scene::{Layer, Mark, TextAnchor};
use avenger_compose::spec::Props;
use avenger_compose::transition::{measure_without_transition, Animated, Replay, Transition};
use avenger_compose::types::{Edge, Measurement, Placement, Size};
use avenger_compose::{ComposeError, Item, Measurable, Placeable};
use serde::Deserialize;
use serde_json::Value;

use crate::scale::{extent, field_values, LinearScale};
use crate::text::{TextMeasurementConfig, TextMeasurer};
use crate::ticks::format_tick;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisProps {
    /// Fixed domain. Taken from the data when unset.
    pub domain: Option<[f32; 2]>,
    /// Field holding the axis values when the data is an array of objects
    pub key: Option<String>,
    pub ticks: usize,
    pub nice: bool,
    pub tick_size: f32,
    pub tick_padding: f32,
    pub font_size: f32,
    pub title: Option<String>,
    pub title_font_size: f32,
    pub title_padding: f32,
    pub transition: Transition,
}

impl Default for AxisProps {
    fn default() -> Self {
        Self {
            domain: None,
            key: None,
            ticks: 10,
            nice: true,
            tick_size: 6.0,
            tick_padding: 3.0,
            font_size: 10.0,
            title: None,
            title_font_size: 12.0,
            title_padding: 4.0,
            transition: Transition::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f32,
    pub label: String,
}

/// Ticks an axis renders for one data set
#[derive(Debug, Clone, PartialEq)]
pub struct AxisState {
    pub domain: (f32, f32),
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug)]
pub struct Axis {
    id: String,
    position: Edge,
    props: AxisProps,
    measurer: Arc<dyn TextMeasurer>,
    animated: Animated<AxisState>,
    placement: Option<Placement>,
}

impl Axis {
    pub fn new(
        ctx: &CreateContext,
        props: &Props,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Result<Self, ComposeError> {
        let props: AxisProps = decode_props(&ctx.id, props)?;
        Ok(Self {
            id: ctx.id.clone(),
            position: ctx.position.unwrap_or(Edge::Bottom),
            animated: Animated::new(props.transition),
            props,
            measurer,
            placement: None,
        })
    }

    /// Ticks currently on screen
    pub fn state(&self) -> Option<&AxisState> {
        self.animated.committed()
    }

    pub fn skips_next_transition(&self) -> bool {
        self.animated.skips_next_transition()
    }

    fn domain(&self, data: &Value) -> (f32, f32) {
        let domain = match self.props.domain {
            Some([d0, d1]) => (d0, d1),
            None => extent(&field_values(data, self.props.key.as_deref())).unwrap_or((0.0, 1.0)),
        };
        if self.props.nice {
            LinearScale::default()
                .with_domain(domain)
                .nice(self.props.ticks)
                .domain()
        } else {
            domain
        }
    }

    fn text_size(&self, text: &str, font_size: f32) -> Result<Size, ComposeError> {
        let bounds = self
            .measurer
            .measure_text_bounds(&TextMeasurementConfig::new(text, font_size))?;
        Ok(Size::new(bounds.width, bounds.line_height))
    }
}

impl Replay for Axis {
    type State = AxisState;

    fn animated(&self) -> &Animated<AxisState> {
        &self.animated
    }

    fn animated_mut(&mut self) -> &mut Animated<AxisState> {
        &mut self.animated
    }

    fn compute_state(&self, data: &Value) -> Result<AxisState, ComposeError> {
        let domain = self.domain(data);
        let scale = LinearScale::default().with_domain(domain);
        let step = scale.tick_step(self.props.ticks);
        let ticks = scale
            .ticks(self.props.ticks)
            .into_iter()
            .map(|value| AxisTick {
                value,
                label: format_tick(value, step),
            })
            .collect();
        Ok(AxisState { domain, ticks })
    }

    fn natural_size(&self, state: &AxisState) -> Result<Size, ComposeError> {
        let labels: Vec<Size> = state
            .ticks
            .iter()
            .map(|tick| self.text_size(&tick.label, self.props.font_size))
            .collect::<Result<_, _>>()?;
        let label_width = labels.iter().map(|s| s.width).fold(0.0, f32::max);
        let label_height = labels.iter().map(|s| s.height).fold(0.0, f32::max);

        let title = match &self.props.title {
            Some(title) => {
                self.text_size(title, self.props.title_font_size)?.height
                    + self.props.title_padding
            }
            None => 0.0,
        };

        let depth = self.props.tick_size + self.props.tick_padding + title;
        Ok(if self.position.is_horizontal() {
            Size::new(0.0, depth + label_height)
        } else {
            Size::new(depth + label_width, 0.0)
        })
    }
}

impl Item for Axis {
    fn set_props(&mut self, props: &Props) -> Result<(), ComposeError> {
        self.props = decode_props(&self.id, props)?;
        self.animated.set_transition(self.props.transition);
        Ok(())
    }

    fn render(
        &mut self,
        data: &Value,
        ctx: &RenderContext,
        layer: &mut Layer,
    ) -> Result<(), ComposeError> {
        let state = self.compute_state(data)?;
        let size = self.natural_size(&state)?;
        let frame = self.animated.commit(state);
        layer.transition = Some(frame.transition.duration());
        layer.clear();

        let placement = self.placement.or(ctx.placement);
        let length = if self.position.is_horizontal() {
            placement.and_then(|p| p.width).unwrap_or(ctx.plot.width)
        } else {
            placement.and_then(|p| p.height).unwrap_or(ctx.plot.height)
        };
        let range = if self.position.is_horizontal() {
            (0.0, length)
        } else {
            (length, 0.0)
        };
        let scale = LinearScale::new(frame.to.domain, range);

        let props = &self.props;
        let label_offset = props.tick_size + props.tick_padding;
        // Distance from the layer origin to the axis line
        let (line, sign) = match self.position {
            Edge::Top => (size.height, -1.0),
            Edge::Left => (size.width, -1.0),
            Edge::Bottom | Edge::Right => (0.0, 1.0),
        };

        let along = |a: f32, across: f32| {
            if self.position.is_horizontal() {
                (a, across)
            } else {
                (across, a)
            }
        };

        let (x1, y1) = along(0.0, line);
        let (x2, y2) = along(length, line);
        layer.push(Mark::Rule { x1, y1, x2, y2 });

        let anchor = match self.position {
            Edge::Top | Edge::Bottom => TextAnchor::Middle,
            Edge::Left => TextAnchor::End,
            Edge::Right => TextAnchor::Start,
        };
        for tick in &frame.to.ticks {
            let at = scale.scale(tick.value);
            let (x1, y1) = along(at, line);
            let (x2, y2) = along(at, line + sign * props.tick_size);
            layer.push(Mark::Rule { x1, y1, x2, y2 });

            let baseline = if self.position == Edge::Bottom {
                props.font_size * 0.8
            } else if self.position.is_horizontal() {
                0.0
            } else {
                props.font_size * 0.3
            };
            let (x, y) = along(at, line + sign * label_offset);
            layer.push(Mark::Text {
                x,
                y: y + baseline,
                text: tick.label.clone(),
                font_size: props.font_size,
                angle: 0.0,
                anchor,
            });
        }

        if let Some(title) = &props.title {
            let outer = match self.position {
                Edge::Top | Edge::Left => props.title_font_size * 0.8,
                Edge::Bottom => size.height - props.title_font_size * 0.2,
                Edge::Right => size.width - props.title_font_size * 0.2,
            };
            let (x, y) = along(length / 2.0, outer);
            layer.push(Mark::Text {
                x,
                y,
                text: title.clone(),
                font_size: props.title_font_size,
                angle: if self.position.is_horizontal() { 0.0 } else { -90.0 },
                anchor: TextAnchor::Middle,
            });
        }

        Ok(())
    }

    fn as_measurable(&mut self) -> Option<&mut dyn Measurable> {
        Some(self)
    }

    fn as_placeable(&mut self) -> Option<&mut dyn Placeable> {
        Some(self)
    }
}

impl Measurable for Axis {
    fn measure(&mut self, data: &Value) -> Result<Measurement, ComposeError> {
        let size = measure_without_transition(self, data)?;
        Ok(Measurement::new(Some(self.position), size))
    }
}

impl Placeable for Axis {
    fn place(&mut self, placement: Placement) {
        self.placement = Some(placement);
    }
}
