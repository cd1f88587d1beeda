use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use serde_json::Value;

use crate::error::ComposeError;
use crate::hover::{PointerEvent, PointerKind};
use crate::item::{decode_props, CreateContext, Hoverable, Item, Measurable, Placeable, RenderContext};
use crate::registry::{ItemRegistry, TypeMetadata};
use crate::scene::{Layer, Mark};
use crate::spec::Props;
use crate::types::{Edge, Measurement, Placement, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Created(String),
    SetProps(String),
    Measured(String, Value),
    Placed(String, Placement),
    Rendered(String, Value),
    Pointer(String, PointerKind),
}

/// Shared record of every call made on mock items
#[derive(Debug, Clone, Default)]
pub struct MockLog(Arc<Mutex<Vec<MockCall>>>);

impl MockLog {
    pub fn push(&self, call: MockCall) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MockProps {
    pub width: f32,
    pub height: f32,
    /// Edge reported by measure. Unparseable names keep the item out of edge layout.
    pub measured_position: Option<String>,
    pub skip_layout: bool,
    pub no_measure: bool,
    pub fail_measure: bool,
    pub hoverable: bool,
    pub ticks: Option<u32>,
}

/// Configurable item that records how the engine drives it
#[derive(Debug)]
pub struct MockItem {
    pub id: String,
    pub position: Option<Edge>,
    pub props: MockProps,
    pub placement: Option<Placement>,
    log: MockLog,
}

impl MockItem {
    pub fn new(ctx: &CreateContext, props: &Props, log: MockLog) -> Result<Self, ComposeError> {
        log.push(MockCall::Created(ctx.id.clone()));
        Ok(Self {
            id: ctx.id.clone(),
            position: ctx.position,
            props: decode_props(&ctx.id, props)?,
            placement: None,
            log,
        })
    }

    pub fn constructor(
    ) -> impl Fn(&CreateContext, &Props) -> Result<Box<dyn Item>, ComposeError> + Send + Sync + 'static
    {
        Self::constructor_with_log(MockLog::default())
    }

    pub fn constructor_with_log(
        log: MockLog,
    ) -> impl Fn(&CreateContext, &Props) -> Result<Box<dyn Item>, ComposeError> + Send + Sync + 'static
    {
        move |ctx: &CreateContext, props: &Props| -> Result<Box<dyn Item>, ComposeError> {
            Ok(Box::new(MockItem::new(ctx, props, log.clone())?) as Box<dyn Item>)
        }
    }
}

impl Item for MockItem {
    fn set_props(&mut self, props: &Props) -> Result<(), ComposeError> {
        self.log.push(MockCall::SetProps(self.id.clone()));
        self.props = decode_props(&self.id, props)?;
        Ok(())
    }

    fn render(
        &mut self,
        data: &Value,
        ctx: &RenderContext,
        layer: &mut Layer,
    ) -> Result<(), ComposeError> {
        self.log.push(MockCall::Rendered(self.id.clone(), data.clone()));
        layer.clear();
        if self.props.skip_layout {
            layer.origin = ctx.plot.origin();
        }
        layer.push(Mark::Rect {
            x: 0.0,
            y: 0.0,
            width: self.props.width,
            height: self.props.height,
            class: None,
        });
        Ok(())
    }

    fn skip_layout(&self) -> bool {
        self.props.skip_layout
    }

    fn as_measurable(&mut self) -> Option<&mut dyn Measurable> {
        if self.props.no_measure {
            None
        } else {
            Some(self)
        }
    }

    fn as_placeable(&mut self) -> Option<&mut dyn Placeable> {
        Some(self)
    }

    fn as_hoverable(&mut self) -> Option<&mut dyn Hoverable> {
        if self.props.hoverable {
            Some(self)
        } else {
            None
        }
    }
}

impl Measurable for MockItem {
    fn measure(&mut self, data: &Value) -> Result<Measurement, ComposeError> {
        self.log.push(MockCall::Measured(self.id.clone(), data.clone()));
        if self.props.fail_measure {
            return Err(ComposeError::Measurement(format!(
                "{} is not visible",
                self.id
            )));
        }
        let position = match &self.props.measured_position {
            Some(name) => Edge::from_str(name).ok(),
            None => self.position,
        };
        Ok(Measurement::new(
            position,
            Size::new(self.props.width, self.props.height),
        ))
    }
}

impl Placeable for MockItem {
    fn place(&mut self, placement: Placement) {
        self.log.push(MockCall::Placed(self.id.clone(), placement));
        self.placement = Some(placement);
    }
}

impl Hoverable for MockItem {
    fn on_pointer(&mut self, event: &PointerEvent) {
        self.log.push(MockCall::Pointer(self.id.clone(), event.kind));
    }
}

pub fn mock_registry() -> ItemRegistry {
    mock_registry_with_log(MockLog::default())
}

/// Registry with mock title, axis, legend, generic component and chart types
pub fn mock_registry_with_log(log: MockLog) -> ItemRegistry {
    let mut registry = ItemRegistry::new();
    for name in ["title", "axis", "legend", "mock"] {
        registry.register(
            name,
            TypeMetadata::component(),
            MockItem::constructor_with_log(log.clone()),
        );
    }
    registry.register(
        "chart",
        TypeMetadata::chart(),
        MockItem::constructor_with_log(log),
    );
    registry
}
