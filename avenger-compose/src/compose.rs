use std::collections::HashMap;

use serde_json::Value;

use crate::apply::apply_layout;
use crate::calculate::{calculate_layout, EdgeLayout, LayoutEntry};
use crate::composite::composite;
use crate::config::ComposeConfig;
use crate::error::ComposeError;
use crate::events::{ItemEvent, ItemEvents};
use crate::hover::{PointerEvent, PointerTracker};
use crate::item::RenderContext;
use crate::parse::{extract_layout, DataSliceMap, ItemRole, LayoutTree};
use crate::reconcile::{reconcile, LiveItem, LiveItems};
use crate::registry::ItemRegistry;
use crate::scene::{LayerId, Scene};
use crate::spec::LayoutSpec;
use crate::types::{Placement, PlotRect, Size};

/// Container that owns the live items and runs the layout pipeline.
///
/// Every [`Compose::draw`] parses the layout, reconciles live items, measures edge
/// items, shrinks the plot rectangle, places edge items around it, renders every
/// item into its layer and finally sorts layers into paint order.
#[derive(Debug)]
pub struct Compose {
    config: ComposeConfig,
    registry: ItemRegistry,
    scene: Scene,
    items: LiveItems,
    tree: LayoutTree,
    slices: DataSliceMap,
    edge_layout: EdgeLayout,
    plot: PlotRect,
    placements: HashMap<String, Placement>,
    events: ItemEvents,
    pointer: PointerTracker,
    last_draw: Option<(LayoutSpec, Value)>,
}

impl Compose {
    /// Create a container. Configuration aliases and overrides are applied to the registry here.
    pub fn new(config: ComposeConfig, mut registry: ItemRegistry) -> Result<Self, ComposeError> {
        registry.apply_config(&config)?;
        let scene = Scene::new(config.root, config.size());
        let plot = EdgeLayout::default().plot_rect(config.size(), &config.margins);

        Ok(Self {
            config,
            registry,
            scene,
            items: LiveItems::new(),
            tree: LayoutTree::default(),
            slices: DataSliceMap::default(),
            edge_layout: EdgeLayout::default(),
            plot,
            placements: HashMap::new(),
            events: ItemEvents::new(),
            pointer: PointerTracker::new(),
            last_draw: None,
        })
    }

    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn size(&self) -> Size {
        self.config.size()
    }

    /// Plot rectangle committed by the last draw
    pub fn plot_rect(&self) -> PlotRect {
        self.plot
    }

    pub fn edge_layout(&self) -> &EdgeLayout {
        &self.edge_layout
    }

    pub fn layout_tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn data_slices(&self) -> &DataSliceMap {
        &self.slices
    }

    pub fn placement(&self, id: &str) -> Option<Placement> {
        self.placements.get(id).copied()
    }

    pub fn item(&self, id: &str) -> Option<&LiveItem> {
        self.items.get(id)
    }

    /// Live items in declaration order
    pub fn items(&self) -> impl Iterator<Item = (&str, &LiveItem)> {
        self.items.iter().map(|(id, item)| (id.as_str(), item))
    }

    pub fn on_item_event<F>(&mut self, handler: F)
    where
        F: Fn(&ItemEvent) + 'static,
    {
        self.events.register_handler(handler);
    }

    pub fn on_pointer<F>(&mut self, handler: F)
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.pointer.register_handler(handler);
    }

    /// Change the canvas size used by the next draw
    pub fn resize(&mut self, width: f32, height: f32) {
        self.config.width = width;
        self.config.height = height;
        self.scene.set_size(self.config.size());
    }

    /// Re-run the whole pipeline with the last layout and data
    pub fn redraw(&mut self) -> Result<(), ComposeError> {
        match self.last_draw.take() {
            Some((spec, data)) => self.draw(&spec, &data),
            None => Ok(()),
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn draw(&mut self, spec: &LayoutSpec, data: &Value) -> Result<(), ComposeError> {
        self.last_draw = Some((spec.clone(), data.clone()));
        let parsed = extract_layout(spec);

        let mut events = Vec::new();
        let reconciled = reconcile(
            &mut self.items,
            &parsed.items,
            &self.registry,
            &mut self.scene,
            &mut |event| events.push(event),
        );
        self.dispatch_item_events(&events);
        reconciled?;

        self.tree = parsed.tree;
        self.slices = parsed.data;

        self.layout(data);
        self.render(data)?;

        let declared: Vec<LayerId> = self.items.values().map(|live| live.layer).collect();
        composite(&mut self.scene, &declared);

        tracing::debug!(
            items = self.items.len(),
            plot_width = self.plot.width,
            plot_height = self.plot.height,
            "Draw complete"
        );
        Ok(())
    }

    /// Canvas position moved. Delivers enter/move/leave events to hover targets.
    pub fn pointer_moved(&mut self, position: [f32; 2]) {
        let events = self.pointer.pointer_moved(position, &self.plot);
        for event in &events {
            self.deliver_pointer(event);
        }
    }

    /// Pointer left the canvas
    pub fn pointer_left(&mut self) {
        if let Some(event) = self.pointer.pointer_left(&self.plot) {
            self.deliver_pointer(&event);
        }
    }

    fn deliver_pointer(&mut self, event: &PointerEvent) {
        let targets: Vec<String> = self.pointer.targets().map(str::to_string).collect();
        for id in &targets {
            if let Some(hoverable) = self
                .items
                .get_mut(id)
                .and_then(|live| live.item.as_hoverable())
            {
                hoverable.on_pointer(event);
            }
        }
        self.pointer.dispatch(event);
    }

    fn dispatch_item_events(&mut self, events: &[ItemEvent]) {
        for event in events {
            let hoverable = match event {
                ItemEvent::Attached { id, .. } => self
                    .items
                    .get_mut(id)
                    .is_some_and(|live| live.item.as_hoverable().is_some()),
                _ => false,
            };
            self.pointer.handle_item_event(event, hoverable);
            self.events.dispatch(event);
        }
    }

    fn layout(&mut self, data: &Value) {
        let rank: HashMap<&str, usize> = self
            .tree
            .edge_order()
            .enumerate()
            .map(|(index, (_, id))| (id, index))
            .collect();

        let mut entries: Vec<(usize, LayoutEntry)> = self
            .items
            .iter_mut()
            .filter_map(|(id, live)| {
                let index = *rank.get(id.as_str())?;
                Some((
                    index,
                    LayoutEntry {
                        id: id.as_str(),
                        position: live.position,
                        item: &mut live.item,
                    },
                ))
            })
            .collect();
        entries.sort_by_key(|(index, _)| *index);

        let layout = calculate_layout(
            entries.into_iter().map(|(_, entry)| entry),
            &self.slices,
            data,
        );

        let canvas = self.config.size();
        let plot = layout.plot_rect(canvas, &self.config.margins);

        let items = &mut self.items;
        let mut placements = HashMap::new();
        apply_layout(&layout, &plot, canvas, |id, placement| {
            if let Some(placeable) = items
                .get_mut(id)
                .and_then(|live| live.item.as_placeable())
            {
                placeable.place(placement);
            }
            tracing::trace!(id, x = placement.x, y = placement.y, "Placed item");
            placements.insert(id.to_string(), placement);
        });

        self.placements = placements;
        self.edge_layout = layout;
        self.plot = plot;
    }

    fn render(&mut self, data: &Value) -> Result<(), ComposeError> {
        let canvas = self.config.size();

        for (id, live) in self.items.iter_mut() {
            let layer = self.scene.layer_mut(live.layer).ok_or_else(|| {
                ComposeError::InternalError(format!("No layer found for item `{id}`"))
            })?;

            let placement = self.placements.get(id).copied();
            match (live.role, placement) {
                (ItemRole::Chart, _) => layer.origin = self.plot.origin(),
                (ItemRole::Component, Some(placement)) => layer.origin = placement.origin(),
                (ItemRole::Component, None) => {}
            }

            let ctx = RenderContext {
                id,
                canvas,
                plot: &self.plot,
                placement,
            };
            live.item.render(self.slices.demux(id, data), &ctx, layer)?;
        }

        Ok(())
    }
}
