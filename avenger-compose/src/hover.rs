//! Pointer tracking relative to the committed plot rectangle
//!
//! The tracker only reads layout state. It learns which items want pointer events
//! from item attach/detach notifications.

use std::fmt::{self, Debug};
use std::sync::Arc;

use indexmap::IndexSet;

use crate::events::ItemEvent;
use crate::types::PlotRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Enter,
    Move,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Position on the canvas
    pub position: [f32; 2],
    /// Position relative to the plot rectangle's origin
    pub chart_position: [f32; 2],
    pub inside: bool,
}

pub type PointerHandler = Arc<dyn Fn(&PointerEvent)>;

#[derive(Clone, Default)]
pub struct PointerTracker {
    hoverable: IndexSet<String>,
    inside: bool,
    last_position: [f32; 2],
    handlers: Vec<PointerHandler>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler<F>(&mut self, handler: F)
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.handlers.push(Arc::new(handler));
    }

    /// Keep the set of hover targets in step with item lifecycle
    pub fn handle_item_event(&mut self, event: &ItemEvent, hoverable: bool) {
        match event {
            ItemEvent::Attached { id, .. } if hoverable => {
                self.hoverable.insert(id.clone());
            }
            ItemEvent::Detached { id, .. } => {
                self.hoverable.shift_remove(id);
            }
            _ => {}
        }
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.hoverable.iter().map(|id| id.as_str())
    }

    /// Translate a canvas position into the events to deliver, in order.
    ///
    /// Entering or leaving the plot rectangle produces an enter/leave event before
    /// the move event.
    pub fn pointer_moved(&mut self, position: [f32; 2], plot: &PlotRect) -> Vec<PointerEvent> {
        let inside = plot.contains(position);
        let chart_position = plot.to_plot_coords(position);
        let event = |kind| PointerEvent {
            kind,
            position,
            chart_position,
            inside,
        };

        let mut events = Vec::with_capacity(2);
        if inside && !self.inside {
            events.push(event(PointerKind::Enter));
        } else if !inside && self.inside {
            events.push(event(PointerKind::Leave));
        }
        events.push(event(PointerKind::Move));
        self.inside = inside;
        self.last_position = position;
        events
    }

    /// The pointer left the canvas entirely. Reported at the last known position.
    pub fn pointer_left(&mut self, plot: &PlotRect) -> Option<PointerEvent> {
        if !self.inside {
            return None;
        }
        self.inside = false;
        let position = self.last_position;
        Some(PointerEvent {
            kind: PointerKind::Leave,
            position,
            chart_position: plot.to_plot_coords(position),
            inside: false,
        })
    }

    pub fn dispatch(&self, event: &PointerEvent) {
        for handler in &self.handlers {
            handler(event);
        }
    }
}

impl Debug for PointerTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerTracker")
            .field("hoverable", &self.hoverable)
            .field("inside", &self.inside)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LayerType;
    use crate::types::{Margins, Size};

    fn plot() -> PlotRect {
        PlotRect::from_insets(Size::new(200.0, 100.0), Margins::uniform(20.0))
    }

    #[test]
    fn test_enter_move_leave() {
        let mut tracker = PointerTracker::new();
        let plot = plot();

        let events = tracker.pointer_moved([5.0, 5.0], &plot);
        assert_eq!(events.len(), 1);
        assert!(!events[0].inside);

        let events = tracker.pointer_moved([50.0, 30.0], &plot);
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![PointerKind::Enter, PointerKind::Move]);
        assert_eq!(events[1].chart_position, [30.0, 10.0]);

        let events = tracker.pointer_moved([195.0, 30.0], &plot);
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![PointerKind::Leave, PointerKind::Move]);

        assert!(tracker.pointer_left(&plot).is_none());

        tracker.pointer_moved([60.0, 40.0], &plot);
        let left = tracker.pointer_left(&plot).unwrap();
        assert_eq!(left.kind, PointerKind::Leave);
        assert_eq!(left.chart_position, [40.0, 20.0]);
    }

    #[test]
    fn test_targets_follow_item_events() {
        let mut tracker = PointerTracker::new();
        let attached = ItemEvent::Attached {
            id: "lines".to_string(),
            item_type: "lines".to_string(),
            layer_type: LayerType::Chart,
        };
        tracker.handle_item_event(&attached, true);
        tracker.handle_item_event(
            &ItemEvent::Attached {
                id: "axis".to_string(),
                item_type: "axis".to_string(),
                layer_type: LayerType::Component,
            },
            false,
        );
        assert_eq!(tracker.targets().collect::<Vec<_>>(), vec!["lines"]);

        tracker.handle_item_event(
            &ItemEvent::Detached {
                id: "lines".to_string(),
                item_type: "lines".to_string(),
            },
            false,
        );
        assert_eq!(tracker.targets().count(), 0);
    }
}
