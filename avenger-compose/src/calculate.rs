//! Measure edge items and derive the plot rectangle

use serde_json::Value;

use crate::item::Item;
use crate::parse::DataSliceMap;
use crate::types::{Edge, Margins, Measurement, PlotRect, Size};

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeEntry {
    pub id: String,
    /// Height for top/bottom items, width for left/right items
    pub offset: f32,
}

/// Measured items per edge, nearest to the plot first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeLayout {
    pub top: Vec<EdgeEntry>,
    pub right: Vec<EdgeEntry>,
    pub bottom: Vec<EdgeEntry>,
    pub left: Vec<EdgeEntry>,
}

impl EdgeLayout {
    pub fn edge(&self, edge: Edge) -> &[EdgeEntry] {
        match edge {
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
        }
    }

    fn edge_mut(&mut self, edge: Edge) -> &mut Vec<EdgeEntry> {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        }
    }

    pub fn push(&mut self, edge: Edge, id: impl Into<String>, offset: f32) {
        self.edge_mut(edge).push(EdgeEntry {
            id: id.into(),
            offset,
        });
    }

    /// Total space claimed on an edge
    pub fn total(&self, edge: Edge) -> f32 {
        self.edge(edge).iter().map(|e| e.offset).sum()
    }

    pub fn contains(&self, id: &str) -> bool {
        Edge::ALL
            .iter()
            .any(|edge| self.edge(*edge).iter().any(|e| e.id == id))
    }

    /// Base margins grown by every edge's total
    pub fn insets(&self, margins: &Margins) -> Margins {
        Margins {
            top: margins.top + self.total(Edge::Top),
            right: margins.right + self.total(Edge::Right),
            bottom: margins.bottom + self.total(Edge::Bottom),
            left: margins.left + self.total(Edge::Left),
        }
    }

    pub fn plot_rect(&self, canvas: Size, margins: &Margins) -> PlotRect {
        PlotRect::from_insets(canvas, self.insets(margins))
    }
}

/// An item offered to the calculator
pub struct LayoutEntry<'a> {
    pub id: &'a str,
    /// Edge assigned by the layout, used when measurement fails
    pub position: Option<Edge>,
    pub item: &'a mut Box<dyn Item>,
}

/// Measure every participating item, in the order given.
///
/// Items that skip layout or can't be measured are ignored. Items measuring to a
/// non-edge position are left out. A failed measurement counts as zero size on
/// the item's assigned edge.
pub fn calculate_layout<'a, I>(entries: I, slices: &DataSliceMap, data: &Value) -> EdgeLayout
where
    I: IntoIterator<Item = LayoutEntry<'a>>,
{
    let mut layout = EdgeLayout::default();

    for entry in entries {
        if entry.item.skip_layout() {
            continue;
        }
        let Some(measurable) = entry.item.as_measurable() else {
            continue;
        };

        let measurement = match measurable.measure(slices.demux(entry.id, data)) {
            Ok(measurement) => measurement,
            Err(err) => {
                tracing::warn!(id = %entry.id, error = %err, "Measurement failed, reserving no space");
                Measurement::zero(entry.position)
            }
        };

        let (Some(edge), Some(offset)) = (measurement.position, measurement.offset()) else {
            continue;
        };
        layout.push(edge, entry.id, offset);
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::CreateContext;
    use crate::spec::Props;
    use crate::test_utils::{MockCall, MockItem, MockLog};
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    fn mock(id: &str, position: Option<Edge>, props: Value, log: &MockLog) -> Box<dyn Item> {
        let ctx = CreateContext {
            id: id.to_string(),
            position,
        };
        let props: Props = props.as_object().cloned().unwrap_or_default();
        Box::new(MockItem::new(&ctx, &props, log.clone()).unwrap())
    }

    fn run(items: &mut [(String, Option<Edge>, Box<dyn Item>)], slices: &DataSliceMap) -> EdgeLayout {
        let entries = items.iter_mut().map(|(id, position, item)| LayoutEntry {
            id: id.as_str(),
            position: *position,
            item,
        });
        calculate_layout(entries, slices, &json!({"raw": true}))
    }

    #[test]
    fn test_offsets_use_height_or_width() {
        let log = MockLog::default();
        let mut items = vec![
            (
                "title".to_string(),
                Some(Edge::Top),
                mock("title", Some(Edge::Top), json!({"width": 300, "height": 12}), &log),
            ),
            (
                "y".to_string(),
                Some(Edge::Left),
                mock("y", Some(Edge::Left), json!({"width": 40, "height": 200}), &log),
            ),
        ];

        let layout = run(&mut items, &DataSliceMap::default());
        assert_eq!(layout.top, vec![EdgeEntry { id: "title".to_string(), offset: 12.0 }]);
        assert_eq!(layout.left, vec![EdgeEntry { id: "y".to_string(), offset: 40.0 }]);
        assert!(layout.right.is_empty());
    }

    #[test]
    fn test_offset_accumulation() {
        let log = MockLog::default();
        let mut items = vec![
            (
                "inner".to_string(),
                Some(Edge::Top),
                mock("inner", Some(Edge::Top), json!({"height": 20}), &log),
            ),
            (
                "outer".to_string(),
                Some(Edge::Top),
                mock("outer", Some(Edge::Top), json!({"height": 10}), &log),
            ),
        ];

        let layout = run(&mut items, &DataSliceMap::default());
        let margins = Margins {
            top: 5.0,
            ..Margins::uniform(0.0)
        };
        let plot = layout.plot_rect(Size::new(100.0, 100.0), &margins);
        assert_approx_eq!(f32, plot.top, 35.0);
        assert_approx_eq!(f32, plot.height, 65.0);
        assert_approx_eq!(f32, plot.width, 100.0);
    }

    #[test]
    fn test_skipped_and_unmeasurable_items() {
        let log = MockLog::default();
        let mut items = vec![
            (
                "inset".to_string(),
                Some(Edge::Right),
                mock("inset", Some(Edge::Right), json!({"width": 50, "skip_layout": true}), &log),
            ),
            (
                "static".to_string(),
                Some(Edge::Right),
                mock("static", Some(Edge::Right), json!({"width": 50, "no_measure": true}), &log),
            ),
            (
                "floating".to_string(),
                Some(Edge::Right),
                mock(
                    "floating",
                    Some(Edge::Right),
                    json!({"width": 50, "measured_position": "inset"}),
                    &log,
                ),
            ),
        ];

        let layout = run(&mut items, &DataSliceMap::default());
        assert_eq!(layout, EdgeLayout::default());
        assert!(!layout.contains("inset"));

        // Only the floating item was asked for its size
        let measured: Vec<_> = log
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Measured(id, _) => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(measured, vec!["floating"]);
    }

    #[test]
    fn test_measured_position_overrides_assigned_edge() {
        let log = MockLog::default();
        let mut items = vec![(
            "legend".to_string(),
            Some(Edge::Right),
            mock(
                "legend",
                Some(Edge::Right),
                json!({"width": 80, "height": 30, "measured_position": "bottom"}),
                &log,
            ),
        )];

        let layout = run(&mut items, &DataSliceMap::default());
        assert_eq!(layout.bottom.len(), 1);
        assert_eq!(layout.bottom[0].offset, 30.0);
    }

    #[test]
    fn test_failed_measurement_is_zero_size() {
        let log = MockLog::default();
        let mut items = vec![(
            "x".to_string(),
            Some(Edge::Bottom),
            mock("x", Some(Edge::Bottom), json!({"height": 30, "fail_measure": true}), &log),
        )];

        let layout = run(&mut items, &DataSliceMap::default());
        assert_eq!(layout.bottom, vec![EdgeEntry { id: "x".to_string(), offset: 0.0 }]);
    }

    #[test]
    fn test_measure_receives_demuxed_data() {
        let log = MockLog::default();
        let mut items = vec![
            (
                "a".to_string(),
                Some(Edge::Top),
                mock("a", Some(Edge::Top), json!({}), &log),
            ),
            (
                "b".to_string(),
                Some(Edge::Top),
                mock("b", Some(Edge::Top), json!({}), &log),
            ),
        ];
        let mut slices = DataSliceMap::default();
        slices.insert("a", json!([1, 2]));

        run(&mut items, &slices);
        let calls = log.calls();
        assert!(calls.contains(&MockCall::Measured("a".to_string(), json!([1, 2]))));
        assert!(calls.contains(&MockCall::Measured("b".to_string(), json!({"raw": true}))));
    }
}
