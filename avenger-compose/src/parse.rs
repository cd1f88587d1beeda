//! Flatten a [`LayoutSpec`] into positioned item descriptors

use indexmap::IndexMap;
use serde_json::Value;

use crate::spec::{Entry, ItemSpec, LayoutSpec, Props};
use crate::types::Edge;

/// Whether an item was declared inside the layered group or around it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    Chart,
    Component,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemDescriptor {
    pub id: String,
    pub item_type: String,
    pub props: Props,
    /// Edge assigned from the item's place in the layout. `None` for charts.
    pub position: Option<Edge>,
    pub role: ItemRole,
}

/// Item ids grouped by placement. Edge lists are ordered nearest-to-plot first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutTree {
    pub charts: Vec<String>,
    pub top: Vec<String>,
    pub right: Vec<String>,
    pub bottom: Vec<String>,
    pub left: Vec<String>,
}

impl LayoutTree {
    pub fn edge(&self, edge: Edge) -> &[String] {
        match edge {
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
        }
    }

    fn edge_mut(&mut self, edge: Edge) -> &mut Vec<String> {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        }
    }

    /// Component ids walked edge by edge (top, right, bottom, left), nearest first
    pub fn edge_order(&self) -> impl Iterator<Item = (Edge, &str)> {
        Edge::ALL.into_iter().flat_map(move |edge| {
            self.edge(edge).iter().map(move |id| (edge, id.as_str()))
        })
    }
}

/// Data addressed to individual items, keyed by item id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSliceMap(IndexMap<String, Value>);

impl DataSliceMap {
    pub fn insert(&mut self, id: impl Into<String>, data: Value) {
        self.0.insert(id.into(), data);
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The slice addressed to `id`, or the draw-time data if there is none
    pub fn demux<'a>(&'a self, id: &str, data: &'a Value) -> &'a Value {
        self.0.get(id).unwrap_or(data)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLayout {
    /// Descriptors in declaration order
    pub items: Vec<ItemDescriptor>,
    pub tree: LayoutTree,
    pub data: DataSliceMap,
}

/// Generated id for an item without a user-supplied one
pub fn auto_id(row: usize, col: usize, layered: Option<usize>) -> String {
    match layered {
        Some(index) => format!("item-{}-{}-{}", row + 1, col + 1, index + 1),
        None => format!("item-{}-{}", row + 1, col + 1),
    }
}

/// Flatten a layout specification.
///
/// Items above the charts row stack upward from the plot, items below stack
/// downward, and items sharing a row with the layered group stack to its left
/// or right. Each edge list keeps the item nearest the plot first.
pub fn extract_layout(spec: &LayoutSpec) -> ParsedLayout {
    let mut parsed = ParsedLayout::default();
    let mut charts_found = false;

    for (row_index, row) in spec.rows.iter().enumerate() {
        let Some(row) = row else {
            continue;
        };
        let multi = row.is_multi();

        for (col_index, entry) in row.entries() {
            match entry {
                Entry::Layered(group) => {
                    if charts_found {
                        tracing::warn!(
                            row = row_index + 1,
                            "Ignoring additional layered group, only one is supported per layout"
                        );
                        continue;
                    }
                    charts_found = true;

                    for (layered_index, chart) in group.layered.iter().enumerate() {
                        let id = chart
                            .id
                            .clone()
                            .unwrap_or_else(|| auto_id(row_index, col_index, Some(layered_index)));
                        parsed.tree.charts.push(id.clone());
                        push_descriptor(&mut parsed, id, chart, None, ItemRole::Chart);
                    }
                }
                Entry::Item(item) => {
                    let edge = match (multi, charts_found) {
                        (false, false) => Edge::Top,
                        (false, true) => Edge::Bottom,
                        (true, false) => Edge::Left,
                        (true, true) => Edge::Right,
                    };
                    let id = item
                        .id
                        .clone()
                        .unwrap_or_else(|| auto_id(row_index, col_index, None));

                    let ids = parsed.tree.edge_mut(edge);
                    match edge {
                        // Declared before the plot: later declarations sit closer to it
                        Edge::Top | Edge::Left => ids.insert(0, id.clone()),
                        Edge::Bottom | Edge::Right => ids.push(id.clone()),
                    }

                    push_descriptor(&mut parsed, id, item, Some(edge), ItemRole::Component);
                }
            }
        }
    }

    parsed
}

fn push_descriptor(
    parsed: &mut ParsedLayout,
    id: String,
    item: &ItemSpec,
    position: Option<Edge>,
    role: ItemRole,
) {
    let mut props = item.props.clone();
    if let Some(data) = props.remove("data") {
        parsed.data.insert(id.clone(), data);
    }

    parsed.items.push(ItemDescriptor {
        id,
        item_type: item.item_type.clone(),
        props,
        position,
        role,
    });
}
