//! Declarative layout specification
//!
//! A layout is a list of rows. A row is either a single entry or a list of entries,
//! and an entry is either an item or the layered group holding the plotted charts.
//! Rows above the layered group stack on top of the plot, rows below it stack
//! underneath, and entries sharing a row with the layered group sit to its left or right.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ComposeError;

/// Item properties. Treated as an immutable value and diffed structurally between draws.
pub type Props = Map<String, Value>;

/// A single chart, axis, title, legend or other registered item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub props: Props,
}

impl ItemSpec {
    pub fn new(item_type: impl Into<String>) -> Self {
        Self {
            id: None,
            item_type: item_type.into(),
            props: Props::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Attach data addressed to this item only
    pub fn data(self, data: impl Into<Value>) -> Self {
        self.prop("data", data)
    }
}

/// The central content slot. Holds the charts drawn inside the plot rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayeredGroup {
    pub layered: Vec<ItemSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Layered(LayeredGroup),
    Item(ItemSpec),
}

impl From<ItemSpec> for Entry {
    fn from(value: ItemSpec) -> Self {
        Entry::Item(value)
    }
}

impl From<LayeredGroup> for Entry {
    fn from(value: LayeredGroup) -> Self {
        Entry::Layered(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Row {
    Multi(Vec<Option<Entry>>),
    Single(Entry),
}

impl Row {
    /// Entries of the row with their declared column, skipping empty slots
    pub fn entries(&self) -> Vec<(usize, &Entry)> {
        match self {
            Row::Single(entry) => vec![(0, entry)],
            Row::Multi(entries) => entries
                .iter()
                .enumerate()
                .filter_map(|(col, entry)| Some((col, entry.as_ref()?)))
                .collect(),
        }
    }

    /// Whether the row declares more than one slot, empty slots included
    pub fn is_multi(&self) -> bool {
        matches!(self, Row::Multi(entries) if entries.len() > 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutSpec {
    pub rows: Vec<Option<Row>>,
}

impl LayoutSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ComposeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a row holding one entry
    pub fn row(mut self, entry: impl Into<Entry>) -> Self {
        self.rows.push(Some(Row::Single(entry.into())));
        self
    }

    /// Append a row holding several entries side by side
    pub fn row_of<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        self.rows.push(Some(Row::Multi(
            entries.into_iter().map(|e| Some(e.into())).collect(),
        )));
        self
    }
}

/// Group charts into the layered slot
pub fn layered(charts: impl IntoIterator<Item = ItemSpec>) -> Entry {
    Entry::Layered(LayeredGroup {
        layered: charts.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layout_spec_from_json() {
        let spec = LayoutSpec::from_json(
            r#"[
                {"type": "title", "props": {"text": "Hello"}},
                [
                    {"type": "axis", "id": "y"},
                    null,
                    {"layered": [{"type": "lines"}, {"type": "bars"}]}
                ],
                null,
                {"type": "axis", "id": "x"}
            ]"#,
        )
        .unwrap();

        assert_eq!(spec.rows.len(), 4);
        let Some(Row::Single(Entry::Item(title))) = &spec.rows[0] else {
            panic!("expected a single title row");
        };
        assert_eq!(title.item_type, "title");
        assert_eq!(title.props["text"], json!("Hello"));

        let row = spec.rows[1].as_ref().unwrap();
        let entries = row.entries();
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[1], (1, Entry::Layered(group)) if group.layered.len() == 2));
        assert!(spec.rows[2].is_none());
    }

    #[test]
    fn test_builder_matches_json() {
        let built = LayoutSpec::new()
            .row(ItemSpec::new("title").prop("text", "Hello"))
            .row_of([
                ItemSpec::new("axis").id("y").into(),
                layered([ItemSpec::new("lines")]),
            ]);

        let parsed = LayoutSpec::from_json(
            r#"[
                {"type": "title", "props": {"text": "Hello"}},
                [{"type": "axis", "id": "y"}, {"layered": [{"type": "lines"}]}]
            ]"#,
        )
        .unwrap();

        assert_eq!(built, parsed);
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let err = LayoutSpec::from_json(r#"[{"props": {}}]"#).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidSpec(_)));
    }
}
