use std::sync::Arc;
use std::time::Duration;

use avenger_compose::composite::paint_order;
use avenger_compose::scene::{Layer, Mark};
use avenger_compose::{Compose, ComposeConfig, LayoutSpec};
use avenger_compose_guides::default_registry;
use avenger_compose_guides::text::ApproxTextMeasurer;
use float_cmp::assert_approx_eq;
use serde_json::{json, Value};

const SPEC: &str = r#"[
    {"type": "title", "id": "title", "props": {"text": "Revenue"}},
    [
        {"type": "axis", "id": "y", "props": {"domain": [0, 100], "ticks": 5}},
        {"layered": [
            {"type": "gridlines", "id": "grid", "props": {"domain": [0, 100], "ticks": 5}},
            {"type": "lines", "id": "lines", "props": {
                "data": [{"x": 0, "y": 0}, {"x": 10, "y": 100}]
            }}
        ]},
        {"type": "legend", "id": "legend", "props": {"entries": [{"label": "sales"}]}},
        {"type": "inset-legend", "id": "inset", "props": {"entries": [{"label": "a"}]}}
    ],
    {"type": "axis", "id": "x", "props": {"domain": [0, 10], "ticks": 5}}
]"#;

fn compose() -> Compose {
    let registry = default_registry(Arc::new(ApproxTextMeasurer::new()));
    let mut compose = Compose::new(ComposeConfig::default(), registry).unwrap();
    compose
        .draw(&LayoutSpec::from_json(SPEC).unwrap(), &Value::Null)
        .unwrap();
    compose
}

fn layer<'a>(compose: &'a Compose, id: &str) -> &'a Layer {
    let live = compose.item(id).unwrap();
    compose.scene().layer(live.layer).unwrap()
}

#[test]
fn test_chart_layout() {
    let compose = compose();
    let plot = compose.plot_rect();

    // Title 16px + 2 * 8px margins, y labels "100" 18px + ticks 9px,
    // legend 12 + 4 + 30px, x labels 12px line height + ticks 9px
    assert_approx_eq!(f32, plot.top, 42.0);
    assert_approx_eq!(f32, plot.left, 37.0);
    assert_approx_eq!(f32, plot.right, 56.0);
    assert_approx_eq!(f32, plot.bottom, 31.0);
    assert_approx_eq!(f32, plot.width, 507.0);
    assert_approx_eq!(f32, plot.height, 327.0);

    assert!(!compose.edge_layout().contains("inset"));
    assert_eq!(layer(&compose, "inset").origin, [47.0, 52.0]);
    assert_eq!(layer(&compose, "lines").origin, [37.0, 42.0]);
    assert_eq!(layer(&compose, "x").origin, [37.0, 369.0]);
}

#[test]
fn test_default_paint_order() {
    let compose = compose();
    assert_eq!(
        paint_order(compose.scene()),
        vec!["grid", "y", "x", "title", "lines", "legend", "inset"]
    );
}

#[test]
fn test_axis_transition_skipped_on_first_draw() {
    let mut compose = compose();
    assert_eq!(layer(&compose, "x").transition, Some(Duration::ZERO));

    compose.redraw().unwrap();
    assert_eq!(layer(&compose, "x").transition, Some(Duration::from_millis(250)));
}

#[test]
fn test_hover_highlights_nearest_point() {
    let mut compose = compose();
    compose.pointer_moved([37.0 + 500.0, 42.0 + 10.0]);
    compose.redraw().unwrap();

    assert!(layer(&compose, "lines")
        .marks
        .contains(&Mark::Circle { cx: 507.0, cy: 0.0, r: 4.0 }));

    compose.pointer_left();
    compose.redraw().unwrap();
    assert_eq!(layer(&compose, "lines").marks.len(), 1);
}

#[test]
fn test_axis_grows_with_labels() {
    let mut compose = compose();
    let spec = SPEC.replace(r#""domain": [0, 100], "ticks": 5}}"#, r#""domain": [0, 10000], "ticks": 5}}"#);
    compose
        .draw(&LayoutSpec::from_json(&spec).unwrap(), &json!(null))
        .unwrap();

    // "10000" is 5 chars at 6px
    assert_approx_eq!(f32, compose.plot_rect().left, 10.0 + 9.0 + 30.0);
}
