// Layout and paint-order defaults for avenger-compose

// Margin reserved on every edge before items are measured
pub const DEFAULT_MARGIN: f32 = 10.0;

// Canvas size used when the configuration doesn't set one
pub const DEFAULT_WIDTH: f32 = 600.0;
pub const DEFAULT_HEIGHT: f32 = 400.0;

// Paint order. Layers are sorted ascending, ties keep declaration order.
pub const ZINDEX_COMPONENT: i32 = 50;
pub const ZINDEX_GRIDLINES: i32 = 55;
pub const ZINDEX_AXIS: i32 = 60;
pub const ZINDEX_TITLE: i32 = 70;
pub const ZINDEX_CHART: i32 = 100;
pub const ZINDEX_LEGEND: i32 = 200;

// Transition used by animated items unless their props override it
pub const DEFAULT_TRANSITION_MS: u32 = 250;
