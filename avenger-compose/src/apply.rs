//! Assign absolute placements to measured edge items
//!
//! Each edge is walked nearest-to-plot first. The first item sits flush against
//! the plot rectangle and every following item is pushed further out by the items
//! already placed.

use crate::calculate::EdgeLayout;
use crate::types::{Placement, PlotRect, Size};

pub fn apply_layout<F>(layout: &EdgeLayout, plot: &PlotRect, canvas: Size, mut place: F)
where
    F: FnMut(&str, Placement),
{
    // Top items stack upward from the plot's top edge
    let mut cursor = plot.top;
    for entry in &layout.top {
        let y = cursor - entry.offset;
        place(&entry.id, Placement::new(plot.left, y).with_width(plot.width));
        cursor = y;
    }

    // Right items stack rightward from the plot's right edge
    let mut cursor = canvas.width - plot.right;
    for (index, entry) in layout.right.iter().enumerate() {
        if index > 0 {
            cursor += layout.right[index - 1].offset;
        }
        place(&entry.id, Placement::new(cursor, plot.top).with_height(plot.height));
    }

    // Bottom items stack downward from the plot's bottom edge
    let mut cursor = canvas.height - plot.bottom;
    for (index, entry) in layout.bottom.iter().enumerate() {
        if index > 0 {
            cursor += layout.bottom[index - 1].offset;
        }
        place(&entry.id, Placement::new(plot.left, cursor).with_width(plot.width));
    }

    // Left items stack leftward from the plot's left edge
    let mut cursor = plot.left;
    for entry in &layout.left {
        let x = cursor - entry.offset;
        place(&entry.id, Placement::new(x, plot.top).with_height(plot.height));
        cursor = x;
    }
}
