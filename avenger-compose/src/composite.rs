//! Paint-order compositing
//!
//! Layers are reordered by ascending z-index. The sort is stable over declaration
//! order, so layers sharing a z-index paint in the order their items were declared.

use std::collections::HashMap;

use crate::scene::{Layer, LayerId, Scene};

/// Reorder the scene's layers and overlays.
///
/// `declared` lists layer ids in item declaration order. Layers missing from it
/// keep their current relative order after the declared ones.
pub fn composite(scene: &mut Scene, declared: &[LayerId]) {
    let rank: HashMap<LayerId, usize> = declared
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, index))
        .collect();

    let (layers, overlays) = scene.layers_mut();
    sort_layers(layers, &rank);
    sort_layers(overlays, &rank);
}

fn sort_layers(layers: &mut [Layer], rank: &HashMap<LayerId, usize>) {
    // Restore declaration order first, then a stable sort by z-index breaks ties with it
    layers.sort_by_key(|layer| rank.get(&layer.id).copied().unwrap_or(usize::MAX));
    layers.sort_by_key(|layer| layer.zindex);
}

/// Item ids in paint order
pub fn paint_order(scene: &Scene) -> Vec<&str> {
    scene
        .layers()
        .iter()
        .map(|layer| layer.item_id.as_str())
        .collect()
}
