//! Turn a fresh descriptor list into the live item table
//!
//! Items keep their identity across draws as long as their id, type and edge are
//! unchanged. Anything else is detached and, if still declared, created again.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::ComposeError;
use crate::events::ItemEvent;
use crate::item::{CreateContext, Item};
use crate::parse::{ItemDescriptor, ItemRole};
use crate::registry::ItemRegistry;
use crate::scene::{LayerId, LayerOptions, LayerType, Scene};
use crate::spec::Props;
use crate::types::Edge;

/// An item instance owned by the container
#[derive(Debug)]
pub struct LiveItem {
    pub item: Box<dyn Item>,
    pub item_type: String,
    pub position: Option<Edge>,
    pub role: ItemRole,
    pub layer: LayerId,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub props: Props,
}

impl LiveItem {
    fn matches(&self, descriptor: &ItemDescriptor) -> bool {
        self.item_type == descriptor.item_type && self.position == descriptor.position
    }
}

pub type LiveItems = IndexMap<String, LiveItem>;

/// Bring `live` in line with `descriptors`.
///
/// On a configuration error the draw is aborted. Items already reconciled stay in
/// the table, but the table may still hold a mix of old and new state.
pub fn reconcile(
    live: &mut LiveItems,
    descriptors: &[ItemDescriptor],
    registry: &ItemRegistry,
    scene: &mut Scene,
    notify: &mut dyn FnMut(ItemEvent),
) -> Result<(), ComposeError> {
    let mut seen = HashSet::with_capacity(descriptors.len());
    for descriptor in descriptors {
        if !seen.insert(descriptor.id.as_str()) {
            return Err(ComposeError::DuplicateId(descriptor.id.clone()));
        }
    }

    let removed: Vec<String> = live
        .keys()
        .filter(|id| !seen.contains(id.as_str()))
        .cloned()
        .collect();
    for id in removed {
        if let Some(existing) = live.shift_remove(&id) {
            detach(&id, existing, scene, notify);
        }
    }

    let mut next = LiveItems::with_capacity(descriptors.len());
    let result = reconcile_into(&mut next, live, descriptors, registry, scene, notify);

    // Keep whatever was not reached so a failed draw doesn't drop live items
    next.extend(live.drain(..));
    *live = next;
    result
}

fn reconcile_into(
    next: &mut LiveItems,
    live: &mut LiveItems,
    descriptors: &[ItemDescriptor],
    registry: &ItemRegistry,
    scene: &mut Scene,
    notify: &mut dyn FnMut(ItemEvent),
) -> Result<(), ComposeError> {
    for descriptor in descriptors {
        let id = &descriptor.id;

        if let Some(mut existing) = live.shift_remove(id) {
            if existing.matches(descriptor) {
                if existing.props != descriptor.props {
                    let update = existing.item.set_props(&descriptor.props);
                    if update.is_ok() {
                        existing.props = descriptor.props.clone();
                    }
                    next.insert(id.clone(), existing);
                    update?;
                    notify(ItemEvent::Updated { id: id.clone() });
                } else {
                    next.insert(id.clone(), existing);
                }
                continue;
            }
            detach(id, existing, scene, notify);
        }

        let created = create(descriptor, registry, scene)?;
        notify(ItemEvent::Attached {
            id: id.clone(),
            item_type: created.item_type.clone(),
            layer_type: created.layer_type,
        });
        tracing::debug!(id = %id, item_type = %created.item_type, "Attached item");
        next.insert(id.clone(), created);
    }
    Ok(())
}

fn create(
    descriptor: &ItemDescriptor,
    registry: &ItemRegistry,
    scene: &mut Scene,
) -> Result<LiveItem, ComposeError> {
    let registration = registry
        .resolve(&descriptor.item_type)
        .ok_or_else(|| ComposeError::UnknownType(descriptor.item_type.clone()))?;
    let metadata = &registration.metadata;
    let layer_type = metadata.resolve_layer_type(&descriptor.item_type)?;

    let ctx = CreateContext {
        id: descriptor.id.clone(),
        position: descriptor.position,
    };
    let item = (registration.constructor)(&ctx, &descriptor.props)?;

    let layer = scene.create_layer(
        layer_type,
        LayerOptions {
            item_id: descriptor.id.clone(),
            z_index: metadata.z_index,
        },
    )?;

    Ok(LiveItem {
        item,
        item_type: descriptor.item_type.clone(),
        position: descriptor.position,
        role: descriptor.role,
        layer,
        layer_type,
        z_index: metadata.z_index,
        props: descriptor.props.clone(),
    })
}

fn detach(id: &str, existing: LiveItem, scene: &mut Scene, notify: &mut dyn FnMut(ItemEvent)) {
    scene.remove_layer(existing.layer);
    tracing::debug!(id = %id, item_type = %existing.item_type, "Detached item");
    notify(ItemEvent::Detached {
        id: id.to_string(),
        item_type: existing.item_type,
    });
}
