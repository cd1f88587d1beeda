use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::scene::LayerType;

/// Lifecycle notification for a live item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEvent {
    Attached {
        id: String,
        item_type: String,
        layer_type: LayerType,
    },
    Updated {
        id: String,
    },
    Detached {
        id: String,
        item_type: String,
    },
}

impl ItemEvent {
    pub fn id(&self) -> &str {
        match self {
            ItemEvent::Attached { id, .. }
            | ItemEvent::Updated { id }
            | ItemEvent::Detached { id, .. } => id,
        }
    }
}

pub type ItemEventHandler = Arc<dyn Fn(&ItemEvent)>;

/// Listeners notified once per item lifecycle transition
#[derive(Clone, Default)]
pub struct ItemEvents {
    handlers: Vec<ItemEventHandler>,
}

impl ItemEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler<F>(&mut self, handler: F)
    where
        F: Fn(&ItemEvent) + 'static,
    {
        self.handlers.push(Arc::new(handler));
    }

    pub fn dispatch(&self, event: &ItemEvent) {
        for handler in &self.handlers {
            handler(event);
        }
    }
}

impl Debug for ItemEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemEvents")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
