//! Measuring animated items without animating the measurement
//!
//! Items such as axes animate from the last rendered state to the new one. Their
//! size, however, has to be known for the *new* data before layout. Measurement
//! therefore computes the final state for the new data and measures it directly,
//! leaving the committed (rendered) state alone. The first measurement has no prior
//! state to animate from, so it flags the next render to skip its transition.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_TRANSITION_MS;
use crate::error::ComposeError;
use crate::types::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transition {
    pub duration_ms: u32,
    pub delay_ms: u32,
}

impl Transition {
    pub const fn instant() -> Self {
        Self {
            duration_ms: 0,
            delay_ms: 0,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms as u64)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_TRANSITION_MS,
            delay_ms: 0,
        }
    }
}

/// One render step: animate `from` the previous committed state `to` the new one
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<S> {
    pub from: Option<S>,
    pub to: S,
    pub transition: Transition,
}

/// Committed render state plus the bookkeeping needed for measurement
#[derive(Debug, Clone)]
pub struct Animated<S> {
    committed: Option<S>,
    previous_data: Option<Value>,
    skip_next: bool,
    transition: Transition,
}

impl<S: Clone> Animated<S> {
    pub fn new(transition: Transition) -> Self {
        Self {
            committed: None,
            previous_data: None,
            skip_next: false,
            transition,
        }
    }

    pub fn committed(&self) -> Option<&S> {
        self.committed.as_ref()
    }

    pub fn previous_data(&self) -> Option<&Value> {
        self.previous_data.as_ref()
    }

    pub fn skips_next_transition(&self) -> bool {
        self.skip_next
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn set_transition(&mut self, transition: Transition) {
        self.transition = transition;
    }

    /// Commit a new state and return the frame to render.
    ///
    /// A pending skip turns this frame's transition into an instant one, once.
    pub fn commit(&mut self, state: S) -> Frame<S> {
        let transition = if self.skip_next {
            self.skip_next = false;
            Transition::instant()
        } else {
            self.transition
        };
        let from = self.committed.replace(state.clone());
        Frame {
            from,
            to: state,
            transition,
        }
    }

    fn record_measurement(&mut self, data: &Value) {
        if self.previous_data.is_none() {
            self.skip_next = true;
        }
        self.previous_data = Some(data.clone());
    }
}

impl<S: Clone> Default for Animated<S> {
    fn default() -> Self {
        Self::new(Transition::default())
    }
}

/// Items whose rendered state animates between draws
pub trait Replay {
    type State: Clone;

    fn animated(&self) -> &Animated<Self::State>;

    fn animated_mut(&mut self) -> &mut Animated<Self::State>;

    /// Final state for the given data. Must not touch the committed state.
    fn compute_state(&self, data: &Value) -> Result<Self::State, ComposeError>;

    /// Footprint of a state once fully rendered
    fn natural_size(&self, state: &Self::State) -> Result<Size, ComposeError>;
}

/// Natural size of `item` for `data`, without leaving any visible transition state.
///
/// The committed state is untouched, so the following render animates from what is
/// currently on screen. On the first measurement the next transition is skipped.
pub fn measure_without_transition<R>(item: &mut R, data: &Value) -> Result<Size, ComposeError>
where
    R: Replay + ?Sized,
{
    let state = item.compute_state(data);
    item.animated_mut().record_measurement(data);
    let state = state?;
    item.natural_size(&state)
}
