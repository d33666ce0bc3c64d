//! Interpreters turning raw input into navigation intents.

pub mod keyboard;
pub mod swipe;

use crate::input::{InputBus, InputSource, Subscription};

pub use keyboard::KeyboardInterpreter;
pub use swipe::{DEFAULT_SWIPE_THRESHOLD, SwipeInterpreter};

/// A discrete navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Next,
    Previous,
}

/// Listener attachment shared by the interpreters.
#[derive(Debug, Default)]
struct Attachment {
    subscription: Option<Subscription>,
}

impl Attachment {
    fn set_enabled(&mut self, bus: &InputBus, source: InputSource, enabled: bool) {
        match (enabled, self.subscription.take()) {
            (true, Some(existing)) => self.subscription = Some(existing),
            (true, None) => self.subscription = Some(bus.subscribe(source)),
            (false, Some(existing)) => existing.release(),
            (false, None) => {}
        }
    }

    fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}
