use tracing::debug;

use super::{Attachment, Intent};
use crate::input::{InputBus, InputEvent, InputSource, Key};

/// Arrow keys to intents. Inert unless attached.
#[derive(Debug, Default)]
pub struct KeyboardInterpreter {
    attachment: Attachment,
}

impl KeyboardInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_enabled(&mut self, bus: &InputBus, enabled: bool) {
        self.attachment
            .set_enabled(bus, InputSource::Keyboard, enabled);
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_attached()
    }

    /// Returns the intent for `event`. The caller suppresses the host's
    /// default handling of any key that produced an intent.
    pub fn interpret(&self, event: &InputEvent) -> Option<Intent> {
        if !self.is_attached() {
            return None;
        }
        let intent = match event {
            InputEvent::Key {
                key: Key::ArrowRight,
                ..
            } => Intent::Next,
            InputEvent::Key {
                key: Key::ArrowLeft,
                ..
            } => Intent::Previous,
            _ => return None,
        };
        debug!(?intent, "keyboard intent");
        Some(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached(bus: &InputBus) -> KeyboardInterpreter {
        let mut keyboard = KeyboardInterpreter::new();
        keyboard.set_enabled(bus, true);
        keyboard
    }

    #[test]
    fn test_arrow_keys_map_to_intents() {
        let bus = InputBus::new();
        let keyboard = attached(&bus);
        assert_eq!(
            keyboard.interpret(&InputEvent::key(Key::ArrowRight)),
            Some(Intent::Next)
        );
        assert_eq!(
            keyboard.interpret(&InputEvent::key(Key::ArrowLeft)),
            Some(Intent::Previous)
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        let bus = InputBus::new();
        let keyboard = attached(&bus);
        assert_eq!(keyboard.interpret(&InputEvent::key(Key::Escape)), None);
        assert_eq!(keyboard.interpret(&InputEvent::key(Key::Tab)), None);
    }

    #[test]
    fn test_detached_is_inert() {
        let bus = InputBus::new();
        let mut keyboard = attached(&bus);
        keyboard.set_enabled(&bus, false);
        assert_eq!(bus.listener_count(InputSource::Keyboard), 0);
        assert_eq!(keyboard.interpret(&InputEvent::key(Key::ArrowRight)), None);
    }

    #[test]
    fn test_enable_twice_attaches_once() {
        let bus = InputBus::new();
        let mut keyboard = attached(&bus);
        keyboard.set_enabled(&bus, true);
        assert_eq!(bus.listener_count(InputSource::Keyboard), 1);
    }
}
