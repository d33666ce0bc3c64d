//! Raw input events and scoped listener subscriptions.
//!
//! Interpreters only see events while they hold a [`Subscription`] on the
//! [`InputBus`]. Every subscription is released explicitly when its owner is
//! disabled or torn down; the bus keeps count so the pairing can be checked.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use eframe::egui;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard,
    Pointer,
}

/// Device class a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Tab,
}

impl Key {
    fn to_egui(self) -> egui::Key {
        match self {
            Key::ArrowLeft => egui::Key::ArrowLeft,
            Key::ArrowRight => egui::Key::ArrowRight,
            Key::Escape => egui::Key::Escape,
            Key::Tab => egui::Key::Tab,
        }
    }

    fn from_egui(key: egui::Key) -> Option<Self> {
        match key {
            egui::Key::ArrowLeft => Some(Key::ArrowLeft),
            egui::Key::ArrowRight => Some(Key::ArrowRight),
            egui::Key::Escape => Some(Key::Escape),
            egui::Key::Tab => Some(Key::Tab),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, shift: bool },
    Press { kind: PointerKind, pos: egui::Pos2 },
    Move { kind: PointerKind, pos: egui::Pos2 },
    Release { kind: PointerKind },
    /// Primary button released at `pos`.
    Click { pos: egui::Pos2 },
}

impl InputEvent {
    #[cfg(test)]
    pub fn key(key: Key) -> Self {
        InputEvent::Key { key, shift: false }
    }

    /// The egui key press this event came from, for consuming it once
    /// handled. `None` for pointer events.
    pub fn egui_key(&self) -> Option<(egui::Modifiers, egui::Key)> {
        match *self {
            InputEvent::Key { key, shift } => {
                let modifiers = if shift {
                    egui::Modifiers::SHIFT
                } else {
                    egui::Modifiers::NONE
                };
                Some((modifiers, key.to_egui()))
            }
            _ => None,
        }
    }
}

/// Translate one egui event into zero or more input events.
pub fn from_egui(event: &egui::Event) -> Vec<InputEvent> {
    match event {
        egui::Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => Key::from_egui(*key)
            .map(|key| InputEvent::Key {
                key,
                shift: modifiers.shift,
            })
            .into_iter()
            .collect(),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            if *pressed {
                vec![InputEvent::Press {
                    kind: PointerKind::Mouse,
                    pos: *pos,
                }]
            } else {
                vec![
                    InputEvent::Release {
                        kind: PointerKind::Mouse,
                    },
                    InputEvent::Click { pos: *pos },
                ]
            }
        }
        egui::Event::PointerMoved(pos) => vec![InputEvent::Move {
            kind: PointerKind::Mouse,
            pos: *pos,
        }],
        egui::Event::Touch { phase, pos, .. } => {
            let kind = PointerKind::Touch;
            let pos = *pos;
            match phase {
                egui::TouchPhase::Start => vec![InputEvent::Press { kind, pos }],
                egui::TouchPhase::Move => vec![InputEvent::Move { kind, pos }],
                egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                    vec![InputEvent::Release { kind }]
                }
            }
        }
        _ => Vec::new(),
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: Vec<(u64, InputSource)>,
}

/// Tracks which listeners are currently attached to which input source.
#[derive(Debug, Clone, Default)]
pub struct InputBus {
    registry: Rc<RefCell<Registry>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, source: InputSource) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.active.push((id, source));
        trace!(id, ?source, "listener attached");
        Subscription {
            id,
            source,
            registry: Rc::downgrade(&self.registry),
            released: false,
        }
    }

    pub fn listener_count(&self, source: InputSource) -> usize {
        self.registry
            .borrow()
            .active
            .iter()
            .filter(|(_, s)| *s == source)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.registry.borrow().active.len()
    }
}

/// Handle for an attached listener. Call [`Subscription::release`] to detach.
#[must_use = "an unreleased subscription keeps its listener attached"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    source: InputSource,
    registry: Weak<RefCell<Registry>>,
    released: bool,
}

impl Subscription {
    pub fn release(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .active
                .retain(|(id, _)| *id != self.id);
        }
        trace!(id = self.id, source = ?self.source, "listener detached");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if !self.released {
            debug!(id = self.id, source = ?self.source, "subscription dropped without release");
            self.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_and_release() {
        let bus = InputBus::new();
        let sub = bus.subscribe(InputSource::Keyboard);
        assert_eq!(bus.listener_count(InputSource::Keyboard), 1);
        assert_eq!(bus.listener_count(InputSource::Pointer), 0);
        sub.release();
        assert_eq!(bus.total_listeners(), 0);
    }

    #[test]
    fn test_release_only_detaches_own_listener() {
        let bus = InputBus::new();
        let a = bus.subscribe(InputSource::Pointer);
        let b = bus.subscribe(InputSource::Pointer);
        a.release();
        assert_eq!(bus.listener_count(InputSource::Pointer), 1);
        b.release();
        assert_eq!(bus.listener_count(InputSource::Pointer), 0);
    }

    #[test]
    fn test_drop_detaches() {
        let bus = InputBus::new();
        {
            let _sub = bus.subscribe(InputSource::Keyboard);
            assert_eq!(bus.total_listeners(), 1);
        }
        assert_eq!(bus.total_listeners(), 0);
    }

    #[test]
    fn test_release_after_bus_dropped() {
        let bus = InputBus::new();
        let sub = bus.subscribe(InputSource::Keyboard);
        drop(bus);
        sub.release();
    }

    #[test]
    fn test_touch_phases_map_to_press_move_release() {
        let pos = egui::pos2(10.0, 20.0);
        let start = egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(1),
            phase: egui::TouchPhase::Start,
            pos,
            force: None,
        };
        assert_eq!(
            from_egui(&start),
            vec![InputEvent::Press {
                kind: PointerKind::Touch,
                pos
            }]
        );
        let end = egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(1),
            phase: egui::TouchPhase::End,
            pos,
            force: None,
        };
        assert_eq!(
            from_egui(&end),
            vec![InputEvent::Release {
                kind: PointerKind::Touch
            }]
        );
    }

    #[test]
    fn test_key_events_round_trip_to_consumable_keys() {
        let event = egui::Event::Key {
            key: egui::Key::ArrowRight,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        let mapped = from_egui(&event);
        assert_eq!(mapped, vec![InputEvent::key(Key::ArrowRight)]);
        assert_eq!(
            mapped[0].egui_key(),
            Some((egui::Modifiers::NONE, egui::Key::ArrowRight))
        );

        let back_tab = InputEvent::Key {
            key: Key::Tab,
            shift: true,
        };
        assert_eq!(
            back_tab.egui_key(),
            Some((egui::Modifiers::SHIFT, egui::Key::Tab))
        );
        let release = InputEvent::Release {
            kind: PointerKind::Mouse,
        };
        assert_eq!(release.egui_key(), None);
    }

    #[test]
    fn test_unhandled_keys_are_dropped() {
        let event = egui::Event::Key {
            key: egui::Key::Space,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        assert!(from_egui(&event).is_empty());
    }

    #[test]
    fn test_pointer_moved_maps_to_mouse_move() {
        let pos = egui::pos2(3.0, 4.0);
        assert_eq!(
            from_egui(&egui::Event::PointerMoved(pos)),
            vec![InputEvent::Move {
                kind: PointerKind::Mouse,
                pos
            }]
        );
    }
}
