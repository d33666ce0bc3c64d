use tracing::{debug, trace};

use super::{Attachment, Intent};
use crate::input::{InputBus, InputEvent, InputSource, PointerKind};

/// Horizontal travel, in logical points, a drag must exceed to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy)]
struct Gesture {
    kind: PointerKind,
    start_x: f32,
    end_x: Option<f32>,
}

/// Classify a finished drag. `distance = start_x - end_x`; moving left
/// (positive distance) advances.
pub fn classify(start_x: f32, end_x: f32, threshold: f32) -> Option<Intent> {
    let distance = start_x - end_x;
    if distance.abs() <= threshold {
        None
    } else if distance > 0.0 {
        Some(Intent::Next)
    } else {
        Some(Intent::Previous)
    }
}

/// Touch and mouse-drag swipes. Both sources run through the same
/// threshold logic; a gesture in progress ignores presses from the other
/// source.
#[derive(Debug)]
pub struct SwipeInterpreter {
    threshold: f32,
    gesture: Option<Gesture>,
    attachment: Attachment,
}

impl Default for SwipeInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeInterpreter {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            gesture: None,
            attachment: Attachment::default(),
        }
    }

    pub fn set_enabled(&mut self, bus: &InputBus, enabled: bool) {
        if !enabled {
            self.gesture = None;
        }
        self.attachment
            .set_enabled(bus, InputSource::Pointer, enabled);
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_attached()
    }

    #[cfg(test)]
    pub fn is_tracking(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn interpret(&mut self, event: &InputEvent) -> Option<Intent> {
        if !self.is_attached() {
            self.gesture = None;
            return None;
        }

        match *event {
            InputEvent::Press { kind, pos } => {
                if self.gesture.is_some_and(|g| g.kind != kind) {
                    return None;
                }
                self.gesture = Some(Gesture {
                    kind,
                    start_x: pos.x,
                    end_x: None,
                });
                None
            }
            InputEvent::Move { kind, pos } => {
                if let Some(gesture) = self.gesture.as_mut() {
                    if gesture.kind == kind {
                        gesture.end_x = Some(pos.x);
                    }
                }
                None
            }
            InputEvent::Release { kind } => {
                let gesture = self.gesture.filter(|g| g.kind == kind)?;
                self.gesture = None;
                let end_x = gesture.end_x?;
                let intent = classify(gesture.start_x, end_x, self.threshold);
                match intent {
                    Some(intent) => debug!(
                        ?intent,
                        ?kind,
                        distance = gesture.start_x - end_x,
                        "swipe intent"
                    ),
                    None => trace!(distance = gesture.start_x - end_x, "drag below threshold"),
                }
                intent
            }
            InputEvent::Key { .. } | InputEvent::Click { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn attached(bus: &InputBus) -> SwipeInterpreter {
        let mut swipe = SwipeInterpreter::default();
        swipe.set_enabled(bus, true);
        swipe
    }

    fn drag(
        swipe: &mut SwipeInterpreter,
        kind: PointerKind,
        from_x: f32,
        to_x: f32,
    ) -> Option<Intent> {
        assert_eq!(
            swipe.interpret(&InputEvent::Press {
                kind,
                pos: pos2(from_x, 300.0)
            }),
            None
        );
        assert_eq!(
            swipe.interpret(&InputEvent::Move {
                kind,
                pos: pos2(to_x, 310.0)
            }),
            None
        );
        swipe.interpret(&InputEvent::Release { kind })
    }

    #[test]
    fn test_classify_threshold_boundary() {
        assert_eq!(classify(150.0, 100.0, 50.0), None);
        assert_eq!(classify(151.0, 100.0, 50.0), Some(Intent::Next));
        assert_eq!(classify(100.0, 150.0, 50.0), None);
        assert_eq!(classify(100.0, 151.0, 50.0), Some(Intent::Previous));
    }

    #[test]
    fn test_swipe_left_advances() {
        let bus = InputBus::new();
        let mut swipe = attached(&bus);
        assert_eq!(
            drag(&mut swipe, PointerKind::Touch, 200.0, 100.0),
            Some(Intent::Next)
        );
    }

    #[test]
    fn test_swipe_right_goes_back() {
        let bus = InputBus::new();
        let mut swipe = attached(&bus);
        assert_eq!(
            drag(&mut swipe, PointerKind::Mouse, 100.0, 200.0),
            Some(Intent::Previous)
        );
    }

    #[test]
    fn test_short_drag_is_ignored() {
        let bus = InputBus::new();
        let mut swipe = attached(&bus);
        assert_eq!(drag(&mut swipe, PointerKind::Touch, 200.0, 180.0), None);
    }

    #[test]
    fn test_mouse_and_touch_share_threshold() {
        let bus = InputBus::new();
        let mut swipe = attached(&bus);
        for kind in [PointerKind::Mouse, PointerKind::Touch] {
            assert_eq!(drag(&mut swipe, kind, 250.0, 200.0), None);
            assert_eq!(drag(&mut swipe, kind, 251.0, 200.0), Some(Intent::Next));
        }
    }

    #[test]
    fn test_tap_without_move_is_ignored() {
        let bus = InputBus::new();
        let mut swipe = attached(&bus);
        swipe.interpret(&InputEvent::Press {
            kind: PointerKind::Mouse,
            pos: pos2(400.0, 300.0),
        });
        assert_eq!(
            swipe.interpret(&InputEvent::Release {
                kind: PointerKind::Mouse
            }),
            None
        );
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn test_state_resets_after_release() {
        let bus = InputBus::new();
        let mut swipe = attached(&bus);
        assert_eq!(
            drag(&mut swipe, PointerKind::Touch, 300.0, 100.0),
            Some(Intent::Next)
        );
        assert!(!swipe.is_tracking());
        // A second release without a new press must not replay the gesture.
        assert_eq!(
            swipe.interpret(&InputEvent::Release {
                kind: PointerKind::Touch
            }),
            None
        );
    }

    #[test]
    fn test_other_source_does_not_hijack_gesture() {
        let bus = InputBus::new();
        let mut swipe = attached(&bus);
        swipe.interpret(&InputEvent::Press {
            kind: PointerKind::Touch,
            pos: pos2(300.0, 0.0),
        });
        swipe.interpret(&InputEvent::Press {
            kind: PointerKind::Mouse,
            pos: pos2(300.0, 0.0),
        });
        swipe.interpret(&InputEvent::Move {
            kind: PointerKind::Touch,
            pos: pos2(100.0, 0.0),
        });
        swipe.interpret(&InputEvent::Move {
            kind: PointerKind::Mouse,
            pos: pos2(295.0, 0.0),
        });
        assert_eq!(
            swipe.interpret(&InputEvent::Release {
                kind: PointerKind::Mouse
            }),
            None
        );
        assert_eq!(
            swipe.interpret(&InputEvent::Release {
                kind: PointerKind::Touch
            }),
            Some(Intent::Next)
        );
    }

    #[test]
    fn test_detached_discards_partial_gesture() {
        let bus = InputBus::new();
        let mut swipe = attached(&bus);
        swipe.interpret(&InputEvent::Press {
            kind: PointerKind::Touch,
            pos: pos2(300.0, 0.0),
        });
        swipe.set_enabled(&bus, false);
        assert_eq!(bus.listener_count(InputSource::Pointer), 0);
        assert!(!swipe.is_tracking());
        swipe.set_enabled(&bus, true);
        swipe.interpret(&InputEvent::Move {
            kind: PointerKind::Touch,
            pos: pos2(100.0, 0.0),
        });
        assert_eq!(
            swipe.interpret(&InputEvent::Release {
                kind: PointerKind::Touch
            }),
            None
        );
    }

    #[test]
    fn test_custom_threshold() {
        let bus = InputBus::new();
        let mut swipe = SwipeInterpreter::new(120.0);
        swipe.set_enabled(&bus, true);
        assert_eq!(drag(&mut swipe, PointerKind::Touch, 200.0, 100.0), None);
        assert_eq!(
            drag(&mut swipe, PointerKind::Touch, 300.0, 100.0),
            Some(Intent::Next)
        );
    }
}
