//! Details overlay: focus capture, focus trap, scroll lock and dismissal.

use eframe::egui;
use tracing::debug;

use crate::input::{InputEvent, Key};

/// The environment that owns keyboard focus and page scrolling.
pub trait FocusHost {
    fn focused(&self) -> Option<egui::Id>;
    /// Move focus to `id`, or clear it with `None`.
    fn focus(&mut self, id: Option<egui::Id>);
    fn set_scroll_locked(&mut self, locked: bool);
}

pub fn close_button_id() -> egui::Id {
    egui::Id::new("wrapped-details-close")
}

pub fn done_button_id() -> egui::Id {
    egui::Id::new("wrapped-details-done")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// The overlay swallowed the event.
    Consumed,
    Closed,
}

#[derive(Debug)]
struct OpenState {
    restore_focus: Option<egui::Id>,
    focus_index: usize,
    content_rect: Option<egui::Rect>,
}

#[derive(Debug)]
pub struct DetailsOverlay {
    focusables: Vec<egui::Id>,
    open: Option<OpenState>,
}

impl Default for DetailsOverlay {
    fn default() -> Self {
        Self::new(vec![close_button_id(), done_button_id()])
    }
}

impl DetailsOverlay {
    /// `focusables` lists the overlay's focusable elements in tab order.
    pub fn new(focusables: Vec<egui::Id>) -> Self {
        Self {
            focusables,
            open: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open(&mut self, host: &mut impl FocusHost) {
        if self.open.is_some() {
            return;
        }
        let restore_focus = host.focused();
        host.focus(self.focusables.first().copied());
        host.set_scroll_locked(true);
        debug!(?restore_focus, "details overlay opened");
        self.open = Some(OpenState {
            restore_focus,
            focus_index: 0,
            content_rect: None,
        });
    }

    /// Returns whether the overlay was open.
    pub fn close(&mut self, host: &mut impl FocusHost) -> bool {
        let Some(state) = self.open.take() else {
            return false;
        };
        host.focus(state.restore_focus);
        host.set_scroll_locked(false);
        debug!(restore_focus = ?state.restore_focus, "details overlay closed");
        true
    }

    /// Area of the overlay's content panel, as last drawn.
    pub fn set_content_rect(&mut self, rect: egui::Rect) {
        if let Some(state) = self.open.as_mut() {
            state.content_rect = Some(rect);
        }
    }

    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        host: &mut impl FocusHost,
    ) -> Option<OverlayOutcome> {
        let state = self.open.as_mut()?;
        match *event {
            InputEvent::Key {
                key: Key::Escape, ..
            } => {
                self.close(host);
                Some(OverlayOutcome::Closed)
            }
            InputEvent::Key {
                key: Key::Tab,
                shift,
            } => {
                let count = self.focusables.len();
                if count > 0 {
                    state.focus_index = if shift {
                        (state.focus_index + count - 1) % count
                    } else {
                        (state.focus_index + 1) % count
                    };
                    host.focus(Some(self.focusables[state.focus_index]));
                }
                Some(OverlayOutcome::Consumed)
            }
            InputEvent::Click { pos } => {
                let outside = state.content_rect.is_some_and(|r| !r.contains(pos));
                if outside {
                    self.close(host);
                    Some(OverlayOutcome::Closed)
                } else {
                    Some(OverlayOutcome::Consumed)
                }
            }
            _ => Some(OverlayOutcome::Consumed),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct FakeHost {
        pub focused: Option<egui::Id>,
        pub scroll_locked: bool,
    }

    impl FocusHost for FakeHost {
        fn focused(&self) -> Option<egui::Id> {
            self.focused
        }

        fn focus(&mut self, id: Option<egui::Id>) {
            self.focused = id;
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.scroll_locked = locked;
        }
    }

    fn opened(host: &mut FakeHost) -> DetailsOverlay {
        let mut overlay = DetailsOverlay::default();
        overlay.open(host);
        overlay.set_content_rect(egui::Rect::from_min_max(
            egui::pos2(100.0, 100.0),
            egui::pos2(500.0, 400.0),
        ));
        overlay
    }

    #[test]
    fn test_open_moves_focus_inside_and_locks_scroll() {
        let trigger = egui::Id::new("details-button");
        let mut host = FakeHost {
            focused: Some(trigger),
            scroll_locked: false,
        };
        let overlay = opened(&mut host);
        assert!(overlay.is_open());
        assert_eq!(host.focused, Some(close_button_id()));
        assert!(host.scroll_locked);
    }

    #[test]
    fn test_close_restores_focus_and_scroll() {
        let trigger = egui::Id::new("details-button");
        let mut host = FakeHost {
            focused: Some(trigger),
            scroll_locked: false,
        };
        let mut overlay = opened(&mut host);
        assert!(overlay.close(&mut host));
        assert_eq!(host.focused, Some(trigger));
        assert!(!host.scroll_locked);
    }

    #[test]
    fn test_escape_closes() {
        let mut host = FakeHost::default();
        let mut overlay = opened(&mut host);
        assert_eq!(
            overlay.handle_event(&InputEvent::key(Key::Escape), &mut host),
            Some(OverlayOutcome::Closed)
        );
        assert!(!overlay.is_open());
        assert_eq!(host.focused, None);
    }

    #[test]
    fn test_tab_cycles_within_overlay() {
        let mut host = FakeHost::default();
        let mut overlay = opened(&mut host);
        overlay.handle_event(&InputEvent::key(Key::Tab), &mut host);
        assert_eq!(host.focused, Some(done_button_id()));
        overlay.handle_event(&InputEvent::key(Key::Tab), &mut host);
        assert_eq!(host.focused, Some(close_button_id()));
        overlay.handle_event(
            &InputEvent::Key {
                key: Key::Tab,
                shift: true,
            },
            &mut host,
        );
        assert_eq!(host.focused, Some(done_button_id()));
    }

    #[test]
    fn test_click_outside_closes() {
        let mut host = FakeHost::default();
        let mut overlay = opened(&mut host);
        assert_eq!(
            overlay.handle_event(
                &InputEvent::Click {
                    pos: egui::pos2(20.0, 20.0)
                },
                &mut host
            ),
            Some(OverlayOutcome::Closed)
        );
    }

    #[test]
    fn test_click_inside_stays_open() {
        let mut host = FakeHost::default();
        let mut overlay = opened(&mut host);
        assert_eq!(
            overlay.handle_event(
                &InputEvent::Click {
                    pos: egui::pos2(300.0, 200.0)
                },
                &mut host
            ),
            Some(OverlayOutcome::Consumed)
        );
        assert!(overlay.is_open());
    }

    #[test]
    fn test_closed_overlay_ignores_events() {
        let mut host = FakeHost::default();
        let mut overlay = DetailsOverlay::default();
        assert_eq!(
            overlay.handle_event(&InputEvent::key(Key::Escape), &mut host),
            None
        );
        assert!(!overlay.close(&mut host));
    }
}
