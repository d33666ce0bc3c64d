use tracing::debug;

use crate::deck::Deck;
use crate::gesture::Intent;

/// Current slide and the slide whose details overlay is open, if any.
///
/// Navigation wraps in both directions and is refused while the overlay is
/// open, so the slide under the overlay never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    len: usize,
    current: usize,
    modal_slide: Option<usize>,
}

impl Navigator {
    #[cfg(test)]
    pub fn new(deck: &Deck) -> Self {
        Self::starting_at(deck, 0)
    }

    /// Start on `index`, clamped into the deck.
    pub fn starting_at(deck: &Deck, index: usize) -> Self {
        let len = deck.len();
        Self {
            len,
            current: index.min(len - 1),
            modal_slide: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn modal_slide(&self) -> Option<usize> {
        self.modal_slide
    }

    pub fn is_navigation_suppressed(&self) -> bool {
        self.modal_slide.is_some()
    }

    /// Move forward, wrapping from the last slide to the first.
    pub fn next(&mut self) -> bool {
        self.go(Intent::Next, (self.current + 1) % self.len)
    }

    /// Move back, wrapping from the first slide to the last.
    pub fn previous(&mut self) -> bool {
        self.go(Intent::Previous, (self.current + self.len - 1) % self.len)
    }

    /// Apply `intent`; returns whether the current slide changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Next => self.next(),
            Intent::Previous => self.previous(),
        }
    }

    fn go(&mut self, intent: Intent, target: usize) -> bool {
        if self.is_navigation_suppressed() {
            debug!(?intent, "navigation suppressed while details are open");
            return false;
        }
        let before = self.current;
        self.current = target;
        debug!(?intent, from = before, to = self.current, "navigate");
        self.current != before
    }

    /// Open the details overlay for the current slide. Refused when the
    /// slide has no details or an overlay is already open.
    pub fn open_details(&mut self, deck: &Deck) -> bool {
        if self.modal_slide.is_some() || !deck.slide(self.current).has_details() {
            return false;
        }
        self.modal_slide = Some(self.current);
        true
    }

    /// Returns whether an overlay was open.
    pub fn close_details(&mut self) -> bool {
        self.modal_slide.take().is_some()
    }

    pub fn is_terminal(&self, deck: &Deck) -> bool {
        deck.is_terminal(self.current)
    }
}
