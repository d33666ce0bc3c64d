pub mod content;

use std::collections::HashSet;

use thiserror::Error;

/// Id of the slide that carries the call-to-action in the embedded deck.
pub const TERMINAL_SLIDE_ID: &str = "whats-next";

/// Color family a slide is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideTheme {
    A,
    B,
    C,
    D,
}

/// The headline statistic of a slide. Numbers are animated as counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Number(f64),
    Text(&'static str),
}

#[derive(Debug, Clone)]
pub struct Slide {
    /// Selects the decorative illustration; carries no behavior.
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub stat_label: Option<&'static str>,
    pub stat_value: Option<StatValue>,
    pub theme: SlideTheme,
    /// Extra lines shown in the details overlay, in order.
    pub details: &'static [&'static str],
}

impl Slide {
    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }

    /// Label and value of the headline statistic. A half-specified stat
    /// (label without value or value without label) counts as none.
    pub fn stat(&self) -> Option<(&'static str, StatValue)> {
        Some((self.stat_label?, self.stat_value?))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DeckError {
    #[error("deck has no slides")]
    Empty,
    #[error("duplicate slide id: {0}")]
    DuplicateId(String),
    #[error("terminal slide '{0}' is not part of the deck")]
    MissingTerminal(String),
}

/// An ordered, non-empty sequence of slides with a designated terminal slide.
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    terminal_id: &'static str,
}

impl Deck {
    pub fn new(slides: Vec<Slide>, terminal_id: &'static str) -> Result<Self, DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut seen = HashSet::new();
        for slide in &slides {
            if !seen.insert(slide.id) {
                return Err(DeckError::DuplicateId(slide.id.to_string()));
            }
        }

        if !seen.contains(terminal_id) {
            return Err(DeckError::MissingTerminal(terminal_id.to_string()));
        }

        Ok(Self {
            slides,
            terminal_id,
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Slide at `index`. Callers hold indices produced by the navigator,
    /// which are always in range.
    pub fn slide(&self, index: usize) -> &Slide {
        &self.slides[index]
    }

    #[cfg(test)]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn is_terminal(&self, index: usize) -> bool {
        self.slides
            .get(index)
            .is_some_and(|s| s.id == self.terminal_id)
    }
}
