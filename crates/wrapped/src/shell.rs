//! Composes the deck, navigator, interpreters, overlay and animations.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::animation::{
    COUNTER_DURATION, CounterAnimation, CounterValue, Scheduler, SlideTransition, TaskHandle,
    TransitionDirection,
};
use crate::deck::{Deck, Slide, StatValue};
use crate::gesture::{DEFAULT_SWIPE_THRESHOLD, Intent, KeyboardInterpreter, SwipeInterpreter};
use crate::input::{InputBus, InputEvent, InputSource};
use crate::navigator::Navigator;
use crate::overlay::{DetailsOverlay, FocusHost, OverlayOutcome};
use crate::progress::{self, ProgressMarker, ProgressStyle};

/// Called with no arguments when the call-to-action is used.
pub type CtaCallback = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellOptions {
    pub progress: ProgressStyle,
    pub swipe_threshold: f32,
    /// 0-indexed; clamped into the deck.
    pub start_slide: usize,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            progress: ProgressStyle::Dots,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            start_slide: 0,
        }
    }
}

/// Requests coming from on-screen controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Navigate(Intent),
    OpenDetails,
    CloseDetails,
    InvokeCta,
}

struct RunningCounter {
    handle: TaskHandle,
    value: CounterValue,
}

pub struct Shell {
    deck: Deck,
    navigator: Navigator,
    bus: InputBus,
    keyboard: KeyboardInterpreter,
    swipe: SwipeInterpreter,
    overlay: DetailsOverlay,
    scheduler: Scheduler,
    counter: Option<RunningCounter>,
    transition: Option<SlideTransition>,
    progress_style: ProgressStyle,
    cta: Option<CtaCallback>,
}

impl Shell {
    pub fn new(deck: Deck, options: ShellOptions, cta: Option<CtaCallback>, now: Instant) -> Self {
        let navigator = Navigator::starting_at(&deck, options.start_slide);
        let mut shell = Self {
            deck,
            navigator,
            bus: InputBus::new(),
            keyboard: KeyboardInterpreter::new(),
            swipe: SwipeInterpreter::new(options.swipe_threshold),
            overlay: DetailsOverlay::default(),
            scheduler: Scheduler::new(),
            counter: None,
            transition: None,
            progress_style: options.progress,
            cta,
        };
        shell.sync_listeners();
        shell.start_counter(now);
        shell
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current(&self) -> usize {
        self.navigator.current()
    }

    pub fn current_slide(&self) -> &Slide {
        self.deck.slide(self.navigator.current())
    }

    /// Slide whose details overlay is open.
    pub fn modal_slide(&self) -> Option<&Slide> {
        self.navigator.modal_slide().map(|i| self.deck.slide(i))
    }

    #[cfg(test)]
    pub fn bus(&self) -> &InputBus {
        &self.bus
    }

    pub fn overlay_mut(&mut self) -> &mut DetailsOverlay {
        &mut self.overlay
    }

    pub fn transition(&self) -> Option<SlideTransition> {
        self.transition
    }

    pub fn progress(&self) -> ProgressMarker {
        progress::marker(self.current(), self.deck.len(), self.progress_style)
    }

    /// Counter value for the current slide's numeric stat, while it exists.
    pub fn counter_value(&self) -> Option<f64> {
        self.counter.as_ref().map(|c| c.value.get())
    }

    /// Route a raw input event. Returns whether the host should suppress
    /// its own default handling of the event.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        host: &mut impl FocusHost,
        now: Instant,
    ) -> bool {
        if let Some(outcome) = self.overlay.handle_event(event, host) {
            if outcome == OverlayOutcome::Closed {
                self.navigator.close_details();
                self.sync_listeners();
            }
            return true;
        }

        if let Some(intent) = self.keyboard.interpret(event) {
            self.navigate(intent, now);
            return true;
        }

        if let Some(intent) = self.swipe.interpret(event) {
            self.navigate(intent, now);
        }
        false
    }

    pub fn command(&mut self, command: Command, host: &mut impl FocusHost, now: Instant) {
        match command {
            Command::Navigate(intent) => {
                self.navigate(intent, now);
            }
            Command::OpenDetails => {
                self.open_details(host);
            }
            Command::CloseDetails => {
                self.close_details(host);
            }
            Command::InvokeCta => {
                self.invoke_cta();
            }
        }
    }

    pub fn navigate(&mut self, intent: Intent, now: Instant) -> bool {
        let from = self.navigator.current();
        if !self.navigator.apply(intent) {
            return false;
        }
        let direction = match intent {
            Intent::Next => TransitionDirection::Forward,
            Intent::Previous => TransitionDirection::Backward,
        };
        let to = self.navigator.current();
        self.transition = Some(SlideTransition::new(from, to, direction, now));
        self.start_counter(now);
        true
    }

    pub fn open_details(&mut self, host: &mut impl FocusHost) -> bool {
        if !self.navigator.open_details(&self.deck) {
            return false;
        }
        self.overlay.open(host);
        self.sync_listeners();
        debug!(slide = self.current_slide().id, "details opened");
        true
    }

    pub fn close_details(&mut self, host: &mut impl FocusHost) -> bool {
        let closed = self.overlay.close(host);
        self.navigator.close_details();
        self.sync_listeners();
        closed
    }

    pub fn cta_available(&self) -> bool {
        self.cta.is_some() && self.navigator.is_terminal(&self.deck)
    }

    /// Returns whether a callback ran.
    pub fn invoke_cta(&mut self) -> bool {
        if !self.navigator.is_terminal(&self.deck) {
            return false;
        }
        match self.cta.as_mut() {
            Some(callback) => {
                info!("call-to-action invoked");
                callback();
                true
            }
            None => false,
        }
    }

    /// Advance animations. Returns whether anything is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.transition.is_some_and(|t| t.is_complete(now)) {
            self.transition = None;
        }
        let running = self.scheduler.run_frame(now);
        running || self.transition.is_some()
    }

    /// Release every listener and cancel every task.
    pub fn teardown(&mut self) {
        self.keyboard.set_enabled(&self.bus, false);
        self.swipe.set_enabled(&self.bus, false);
        self.scheduler.cancel_all();
        self.counter = None;
        self.transition = None;
        debug!(listeners = self.bus.total_listeners(), "shell torn down");
    }

    fn sync_listeners(&mut self) {
        let enabled = !self.navigator.is_navigation_suppressed();
        self.keyboard.set_enabled(&self.bus, enabled);
        self.swipe.set_enabled(&self.bus, enabled);
        trace!(
            enabled,
            keyboard = self.bus.listener_count(InputSource::Keyboard),
            pointer = self.bus.listener_count(InputSource::Pointer),
            "listeners synced"
        );
    }

    fn start_counter(&mut self, now: Instant) {
        if let Some(previous) = self.counter.take() {
            previous.handle.cancel();
        }
        if let Some((_, StatValue::Number(target))) = self.current_slide().stat() {
            let (animation, value) = CounterAnimation::new(0.0, target, COUNTER_DURATION, now);
            let handle = self.scheduler.spawn(animation);
            self.counter = Some(RunningCounter { handle, value });
        }
    }
}
