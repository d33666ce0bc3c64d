//! Per-frame tasks: the stat counter and the slide-to-slide transition.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;

pub const COUNTER_DURATION: Duration = Duration::from_millis(1500);
pub const TRANSITION_DURATION: Duration = Duration::from_millis(450);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    OutCubic,
    InOutQuad,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

fn progress(start: Instant, duration: Duration, now: Instant) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Finished,
}

pub trait FrameTask {
    fn tick(&mut self, now: Instant) -> TaskStatus;
}

/// Cancels a scheduled task. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Default)]
pub struct Scheduler {
    tasks: Vec<(TaskHandle, Box<dyn FrameTask>)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, task: impl FrameTask + 'static) -> TaskHandle {
        let handle = TaskHandle::default();
        self.tasks.push((handle.clone(), Box::new(task)));
        handle
    }

    /// Tick every live task once. Returns whether any task is still running.
    pub fn run_frame(&mut self, now: Instant) -> bool {
        self.tasks.retain_mut(|(handle, task)| {
            if handle.is_cancelled() {
                trace!("dropping cancelled task");
                return false;
            }
            task.tick(now) == TaskStatus::Running
        });
        !self.tasks.is_empty()
    }

    pub fn cancel_all(&mut self) {
        for (handle, _) in self.tasks.drain(..) {
            handle.cancel();
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Value published by a running counter.
#[derive(Debug, Clone, Default)]
pub struct CounterValue(Rc<Cell<f64>>);

impl CounterValue {
    pub fn get(&self) -> f64 {
        self.0.get()
    }
}

/// Counts from `from` to `to` over `duration`, easing out.
#[derive(Debug)]
pub struct CounterAnimation {
    from: f64,
    to: f64,
    duration: Duration,
    start: Instant,
    output: CounterValue,
}

impl CounterAnimation {
    pub fn new(from: f64, to: f64, duration: Duration, start: Instant) -> (Self, CounterValue) {
        let output = CounterValue::default();
        output.0.set(from);
        let animation = Self {
            from,
            to,
            duration,
            start,
            output: output.clone(),
        };
        (animation, output)
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let t = progress(self.start, self.duration, now);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * f64::from(Ease::OutCubic.apply(t))
    }
}

impl FrameTask for CounterAnimation {
    fn tick(&mut self, now: Instant) -> TaskStatus {
        self.output.0.set(self.value_at(now));
        if progress(self.start, self.duration, now) >= 1.0 {
            TaskStatus::Finished
        } else {
            TaskStatus::Running
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Forward,
    Backward,
}

/// Visual hand-off between two slides. Navigation itself is immediate.
#[derive(Debug, Clone, Copy)]
pub struct SlideTransition {
    pub from: usize,
    pub to: usize,
    pub direction: TransitionDirection,
    start: Instant,
}

impl SlideTransition {
    pub fn new(from: usize, to: usize, direction: TransitionDirection, start: Instant) -> Self {
        Self {
            from,
            to,
            direction,
            start,
        }
    }

    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        Ease::InOutQuad.apply(progress(self.start, TRANSITION_DURATION, now))
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        progress(self.start, TRANSITION_DURATION, now) >= 1.0
    }
}
