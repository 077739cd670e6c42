//! Staggered expand/collapse of the ticker.
//!
//! ```text
//! t=0      fade out ────┐
//! t=0.15       layout change ──────────┐
//! t=0.35                  row shrink ─┐
//! t=0.2|0.35        fade in ───────────────┐
//! end                                       └─ auto-advance restarts
//! ```
//!
//! The controller owns the timers; this type only holds the animated
//! values and knows how each step moves them.

use std::time::Duration;

use crate::animation::{AnimatedValue, TimingFunction, Transition};
use crate::config::ExpandTimings;

/// How the pages are arranged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Pages overlap and cycle horizontally (collapsed)
    #[default]
    Fan,
    /// Pages are listed one under another (expanded)
    Stacked,
}

/// Steps that start after a delay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpandStep {
    Layout,
    Shrink,
    FadeIn,
}

#[derive(Clone, Debug)]
pub struct ExpandSequence {
    timings: ExpandTimings,
    is_expanded: bool,
    /// Direction of the sequence in flight
    running: Option<bool>,
    opacity: AnimatedValue<f32>,
    /// 0 = fan, 1 = stacked
    posture: AnimatedValue<f32>,
    /// 1 = compact single row, 0 = full height
    single_row: AnimatedValue<f32>,
}

fn smooth(duration: Duration) -> Transition {
    Transition::over(duration, TimingFunction::EaseInOut)
}

impl ExpandSequence {
    pub fn new(timings: ExpandTimings) -> Self {
        Self {
            timings,
            is_expanded: false,
            running: None,
            opacity: AnimatedValue::new(1.0),
            posture: AnimatedValue::new(0.0),
            single_row: AnimatedValue::new(1.0),
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        if self.is_expanded {
            LayoutMode::Stacked
        } else {
            LayoutMode::Fan
        }
    }

    pub fn timings(&self) -> &ExpandTimings {
        &self.timings
    }

    /// Start toward the opposite state with the fade-out. Returns the
    /// delayed steps with their delays, or `None` if a sequence is already
    /// in flight.
    pub fn begin(&mut self, now: Duration) -> Option<Vec<(Duration, ExpandStep)>> {
        if self.running.is_some() {
            return None;
        }
        let expanding = !self.is_expanded;
        self.running = Some(expanding);
        log::debug!(
            "ticker {} sequence started",
            if expanding { "expand" } else { "collapse" }
        );
        self.opacity
            .animate_to(0.0, smooth(self.timings.fade_out), now);
        Some(vec![
            (self.timings.layout_delay, ExpandStep::Layout),
            (self.timings.shrink_delay, ExpandStep::Shrink),
            (self.timings.fade_in_delay(expanding), ExpandStep::FadeIn),
        ])
    }

    /// Total length of the sequence in flight
    pub fn total(&self) -> Option<Duration> {
        self.running.map(|expanding| self.timings.total(expanding))
    }

    pub fn apply(&mut self, step: ExpandStep, now: Duration) {
        let Some(expanding) = self.running else {
            return;
        };
        match step {
            ExpandStep::Layout => {
                self.is_expanded = expanding;
                let target = if expanding { 1.0 } else { 0.0 };
                self.posture
                    .animate_to(target, smooth(self.timings.layout), now);
            }
            ExpandStep::Shrink => {
                let target = if expanding { 0.0 } else { 1.0 };
                self.single_row
                    .animate_to(target, smooth(self.timings.shrink), now);
            }
            ExpandStep::FadeIn => {
                self.opacity
                    .animate_to(1.0, smooth(self.timings.fade_in), now);
            }
        }
    }

    /// Land on the end state of the sequence in flight, if any. Called when
    /// the sequence completes and when the widget unmounts mid-sequence.
    pub fn finish(&mut self) {
        if let Some(expanding) = self.running.take() {
            self.snap_to(expanding);
        }
    }

    fn snap_to(&mut self, expanded: bool) {
        self.is_expanded = expanded;
        self.opacity.set_immediate(1.0);
        self.posture.set_immediate(if expanded { 1.0 } else { 0.0 });
        self.single_row.set_immediate(if expanded { 0.0 } else { 1.0 });
    }

    pub fn opacity(&mut self, now: Duration) -> f32 {
        self.opacity.sample(now)
    }

    pub fn posture(&mut self, now: Duration) -> f32 {
        self.posture.sample(now)
    }

    pub fn single_row(&mut self, now: Duration) -> f32 {
        self.single_row.sample(now)
    }
}
