use std::time::Duration;

use super::{Animatable, SpringState, TimingFunction, Transition};

/// Result of advancing an animation, indicating whether the value changed
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceResult<T> {
    /// Value did not change (animation not running or same value)
    NoChange,
    /// Value changed to a new value
    Changed(T),
}

impl<T> AdvanceResult<T> {
    /// Returns true if the value changed
    pub fn is_changed(&self) -> bool {
        matches!(self, AdvanceResult::Changed(_))
    }
}

/// A value animated toward a target, sampled against the host clock.
///
/// Time is whatever monotonic `Duration` the host passes in (time since
/// mount, frame timestamps, ...). Nothing here reads the wall clock.
#[derive(Clone, Debug)]
pub struct AnimatedValue<T: Animatable> {
    /// Current interpolated value
    current: T,
    /// Value being animated toward
    target: T,
    /// Value when animation started
    start: T,
    /// Progress from 0.0 to 1.0
    progress: f32,
    /// Host time when animation started
    start_time: Duration,
    /// Transition configuration
    transition: Transition,
    /// Spring state (for spring timing functions)
    spring_state: Option<SpringState>,
}

impl<T: Animatable> AnimatedValue<T> {
    pub fn new(initial_value: T) -> Self {
        Self {
            current: initial_value.clone(),
            target: initial_value.clone(),
            start: initial_value,
            progress: 1.0, // Start completed
            start_time: Duration::ZERO,
            transition: Transition::new(0.0, TimingFunction::Linear),
            spring_state: None,
        }
    }

    /// Start animating to a new target value.
    ///
    /// The animation starts from the value sampled at `now`, so retargeting
    /// mid-flight never jumps.
    pub fn animate_to(&mut self, new_target: T, transition: Transition, now: Duration) {
        self.advance(now);
        // Don't restart if we're already animating to this target
        if new_target == self.target {
            return;
        }

        self.start = self.current.clone();
        self.target = new_target;
        self.progress = 0.0;
        self.start_time = now;
        self.spring_state = transition.timing.is_spring().then(SpringState::new);
        self.transition = transition;
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: T) {
        self.current = value.clone();
        self.target = value.clone();
        self.start = value;
        self.progress = 1.0;
        self.spring_state = None;
    }

    /// Advance the animation to `now` and return whether the value changed
    pub fn advance(&mut self, now: Duration) -> AdvanceResult<T> {
        if self.progress >= 1.0 {
            return AdvanceResult::NoChange;
        }

        let elapsed = now.saturating_sub(self.start_time).as_secs_f32() * 1000.0;
        let adjusted_elapsed = elapsed - self.transition.delay_ms;

        if adjusted_elapsed <= 0.0 {
            // Still in delay period
            return AdvanceResult::NoChange;
        }

        let eased_t = if let Some(ref mut spring_state) = self.spring_state {
            if let TimingFunction::Spring(ref config) = self.transition.timing {
                let position = spring_state.step(adjusted_elapsed / 1000.0, config);
                // Settling ends the animation exactly on target
                if spring_state.is_settled(1e-3) {
                    self.progress = 1.0;
                    1.0
                } else {
                    self.progress = 0.5;
                    position
                }
            } else {
                self.progress = 1.0;
                1.0
            }
        } else {
            let t = if self.transition.duration_ms > 0.0 {
                (adjusted_elapsed / self.transition.duration_ms).min(1.0)
            } else {
                1.0
            };
            self.progress = t;
            if t >= 1.0 {
                1.0
            } else {
                self.transition.timing.evaluate(t)
            }
        };

        let new_value = if self.progress >= 1.0 {
            self.target.clone()
        } else {
            T::lerp(&self.start, &self.target, eased_t)
        };

        let changed = new_value != self.current;
        self.current = new_value.clone();

        if changed {
            AdvanceResult::Changed(new_value)
        } else {
            AdvanceResult::NoChange
        }
    }

    /// Advance to `now` and return the value there
    pub fn sample(&mut self, now: Duration) -> T {
        self.advance(now);
        self.current.clone()
    }

    /// Check if animation is still running (including its delay)
    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }

    /// Get current value (as of the last advance)
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Get target value
    pub fn target(&self) -> &T {
        &self.target
    }
}

impl AnimatedValue<f32> {
    /// Shift start, current and target by `delta` without restarting.
    ///
    /// Used to re-base a cyclic position onto an equivalent virtual slot so
    /// in-flight motion continues seamlessly.
    pub fn shift(&mut self, delta: f32) {
        self.current += delta;
        self.start += delta;
        self.target += delta;
    }
}

impl<T: Animatable + Default> Default for AnimatedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
