mod animatable;
mod spring;
mod state;
mod timing;
mod transform;

use std::time::Duration;

pub use animatable::Animatable;
pub use spring::{SpringConfig, SpringState};
pub use state::{AdvanceResult, AnimatedValue};
pub use timing::{ease_rational, TimingFunction};
pub use transform::Transform;

use crate::config::ConfigError;

/// Configuration for how a value should animate when it changes
#[derive(Clone, Debug)]
pub struct Transition {
    /// Duration of the animation in milliseconds
    pub duration_ms: f32,
    /// Timing function controlling the animation curve
    pub timing: TimingFunction,
    /// Delay before animation starts in milliseconds
    pub delay_ms: f32,
}

impl Transition {
    /// Create a new transition with the given duration and timing function
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    /// Transition lasting exactly `duration`
    pub fn over(duration: Duration, timing: TimingFunction) -> Self {
        Self::new(duration.as_micros() as f32 / 1000.0, timing)
    }

    /// Create a spring-based transition with the given configuration
    pub fn spring(config: SpringConfig) -> Self {
        Self {
            duration_ms: config.perceptual_duration() * 1000.0,
            timing: TimingFunction::Spring(config),
            delay_ms: 0.0,
        }
    }

    /// Spring described by perceptual duration (seconds) and bounce
    pub fn spring_with(duration_secs: f32, bounce: f32) -> Self {
        Self {
            duration_ms: duration_secs * 1000.0,
            timing: TimingFunction::Spring(SpringConfig::from_duration_bounce(
                duration_secs,
                bounce,
            )),
            delay_ms: 0.0,
        }
    }

    /// Constant-speed transition
    pub fn linear(duration_secs: f32) -> Self {
        Self::new(duration_secs * 1000.0, TimingFunction::Linear)
    }

    /// Smooth ease-in-out transition
    pub fn smooth(duration_secs: f32) -> Self {
        Self::new(duration_secs * 1000.0, TimingFunction::EaseInOut)
    }

    /// Quick-settling ease-out transition
    pub fn snappy(duration_secs: f32) -> Self {
        Self::new(duration_secs * 1000.0, TimingFunction::EaseOut)
    }

    /// Set the delay before the animation starts
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the delay in seconds
    pub fn delay_secs(self, delay_secs: f32) -> Self {
        self.delay(delay_secs * 1000.0)
    }

    /// Set the delay from a `Duration`
    pub fn delayed_by(self, delay: Duration) -> Self {
        self.delay(delay.as_micros() as f32 / 1000.0)
    }

    /// Set the duration of the animation
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the timing function
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Delay plus duration, the point after which a non-spring value is final
    pub fn total(&self) -> Duration {
        // whole microseconds so millisecond configs map to exact deadlines
        Duration::from_micros(((self.delay_ms + self.duration_ms).max(0.0) * 1000.0).round() as u64)
    }

    /// Reject non-finite or negative timings
    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(ConfigError::NonPositiveDuration {
                name,
                value: self.duration_ms,
            });
        }
        if !self.delay_ms.is_finite() || self.delay_ms < 0.0 {
            return Err(ConfigError::NegativeDelay {
                name,
                value: self.delay_ms,
            });
        }
        Ok(())
    }
}

impl Default for Transition {
    /// Default transition uses spring physics with pleasant overshoot
    fn default() -> Self {
        Self::spring(SpringConfig::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_with_keeps_duration() {
        let t = Transition::spring_with(0.55, 0.2);
        assert!((t.duration_ms - 550.0).abs() < 1e-3);
        assert!(t.timing.is_spring());
    }

    #[test]
    fn test_total_includes_delay() {
        let t = Transition::linear(5.0).delay_secs(0.4);
        assert!((t.total().as_secs_f32() - 5.4).abs() < 1e-4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Transition::linear(0.0).validate("fill").is_err());
        assert!(Transition::linear(1.0).delay(-1.0).validate("fill").is_err());
        assert!(Transition::smooth(f32::NAN).validate("fill").is_err());
        assert!(Transition::smooth(0.6).validate("advance").is_ok());
    }
}
