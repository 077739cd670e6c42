use std::time::Duration;

use crate::animation::{AnimatedValue, TimingFunction, Transition};

/// Fill of the current item's progress capsule, 0 (empty) to 1 (full).
#[derive(Clone, Debug, Default)]
pub struct ProgressFill {
    value: AnimatedValue<f32>,
}

impl ProgressFill {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the capsule without animating
    pub fn reset(&mut self) {
        self.value.set_immediate(0.0);
    }

    /// Empty the capsule, then fill it linearly over `duration` after `delay`
    pub fn restart(&mut self, now: Duration, duration: Duration, delay: Duration) {
        self.reset();
        let transition = Transition::over(duration, TimingFunction::Linear).delayed_by(delay);
        self.value.animate_to(1.0, transition, now);
    }

    pub fn sample(&mut self, now: Duration) -> f32 {
        self.value.sample(now)
    }

    pub fn is_filling(&self) -> bool {
        self.value.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fill_waits_then_fills() {
        let mut fill = ProgressFill::new();
        fill.restart(ms(1000), ms(5000), ms(500));
        assert_eq!(fill.sample(ms(1400)), 0.0);
        assert!((fill.sample(ms(4000)) - 0.5).abs() < 1e-3);
        assert_eq!(fill.sample(ms(6500)), 1.0);
        assert!(!fill.is_filling());
    }

    #[test]
    fn test_reset_stops_fill() {
        let mut fill = ProgressFill::new();
        fill.restart(ms(0), ms(5000), ms(0));
        fill.sample(ms(2500));
        fill.reset();
        assert_eq!(fill.sample(ms(4000)), 0.0);
        assert!(!fill.is_filling());
    }
}
