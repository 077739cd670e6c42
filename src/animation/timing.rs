//! Easing curves for animations.
//!
//! - [`TimingFunction::Linear`] for the progress fill and marquee slide
//! - [`TimingFunction::EaseOut`] for live drag offsets
//! - [`TimingFunction::EaseInOut`] for carousel advances, snaps and the
//!   expand sequence
//! - [`TimingFunction::Spring`] for the detail view appearing and leaving
//!
//! [`ease_rational`] is not a timing function for time but a shaping curve
//! applied to already-computed values (the detail card's shrink-back scale
//! runs through it).

use super::spring::SpringConfig;

/// Timing function that controls the animation curve
#[derive(Clone, Debug, PartialEq)]
pub enum TimingFunction {
    /// Constant speed
    Linear,
    /// Starts fast, ends slow
    EaseOut,
    /// Starts slow, speeds up, then slows down
    EaseInOut,
    /// Spring physics simulation (can overshoot)
    Spring(SpringConfig),
}

impl TimingFunction {
    /// Evaluate the curve at `t` in 0.0..=1.0.
    ///
    /// Springs are stepped against elapsed time in
    /// [`AnimatedValue::advance`](super::AnimatedValue::advance); here they
    /// fall back to `t`.
    pub fn evaluate(&self, t: f32) -> f32 {
        match self {
            TimingFunction::Linear | TimingFunction::Spring(_) => t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }

    pub fn is_spring(&self) -> bool {
        matches!(self, TimingFunction::Spring(_))
    }
}

/// Rational ease curve `x² / (2·(x² − x) + 1)`.
///
/// Symmetric around 0.5 with fixed points at 0, 0.5 and 1. The denominator
/// is at least 0.5 for every real `x`, so the curve is defined everywhere.
pub fn ease_rational(x: f32) -> f32 {
    let square = x * x;
    square / (2.0 * (square - x) + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let a = TimingFunction::EaseInOut.evaluate(0.25);
        let b = TimingFunction::EaseInOut.evaluate(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
        assert!(a < 0.25);
        assert_eq!(TimingFunction::EaseInOut.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_ease_out() {
        assert!(TimingFunction::EaseOut.evaluate(0.5) > 0.5);
        assert_eq!(TimingFunction::EaseOut.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_spring_falls_back_to_t() {
        let spring = TimingFunction::Spring(SpringConfig::DEFAULT);
        assert!(spring.is_spring());
        assert_eq!(spring.evaluate(0.3), 0.3);
    }

    #[test]
    fn test_ease_rational_fixed_points() {
        assert_eq!(ease_rational(0.0), 0.0);
        assert_eq!(ease_rational(1.0), 1.0);
        assert!((ease_rational(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ease_rational_at_shrink_floor() {
        // 0.49 / (2 * (0.49 - 0.7) + 1) = 0.49 / 0.58
        let value = ease_rational(0.7);
        assert!((value - 0.49 / 0.58).abs() < 1e-6);
        assert!((value - 0.8448).abs() < 1e-3);
    }
}
