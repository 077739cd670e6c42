use std::f32::consts::PI;

/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the spring (default: 1.0)
    pub mass: f32,
    /// Stiffness of the spring
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
}

impl SpringConfig {
    /// Default spring with pleasant overshoot
    pub const DEFAULT: Self = Self {
        mass: 1.0,
        stiffness: 180.0,
        damping: 11.0,
    };

    /// Build a spring from a perceptual duration (seconds) and bounce.
    ///
    /// `bounce` 0.0 is critically damped; values toward 1.0 oscillate more.
    /// Unit mass, `stiffness = (2π / duration)²`,
    /// `damping = 4π (1 − bounce) / duration`.
    pub fn from_duration_bounce(duration_secs: f32, bounce: f32) -> Self {
        let omega = 2.0 * PI / duration_secs;
        Self {
            mass: 1.0,
            stiffness: omega * omega,
            damping: 4.0 * PI * (1.0 - bounce) / duration_secs,
        }
    }

    /// Perceptual duration in seconds: one undamped period.
    pub fn perceptual_duration(&self) -> f32 {
        2.0 * PI * (self.mass / self.stiffness).sqrt()
    }
}

/// State for spring physics simulation
#[derive(Clone, Debug)]
pub struct SpringState {
    /// Current position (0.0 = start, 1.0 = target)
    pub position: f32,
    /// Current velocity
    pub velocity: f32,
    /// Last evaluation time
    pub last_t: f32,
}

impl SpringState {
    /// Create a new spring state starting at position 0.0
    pub fn new() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            last_t: 0.0,
        }
    }

    /// Step the spring simulation forward using real elapsed time in seconds.
    ///
    /// `elapsed_secs` - Total elapsed time since animation started, in seconds
    /// Returns the current position (can overshoot 1.0)
    pub fn step(&mut self, elapsed_secs: f32, config: &SpringConfig) -> f32 {
        let mut remaining = (elapsed_secs - self.last_t).max(0.0);
        self.last_t = elapsed_secs.max(self.last_t);

        if remaining < 1e-6 {
            return self.position;
        }

        // Hosts may sample sparsely; integrate in capped sub-steps so a long
        // gap still converges instead of skipping ahead by one huge step.
        let max_dt = 1.0 / 120.0;
        while remaining > 1e-6 {
            let dt = remaining.min(max_dt);
            remaining -= dt;

            let displacement = self.position - 1.0;
            let spring_force = -config.stiffness * displacement;
            let damping_force = -config.damping * self.velocity;
            let acceleration = (spring_force + damping_force) / config.mass;

            // semi-implicit Euler
            self.velocity += acceleration * dt;
            self.position += self.velocity * dt;
        }

        self.position
    }

    /// Check if the spring has settled (position near target, velocity near zero)
    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - 1.0).abs() < threshold && self.velocity.abs() < threshold
    }
}

impl Default for SpringState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_reaches_target() {
        let mut state = SpringState::new();
        let config = SpringConfig::DEFAULT;

        let mut position = 0.0;
        for i in 0..120 {
            let elapsed_secs = i as f32 / 60.0;
            position = state.step(elapsed_secs, &config);
        }

        assert!(
            (position - 1.0).abs() < 0.1,
            "Spring should settle near target, got {}",
            position
        );
    }

    #[test]
    fn test_spring_overshoots() {
        let mut state = SpringState::new();
        let config = SpringConfig::from_duration_bounce(0.55, 0.5);

        let mut max_position: f32 = 0.0;
        for i in 0..120 {
            let elapsed_secs = i as f32 / 60.0;
            let pos = state.step(elapsed_secs, &config);
            max_position = max_position.max(pos);
        }

        assert!(
            max_position > 1.0,
            "Half-bounce spring should overshoot, max was {}",
            max_position
        );
    }

    #[test]
    fn test_duration_bounce_round_trip() {
        let config = SpringConfig::from_duration_bounce(0.55, 0.2);
        assert!((config.perceptual_duration() - 0.55).abs() < 1e-4);
        assert!(config.damping > 0.0);
    }

    #[test]
    fn test_zero_bounce_does_not_overshoot() {
        let config = SpringConfig::from_duration_bounce(0.5, 0.0);
        let mut state = SpringState::new();
        let mut max_position: f32 = 0.0;
        for i in 0..240 {
            max_position = max_position.max(state.step(i as f32 / 60.0, &config));
        }
        assert!(max_position <= 1.0 + 1e-3, "max was {}", max_position);
    }

    #[test]
    fn test_sparse_sampling_still_settles() {
        let config = SpringConfig::from_duration_bounce(0.55, 0.2);
        let mut state = SpringState::new();
        state.step(3.0, &config);
        assert!(state.is_settled(0.01));
    }
}
