//! Horizontal marquee for a ticker row whose text overflows its page.
//!
//! The row is measured once. Rows that fit never move. Rows that overflow
//! are drawn twice, side by side, and the pair slides left by a fixed
//! distance over a fixed duration whenever the row is (re)started.

use std::time::Duration;

use crate::animation::{AnimatedValue, TimingFunction, Transition};

#[derive(Clone, Debug)]
pub struct Marquee {
    content_width: Option<f32>,
    doubled: bool,
    distance: f32,
    duration: Duration,
    spacing: f32,
    offset: AnimatedValue<f32>,
}

impl Marquee {
    pub fn new(distance: f32, duration: Duration, spacing: f32) -> Self {
        Self {
            content_width: None,
            doubled: false,
            distance,
            duration,
            spacing,
            offset: AnimatedValue::new(0.0),
        }
    }

    /// Record the rendered row width. Only the first measurement counts;
    /// returns whether this call was it.
    pub fn measure(&mut self, content_width: f32, container_width: f32) -> bool {
        if self.content_width.is_some() || !content_width.is_finite() {
            return false;
        }
        self.content_width = Some(content_width);
        self.doubled = content_width > container_width;
        if self.doubled {
            log::trace!(
                "marquee row {} wider than page {}, doubling",
                content_width,
                container_width
            );
        }
        true
    }

    pub fn is_measured(&self) -> bool {
        self.content_width.is_some()
    }

    /// Whether the row is drawn twice and scrolls
    pub fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Leading x of the second copy, relative to the first
    pub fn copy_offset(&self) -> Option<f32> {
        if self.doubled {
            self.content_width.map(|width| width + self.spacing)
        } else {
            None
        }
    }

    /// Slide toward the scrolled position. A no-op for rows that fit.
    pub fn restart(&mut self, now: Duration) {
        if !self.doubled {
            return;
        }
        self.offset.animate_to(
            -self.distance,
            Transition::over(self.duration, TimingFunction::Linear),
            now,
        );
    }

    /// Back to the start, animated (drag in progress)
    pub fn pause(&mut self, transition: Transition, now: Duration) {
        self.offset.animate_to(0.0, transition, now);
    }

    /// Back to the start, immediately (page no longer active)
    pub fn stop(&mut self) {
        self.offset.set_immediate(0.0);
    }

    pub fn offset(&mut self, now: Duration) -> f32 {
        self.offset.sample(now)
    }

    pub fn is_scrolling(&self) -> bool {
        self.offset.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn marquee() -> Marquee {
        Marquee::new(200.0, Duration::from_secs(6), 10.0)
    }

    #[test]
    fn test_fitting_row_never_moves() {
        let mut row = marquee();
        assert!(row.measure(180.0, 300.0));
        row.restart(ms(0));
        assert_eq!(row.offset(ms(3000)), 0.0);
        assert_eq!(row.copy_offset(), None);
    }

    #[test]
    fn test_overflowing_row_scrolls() {
        let mut row = marquee();
        row.measure(420.0, 300.0);
        assert_eq!(row.copy_offset(), Some(430.0));
        row.restart(ms(0));
        assert!((row.offset(ms(3000)) + 100.0).abs() < 1e-3);
        assert_eq!(row.offset(ms(6000)), -200.0);
    }

    #[test]
    fn test_measured_once() {
        let mut row = marquee();
        assert!(row.measure(100.0, 300.0));
        assert!(!row.measure(900.0, 300.0));
        assert!(!row.is_doubled());
    }

    #[test]
    fn test_stop_and_pause() {
        let mut row = marquee();
        row.measure(420.0, 300.0);
        row.restart(ms(0));
        row.offset(ms(3000));
        row.pause(Transition::snappy(0.3), ms(3000));
        assert_eq!(row.offset(ms(3300)), 0.0);

        row.restart(ms(4000));
        row.offset(ms(5000));
        row.stop();
        assert_eq!(row.offset(ms(5000)), 0.0);
        assert!(!row.is_scrolling());
    }
}
