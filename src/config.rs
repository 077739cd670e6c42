//! Tunables for both controllers.
//!
//! Defaults reproduce the shipped feel of the screen; every setter is a
//! consuming builder so configs read like the host's view code.

use std::time::Duration;

use thiserror::Error;

use crate::animation::Transition;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} duration must be positive and finite, got {value}ms")]
    NonPositiveDuration { name: &'static str, value: f32 },
    #[error("{name} delay must be non-negative and finite, got {value}ms")]
    NegativeDelay { name: &'static str, value: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveLength { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("{name} interval must be non-zero")]
    ZeroInterval { name: &'static str },
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveLength { name, value })
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Configuration for the card → detail morph
#[derive(Clone, Debug)]
pub struct TransitionConfig {
    /// Pull-down offset beyond which the detail view dismisses itself
    pub dismiss_threshold: f32,
    /// Offset at which the chevron switches to its inverted color
    pub chevron_contrast_offset: f32,
    /// Spring used when the detail view appears
    pub present_transition: Transition,
    /// Spring used when the detail view animates out
    pub dismiss_transition: Transition,
    /// Delay between starting the dismiss animation and clearing the selection
    pub teardown_delay: Duration,
    /// Animation of the chevron color swap
    pub chevron_color_transition: Transition,
    /// Distance the detail body travels in from below while appearing
    pub detail_travel: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            dismiss_threshold: 130.0,
            chevron_contrast_offset: 50.0,
            present_transition: Transition::spring_with(0.55, 0.2),
            dismiss_transition: Transition::spring_with(0.55, 0.2),
            teardown_delay: Duration::from_millis(550),
            chevron_color_transition: Transition::smooth(0.35),
            detail_travel: 844.0,
        }
    }
}

impl TransitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dismiss_threshold(mut self, threshold: f32) -> Self {
        self.dismiss_threshold = threshold;
        self
    }

    pub fn chevron_contrast_offset(mut self, offset: f32) -> Self {
        self.chevron_contrast_offset = offset;
        self
    }

    pub fn present_transition(mut self, transition: Transition) -> Self {
        self.present_transition = transition;
        self
    }

    pub fn dismiss_transition(mut self, transition: Transition) -> Self {
        self.dismiss_transition = transition;
        self
    }

    pub fn teardown_delay(mut self, delay: Duration) -> Self {
        self.teardown_delay = delay;
        self
    }

    pub fn chevron_color_transition(mut self, transition: Transition) -> Self {
        self.chevron_color_transition = transition;
        self
    }

    /// Usually the screen height
    pub fn detail_travel(mut self, travel: f32) -> Self {
        self.detail_travel = travel;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("dismiss_threshold", self.dismiss_threshold)?;
        finite("chevron_contrast_offset", self.chevron_contrast_offset)?;
        finite("detail_travel", self.detail_travel)?;
        self.present_transition.validate("present_transition")?;
        self.dismiss_transition.validate("dismiss_transition")?;
        self.chevron_color_transition
            .validate("chevron_color_transition")?;
        Ok(())
    }
}

/// Durations and delays of the staggered expand/collapse sequence
#[derive(Clone, Debug, PartialEq)]
pub struct ExpandTimings {
    pub fade_out: Duration,
    pub layout: Duration,
    pub layout_delay: Duration,
    pub shrink: Duration,
    pub shrink_delay: Duration,
    pub fade_in: Duration,
    pub fade_in_delay_expanding: Duration,
    pub fade_in_delay_collapsing: Duration,
}

impl Default for ExpandTimings {
    fn default() -> Self {
        Self {
            fade_out: Duration::from_millis(150),
            layout: Duration::from_millis(350),
            layout_delay: Duration::from_millis(150),
            shrink: Duration::from_millis(100),
            shrink_delay: Duration::from_millis(350),
            fade_in: Duration::from_millis(350),
            fade_in_delay_expanding: Duration::from_millis(200),
            fade_in_delay_collapsing: Duration::from_millis(350),
        }
    }
}

impl ExpandTimings {
    /// Delay before the fade-in step for the given direction
    pub fn fade_in_delay(&self, expanding: bool) -> Duration {
        if expanding {
            self.fade_in_delay_expanding
        } else {
            self.fade_in_delay_collapsing
        }
    }

    /// Time from the toggle until every step has finished
    pub fn total(&self, expanding: bool) -> Duration {
        [
            self.fade_out,
            self.layout_delay + self.layout,
            self.shrink_delay + self.shrink,
            self.fade_in_delay(expanding) + self.fade_in,
        ]
        .into_iter()
        .max()
        .unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("expand.fade_out", self.fade_out),
            ("expand.layout", self.layout),
            ("expand.shrink", self.shrink),
            ("expand.fade_in", self.fade_in),
        ] {
            if value.is_zero() {
                return Err(ConfigError::NonPositiveDuration { name, value: 0.0 });
            }
        }
        Ok(())
    }
}

/// Configuration for the info ticker carousel
#[derive(Clone, Debug)]
pub struct CarouselConfig {
    /// Period of the auto-advance timer
    pub auto_advance_interval: Duration,
    /// Animation of a timer- or tap-driven advance
    pub advance_transition: Transition,
    /// Animation of the settle after a drag
    pub snap_transition: Transition,
    /// Animation applied to live drag offsets
    pub drag_transition: Transition,
    /// Length of one progress fill
    pub fill_duration: Duration,
    /// Fill delay when the timer is (re)scheduled by mount, tap or drag end
    pub fill_delay_on_schedule: Duration,
    /// Fill delay after a timer tick
    pub fill_delay_on_tick: Duration,
    /// Gap between rescheduling and kicking off the fill animation
    pub fill_kickoff_delay: Duration,
    /// Horizontal travel of an overflowing marquee
    pub marquee_distance: f32,
    /// Duration of one marquee pass
    pub marquee_duration: Duration,
    /// Spacing between the two copies of a doubled marquee
    pub marquee_spacing: f32,
    /// Drag distance past which the neighbouring item reads as active
    pub active_drag_threshold: f32,
    /// Width of the item symbol in the header row
    pub symbol_size: f32,
    /// Extra horizontal spacing between ticker pages
    pub ticker_gutter: f32,
    /// Ticker rows follow the finger faster than headers by this factor
    pub ticker_drag_parallax: f32,
    /// Expand/collapse sequence timings
    pub expand: ExpandTimings,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_advance_interval: Duration::from_secs(6),
            advance_transition: Transition::smooth(0.6),
            snap_transition: Transition::smooth(0.4),
            drag_transition: Transition::snappy(0.1),
            fill_duration: Duration::from_secs(5),
            fill_delay_on_schedule: Duration::from_millis(400),
            fill_delay_on_tick: Duration::from_millis(500),
            fill_kickoff_delay: Duration::from_millis(100),
            marquee_distance: 200.0,
            marquee_duration: Duration::from_secs(6),
            marquee_spacing: 10.0,
            active_drag_threshold: 30.0,
            symbol_size: 16.0,
            ticker_gutter: 64.0,
            ticker_drag_parallax: 1.5,
            expand: ExpandTimings::default(),
        }
    }
}

impl CarouselConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auto_advance_interval(mut self, interval: Duration) -> Self {
        self.auto_advance_interval = interval;
        self
    }

    pub fn advance_transition(mut self, transition: Transition) -> Self {
        self.advance_transition = transition;
        self
    }

    pub fn snap_transition(mut self, transition: Transition) -> Self {
        self.snap_transition = transition;
        self
    }

    pub fn drag_transition(mut self, transition: Transition) -> Self {
        self.drag_transition = transition;
        self
    }

    pub fn fill_duration(mut self, duration: Duration) -> Self {
        self.fill_duration = duration;
        self
    }

    pub fn fill_delays(mut self, on_schedule: Duration, on_tick: Duration) -> Self {
        self.fill_delay_on_schedule = on_schedule;
        self.fill_delay_on_tick = on_tick;
        self
    }

    pub fn marquee(mut self, distance: f32, duration: Duration) -> Self {
        self.marquee_distance = distance;
        self.marquee_duration = duration;
        self
    }

    pub fn active_drag_threshold(mut self, threshold: f32) -> Self {
        self.active_drag_threshold = threshold;
        self
    }

    pub fn symbol_size(mut self, size: f32) -> Self {
        self.symbol_size = size;
        self
    }

    pub fn ticker_gutter(mut self, gutter: f32) -> Self {
        self.ticker_gutter = gutter;
        self
    }

    pub fn expand(mut self, timings: ExpandTimings) -> Self {
        self.expand = timings;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_advance_interval.is_zero() {
            return Err(ConfigError::ZeroInterval {
                name: "auto_advance_interval",
            });
        }
        if self.fill_duration.is_zero() {
            return Err(ConfigError::NonPositiveDuration {
                name: "fill_duration",
                value: 0.0,
            });
        }
        if self.marquee_duration.is_zero() {
            return Err(ConfigError::NonPositiveDuration {
                name: "marquee_duration",
                value: 0.0,
            });
        }
        self.advance_transition.validate("advance_transition")?;
        self.snap_transition.validate("snap_transition")?;
        self.drag_transition.validate("drag_transition")?;
        finite("marquee_distance", self.marquee_distance)?;
        finite("marquee_spacing", self.marquee_spacing)?;
        finite("active_drag_threshold", self.active_drag_threshold)?;
        finite("ticker_drag_parallax", self.ticker_drag_parallax)?;
        positive("symbol_size", self.symbol_size)?;
        finite("ticker_gutter", self.ticker_gutter)?;
        self.expand.validate()
    }
}
