//! Headless interaction state for a card → detail morph and an info ticker
//! carousel.
//!
//! Nothing here draws. Hosts feed each controller input events together
//! with a monotonic clock (`now: Duration`), call `process(now)` once per
//! frame, and read back presentation parameters, animated values and
//! one-way intents.
//!
//! ```
//! use std::time::Duration;
//! use cardmorph::prelude::*;
//!
//! let mut morph = TransitionController::default();
//! morph.select(1, Duration::ZERO);
//! assert_eq!(morph.drain_intents(), vec![PresentationIntent::Present(1)]);
//!
//! morph.scroll(-40.0, Duration::from_millis(600));
//! let chrome = morph.chrome();
//! assert_eq!(chrome.shadow_opacity, 1.0);
//! ```

pub mod animation;
pub mod carousel;
pub mod config;
pub mod error;
pub mod geometry;
pub mod timer;
pub mod transition;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::animation::{
        ease_rational, AnimatedValue, SpringConfig, TimingFunction, Transform, Transition,
    };
    pub use crate::carousel::{
        default_items, CarouselController, CarouselEvent, InfoSegment, LayoutMode, TickerItem,
    };
    pub use crate::config::{CarouselConfig, ConfigError, ExpandTimings, TransitionConfig};
    pub use crate::geometry::{Color, Rect};
    pub use crate::transition::{
        AnchorKey, AnchorRegistry, AnchorRole, AnchorSide, ChevronForeground, Phase,
        PresentationIntent, ScrollChrome, TransitionController, TransitionEvent,
    };
}
