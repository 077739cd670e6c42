//! Scroll offset → detail chrome parameters.
//!
//! Offsets follow the detail scroll view's convention: 0 at rest, negative
//! once the content scrolls up past the top, positive while the user pulls
//! the content down (the dismiss gesture). Every function here is pure and
//! total over finite input; non-finite input reads as 0.

use crate::animation::{ease_rational, Transform};
use crate::geometry::{finite_or_zero, Color};

/// Chevron color switch point used by [`ScrollChrome::at`]
pub const DEFAULT_CONTRAST_OFFSET: f32 = 50.0;

/// Lowest scale the card shrinks back to before easing
pub const MIN_CONTENT_SCALE: f32 = 0.7;

/// How far the card follows the content upward
pub const MAX_CONTENT_LIFT: f32 = 42.0;

/// Foreground of the dismiss chevron
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChevronForeground {
    Black,
    White,
}

impl ChevronForeground {
    pub fn color(self) -> Color {
        match self {
            ChevronForeground::Black => Color::BLACK,
            ChevronForeground::White => Color::WHITE,
        }
    }
}

pub fn chevron_foreground(offset: f32, contrast_offset: f32) -> ChevronForeground {
    if finite_or_zero(offset) < contrast_offset {
        ChevronForeground::Black
    } else {
        ChevronForeground::White
    }
}

pub fn chevron_background_opacity(offset: f32) -> f32 {
    (finite_or_zero(offset) / 100.0).clamp(0.0, 1.0)
}

pub fn chevron_scale(offset: f32) -> f32 {
    (1.0 + finite_or_zero(offset) / 150.0).clamp(1.0, 1.5)
}

/// Degrees
pub fn chevron_rotation(offset: f32) -> f32 {
    finite_or_zero(offset).clamp(0.0, 90.0)
}

pub fn title_opacity(offset: f32) -> f32 {
    (finite_or_zero(offset) / 60.0).max(0.54)
}

pub fn header_offset_x(offset: f32) -> f32 {
    (finite_or_zero(offset) / 10.0).clamp(0.0, 10.0)
}

pub fn header_offset_y(offset: f32) -> f32 {
    -finite_or_zero(offset) / 2.0
}

/// Raw summary text opacity. Leaves [0, 1] for offsets above 0 or below -50;
/// renderers should use [`content_text_opacity_clamped`].
pub fn content_text_opacity(offset: f32) -> f32 {
    1.0 + finite_or_zero(offset) / 50.0
}

pub fn content_text_opacity_clamped(offset: f32) -> f32 {
    content_text_opacity(offset).clamp(0.0, 1.0)
}

pub fn content_text_offset_y(offset: f32) -> f32 {
    (-finite_or_zero(offset) * 2.0).max(0.0)
}

pub fn shadow_opacity(offset: f32) -> f32 {
    (-finite_or_zero(offset) / 30.0).clamp(0.0, 1.0)
}

pub fn gradient_opacity(offset: f32) -> f32 {
    (-finite_or_zero(offset) / 84.0).clamp(0.0, 1.0)
}

pub fn content_scale(offset: f32) -> f32 {
    ease_rational((1.0 + finite_or_zero(offset) * 0.005).clamp(MIN_CONTENT_SCALE, 1.0))
}

pub fn content_offset_y(offset: f32) -> f32 {
    finite_or_zero(offset).max(-MAX_CONTENT_LIFT)
}

/// Height of the spacer above the card's title block
pub fn spacer_height(offset: f32) -> f32 {
    (200.0 + finite_or_zero(offset) * 1.5).clamp(110.0, 200.0)
}

/// Base downward drift of the detail texts while pulling
pub fn detail_offset(offset: f32) -> f32 {
    finite_or_zero(offset).max(0.0)
}

/// Vertical offsets of the detail title, subtitle and body
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailOffsets {
    pub title: f32,
    pub subtitle: f32,
    pub body: f32,
}

/// Every derived chrome parameter for one scroll offset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollChrome {
    pub chevron_foreground: ChevronForeground,
    pub chevron_background_opacity: f32,
    pub chevron_scale: f32,
    pub chevron_rotation: f32,
    pub title_opacity: f32,
    pub header_offset_x: f32,
    pub header_offset_y: f32,
    pub content_text_opacity: f32,
    pub content_text_offset_y: f32,
    pub shadow_opacity: f32,
    pub gradient_opacity: f32,
    pub content_scale: f32,
    pub content_offset_y: f32,
    pub spacer_height: f32,
    pub detail_offsets: DetailOffsets,
}

impl ScrollChrome {
    /// Chrome at `offset` with the default chevron switch point
    pub fn at(offset: f32) -> Self {
        Self::with_contrast(offset, DEFAULT_CONTRAST_OFFSET)
    }

    pub fn with_contrast(offset: f32, contrast_offset: f32) -> Self {
        let detail = detail_offset(offset);
        Self {
            chevron_foreground: chevron_foreground(offset, contrast_offset),
            chevron_background_opacity: chevron_background_opacity(offset),
            chevron_scale: chevron_scale(offset),
            chevron_rotation: chevron_rotation(offset),
            title_opacity: title_opacity(offset),
            header_offset_x: header_offset_x(offset),
            header_offset_y: header_offset_y(offset),
            content_text_opacity: content_text_opacity(offset),
            content_text_offset_y: content_text_offset_y(offset),
            shadow_opacity: shadow_opacity(offset),
            gradient_opacity: gradient_opacity(offset),
            content_scale: content_scale(offset),
            content_offset_y: content_offset_y(offset),
            spacer_height: spacer_height(offset),
            detail_offsets: DetailOffsets {
                title: detail,
                subtitle: detail * 1.2,
                body: detail * 1.5,
            },
        }
    }

    /// Summary text opacity safe to hand to a renderer
    pub fn content_text_opacity_clamped(&self) -> f32 {
        self.content_text_opacity.clamp(0.0, 1.0)
    }

    /// The title label is padded by the same amount the header shifts
    pub fn title_leading_padding(&self) -> f32 {
        self.header_offset_x
    }

    /// Chevron grows and turns about its centre
    pub fn chevron_transform(&self) -> Transform {
        Transform::scale(self.chevron_scale).with_rotation(self.chevron_rotation)
    }

    pub fn header_transform(&self) -> Transform {
        Transform::translate(self.header_offset_x, self.header_offset_y)
    }

    /// Card shrinks toward its leading edge and follows the content
    pub fn content_transform(&self) -> Transform {
        Transform::scale(self.content_scale)
            .with_origin(Transform::LEADING.0, Transform::LEADING.1)
            .with_translation(0.0, self.content_offset_y)
    }
}

impl Default for ScrollChrome {
    fn default() -> Self {
        Self::at(0.0)
    }
}
