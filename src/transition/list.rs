//! Appearance of the list screen behind the detail overlay.
//!
//! These are targets; the host animates toward them with the same spring
//! that drives the morph.

/// Blur radius applied to everything the selection pushes back
pub const BACKDROP_BLUR: f32 = 5.0;

/// How far the screen header sinks while a card is open
pub const HEADER_SINK: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardAppearance {
    pub blur: f32,
    pub opacity: f32,
}

impl CardAppearance {
    pub const REST: Self = Self {
        blur: 0.0,
        opacity: 1.0,
    };

    pub const HIDDEN: Self = Self {
        blur: BACKDROP_BLUR,
        opacity: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderAppearance {
    pub offset_y: f32,
    pub blur: f32,
    pub opacity: f32,
}

/// Card `index` while `selected` is the open card (if any)
pub fn card_appearance(index: usize, selected: Option<usize>) -> CardAppearance {
    match selected {
        Some(open) if open != index => CardAppearance::HIDDEN,
        _ => CardAppearance::REST,
    }
}

pub fn header_appearance(selected: Option<usize>) -> HeaderAppearance {
    if selected.is_some() {
        HeaderAppearance {
            offset_y: HEADER_SINK,
            blur: BACKDROP_BLUR,
            opacity: 0.0,
        }
    } else {
        HeaderAppearance {
            offset_y: 0.0,
            blur: 0.0,
            opacity: 1.0,
        }
    }
}

/// The summary subtitle hides on every card while one is open; the detail
/// view never shows it either, so it fades rather than morphs.
pub fn summary_subtitle_opacity(selected: Option<usize>) -> f32 {
    if selected.is_some() {
        0.0
    } else {
        1.0
    }
}
