//! Typed identities for the shared-element morph.
//!
//! The host renders a card twice: once in the list, once in the detail
//! overlay. Pieces that morph between the two carry the same [`AnchorKey`];
//! the registry remembers where each piece was laid out on both sides and
//! interpolates between them.

use std::collections::HashMap;
use std::fmt;

use crate::animation::Animatable;
use crate::geometry::Rect;

/// Which piece of a card an anchor names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnchorRole {
    Content,
    Title,
    Subtitle,
    Background,
    BackgroundStroke,
}

impl AnchorRole {
    pub const ALL: [AnchorRole; 5] = [
        AnchorRole::Content,
        AnchorRole::Title,
        AnchorRole::Subtitle,
        AnchorRole::Background,
        AnchorRole::BackgroundStroke,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnchorRole::Content => "content",
            AnchorRole::Title => "title",
            AnchorRole::Subtitle => "subtitle",
            AnchorRole::Background => "background",
            AnchorRole::BackgroundStroke => "backgroundStroke",
        }
    }
}

/// Identity of one morphing piece: its role on card `index`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorKey {
    pub role: AnchorRole,
    pub index: usize,
}

impl AnchorKey {
    pub fn new(role: AnchorRole, index: usize) -> Self {
        Self { role, index }
    }

    /// Every anchor of card `index`
    pub fn all_for(index: usize) -> impl Iterator<Item = AnchorKey> {
        AnchorRole::ALL
            .into_iter()
            .map(move |role| AnchorKey::new(role, index))
    }
}

/// Renders the flat tag (`content3`) for hosts that key on strings
impl fmt::Display for AnchorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role.as_str(), self.index)
    }
}

/// The two layouts a piece morphs between
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnchorSide {
    /// Summary card in the scrolling list
    List,
    /// Expanded card in the detail overlay
    Detail,
}

#[derive(Clone, Copy, Debug, Default)]
struct AnchorFrames {
    list: Option<Rect>,
    detail: Option<Rect>,
}

/// Frames recorded per anchor on both sides
#[derive(Clone, Debug, Default)]
pub struct AnchorRegistry {
    frames: HashMap<AnchorKey, AnchorFrames>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `key` was laid out on `side`, replacing any earlier frame
    pub fn record(&mut self, side: AnchorSide, key: AnchorKey, frame: Rect) {
        let entry = self.frames.entry(key).or_default();
        match side {
            AnchorSide::List => entry.list = Some(frame),
            AnchorSide::Detail => entry.detail = Some(frame),
        }
    }

    pub fn frame(&self, side: AnchorSide, key: AnchorKey) -> Option<Rect> {
        let entry = self.frames.get(&key)?;
        match side {
            AnchorSide::List => entry.list,
            AnchorSide::Detail => entry.detail,
        }
    }

    /// Forget the detail-side frames, e.g. once the overlay unmounts
    pub fn clear_side(&mut self, side: AnchorSide) {
        for entry in self.frames.values_mut() {
            match side {
                AnchorSide::List => entry.list = None,
                AnchorSide::Detail => entry.detail = None,
            }
        }
        self.frames
            .retain(|_, entry| entry.list.is_some() || entry.detail.is_some());
    }

    /// Drop every anchor of card `index`
    pub fn remove_card(&mut self, index: usize) {
        self.frames.retain(|key, _| key.index != index);
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame of `key` at morph `progress` (0 = list, 1 = detail).
    ///
    /// `None` until both sides have been recorded. Progress is not clamped,
    /// so spring overshoot carries through to the frame.
    pub fn interpolate(&self, key: AnchorKey, progress: f32) -> Option<Rect> {
        let entry = self.frames.get(&key)?;
        let (list, detail) = (entry.list?, entry.detail?);
        Some(Rect::lerp(&list, &detail, progress))
    }
}
