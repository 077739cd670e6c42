//! Card → detail morph controller.
//!
//! One controller per list screen. Inputs (card taps, detail scroll
//! offsets, chevron taps) are queued with [`TransitionController::dispatch`]
//! and reduced in order by [`TransitionController::process`], together with
//! the controller's own timers. The controller is the only owner of whether
//! the detail overlay is presented; it tells the host through
//! [`PresentationIntent`]s and never expects the host to write back.
//!
//! ```text
//! Idle ──select──▶ Opening ──settled──▶ Open
//!   ▲                 │                  │
//!   │                 └──────dismiss─────┤
//!   │                                    ▼
//!   └─────────────teardown delay──── Closing
//! ```

mod anchor;
pub mod chrome;
pub mod list;

use std::collections::VecDeque;
use std::time::Duration;

use bitflags::bitflags;

pub use anchor::{AnchorKey, AnchorRegistry, AnchorRole, AnchorSide};
pub use chrome::{ChevronForeground, DetailOffsets, ScrollChrome};

use crate::animation::AnimatedValue;
use crate::config::TransitionConfig;
use crate::error::Result;
use crate::geometry::{finite_or_zero, Color};
use crate::timer::{TimerHandle, TimerQueue};

/// Lifecycle of the detail overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// List only, nothing selected
    #[default]
    Idle,
    /// Card `index` is morphing into the detail view
    Opening(usize),
    /// Detail view for card `index` is fully presented
    Open(usize),
    /// Detail view for card `index` is animating out
    Closing(usize),
}

impl Phase {
    /// Card the overlay belongs to, if any
    pub fn index(self) -> Option<usize> {
        match self {
            Phase::Idle => None,
            Phase::Opening(index) | Phase::Open(index) | Phase::Closing(index) => Some(index),
        }
    }

    /// Opening or Open: scroll gestures can still dismiss
    pub fn accepts_dismiss(self) -> bool {
        matches!(self, Phase::Opening(_) | Phase::Open(_))
    }
}

/// Input to the controller
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionEvent {
    /// A summary card was tapped
    Select(usize),
    /// The detail scroll view reported a new top offset
    Scroll(f32),
    /// The detail scroll view reported a new bottom edge position
    BottomOffset(f32),
    /// The chevron was tapped
    DismissTap,
    /// The host tore the whole screen down
    Unmount,
}

/// One-way instruction to the presentation host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationIntent {
    /// Mount the detail overlay for card `index`
    Present(usize),
    /// Overlay for `index` started animating out; keep it mounted
    BeginDismiss(usize),
    /// Animation finished; the overlay for `index` can be removed
    Unmount(usize),
}

bitflags! {
    /// What changed since the host last asked
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Selected card changed
        const SELECTION = 0b001;
        /// Scroll-derived chrome changed
        const SCROLL    = 0b010;
        /// Lifecycle phase changed
        const PHASE     = 0b100;
    }
}

/// Snapshot of the observable state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    pub selected_index: Option<usize>,
    pub scroll_offset: f32,
    pub is_animating_out: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerEvent {
    OpeningSettled,
    Teardown,
}

#[derive(Debug)]
pub struct TransitionController {
    config: TransitionConfig,
    phase: Phase,
    scroll_offset: f32,
    bottom_offset: f32,
    is_animating_out: bool,
    /// 0 = card in the list, 1 = detail fully presented
    appear: AnimatedValue<f32>,
    chevron_color: AnimatedValue<Color>,
    events: VecDeque<TransitionEvent>,
    timers: TimerQueue<TimerEvent>,
    settle_timer: Option<TimerHandle>,
    teardown_timer: Option<TimerHandle>,
    intents: Vec<PresentationIntent>,
    changes: ChangeFlags,
}

impl TransitionController {
    pub fn new(config: TransitionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: TransitionConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            scroll_offset: 0.0,
            bottom_offset: 0.0,
            is_animating_out: false,
            appear: AnimatedValue::new(0.0),
            chevron_color: AnimatedValue::new(ChevronForeground::Black.color()),
            events: VecDeque::new(),
            timers: TimerQueue::new(),
            settle_timer: None,
            teardown_timer: None,
            intents: Vec::new(),
            changes: ChangeFlags::empty(),
        }
    }

    /// Queue an input; it takes effect on the next [`process`](Self::process)
    pub fn dispatch(&mut self, event: TransitionEvent) {
        self.events.push_back(event);
    }

    /// Fire timers due by `now`, then reduce every queued input at `now`.
    pub fn process(&mut self, now: Duration) {
        while let Some(expired) = self.timers.pop_due(now) {
            self.on_timer(expired.handle, expired.event, expired.deadline);
        }
        while let Some(event) = self.events.pop_front() {
            self.reduce(event, now);
        }
        self.appear.advance(now);
        self.chevron_color.advance(now);
    }

    pub fn select(&mut self, index: usize, now: Duration) {
        self.dispatch(TransitionEvent::Select(index));
        self.process(now);
    }

    pub fn scroll(&mut self, offset: f32, now: Duration) {
        self.dispatch(TransitionEvent::Scroll(offset));
        self.process(now);
    }

    /// Tap-to-dismiss; same path as pulling past the threshold
    pub fn dismiss(&mut self, now: Duration) {
        self.dispatch(TransitionEvent::DismissTap);
        self.process(now);
    }

    pub fn unmount(&mut self, now: Duration) {
        self.dispatch(TransitionEvent::Unmount);
        self.process(now);
    }

    fn reduce(&mut self, event: TransitionEvent, now: Duration) {
        match event {
            TransitionEvent::Select(index) => self.on_select(index, now),
            TransitionEvent::Scroll(offset) => self.on_scroll(offset, now),
            TransitionEvent::BottomOffset(offset) => {
                if self.phase.index().is_some() {
                    self.bottom_offset = finite_or_zero(offset);
                }
            }
            TransitionEvent::DismissTap => self.begin_dismiss(now),
            TransitionEvent::Unmount => self.teardown_now(),
        }
    }

    fn on_select(&mut self, index: usize, now: Duration) {
        if self.phase != Phase::Idle {
            log::debug!("select({}) ignored while {:?}", index, self.phase);
            return;
        }
        log::debug!("opening card {}", index);
        self.set_phase(Phase::Opening(index));
        self.changes |= ChangeFlags::SELECTION;
        self.appear
            .animate_to(1.0, self.config.present_transition.clone(), now);
        self.settle_timer = Some(self.timers.schedule_after(
            now,
            self.config.present_transition.total(),
            TimerEvent::OpeningSettled,
        ));
        self.intents.push(PresentationIntent::Present(index));
    }

    fn on_scroll(&mut self, offset: f32, now: Duration) {
        if self.phase.index().is_none() {
            log::trace!("scroll {} ignored without a selection", offset);
            return;
        }
        let offset = finite_or_zero(offset);
        if offset != self.scroll_offset {
            let previous = chrome::chevron_foreground(
                self.scroll_offset,
                self.config.chevron_contrast_offset,
            );
            self.scroll_offset = offset;
            self.changes |= ChangeFlags::SCROLL;

            let foreground =
                chrome::chevron_foreground(offset, self.config.chevron_contrast_offset);
            if foreground != previous {
                self.chevron_color.animate_to(
                    foreground.color(),
                    self.config.chevron_color_transition.clone(),
                    now,
                );
            }
        }

        if offset > self.config.dismiss_threshold && self.phase.accepts_dismiss() {
            log::debug!(
                "pull {} past dismiss threshold {}",
                offset,
                self.config.dismiss_threshold
            );
            self.begin_dismiss(now);
        }
    }

    fn begin_dismiss(&mut self, now: Duration) {
        let index = match self.phase {
            Phase::Opening(index) | Phase::Open(index) => index,
            phase => {
                log::trace!("dismiss ignored while {:?}", phase);
                return;
            }
        };

        if let Some(handle) = self.settle_timer.take() {
            self.timers.cancel(handle);
        }
        log::debug!("dismissing card {}", index);
        self.set_phase(Phase::Closing(index));
        self.is_animating_out = true;
        self.appear
            .animate_to(0.0, self.config.dismiss_transition.clone(), now);
        self.teardown_timer = Some(self.timers.schedule_after(
            now,
            self.config.teardown_delay,
            TimerEvent::Teardown,
        ));
        self.intents.push(PresentationIntent::BeginDismiss(index));
    }

    fn on_timer(&mut self, handle: TimerHandle, event: TimerEvent, at: Duration) {
        match event {
            TimerEvent::OpeningSettled => {
                if self.settle_timer != Some(handle) {
                    return;
                }
                self.settle_timer = None;
                if let Phase::Opening(index) = self.phase {
                    self.appear.advance(at);
                    self.set_phase(Phase::Open(index));
                }
            }
            TimerEvent::Teardown => {
                if self.teardown_timer != Some(handle) {
                    return;
                }
                self.teardown_timer = None;
                if let Phase::Closing(index) = self.phase {
                    log::debug!("card {} torn down", index);
                    self.clear_selection();
                    self.intents.push(PresentationIntent::Unmount(index));
                }
            }
        }
    }

    /// Host-driven teardown: cancel everything pending, return to Idle
    fn teardown_now(&mut self) {
        self.timers.cancel_all();
        self.settle_timer = None;
        self.teardown_timer = None;
        if self.phase != Phase::Idle {
            log::debug!("unmounted while {:?}", self.phase);
            self.clear_selection();
        }
        self.events.clear();
    }

    fn clear_selection(&mut self) {
        self.set_phase(Phase::Idle);
        self.changes |= ChangeFlags::SELECTION;
        if self.scroll_offset != 0.0 {
            self.changes |= ChangeFlags::SCROLL;
        }
        self.scroll_offset = 0.0;
        self.bottom_offset = 0.0;
        self.is_animating_out = false;
        self.appear.set_immediate(0.0);
        self.chevron_color
            .set_immediate(ChevronForeground::Black.color());
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::trace!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.changes |= ChangeFlags::PHASE;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.phase.index()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// Last reported bottom edge of the detail content
    pub fn bottom_offset(&self) -> f32 {
        self.bottom_offset
    }

    pub fn is_animating_out(&self) -> bool {
        self.is_animating_out
    }

    pub fn state(&self) -> TransitionState {
        TransitionState {
            selected_index: self.selected_index(),
            scroll_offset: self.scroll_offset,
            is_animating_out: self.is_animating_out,
        }
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Chrome for the current offset
    pub fn chrome(&self) -> ScrollChrome {
        ScrollChrome::with_contrast(self.scroll_offset, self.config.chevron_contrast_offset)
    }

    /// Morph progress at `now`: 0 in the list, 1 fully presented. May
    /// overshoot with the spring. Feed it to
    /// [`AnchorRegistry::interpolate`].
    pub fn appear_progress(&mut self, now: Duration) -> f32 {
        self.appear.sample(now)
    }

    /// Whether the detail header row should be laid out (it slides in from
    /// the top while appearing and out while closing)
    pub fn shows_detail_header(&self) -> bool {
        matches!(self.phase, Phase::Opening(_) | Phase::Open(_))
    }

    /// The detail body slides up from `detail_travel` below its resting place
    pub fn detail_body_offset_y(&mut self, now: Duration) -> f32 {
        (1.0 - self.appear.sample(now)) * self.config.detail_travel
    }

    pub fn chevron_color(&mut self, now: Duration) -> Color {
        self.chevron_color.sample(now)
    }

    /// True while anything would still move without new input
    pub fn is_animating(&self) -> bool {
        self.appear.is_animating() || self.chevron_color.is_animating() || !self.timers.is_empty()
    }

    /// Earliest time [`process`](Self::process) has timer work to do
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn drain_intents(&mut self) -> Vec<PresentationIntent> {
        std::mem::take(&mut self.intents)
    }

    /// Return and clear the accumulated change flags
    pub fn take_changes(&mut self) -> ChangeFlags {
        std::mem::replace(&mut self.changes, ChangeFlags::empty())
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::with_valid_config(TransitionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn open_card(index: usize) -> TransitionController {
        let mut controller = TransitionController::default();
        controller.select(index, ms(0));
        controller.process(ms(600));
        controller
    }

    #[test]
    fn test_select_presents_and_settles() {
        let mut controller = TransitionController::default();
        controller.select(2, ms(0));
        assert_eq!(controller.phase(), Phase::Opening(2));
        assert_eq!(controller.drain_intents(), vec![PresentationIntent::Present(2)]);

        controller.process(ms(549));
        assert_eq!(controller.phase(), Phase::Opening(2));
        controller.process(ms(550));
        assert_eq!(controller.phase(), Phase::Open(2));
    }

    #[test]
    fn test_select_while_open_is_ignored() {
        let mut controller = open_card(1);
        controller.select(3, ms(700));
        assert_eq!(controller.selected_index(), Some(1));
    }

    #[test]
    fn test_scroll_without_selection_is_ignored() {
        let mut controller = TransitionController::default();
        controller.scroll(-80.0, ms(0));
        assert_eq!(controller.scroll_offset(), 0.0);
        assert!(controller.take_changes().is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut controller = open_card(0);
        controller.scroll(130.0, ms(700));
        assert_eq!(controller.phase(), Phase::Open(0));
        controller.scroll(130.5, ms(710));
        assert_eq!(controller.phase(), Phase::Closing(0));
        assert!(controller.is_animating_out());
    }

    #[test]
    fn test_two_phase_teardown() {
        let mut controller = open_card(0);
        controller.drain_intents();
        controller.dismiss(ms(1000));
        assert_eq!(controller.selected_index(), Some(0));
        assert_eq!(
            controller.drain_intents(),
            vec![PresentationIntent::BeginDismiss(0)]
        );

        controller.process(ms(1549));
        assert_eq!(controller.selected_index(), Some(0));
        controller.process(ms(1550));
        assert_eq!(controller.state().selected_index, None);
        assert!(!controller.is_animating_out());
        assert_eq!(controller.drain_intents(), vec![PresentationIntent::Unmount(0)]);
    }

    #[test]
    fn test_dismiss_during_opening_cancels_settle() {
        let mut controller = TransitionController::default();
        controller.select(1, ms(0));
        controller.dismiss(ms(200));
        controller.process(ms(600));
        assert_eq!(controller.phase(), Phase::Closing(1));
        controller.process(ms(750));
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_unmount_cancels_teardown() {
        let mut controller = open_card(0);
        controller.dismiss(ms(1000));
        controller.unmount(ms(1100));
        controller.drain_intents();
        controller.process(ms(5000));
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(controller.drain_intents().is_empty());
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn test_selection_clear_resets_offset() {
        let mut controller = open_card(0);
        controller.scroll(-40.0, ms(700));
        controller.dismiss(ms(800));
        controller.process(ms(2000));
        assert_eq!(controller.scroll_offset(), 0.0);
        assert_eq!(controller.chrome(), ScrollChrome::at(0.0));
    }

    #[test]
    fn test_chevron_color_animates_across_contrast_point() {
        let mut controller = open_card(0);
        controller.scroll(60.0, ms(1000));
        assert_eq!(controller.chevron_color(ms(1000)), Color::BLACK);
        assert_eq!(controller.chevron_color(ms(2000)), Color::WHITE);
    }

    #[test]
    fn test_change_flags() {
        let mut controller = TransitionController::default();
        controller.select(0, ms(0));
        assert_eq!(
            controller.take_changes(),
            ChangeFlags::SELECTION | ChangeFlags::PHASE
        );
        controller.scroll(-10.0, ms(10));
        assert_eq!(controller.take_changes(), ChangeFlags::SCROLL);
        controller.scroll(-10.0, ms(20));
        assert!(controller.take_changes().is_empty());
    }

    #[test]
    fn test_detail_body_travels_in() {
        let mut controller = TransitionController::default();
        controller.select(0, ms(0));
        assert_eq!(controller.detail_body_offset_y(ms(0)), 844.0);
        assert!(controller.detail_body_offset_y(ms(3000)).abs() < 1e-3);
    }
}
