//! Info ticker carousel controller.
//!
//! A looping selector over `N >= 2` items driven by three inputs: a
//! repeating auto-advance timer, a horizontal drag, and a tap. All of them
//! go through the same queue and reducer, so a drag always cancels the timer
//! before anything else happens.
//!
//! The visual position is a float in index units. Crossing the loop seam
//! re-bases it onto a virtual slot (`-1` or `N`) first, so the pages keep
//! moving in the gesture's direction instead of rewinding across the row.
//!
//! ```text
//!  slot:   -1    0    1    2    3
//!  item:    2    0    1    2    0      (N = 3)
//! ```

mod expand;
mod item;
mod marquee;
mod progress;

use std::collections::VecDeque;
use std::time::Duration;

use bitflags::bitflags;

pub use expand::{ExpandSequence, ExpandStep, LayoutMode};
pub use item::{default_items, InfoSegment, TickerItem};
pub use marquee::Marquee;
pub use progress::ProgressFill;

use crate::animation::AnimatedValue;
use crate::config::CarouselConfig;
use crate::error::{Error, Result};
use crate::geometry::finite_or_zero;
use crate::timer::{TimerHandle, TimerQueue};

/// Input to the carousel
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarouselEvent {
    /// The widget appeared on screen
    Mount,
    /// The widget left the screen; every pending callback is dropped
    Unmount,
    /// Live horizontal drag translation
    DragChanged(f32),
    /// Drag released, with the platform's predicted end translation
    DragEnded { translation: f32, predicted: f32 },
    /// Tap on the ticker: advance by one
    Tap,
    /// Switch between the compact fan and the stacked list
    ToggleExpanded,
    /// Container width changed
    Resize(f32),
    /// Rendered width of an item's ticker row
    MeasureItem { index: usize, content_width: f32 },
}

bitflags! {
    /// What changed since the host last asked
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Current index changed
        const INDEX  = 0b001;
        /// A drag started or ended
        const DRAG   = 0b010;
        /// Expanded state or container width changed
        const LAYOUT = 0b100;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerEvent {
    AutoAdvance,
    FillKickoff,
    Expand(ExpandStep),
    ExpandSettled,
}

#[derive(Debug)]
pub struct CarouselController {
    config: CarouselConfig,
    items: Vec<TickerItem>,
    width: f32,
    mounted: bool,
    /// Logical index; only holds -1 or N inside a single operation
    current: i32,
    /// Item whose marquee is running
    active_item: usize,
    position: AnimatedValue<f32>,
    drag: Option<f32>,
    drag_visual: AnimatedValue<f32>,
    fill: ProgressFill,
    marquees: Vec<Marquee>,
    expand: ExpandSequence,
    events: VecDeque<CarouselEvent>,
    timers: TimerQueue<TimerEvent>,
    advance_timer: Option<TimerHandle>,
    fill_kickoff: Option<TimerHandle>,
    expand_timers: Vec<TimerHandle>,
    changes: ChangeFlags,
}

impl CarouselController {
    pub fn new(items: Vec<TickerItem>, width: f32, config: CarouselConfig) -> Result<Self> {
        config.validate()?;
        if items.len() < 2 {
            return Err(Error::TooFewItems(items.len()));
        }
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidWidth(width));
        }

        let marquees = items
            .iter()
            .map(|_| {
                Marquee::new(
                    config.marquee_distance,
                    config.marquee_duration,
                    config.marquee_spacing,
                )
            })
            .collect();

        Ok(Self {
            expand: ExpandSequence::new(config.expand.clone()),
            config,
            items,
            width,
            mounted: false,
            current: 0,
            active_item: 0,
            position: AnimatedValue::new(0.0),
            drag: None,
            drag_visual: AnimatedValue::new(0.0),
            fill: ProgressFill::new(),
            marquees,
            events: VecDeque::new(),
            timers: TimerQueue::new(),
            advance_timer: None,
            fill_kickoff: None,
            expand_timers: Vec::new(),
            changes: ChangeFlags::empty(),
        })
    }

    /// Carousel over the three shipped pages with the default config
    pub fn with_default_items(width: f32) -> Result<Self> {
        Self::new(default_items(), width, CarouselConfig::default())
    }

    /// Queue an input; it takes effect on the next [`process`](Self::process)
    pub fn dispatch(&mut self, event: CarouselEvent) {
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
    }

    pub fn mount(&mut self, now: Duration) {
        self.dispatch(CarouselEvent::Mount);
        self.process(now);
    }

    pub fn unmount(&mut self, now: Duration) {
        self.dispatch(CarouselEvent::Unmount);
        self.process(now);
    }

    pub fn drag_changed(&mut self, translation: f32, now: Duration) {
        self.dispatch(CarouselEvent::DragChanged(translation));
        self.process(now);
    }

    pub fn drag_ended(&mut self, translation: f32, predicted: f32, now: Duration) {
        self.dispatch(CarouselEvent::DragEnded {
            translation,
            predicted,
        });
        self.process(now);
    }

    pub fn tap(&mut self, now: Duration) {
        self.dispatch(CarouselEvent::Tap);
        self.process(now);
    }

    pub fn toggle_expanded(&mut self, now: Duration) {
        self.dispatch(CarouselEvent::ToggleExpanded);
        self.process(now);
    }

    pub fn resize(&mut self, width: f32, now: Duration) {
        self.dispatch(CarouselEvent::Resize(width));
        self.process(now);
    }

    pub fn measure_item(&mut self, index: usize, content_width: f32, now: Duration) {
        self.dispatch(CarouselEvent::MeasureItem {
            index,
            content_width,
        });
        self.process(now);
    }

    fn reduce(&mut self, event: CarouselEvent, now: Duration) {
        if !self.mounted && event != CarouselEvent::Mount {
            log::trace!("{:?} ignored while unmounted", event);
            return;
        }
        match event {
            CarouselEvent::Mount => self.on_mount(now),
            CarouselEvent::Unmount => self.on_unmount(),
            CarouselEvent::DragChanged(translation) => self.on_drag_change(translation, now),
            CarouselEvent::DragEnded {
                translation,
                predicted,
            } => self.on_drag_end(translation, predicted, now),
            CarouselEvent::Tap => {
                self.advance(now);
                self.schedule(now);
            }
            CarouselEvent::ToggleExpanded => self.on_toggle_expanded(now),
            CarouselEvent::Resize(width) => {
                if width.is_finite() && width > 0.0 {
                    if width != self.width {
                        self.width = width;
                        self.changes |= ChangeFlags::LAYOUT;
                    }
                } else {
                    log::warn!("ignoring invalid carousel width {}", width);
                }
            }
            CarouselEvent::MeasureItem {
                index,
                content_width,
            } => self.on_measure(index, content_width, now),
        }
    }

    fn on_mount(&mut self, now: Duration) {
        if self.mounted {
            return;
        }
        log::debug!("carousel mounted at item {}", self.current);
        self.mounted = true;
        self.schedule(now);
        self.active_item = self.current_index();
        self.marquees[self.active_item].restart(now);
    }

    fn on_unmount(&mut self) {
        log::debug!("carousel unmounted");
        self.mounted = false;
        self.timers.cancel_all();
        self.advance_timer = None;
        self.fill_kickoff = None;
        self.expand_timers.clear();
        self.expand.finish();
        self.fill.reset();
        for marquee in &mut self.marquees {
            marquee.stop();
        }
        if self.drag.take().is_some() {
            self.drag_visual.set_immediate(0.0);
            self.changes |= ChangeFlags::DRAG;
        }
        self.events.clear();
    }

    fn on_drag_change(&mut self, translation: f32, now: Duration) {
        let translation = finite_or_zero(translation);
        if self.drag.is_none() {
            log::debug!("drag started, pausing auto-advance");
            self.cancel_auto_advance();
            self.fill.reset();
            for marquee in &mut self.marquees {
                marquee.pause(self.config.drag_transition.clone(), now);
            }
            self.changes |= ChangeFlags::DRAG;
        }
        self.drag = Some(translation);
        self.drag_visual
            .animate_to(translation, self.config.drag_transition.clone(), now);
    }

    fn on_drag_end(&mut self, translation: f32, predicted: f32, now: Duration) {
        let len = self.len();
        let predicted = finite_or_zero(predicted);
        let change = (-predicted / self.width).round().clamp(-1.0, 1.0) as i32;
        log::debug!(
            "drag ended at {} (predicted {}), change {}",
            translation,
            predicted,
            change
        );

        if self.current + change == len {
            self.rebase(-1);
        } else if self.current + change == -1 {
            self.rebase(len);
        }
        self.set_current(self.current + change);
        self.position
            .animate_to(self.current as f32, self.config.snap_transition.clone(), now);

        self.drag = None;
        self.drag_visual
            .animate_to(0.0, self.config.snap_transition.clone(), now);
        self.changes |= ChangeFlags::DRAG;

        self.schedule(now);
        let active = self.current_index();
        for (index, marquee) in self.marquees.iter_mut().enumerate() {
            if index == active {
                marquee.restart(now);
            } else {
                marquee.stop();
            }
        }
        self.active_item = active;
    }

    /// Move one item forward, wrapping through the virtual slot
    fn advance(&mut self, now: Duration) {
        let len = self.len();
        if self.current == len - 1 {
            self.rebase(-1);
        }
        self.set_current((self.current + 1).rem_euclid(len));
        self.position.animate_to(
            self.current as f32,
            self.config.advance_transition.clone(),
            now,
        );
        self.activate_marquee(now);
    }

    /// Jump the logical index to the equivalent virtual slot, carrying the
    /// animated position along so nothing visibly moves
    fn rebase(&mut self, slot: i32) {
        let delta = slot - self.current;
        log::trace!("rebasing index {} onto slot {}", self.current, slot);
        self.current = slot;
        self.position.shift(delta as f32);
    }

    fn set_current(&mut self, index: i32) {
        let index = index.rem_euclid(self.len());
        if index != self.current {
            self.changes |= ChangeFlags::INDEX;
        }
        self.current = index;
    }

    fn activate_marquee(&mut self, now: Duration) {
        let active = self.current_index();
        if active != self.active_item {
            self.marquees[self.active_item].stop();
            self.active_item = active;
        }
        self.marquees[active].restart(now);
    }

    /// (Re)arm the auto-advance timer and restart the fill from empty.
    /// Never arms mid-drag or mid expand sequence; both re-arm when they end.
    fn schedule(&mut self, now: Duration) {
        if self.drag.is_some() || self.expand.is_running() {
            return;
        }
        self.cancel_auto_advance();
        self.fill.reset();
        self.fill_kickoff = Some(self.timers.schedule_after(
            now,
            self.config.fill_kickoff_delay,
            TimerEvent::FillKickoff,
        ));
        self.advance_timer = Some(self.timers.schedule_repeating(
            now,
            self.config.auto_advance_interval,
            TimerEvent::AutoAdvance,
        ));
    }

    fn cancel_auto_advance(&mut self) {
        if let Some(handle) = self.advance_timer.take() {
            self.timers.cancel(handle);
        }
        if let Some(handle) = self.fill_kickoff.take() {
            self.timers.cancel(handle);
        }
    }

    fn on_toggle_expanded(&mut self, now: Duration) {
        let Some(steps) = self.expand.begin(now) else {
            log::trace!("expand toggle ignored, sequence in flight");
            return;
        };
        self.cancel_auto_advance();
        for (delay, step) in steps {
            self.expand_timers
                .push(self.timers.schedule_after(now, delay, TimerEvent::Expand(step)));
        }
        if let Some(total) = self.expand.total() {
            self.expand_timers
                .push(self.timers.schedule_after(now, total, TimerEvent::ExpandSettled));
        }
    }

    fn on_measure(&mut self, index: usize, content_width: f32, now: Duration) {
        let width = self.width;
        let Some(marquee) = self.marquees.get_mut(index) else {
            log::warn!("measured unknown item {}", index);
            return;
        };
        let active = index == self.active_item && self.drag.is_none();
        if marquee.measure(content_width, width) && active {
            marquee.restart(now);
        }
    }

    fn on_timer(&mut self, handle: TimerHandle, event: TimerEvent, at: Duration) {
        match event {
            TimerEvent::AutoAdvance => {
                if self.advance_timer != Some(handle) || self.drag.is_some() {
                    log::trace!("stale auto-advance {:?} dropped", handle);
                    return;
                }
                log::debug!("auto-advance from item {}", self.current);
                self.advance(at);
                self.fill
                    .restart(at, self.config.fill_duration, self.config.fill_delay_on_tick);
            }
            TimerEvent::FillKickoff => {
                if self.fill_kickoff != Some(handle) {
                    return;
                }
                self.fill_kickoff = None;
                self.fill.restart(
                    at,
                    self.config.fill_duration,
                    self.config.fill_delay_on_schedule,
                );
            }
            TimerEvent::Expand(step) => {
                if !self.take_expand_timer(handle) {
                    return;
                }
                if step == ExpandStep::Layout {
                    self.changes |= ChangeFlags::LAYOUT;
                }
                self.expand.apply(step, at);
            }
            TimerEvent::ExpandSettled => {
                if !self.take_expand_timer(handle) {
                    return;
                }
                self.expand.finish();
                log::debug!(
                    "ticker settled {}",
                    if self.expand.is_expanded() { "expanded" } else { "collapsed" }
                );
                self.schedule(at);
            }
        }
    }

    fn take_expand_timer(&mut self, handle: TimerHandle) -> bool {
        let before = self.expand_timers.len();
        self.expand_timers.retain(|pending| *pending != handle);
        self.expand_timers.len() != before
    }

    fn len(&self) -> i32 {
        self.items.len() as i32
    }

    /// Current item, always in `0..N`
    pub fn current_index(&self) -> usize {
        self.current.rem_euclid(self.len()) as usize
    }

    pub fn items(&self) -> &[TickerItem] {
        &self.items
    }

    pub fn current_item(&self) -> &TickerItem {
        &self.items[self.current_index()]
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Raw drag translation, if a drag is in progress
    pub fn drag_offset(&self) -> Option<f32> {
        self.drag
    }

    /// Whether the auto-advance timer is armed
    pub fn auto_advance_scheduled(&self) -> bool {
        self.advance_timer
            .is_some_and(|handle| self.timers.is_scheduled(handle))
    }

    /// Number of armed auto-advance timers (zero or one)
    pub fn auto_advance_timers(&self) -> usize {
        self.timers
            .events()
            .filter(|event| **event == TimerEvent::AutoAdvance)
            .count()
    }

    /// Visual position in index units; may sit on a virtual slot mid-flight
    pub fn position(&mut self, now: Duration) -> f32 {
        self.position.sample(now)
    }

    /// Smoothed drag translation
    pub fn drag_visual(&mut self, now: Duration) -> f32 {
        self.drag_visual.sample(now)
    }

    /// Slots to render, including one virtual slot on each side
    pub fn slots(&self) -> std::ops::RangeInclusive<i32> {
        -1..=self.len()
    }

    /// Item shown in `slot`
    pub fn slot_item(&self, slot: i32) -> usize {
        (self.len() + slot).rem_euclid(self.len()) as usize
    }

    /// Horizontal offset of the header in `slot`
    pub fn header_offset(&mut self, slot: i32, now: Duration) -> f32 {
        let position = self.position.sample(now);
        let drag = self.drag_visual.sample(now);
        (self.width - self.config.symbol_size) * (slot as f32 - position) + drag
    }

    /// Horizontal offset of the ticker row in `slot`; rows follow the finger
    /// faster than headers
    pub fn ticker_offset(&mut self, slot: i32, now: Duration) -> f32 {
        let position = self.position.sample(now);
        let drag = self.drag_visual.sample(now);
        (self.width + self.config.ticker_gutter) * (slot as f32 - position)
            + drag * self.config.ticker_drag_parallax
    }

    /// Index the user is looking at: the current one, or its neighbour once
    /// a drag has gone far enough
    fn effective_index(&self) -> i32 {
        match self.drag {
            Some(drag) if drag.abs() > self.config.active_drag_threshold => {
                self.current - drag.signum() as i32
            }
            _ => self.current,
        }
    }

    pub fn is_slot_active(&self, slot: i32) -> bool {
        let item = self.slot_item(slot) as i32;
        let effective = self.effective_index();
        let last = self.len() - 1;
        item == effective
            || (item == last && effective == -1)
            || (item == 0 && effective == last + 1)
    }

    /// Header labels show on the active page, and on every page mid-drag
    pub fn header_label_visible(&self, slot: i32) -> bool {
        self.is_slot_active(slot) || self.is_dragging()
    }

    /// Fill of item `index`'s progress capsule
    pub fn indicator_fill(&mut self, index: usize, now: Duration) -> f32 {
        if index == self.current_index() {
            self.fill.sample(now)
        } else {
            0.0
        }
    }

    pub fn marquee(&self, index: usize) -> Option<&Marquee> {
        self.marquees.get(index)
    }

    pub fn marquee_offset(&mut self, index: usize, now: Duration) -> f32 {
        self.marquees
            .get_mut(index)
            .map_or(0.0, |marquee| marquee.offset(now))
    }

    pub fn is_expanded(&self) -> bool {
        self.expand.is_expanded()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.expand.layout_mode()
    }

    pub fn is_expand_running(&self) -> bool {
        self.expand.is_running()
    }

    /// Cross-fade opacity of the whole ticker
    pub fn content_opacity(&mut self, now: Duration) -> f32 {
        self.expand.opacity(now)
    }

    /// 0 in the fan layout, 1 stacked
    pub fn posture(&mut self, now: Duration) -> f32 {
        self.expand.posture(now)
    }

    /// 1 while rows are clipped to a single line
    pub fn single_row(&mut self, now: Duration) -> f32 {
        self.expand.single_row(now)
    }

    /// True while anything would still move without new input
    pub fn is_animating(&self) -> bool {
        self.position.is_animating()
            || self.drag_visual.is_animating()
            || self.fill.is_filling()
            || self.marquees.iter().any(Marquee::is_scrolling)
            || !self.timers.is_empty()
    }

    /// Earliest time [`process`](Self::process) has timer work to do
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Return and clear the accumulated change flags
    pub fn take_changes(&mut self) -> ChangeFlags {
        std::mem::replace(&mut self.changes, ChangeFlags::empty())
    }
}
