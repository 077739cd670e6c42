//! Per-widget timer queue.
//!
//! Each controller owns one queue. Timers are identified by handles that are
//! never reused, so once a handle is cancelled nothing can ever fire under
//! it again, even if its deadline already passed. Tearing a widget down is a
//! single [`TimerQueue::cancel_all`].
//!
//! Time is host-supplied (`Duration` since some fixed origin); the queue
//! never reads a clock on its own.

use std::time::Duration;

/// Identifies one scheduled timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A timer whose deadline has been reached
#[derive(Clone, Debug, PartialEq)]
pub struct Expired<E> {
    pub handle: TimerHandle,
    /// When the timer was due (may be earlier than the polling time)
    pub deadline: Duration,
    pub event: E,
}

#[derive(Debug)]
struct Timer<E> {
    handle: TimerHandle,
    deadline: Duration,
    interval: Option<Duration>,
    event: E,
}

/// Single-threaded queue of one-shot and repeating timers
#[derive(Debug)]
pub struct TimerQueue<E> {
    timers: Vec<Timer<E>>,
    next_id: u64,
}

impl<E: Clone> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate(&mut self) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        handle
    }

    /// Fire `event` once, `delay` after `now`
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, event: E) -> TimerHandle {
        let handle = self.allocate();
        log::trace!("timer {:?} scheduled at {:?} (+{:?})", handle, now, delay);
        self.timers.push(Timer {
            handle,
            deadline: now + delay,
            interval: None,
            event,
        });
        handle
    }

    /// Fire `event` every `interval`, first at `now + interval`
    pub fn schedule_repeating(
        &mut self,
        now: Duration,
        interval: Duration,
        event: E,
    ) -> TimerHandle {
        // A zero period would fire unboundedly often per poll
        let interval = interval.max(Duration::from_millis(1));
        let handle = self.allocate();
        log::trace!("repeating timer {:?} every {:?}", handle, interval);
        self.timers.push(Timer {
            handle,
            deadline: now + interval,
            interval: Some(interval),
            event,
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        let cancelled = self.timers.len() != before;
        if cancelled {
            log::trace!("timer {:?} cancelled", handle);
        }
        cancelled
    }

    /// Cancel every pending timer
    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            log::trace!("cancelling {} pending timers", self.timers.len());
        }
        self.timers.clear();
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Events of every pending timer, in scheduling order
    pub fn events(&self) -> impl Iterator<Item = &E> {
        self.timers.iter().map(|timer| &timer.event)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|timer| timer.deadline).min()
    }

    /// Remove and return the earliest timer due at or before `now`.
    ///
    /// Ties go to the timer scheduled first. Repeating timers are re-armed
    /// one interval after their previous deadline. Callers that react to
    /// each expiry should pop one at a time, so that cancellations made
    /// while handling one expiry apply to the rest.
    pub fn pop_due(&mut self, now: Duration) -> Option<Expired<E>> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.handle.0))
            .map(|(position, _)| position)?;

        let timer = &mut self.timers[position];
        let expired = Expired {
            handle: timer.handle,
            deadline: timer.deadline,
            event: timer.event.clone(),
        };

        match timer.interval {
            Some(interval) => timer.deadline += interval,
            None => {
                self.timers.remove(position);
            }
        }

        Some(expired)
    }

    /// Drain every expiry due at or before `now`, in deadline order
    pub fn poll(&mut self, now: Duration) -> Vec<Expired<E>> {
        std::iter::from_fn(|| self.pop_due(now)).collect()
    }
}

impl<E: Clone> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: f32) -> Duration {
        Duration::from_secs_f32(value)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(secs(0.0), secs(0.55), "teardown");
        assert!(queue.poll(secs(0.5)).is_empty());
        let fired = queue.poll(secs(0.6));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].event, "teardown");
        assert_eq!(fired[0].deadline, secs(0.55));
        assert!(queue.poll(secs(10.0)).is_empty());
    }

    #[test]
    fn test_cancelled_handle_never_fires() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_after(secs(0.0), secs(1.0), 1);
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert!(queue.poll(secs(5.0)).is_empty());
    }

    #[test]
    fn test_repeating_fires_per_interval() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_repeating(secs(0.0), secs(6.0), "tick");
        let fired = queue.poll(secs(18.5));
        assert_eq!(fired.len(), 3);
        assert_eq!(fired[2].deadline, secs(18.0));
        assert!(queue.is_scheduled(handle));
        assert_eq!(queue.next_deadline(), Some(secs(24.0)));
    }

    #[test]
    fn test_order_is_deadline_then_schedule_order() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(secs(0.0), secs(2.0), 'c');
        queue.schedule_after(secs(0.0), secs(1.0), 'a');
        queue.schedule_after(secs(0.0), secs(1.0), 'b');
        let order: Vec<char> = queue.poll(secs(3.0)).into_iter().map(|e| e.event).collect();
        assert_eq!(order, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_cancel_between_pops_applies() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(secs(0.0), secs(1.0), 1);
        let second = queue.schedule_after(secs(0.0), secs(2.0), 2);
        let first = queue.pop_due(secs(3.0));
        assert_eq!(first.map(|e| e.event), Some(1));
        queue.cancel(second);
        assert!(queue.pop_due(secs(3.0)).is_none());
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TimerQueue::new();
        queue.schedule_after(secs(0.0), secs(1.0), ());
        queue.schedule_repeating(secs(0.0), secs(1.0), ());
        assert_eq!(queue.pending(), 2);
        queue.cancel_all();
        assert!(queue.is_empty());
        assert!(queue.poll(secs(10.0)).is_empty());
    }
}
