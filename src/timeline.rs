//! Deterministic virtual timer queue.
//!
//! Every delayed action in the crate (debounce windows, blur grace periods,
//! notice stagger/visible/exit phases) is scheduled on a [`Timeline`] instead
//! of a wall-clock timer. Hosts advance the timeline by elapsed real time;
//! tests advance it by exact tick counts and observe the same firing order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Abstract time unit. The TUI host maps one tick to one millisecond.
pub type Tick = u64;

/// Handle for a scheduled event, used to cancel it before it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Scheduled<E> {
    fire_at: Tick,
    seq: u64,
    id: TimerId,
    event: E,
}

// Ordering ignores the payload: earliest deadline first, then schedule order.
// BinaryHeap is a max-heap, so comparisons are reversed.
impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.fire_at, other.seq).cmp(&(self.fire_at, self.seq))
    }
}

/// Single-owner timer queue delivering events of type `E`.
///
/// Guarantees: events fire in (deadline, schedule-order) order; two events
/// armed for the same deadline fire FIFO; a cancelled timer never fires.
pub struct Timeline<E> {
    now: Tick,
    next_seq: u64,
    queue: BinaryHeap<Scheduled<E>>,
    cancelled: HashSet<TimerId>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Current virtual time. During [`advance`](Self::advance) delivery this
    /// reflects each event's own fire time.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Arms a timer `delay` ticks from now.
    pub fn schedule(&mut self, delay: Tick, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = TimerId(seq);
        self.queue.push(Scheduled {
            fire_at: self.now.saturating_add(delay),
            seq,
            id,
            event,
        });
        id
    }

    /// Cancels a pending timer. Returns false if it already fired, was
    /// already cancelled, or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if self.queue.iter().any(|s| s.id == id) && !self.cancelled.contains(&id) {
            self.cancelled.insert(id);
            true
        } else {
            false
        }
    }

    /// Deadline of the next live timer, if any. Hosts use this to size their
    /// poll timeout instead of spinning.
    pub fn next_deadline(&self) -> Option<Tick> {
        // The heap peek may be a cancelled entry; scan for the earliest live one.
        self.queue
            .iter()
            .filter(|s| !self.cancelled.contains(&s.id))
            .map(|s| s.fire_at)
            .min()
    }

    /// Moves time forward by `ticks`, returning every event whose deadline
    /// was reached, in firing order.
    pub fn advance(&mut self, ticks: Tick) -> Vec<E> {
        let target = self.now.saturating_add(ticks);
        let mut fired = Vec::new();
        loop {
            match self.queue.peek() {
                Some(head) if head.fire_at <= target => {}
                _ => break,
            }
            let Some(entry) = self.queue.pop() else { break };
            self.now = entry.fire_at;
            if self.cancelled.remove(&entry.id) {
                continue;
            }
            fired.push(entry.event);
        }
        self.now = target;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_deadline_then_fifo_order() {
        let mut tl: Timeline<&str> = Timeline::new();
        tl.schedule(50, "late");
        tl.schedule(10, "early-a");
        tl.schedule(10, "early-b");
        assert_eq!(tl.advance(100), vec!["early-a", "early-b", "late"]);
        assert_eq!(tl.now(), 100);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut tl: Timeline<u32> = Timeline::new();
        let keep = tl.schedule(10, 1);
        let drop = tl.schedule(10, 2);
        assert!(tl.cancel(drop));
        assert!(!tl.cancel(drop), "double cancel reports false");
        assert_eq!(tl.advance(20), vec![1]);
        assert!(!tl.cancel(keep), "fired timer cannot be cancelled");
    }

    #[test]
    fn now_reflects_fire_time_during_delivery_and_target_after() {
        let mut tl: Timeline<Tick> = Timeline::new();
        tl.schedule(30, 0);
        tl.advance(10);
        // Rescheduling from now=10 lands at 10+30=40, after the first timer.
        tl.schedule(30, 1);
        let fired = tl.advance(100);
        assert_eq!(fired, vec![0, 1]);
    }

    #[test]
    fn next_deadline_skips_cancelled_entries() {
        let mut tl: Timeline<()> = Timeline::new();
        let first = tl.schedule(5, ());
        tl.schedule(20, ());
        assert_eq!(tl.next_deadline(), Some(5));
        tl.cancel(first);
        assert_eq!(tl.next_deadline(), Some(20));
    }

    #[test]
    fn empty_timeline_advances_quietly() {
        let mut tl: Timeline<()> = Timeline::new();
        assert!(tl.advance(1000).is_empty());
        assert_eq!(tl.next_deadline(), None);
    }
}
