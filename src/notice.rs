//! Transient notices (flash messages / toasts).
//!
//! Lifecycle per notice: Created -> Entering -> Visible -> Exiting -> Removed.
//! Concurrent notices stagger their enter animations; each notice owns its
//! timers, so dismissing one never disturbs the others' schedules.

use std::collections::HashMap;

use crate::timeline::{Tick, TimerId, Timeline};

/// Offset between consecutive pending notices' enter animations.
pub const STAGGER: Tick = 200;
/// Length of the enter animation before a notice counts as settled.
pub const ENTER_FOR: Tick = 300;
/// How long a notice stays visible, measured from when its enter began.
pub const VISIBLE_FOR: Tick = 5000;
/// Length of the exit animation. Runs even on manual dismissal.
pub const EXIT_FOR: Tick = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticePhase {
    /// Queued, waiting for its staggered enter slot.
    Created,
    Entering,
    Visible,
    Exiting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoticeId(u64);

#[derive(Clone, Debug)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
    pub severity: Severity,
    pub phase: NoticePhase,
    pub created_at: Tick,
}

#[derive(Clone, Copy, Debug)]
enum Transition {
    Enter(NoticeId),
    Settle(NoticeId),
    Expire(NoticeId),
    Remove(NoticeId),
}

/// Owns every live notice and the timers that drive their lifecycles.
pub struct NoticeCenter {
    timeline: Timeline<Transition>,
    notices: Vec<Notice>,
    timers: HashMap<NoticeId, Vec<TimerId>>,
    next_id: u64,
    stagger: Tick,
    enter_for: Tick,
    visible_for: Tick,
    exit_for: Tick,
}

impl Default for NoticeCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NoticeCenter {
    pub fn new() -> Self {
        Self::with_durations(STAGGER, ENTER_FOR, VISIBLE_FOR, EXIT_FOR)
    }

    pub fn with_durations(stagger: Tick, enter_for: Tick, visible_for: Tick, exit_for: Tick) -> Self {
        Self {
            timeline: Timeline::new(),
            notices: Vec::new(),
            timers: HashMap::new(),
            next_id: 0,
            stagger,
            enter_for,
            visible_for,
            exit_for,
        }
    }

    /// Queues a notice. The Nth notice still waiting to enter starts its
    /// enter animation after `N x stagger` ticks.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> NoticeId {
        let id = NoticeId(self.next_id);
        self.next_id += 1;

        let waiting = self
            .notices
            .iter()
            .filter(|n| n.phase == NoticePhase::Created)
            .count() as Tick;

        self.notices.push(Notice {
            id,
            message: message.into(),
            severity,
            phase: NoticePhase::Created,
            created_at: self.timeline.now(),
        });

        let timer = self
            .timeline
            .schedule(waiting * self.stagger, Transition::Enter(id));
        self.timers.insert(id, vec![timer]);
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> NoticeId {
        self.push(message, Severity::Info)
    }

    pub fn success(&mut self, message: impl Into<String>) -> NoticeId {
        self.push(message, Severity::Success)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NoticeId {
        self.push(message, Severity::Error)
    }

    /// Explicit user dismissal: jump straight to Exiting from any live phase,
    /// cancelling this notice's timers only. The exit animation still runs.
    pub fn dismiss(&mut self, id: NoticeId) {
        let Some(notice) = self.notices.iter_mut().find(|n| n.id == id) else {
            return;
        };
        if notice.phase == NoticePhase::Exiting {
            return;
        }
        notice.phase = NoticePhase::Exiting;
        if let Some(timers) = self.timers.remove(&id) {
            for timer in timers {
                self.timeline.cancel(timer);
            }
        }
        let timer = self.timeline.schedule(self.exit_for, Transition::Remove(id));
        self.timers.insert(id, vec![timer]);
    }

    /// Live notices in creation order. Removed notices are gone.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Ticks until the next lifecycle transition, for host poll timeouts.
    pub fn next_deadline(&self) -> Option<Tick> {
        self.timeline
            .next_deadline()
            .map(|d| d.saturating_sub(self.timeline.now()))
    }

    /// Advances virtual time, applying every lifecycle transition that comes
    /// due. Steps deadline by deadline so follow-up timers (Settle, Expire)
    /// are armed from the transition's own fire time, keeping each notice's
    /// visible window anchored to when its enter began.
    pub fn advance(&mut self, ticks: Tick) {
        let target = self.timeline.now().saturating_add(ticks);
        loop {
            let Some(deadline) = self.timeline.next_deadline().filter(|d| *d <= target) else {
                break;
            };
            let step = deadline - self.timeline.now();
            for transition in self.timeline.advance(step) {
                self.apply(transition);
            }
        }
        let rest = target - self.timeline.now();
        self.timeline.advance(rest);
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Enter(id) => {
                if self.set_phase(id, NoticePhase::Entering) {
                    let settle = self.timeline.schedule(self.enter_for, Transition::Settle(id));
                    let expire = self
                        .timeline
                        .schedule(self.visible_for, Transition::Expire(id));
                    self.timers.insert(id, vec![settle, expire]);
                }
            }
            Transition::Settle(id) => {
                self.set_phase(id, NoticePhase::Visible);
            }
            Transition::Expire(id) => {
                if self.set_phase(id, NoticePhase::Exiting) {
                    let timer = self.timeline.schedule(self.exit_for, Transition::Remove(id));
                    self.timers.insert(id, vec![timer]);
                }
            }
            Transition::Remove(id) => {
                self.timers.remove(&id);
                self.notices.retain(|n| n.id != id);
            }
        }
    }

    fn set_phase(&mut self, id: NoticeId, phase: NoticePhase) -> bool {
        match self.notices.iter_mut().find(|n| n.id == id) {
            Some(notice) => {
                notice.phase = phase;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(center: &NoticeCenter) -> Vec<NoticePhase> {
        center.notices().iter().map(|n| n.phase).collect()
    }

    #[test]
    fn simultaneous_notices_enter_staggered() {
        let mut center = NoticeCenter::new();
        center.info("first");
        center.info("second");
        center.info("third");

        center.advance(0);
        assert_eq!(
            phases(&center),
            vec![
                NoticePhase::Entering,
                NoticePhase::Created,
                NoticePhase::Created
            ]
        );
        center.advance(STAGGER);
        assert_eq!(phases(&center)[1], NoticePhase::Entering);
        assert_eq!(phases(&center)[2], NoticePhase::Created);
        center.advance(STAGGER);
        assert_eq!(phases(&center)[2], NoticePhase::Entering);
    }

    #[test]
    fn entering_settles_into_visible() {
        let mut center = NoticeCenter::new();
        center.info("hello");
        center.advance(ENTER_FOR);
        assert_eq!(phases(&center), vec![NoticePhase::Visible]);
    }

    #[test]
    fn visible_time_is_measured_from_each_notices_enter() {
        let mut center = NoticeCenter::new();
        center.info("first");
        center.info("second");

        // First enters at 0, expires at VISIBLE_FOR; second enters at
        // STAGGER, expires at STAGGER + VISIBLE_FOR.
        center.advance(VISIBLE_FOR);
        assert_eq!(
            phases(&center),
            vec![NoticePhase::Exiting, NoticePhase::Visible]
        );
        center.advance(EXIT_FOR);
        // First finished its exit and is gone; second expired at its own
        // STAGGER + VISIBLE_FOR mark and is now exiting.
        assert_eq!(center.notices().len(), 1);
        assert_eq!(phases(&center), vec![NoticePhase::Exiting]);
    }

    #[test]
    fn notice_is_removed_after_exit_animation() {
        let mut center = NoticeCenter::new();
        center.info("bye");
        center.advance(VISIBLE_FOR + EXIT_FOR);
        assert!(center.is_empty());
    }

    #[test]
    fn dismissing_one_notice_leaves_other_schedules_intact() {
        let mut center = NoticeCenter::new();
        let _first = center.info("first");
        let second = center.info("second");
        let _third = center.info("third");

        center.dismiss(second);
        center.advance(0);
        // Second is exiting immediately; first enters on schedule.
        assert_eq!(phases(&center)[1], NoticePhase::Exiting);
        assert_eq!(phases(&center)[0], NoticePhase::Entering);
        // Third still enters at its original 2 x STAGGER slot.
        center.advance(2 * STAGGER);
        let third = center
            .notices()
            .iter()
            .find(|n| n.message == "third")
            .expect("third still live");
        assert_eq!(third.phase, NoticePhase::Entering);
    }

    #[test]
    fn manual_dismissal_still_runs_the_exit_animation() {
        let mut center = NoticeCenter::new();
        let id = center.success("done");
        center.advance(ENTER_FOR);
        center.dismiss(id);
        assert_eq!(phases(&center), vec![NoticePhase::Exiting]);
        center.advance(EXIT_FOR - 1);
        assert_eq!(center.notices().len(), 1, "exit duration is never skipped");
        center.advance(1);
        assert!(center.is_empty());
    }

    #[test]
    fn dismissing_an_exiting_or_unknown_notice_is_a_no_op() {
        let mut center = NoticeCenter::new();
        let id = center.info("x");
        center.dismiss(id);
        center.advance(EXIT_FOR / 2);
        center.dismiss(id); // already exiting: must not restart the clock
        center.advance(EXIT_FOR / 2);
        assert!(center.is_empty());
        center.dismiss(NoticeId(999));
    }
}
