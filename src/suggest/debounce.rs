//! Debounced suggestion controller.
//!
//! One instance per input field. Keystrokes arm (and re-arm) a debounce
//! timer; only the timer firing actually consults the provider, so a burst of
//! typing costs one fetch. Blur hides the dropdown after a short grace period
//! so a click landing on a suggestion still wins.

use crate::suggest::{Suggestion, SuggestionProvider, MIN_QUERY_LEN};
use crate::timeline::{Tick, TimerId, Timeline};

/// Quiet period after the last keystroke before a fetch fires.
pub const DEBOUNCE: Tick = 300;
/// Delay between blur and dropdown dismissal, long enough for a click.
pub const BLUR_GRACE: Tick = 200;

/// Timer payloads private to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Fetch,
    Dismiss,
}

enum State {
    Idle,
    PendingFetch(TimerId),
    Displaying(Vec<Suggestion>),
}

/// Observable controller state, for rendering and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebouncePhase {
    Idle,
    PendingFetch,
    Displaying,
}

/// What the host must do after feeding the controller input or time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEffect {
    /// Render the dropdown with these suggestions.
    Show(Vec<Suggestion>),
    /// Remove the dropdown.
    Hide,
    /// The user picked a suggestion; submit this query.
    Submit(String),
}

/// Debounced input state machine over a virtual [`Timeline`].
pub struct DebouncedInput {
    value: String,
    state: State,
    timeline: Timeline<Pending>,
    dismiss: Option<TimerId>,
    debounce: Tick,
    grace: Tick,
}

impl Default for DebouncedInput {
    fn default() -> Self {
        Self::new()
    }
}

impl DebouncedInput {
    pub fn new() -> Self {
        Self::with_delays(DEBOUNCE, BLUR_GRACE)
    }

    pub fn with_delays(debounce: Tick, grace: Tick) -> Self {
        Self {
            value: String::new(),
            state: State::Idle,
            timeline: Timeline::new(),
            dismiss: None,
            debounce,
            grace,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn phase(&self) -> DebouncePhase {
        match self.state {
            State::Idle => DebouncePhase::Idle,
            State::PendingFetch(_) => DebouncePhase::PendingFetch,
            State::Displaying(_) => DebouncePhase::Displaying,
        }
    }

    /// Suggestions currently on display; empty outside `Displaying`.
    pub fn suggestions(&self) -> &[Suggestion] {
        match &self.state {
            State::Displaying(items) => items,
            _ => &[],
        }
    }

    /// Ticks until the next scheduled transition, for host poll timeouts.
    pub fn next_deadline(&self) -> Option<Tick> {
        self.timeline
            .next_deadline()
            .map(|d| d.saturating_sub(self.timeline.now()))
    }

    /// Records a keystroke: replaces the value, cancels any pending fetch,
    /// and arms a fresh debounce window.
    pub fn keystroke(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cancel_fetch();
        self.cancel_dismiss();
        let timer = self.timeline.schedule(self.debounce, Pending::Fetch);
        self.state = State::PendingFetch(timer);
    }

    /// Focus regained. With enough text already present this fetches
    /// immediately, but never duplicates an already armed fetch timer.
    pub fn focus(&mut self) {
        self.cancel_dismiss();
        if matches!(self.state, State::PendingFetch(_)) {
            return;
        }
        if self.value.trim().chars().count() >= MIN_QUERY_LEN {
            let timer = self.timeline.schedule(0, Pending::Fetch);
            self.state = State::PendingFetch(timer);
        }
    }

    /// Focus lost: the dropdown survives for the grace period so a click on
    /// a suggestion is not pre-empted.
    pub fn blur(&mut self) {
        if self.dismiss.is_none() {
            self.dismiss = Some(self.timeline.schedule(self.grace, Pending::Dismiss));
        }
    }

    /// The user clicked suggestion `index`. Sets the value, cancels any
    /// pending blur dismissal, and asks the host to submit.
    pub fn select(&mut self, index: usize) -> Option<InputEffect> {
        let State::Displaying(items) = &self.state else {
            return None;
        };
        let label = items.get(index)?.label.clone();
        self.cancel_dismiss();
        self.cancel_fetch();
        self.value = label.clone();
        self.state = State::Idle;
        Some(InputEffect::Submit(label))
    }

    /// Advances virtual time, running fetches and dismissals that come due.
    pub fn advance(
        &mut self,
        ticks: Tick,
        provider: &SuggestionProvider,
        limit: usize,
    ) -> Vec<InputEffect> {
        let mut effects = Vec::new();
        for event in self.timeline.advance(ticks) {
            match event {
                Pending::Fetch => {
                    let hits = provider.suggest(&self.value, limit);
                    if hits.is_empty() {
                        self.state = State::Idle;
                        effects.push(InputEffect::Hide);
                    } else {
                        self.state = State::Displaying(hits.clone());
                        effects.push(InputEffect::Show(hits));
                    }
                }
                Pending::Dismiss => {
                    self.dismiss = None;
                    self.state = State::Idle;
                    effects.push(InputEffect::Hide);
                }
            }
        }
        effects
    }

    fn cancel_fetch(&mut self) {
        if let State::PendingFetch(timer) = &self.state {
            let timer = *timer;
            self.timeline.cancel(timer);
        }
    }

    fn cancel_dismiss(&mut self) {
        if let Some(timer) = self.dismiss.take() {
            self.timeline.cancel(timer);
        }
    }
}
