//! Tick-driven timers with cancellable handles
//!
//! Gameplay needs two repeating timers (elapsed seconds, difficulty ramp) and
//! one-shot boost expiries. Every timer lives in the session's scheduler:
//! `fire` advances one logical tick and returns what came due, and ending the
//! game cancels every outstanding handle in one call, so nothing keeps
//! mutating a finished session.

/// Opaque handle for cancelling a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u32);

/// What a timer firing means to the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// One logical second of play elapsed
    SecondElapsed,
    /// Unconditional difficulty ramp
    DifficultyRamp,
    /// A speed boost wears off
    BoostExpiry,
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    /// Ticks until the next firing
    remaining: u32,
    /// Re-arm period; `None` for one-shot timers
    period: Option<u32>,
}

/// Deterministic single-threaded timer set, advanced once per simulation tick
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    timers: Vec<Timer>,
    next_handle: u32,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot timer `after_ticks` from now (minimum one tick)
    pub fn schedule_once(&mut self, after_ticks: u32, kind: TimerKind) -> TimerHandle {
        self.insert(after_ticks.max(1), None, kind)
    }

    /// Schedule a repeating timer firing every `period_ticks`
    pub fn schedule_every(&mut self, period_ticks: u32, kind: TimerKind) -> TimerHandle {
        let period = period_ticks.max(1);
        self.insert(period, Some(period), kind)
    }

    fn insert(&mut self, remaining: u32, period: Option<u32>, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(Timer {
            handle,
            kind,
            remaining,
            period,
        });
        handle
    }

    /// Cancel a timer. Returns true if the handle was still live.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    /// Cancel every outstanding timer (game end)
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance one tick and collect the kinds due, in scheduling order.
    /// Repeating timers re-arm; one-shots are dropped.
    pub fn fire(&mut self) -> Vec<TimerKind> {
        let mut due = Vec::new();
        for timer in &mut self.timers {
            timer.remaining -= 1;
            if timer.remaining == 0 {
                due.push(timer.kind);
                if let Some(period) = timer.period {
                    timer.remaining = period;
                }
            }
        }
        self.timers.retain(|t| t.remaining > 0);
        due
    }
}
