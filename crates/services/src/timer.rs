use chrono::{DateTime, Duration, Utc};

use crate::scheduler::{TaskHandle, TimerQueue};

/// Payload the countdown schedules into its owner's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick;

/// What a delivered tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Ticked { remaining: u32 },
    /// Reached zero. Reported once per run; the countdown is stopped afterwards.
    Expired,
    /// Not the countdown's pending tick (stopped, restarted, or already expired).
    Stale,
}

/// Restartable one-second countdown from a fixed limit to zero.
///
/// The countdown keeps at most one tick scheduled. Restarting cancels the
/// previous tick before scheduling a new one.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    limit: u32,
    remaining: u32,
    pending: Option<TaskHandle>,
}

fn tick_interval() -> Duration {
    Duration::seconds(1)
}

impl CountdownTimer {
    /// A stopped countdown. A zero limit is raised to one second.
    #[must_use]
    pub fn new(limit_secs: u32) -> Self {
        let limit = limit_secs.max(1);
        Self {
            limit,
            remaining: limit,
            pending: None,
        }
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start<T: From<TimerTick>>(&mut self, queue: &mut TimerQueue<T>, now: DateTime<Utc>) {
        self.stop(queue);
        self.remaining = self.limit;
        self.pending = Some(queue.schedule_at(now + tick_interval(), T::from(TimerTick)));
    }

    /// Cancel the pending tick. Safe to call when already stopped.
    pub fn stop<T>(&mut self, queue: &mut TimerQueue<T>) {
        if let Some(handle) = self.pending.take() {
            queue.cancel(handle);
        }
    }

    /// Handle a tick popped from the queue.
    ///
    /// The next tick is scheduled from the fired tick's deadline, so catching up
    /// after a long pause does not drift.
    pub fn on_tick<T: From<TimerTick>>(
        &mut self,
        queue: &mut TimerQueue<T>,
        handle: TaskHandle,
    ) -> TickOutcome {
        if self.pending != Some(handle) {
            return TickOutcome::Stale;
        }
        self.pending = None;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            return TickOutcome::Expired;
        }
        self.pending = Some(queue.schedule_at(
            handle.deadline() + tick_interval(),
            T::from(TimerTick),
        ));
        TickOutcome::Ticked {
            remaining: self.remaining,
        }
    }
}
