use tracing::{
    debug,
    trace,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running,
    Completed,
}

/// Result of delivering one tick to a [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Decremented; the countdown keeps running.
    Continue { remaining: u32 },
    /// Reached zero on this tick; the repeating callback has been cancelled.
    Completed,
    /// Delivered while not running (a tick queued before a pause).
    Ignored,
}

/// Seconds-resolution countdown driven by an external repeating callback.
///
/// `H` is the handle of that callback. The countdown holds it only while
/// running and cancels by dropping it, so every path out of the running
/// state releases it exactly once.
#[derive(Debug)]
pub struct Countdown<H> {
    remaining: u32,
    handle: Option<H>,
    completed: bool,
}

impl<H> Countdown<H> {
    pub fn new(remaining: u32) -> Self {
        Self {
            remaining,
            handle: None,
            completed: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> CountdownState {
        if self.is_running() {
            CountdownState::Running
        } else if self.completed {
            CountdownState::Completed
        } else {
            CountdownState::Idle
        }
    }

    /// Arm the repeating callback unless one is already live.
    ///
    /// Returns `false` (without calling `arm`) when already running.
    pub fn start<F>(&mut self, arm: F) -> bool
    where
        F: FnOnce() -> H,
    {
        if self.is_running() {
            debug!(remaining = self.remaining, "countdown already running");
            return false;
        }
        self.handle = Some(arm());
        self.completed = false;
        debug!(remaining = self.remaining, "countdown started");
        true
    }

    /// Cancel the callback, keeping the remaining time where it stands.
    pub fn pause(&mut self) -> bool {
        let cancelled = self.cancel();
        if cancelled {
            debug!(remaining = self.remaining, "countdown paused");
        }
        cancelled
    }

    /// Back to a fresh idle countdown of `total` seconds.
    pub fn reset(&mut self, total: u32) {
        self.cancel();
        self.completed = false;
        self.remaining = total;
        debug!(remaining = total, "countdown reset");
    }

    /// Replace the remaining time without touching the running state.
    pub fn set_remaining(&mut self, remaining: u32) {
        self.remaining = remaining;
        self.completed = false;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.is_running() {
            trace!("tick ignored; countdown not running");
            return Tick::Ignored;
        }

        if self.remaining <= 1 {
            self.remaining = 0;
            self.cancel();
            self.completed = true;
            debug!("countdown reached zero");
            return Tick::Completed;
        }

        self.remaining -= 1;
        trace!(remaining = self.remaining, "tick");
        Tick::Continue {
            remaining: self.remaining,
        }
    }

    fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                drop(handle);
                true
            }
            None => false,
        }
    }
}
