//! Bat power-up state machine
//!
//! Inactive -> Active -> Inactive. The expiry timer handle is owned here and is
//! cancelled whenever the period ends or a new period supersedes it, so at most
//! one end transition applies per Active period.

use super::state::{Player, PlayerMode};
use super::timers::{TimerHandle, TimerKind, TimerQueue};

/// Why an Active period ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpEnd {
    /// The expiry timer fired
    Expired,
    /// Spent on a home-run knockback
    Consumed,
}

#[derive(Debug, Clone, Default)]
pub struct PowerUp {
    active: bool,
    /// Absolute expiry timestamp; `None` while inactive
    expires_at: Option<f64>,
    timer: Option<TimerHandle>,
}

impl PowerUp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn expires_at(&self) -> Option<f64> {
        self.expires_at
    }

    /// Milliseconds left in the current period
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.expires_at.map(|t| (t - now_ms).max(0.0))
    }

    /// Enter (or restart) the Active state. Returns the new expiry timestamp.
    pub fn start(
        &mut self,
        player: &mut Player,
        timers: &mut TimerQueue,
        now_ms: f64,
        duration_ms: f64,
    ) -> f64 {
        if let Some(stale) = self.timer.take() {
            timers.cancel(stale);
        }

        let expires_at = now_ms + duration_ms;
        self.active = true;
        self.expires_at = Some(expires_at);
        player.mode = PlayerMode::PickupActive;
        self.timer = Some(timers.schedule(TimerKind::PowerUpExpired, expires_at));
        expires_at
    }

    /// End the period early because it was spent on a knockback
    pub fn consume(&mut self, player: &mut Player, timers: &mut TimerQueue) -> bool {
        self.finish(player, timers)
    }

    /// Handle a fired expiry timer. Timers from earlier periods are ignored.
    pub fn expire(
        &mut self,
        handle: TimerHandle,
        player: &mut Player,
        timers: &mut TimerQueue,
    ) -> bool {
        if self.timer != Some(handle) {
            log::debug!("Ignoring stale power-up timer {:?}", handle);
            return false;
        }
        self.finish(player, timers)
    }

    fn finish(&mut self, player: &mut Player, timers: &mut TimerQueue) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.expires_at = None;
        player.mode = PlayerMode::Normal;
        if let Some(pending) = self.timer.take() {
            timers.cancel(pending);
        }
        true
    }
}
