//! Deferred, cancellable timers
//!
//! Timers are plain messages with an absolute deadline. The owner keeps the
//! returned [`TimerHandle`] and cancels it when the work is superseded; the
//! frame scheduler pops due messages and dispatches them between frames.

/// Identifies one scheduled timer. Never reused within a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// What a timer asks for when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End the power-up period that armed this timer
    PowerUpExpired,
    /// Put a fresh item on the field
    RespawnItem,
}

#[derive(Debug, Clone)]
struct Pending {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: f64,
}

/// Pending timers, fired earliest-deadline first (schedule order on ties)
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<Pending>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire once `now >= due_ms`
    pub fn schedule(&mut self, kind: TimerKind, due_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            kind,
            due_ms,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Deadline of a pending timer
    pub fn due_ms(&self, handle: TimerHandle) -> Option<f64> {
        self.pending
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| p.due_ms)
    }

    /// Remove and return the earliest timer whose deadline has passed
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TimerHandle, TimerKind)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.handle.0.cmp(&b.handle.0))
            })
            .map(|(i, _)| i)?;
        let fired = self.pending.remove(idx);
        Some((fired.handle, fired.kind))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_only_after_deadline() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(TimerKind::RespawnItem, 8000.0);

        assert_eq!(timers.pop_due(7999.9), None);
        assert_eq!(timers.due_ms(handle), Some(8000.0));
        assert_eq!(
            timers.pop_due(8000.0),
            Some((handle, TimerKind::RespawnItem))
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn test_earliest_deadline_first() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(TimerKind::PowerUpExpired, 10_000.0);
        let early = timers.schedule(TimerKind::RespawnItem, 8000.0);

        assert_eq!(timers.pop_due(20_000.0).map(|(h, _)| h), Some(early));
        assert_eq!(timers.pop_due(20_000.0).map(|(h, _)| h), Some(late));
        assert_eq!(timers.pop_due(20_000.0), None);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut timers = TimerQueue::new();
        let first = timers.schedule(TimerKind::RespawnItem, 100.0);
        let second = timers.schedule(TimerKind::PowerUpExpired, 100.0);

        assert_eq!(timers.pop_due(100.0).map(|(h, _)| h), Some(first));
        assert_eq!(timers.pop_due(100.0).map(|(h, _)| h), Some(second));
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(TimerKind::PowerUpExpired, 50.0);

        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert_eq!(timers.pop_due(1000.0), None);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule(TimerKind::PowerUpExpired, 0.0);
        timers.pop_due(0.0);
        let b = timers.schedule(TimerKind::PowerUpExpired, 0.0);
        assert_ne!(a, b);
        assert_eq!(timers.due_ms(b), Some(0.0));
        assert_eq!(timers.due_ms(a), None);
    }
}
