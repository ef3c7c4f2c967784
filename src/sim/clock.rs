//! Session survival clock
//!
//! Elapsed time is always recomputed from the absolute start mark, never
//! accumulated per frame, so dropped or slow frames cannot skew it.

/// Start mark plus the derived (and eventually frozen) elapsed time
#[derive(Debug, Clone)]
pub struct SessionClock {
    start_ms: f64,
    elapsed_secs: f64,
    frozen: bool,
}

impl SessionClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            start_ms,
            elapsed_secs: 0.0,
            frozen: false,
        }
    }

    /// Recompute elapsed seconds from `now_ms`. No effect once frozen.
    pub fn update(&mut self, now_ms: f64) -> f64 {
        if !self.frozen {
            self.elapsed_secs = ((now_ms - self.start_ms) / 1000.0).max(0.0);
        }
        self.elapsed_secs
    }

    /// Stop the clock at its last computed value
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }
}

/// Two fractional digits, as shown on the HUD
pub fn format_seconds(secs: f64) -> String {
    format!("{:.2}", secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recomputes_from_start_mark() {
        let mut clock = SessionClock::new(1_000.0);
        assert_eq!(clock.update(1_500.0), 0.5);
        // Skipping ahead does not depend on how many updates happened
        assert_eq!(clock.update(13_340.0), 12.34);
    }

    #[test]
    fn test_freeze_keeps_last_value() {
        let mut clock = SessionClock::new(0.0);
        clock.update(4_250.0);
        clock.freeze();
        assert_eq!(clock.update(99_000.0), 4.25);
        assert!(clock.is_frozen());
    }

    #[test]
    fn test_never_negative() {
        let mut clock = SessionClock::new(5_000.0);
        assert_eq!(clock.update(4_000.0), 0.0);
    }

    #[test]
    fn test_format_two_digits() {
        assert_eq!(format_seconds(0.0), "0.00");
        assert_eq!(format_seconds(12.345_6), "12.35");
        assert_eq!(format_seconds(7.1), "7.10");
    }
}
