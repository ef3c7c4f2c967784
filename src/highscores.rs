//! Best survival time
//!
//! A single scalar persisted under [`HIGH_SCORE_KEY`] as a decimal string. It is
//! read once at startup and rewritten only when a finished session beats it.

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::Storage;

/// Longest survival time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BestTime {
    seconds: f64,
}

impl BestTime {
    pub fn new(seconds: f64) -> Self {
        Self {
            seconds: sanitize(seconds),
        }
    }

    /// Load from storage. Absent or unreadable values count as 0.
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(raw) = storage.get_item(HIGH_SCORE_KEY) else {
            log::info!("No high score stored, starting from 0");
            return Self::default();
        };

        match raw.trim().parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => {
                log::info!("Loaded high score {:.2}s", seconds);
                Self { seconds }
            }
            _ => {
                log::warn!("Ignoring unreadable high score {:?}", raw);
                Self::default()
            }
        }
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Check if a finished session beats the record
    pub fn qualifies(&self, elapsed_secs: f64) -> bool {
        elapsed_secs > self.seconds
    }

    /// Record `elapsed_secs` if it beats the stored best, persisting it.
    /// Equal or lower times leave storage untouched. Returns true on a new record.
    pub fn submit(&mut self, elapsed_secs: f64, storage: &mut dyn Storage) -> bool {
        if !self.qualifies(elapsed_secs) {
            return false;
        }
        self.seconds = elapsed_secs;
        storage.set_item(HIGH_SCORE_KEY, &elapsed_secs.to_string());
        log::info!("New high score saved: {:.2}s", elapsed_secs);
        true
    }
}

fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
