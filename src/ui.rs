//! HUD text
//!
//! Pure string formatting; the web host copies these into DOM elements and the
//! native host logs them.

use crate::settings::Settings;
use crate::sim::{Game, format_seconds};

/// One frame's worth of HUD lines
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub time: String,
    pub high_score: String,
    /// Remaining power-up time, when active and enabled
    pub power_up: Option<String>,
}

impl Hud {
    pub fn from_game(game: &Game, now_ms: f64, settings: &Settings) -> Self {
        let power_up = if settings.show_power_up_timer {
            game.state
                .power_up
                .remaining_ms(now_ms)
                .map(|ms| format!("Bat: {}s", format_seconds(ms / 1000.0)))
        } else {
            None
        };

        Self {
            time: format!("Time: {}s", format_seconds(game.elapsed_secs())),
            high_score: format!("High Score: {}s", format_seconds(game.best().seconds())),
            power_up,
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![self.time.as_str(), self.high_score.as_str()];
        if let Some(bat) = &self.power_up {
            lines.push(bat);
        }
        lines
    }
}
