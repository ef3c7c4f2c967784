//! Homerun Dodge - a single-screen baseball dodging game
//!
//! Core modules:
//! - `sim`: Frame simulation (movement, collisions, power-up, timers, clock)
//! - `renderer`: WebGPU colored-quad rendering
//! - `platform`: Clock abstraction for browser/native/test hosts
//! - `persistence`: Key/value storage backends
//! - `highscores`: Best survival time
//! - `tuning` / `settings`: Game balance and player preferences
//! - `audio`: Named sound cues and the background playlist
//! - `ui`: HUD text

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::BestTime;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Player sprite edge length (pixels)
    pub const PLAYER_SIZE: f32 = 128.0;
    /// Player displacement per frame (pixels)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Speed multiplier while the boost modifier is held
    pub const BOOST_MULTIPLIER: f32 = 2.0;

    /// Enemies spawned at session start
    pub const ENEMY_COUNT: usize = 3;
    /// Enemy sprite edge length (pixels)
    pub const ENEMY_SIZE: f32 = 64.0;
    /// Enemy velocity components are drawn from [MIN, MAX)
    pub const ENEMY_SPEED_MIN: f32 = 1.0;
    pub const ENEMY_SPEED_MAX: f32 = 3.0;

    /// Item (bat) sprite edge length (pixels)
    pub const ITEM_SIZE: f32 = 100.0;
    /// Delay between a pickup and the next item spawn
    pub const ITEM_RESPAWN_MS: f64 = 8000.0;

    /// Power-up lifetime
    pub const POWER_UP_MS: f64 = 10_000.0;
    /// Knockback displacement multiplier applied to the reversed velocity
    pub const KNOCKBACK_SCALE: f32 = 80.0;

    /// Storage key for the best survival time
    pub const HIGH_SCORE_KEY: &str = "highScore";

    /// Default mix volumes
    pub const MUSIC_VOLUME: f32 = 0.2;
    pub const EFFECT_VOLUME: f32 = 0.15;

    /// Native host simulates a 60 Hz display
    pub const NATIVE_FRAME_MS: f64 = 1000.0 / 60.0;
}
