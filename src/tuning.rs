//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads goes through [`Tuning`], so a
//! host can load a JSON override without recompiling. Missing fields fall back
//! to the defaults in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_size: f32,
    pub player_speed: f32,
    pub boost_multiplier: f32,

    pub enemy_count: usize,
    pub enemy_size: f32,
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,

    pub item_size: f32,
    pub item_respawn_ms: f64,

    pub power_up_ms: f64,
    pub knockback_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            boost_multiplier: BOOST_MULTIPLIER,
            enemy_count: ENEMY_COUNT,
            enemy_size: ENEMY_SIZE,
            enemy_speed_min: ENEMY_SPEED_MIN,
            enemy_speed_max: ENEMY_SPEED_MAX,
            item_size: ITEM_SIZE,
            item_respawn_ms: ITEM_RESPAWN_MS,
            power_up_ms: POWER_UP_MS,
            knockback_scale: KNOCKBACK_SCALE,
        }
    }
}

/// A tuning override that cannot be used
#[derive(Debug)]
pub enum TuningError {
    Json(serde_json::Error),
    /// A size, speed or duration that is negative or not finite
    Invalid { field: &'static str, value: f64 },
    /// `enemy_speed_max` below `enemy_speed_min`
    SpeedRange { min: f32, max: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Json(e) => write!(f, "malformed tuning JSON: {}", e),
            TuningError::Invalid { field, value } => {
                write!(f, "{} must be finite and non-negative, got {}", field, value)
            }
            TuningError::SpeedRange { min, max } => {
                write!(f, "enemy_speed_max ({}) is below enemy_speed_min ({})", max, min)
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Json(e)
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and reject unusable values
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Every size, speed and duration must be finite and non-negative.
    /// Out-of-range f32 literals such as `1e39` parse as infinity.
    pub fn validate(&self) -> Result<(), TuningError> {
        let values = [
            ("player_size", self.player_size as f64),
            ("player_speed", self.player_speed as f64),
            ("boost_multiplier", self.boost_multiplier as f64),
            ("enemy_size", self.enemy_size as f64),
            ("enemy_speed_min", self.enemy_speed_min as f64),
            ("enemy_speed_max", self.enemy_speed_max as f64),
            ("item_size", self.item_size as f64),
            ("item_respawn_ms", self.item_respawn_ms),
            ("power_up_ms", self.power_up_ms),
            ("knockback_scale", self.knockback_scale as f64),
        ];
        for (field, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid { field, value });
            }
        }
        if self.enemy_speed_max < self.enemy_speed_min {
            return Err(TuningError::SpeedRange {
                min: self.enemy_speed_min,
                max: self.enemy_speed_max,
            });
        }
        Ok(())
    }
}
