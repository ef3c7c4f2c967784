//! Collision detection and response
//!
//! Everything on the field is an axis-aligned square, so detection is a plain
//! separating-axis test with strict inequalities: boxes that only share an
//! edge do not touch.

use glam::Vec2;

use super::movement::knockback;
use super::powerup::PowerUpEnd;
use super::state::{Arena, GameEvent, GameState};
use super::timers::TimerKind;
use crate::tuning::Tuning;

/// Axis-aligned bounding box (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Square anchored at its top-left corner
    pub fn square(top_left: Vec2, size: f32) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::splat(size),
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Pick up the item if the player is touching it.
///
/// Starts the power-up and schedules the next item. Returns true on pickup.
pub fn check_item(state: &mut GameState, tuning: &Tuning, now_ms: f64) -> bool {
    if state.game_over || !state.item.active {
        return false;
    }
    if !state.player.aabb().overlaps(&state.item.aabb()) {
        return false;
    }

    state.item.active = false;
    let expires_at = state.power_up.start(
        &mut state.player,
        &mut state.timers,
        now_ms,
        tuning.power_up_ms,
    );
    state
        .timers
        .schedule(TimerKind::RespawnItem, now_ms + tuning.item_respawn_ms);
    state.push_event(GameEvent::ItemCollected { expires_at });
    log::info!("Bat collected, powered until {:.0}", expires_at);
    true
}

/// Resolve contact with every enemy, one at a time in index order.
///
/// A powered contact spends the power-up on a knockback for that enemy only;
/// any later contact in the same frame meets an unpowered player. An
/// unpowered contact raises the terminal flag. Returns true if the flag was
/// raised during this call.
pub fn check_enemies(state: &mut GameState, tuning: &Tuning, arena: Arena) -> bool {
    if state.game_over {
        return false;
    }

    let player_box = state.player.aabb();
    for i in 0..state.enemies.len() {
        if !player_box.overlaps(&state.enemies[i].aabb()) {
            continue;
        }

        if state.power_up.consume(&mut state.player, &mut state.timers) {
            knockback(&mut state.enemies[i], tuning.knockback_scale, arena);
            state.push_event(GameEvent::PowerUpEnded {
                reason: PowerUpEnd::Consumed,
            });
            state.push_event(GameEvent::HomeRun { enemy: i });
            log::info!("Home run! Enemy {} knocked back", i);
        } else if !state.game_over {
            state.game_over = true;
            log::info!("Player hit by enemy {}", i);
        }
    }

    state.game_over
}
