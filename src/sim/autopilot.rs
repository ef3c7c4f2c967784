//! Idle/demo mode - a simple bot that plays through the input sampler
//!
//! The bot never touches positions directly: it presses and releases the same
//! keys a person would, so a demo session runs the exact code path of a real
//! one.

use glam::Vec2;

use super::input::{Control, KeyState};
use super::state::{Arena, GameState};

/// Ignore steering components smaller than this
const DEAD_ZONE: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Flee any enemy whose center is closer than this (pixels)
    pub danger_radius: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            danger_radius: 220.0,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Desired heading and whether to hold boost
    pub fn steer(&self, state: &GameState, arena: Arena) -> (Vec2, bool) {
        let center = state.player.pos + Vec2::splat(state.player.size / 2.0);

        let nearest = state
            .enemies
            .iter()
            .map(|e| e.pos + Vec2::splat(e.size / 2.0))
            .min_by(|a, b| {
                a.distance(center)
                    .partial_cmp(&b.distance(center))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        if let Some(enemy) = nearest {
            if state.power_up.is_active() {
                // Holding the bat: go swing at the closest ball
                return ((enemy - center).normalize_or_zero(), true);
            }
            if enemy.distance(center) < self.danger_radius {
                return ((center - enemy).normalize_or_zero(), true);
            }
        }

        if state.item.active {
            let item = state.item.pos + Vec2::splat(state.item.size / 2.0);
            return ((item - center).normalize_or_zero(), false);
        }

        let home = Vec2::new(arena.width, arena.height) / 2.0;
        let to_home = home - center;
        if to_home.length() < state.player.speed {
            (Vec2::ZERO, false)
        } else {
            (to_home.normalize_or_zero(), false)
        }
    }

    /// Press/release keys toward the desired heading. Returns true if this
    /// produced the session's first key press.
    pub fn drive(&self, state: &GameState, arena: Arena, keys: &mut KeyState) -> bool {
        let (dir, boost) = self.steer(state, arena);
        let wanted = [
            (Control::Left, dir.x < -DEAD_ZONE),
            (Control::Right, dir.x > DEAD_ZONE),
            (Control::Up, dir.y < -DEAD_ZONE),
            (Control::Down, dir.y > DEAD_ZONE),
            (Control::Boost, boost),
        ];

        let mut first = false;
        for (control, want) in wanted {
            if want && !keys.is_held(control) {
                first |= keys.key_down(control.key());
            } else if !want && keys.is_held(control) {
                keys.key_up(control.key());
            }
        }
        first
    }
}
