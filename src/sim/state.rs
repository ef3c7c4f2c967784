//! Game state and core simulation types
//!
//! The entity store for one session: the player, the enemy set, the single
//! item slot, plus the power-up, timers, clock and terminal flag that the frame
//! scheduler threads through every system.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SessionClock;
use super::collision::Aabb;
use super::powerup::{PowerUp, PowerUpEnd};
use super::timers::TimerQueue;
use crate::tuning::Tuning;

/// Current viewport size. Re-read every frame, so a resize immediately moves
/// the clamping bounds of every entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left position that keeps a `size` square on screen.
    /// Collapses to zero when the viewport is smaller than the square.
    pub fn max_pos(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }

    pub fn clamp(&self, pos: Vec2, size: f32) -> Vec2 {
        let max = self.max_pos(size);
        Vec2::new(pos.x.min(max.x).max(0.0), pos.y.min(max.y).max(0.0))
    }

    /// Top-left position that centers a `size` square
    pub fn centered(&self, size: f32) -> Vec2 {
        self.max_pos(size) * 0.5
    }

    /// Uniform random top-left position with the square fully on screen
    pub fn random_pos(&self, rng: &mut impl Rng, size: f32) -> Vec2 {
        let max = self.max_pos(size);
        Vec2::new(rng.random::<f32>() * max.x, rng.random::<f32>() * max.y)
    }
}

/// Player sprite selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerMode {
    #[default]
    Normal,
    /// Holding the bat
    PickupActive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    /// Displacement per frame before the boost multiplier
    pub speed: f32,
    /// Boost modifier held during the last step
    pub boosted: bool,
    pub mode: PlayerMode,
}

impl Player {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            speed: crate::consts::PLAYER_SPEED,
            boosted: false,
            mode: PlayerMode::Normal,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// A bouncing baseball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Per-frame displacement; sign gives direction
    pub vel: Vec2,
    pub size: f32,
}

impl Enemy {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self { pos, vel, size }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// The single bat pickup slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub size: f32,
    pub active: bool,
}

impl Item {
    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Things that happened during a frame, drained by the host for audio/logging
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Bat picked up; power-up runs until `expires_at`
    ItemCollected { expires_at: f64 },
    /// A new bat appeared
    ItemRespawned { pos: Vec2 },
    PowerUpEnded { reason: PowerUpEnd },
    /// Enemy at this index was knocked back by the bat
    HomeRun { enemy: usize },
    /// Unpowered contact ended the session
    GameOver { elapsed_secs: f64 },
    /// The finished session beat the stored best time
    NewHighScore { seconds: f64 },
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub item: Item,
    pub power_up: PowerUp,
    pub timers: TimerQueue,
    pub clock: SessionClock,
    /// Terminal flag; once set it is never cleared
    pub game_over: bool,
    /// Events raised since the host last drained them
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Lay out a fresh session: centered player, `enemy_count` enemies at random
    /// positions, and an active item.
    pub fn new(seed: u64, tuning: &Tuning, arena: Arena, now_ms: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut player = Player::new(arena.centered(tuning.player_size), tuning.player_size);
        player.speed = tuning.player_speed;

        let enemies = (0..tuning.enemy_count)
            .map(|_| {
                let pos = arena.random_pos(&mut rng, tuning.enemy_size);
                let vel = Vec2::new(
                    random_speed(&mut rng, tuning),
                    random_speed(&mut rng, tuning),
                );
                Enemy::new(pos, vel, tuning.enemy_size)
            })
            .collect();

        let mut state = Self {
            seed,
            player,
            enemies,
            item: Item {
                pos: Vec2::ZERO,
                size: tuning.item_size,
                active: false,
            },
            power_up: PowerUp::new(),
            timers: TimerQueue::new(),
            clock: SessionClock::new(now_ms),
            game_over: false,
            events: Vec::new(),
            rng,
        };
        state.spawn_item(arena);
        state
    }

    /// Move the item to a random on-screen spot and activate it
    pub fn spawn_item(&mut self, arena: Arena) -> Vec2 {
        self.item.pos = arena.random_pos(&mut self.rng, self.item.size);
        self.item.active = true;
        self.item.pos
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

fn random_speed(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    if tuning.enemy_speed_max > tuning.enemy_speed_min {
        rng.random_range(tuning.enemy_speed_min..tuning.enemy_speed_max)
    } else {
        tuning.enemy_speed_min
    }
}
