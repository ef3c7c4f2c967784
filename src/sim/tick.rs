//! Frame scheduler
//!
//! One call to [`Game::tick`] is one display refresh. The host decides what
//! drives it (requestAnimationFrame, a fixed-rate native loop, or a test) and
//! stops asking once the tick reports [`FrameStatus::Halted`].

use super::collision::{check_enemies, check_item};
use super::input::KeyState;
use super::movement::{step_enemies, step_player};
use super::powerup::PowerUpEnd;
use super::state::{Arena, GameEvent, GameState};
use super::timers::TimerKind;
use crate::highscores::BestTime;
use crate::persistence::Storage;
use crate::tuning::Tuning;

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    /// Session over; the loop must not be re-armed
    Halted,
}

/// One play session: entity store, balance values and the best time
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub tuning: Tuning,
    best: BestTime,
    /// High score finalize already ran
    finalized: bool,
    frame: u64,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning, arena: Arena, now_ms: f64, best: BestTime) -> Self {
        let state = GameState::new(seed, &tuning, arena, now_ms);
        log::info!(
            "Session started (seed {}, {} enemies, arena {}x{})",
            seed,
            state.enemies.len(),
            arena.width,
            arena.height
        );
        Self {
            state,
            tuning,
            best,
            finalized: false,
            frame: 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.state.clock.elapsed_secs()
    }

    pub fn best(&self) -> BestTime {
        self.best
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Deliver every timer whose deadline has passed. Safe to call at any
    /// point between frames; `tick` also calls it first thing.
    pub fn fire_due_timers(&mut self, now_ms: f64, arena: Arena) {
        if self.state.game_over {
            return;
        }

        let state = &mut self.state;
        while let Some((handle, kind)) = state.timers.pop_due(now_ms) {
            match kind {
                TimerKind::PowerUpExpired => {
                    if state
                        .power_up
                        .expire(handle, &mut state.player, &mut state.timers)
                    {
                        state.push_event(GameEvent::PowerUpEnded {
                            reason: PowerUpEnd::Expired,
                        });
                        log::info!("Bat expired");
                    }
                }
                TimerKind::RespawnItem => {
                    let pos = state.spawn_item(arena);
                    state.push_event(GameEvent::ItemRespawned { pos });
                    log::debug!("Bat respawned at ({:.0}, {:.0})", pos.x, pos.y);
                }
            }
        }
    }

    /// Advance the session by one frame
    pub fn tick(
        &mut self,
        keys: &KeyState,
        now_ms: f64,
        arena: Arena,
        storage: &mut dyn Storage,
    ) -> FrameStatus {
        if self.state.game_over {
            self.finalize(storage);
            return FrameStatus::Halted;
        }

        self.frame += 1;
        self.fire_due_timers(now_ms, arena);
        self.state.clock.update(now_ms);

        step_player(
            &mut self.state.player,
            keys,
            self.tuning.boost_multiplier,
            arena,
        );
        step_enemies(&mut self.state.enemies, arena);

        check_item(&mut self.state, &self.tuning, now_ms);

        if check_enemies(&mut self.state, &self.tuning, arena) {
            self.state.clock.freeze();
            let elapsed_secs = self.state.clock.elapsed_secs();
            self.state.push_event(GameEvent::GameOver { elapsed_secs });
            log::info!(
                "Game over after {:.2}s ({} frames)",
                elapsed_secs,
                self.frame
            );
            self.finalize(storage);
            return FrameStatus::Halted;
        }

        log::trace!(
            "frame {} player ({:.1}, {:.1})",
            self.frame,
            self.state.player.pos.x,
            self.state.player.pos.y
        );
        FrameStatus::Continue
    }

    fn finalize(&mut self, storage: &mut dyn Storage) {
        if self.finalized {
            return;
        }
        self.finalized = true;

        let elapsed_secs = self.state.clock.elapsed_secs();
        if self.best.submit(elapsed_secs, storage) {
            self.state
                .push_event(GameEvent::NewHighScore { seconds: elapsed_secs });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HIGH_SCORE_KEY;
    use crate::persistence::MemoryStorage;
    use crate::sim::autopilot::Autopilot;
    use crate::sim::state::{Enemy, PlayerMode};
    use glam::Vec2;

    const ARENA: Arena = Arena {
        width: 800.0,
        height: 600.0,
    };

    /// Session with no enemies and no item on the field
    fn quiet_game(best: f64) -> Game {
        let mut game = Game::new(11, Tuning::default(), ARENA, 0.0, BestTime::new(best));
        game.state.enemies.clear();
        game.state.item.active = false;
        game
    }

    fn pressing(keys: &[&str]) -> KeyState {
        let mut state = KeyState::new();
        for key in keys {
            state.key_down(key);
        }
        state
    }

    #[test]
    fn test_idle_frames_continue() {
        let mut game = quiet_game(0.0);
        let mut store = MemoryStorage::new();
        let keys = KeyState::new();

        for i in 1..=10 {
            let now = i as f64 * 16.0;
            assert_eq!(game.tick(&keys, now, ARENA, &mut store), FrameStatus::Continue);
        }
        assert_eq!(game.frame(), 10);
        assert_eq!(game.elapsed_secs(), 0.16);
    }

    #[test]
    fn test_walk_into_item_starts_power_up() {
        let mut game = quiet_game(0.0);
        let mut store = MemoryStorage::new();
        game.state.item.pos = Vec2::new(100.0, 100.0);
        game.state.item.active = true;
        game.state.player.pos = Vec2::new(200.0, 150.0);

        // Touching edges only: no pickup yet
        let idle = KeyState::new();
        game.tick(&idle, 1_000.0, ARENA, &mut store);
        assert!(game.state.item.active);

        game.tick(&pressing(&["a"]), 1_016.0, ARENA, &mut store);
        assert!(!game.state.item.active);
        assert!(game.state.power_up.is_active());
        assert_eq!(game.state.power_up.expires_at(), Some(11_016.0));
        assert_eq!(game.state.player.mode, PlayerMode::PickupActive);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::ItemCollected {
                expires_at: 11_016.0
            }]
        );
    }

    #[test]
    fn test_item_respawns_after_delay() {
        let mut game = quiet_game(0.0);
        let mut store = MemoryStorage::new();
        game.state.item.pos = game.state.player.pos;
        game.state.item.active = true;
        let idle = KeyState::new();

        game.tick(&idle, 0.0, ARENA, &mut store);
        assert!(!game.state.item.active);
        game.drain_events();

        game.tick(&idle, 7_999.0, ARENA, &mut store);
        assert!(game.drain_events().is_empty());

        game.tick(&idle, 8_000.0, ARENA, &mut store);
        let events = game.drain_events();
        let respawned = events.iter().find_map(|e| match e {
            GameEvent::ItemRespawned { pos } => Some(*pos),
            _ => None,
        });
        let pos = respawned.expect("item should respawn at 8s");
        assert!(pos.x >= 0.0 && pos.x <= 700.0);
        assert!(pos.y >= 0.0 && pos.y <= 500.0);
    }

    #[test]
    fn test_power_up_expires_once() {
        let mut game = quiet_game(0.0);
        let mut store = MemoryStorage::new();
        game.state.item.pos = game.state.player.pos;
        game.state.item.active = true;
        // Keep the respawned item out of reach
        game.tuning.item_respawn_ms = 60_000.0;
        let idle = KeyState::new();

        game.tick(&idle, 0.0, ARENA, &mut store);
        game.drain_events();

        game.tick(&idle, 9_999.0, ARENA, &mut store);
        assert!(game.state.power_up.is_active());

        game.tick(&idle, 10_000.0, ARENA, &mut store);
        game.tick(&idle, 10_016.0, ARENA, &mut store);
        let ended: Vec<_> = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::PowerUpEnded { .. }))
            .collect();
        assert_eq!(
            ended,
            vec![GameEvent::PowerUpEnded {
                reason: PowerUpEnd::Expired
            }]
        );
        assert_eq!(game.state.player.mode, PlayerMode::Normal);
        assert_eq!(game.state.power_up.expires_at(), None);
    }

    #[test]
    fn test_second_pickup_outlives_first_timer() {
        let mut game = quiet_game(0.0);
        let mut store = MemoryStorage::new();
        let idle = KeyState::new();
        game.tuning.item_respawn_ms = 60_000.0;

        game.state.item.pos = game.state.player.pos;
        game.state.item.active = true;
        game.tick(&idle, 0.0, ARENA, &mut store);

        // Second bat under the player at 9s
        game.state.item.pos = game.state.player.pos;
        game.state.item.active = true;
        game.tick(&idle, 9_000.0, ARENA, &mut store);
        assert_eq!(game.state.power_up.expires_at(), Some(19_000.0));

        game.tick(&idle, 10_500.0, ARENA, &mut store);
        assert!(game.state.power_up.is_active());

        game.tick(&idle, 19_000.0, ARENA, &mut store);
        assert!(!game.state.power_up.is_active());
    }

    #[test]
    fn test_home_run_keeps_session_alive() {
        let mut game = quiet_game(0.0);
        let mut store = MemoryStorage::new();
        let idle = KeyState::new();
        game.state.player.pos = Vec2::ZERO;
        game.state
            .enemies
            .push(Enemy::new(Vec2::new(50.0, 50.0), Vec2::new(1.0, 1.0), 64.0));
        game.state.power_up.start(
            &mut game.state.player,
            &mut game.state.timers,
            0.0,
            10_000.0,
        );

        assert_eq!(game.tick(&idle, 16.0, ARENA, &mut store), FrameStatus::Continue);
        assert!(!game.is_over());
        assert!(!game.state.power_up.is_active());
        assert_eq!(game.state.enemies[0].pos, Vec2::ZERO);
        assert_eq!(game.state.enemies[0].vel, Vec2::new(-1.0, -1.0));
        assert!(game.state.timers.is_empty());
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::HomeRun { enemy: 0 }));
        assert!(events.contains(&GameEvent::PowerUpEnded {
            reason: PowerUpEnd::Consumed
        }));
    }

    #[test]
    fn test_hit_freezes_clock_and_saves_record() {
        let mut game = quiet_game(5.0);
        let mut store = MemoryStorage::new();
        let idle = KeyState::new();
        let near = game.state.player.pos + Vec2::splat(10.0);
        game.state.enemies.push(Enemy::new(near, Vec2::ZERO, 64.0));

        assert_eq!(game.tick(&idle, 7_250.0, ARENA, &mut store), FrameStatus::Halted);
        assert!(game.is_over());
        assert_eq!(game.elapsed_secs(), 7.25);
        assert_eq!(store.get_item(HIGH_SCORE_KEY).as_deref(), Some("7.25"));
        assert_eq!(game.best().seconds(), 7.25);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::GameOver { elapsed_secs: 7.25 }));
        assert!(events.contains(&GameEvent::NewHighScore { seconds: 7.25 }));

        // Further frames stay halted and change nothing
        assert_eq!(game.tick(&idle, 99_000.0, ARENA, &mut store), FrameStatus::Halted);
        assert_eq!(game.elapsed_secs(), 7.25);
        assert_eq!(game.frame(), 1);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_short_run_leaves_record_alone() {
        let mut game = quiet_game(30.0);
        let mut store = MemoryStorage::new();
        let near = game.state.player.pos;
        game.state.enemies.push(Enemy::new(near, Vec2::ZERO, 64.0));

        game.tick(&KeyState::new(), 3_000.0, ARENA, &mut store);
        assert!(game.is_over());
        assert_eq!(store.writes(), 0);
        assert_eq!(game.best().seconds(), 30.0);
        assert!(
            !game
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::NewHighScore { .. }))
        );
    }

    #[test]
    fn test_timers_ignored_after_game_over() {
        let mut game = quiet_game(0.0);
        game.state.timers.schedule(TimerKind::RespawnItem, 10.0);
        game.state.game_over = true;

        game.fire_due_timers(1_000.0, ARENA);
        assert!(!game.state.item.active);
        assert_eq!(game.state.timers.len(), 1);
    }

    #[test]
    fn test_resize_reclamps_everything() {
        let mut game = quiet_game(0.0);
        let mut store = MemoryStorage::new();
        game.state
            .enemies
            .push(Enemy::new(Vec2::new(700.0, 10.0), Vec2::new(1.0, 1.0), 64.0));
        game.state.player.pos = Vec2::new(600.0, 400.0);

        let small = Arena::new(500.0, 400.0);
        game.tick(&KeyState::new(), 16.0, small, &mut store);
        assert_eq!(game.state.player.pos, Vec2::new(372.0, 272.0));
        assert_eq!(game.state.enemies[0].pos.x, 436.0);
        assert!(game.state.enemies[0].vel.x < 0.0);
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut game = Game::new(2024, Tuning::default(), ARENA, 0.0, BestTime::default());
            let mut store = MemoryStorage::new();
            let mut keys = KeyState::new();
            let pilot = Autopilot::new();
            for i in 0..600 {
                pilot.drive(&game.state, ARENA, &mut keys);
                if game.tick(&keys, i as f64 * 16.0, ARENA, &mut store) == FrameStatus::Halted {
                    break;
                }
            }
            game
        };

        let a = run();
        let b = run();
        assert_eq!(a.frame(), b.frame());
        assert_eq!(a.state.player.pos, b.state.player.pos);
        assert_eq!(a.state.enemies, b.state.enemies);
        assert_eq!(a.state.item, b.state.item);
        assert_eq!(a.is_over(), b.is_over());
    }
}
