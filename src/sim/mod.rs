//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time arrives as millisecond timestamps from the host
//! - Seeded RNG only
//! - Stable iteration order (enemies by index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod input;
pub mod movement;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod timers;

pub use autopilot::Autopilot;
pub use clock::{SessionClock, format_seconds};
pub use collision::{Aabb, check_enemies, check_item};
pub use input::{Control, KeyState};
pub use movement::{knockback, step_enemies, step_enemy, step_player};
pub use powerup::{PowerUp, PowerUpEnd};
pub use state::{Arena, Enemy, GameEvent, GameState, Item, Player, PlayerMode};
pub use tick::{FrameStatus, Game};
pub use timers::{TimerHandle, TimerKind, TimerQueue};
