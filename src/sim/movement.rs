//! Player steering, enemy wall bouncing, and knockback

use glam::Vec2;

use super::input::KeyState;
use super::state::{Arena, Enemy, Player};

/// Apply one frame of held-key movement, then clamp into the arena.
///
/// The raw direction is normalized before scaling so diagonals are not
/// faster than straight moves.
pub fn step_player(player: &mut Player, keys: &KeyState, boost_multiplier: f32, arena: Arena) {
    player.boosted = keys.boost;

    let dir = keys.direction();
    if dir != Vec2::ZERO {
        let speed = if keys.boost {
            player.speed * boost_multiplier
        } else {
            player.speed
        };
        player.pos += dir.normalize() * speed;
    }

    player.pos = arena.clamp(player.pos, player.size);
}

/// Advance every enemy by its velocity, reflecting off the arena walls
pub fn step_enemies(enemies: &mut [Enemy], arena: Arena) {
    for enemy in enemies {
        step_enemy(enemy, arena);
    }
}

/// Advance one enemy. Crossing a wall pins it to the wall and points that
/// velocity component back into the arena.
pub fn step_enemy(enemy: &mut Enemy, arena: Arena) {
    enemy.pos += enemy.vel;
    let max = arena.max_pos(enemy.size);

    if enemy.pos.x < 0.0 {
        enemy.pos.x = 0.0;
        enemy.vel.x = enemy.vel.x.abs();
    } else if enemy.pos.x > max.x {
        enemy.pos.x = max.x;
        enemy.vel.x = -enemy.vel.x.abs();
    }

    if enemy.pos.y < 0.0 {
        enemy.pos.y = 0.0;
        enemy.vel.y = enemy.vel.y.abs();
    } else if enemy.pos.y > max.y {
        enemy.pos.y = max.y;
        enemy.vel.y = -enemy.vel.y.abs();
    }
}

/// Home-run impact: reverse the enemy and throw it `scale` frames' worth of
/// its new velocity, clamped to the arena.
pub fn knockback(enemy: &mut Enemy, scale: f32, arena: Arena) {
    enemy.vel = -enemy.vel;
    enemy.pos = arena.clamp(enemy.pos + enemy.vel * scale, enemy.size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARENA: Arena = Arena {
        width: 800.0,
        height: 600.0,
    };

    fn keys(up: bool, down: bool, left: bool, right: bool, boost: bool) -> KeyState {
        let mut k = KeyState::default();
        k.up = up;
        k.down = down;
        k.left = left;
        k.right = right;
        k.boost = boost;
        k
    }

    #[test]
    fn test_axial_and_diagonal_same_speed() {
        let start = Vec2::new(300.0, 300.0);

        let mut axial = Player::new(start, 128.0);
        step_player(&mut axial, &keys(false, false, false, true, false), 2.0, ARENA);
        assert!(((axial.pos - start).length() - 5.0).abs() < 1e-4);
        assert_eq!(axial.pos, Vec2::new(305.0, 300.0));

        let mut diagonal = Player::new(start, 128.0);
        step_player(&mut diagonal, &keys(true, false, false, true, false), 2.0, ARENA);
        assert!(((diagonal.pos - start).length() - 5.0).abs() < 1e-4);
        assert!(diagonal.pos.x > start.x && diagonal.pos.y < start.y);
    }

    #[test]
    fn test_boost_doubles_displacement() {
        let start = Vec2::new(300.0, 300.0);
        let mut player = Player::new(start, 128.0);
        step_player(&mut player, &keys(false, true, true, false, true), 2.0, ARENA);
        assert!(((player.pos - start).length() - 10.0).abs() < 1e-4);
        assert!(player.boosted);
    }

    #[test]
    fn test_no_keys_no_movement() {
        let start = Vec2::new(10.0, 20.0);
        let mut player = Player::new(start, 128.0);
        step_player(&mut player, &KeyState::default(), 2.0, ARENA);
        assert_eq!(player.pos, start);
    }

    #[test]
    fn test_clamps_at_walls() {
        let mut player = Player::new(Vec2::new(2.0, 470.0), 128.0);
        step_player(&mut player, &keys(false, true, true, false, true), 2.0, ARENA);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.pos.y, 472.0);
    }

    #[test]
    fn test_shrunk_viewport_pulls_player_in() {
        let mut player = Player::new(Vec2::new(700.0, 500.0), 128.0);
        step_player(&mut player, &KeyState::default(), 2.0, Arena::new(400.0, 300.0));
        assert_eq!(player.pos, Vec2::new(272.0, 172.0));
    }

    #[test]
    fn test_enemy_bounces_inside_800x600() {
        let mut enemy = Enemy::new(Vec2::ZERO, Vec2::new(1.0, 1.0), 64.0);
        let mut x_flips = 0;
        let mut y_flips = 0;

        for _ in 0..2000 {
            let before = enemy.vel;
            step_enemy(&mut enemy, ARENA);
            assert!(enemy.pos.x >= 0.0 && enemy.pos.x <= 736.0);
            assert!(enemy.pos.y >= 0.0 && enemy.pos.y <= 536.0);
            if enemy.vel.x != before.x {
                x_flips += 1;
            }
            if enemy.vel.y != before.y {
                y_flips += 1;
            }
        }

        // Right wall on frame 737, left on 1474; bottom on 537, top on 1074, bottom on 1611
        assert_eq!(x_flips, 2);
        assert_eq!(y_flips, 3);
    }

    #[test]
    fn test_enemy_first_400_frames_in_bounds() {
        let mut enemy = Enemy::new(Vec2::ZERO, Vec2::new(1.0, 1.0), 64.0);
        for _ in 0..400 {
            step_enemy(&mut enemy, ARENA);
            assert!(enemy.pos.x <= 736.0 && enemy.pos.y <= 536.0);
        }
        assert_eq!(enemy.pos, Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_enemy_flip_at_right_wall() {
        let mut enemy = Enemy::new(Vec2::new(735.0, 100.0), Vec2::new(2.5, 1.0), 64.0);
        step_enemy(&mut enemy, ARENA);
        assert_eq!(enemy.pos.x, 736.0);
        assert_eq!(enemy.vel, Vec2::new(-2.5, 1.0));
        step_enemy(&mut enemy, ARENA);
        assert_eq!(enemy.pos.x, 733.5);
        assert_eq!(enemy.vel.x, -2.5);
    }

    #[test]
    fn test_knockback_reverses_and_throws() {
        let mut enemy = Enemy::new(Vec2::new(50.0, 50.0), Vec2::new(1.0, 1.0), 64.0);
        knockback(&mut enemy, 80.0, ARENA);
        assert_eq!(enemy.vel, Vec2::new(-1.0, -1.0));
        assert_eq!(enemy.pos, Vec2::ZERO);

        let mut enemy = Enemy::new(Vec2::new(400.0, 300.0), Vec2::new(-2.0, 1.5), 64.0);
        knockback(&mut enemy, 80.0, ARENA);
        assert_eq!(enemy.vel, Vec2::new(2.0, -1.5));
        assert_eq!(enemy.pos, Vec2::new(560.0, 180.0));
    }

    proptest! {
        #[test]
        fn prop_displacement_is_speed(
            up in any::<bool>(),
            down in any::<bool>(),
            left in any::<bool>(),
            right in any::<bool>(),
            boost in any::<bool>(),
        ) {
            let k = keys(up, down, left, right, boost);
            prop_assume!(k.direction() != Vec2::ZERO);

            // Far from the walls so clamping cannot interfere
            let start = Vec2::new(1000.0, 1000.0);
            let mut player = Player::new(start, 128.0);
            step_player(&mut player, &k, 2.0, Arena::new(4000.0, 4000.0));

            let expected = if boost { 10.0 } else { 5.0 };
            prop_assert!(((player.pos - start).length() - expected).abs() < 1e-3);
        }

        #[test]
        fn prop_player_stays_in_bounds(
            x in -2000.0f32..4000.0,
            y in -2000.0f32..4000.0,
            w in 128.0f32..2000.0,
            h in 128.0f32..2000.0,
            up in any::<bool>(),
            left in any::<bool>(),
            boost in any::<bool>(),
        ) {
            let arena = Arena::new(w, h);
            let mut player = Player::new(Vec2::new(x, y), 128.0);
            step_player(&mut player, &keys(up, !up, left, !left, boost), 2.0, arena);

            prop_assert!(player.pos.x >= 0.0 && player.pos.x <= w - 128.0);
            prop_assert!(player.pos.y >= 0.0 && player.pos.y <= h - 128.0);
        }

        #[test]
        fn prop_enemy_never_leaves_arena(
            x in 0.0f32..736.0,
            y in 0.0f32..536.0,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
            frames in 1usize..600,
        ) {
            let mut enemy = Enemy::new(Vec2::new(x, y), Vec2::new(vx, vy), 64.0);
            for _ in 0..frames {
                step_enemy(&mut enemy, ARENA);
                prop_assert!(enemy.pos.x >= 0.0 && enemy.pos.x <= 736.0);
                prop_assert!(enemy.pos.y >= 0.0 && enemy.pos.y <= 536.0);
                prop_assert_eq!(enemy.vel.x.abs(), vx.abs());
                prop_assert_eq!(enemy.vel.y.abs(), vy.abs());
            }
        }
    }
}
