//! Scene assembly
//!
//! Turns a [`GameState`] into the flat vertex list the pipeline draws. Pure
//! and host-independent, so it runs under native tests.

use glam::Vec2;

use super::shapes::{circle, rect, rect_outline};
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::{Arena, GameState, PlayerMode};

const OUTLINE: f32 = 2.0;
const BALL_SEGMENTS: u32 = 20;

/// Background, item (if active), enemies, then the player on top
pub fn build_scene(state: &GameState, arena: Arena, settings: &Settings) -> Vec<Vertex> {
    let mut verts = rect(
        Vec2::ZERO,
        Vec2::new(arena.width, arena.height),
        colors::BACKGROUND,
    );

    if state.item.active {
        let size = Vec2::splat(state.item.size);
        // Bat: a long handle across the slot
        let handle = Vec2::new(size.x, size.y * 0.3);
        let handle_pos = state.item.pos + Vec2::new(0.0, (size.y - handle.y) * 0.5);
        verts.extend(rect(handle_pos, handle, colors::ITEM));
        if settings.outlines {
            verts.extend(rect_outline(state.item.pos, size, OUTLINE, colors::ITEM_OUTLINE));
        }
    }

    for enemy in &state.enemies {
        let half = enemy.size * 0.5;
        verts.extend(circle(
            enemy.pos + Vec2::splat(half),
            half,
            colors::ENEMY,
            BALL_SEGMENTS,
        ));
        if settings.outlines {
            verts.extend(rect_outline(
                enemy.pos,
                Vec2::splat(enemy.size),
                OUTLINE,
                colors::ENEMY_OUTLINE,
            ));
        }
    }

    let player = &state.player;
    let fill = match player.mode {
        PlayerMode::Normal => colors::PLAYER,
        PlayerMode::PickupActive => colors::PLAYER_POWERED,
    };
    verts.extend(rect(player.pos, Vec2::splat(player.size), fill));
    if settings.outlines {
        verts.extend(rect_outline(
            player.pos,
            Vec2::splat(player.size),
            OUTLINE,
            colors::PLAYER_OUTLINE,
        ));
    }

    if state.game_over {
        verts.extend(rect(
            Vec2::ZERO,
            Vec2::new(arena.width, arena.height),
            colors::GAME_OVER_TINT,
        ));
    }

    verts
}
