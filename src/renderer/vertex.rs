//! Pixel-space vertex format and the field palette

use bytemuck::{Pod, Zeroable};

/// Triangle corner in screen pixels until the pipeline maps it to clip space
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Interleaved `position` then `color`, matching `shader.wgsl`
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Light grass field
    pub const BACKGROUND: [f32; 4] = [0.78, 0.88, 0.72, 1.0];
    pub const PLAYER: [f32; 4] = [0.95, 0.9, 0.85, 1.0];
    pub const PLAYER_OUTLINE: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    /// Player holding the bat
    pub const PLAYER_POWERED: [f32; 4] = [0.95, 0.75, 0.15, 1.0];
    pub const ENEMY: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const ENEMY_OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const ITEM: [f32; 4] = [0.6, 0.4, 0.2, 1.0];
    pub const ITEM_OUTLINE: [f32; 4] = [0.1, 0.2, 0.95, 1.0];
    /// Dimmed overlay once the session has ended
    pub const GAME_OVER_TINT: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }
}
