//! WebGPU rendering module
//!
//! Everything on the field is drawn as flat-colored triangles built in pixel
//! space by `shapes` and `scene`, then mapped to clip space by the pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, pixel_to_ndc};
pub use scene::build_scene;
pub use vertex::{Vertex, colors};
