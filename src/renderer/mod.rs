//! WebGPU rendering module
//!
//! Everything is tessellated on the CPU into colored triangles in canvas
//! space; the pipeline maps them to NDC and draws a single vertex buffer.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
