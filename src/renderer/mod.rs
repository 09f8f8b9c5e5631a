//! Rendering support
//!
//! CPU-side geometry only: builds clip-space vertices from a read-only view
//! of the world. Uploading and drawing them is left to the host.

pub mod shapes;
pub mod vertex;

pub use shapes::{Mesh, world_mesh};
pub use vertex::Vertex;
