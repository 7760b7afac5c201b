//! Mesh resources: the vertex layout, CPU-side mesh descriptions, their
//! GPU-resident counterparts, procedural generators, and OBJ import.

pub mod mesh;
pub mod obj;
pub mod primitives;
pub mod vertex;

pub use mesh::{Mesh, MeshData};
pub use obj::{load_obj, MeshImportError};
pub use primitives::{box_mesh, geosphere, grid, quad, sphere};
pub use vertex::Vertex;
