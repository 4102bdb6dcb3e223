//! Static geometry for a small GPU demo scene: a cube and a procedurally
//! generated heightfield terrain plane, packed into vertex/index byte blobs
//! ready for upload into GPU buffers and a triangle-strip draw call.

pub mod data_types;
pub mod geometry_library;
pub mod terrain;

pub use data_types::Vertex;
pub use geometry_library::GeometryLibrary;
pub use terrain::{generate_terrain, HeightField, TerrainMesh, CELL_SPACING, GRID_SIZE};
