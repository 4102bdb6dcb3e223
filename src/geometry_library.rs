use std::mem::size_of;

use rand::Rng;

use crate::data_types::Vertex as Vert;
use crate::terrain::{self, CELL_SPACING, GRID_SIZE};

macro_rules! vt {
    ($($x:expr, $y:expr, $z:expr, $u:expr, $v:expr),*) => {
        [
            $(Vert::pos_and_tex(&[$x, $y, $z].into(), &[$u, $v].into()),)*
        ]
    };
}

// One quad per face; corners are duplicated per face because the texture
// coordinates differ. UVs address a 3x2 atlas.
#[rustfmt::skip]
pub fn cube_vertices() -> [Vert; 24] {
    vt![
        -1.0, -1.0,  1.0, 0.0,  0.0, // +z face
         1.0, -1.0,  1.0, 0.33, 0.0,
        -1.0,  1.0,  1.0, 0.0,  0.5,
         1.0,  1.0,  1.0, 0.33, 0.5,

         1.0, -1.0,  1.0, 0.0,  0.5, // +x face
         1.0, -1.0, -1.0, 0.33, 0.5,
         1.0,  1.0,  1.0, 0.0,  1.0,
         1.0,  1.0, -1.0, 0.33, 1.0,

         1.0, -1.0, -1.0, 0.66, 0.5, // -z face
        -1.0, -1.0, -1.0, 1.0,  0.5,
         1.0,  1.0, -1.0, 0.66, 1.0,
        -1.0,  1.0, -1.0, 1.0,  1.0,

        -1.0, -1.0, -1.0, 0.66, 0.0, // -x face
        -1.0, -1.0,  1.0, 1.0,  0.0,
        -1.0,  1.0, -1.0, 0.66, 0.5,
        -1.0,  1.0,  1.0, 1.0,  0.5,

        -1.0, -1.0, -1.0, 0.33, 0.0, // -y face
         1.0, -1.0, -1.0, 0.66, 0.0,
        -1.0, -1.0,  1.0, 0.33, 0.5,
         1.0, -1.0,  1.0, 0.66, 0.5,

        -1.0,  1.0,  1.0, 0.33, 0.5, // +y face
         1.0,  1.0,  1.0, 0.66, 0.5,
        -1.0,  1.0, -1.0, 0.33, 1.0,
         1.0,  1.0, -1.0, 0.66, 1.0
    ]
}

// Per-face strips chained into one strip. A face whose predecessor has the
// opposite vertex order repeats both the last and the first index, otherwise
// only one of them.
#[rustfmt::skip]
pub fn cube_indices() -> [u16; 34] {
    [
         0,  1,  2,  3,  3,
         4,  4,  5,  6,  7,  7,
         8,  8,  9, 10, 11, 11,
        12, 12, 13, 14, 15, 15,
        16, 16, 17, 18, 19, 19,
        20, 20, 21, 22, 23,
    ]
}

/// All demo geometry packed back to back: one byte blob for vertices, one
/// for indices, addressed with the offset and count constants below.
pub struct GeometryLibrary {
    vertex_data: Vec<u8>,
    index_data: Vec<u8>,
}

impl GeometryLibrary {
    pub const CUBE_VERTEX_OFFSET: u64 = 0;
    pub const TERRAIN_VERTEX_OFFSET: u64 = size_of::<[Vert; 24]>() as u64;

    pub const CUBE_INDEX_OFFSET: u64 = 0;
    pub const TERRAIN_INDEX_OFFSET: u64 = size_of::<[u16; 34]>() as u64;

    pub const CUBE_VERTEX_COUNT: u32 = 24;
    pub const TERRAIN_VERTEX_COUNT: u32 = (4 * GRID_SIZE * GRID_SIZE) as u32;

    pub const CUBE_INDEX_COUNT: u32 = 34;
    pub const TERRAIN_INDEX_COUNT: u32 = (6 * GRID_SIZE * GRID_SIZE) as u32;

    pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint16;
    pub const TOPOLOGY: wgpu::PrimitiveTopology = wgpu::PrimitiveTopology::TriangleStrip;

    pub fn new<R: Rng>(rng: &mut R) -> Self {
        use bytemuck::cast_slice as to_u8;

        let terrain = terrain::generate_terrain(GRID_SIZE, CELL_SPACING, rng);

        let vertex_data: Vec<u8> = to_u8(&cube_vertices())
            .iter()
            .chain(to_u8(terrain.vertices.as_slice()))
            .cloned()
            .collect();

        let index_data: Vec<u8> = to_u8(&cube_indices())
            .iter()
            .chain(to_u8(terrain.indices.as_slice()))
            .cloned()
            .collect();

        log::debug!(
            "packed geometry: {} vertex bytes, {} index bytes",
            vertex_data.len(),
            index_data.len()
        );

        Self {
            vertex_data,
            index_data,
        }
    }

    pub fn geometry_vertex_data(&self) -> &[u8] {
        &self.vertex_data
    }

    pub fn geometry_index_data(&self) -> &[u8] {
        &self.index_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn cube_indices_chain_per_face_strips() {
        let indices = cube_indices();

        assert_eq!(indices.len(), GeometryLibrary::CUBE_INDEX_COUNT as usize);
        assert!(indices.iter().all(|&i| i < 24));

        // every face after the first starts on a doubled index, every face
        // before the last ends on one
        for face in 1..6 {
            let start = face * 6 - 1;
            assert_eq!(indices[start], indices[start + 1]);
        }
        for face in 0..5 {
            let end = face * 6 + 3;
            assert_eq!(indices[end], indices[end + 1]);
        }
    }

    #[test]
    fn cube_faces_use_distinct_atlas_cells() {
        let vertices = cube_vertices();

        let mut cells: Vec<(u32, u32)> = vertices
            .chunks_exact(4)
            .map(|quad| {
                let u = quad.iter().map(|v| v.tex_coord.x).fold(1.0_f32, f32::min);
                let v = quad.iter().map(|v| v.tex_coord.y).fold(1.0_f32, f32::min);
                ((u * 3.0).round() as u32, (v * 2.0).round() as u32)
            })
            .collect();
        cells.sort_unstable();
        cells.dedup();

        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn blobs_cover_cube_then_terrain() {
        let _ = simple_logger::init();

        let lib = GeometryLibrary::new(&mut StdRng::seed_from_u64(7));

        let vertex_count =
            (GeometryLibrary::CUBE_VERTEX_COUNT + GeometryLibrary::TERRAIN_VERTEX_COUNT) as usize;
        let index_count =
            (GeometryLibrary::CUBE_INDEX_COUNT + GeometryLibrary::TERRAIN_INDEX_COUNT) as usize;

        assert_eq!(
            lib.geometry_vertex_data().len(),
            vertex_count * size_of::<Vert>()
        );
        assert_eq!(lib.geometry_index_data().len(), index_count * size_of::<u16>());

        assert_eq!(
            GeometryLibrary::TERRAIN_VERTEX_OFFSET,
            GeometryLibrary::CUBE_VERTEX_COUNT as u64 * size_of::<Vert>() as u64
        );
        assert_eq!(
            GeometryLibrary::TERRAIN_INDEX_OFFSET,
            GeometryLibrary::CUBE_INDEX_COUNT as u64 * size_of::<u16>() as u64
        );
    }

    #[test]
    fn packed_terrain_matches_standalone_generation() {
        let lib = GeometryLibrary::new(&mut StdRng::seed_from_u64(42));
        let mesh = terrain::generate_terrain(
            GRID_SIZE,
            CELL_SPACING,
            &mut StdRng::seed_from_u64(42),
        );

        let terrain_bytes =
            &lib.geometry_vertex_data()[GeometryLibrary::TERRAIN_VERTEX_OFFSET as usize..];
        assert_eq!(
            terrain_bytes,
            bytemuck::cast_slice::<Vert, u8>(&mesh.vertices)
        );

        let index_bytes =
            &lib.geometry_index_data()[GeometryLibrary::TERRAIN_INDEX_OFFSET as usize..];
        assert_eq!(index_bytes, bytemuck::cast_slice::<u16, u8>(&mesh.indices));
    }
}
