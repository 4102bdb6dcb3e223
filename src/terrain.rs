use nalgebra::{Vector2, Vector3};
use rand::Rng;

use crate::data_types::Vertex;

/// Grid resolution used by the demo scene, in cells per side.
pub const GRID_SIZE: usize = 16;
/// World-space edge length of one grid cell.
pub const CELL_SPACING: f32 = 0.25;

// Fixed per-corner texture coordinates, one slot per quad corner.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.5], [0.33, 0.5], [0.0, 1.0], [0.33, 1.0]];

/// Heights for the corner points of an `n` by `n` cell grid, so
/// `(n + 1) * (n + 1)` samples in row-major order.
pub struct HeightField {
    samples: Vec<f32>,
    side: usize,
}

impl HeightField {
    /// Samples every corner height independently: a coin flip gates the
    /// height to 0.0, otherwise it is uniform in [0, 1). About half the
    /// field ends up exactly flat.
    pub fn sample<R: Rng>(n: usize, rng: &mut R) -> Self {
        let side = n + 1;
        let mut samples = Vec::with_capacity(side * side);
        for _ in 0..side * side {
            let gate = rng.gen_range(0..2) as f32;
            samples.push(gate * rng.gen::<f32>());
        }
        Self { samples, side }
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.samples[i * self.side + j]
    }
}

/// CPU-side terrain geometry in the layout `Vertex::desc()` describes,
/// drawn as one continuous triangle strip.
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// Tessellates an `n` by `n` quad grid over a freshly sampled height field,
/// centered on the origin. Each cell contributes its own 4 corner vertices
/// (corners shared between cells are duplicated, only the height sample is
/// shared) and 6 strip indices.
///
/// Panics if `n` is zero, `spacing` is not positive, or the vertex count
/// would not fit 16-bit indices.
pub fn generate_terrain<R: Rng>(n: usize, spacing: f32, rng: &mut R) -> TerrainMesh {
    assert!(n > 0, "grid resolution must be > 0");
    assert!(spacing > 0.0, "cell spacing must be > 0");
    assert!(
        4 * n * n <= usize::from(u16::MAX) + 1,
        "grid of {n}x{n} cells overflows 16-bit index range"
    );

    let heights = HeightField::sample(n, rng);
    let half = n as f32 / 2.0 * spacing;

    let mut vertices = Vec::with_capacity(4 * n * n);
    let mut indices = Vec::with_capacity(6 * n * n);

    for i in 0..n {
        for j in 0..n {
            let x0 = i as f32 * spacing - half;
            let y0 = j as f32 * spacing - half;
            let x1 = x0 + spacing;
            let y1 = y0 + spacing;

            let corners = [
                Vector3::new(x0, y0, heights.get(i, j)),
                Vector3::new(x1, y0, heights.get(i + 1, j)),
                Vector3::new(x0, y1, heights.get(i, j + 1)),
                Vector3::new(x1, y1, heights.get(i + 1, j + 1)),
            ];

            let base = vertices.len() as u16;
            for (corner, uv) in corners.iter().zip(CORNER_UVS) {
                vertices.push(Vertex::pos_and_tex(corner, &Vector2::from(uv)));
            }

            // duplicated first/last indices chain the per-cell strips into
            // one draw call via degenerate triangles
            indices.extend_from_slice(&[base, base, base + 1, base + 2, base + 3, base + 3]);
        }
    }

    log::debug!(
        "generated terrain grid: {} vertices, {} indices",
        vertices.len(),
        indices.len()
    );

    TerrainMesh { vertices, indices }
}
