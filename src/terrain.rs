use glam::Vec3;
use log::info;
use noise::{NoiseFn, Perlin};

use crate::mesh::Vertex;

/// How sample heights are derived from (x, z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightStyle {
    /// Two-frequency sine hills: base waves at the terrain frequency plus a
    /// finer detail wave mixed in at `detail_weight`.
    Sinusoid {
        detail_frequency: f32,
        detail_weight: f32,
    },
    /// 2D Perlin gradient noise, reproducible per seed.
    Noise { seed: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParams {
    pub width: f32,
    pub depth: f32,
    pub segments_x: u32,
    pub segments_z: u32,
    pub amplitude: f32,
    pub frequency: f32,
    pub style: HeightStyle,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            depth: 100.0,
            segments_x: 100,
            segments_z: 100,
            amplitude: 5.0,
            frequency: 0.05,
            style: HeightStyle::Sinusoid {
                detail_frequency: 0.4,
                detail_weight: 0.3,
            },
        }
    }
}

/// The height function behind a generated terrain. Pure in (x, z) and the
/// parameters, so the same parameters always reproduce the same hills.
enum Field {
    Sinusoid {
        frequency: f32,
        detail_frequency: f32,
        detail_weight: f32,
        amplitude: f32,
    },
    Noise {
        perlin: Perlin,
        frequency: f64,
        amplitude: f32,
    },
}

impl Field {
    fn of(params: &TerrainParams) -> Self {
        match params.style {
            HeightStyle::Sinusoid {
                detail_frequency,
                detail_weight,
            } => Field::Sinusoid {
                frequency: params.frequency,
                detail_frequency,
                detail_weight,
                amplitude: params.amplitude,
            },
            HeightStyle::Noise { seed } => Field::Noise {
                perlin: Perlin::new(seed),
                frequency: params.frequency as f64,
                amplitude: params.amplitude,
            },
        }
    }

    fn height(&self, x: f32, z: f32) -> f32 {
        match self {
            Field::Sinusoid {
                frequency,
                detail_frequency,
                detail_weight,
                amplitude,
            } => {
                let base = (x * frequency).sin() * (z * frequency).cos();
                let detail = (x * detail_frequency).sin() * (z * detail_frequency).cos() * detail_weight;
                (base + detail) * amplitude
            }
            Field::Noise {
                perlin,
                frequency,
                amplitude,
            } => {
                let n = perlin.get([x as f64 * frequency, z as f64 * frequency]);
                n as f32 * amplitude
            }
        }
    }
}

/// A static height-field over `[-width/2, width/2] x [-depth/2, depth/2]`.
/// Heights and normals are fixed at generation; queries only read.
pub struct Terrain {
    params: TerrainParams,
    heights: Vec<f32>,
    normals: Vec<Vec3>,
}

impl Terrain {
    pub fn generate(params: TerrainParams) -> Self {
        debug_assert!(params.segments_x >= 1 && params.segments_z >= 1);
        let nx = params.segments_x as usize + 1;
        let nz = params.segments_z as usize + 1;
        let field = Field::of(&params);

        let mut heights = Vec::with_capacity(nx * nz);
        for iz in 0..nz {
            for ix in 0..nx {
                let (x, z) = sample_position(&params, ix, iz);
                heights.push(field.height(x, z));
            }
        }
        let normals = compute_normals(&params, &heights);

        info!(
            "generated terrain: {}x{} world units, {} samples",
            params.width,
            params.depth,
            nx * nz
        );
        Self {
            params,
            heights,
            normals,
        }
    }

    fn height_sample(&self, ix: usize, iz: usize) -> f32 {
        self.heights[iz * (self.params.segments_x as usize + 1) + ix]
    }

    /// Ground height under (x, z), bilinearly interpolated between the four
    /// surrounding samples. Returns `None` outside the sampled domain; the
    /// caller decides how to degrade (the player free-falls).
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let half_w = self.params.width * 0.5;
        let half_d = self.params.depth * 0.5;
        if !(-half_w..=half_w).contains(&x) || !(-half_d..=half_d).contains(&z) {
            return None;
        }

        let gx = (x + half_w) / self.params.width * self.params.segments_x as f32;
        let gz = (z + half_d) / self.params.depth * self.params.segments_z as f32;
        let ix = (gx.floor() as usize).min(self.params.segments_x as usize - 1);
        let iz = (gz.floor() as usize).min(self.params.segments_z as usize - 1);
        let fx = gx - ix as f32;
        let fz = gz - iz as f32;

        let h00 = self.height_sample(ix, iz);
        let h10 = self.height_sample(ix + 1, iz);
        let h01 = self.height_sample(ix, iz + 1);
        let h11 = self.height_sample(ix + 1, iz + 1);
        let near = h00 + (h10 - h00) * fx;
        let far = h01 + (h11 - h01) * fx;
        Some(near + (far - near) * fz)
    }

    /// Flat vertex/index lists for the renderer. Triangles wind
    /// counter-clockwise seen from above so back-face culling keeps the top.
    pub fn mesh(&self) -> (Vec<Vertex>, Vec<u32>) {
        let nx = self.params.segments_x as usize + 1;
        let nz = self.params.segments_z as usize + 1;

        let mut vertices = Vec::with_capacity(nx * nz);
        for iz in 0..nz {
            for ix in 0..nx {
                let (x, z) = sample_position(&self.params, ix, iz);
                let h = self.height_sample(ix, iz);
                vertices.push(Vertex {
                    position: [x, h, z],
                    normal: self.normals[iz * nx + ix].to_array(),
                    color: grass_color(&self.params, h),
                });
            }
        }

        let mut indices = Vec::with_capacity(self.params.segments_x as usize * self.params.segments_z as usize * 6);
        for iz in 0..self.params.segments_z as usize {
            for ix in 0..self.params.segments_x as usize {
                let i00 = (iz * nx + ix) as u32;
                let i10 = i00 + 1;
                let i01 = i00 + nx as u32;
                let i11 = i01 + 1;
                indices.extend_from_slice(&[i00, i01, i11, i00, i11, i10]);
            }
        }
        (vertices, indices)
    }
}

fn sample_position(params: &TerrainParams, ix: usize, iz: usize) -> (f32, f32) {
    let x = ix as f32 / params.segments_x as f32 * params.width - params.width * 0.5;
    let z = iz as f32 / params.segments_z as f32 * params.depth - params.depth * 0.5;
    (x, z)
}

/// Per-vertex normals by central differences on the height grid, one-sided
/// at the borders.
fn compute_normals(params: &TerrainParams, heights: &[f32]) -> Vec<Vec3> {
    let nx = params.segments_x as usize + 1;
    let nz = params.segments_z as usize + 1;
    let step_x = params.width / params.segments_x as f32;
    let step_z = params.depth / params.segments_z as f32;
    let h = |ix: usize, iz: usize| heights[iz * nx + ix];

    let mut normals = Vec::with_capacity(nx * nz);
    for iz in 0..nz {
        for ix in 0..nx {
            let (left, right, dx) = if ix == 0 {
                (h(0, iz), h(1, iz), step_x)
            } else if ix == nx - 1 {
                (h(nx - 2, iz), h(nx - 1, iz), step_x)
            } else {
                (h(ix - 1, iz), h(ix + 1, iz), 2.0 * step_x)
            };
            let (near, far, dz) = if iz == 0 {
                (h(ix, 0), h(ix, 1), step_z)
            } else if iz == nz - 1 {
                (h(ix, nz - 2), h(ix, nz - 1), step_z)
            } else {
                (h(ix, iz - 1), h(ix, iz + 1), 2.0 * step_z)
            };
            let slope_x = (right - left) / dx;
            let slope_z = (far - near) / dz;
            normals.push(Vec3::new(-slope_x, 1.0, -slope_z).normalize());
        }
    }
    normals
}

fn grass_color(params: &TerrainParams, height: f32) -> [f32; 3] {
    let peak = match params.style {
        HeightStyle::Sinusoid { detail_weight, .. } => params.amplitude * (1.0 + detail_weight),
        HeightStyle::Noise { .. } => params.amplitude,
    };
    let t = if peak > 0.0 {
        ((height / peak) * 0.5 + 0.5).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let low = Vec3::new(0.08, 0.35, 0.10);
    let high = Vec3::new(0.45, 0.62, 0.25);
    low.lerp(high, t).to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hill_params() -> TerrainParams {
        TerrainParams {
            width: 20.0,
            depth: 20.0,
            segments_x: 20,
            segments_z: 20,
            amplitude: 5.0,
            frequency: 0.05,
            style: HeightStyle::Sinusoid {
                detail_frequency: 0.4,
                detail_weight: 0.3,
            },
        }
    }

    fn flat_params() -> TerrainParams {
        TerrainParams {
            amplitude: 0.0,
            ..hill_params()
        }
    }

    #[test]
    fn height_query_is_deterministic() {
        let a = Terrain::generate(hill_params());
        let b = Terrain::generate(hill_params());
        assert_eq!(a.heights, b.heights);
        for _ in 0..3 {
            assert_eq!(a.height_at(3.7, -1.2), a.height_at(3.7, -1.2));
        }
    }

    #[test]
    fn samples_match_analytic_sinusoid() {
        let terrain = Terrain::generate(hill_params());
        let (x, z) = (2.0_f32, -5.0_f32);
        let expected = ((x * 0.05).sin() * (z * 0.05).cos()
            + (x * 0.4).sin() * (z * 0.4).cos() * 0.3)
            * 5.0;
        let got = terrain.height_at(x, z).unwrap();
        assert!((got - expected).abs() < 1e-4, "got {got}, expected {expected}");
    }

    #[test]
    fn bilinear_center_is_corner_average() {
        let terrain = Terrain::generate(hill_params());
        // Cell with corners at (2,3)..(3,4) in grid indices.
        let avg = (terrain.height_sample(2, 3)
            + terrain.height_sample(3, 3)
            + terrain.height_sample(2, 4)
            + terrain.height_sample(3, 4))
            / 4.0;
        // Grid spacing is 1 world unit, origin sample at (-10, -10).
        let got = terrain.height_at(-7.5, -6.5).unwrap();
        assert!((got - avg).abs() < 1e-5);
    }

    #[test]
    fn queries_outside_domain_return_none() {
        let terrain = Terrain::generate(hill_params());
        assert!(terrain.height_at(10.01, 0.0).is_none());
        assert!(terrain.height_at(-10.01, 0.0).is_none());
        assert!(terrain.height_at(0.0, 10.5).is_none());
        // Domain edges are still sampled.
        assert!(terrain.height_at(10.0, -10.0).is_some());
    }

    #[test]
    fn flat_field_is_zero_with_up_normals() {
        let terrain = Terrain::generate(flat_params());
        assert_eq!(terrain.height_at(1.3, -4.2), Some(0.0));
        for n in &terrain.normals {
            assert_eq!(*n, Vec3::Y);
        }
    }

    #[test]
    fn noise_heights_are_seed_deterministic() {
        let params = TerrainParams {
            style: HeightStyle::Noise { seed: 42 },
            ..hill_params()
        };
        let a = Terrain::generate(params.clone());
        let b = Terrain::generate(params);
        assert_eq!(a.heights, b.heights);
        let bounded = a.heights.iter().all(|h| h.abs() <= 5.0);
        assert!(bounded);
    }

    #[test]
    fn mesh_has_expected_counts_and_unit_normals() {
        let terrain = Terrain::generate(hill_params());
        let (vertices, indices) = terrain.mesh();
        assert_eq!(vertices.len(), 21 * 21);
        assert_eq!(indices.len(), 20 * 20 * 6);
        for v in &vertices {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }
}
