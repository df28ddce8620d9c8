//! UV-sphere mesh generation via latitude/longitude band sweep.

use glam::Vec3;

/// Errors from sphere tessellation parameters.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    /// Tessellation requires at least one band along each axis.
    #[error("sphere tessellation bands must be at least 1, got {lat_bands}x{long_bands}")]
    InvalidBands { lat_bands: u32, long_bands: u32 },
}

/// A sphere mesh suitable for textured body rendering.
#[derive(Debug)]
pub struct SphereMesh {
    /// Vertex positions, sphere centered at the local origin.
    pub positions: Vec<Vec3>,
    /// Normal vectors (unit direction of each position).
    pub normals: Vec<Vec3>,
    /// Equirectangular UV coordinates per vertex.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices.
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generate a UV sphere with the given band counts and radius.
///
/// Sweeps the polar angle 0..π over `lat_bands` steps and the azimuth
/// 0..2π over `long_bands` steps, producing
/// `(lat_bands + 1) * (long_bands + 1)` vertices and
/// `6 * lat_bands * long_bands` indices. The duplicated seam column and the
/// collapsed pole rows carry distinct UVs, which is what makes an
/// equirectangular texture wrap cleanly.
pub fn generate_uv_sphere(
    lat_bands: u32,
    long_bands: u32,
    radius: f32,
) -> Result<SphereMesh, MeshError> {
    if lat_bands < 1 || long_bands < 1 {
        return Err(MeshError::InvalidBands {
            lat_bands,
            long_bands,
        });
    }

    let vertex_count = ((lat_bands + 1) * (long_bands + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for lat_idx in 0..=lat_bands {
        let theta = lat_idx as f32 * std::f32::consts::PI / lat_bands as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long_idx in 0..=long_bands {
            let phi = long_idx as f32 * std::f32::consts::TAU / long_bands as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let dir = Vec3::new(cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            positions.push(dir * radius);
            normals.push(dir);
            uvs.push([
                1.0 - long_idx as f32 / long_bands as f32,
                1.0 - lat_idx as f32 / lat_bands as f32,
            ]);
        }
    }

    let mut indices = Vec::with_capacity((6 * lat_bands * long_bands) as usize);
    for lat in 0..lat_bands {
        for long in 0..long_bands {
            let first = lat * (long_bands + 1) + long;
            let second = first + long_bands + 1;

            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    Ok(SphereMesh {
        positions,
        normals,
        uvs,
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_and_index_counts() {
        let mesh = generate_uv_sphere(30, 30, 2.0).unwrap();
        assert_eq!(mesh.vertex_count(), 31 * 31);
        assert_eq!(mesh.indices.len(), 6 * 30 * 30);
    }

    #[test]
    fn test_counts_for_asymmetric_bands() {
        let mesh = generate_uv_sphere(4, 7, 1.0).unwrap();
        assert_eq!(mesh.vertex_count(), 5 * 8);
        assert_eq!(mesh.indices.len(), 6 * 4 * 7);
        assert_eq!(mesh.triangle_count(), 2 * 4 * 7);
    }

    #[test]
    fn test_pole_rows_collapse() {
        let radius = 3.5;
        let long_bands = 12;
        let mesh = generate_uv_sphere(8, long_bands, radius).unwrap();

        // First row is the north pole, last row the south pole.
        for long_idx in 0..=long_bands as usize {
            let north = mesh.positions[long_idx];
            assert!((north - Vec3::new(0.0, radius, 0.0)).length() < 1e-4);

            let south = mesh.positions[mesh.positions.len() - 1 - long_idx];
            assert!((south - Vec3::new(0.0, -radius, 0.0)).length() < 1e-4);
        }
    }

    #[test]
    fn test_normal_is_unit_position() {
        let radius = 12.756;
        let mesh = generate_uv_sphere(10, 10, radius).unwrap();
        for (pos, norm) in mesh.positions.iter().zip(mesh.normals.iter()) {
            assert!((norm.length() - 1.0).abs() < 1e-5);
            assert!((*pos / radius - *norm).length() < 1e-5);
        }
    }

    #[test]
    fn test_vertices_on_sphere_surface() {
        let mesh = generate_uv_sphere(16, 16, 7.0).unwrap();
        for pos in &mesh.positions {
            assert!(
                (pos.length() - 7.0).abs() < 1e-4,
                "vertex off the sphere surface: length = {}",
                pos.length()
            );
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = generate_uv_sphere(5, 9, 1.0).unwrap();
        let n = mesh.vertex_count() as u32;
        for &idx in &mesh.indices {
            assert!(idx < n, "index {idx} out of bounds (vertex count = {n})");
        }
    }

    #[test]
    fn test_uv_range_and_seam() {
        let mesh = generate_uv_sphere(6, 6, 1.0).unwrap();
        for uv in &mesh.uvs {
            assert!((0.0..=1.0).contains(&uv[0]));
            assert!((0.0..=1.0).contains(&uv[1]));
        }
        // Column 0 carries u = 1, the duplicated seam column u = 0.
        assert!((mesh.uvs[0][0] - 1.0).abs() < 1e-6);
        assert!(mesh.uvs[6][0].abs() < 1e-6);
    }

    #[test]
    fn test_deterministic() {
        let a = generate_uv_sphere(9, 13, 4.2).unwrap();
        let b = generate_uv_sphere(9, 13, 4.2).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.uvs, b.uvs);
    }

    #[test]
    fn test_zero_bands_rejected() {
        let err = generate_uv_sphere(0, 10, 1.0).unwrap_err();
        assert_eq!(
            err,
            MeshError::InvalidBands {
                lat_bands: 0,
                long_bands: 10
            }
        );
        assert!(generate_uv_sphere(10, 0, 1.0).is_err());
    }

    #[test]
    fn test_minimal_sphere() {
        let mesh = generate_uv_sphere(1, 1, 1.0).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }
}
