//! Polygonal mesh geometry shared across shape instances.

use glint_math::Vec3;

/// An indexed polygonal mesh.
///
/// Faces are ordered vertex-index lists, assumed planar and convex, wound CCW
/// with respect to the outward normal. A mesh is shared by `Arc` across shape
/// instances; the compiler bakes its vertices once per distinct accumulated
/// transform it appears under, keyed by `Arc` identity rather than by value.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Polygonal faces, each an ordered list of vertex indices
    pub faces: Vec<Vec<u32>>,
}

impl Mesh {
    /// Create a new mesh from positions and faces.
    pub fn new(positions: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        Self { positions, faces }
    }

    /// Number of triangles after fan triangulation of every face.
    ///
    /// Faces with fewer than three vertices contribute nothing; a face with
    /// `n >= 3` vertices contributes `n - 2` fan triangles.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.len().saturating_sub(2))
            .sum()
    }

    /// Fan-triangulate one face into index triples `(f[0], f[i], f[i+1])`.
    ///
    /// Returns an empty vector for degenerate faces (fewer than 3 vertices).
    pub fn fan_triangles(face: &[u32]) -> Vec<[u32; 3]> {
        if face.len() < 3 {
            return Vec::new();
        }
        (1..face.len() - 1)
            .map(|i| [face[0], face[i], face[i + 1]])
            .collect()
    }

    /// Check that every face index refers to an existing vertex.
    pub fn is_valid(&self) -> bool {
        let n = self.positions.len() as u32;
        self.faces.iter().flatten().all(|&i| i < n)
    }
}
