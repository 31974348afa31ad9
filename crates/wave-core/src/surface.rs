use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A single triangle of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    pub fn area(&self) -> f32 {
        0.5 * (self.b - self.a).cross(self.c - self.a).length()
    }

    /// Point at barycentric weights `u` (towards `b`) and `v` (towards `c`).
    pub fn at(&self, u: f32, v: f32) -> Vec3 {
        self.a + (self.b - self.a) * u + (self.c - self.a) * v
    }

    fn map(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Self { a: f(self.a), b: f(self.b), c: f(self.c) }
    }
}

/// A triangulated boundary used as the sampling domain for point positions.
///
/// Open and closed surfaces are treated the same: only the triangle areas
/// matter for sampling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub triangles: Vec<Triangle>,
}

impl Surface {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Build from a flat vertex list and triangle indices (three per face).
    ///
    /// Faces referencing missing vertices are skipped.
    pub fn from_indexed(vertices: &[Vec3], indices: &[u32]) -> Self {
        let triangles = indices
            .chunks_exact(3)
            .filter_map(|face| {
                let a = *vertices.get(face[0] as usize)?;
                let b = *vertices.get(face[1] as usize)?;
                let c = *vertices.get(face[2] as usize)?;
                Some(Triangle::new(a, b, c))
            })
            .collect();
        Self { triangles }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn total_area(&self) -> f32 {
        self.triangles.iter().map(|t| t.area()).sum()
    }

    /// Append all triangles of `other`.
    pub fn extend(&mut self, other: Surface) {
        self.triangles.extend(other.triangles);
    }

    /// Axis-aligned bounds as (min, max). `None` for an empty surface.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.triangles.first()?.a;
        let mut min = first;
        let mut max = first;
        for t in &self.triangles {
            for v in [t.a, t.b, t.c] {
                min = min.min(v);
                max = max.max(v);
            }
        }
        Some((min, max))
    }

    pub fn scale(&mut self, factor: Vec3) {
        for t in self.triangles.iter_mut() {
            *t = t.map(|v| v * factor);
        }
    }

    pub fn translate(&mut self, offset: Vec3) {
        for t in self.triangles.iter_mut() {
            *t = t.map(|v| v + offset);
        }
    }

    pub fn rotate(&mut self, rotation: Quat) {
        for t in self.triangles.iter_mut() {
            *t = t.map(|v| rotation * v);
        }
    }

    /// Scale uniformly so the larger of the X/Y extents becomes 1, then
    /// center the bounding box on the origin.
    ///
    /// Used for imported outlines (SVG, text) whose native units are
    /// arbitrary. Depth is scaled by the same factor.
    pub fn normalize(&mut self) {
        let Some((min, max)) = self.bounds() else {
            return;
        };
        let size = (max.x - min.x).max(max.y - min.y);
        if size <= 0.0 || !size.is_finite() {
            return;
        }
        let scale = 1.0 / size;
        self.scale(Vec3::splat(scale));
        let center = (min + max) * 0.5 * scale;
        self.translate(-center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Surface {
        Surface::new(vec![
            Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0)),
            Triangle::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::Y),
        ])
    }

    #[test]
    fn test_triangle_area() {
        let t = Triangle::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
        assert!((t.area() - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_total_area() {
        assert!((unit_square().total_area() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_from_indexed_skips_bad_faces() {
        let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let surface = Surface::from_indexed(&vertices, &[0, 1, 2, 0, 1, 9]);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_bounds() {
        let (min, max) = unit_square().bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
        assert!(Surface::default().bounds().is_none());
    }

    #[test]
    fn test_normalize_centers_and_scales() {
        let mut s = unit_square();
        s.scale(Vec3::splat(40.0));
        s.translate(Vec3::new(100.0, -20.0, 0.0));
        s.normalize();
        let (min, max) = s.bounds().unwrap();
        assert!((min.x + 0.5).abs() < 0.001);
        assert!((max.y - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let mut s = Surface::new(vec![Triangle::new(Vec3::X, Vec3::X, Vec3::X)]);
        s.rotate(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!(s.triangles[0].a.abs_diff_eq(Vec3::Y, 0.001));
    }
}
