use crate::error::{WaveError, WaveResult};
use crate::surface::{Surface, Triangle};
use glam::Vec3;
use rand::Rng;

/// Area-weighted uniform sampler over a triangulated surface.
///
/// Building costs O(T) for the cumulative area table; each sample is a
/// binary search (O(log T)) plus one barycentric draw.
#[derive(Debug, Clone)]
pub struct SurfaceSampler {
    triangles: Vec<Triangle>,
    // cumulative[i] = sum of areas of triangles[0..=i]
    cumulative: Vec<f64>,
    total_area: f64,
}

impl SurfaceSampler {
    pub fn new(surface: &Surface) -> WaveResult<Self> {
        if surface.is_empty() {
            return Err(WaveError::invalid_surface("surface has no triangles"));
        }

        let mut cumulative = Vec::with_capacity(surface.len());
        let mut total = 0.0f64;
        for t in &surface.triangles {
            let area = t.area() as f64;
            if area.is_finite() {
                total += area;
            }
            cumulative.push(total);
        }

        if !(total > 0.0 && total.is_finite()) {
            return Err(WaveError::invalid_surface(format!(
                "total area must be positive, got {total}"
            )));
        }

        Ok(Self {
            triangles: surface.triangles.clone(),
            cumulative,
            total_area: total,
        })
    }

    pub fn total_area(&self) -> f32 {
        self.total_area as f32
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Draw one point uniformly distributed over the surface area.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let target = rng.gen::<f64>() * self.total_area;
        let idx = self.triangle_index(target);

        let mut u = rng.gen::<f32>();
        let mut v = rng.gen::<f32>();
        // Fold the unit square onto the unit triangle.
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        self.triangles[idx].at(u, v)
    }

    /// First triangle whose cumulative area exceeds `target`. Zero-area
    /// triangles own an empty interval and are never chosen.
    fn triangle_index(&self, target: f64) -> usize {
        let idx = self.cumulative.partition_point(|&c| c <= target);
        idx.min(self.cumulative.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new(Vec3::from(a), Vec3::from(b), Vec3::from(c))
    }

    #[test]
    fn test_empty_surface_rejected() {
        let err = SurfaceSampler::new(&Surface::default()).unwrap_err();
        assert!(matches!(err, WaveError::InvalidSurface { .. }));
    }

    #[test]
    fn test_degenerate_surface_rejected() {
        let line = flat([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let err = SurfaceSampler::new(&Surface::new(vec![line])).unwrap_err();
        assert!(matches!(err, WaveError::InvalidSurface { .. }));
    }

    #[test]
    fn test_samples_lie_in_triangle_plane() {
        let tri = flat([0.0, 0.0, 2.0], [1.0, 0.0, 2.0], [0.0, 1.0, 2.0]);
        let sampler = SurfaceSampler::new(&Surface::new(vec![tri])).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = sampler.sample(&mut rng);
            assert!((p.z - 2.0).abs() < 1e-5);
            assert!(p.x >= -1e-5 && p.y >= -1e-5);
            assert!(p.x + p.y <= 1.0 + 1e-5);
        }
    }

    #[test]
    fn test_zero_area_triangle_never_chosen() {
        let degenerate = flat([5.0, 5.0, 5.0], [5.0, 5.0, 5.0], [5.0, 5.0, 5.0]);
        let tri = flat([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let sampler = SurfaceSampler::new(&Surface::new(vec![degenerate, tri, degenerate])).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            assert!(sampler.sample(&mut rng).z.abs() < 1e-5);
        }
    }

    #[test]
    fn test_area_weighted_selection() {
        // Areas 0.5 and 1.5 (ratio 1:3), separated along z.
        let small = flat([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let large = flat([0.0, 0.0, 10.0], [3.0, 0.0, 10.0], [0.0, 1.0, 10.0]);
        let sampler = SurfaceSampler::new(&Surface::new(vec![small, large])).unwrap();
        assert!((sampler.total_area() - 2.0).abs() < 1e-5);

        let mut rng = StdRng::seed_from_u64(42);
        let k = 40_000;
        let in_small = (0..k).filter(|_| sampler.sample(&mut rng).z < 5.0).count();
        let ratio = in_small as f64 / k as f64;
        assert!((ratio - 0.25).abs() < 0.02, "small triangle ratio {ratio}");
    }
}
