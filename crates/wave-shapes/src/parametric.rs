use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use wave_core::Surface;

/// Largest grid resolution accepted along either parameter.
pub const MAX_SEGMENTS: u32 = 1024;

/// Triangulate `f` over the unit square with `slices` x `stacks` quads.
///
/// `f` maps (u, v) in [0, 1]^2 to a point. Grid cells become two triangles
/// each; cells that collapse to a line or point are dropped. Either count
/// above [`MAX_SEGMENTS`] is an error.
pub fn parametric_surface<F>(f: F, slices: u32, stacks: u32) -> Result<Surface, String>
where
    F: Fn(f32, f32) -> Vec3,
{
    if slices > MAX_SEGMENTS || stacks > MAX_SEGMENTS {
        return Err(format!(
            "grid of {slices}x{stacks} exceeds {MAX_SEGMENTS} segments per side"
        ));
    }
    let slices = slices.max(1);
    let stacks = stacks.max(1);
    let row = slices + 1;

    let mut vertices = Vec::with_capacity(row as usize * (stacks as usize + 1));
    for j in 0..=stacks {
        let v = j as f32 / stacks as f32;
        for i in 0..=slices {
            let u = i as f32 / slices as f32;
            vertices.push(f(u, v));
        }
    }

    let mut indices = Vec::with_capacity(slices as usize * stacks as usize * 6);
    for j in 0..stacks {
        for i in 0..slices {
            let a = j * row + i;
            let b = j * row + i + 1;
            let c = (j + 1) * row + i + 1;
            let d = (j + 1) * row + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mut surface = Surface::from_indexed(&vertices, &indices);
    surface.triangles.retain(|t| t.area() > 0.0);
    Ok(surface)
}

/// The Klein bottle immersion, roughly 16 units tall before scaling.
pub fn klein_point(u: f32, v: f32) -> Vec3 {
    let u = u * TAU;
    let v = v * TAU;

    let r = 2.0 * (1.0 - u.cos() / 2.0);
    let (x, z) = if u < PI {
        (
            3.0 * u.cos() * (1.0 + u.sin()) + r * u.cos() * v.cos(),
            -8.0 * u.sin() - r * u.sin() * v.cos(),
        )
    } else {
        (
            3.0 * u.cos() * (1.0 + u.sin()) + r * (v + PI).cos(),
            -8.0 * u.sin(),
        )
    };
    let y = -r * v.sin();
    Vec3::new(x, y, z)
}

/// Klein bottle scaled by `scale` and turned upright (-90 degrees about X).
pub fn klein(scale: f32, slices: u32, stacks: u32) -> Result<Surface, String> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(format!("scale must be a positive number, got {scale}"));
    }
    let mut surface = parametric_surface(klein_point, slices, stacks)?;
    surface.scale(Vec3::splat(scale));
    surface.rotate(Quat::from_rotation_x(-FRAC_PI_2));
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_grid() {
        let plane = parametric_surface(|u, v| Vec3::new(u, v, 0.0), 4, 3).unwrap();
        assert_eq!(plane.len(), 4 * 3 * 2);
        assert!((plane.total_area() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_cells_dropped() {
        // Every vertex on the x axis: all cells collapse.
        let line = parametric_surface(|u, _| Vec3::new(u, 0.0, 0.0), 5, 5).unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn test_klein_default_size() {
        let k = klein(0.03, 25, 25).unwrap();
        assert!(!k.is_empty());
        let (min, max) = k.bounds().unwrap();
        let extent = max - min;
        assert!(extent.max_element() < 1.0, "extent {extent}");
        assert!(extent.min_element() > 0.05, "extent {extent}");
    }

    #[test]
    fn test_klein_rejects_zero_scale() {
        assert!(klein(0.0, 25, 25).is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert!(klein(0.03, 70_000, 70_000).is_err());
        assert!(parametric_surface(|u, v| Vec3::new(u, v, 0.0), MAX_SEGMENTS + 1, 1).is_err());

        let edge = parametric_surface(|u, v| Vec3::new(u, v, 0.0), MAX_SEGMENTS, 1).unwrap();
        assert_eq!(edge.len(), MAX_SEGMENTS as usize * 2);
    }
}
