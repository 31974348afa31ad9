//! Closed primitive surfaces, centered on the origin with Y up.

use glam::Vec3;
use std::f32::consts::TAU;
use wave_core::{Surface, Triangle};

pub const CONE_RADIAL_SEGMENTS: u32 = 32;
pub const CYLINDER_RADIAL_SEGMENTS: u32 = 64;
pub const CYLINDER_HEIGHT_SEGMENTS: u32 = 64;

fn check_dimension(name: &str, value: f32) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a positive number, got {value}"))
    }
}

/// Push a triangle unless it has no area (collapsed ring at an apex).
fn push(triangles: &mut Vec<Triangle>, a: Vec3, b: Vec3, c: Vec3) {
    let t = Triangle::new(a, b, c);
    if t.area() > 0.0 {
        triangles.push(t);
    }
}

/// Axis-aligned box with the given edge lengths.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Result<Surface, String> {
    check_dimension("width", width)?;
    check_dimension("height", height)?;
    check_dimension("depth", depth)?;

    let h = Vec3::new(width, height, depth) * 0.5;
    let corners: Vec<Vec3> = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            )
        })
        .collect();

    // Two triangles per face, outward winding.
    #[rustfmt::skip]
    let indices: [u32; 36] = [
        0, 2, 3, 0, 3, 1, // -z
        4, 5, 7, 4, 7, 6, // +z
        0, 1, 5, 0, 5, 4, // -y
        2, 6, 7, 2, 7, 3, // +y
        0, 4, 6, 0, 6, 2, // -x
        1, 3, 7, 1, 7, 5, // +x
    ];
    Ok(Surface::from_indexed(&corners, &indices))
}

/// Flat disc in the XY plane, as a fan of `segments` triangles.
pub fn disc(radius: f32, segments: u32) -> Result<Surface, String> {
    check_dimension("radius", radius)?;
    let segments = segments.max(3);

    let mut triangles = Vec::with_capacity(segments as usize);
    for i in 0..segments {
        let a0 = TAU * i as f32 / segments as f32;
        let a1 = TAU * (i + 1) as f32 / segments as f32;
        push(
            &mut triangles,
            Vec3::ZERO,
            Vec3::new(radius * a0.cos(), radius * a0.sin(), 0.0),
            Vec3::new(radius * a1.cos(), radius * a1.sin(), 0.0),
        );
    }
    Ok(Surface::new(triangles))
}

/// Capped cone along Y, apex up.
pub fn cone(radius: f32, height: f32) -> Result<Surface, String> {
    check_dimension("radius", radius)?;
    check_dimension("height", height)?;
    Ok(frustum(0.0, radius, height, CONE_RADIAL_SEGMENTS, 1))
}

/// Capped cylinder along Y. Either radius may differ to make a truncated cone.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32) -> Result<Surface, String> {
    check_dimension("radius_top", radius_top)?;
    check_dimension("radius_bottom", radius_bottom)?;
    check_dimension("height", height)?;
    Ok(frustum(
        radius_top,
        radius_bottom,
        height,
        CYLINDER_RADIAL_SEGMENTS,
        CYLINDER_HEIGHT_SEGMENTS,
    ))
}

fn ring_point(radius: f32, y: f32, theta: f32) -> Vec3 {
    Vec3::new(radius * theta.sin(), y, radius * theta.cos())
}

fn frustum(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> Surface {
    let radial = radial_segments.max(3);
    let rows = height_segments.max(1);
    let half = height * 0.5;
    let mut triangles = Vec::new();

    // Side wall, top row first.
    for row in 0..rows {
        let t0 = row as f32 / rows as f32;
        let t1 = (row + 1) as f32 / rows as f32;
        let (y0, y1) = (half - t0 * height, half - t1 * height);
        let r0 = radius_top + (radius_bottom - radius_top) * t0;
        let r1 = radius_top + (radius_bottom - radius_top) * t1;

        for i in 0..radial {
            let th0 = TAU * i as f32 / radial as f32;
            let th1 = TAU * (i + 1) as f32 / radial as f32;
            let a = ring_point(r0, y0, th0);
            let b = ring_point(r1, y1, th0);
            let c = ring_point(r1, y1, th1);
            let d = ring_point(r0, y0, th1);
            push(&mut triangles, a, b, d);
            push(&mut triangles, b, c, d);
        }
    }

    // Caps.
    for (radius, y) in [(radius_top, half), (radius_bottom, -half)] {
        if radius <= 0.0 {
            continue;
        }
        let center = Vec3::new(0.0, y, 0.0);
        for i in 0..radial {
            let th0 = TAU * i as f32 / radial as f32;
            let th1 = TAU * (i + 1) as f32 / radial as f32;
            push(&mut triangles, center, ring_point(radius, y, th0), ring_point(radius, y, th1));
        }
    }

    Surface::new(triangles)
}
