use glam::Vec3;
use std::io::Cursor;
use wave_core::Surface;

/// Parse OBJ (Wavefront) mesh data into a triangulated surface.
///
/// Polygonal faces are fan-triangulated by `tobj`. All models in the file
/// are merged. The vertices are normalized by centering on the centroid and
/// scaling so the farthest vertex sits at distance 1 / 1.2 from the origin.
pub fn parse_obj(data: &[u8]) -> Result<Surface, String> {
    let mut cursor = Cursor::new(data);

    let (models, _materials) = tobj::load_obj_buf(
        &mut cursor,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Ok(Default::default()),
    )
    .map_err(|e| format!("Failed to parse OBJ: {e}"))?;

    let mut vertices: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let offset = vertices.len() as u32;

        // positions is [x0, y0, z0, x1, y1, z1, ...]
        vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        indices.extend(mesh.indices.iter().map(|&i| i + offset));
    }

    if vertices.is_empty() || indices.is_empty() {
        return Err("OBJ contains no faces".to_string());
    }

    normalize_vertices(&mut vertices);

    let surface = Surface::from_indexed(&vertices, &indices);
    if surface.is_empty() {
        return Err("OBJ faces reference missing vertices".to_string());
    }
    Ok(surface)
}

/// Center on the centroid, then scale by 1 / (1.2 * max distance from origin).
fn normalize_vertices(vertices: &mut [Vec3]) {
    let centroid = vertices.iter().copied().sum::<Vec3>() / vertices.len() as f32;
    for v in vertices.iter_mut() {
        *v -= centroid;
    }

    let max_dist = vertices.iter().map(|v| v.length()).fold(0.0f32, f32::max);
    if max_dist > 0.0 {
        let scale = 1.0 / (1.2 * max_dist);
        for v in vertices.iter_mut() {
            *v *= scale;
        }
    }
}
