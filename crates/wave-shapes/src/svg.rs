use glam::Vec3;
use lyon::math::{point, Point};
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};
use usvg::tiny_skia_path::PathSegment;
use wave_core::Surface;

/// Curve flattening tolerance, in SVG user units.
const FILL_TOLERANCE: f32 = 0.1;

/// Parse SVG data into a filled, triangulated surface in the XY plane.
///
/// The SVG is parsed using `usvg`; every path (stroked or filled) is filled
/// with `lyon`'s tessellator after applying its absolute transform. Y
/// coordinates are negated to flip the SVG coordinate system (Y-down) into
/// the scene's (Y-up). The result is normalized to unit size.
pub fn parse_svg(data: &[u8]) -> Result<Surface, String> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|e| format!("Failed to parse SVG: {e}"))?;

    let mut tessellator = FillTessellator::new();
    let mut surface = Surface::default();
    collect_from_group(tree.root(), &mut tessellator, &mut surface)?;

    if surface.is_empty() {
        return Err("SVG contains no fillable paths".to_string());
    }
    surface.normalize();
    Ok(surface)
}

/// Recursively walk a usvg Group node, filling every Path child.
fn collect_from_group(
    group: &usvg::Group,
    tessellator: &mut FillTessellator,
    surface: &mut Surface,
) -> Result<(), String> {
    for child in group.children() {
        match child {
            usvg::Node::Group(ref g) => collect_from_group(g, tessellator, surface)?,
            usvg::Node::Path(ref path) => surface.extend(fill_path(path, tessellator)?),
            _ => {}
        }
    }
    Ok(())
}

/// lyon requires every edge to belong to a begun sub-path.
fn ensure_begun(builder: &mut lyon::path::path::Builder, open: &mut bool, at: Point) {
    if !*open {
        builder.begin(at);
        *open = true;
    }
}

/// Convert a usvg path to a lyon path, then tessellate its fill.
fn fill_path(path: &usvg::Path, tessellator: &mut FillTessellator) -> Result<Surface, String> {
    let ts = path.abs_transform();
    let map = |p: usvg::tiny_skia_path::Point| -> Point {
        point(
            ts.sx * p.x + ts.kx * p.y + ts.tx,
            -(ts.ky * p.x + ts.sy * p.y + ts.ty),
        )
    };

    let mut builder = Path::builder();
    let mut open = false;
    let mut current = point(0.0, 0.0);
    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(pt) => {
                if open {
                    builder.end(false);
                }
                current = map(pt);
                builder.begin(current);
                open = true;
            }
            PathSegment::LineTo(pt) => {
                ensure_begun(&mut builder, &mut open, current);
                current = map(pt);
                builder.line_to(current);
            }
            PathSegment::QuadTo(p1, p2) => {
                ensure_begun(&mut builder, &mut open, current);
                current = map(p2);
                builder.quadratic_bezier_to(map(p1), current);
            }
            PathSegment::CubicTo(p1, p2, p3) => {
                ensure_begun(&mut builder, &mut open, current);
                current = map(p3);
                builder.cubic_bezier_to(map(p1), map(p2), current);
            }
            PathSegment::Close => {
                if open {
                    builder.end(true);
                    open = false;
                }
            }
        }
    }
    if open {
        builder.end(false);
    }
    let lyon_path = builder.build();

    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    tessellator
        .tessellate_path(
            &lyon_path,
            &FillOptions::tolerance(FILL_TOLERANCE),
            &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| v.position()),
        )
        .map_err(|e| format!("Failed to tessellate SVG path: {e:?}"))?;

    let vertices: Vec<Vec3> = buffers
        .vertices
        .iter()
        .map(|p| Vec3::new(p.x, p.y, 0.0))
        .collect();
    let mut filled = Surface::from_indexed(&vertices, &buffers.indices);
    filled.triangles.retain(|t| t.area() > 0.0);
    Ok(filled)
}
