use crate::generator::{generate_sizes, ColorMode, PointFieldGenerator};
use crate::point::Point;
use rand::Rng;

/// The owned set of points plus the flat buffers a renderer uploads.
///
/// `positions` and `colors` hold three floats per point (xyz / rgb) and are
/// kept in step with `points` after every operation; `sizes` holds one
/// float per point.
#[derive(Debug, Clone, Default)]
pub struct PointField {
    points: Vec<Point>,
    sizes: Vec<f32>,
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl PointField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Grow or shrink to `n` points.
    ///
    /// Shrinking truncates the tail. Growing generates only the missing
    /// points (and their sizes) and appends them; existing points are left
    /// exactly as they were.
    pub fn resize<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        generator: &PointFieldGenerator,
        colors: ColorMode,
        point_size: f32,
        rng: &mut R,
    ) {
        let len = self.points.len();
        if n <= len {
            self.points.truncate(n);
            self.sizes.truncate(n);
            self.positions.truncate(n * 3);
            self.colors.truncate(n * 3);
            return;
        }

        let added = generator.generate_points(n - len, colors, rng);
        for p in &added {
            self.positions.extend_from_slice(&p.position.to_array());
            self.colors.extend_from_slice(&p.color.to_array());
        }
        self.points.extend(added);
        self.sizes.extend(generate_sizes(n - len, point_size, rng));
    }

    /// Replace every position with a fresh draw from `generator`.
    pub fn resample_positions<R: Rng + ?Sized>(&mut self, generator: &PointFieldGenerator, rng: &mut R) {
        for p in self.points.iter_mut() {
            p.position = generator.position(rng);
        }
        self.positions.clear();
        self.positions
            .extend(self.points.iter().flat_map(|p| p.position.to_array()));
    }

    /// Replace every color according to `mode`.
    pub fn regenerate_colors<R: Rng + ?Sized>(&mut self, mode: ColorMode, rng: &mut R) {
        for p in self.points.iter_mut() {
            p.color = mode.color(rng);
        }
        self.colors.clear();
        self.colors
            .extend(self.points.iter().flat_map(|p| p.color.to_array()));
    }

    pub fn regenerate_sizes<R: Rng + ?Sized>(&mut self, point_size: f32, rng: &mut R) {
        self.sizes = generate_sizes(self.points.len(), point_size, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Rgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn consistent(field: &PointField) -> bool {
        let n = field.len();
        field.sizes().len() == n
            && field.positions().len() == n * 3
            && field.colors().len() == n * 3
            && field.points().iter().enumerate().all(|(i, p)| {
                field.positions()[i * 3..i * 3 + 3] == p.position.to_array()
                    && field.colors()[i * 3..i * 3 + 3] == p.color.to_array()
            })
    }

    #[test]
    fn test_grow_appends_only() {
        let mut rng = StdRng::seed_from_u64(10);
        let gen = PointFieldGenerator::new();
        let mut field = PointField::new();
        field.resize(100, &gen, ColorMode::Random, 5.0, &mut rng);
        let before = field.points().to_vec();
        let sizes_before = field.sizes().to_vec();

        field.resize(250, &gen, ColorMode::Random, 5.0, &mut rng);
        assert_eq!(field.len(), 250);
        assert_eq!(&field.points()[..100], &before[..]);
        assert_eq!(&field.sizes()[..100], &sizes_before[..]);
        assert!(consistent(&field));
    }

    #[test]
    fn test_shrink_truncates_tail() {
        let mut rng = StdRng::seed_from_u64(11);
        let gen = PointFieldGenerator::new();
        let mut field = PointField::new();
        field.resize(50, &gen, ColorMode::Random, 5.0, &mut rng);
        let before = field.points().to_vec();

        field.resize(20, &gen, ColorMode::Random, 5.0, &mut rng);
        assert_eq!(field.points(), &before[..20]);
        assert!(consistent(&field));

        field.resize(0, &gen, ColorMode::Random, 5.0, &mut rng);
        assert!(field.is_empty());
        assert!(consistent(&field));
    }

    #[test]
    fn test_regenerate_colors_keeps_positions() {
        let mut rng = StdRng::seed_from_u64(12);
        let gen = PointFieldGenerator::new();
        let mut field = PointField::new();
        field.resize(64, &gen, ColorMode::Random, 5.0, &mut rng);
        let positions = field.positions().to_vec();

        field.regenerate_colors(ColorMode::Fixed(Rgb::WHITE), &mut rng);
        assert_eq!(field.positions(), &positions[..]);
        assert!(field.points().iter().all(|p| p.color == Rgb::WHITE));
        assert!(consistent(&field));
    }

    #[test]
    fn test_resample_keeps_colors() {
        let mut rng = StdRng::seed_from_u64(13);
        let gen = PointFieldGenerator::new();
        let mut field = PointField::new();
        field.resize(64, &gen, ColorMode::Random, 5.0, &mut rng);
        let colors = field.colors().to_vec();
        let positions = field.positions().to_vec();

        field.resample_positions(&gen, &mut rng);
        assert_eq!(field.colors(), &colors[..]);
        assert_ne!(field.positions(), &positions[..]);
        assert!(consistent(&field));
    }
}
