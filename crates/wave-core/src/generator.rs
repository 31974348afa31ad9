use crate::error::WaveResult;
use crate::point::{Point, Rgb};
use crate::sampler::SurfaceSampler;
use crate::settings::WaveSettings;
use crate::surface::Surface;
use glam::Vec3;
use rand::Rng;

/// How point colors are chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMode {
    /// Each channel independently uniform in [0, 1].
    Random,
    /// Every point gets the same color.
    Fixed(Rgb),
}

impl ColorMode {
    pub fn from_settings(settings: &WaveSettings) -> Self {
        if settings.random_color {
            ColorMode::Random
        } else {
            ColorMode::Fixed(Rgb::from(settings.point_color))
        }
    }

    pub fn color<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        match self {
            ColorMode::Random => Rgb::new(rng.gen(), rng.gen(), rng.gen()),
            ColorMode::Fixed(c) => *c,
        }
    }
}

/// Produces positions for new points: surface samples when a shape is set,
/// otherwise uniform draws from the cube [-0.5, 0.5]^3.
#[derive(Debug, Clone, Default)]
pub struct PointFieldGenerator {
    sampler: Option<SurfaceSampler>,
}

impl PointFieldGenerator {
    /// A generator with no shape (cube fallback).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_surface(surface: Option<&Surface>) -> WaveResult<Self> {
        let sampler = surface.map(SurfaceSampler::new).transpose()?;
        Ok(Self { sampler })
    }

    pub fn with_sampler(sampler: SurfaceSampler) -> Self {
        Self { sampler: Some(sampler) }
    }

    pub fn has_surface(&self) -> bool {
        self.sampler.is_some()
    }

    pub fn sampler(&self) -> Option<&SurfaceSampler> {
        self.sampler.as_ref()
    }

    pub fn position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match &self.sampler {
            Some(sampler) => sampler.sample(rng),
            None => cube_position(rng),
        }
    }

    pub fn generate_positions<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Vec3> {
        (0..n).map(|_| self.position(rng)).collect()
    }

    /// `n` complete points. Each point draws its position before its color.
    pub fn generate_points<R: Rng + ?Sized>(
        &self,
        n: usize,
        colors: ColorMode,
        rng: &mut R,
    ) -> Vec<Point> {
        (0..n)
            .map(|_| {
                let position = self.position(rng);
                Point::new(position, colors.color(rng))
            })
            .collect()
    }
}

/// Uniform draw from the cube [-0.5, 0.5]^3.
pub fn cube_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        0.5 - rng.gen::<f32>(),
        0.5 - rng.gen::<f32>(),
        0.5 - rng.gen::<f32>(),
    )
}

pub fn generate_colors<R: Rng + ?Sized>(n: usize, mode: ColorMode, rng: &mut R) -> Vec<Rgb> {
    (0..n).map(|_| mode.color(rng)).collect()
}

/// Per-point size jitter, each uniform in [0, point_size].
pub fn generate_sizes<R: Rng + ?Sized>(n: usize, point_size: f32, rng: &mut R) -> Vec<f32> {
    (0..n).map(|_| rng.gen::<f32>() * point_size).collect()
}
