use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

const EPSILON: f32 = 0.0001;

/// A linear RGB color with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel into [0, 1].
    pub fn clamped(&self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn approx_eq(&self, other: &Rgb) -> bool {
        (self.r - other.r).abs() < EPSILON
            && (self.g - other.g).abs() < EPSILON
            && (self.b - other.b).abs() < EPSILON
    }
}

impl From<Rgb8> for Rgb {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r as f32 / 255.0,
            g: c.g as f32 / 255.0,
            b: c.b as f32 / 255.0,
        }
    }
}

// Index access: 0=r, 1=g, 2=b
impl Index<usize> for Rgb {
    type Output = f32;
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.r,
            1 => &self.g,
            2 => &self.b,
            _ => panic!("Rgb index out of bounds: {index}, must be 0-2"),
        }
    }
}

impl IndexMut<usize> for Rgb {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.r,
            1 => &mut self.g,
            2 => &mut self.b,
            _ => panic!("Rgb index out of bounds: {index}, must be 0-2"),
        }
    }
}

/// An 8-bit-per-channel color as edited in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One element of the point field: where it sits and what color it is.
///
/// Sizes live in a separate sequence because they are regenerated on their
/// own schedule (see `router`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub position: Vec3,
    pub color: Rgb,
}

impl Point {
    pub fn new(position: Vec3, color: Rgb) -> Self {
        Self { position, color }
    }

    pub fn with_color(&self, color: Rgb) -> Self {
        Self { position: self.position, color }
    }

    pub fn with_position(&self, position: Vec3) -> Self {
        Self { position, color: self.color }
    }

    /// Approximate equality using epsilon comparison
    pub fn approx_eq(&self, other: &Point) -> bool {
        self.position.abs_diff_eq(other.position, EPSILON) && self.color.approx_eq(&other.color)
    }
}
