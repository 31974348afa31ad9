use crate::animator::AnimatorConfig;

/// Construction-time configuration of a point wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveConfig {
    /// Phase range and per-frame step.
    pub animator: AnimatorConfig,
    /// Viewport height in pixels, used for the point size projection factor.
    pub viewport_height: f32,
    /// Vertical field of view of the camera, in degrees.
    pub fov_degrees: f32,
    /// Fixed RNG seed for reproducible fields. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            animator: AnimatorConfig::default(),
            viewport_height: 1080.0,
            fov_degrees: 60.0,
            seed: None,
        }
    }
}

impl WaveConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Scale turning a point size in settings units into screen pixels.
    pub fn size_scale(&self) -> f32 {
        size_scale(self.viewport_height, self.fov_degrees)
    }
}

pub fn size_scale(viewport_height: f32, fov_degrees: f32) -> f32 {
    let half_fov = 0.5 * fov_degrees.to_radians();
    0.001 * (viewport_height / (2.0 * half_fov.tan()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_scale_default() {
        // 1080 / (2 * tan(30deg)) = 935.3
        let scale = WaveConfig::default().size_scale();
        assert!((scale - 0.9353).abs() < 0.001);
    }
}
