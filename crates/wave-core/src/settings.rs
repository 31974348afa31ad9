use crate::error::{WaveError, WaveResult};
use crate::loader::ShapeLoad;
use crate::point::Rgb8;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_POINT_SIZE: f32 = 15.0;
pub const DEFAULT_POINTS_NUMBER: usize = 10_000;
pub const DEFAULT_POINT_COLOR: Rgb8 = Rgb8::new(41, 19, 11);

/// Everything a user can tune about the wave, as one snapshot.
///
/// Snapshots are plain data: the core observes changes only through
/// [`SettingsPatch`] / `PointWave::replace_settings`, never by watching the
/// struct itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveSettings {
    pub id: String,
    pub name: String,
    pub point_size: f32,
    pub points_number: usize,
    pub intensity: f32,
    pub speed: f32,
    pub random_color: bool,
    pub point_color: Rgb8,
    #[serde(default)]
    pub shape: Option<Arc<Surface>>,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            name: "Default".to_string(),
            point_size: DEFAULT_POINT_SIZE,
            points_number: DEFAULT_POINTS_NUMBER,
            intensity: 1.0,
            speed: 1.0,
            random_color: false,
            point_color: DEFAULT_POINT_COLOR,
            shape: None,
        }
    }
}

impl WaveSettings {
    pub fn with_points_number(mut self, n: usize) -> Self {
        self.points_number = n;
        self
    }

    pub fn with_shape(mut self, surface: Surface) -> Self {
        self.shape = Some(Arc::new(surface));
        self
    }

    pub fn validate(&self) -> WaveResult<()> {
        if !(self.point_size.is_finite() && self.point_size > 0.0) {
            return Err(WaveError::invalid_settings(
                SettingKey::PointSize.name(),
                format!("must be a positive number, got {}", self.point_size),
            ));
        }
        if !(self.intensity.is_finite() && self.intensity >= 0.0) {
            return Err(WaveError::invalid_settings(
                SettingKey::Intensity.name(),
                format!("must be non-negative, got {}", self.intensity),
            ));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(WaveError::invalid_settings(
                SettingKey::Speed.name(),
                format!("must be non-negative, got {}", self.speed),
            ));
        }
        Ok(())
    }
}

/// Names of the individual settings fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    Id,
    Name,
    PointSize,
    PointsNumber,
    Intensity,
    Speed,
    RandomColor,
    PointColor,
    Shape,
}

impl SettingKey {
    pub const ALL: [SettingKey; 9] = [
        SettingKey::Id,
        SettingKey::Name,
        SettingKey::PointSize,
        SettingKey::PointsNumber,
        SettingKey::Intensity,
        SettingKey::Speed,
        SettingKey::RandomColor,
        SettingKey::PointColor,
        SettingKey::Shape,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::Id => "id",
            SettingKey::Name => "name",
            SettingKey::PointSize => "pointSize",
            SettingKey::PointsNumber => "pointsNumber",
            SettingKey::Intensity => "intensity",
            SettingKey::Speed => "speed",
            SettingKey::RandomColor => "randomColor",
            SettingKey::PointColor => "pointColor",
            SettingKey::Shape => "shape",
        }
    }
}

/// Where a new shape comes from.
pub enum ShapeSource {
    /// No shape: fall back to the random cube.
    Clear,
    /// A surface available right now.
    Ready(Arc<Surface>),
    /// A surface still being produced; applied when it resolves.
    Deferred(ShapeLoad),
}

impl From<Surface> for ShapeSource {
    fn from(surface: Surface) -> Self {
        ShapeSource::Ready(Arc::new(surface))
    }
}

impl From<Arc<Surface>> for ShapeSource {
    fn from(surface: Arc<Surface>) -> Self {
        ShapeSource::Ready(surface)
    }
}

impl From<ShapeLoad> for ShapeSource {
    fn from(load: ShapeLoad) -> Self {
        ShapeSource::Deferred(load)
    }
}

/// A partial update: only the fields that are `Some` are written.
#[derive(Default)]
pub struct SettingsPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub point_size: Option<f32>,
    pub points_number: Option<usize>,
    pub intensity: Option<f32>,
    pub speed: Option<f32>,
    pub random_color: Option<bool>,
    pub point_color: Option<Rgb8>,
    pub shape: Option<ShapeSource>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_size(mut self, v: f32) -> Self {
        self.point_size = Some(v);
        self
    }

    pub fn points_number(mut self, v: usize) -> Self {
        self.points_number = Some(v);
        self
    }

    pub fn intensity(mut self, v: f32) -> Self {
        self.intensity = Some(v);
        self
    }

    pub fn speed(mut self, v: f32) -> Self {
        self.speed = Some(v);
        self
    }

    pub fn random_color(mut self, v: bool) -> Self {
        self.random_color = Some(v);
        self
    }

    pub fn point_color(mut self, v: Rgb8) -> Self {
        self.point_color = Some(v);
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = Some(v.into());
        self
    }

    pub fn shape(mut self, source: impl Into<ShapeSource>) -> Self {
        self.shape = Some(source.into());
        self
    }

    pub fn clear_shape(mut self) -> Self {
        self.shape = Some(ShapeSource::Clear);
        self
    }

    /// Write every plain field of this patch over `base`. The shape is left
    /// alone: it needs sampler setup and may be deferred.
    pub(crate) fn merge_fields(&mut self, base: &WaveSettings) -> WaveSettings {
        let mut next = base.clone();
        if let Some(v) = self.id.take() {
            next.id = v;
        }
        if let Some(v) = self.name.take() {
            next.name = v;
        }
        if let Some(v) = self.point_size {
            next.point_size = v;
        }
        if let Some(v) = self.points_number {
            next.points_number = v;
        }
        if let Some(v) = self.intensity {
            next.intensity = v;
        }
        if let Some(v) = self.speed {
            next.speed = v;
        }
        if let Some(v) = self.random_color {
            next.random_color = v;
        }
        if let Some(v) = self.point_color {
            next.point_color = v;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(WaveSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_point_size_rejected() {
        let mut s = WaveSettings::default();
        s.point_size = 0.0;
        let err = s.validate().unwrap_err();
        assert_eq!(err, WaveError::invalid_settings("pointSize", "must be a positive number, got 0"));
    }

    #[test]
    fn test_nan_speed_rejected() {
        let mut s = WaveSettings::default();
        s.speed = f32::NAN;
        assert!(matches!(
            s.validate(),
            Err(WaveError::InvalidSettings { field: "speed", .. })
        ));
    }

    #[test]
    fn test_merge_only_touches_set_fields() {
        let base = WaveSettings::default();
        let mut patch = SettingsPatch::new().intensity(2.5).name("Bright");
        let next = patch.merge_fields(&base);
        assert_eq!(next.intensity, 2.5);
        assert_eq!(next.name, "Bright");
        assert_eq!(next.points_number, base.points_number);
        assert_eq!(next.point_color, base.point_color);
    }
}
