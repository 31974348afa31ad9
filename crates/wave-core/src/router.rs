//! Maps changed settings to the smallest regeneration step that keeps the
//! point buffers consistent.

use crate::settings::{SettingKey, WaveSettings};
use std::sync::Arc;

/// A regeneration step the point wave can perform.
///
/// The declaration order is the order in which a batch of actions runs:
/// the field is resized before its positions or colors are rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegenAction {
    /// Append or truncate points to match `points_number`.
    Resize,
    /// Resample every position against the current shape.
    ResamplePositions,
    /// Rebuild every color from the color settings.
    RegenerateColors,
    /// Rebuild the per-point size jitter.
    RegenerateSizes,
    /// Push the new intensity into the uniforms; buffers untouched.
    UpdateIntensity,
}

/// The action a single changed key requires, given the settings after the
/// change. `None` means the value is stored and nothing else happens.
pub fn route(key: SettingKey, settings: &WaveSettings) -> Option<RegenAction> {
    match key {
        SettingKey::PointSize => Some(RegenAction::RegenerateSizes),
        SettingKey::PointColor if !settings.random_color => Some(RegenAction::RegenerateColors),
        SettingKey::PointColor => None,
        SettingKey::RandomColor => Some(RegenAction::RegenerateColors),
        SettingKey::PointsNumber => Some(RegenAction::Resize),
        SettingKey::Intensity => Some(RegenAction::UpdateIntensity),
        SettingKey::Shape => Some(RegenAction::ResamplePositions),
        // Speed is read by the animator on every step.
        SettingKey::Speed | SettingKey::Id | SettingKey::Name => None,
    }
}

/// Keys whose values differ between two snapshots.
pub fn changed_keys(old: &WaveSettings, new: &WaveSettings) -> Vec<SettingKey> {
    SettingKey::ALL
        .iter()
        .copied()
        .filter(|key| match key {
            SettingKey::Id => old.id != new.id,
            SettingKey::Name => old.name != new.name,
            SettingKey::PointSize => old.point_size != new.point_size,
            SettingKey::PointsNumber => old.points_number != new.points_number,
            SettingKey::Intensity => old.intensity != new.intensity,
            SettingKey::Speed => old.speed != new.speed,
            SettingKey::RandomColor => old.random_color != new.random_color,
            SettingKey::PointColor => old.point_color != new.point_color,
            SettingKey::Shape => shape_changed(&old.shape, &new.shape),
        })
        .collect()
}

/// The deduplicated, ordered union of actions for going from `old` to `new`.
pub fn plan(old: &WaveSettings, new: &WaveSettings) -> Vec<RegenAction> {
    plan_keys(&changed_keys(old, new), new)
}

/// Like [`plan`] for an explicit list of keys.
pub fn plan_keys(keys: &[SettingKey], settings: &WaveSettings) -> Vec<RegenAction> {
    let mut actions: Vec<RegenAction> = keys.iter().filter_map(|k| route(*k, settings)).collect();
    actions.sort();
    actions.dedup();
    actions
}

fn shape_changed(old: &Option<Arc<crate::Surface>>, new: &Option<Arc<crate::Surface>>) -> bool {
    match (old, new) {
        (None, None) => false,
        (Some(a), Some(b)) => !Arc::ptr_eq(a, b) && a != b,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Rgb8;
    use crate::surface::{Surface, Triangle};
    use glam::Vec3;

    fn tri() -> Surface {
        Surface::new(vec![Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y)])
    }

    #[test]
    fn test_intensity_only_updates_uniform() {
        let old = WaveSettings::default();
        let mut new = old.clone();
        new.intensity = 2.0;
        assert_eq!(plan(&old, &new), vec![RegenAction::UpdateIntensity]);
    }

    #[test]
    fn test_point_color_ignored_when_random() {
        let mut old = WaveSettings::default();
        old.random_color = true;
        let mut new = old.clone();
        new.point_color = Rgb8::new(1, 2, 3);
        assert!(plan(&old, &new).is_empty());

        old.random_color = false;
        new.random_color = false;
        assert_eq!(plan(&old, &new), vec![RegenAction::RegenerateColors]);
    }

    #[test]
    fn test_batched_change_is_deduplicated_and_ordered() {
        let old = WaveSettings::default();
        let mut new = old.clone();
        new.random_color = true;
        new.point_color = Rgb8::new(9, 9, 9);
        new.points_number = 5;
        new.point_size = 3.0;
        new.shape = Some(Arc::new(tri()));
        new.name = "Other".to_string();

        assert_eq!(
            plan(&old, &new),
            vec![
                RegenAction::Resize,
                RegenAction::ResamplePositions,
                RegenAction::RegenerateColors,
                RegenAction::RegenerateSizes,
            ]
        );
    }

    #[test]
    fn test_unrouted_keys_are_no_ops() {
        let old = WaveSettings::default();
        let mut new = old.clone();
        new.speed = 4.0;
        new.id = "7".to_string();
        assert_eq!(changed_keys(&old, &new), vec![SettingKey::Id, SettingKey::Speed]);
        assert!(plan(&old, &new).is_empty());
    }

    #[test]
    fn test_shape_compared_by_content() {
        let a = WaveSettings::default().with_shape(tri());
        let b = WaveSettings::default().with_shape(tri());
        assert!(changed_keys(&a, &b).is_empty());
        assert_eq!(changed_keys(&a, &WaveSettings::default()), vec![SettingKey::Shape]);
    }
}
