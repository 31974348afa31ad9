use glam::Vec3;
use wave_core::{PointWave, Rgb8, Surface, Triangle, WaveConfig, WaveSettings};
use wave_presets::PresetStore;

// ── Helpers ──────────────────────────────────────────────────────

fn named(id: &str, name: &str) -> WaveSettings {
    WaveSettings {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

// ── 1. Round trip ────────────────────────────────────────────────

#[test]
fn saved_preset_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::open(dir.path().join("presets.json")).unwrap();

    let mut settings = named("7", "Ember");
    settings.points_number = 2_500;
    settings.random_color = true;
    settings.point_color = Rgb8::new(200, 10, 90);
    let list = store.save(&settings).unwrap();
    assert_eq!(list.len(), 1);

    let reopened = PresetStore::open(store.path()).unwrap();
    assert_eq!(reopened.get("7").unwrap(), Some(settings));
}

#[test]
fn preset_with_shape_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::open(dir.path().join("presets.json")).unwrap();

    let surface = Surface::new(vec![Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y)]);
    let settings = named("1", "Shard").with_shape(surface);
    store.save(&settings).unwrap();

    let loaded = store.get("1").unwrap().unwrap();
    assert_eq!(loaded, settings);

    // A loaded preset is directly usable.
    let wave = PointWave::new(loaded.with_points_number(10), WaveConfig::seeded(1)).unwrap();
    assert!(wave.has_surface());
}

#[test]
fn save_replaces_same_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::open(dir.path().join("presets.json")).unwrap();
    store.save(&named("1", "First")).unwrap();
    let list = store.save(&named("1", "Renamed")).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list["1"].name, "Renamed");
}

// ── 2. Delete ────────────────────────────────────────────────────

#[test]
fn delete_removes_only_that_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::open(dir.path().join("presets.json")).unwrap();
    store.save(&named("1", "A")).unwrap();
    store.save(&named("2", "B")).unwrap();

    let list = store.delete("1").unwrap();
    assert_eq!(list.keys().collect::<Vec<_>>(), vec!["2"]);
    assert_eq!(store.get("1").unwrap(), None);

    // Deleting a missing id is a no-op.
    assert_eq!(store.delete("missing").unwrap().len(), 1);
}

// ── 3. Recovery ──────────────────────────────────────────────────

#[test]
fn corrupt_file_is_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = PresetStore::open(&path).unwrap();
    assert!(store.fetch_list().unwrap().is_empty());
    store.save(&named("1", "Fresh")).unwrap();
    assert_eq!(store.fetch_list().unwrap().len(), 1);
}

#[test]
fn wrong_shape_json_is_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let store = PresetStore::open(&path).unwrap();
    assert!(store.fetch_list().unwrap().is_empty());
}

#[test]
fn stores_share_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    let a = PresetStore::open(&path).unwrap();
    let b = PresetStore::open(&path).unwrap();

    a.save(&named("1", "From A")).unwrap();
    assert_eq!(b.get("1").unwrap().unwrap().name, "From A");
}

#[test]
fn file_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = PresetStore::open(dir.path().join("presets.json")).unwrap();
    store.save(&named("1", "Keys")).unwrap();

    let json = std::fs::read_to_string(store.path()).unwrap();
    assert!(json.contains("\"pointsNumber\""));
    assert!(json.contains("\"randomColor\""));
}
