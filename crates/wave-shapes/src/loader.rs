use crate::descriptor::ShapeDescriptor;
use std::thread;
use wave_core::ShapeLoad;

/// Build `descriptor` on a worker thread.
///
/// The returned load resolves when the build finishes; hand it to
/// `PointWave::set_shape` and it is applied on a later `update`. If the
/// thread cannot be started the load reports a failure when polled.
pub fn spawn_build(descriptor: ShapeDescriptor) -> ShapeLoad {
    let (tx, load) = ShapeLoad::channel();
    let label = descriptor.label();

    let spawned = thread::Builder::new()
        .name(format!("shape-{label}"))
        .spawn(move || {
            let result = descriptor.build();
            match &result {
                Ok(surface) => log::debug!("{label} built: {} triangles", surface.len()),
                Err(e) => log::warn!("{label} build failed: {e}"),
            }
            if !tx.resolve(result) {
                log::debug!("{label} finished after its request was dropped");
            }
        });

    if let Err(e) = spawned {
        log::error!("failed to spawn shape builder: {e}");
    }
    load
}

/// Build on the calling thread, wrapped as an already-resolved load.
pub fn build_now(descriptor: &ShapeDescriptor) -> ShapeLoad {
    ShapeLoad::resolved(descriptor.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use wave_core::{PointWave, ShapeLoadOutcome, WaveConfig, WaveSettings};

    #[test]
    fn test_spawned_build_applies() {
        let mut wave = PointWave::new(
            WaveSettings::default().with_points_number(100),
            WaveConfig::seeded(5),
        )
        .unwrap();
        let load = spawn_build(ShapeDescriptor::Disc {
            radius: 0.3,
            segments: 16,
        });
        wave.set_shape(load).unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        let mut events = Vec::new();
        while events.is_empty() && Instant::now() < deadline {
            events = wave.update(0.0);
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].outcome, ShapeLoadOutcome::Applied);
        assert!(wave.positions().chunks_exact(3).all(|p| p[2] == 0.0));
    }

    #[test]
    fn test_build_now_failure() {
        let mut wave = PointWave::new(WaveSettings::default(), WaveConfig::seeded(6)).unwrap();
        let load = build_now(&ShapeDescriptor::Klein {
            scale: -1.0,
            slices: 4,
            stacks: 4,
        });
        wave.set_shape(load).unwrap();
        let events = wave.update(0.0);
        assert!(matches!(events[0].outcome, ShapeLoadOutcome::Failed(_)));
        assert!(!wave.has_surface());
    }
}
