use crate::animator::{Cycles, PhaseAnimator, RunCompletion, StepOutcome};
use crate::config::WaveConfig;
use crate::error::WaveResult;
use crate::field::PointField;
use crate::generator::{ColorMode, PointFieldGenerator};
use crate::loader::{ShapeLoadEvent, ShapeLoadOutcome, ShapeRequests, ShapeTicket};
use crate::point::{Point, Rgb8};
use crate::router::{self, RegenAction};
use crate::sampler::SurfaceSampler;
use crate::settings::{SettingKey, SettingsPatch, ShapeSource, WaveSettings};
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Per-frame shader parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Uniforms {
    /// Host time in seconds, as passed to `update`.
    pub time: f32,
    pub phase: f32,
    pub intensity: f32,
    /// Projection factor applied to per-point sizes.
    pub size_scale: f32,
}

/// What a settings mutation did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeReport {
    /// Regeneration steps that ran, in execution order.
    pub actions: Vec<RegenAction>,
    /// Ticket of the shape request, when the mutation carried a shape.
    pub shape_ticket: Option<ShapeTicket>,
}

/// The animated point-cloud wave.
///
/// Owns the settings, the point field and the phase animator. Renderers call
/// [`PointWave::update`] once per frame and then read the buffers and
/// uniforms; editors go through [`PointWave::apply`] (or the setters, which
/// wrap it) so every write is routed to the matching regeneration step.
pub struct PointWave<R: Rng = StdRng> {
    settings: WaveSettings,
    config: WaveConfig,
    generator: PointFieldGenerator,
    field: PointField,
    animator: PhaseAnimator,
    uniforms: Uniforms,
    shapes: ShapeRequests,
    rng: R,
}

impl PointWave<StdRng> {
    /// Build a wave, seeding its RNG from `config.seed` or from entropy.
    pub fn new(settings: WaveSettings, config: WaveConfig) -> WaveResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(settings, config, rng)
    }
}

impl<R: Rng> PointWave<R> {
    pub fn with_rng(settings: WaveSettings, config: WaveConfig, mut rng: R) -> WaveResult<Self> {
        settings.validate()?;
        let generator = PointFieldGenerator::for_surface(settings.shape.as_deref())?;

        let mut field = PointField::new();
        field.resize(
            settings.points_number,
            &generator,
            ColorMode::from_settings(&settings),
            settings.point_size,
            &mut rng,
        );

        log::info!(
            "point wave '{}' built with {} points ({})",
            settings.name,
            field.len(),
            if generator.has_surface() { "surface" } else { "cube" }
        );

        Ok(Self {
            uniforms: Uniforms {
                time: 0.0,
                phase: 0.0,
                intensity: settings.intensity,
                size_scale: config.size_scale(),
            },
            animator: PhaseAnimator::new(config.animator),
            settings,
            config,
            generator,
            field,
            shapes: ShapeRequests::default(),
            rng,
        })
    }

    // --- Read side (renderer / UI) ---

    pub fn settings(&self) -> &WaveSettings {
        &self.settings
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        self.field.points()
    }

    /// Interleaved xyz, three floats per point.
    pub fn positions(&self) -> &[f32] {
        self.field.positions()
    }

    /// Interleaved rgb, three floats per point.
    pub fn colors(&self) -> &[f32] {
        self.field.colors()
    }

    pub fn sizes(&self) -> &[f32] {
        self.field.sizes()
    }

    pub fn uniforms(&self) -> Uniforms {
        self.uniforms
    }

    pub fn phase(&self) -> f32 {
        self.animator.phase()
    }

    pub fn cycles_left(&self) -> Cycles {
        self.animator.cycles_left()
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    pub fn has_surface(&self) -> bool {
        self.generator.has_surface()
    }

    pub fn pending_shape_loads(&self) -> usize {
        self.shapes.pending_count()
    }

    // --- Animation ---

    pub fn run(&mut self, cycles: impl Into<Cycles>) -> RunCompletion {
        self.animator.run(cycles)
    }

    pub fn stop(&mut self) {
        self.animator.stop();
    }

    /// Start forever when idle, stop when running (the panel's start/stop button).
    pub fn toggle(&mut self) -> Option<RunCompletion> {
        if self.animator.is_running() {
            self.animator.stop();
            None
        } else {
            Some(self.animator.run(Cycles::Forever))
        }
    }

    pub fn set_phase(&mut self, phase: f32) {
        self.animator.set_phase(phase);
        self.uniforms.phase = self.animator.phase();
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.config.viewport_height = height;
        self.uniforms.size_scale = self.config.size_scale();
    }

    /// The per-frame hook: apply resolved shape loads, advance the phase
    /// one step and refresh the uniforms.
    pub fn update(&mut self, time: f32) -> Vec<ShapeLoadEvent> {
        let events = self.poll_shape_loads();
        if self.animator.step(self.settings.speed) == StepOutcome::Finished {
            log::debug!("phase animation finished");
        }
        self.uniforms.time = time;
        self.uniforms.phase = self.animator.phase();
        events
    }

    // --- Mutation ---

    /// Apply a partial settings update.
    ///
    /// Validation and sampler setup happen before anything is committed: on
    /// error the settings, buffers and pending shape requests are exactly as
    /// they were.
    pub fn apply(&mut self, mut patch: SettingsPatch) -> WaveResult<ChangeReport> {
        let mut next = patch.merge_fields(&self.settings);
        next.validate()?;

        let mut generator = None;
        let mut deferred = None;
        let shape_ticket = match patch.shape.take() {
            None => None,
            Some(ShapeSource::Clear) => {
                next.shape = None;
                generator = Some(PointFieldGenerator::new());
                Some(self.shapes.issue())
            }
            Some(ShapeSource::Ready(surface)) => {
                let sampler = SurfaceSampler::new(&surface)?;
                next.shape = Some(surface);
                generator = Some(PointFieldGenerator::with_sampler(sampler));
                Some(self.shapes.issue())
            }
            Some(ShapeSource::Deferred(load)) => {
                let ticket = self.shapes.issue();
                deferred = Some((ticket, load));
                Some(ticket)
            }
        };

        let actions = router::plan(&self.settings, &next);
        if let Some(generator) = generator {
            self.generator = generator;
        }
        self.settings = next;
        self.run_actions(&actions);

        if let Some((ticket, load)) = deferred {
            log::debug!("shape request {} deferred", ticket.id());
            self.shapes.defer(ticket, load);
        }

        Ok(ChangeReport { actions, shape_ticket })
    }

    /// Replace the whole settings snapshot, firing the union of actions for
    /// every field that changed.
    ///
    /// While a deferred shape is pending the snapshot's shape is always
    /// forwarded, so the snapshot supersedes the load even when its shape
    /// equals the committed one.
    pub fn replace_settings(&mut self, settings: WaveSettings) -> WaveResult<ChangeReport> {
        let shape_changed =
            router::changed_keys(&self.settings, &settings).contains(&SettingKey::Shape);
        let shape = if shape_changed || self.shapes.pending_count() > 0 {
            Some(match settings.shape {
                Some(surface) => ShapeSource::Ready(surface),
                None => ShapeSource::Clear,
            })
        } else {
            None
        };

        self.apply(SettingsPatch {
            id: Some(settings.id),
            name: Some(settings.name),
            point_size: Some(settings.point_size),
            points_number: Some(settings.points_number),
            intensity: Some(settings.intensity),
            speed: Some(settings.speed),
            random_color: Some(settings.random_color),
            point_color: Some(settings.point_color),
            shape,
        })
    }

    pub fn set_points_number(&mut self, n: usize) -> WaveResult<ChangeReport> {
        self.apply(SettingsPatch::new().points_number(n))
    }

    pub fn set_point_size(&mut self, size: f32) -> WaveResult<ChangeReport> {
        self.apply(SettingsPatch::new().point_size(size))
    }

    pub fn set_intensity(&mut self, intensity: f32) -> WaveResult<ChangeReport> {
        self.apply(SettingsPatch::new().intensity(intensity))
    }

    pub fn set_speed(&mut self, speed: f32) -> WaveResult<ChangeReport> {
        self.apply(SettingsPatch::new().speed(speed))
    }

    pub fn set_random_color(&mut self, random: bool) -> WaveResult<ChangeReport> {
        self.apply(SettingsPatch::new().random_color(random))
    }

    pub fn set_point_color(&mut self, color: Rgb8) -> WaveResult<ChangeReport> {
        self.apply(SettingsPatch::new().point_color(color))
    }

    pub fn set_shape(&mut self, source: impl Into<ShapeSource>) -> WaveResult<ChangeReport> {
        self.apply(SettingsPatch::new().shape(source))
    }

    pub fn clear_shape(&mut self) -> WaveResult<ChangeReport> {
        self.apply(SettingsPatch::new().clear_shape())
    }

    fn run_actions(&mut self, actions: &[RegenAction]) {
        let colors = ColorMode::from_settings(&self.settings);
        for action in actions {
            log::debug!("regenerating: {:?}", action);
            match action {
                RegenAction::Resize => self.field.resize(
                    self.settings.points_number,
                    &self.generator,
                    colors,
                    self.settings.point_size,
                    &mut self.rng,
                ),
                RegenAction::ResamplePositions => {
                    self.field.resample_positions(&self.generator, &mut self.rng)
                }
                RegenAction::RegenerateColors => self.field.regenerate_colors(colors, &mut self.rng),
                RegenAction::RegenerateSizes => {
                    self.field.regenerate_sizes(self.settings.point_size, &mut self.rng)
                }
                RegenAction::UpdateIntensity => self.uniforms.intensity = self.settings.intensity,
            }
        }
    }

    fn poll_shape_loads(&mut self) -> Vec<ShapeLoadEvent> {
        let mut events: Vec<ShapeLoadEvent> = self
            .shapes
            .take_superseded()
            .into_iter()
            .map(|ticket| {
                log::debug!("shape request {} superseded", ticket.id());
                ShapeLoadEvent {
                    ticket,
                    outcome: ShapeLoadOutcome::Superseded,
                }
            })
            .collect();
        for (ticket, result) in self.shapes.take_resolved() {
            let outcome = if !self.shapes.is_latest(ticket) {
                log::debug!("shape request {} superseded", ticket.id());
                ShapeLoadOutcome::Superseded
            } else {
                match result.and_then(|surface| self.commit_shape(Arc::new(surface))) {
                    Ok(()) => ShapeLoadOutcome::Applied,
                    Err(e) => {
                        log::warn!("shape request {} failed: {}", ticket.id(), e);
                        ShapeLoadOutcome::Failed(e)
                    }
                }
            };
            events.push(ShapeLoadEvent { ticket, outcome });
        }
        events
    }

    fn commit_shape(&mut self, surface: Arc<Surface>) -> WaveResult<()> {
        if self.settings.shape.as_deref() == Some(surface.as_ref()) {
            log::debug!("loaded shape matches the current one, positions kept");
            return Ok(());
        }
        let sampler = SurfaceSampler::new(&surface)?;
        log::info!(
            "applying shape with {} triangles (area {:.3})",
            sampler.triangle_count(),
            sampler.total_area()
        );
        self.generator = PointFieldGenerator::with_sampler(sampler);
        self.settings.shape = Some(surface);
        self.field.resample_positions(&self.generator, &mut self.rng);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WaveError;

    fn small_wave() -> PointWave {
        PointWave::new(WaveSettings::default().with_points_number(200), WaveConfig::seeded(99)).unwrap()
    }

    #[test]
    fn test_initial_field_matches_settings() {
        let wave = small_wave();
        assert_eq!(wave.len(), 200);
        assert_eq!(wave.positions().len(), 600);
        assert_eq!(wave.sizes().len(), 200);
        assert!(!wave.has_surface());
        assert!(!wave.is_running());
    }

    #[test]
    fn test_invalid_initial_settings_rejected() {
        let mut settings = WaveSettings::default();
        settings.intensity = -1.0;
        assert!(matches!(
            PointWave::new(settings, WaveConfig::seeded(1)),
            Err(WaveError::InvalidSettings { field: "intensity", .. })
        ));
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = small_wave();
        let b = small_wave();
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.sizes(), b.sizes());
    }

    #[test]
    fn test_update_writes_uniforms() {
        let mut wave = small_wave();
        wave.run(1);
        wave.update(0.5);
        let u = wave.uniforms();
        assert_eq!(u.time, 0.5);
        assert!((u.phase - 0.01).abs() < 1e-6);
        assert_eq!(u.intensity, 1.0);
    }

    #[test]
    fn test_toggle() {
        let mut wave = small_wave();
        let done = wave.toggle().unwrap();
        assert_eq!(wave.cycles_left(), Cycles::Forever);
        assert!(wave.toggle().is_none());
        assert!(done.is_resolved());
    }

    #[test]
    fn test_viewport_height_updates_size_scale() {
        let mut wave = small_wave();
        let before = wave.uniforms().size_scale;
        wave.set_viewport_height(540.0);
        assert!((wave.uniforms().size_scale - before * 0.5).abs() < 1e-4);
    }
}
