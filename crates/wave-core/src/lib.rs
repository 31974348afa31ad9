pub mod animator;
pub mod config;
pub mod error;
pub mod field;
pub mod generator;
pub mod loader;
pub mod point;
pub mod router;
pub mod sampler;
pub mod settings;
pub mod surface;
pub mod wave;

pub use animator::{AnimatorConfig, Cycles, PhaseAnimator, RunCompletion, StepOutcome};
pub use config::WaveConfig;
pub use error::{WaveError, WaveResult};
pub use field::PointField;
pub use generator::{ColorMode, PointFieldGenerator};
pub use loader::{LoadResult, ShapeLoad, ShapeLoadEvent, ShapeLoadOutcome, ShapeLoadSender, ShapeTicket};
pub use point::{Point, Rgb, Rgb8};
pub use router::RegenAction;
pub use sampler::SurfaceSampler;
pub use settings::{SettingKey, SettingsPatch, ShapeSource, WaveSettings};
pub use surface::{Surface, Triangle};
pub use wave::{ChangeReport, PointWave, Uniforms};
