use crossbeam::channel::{bounded, Receiver, Sender, TryRecvError};
use std::f32::consts::PI;

/// Upper bound of the phase range (half cycle).
pub const DEFAULT_PHASE_RANGE: f32 = PI;
/// Phase advance per frame at speed 1: one sweep takes ~315 frames.
pub const DEFAULT_STEP_SCALE: f32 = 0.01;

/// Tunables for the phase sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorConfig {
    pub phase_range: f32,
    pub step_scale: f32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            phase_range: DEFAULT_PHASE_RANGE,
            step_scale: DEFAULT_STEP_SCALE,
        }
    }
}

/// Remaining sweeps: a finite count or "until stopped".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycles {
    Count(u32),
    Forever,
}

impl Cycles {
    pub fn is_zero(&self) -> bool {
        matches!(self, Cycles::Count(0))
    }

    fn add(self, other: Cycles) -> Cycles {
        match (self, other) {
            (Cycles::Count(a), Cycles::Count(b)) => Cycles::Count(a.saturating_add(b)),
            _ => Cycles::Forever,
        }
    }

    fn decrement(self) -> Cycles {
        match self {
            Cycles::Count(n) => Cycles::Count(n.saturating_sub(1)),
            Cycles::Forever => Cycles::Forever,
        }
    }
}

impl From<u32> for Cycles {
    fn from(n: u32) -> Self {
        Cycles::Count(n)
    }
}

/// Resolves once the animation that `run` extended goes idle, either by
/// running out of cycles or by `stop`.
pub struct RunCompletion {
    rx: Receiver<()>,
}

impl RunCompletion {
    fn pair() -> (Sender<()>, RunCompletion) {
        let (tx, rx) = bounded(1);
        (tx, RunCompletion { rx })
    }

    /// Non-blocking check. Also true if the animator was dropped.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.rx.try_recv(), Err(TryRecvError::Empty))
    }

    /// Block until resolved. Only useful from a thread other than the one
    /// stepping the animator.
    pub fn wait(self) {
        let _ = self.rx.recv();
    }
}

/// Result of one animation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not running; nothing changed.
    Idle,
    /// Phase advanced within the range.
    Advanced,
    /// Phase hit the upper bound and reset; cycles remain.
    Wrapped,
    /// Phase reset and the last cycle was used up; now idle.
    Finished,
}

/// Cyclic phase driver for the wave shader.
///
/// There is only ever one advance loop: `run` while running extends the
/// remaining cycle count instead of starting another.
#[derive(Debug)]
pub struct PhaseAnimator {
    config: AnimatorConfig,
    phase: f32,
    cycles_left: Cycles,
    waiters: Vec<Sender<()>>,
}

impl Default for PhaseAnimator {
    fn default() -> Self {
        Self::new(AnimatorConfig::default())
    }
}

impl PhaseAnimator {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            config,
            phase: 0.0,
            cycles_left: Cycles::Count(0),
            waiters: Vec::new(),
        }
    }

    pub fn config(&self) -> AnimatorConfig {
        self.config
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Set the phase directly, clamped into the range.
    pub fn set_phase(&mut self, phase: f32) {
        self.phase = if phase.is_finite() {
            phase.clamp(0.0, self.config.phase_range)
        } else {
            0.0
        };
    }

    pub fn cycles_left(&self) -> Cycles {
        self.cycles_left
    }

    pub fn is_running(&self) -> bool {
        !self.cycles_left.is_zero()
    }

    /// Add `cycles` sweeps to the animation, starting it if idle.
    pub fn run(&mut self, cycles: impl Into<Cycles>) -> RunCompletion {
        let (tx, completion) = RunCompletion::pair();
        self.cycles_left = self.cycles_left.add(cycles.into());
        if self.is_running() {
            self.waiters.push(tx);
        } else {
            // Nothing to run; resolves immediately.
            let _ = tx.try_send(());
        }
        completion
    }

    /// Go idle now. Pending completions resolve as if cycles ran out.
    pub fn stop(&mut self) {
        if self.is_running() {
            log::debug!("phase animation stopped at {:.3}", self.phase);
        }
        self.cycles_left = Cycles::Count(0);
        self.resolve_waiters();
    }

    /// Advance by one frame at the given speed.
    pub fn step(&mut self, speed: f32) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Idle;
        }

        self.phase += speed * self.config.step_scale;
        if self.phase < self.config.phase_range {
            return StepOutcome::Advanced;
        }

        self.phase = 0.0;
        self.cycles_left = self.cycles_left.decrement();
        if self.is_running() {
            StepOutcome::Wrapped
        } else {
            self.resolve_waiters();
            StepOutcome::Finished
        }
    }

    fn resolve_waiters(&mut self) {
        for tx in self.waiters.drain(..) {
            let _ = tx.try_send(());
        }
    }
}
