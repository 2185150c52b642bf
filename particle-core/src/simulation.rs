//! The per-frame pipeline and the host-facing entry points.
//!
//! A host owns one [`Simulation`] and calls into it from its event
//! handlers and its repaint loop:
//!
//! - pointer events → [`Simulation::pointer_move`],
//!   [`Simulation::pointer_down`], [`Simulation::pointer_up`],
//!   [`Simulation::click`];
//! - every repaint → [`Simulation::advance_frame`], whose
//!   [`Frame::commands`] are painted in order.

use glam::DVec2;
use rand::{Rng, rngs::StdRng};

use crate::{
    config::SimConfig,
    connectivity,
    error::ConfigError,
    frame_clock::FrameClock,
    input::InputState,
    particle::Particle,
    population,
    render::{self, DrawCommand},
    system::ParticleSystem,
    types::ConnectivityPair,
};

/// Output of one [`Simulation::advance_frame`] call.
#[derive(Clone, Debug)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub pairs: Vec<ConnectivityPair>,
    pub fps: f64,
    pub displayed_fps: i32,
    pub particle_count: usize,
}

/// Owns the complete simulation state.
///
/// The random generator is injected so tests can fix particle placement
/// with a seeded generator.
#[derive(Debug)]
pub struct Simulation<R: Rng = StdRng> {
    cfg: SimConfig,
    system: ParticleSystem,
    input: InputState,
    clock: FrameClock,
    rng: R,
}

impl<R: Rng> Simulation<R> {
    /// Validates `cfg` and creates `cfg.initial_count` random particles.
    pub fn new(cfg: SimConfig, mut rng: R) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let system = ParticleSystem::random(&cfg, &mut rng);
        log::info!(
            "simulation started: {} particles in {}x{}",
            system.len(),
            cfg.bounds.x,
            cfg.bounds.y
        );
        Ok(Self::assemble(cfg, rng, system))
    }

    /// Builds a simulation from [`SimConfig::default`], which always
    /// validates.
    pub fn with_default_config(mut rng: R) -> Self {
        let cfg = SimConfig::default();
        let system = ParticleSystem::random(&cfg, &mut rng);
        Self::assemble(cfg, rng, system)
    }

    /// Like [`Simulation::new`] but with a literal starting population.
    ///
    /// The population is trimmed to `cfg.max_population`, oldest first.
    pub fn with_particles(
        cfg: SimConfig,
        rng: R,
        particles: Vec<Particle>,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut system = ParticleSystem::from_particles(particles);
        population::enforce_cap(&mut system, cfg.max_population);
        Ok(Self::assemble(cfg, rng, system))
    }

    fn assemble(cfg: SimConfig, rng: R, system: ParticleSystem) -> Self {
        let clock = FrameClock::new(cfg.fps_refresh_every);
        Self {
            cfg,
            system,
            input: InputState::default(),
            clock,
            rng,
        }
    }

    /// Runs one frame: clock tick, physics update, connectivity, draw list.
    ///
    /// ### Parameters
    /// - `now_ms` - Monotonic host timestamp in milliseconds.
    pub fn advance_frame(&mut self, now_ms: f64) -> Frame {
        let fps = self.clock.tick(now_ms);

        self.system.update(self.cfg.bounds, &self.input, &self.cfg);

        let pairs = connectivity::compute_for(self.system.particles(), &self.cfg);
        let displayed_fps = self.clock.displayed_fps();
        let commands = render::emit(
            self.system.particles(),
            &pairs,
            displayed_fps,
            self.cfg.bounds,
        );

        Frame {
            commands,
            pairs,
            fps,
            displayed_fps,
            particle_count: self.system.len(),
        }
    }

    /// Records the pointer position; non-finite coordinates are ignored.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.input.set_pointer(x, y)
    }

    pub fn pointer_down(&mut self) {
        self.input.press();
    }

    pub fn pointer_up(&mut self) {
        self.input.release();
    }

    /// Spawns a burst of `cfg.spawn_burst` particles at `(x, y)`.
    ///
    /// ### Returns
    /// The number of particles evicted by the population cap, or `None`
    /// if the coordinates were not finite and nothing was spawned.
    pub fn click(&mut self, x: f64, y: f64) -> Option<usize> {
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("ignoring click at non-finite position ({x}, {y})");
            return None;
        }
        let evicted = population::spawn(
            &mut self.system,
            DVec2::new(x, y),
            self.cfg.spawn_burst,
            self.cfg.spawn_jitter,
            self.cfg.spawn_speed,
            &self.cfg,
            &mut self.rng,
        );
        Some(evicted)
    }

    /// Replaces the current pointer state wholesale, e.g. from a
    /// [`crate::input::SharedInput::snapshot`] taken at frame start.
    pub fn set_input(&mut self, input: InputState) {
        if input.pointer.is_finite() {
            self.input = input;
        } else {
            log::warn!("ignoring input snapshot with non-finite pointer");
            self.input.pointer_down = input.pointer_down;
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
