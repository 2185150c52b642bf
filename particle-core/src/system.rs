use glam::DVec2;
use rand::Rng;

use crate::{config::SimConfig, input::InputState, particle::Particle, physics};

/// Ordered collection of particles.
///
/// Index order is insertion order: index 0 is the oldest particle and is
/// the first to be evicted by [`crate::population::enforce_cap`].
#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    pub(crate) particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Creates `cfg.initial_count` particles scattered over `cfg.bounds`.
    pub fn random(cfg: &SimConfig, rng: &mut impl Rng) -> Self {
        let particles = (0..cfg.initial_count)
            .map(|_| Particle::random_in_bounds(cfg, rng))
            .collect();
        Self { particles }
    }

    /// Advances every particle by one frame.
    ///
    /// Steps run per particle in this order: pointer attraction (only
    /// while `input.pointer_down`), integration, wall reflection, gravity,
    /// damping (when `cfg.damping` is set) and hue cycling. See
    /// [`crate::physics`] for each step.
    ///
    /// After this call every position lies inside
    /// `[0, bounds.x] × [0, bounds.y]`.
    ///
    /// ### Parameters
    /// - `bounds` - Width and height of the simulation rectangle.
    /// - `input` - Pointer state captured at the start of the frame.
    /// - `cfg` - Physics constants.
    pub fn update(&mut self, bounds: DVec2, input: &InputState, cfg: &SimConfig) {
        let pointer = input.pointer_down.then_some(input.pointer);

        for p in &mut self.particles {
            if let Some(target) = pointer {
                physics::attract(p, target, cfg.influence_radius, cfg.attraction_strength);
            }
            physics::integrate(p);
            physics::reflect(p, bounds);
            physics::apply_gravity(p, cfg.gravity);
            if let Some(factor) = cfg.damping {
                physics::apply_damping(p, factor);
            }
            physics::cycle_hue(p, cfg.hue_step);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }
}
