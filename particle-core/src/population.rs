//! Population growth and the oldest-first cap.

use glam::DVec2;
use rand::Rng;

use crate::{config::SimConfig, particle::Particle, system::ParticleSystem};

/// Appends a burst of particles around `at`, then enforces the cap.
///
/// The spawn itself is always accepted. Eviction afterwards is strictly
/// FIFO, so if `count` alone exceeds `cfg.max_population` some of the
/// particles spawned by this very call are removed too.
///
/// ### Parameters
/// - `system` - Collection to grow.
/// - `at` - Spawn point.
/// - `count` - Number of particles to append.
/// - `jitter` - Half-width of the uniform position jitter.
/// - `max_speed` - Half-width of the uniform velocity range.
/// - `cfg` - Supplies the radius range and `max_population`.
///
/// ### Returns
/// The number of particles evicted by the cap.
pub fn spawn(
    system: &mut ParticleSystem,
    at: DVec2,
    count: u32,
    jitter: f64,
    max_speed: f64,
    cfg: &SimConfig,
    rng: &mut impl Rng,
) -> usize {
    system.particles.reserve(count as usize);
    for _ in 0..count {
        system
            .particles
            .push(Particle::spawned_near(at, jitter, max_speed, cfg, rng));
    }
    log::debug!("spawned {count} particles at ({:.1}, {:.1})", at.x, at.y);

    enforce_cap(system, cfg.max_population)
}

/// Removes the oldest (lowest-index) particles until at most `max` remain.
///
/// ### Returns
/// The number of particles removed.
pub fn enforce_cap(system: &mut ParticleSystem, max: usize) -> usize {
    let len = system.particles.len();
    if len <= max {
        return 0;
    }
    let excess = len - max;
    system.particles.drain(..excess);
    log::debug!("population cap {max} reached, evicted {excess} oldest particles");
    excess
}
