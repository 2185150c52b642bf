use glam::DVec2;
use rand::Rng;

use crate::config::SimConfig;

/// A single point-mass with a cyclic colour phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Hue in degrees, always in `[0, 360)` after an update.
    pub hue: f64,
}

/// Uniform sample in `[-half, half]`. Never panics, even for `half == 0`.
fn symmetric(rng: &mut impl Rng, half: f64) -> f64 {
    (rng.random::<f64>() * 2.0 - 1.0) * half
}

fn random_vec(rng: &mut impl Rng, half: f64) -> DVec2 {
    let x = symmetric(rng, half);
    let y = symmetric(rng, half);
    DVec2::new(x, y)
}

fn random_radius(rng: &mut impl Rng, cfg: &SimConfig) -> f64 {
    cfg.radius_min + rng.random::<f64>() * (cfg.radius_max - cfg.radius_min)
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, hue: f64) -> Self {
        Self {
            pos,
            vel,
            radius,
            hue,
        }
    }

    /// A particle at rest with radius 2.0 and hue 0.
    pub fn at_rest(pos: DVec2) -> Self {
        Self::new(pos, DVec2::ZERO, 2.0, 0.0)
    }

    /// Creates a particle anywhere inside `cfg.bounds`, as used for the
    /// initial population.
    pub fn random_in_bounds(cfg: &SimConfig, rng: &mut impl Rng) -> Self {
        let pos = DVec2::new(
            rng.random::<f64>() * cfg.bounds.x,
            rng.random::<f64>() * cfg.bounds.y,
        );
        let vel = random_vec(rng, cfg.initial_speed);
        let radius = random_radius(rng, cfg);
        let hue = rng.random::<f64>() * 360.0;
        Self::new(pos, vel, radius, hue)
    }

    /// Creates a particle clustered around `at`.
    ///
    /// ### Parameters
    /// - `at` - Spawn point, usually the click position.
    /// - `jitter` - Each position component is offset by a uniform value in `±jitter`.
    /// - `max_speed` - Each velocity component is uniform in `±max_speed`.
    /// - `cfg` - Supplies the radius range.
    pub fn spawned_near(
        at: DVec2,
        jitter: f64,
        max_speed: f64,
        cfg: &SimConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let pos = at + random_vec(rng, jitter.abs());
        let vel = random_vec(rng, max_speed.abs());
        let radius = random_radius(rng, cfg);
        let hue = rng.random::<f64>() * 360.0;
        Self::new(pos, vel, radius, hue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn random_in_bounds_respects_configured_ranges() {
        let cfg = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let p = Particle::random_in_bounds(&cfg, &mut rng);
            assert!((0.0..=cfg.bounds.x).contains(&p.pos.x));
            assert!((0.0..=cfg.bounds.y).contains(&p.pos.y));
            assert!(p.vel.x.abs() <= cfg.initial_speed);
            assert!(p.vel.y.abs() <= cfg.initial_speed);
            assert!(p.radius >= cfg.radius_min && p.radius <= cfg.radius_max);
            assert!((0.0..360.0).contains(&p.hue));
        }
    }

    #[test]
    fn spawned_near_clusters_around_the_spawn_point() {
        let cfg = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let at = DVec2::new(400.0, 300.0);

        for _ in 0..500 {
            let p = Particle::spawned_near(at, 10.0, 3.0, &cfg, &mut rng);
            assert!((p.pos - at).abs().max_element() <= 10.0);
            assert!(p.vel.abs().max_element() <= 3.0);
        }
    }

    #[test]
    fn spawned_near_with_zero_ranges_is_exact() {
        let cfg = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let at = DVec2::new(12.5, -4.0);

        let p = Particle::spawned_near(at, 0.0, 0.0, &cfg, &mut rng);
        assert_eq!(p.pos, at);
        assert_eq!(p.vel, DVec2::ZERO);
    }

    #[test]
    fn same_seed_gives_same_particle() {
        let cfg = SimConfig::default();
        let a = Particle::random_in_bounds(&cfg, &mut StdRng::seed_from_u64(42));
        let b = Particle::random_in_bounds(&cfg, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn at_rest_has_fixed_radius_and_hue() {
        let p = Particle::at_rest(DVec2::new(3.0, 4.0));
        assert_eq!(p.pos, DVec2::new(3.0, 4.0));
        assert_eq!(p.vel, DVec2::ZERO);
        assert_eq!(p.radius, 2.0);
        assert_eq!(p.hue, 0.0);
    }
}
