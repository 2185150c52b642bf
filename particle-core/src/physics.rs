//! Per-particle physics steps.
//!
//! [`crate::system::ParticleSystem::update`] applies these to every
//! particle in a fixed order, which affects the result:
//! 1. [`attract`]: pull toward the pointer while the button is held.
//! 2. [`integrate`]: unit-timestep Euler move.
//! 3. [`reflect`]: elastic, axis-aligned wall bounce.
//! 4. [`apply_gravity`]: constant downward bias.
//! 5. [`apply_damping`]: bleed energy.
//! 6. [`cycle_hue`]: advance the colour phase.

use glam::DVec2;

use crate::particle::Particle;

/// Pulls a particle toward `pointer`.
///
/// If the distance `d` to the pointer satisfies `0 < d < radius`, adds
/// an impulse along the normalized direction scaled by
/// `(radius - d) / radius * strength` to the velocity. A particle exactly
/// on the pointer is left alone.
///
/// ### Parameters
/// - `p` - Particle to modify.
/// - `pointer` - Pointer position in simulation space.
/// - `radius` - Influence radius; particles at or beyond it are unaffected.
/// - `strength` - Impulse magnitude at zero distance.
pub fn attract(p: &mut Particle, pointer: DVec2, radius: f64, strength: f64) {
    let d = pointer - p.pos;
    let dist = d.length();
    if dist > 0.0 && dist < radius {
        let force = (radius - dist) / radius * strength;
        p.vel += d / dist * force;
    }
}

/// `pos += vel`. Motion is tied to frames, not wall-clock time.
#[inline]
pub fn integrate(p: &mut Particle) {
    p.pos += p.vel;
}

/// Bounces a particle off the walls of `[0, bounds.x] × [0, bounds.y]`.
///
/// Each axis is handled independently: when the position is outside the
/// range on that axis, the velocity component is negated and the
/// position clamped. No energy is lost here.
pub fn reflect(p: &mut Particle, bounds: DVec2) {
    if p.pos.x < 0.0 || p.pos.x > bounds.x {
        p.vel.x = -p.vel.x;
        p.pos.x = p.pos.x.clamp(0.0, bounds.x);
    }
    if p.pos.y < 0.0 || p.pos.y > bounds.y {
        p.vel.y = -p.vel.y;
        p.pos.y = p.pos.y.clamp(0.0, bounds.y);
    }
}

#[inline]
pub fn apply_gravity(p: &mut Particle, gravity: f64) {
    p.vel.y += gravity;
}

#[inline]
pub fn apply_damping(p: &mut Particle, factor: f64) {
    p.vel *= factor;
}

/// Advances the hue by `step` degrees, wrapping into `[0, 360)`.
///
/// `step` may be negative. `rem_euclid` can round a tiny negative sum up
/// to exactly 360, which is folded back to 0.
#[inline]
pub fn cycle_hue(p: &mut Particle, step: f64) {
    let hue = (p.hue + step).rem_euclid(360.0);
    p.hue = if hue >= 360.0 { 0.0 } else { hue };
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle::new(DVec2::new(x, y), DVec2::new(vx, vy), 3.0, 0.0)
    }

    #[test]
    fn attract_pulls_toward_pointer_scaled_by_distance() {
        let mut p = particle(0.0, 0.0, 0.0, 0.0);
        attract(&mut p, DVec2::new(100.0, 0.0), 200.0, 0.5);

        // (200 - 100) / 200 * 0.5 = 0.25 along +x.
        assert!((p.vel.x - 0.25).abs() < EPS);
        assert_eq!(p.vel.y, 0.0);
    }

    #[test]
    fn attract_ignores_particles_outside_radius() {
        let mut p = particle(0.0, 0.0, 1.0, -1.0);
        attract(&mut p, DVec2::new(200.0, 0.0), 200.0, 0.5);
        assert_eq!(p.vel, DVec2::new(1.0, -1.0));

        attract(&mut p, DVec2::new(300.0, 400.0), 200.0, 0.5);
        assert_eq!(p.vel, DVec2::new(1.0, -1.0));
    }

    #[test]
    fn attract_at_zero_distance_is_noop() {
        let mut p = particle(50.0, 50.0, 0.3, 0.4);
        attract(&mut p, DVec2::new(50.0, 50.0), 200.0, 0.5);
        assert_eq!(p.vel, DVec2::new(0.3, 0.4));
        assert!(p.vel.is_finite());
    }

    #[test]
    fn integrate_adds_velocity_once() {
        let mut p = particle(10.0, 20.0, 1.5, -2.5);
        integrate(&mut p);
        assert_eq!(p.pos, DVec2::new(11.5, 17.5));
    }

    #[test]
    fn reflect_flips_velocity_and_clamps_on_each_axis() {
        let bounds = DVec2::new(800.0, 600.0);

        let mut p = particle(801.0, 300.0, 2.0, 1.0);
        reflect(&mut p, bounds);
        assert_eq!(p.pos, DVec2::new(800.0, 300.0));
        assert_eq!(p.vel, DVec2::new(-2.0, 1.0));

        let mut p = particle(400.0, -3.0, 1.0, -4.0);
        reflect(&mut p, bounds);
        assert_eq!(p.pos, DVec2::new(400.0, 0.0));
        assert_eq!(p.vel, DVec2::new(1.0, 4.0));

        let mut p = particle(-1.0, 601.0, -1.0, 1.0);
        reflect(&mut p, bounds);
        assert_eq!(p.pos, DVec2::new(0.0, 600.0));
        assert_eq!(p.vel, DVec2::new(1.0, -1.0));
    }

    #[test]
    fn reflect_leaves_particles_on_the_wall_alone() {
        let mut p = particle(800.0, 0.0, 1.0, -1.0);
        reflect(&mut p, DVec2::new(800.0, 600.0));
        assert_eq!(p.vel, DVec2::new(1.0, -1.0));
    }

    #[test]
    fn gravity_and_damping_act_on_velocity() {
        let mut p = particle(0.0, 0.0, 1.0, 1.0);
        apply_gravity(&mut p, 0.05);
        assert!((p.vel.y - 1.05).abs() < EPS);

        apply_damping(&mut p, 0.5);
        assert!((p.vel.x - 0.5).abs() < EPS);
        assert!((p.vel.y - 0.525).abs() < EPS);
    }

    #[test]
    fn cycle_hue_wraps_modulo_360() {
        let mut p = particle(0.0, 0.0, 0.0, 0.0);
        p.hue = 359.8;
        cycle_hue(&mut p, 0.5);
        assert!((p.hue - 0.3).abs() < 1e-9);

        p.hue = 359.5;
        cycle_hue(&mut p, 0.5);
        assert_eq!(p.hue, 0.0);

        p.hue = 10.0;
        cycle_hue(&mut p, 0.5);
        assert_eq!(p.hue, 10.5);
    }

    #[test]
    fn cycle_hue_backwards_stays_below_360() {
        let mut p = particle(0.0, 0.0, 0.0, 0.0);
        cycle_hue(&mut p, -1e-17);
        assert!(p.hue >= 0.0 && p.hue < 360.0, "hue = {}", p.hue);

        p.hue = 0.2;
        cycle_hue(&mut p, -0.5);
        assert!((p.hue - 359.7).abs() < 1e-9);
    }
}
