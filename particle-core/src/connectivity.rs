//! Proximity lines between nearby particles.
//!
//! A full pairwise scan is O(n²), so the canonical [`compute`] bounds both
//! the work (only a prefix of the collection takes part) and the output
//! (a maximum number of pairs). [`compute_unbounded`] is the reduced
//! legacy mode without either cap.

use crate::{
    config::{ConnectivityMode, SimConfig},
    particle::Particle,
    types::ConnectivityPair,
};

/// Returns the pairs of particles closer than `threshold`, under a budget.
///
/// 1. Only the first `max_considered` particles, in collection order, take
///    part. This is a plain prefix cap, not a spatial filter.
/// 2. Index pairs `i < j` are tested with `|pi - pj|² < threshold²`.
/// 3. Emission stops as soon as `max_connections` pairs were produced.
///
/// Pairs come out in ascending `(i, j)` order.
///
/// ### Parameters
/// - `particles` - Current particle collection; only read.
/// - `max_considered` - Size of the participating prefix.
/// - `max_connections` - Maximum number of pairs returned.
/// - `threshold` - Connection distance.
pub fn compute(
    particles: &[Particle],
    max_considered: usize,
    max_connections: usize,
    threshold: f64,
) -> Vec<ConnectivityPair> {
    let considered = &particles[..particles.len().min(max_considered)];
    let r2 = threshold * threshold;
    let mut pairs = Vec::with_capacity(max_connections.min(considered.len()));

    if max_connections == 0 {
        return pairs;
    }

    for (i, a) in considered.iter().enumerate() {
        for (j, b) in considered.iter().enumerate().skip(i + 1) {
            if a.pos.distance_squared(b.pos) < r2 {
                pairs.push((i, j));
                if pairs.len() == max_connections {
                    return pairs;
                }
            }
        }
    }
    pairs
}

/// Legacy connectivity: every pair, true distance, no output cap.
pub fn compute_unbounded(particles: &[Particle], threshold: f64) -> Vec<ConnectivityPair> {
    let mut pairs = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            if a.pos.distance(b.pos) < threshold {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Runs whichever connectivity mode `cfg` selects.
pub fn compute_for(particles: &[Particle], cfg: &SimConfig) -> Vec<ConnectivityPair> {
    match cfg.connectivity {
        ConnectivityMode::Budgeted => compute(
            particles,
            cfg.max_considered,
            cfg.max_connections,
            cfg.connect_threshold,
        ),
        ConnectivityMode::Unbounded => compute_unbounded(particles, cfg.connect_threshold),
    }
}
