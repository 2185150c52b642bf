/// Index of a particle in a [`crate::system::ParticleSystem`].
///
/// Indices follow insertion order and shift whenever the oldest
/// particles are evicted, so they are only meaningful within a single
/// frame.
pub type ParticleIndex = usize;

/// Two particles close enough to be joined by a line, with `.0 < .1`.
pub type ConnectivityPair = (ParticleIndex, ParticleIndex);
