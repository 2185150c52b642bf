//! Core 2-D particle field simulation library.
//!
//! Main components:
//! - [`particle`] — a single point-mass with a cyclic hue.
//! - [`physics`] — per-particle steps (attraction, integration, walls, ...).
//! - [`system`] — the ordered particle collection and its per-frame update.
//! - [`connectivity`] — budgeted near-neighbour line computation.
//! - [`population`] — spawn bursts and the oldest-first population cap.
//! - [`frame_clock`] — smoothed FPS from host timestamps.
//! - [`input`] — pointer state delivered by the host.
//! - [`render`] — the draw command list consumed by a host renderer.
//! - [`simulation`] — the frame pipeline tying everything together.
//! - [`config`] / [`error`] — tunables and their validation errors.
//! - [`types`] — shared type aliases.

pub mod config;
pub mod connectivity;
pub mod error;
pub mod frame_clock;
pub mod input;
pub mod particle;
pub mod physics;
pub mod population;
pub mod render;
pub mod simulation;
pub mod system;
pub mod types;
