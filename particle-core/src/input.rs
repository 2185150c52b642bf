use std::sync::{Arc, Mutex, PoisonError};

use glam::DVec2;

/// Latest pointer state delivered by the host.
///
/// The simulation only reads this; hosts mutate it through
/// [`InputState::set_pointer`], [`InputState::press`] and
/// [`InputState::release`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub pointer: DVec2,
    pub pointer_down: bool,
}

impl InputState {
    /// Records a pointer position in simulation coordinates.
    ///
    /// Non-finite coordinates are dropped so NaN never reaches particle
    /// state.
    ///
    /// ### Returns
    /// `true` if the position was accepted.
    pub fn set_pointer(&mut self, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("ignoring non-finite pointer position ({x}, {y})");
            return false;
        }
        self.pointer = DVec2::new(x, y);
        true
    }

    pub fn press(&mut self) {
        self.pointer_down = true;
    }

    pub fn release(&mut self) {
        self.pointer_down = false;
    }
}

/// Thread-safe handle for hosts that deliver events on another thread.
///
/// Reads go through [`SharedInput::snapshot`], which copies both pointer
/// components under a single lock.
#[derive(Clone, Debug, Default)]
pub struct SharedInput {
    inner: Arc<Mutex<InputState>>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with exclusive access to the state.
    ///
    /// A poisoned lock is recovered: the state is plain data and is never
    /// left half-written by the setters above.
    pub fn update<T>(&self, f: impl FnOnce(&mut InputState) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn snapshot(&self) -> InputState {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
