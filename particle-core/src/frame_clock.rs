//! Frame timing: turns host timestamps into a smoothed FPS estimate.

/// FPS assumed before any frame has been measured.
pub const SEED_FPS: f64 = 60.0;

/// Weight given to the instantaneous sample in the moving average.
const SAMPLE_WEIGHT: f64 = 0.1;

/// Exponentially smoothed frame-rate estimator.
///
/// Timestamps are in milliseconds. A second, integer snapshot
/// ([`FrameClock::displayed_fps`]) is only refreshed every
/// `refresh_every` ticks so a counter drawn every frame does not jitter.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    smoothed_fps: f64,
    frame_counter: u64,
    displayed_fps: i32,
    refresh_every: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FrameClock {
    /// Creates a clock with no previous timestamp.
    ///
    /// The first [`FrameClock::tick`] only records its timestamp.
    /// `refresh_every` is clamped to at least 1.
    pub fn new(refresh_every: u64) -> Self {
        Self {
            last_timestamp: None,
            smoothed_fps: SEED_FPS,
            frame_counter: 0,
            displayed_fps: SEED_FPS as i32,
            refresh_every: refresh_every.max(1),
        }
    }

    /// Creates a clock whose previous frame happened at `start_ms`.
    pub fn starting_at(start_ms: f64, refresh_every: u64) -> Self {
        let mut clock = Self::new(refresh_every);
        if start_ms.is_finite() {
            clock.last_timestamp = Some(start_ms);
        }
        clock
    }

    /// Advances the clock to `now_ms` and returns the smoothed FPS.
    ///
    /// 1. If a previous timestamp exists and `delta = now - last > 0`,
    ///    blends `1000 / delta` into the average with weight 0.1.
    ///    `delta <= 0` (duplicate or backwards timestamps) leaves the
    ///    average untouched.
    /// 2. Stores `now_ms` as the previous timestamp.
    /// 3. Every `refresh_every`-th call, starting with the first, rounds
    ///    the average into the displayed value.
    ///
    /// Non-finite timestamps are ignored completely.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            log::warn!("ignoring non-finite frame timestamp {now_ms}");
            return self.smoothed_fps;
        }

        if let Some(last) = self.last_timestamp {
            let delta = now_ms - last;
            if delta > 0.0 {
                let instant = 1000.0 / delta;
                self.smoothed_fps =
                    self.smoothed_fps * (1.0 - SAMPLE_WEIGHT) + instant * SAMPLE_WEIGHT;
            }
        }
        self.last_timestamp = Some(now_ms);

        if self.frame_counter % self.refresh_every == 0 {
            self.displayed_fps = self.smoothed_fps.round() as i32;
        }
        self.frame_counter += 1;

        self.smoothed_fps
    }

    pub fn smoothed_fps(&self) -> f64 {
        self.smoothed_fps
    }

    pub fn displayed_fps(&self) -> i32 {
        self.displayed_fps
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_only_records_timestamp() {
        let mut clock = FrameClock::new(10);
        let fps = clock.tick(5_000.0);

        assert_eq!(fps, SEED_FPS);
        assert_eq!(clock.last_timestamp(), Some(5_000.0));
        assert_eq!(clock.frame_counter(), 1);
    }

    #[test]
    fn single_sample_is_blended_with_weight_point_one() {
        let mut clock = FrameClock::starting_at(0.0, 10);
        // 20 ms -> 50 fps instantaneous; 60 * 0.9 + 50 * 0.1 = 59.
        let fps = clock.tick(20.0);
        assert!((fps - 59.0).abs() < 1e-9);
    }

    #[test]
    fn constant_cadence_converges_to_sixty() {
        let mut clock = FrameClock::starting_at(0.0, 10);
        let mut now = 0.0;
        for _ in 0..50 {
            now += 16.667;
            clock.tick(now);
        }
        assert!((clock.smoothed_fps() - 60.0).abs() < 1.0);
    }

    #[test]
    fn converges_from_seed_toward_a_different_rate() {
        let mut clock = FrameClock::starting_at(0.0, 10);
        let mut now = 0.0;
        for _ in 0..100 {
            now += 33.333;
            clock.tick(now);
        }
        assert!((clock.smoothed_fps() - 30.0).abs() < 1.0);
    }

    #[test]
    fn non_positive_delta_leaves_average_unchanged() {
        let mut clock = FrameClock::starting_at(100.0, 10);
        clock.tick(120.0);
        let before = clock.smoothed_fps();

        // Duplicate timestamp.
        assert_eq!(clock.tick(120.0), before);
        // Clock went backwards; timestamp is still recorded.
        assert_eq!(clock.tick(90.0), before);
        assert_eq!(clock.last_timestamp(), Some(90.0));
    }

    #[test]
    fn non_finite_timestamp_is_ignored() {
        let mut clock = FrameClock::starting_at(0.0, 10);
        clock.tick(16.0);
        let counter = clock.frame_counter();

        clock.tick(f64::NAN);

        assert_eq!(clock.last_timestamp(), Some(16.0));
        assert_eq!(clock.frame_counter(), counter);
        assert!(clock.smoothed_fps() > 0.0);
    }

    #[test]
    fn displayed_fps_refreshes_on_cadence() {
        let mut clock = FrameClock::starting_at(0.0, 10);

        // Tick 0 refreshes (still the seed value).
        clock.tick(10.0);
        let first = clock.displayed_fps();
        assert_eq!(first, clock.smoothed_fps().round() as i32);

        // Ticks 1..=9 do not refresh even though the average moves.
        let mut now = 10.0;
        for _ in 1..10 {
            now += 10.0;
            clock.tick(now);
        }
        assert_eq!(clock.displayed_fps(), first);
        assert_ne!(clock.smoothed_fps().round() as i32, first);

        // Tick 10 refreshes.
        now += 10.0;
        clock.tick(now);
        assert_eq!(clock.displayed_fps(), clock.smoothed_fps().round() as i32);
    }

    #[test]
    fn zero_refresh_interval_is_clamped() {
        let mut clock = FrameClock::new(0);
        clock.tick(0.0);
        clock.tick(10.0);
        assert_eq!(clock.displayed_fps(), clock.smoothed_fps().round() as i32);
    }
}
