use std::{fs, path::Path};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How connectivity lines are computed each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectivityMode {
    /// Prefix cap, squared-distance test and an output budget.
    Budgeted,
    /// Every pair, true-distance test, no output cap. Legacy mode only.
    Unbounded,
}

/// Every tunable constant of the simulation.
///
/// Missing fields fall back to [`SimConfig::default`] when deserializing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Width (`x`) and height (`y`) of the simulation rectangle.
    pub bounds: DVec2,

    pub initial_count: usize,
    pub max_population: usize,
    pub spawn_burst: u32,
    /// Half-width of the uniform jitter applied to spawned positions.
    pub spawn_jitter: f64,
    /// Half-width of the uniform range for initial velocity components.
    pub initial_speed: f64,
    /// Half-width of the uniform range for spawned velocity components.
    pub spawn_speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,

    pub connect_threshold: f64,
    pub max_considered: usize,
    pub max_connections: usize,
    pub connectivity: ConnectivityMode,

    pub gravity: f64,
    /// Velocity multiplier applied every frame; `None` disables damping.
    pub damping: Option<f64>,
    pub influence_radius: f64,
    pub attraction_strength: f64,
    pub hue_step: f64,

    /// The displayed FPS counter is refreshed every this many frames.
    pub fps_refresh_every: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bounds: DVec2::new(800.0, 600.0),
            initial_count: 100,
            max_population: 300,
            spawn_burst: 5,
            spawn_jitter: 10.0,
            initial_speed: 1.5,
            spawn_speed: 3.0,
            radius_min: 2.0,
            radius_max: 5.0,
            connect_threshold: 100.0,
            max_considered: 150,
            max_connections: 200,
            connectivity: ConnectivityMode::Budgeted,
            gravity: 0.05,
            damping: Some(0.99),
            influence_radius: 200.0,
            attraction_strength: 0.5,
            hue_step: 0.5,
            fps_refresh_every: 10,
        }
    }
}

impl SimConfig {
    /// The reduced-feature legacy variant: no damping and unbounded
    /// true-distance connectivity.
    pub fn legacy() -> Self {
        Self {
            damping: None,
            connectivity: ConnectivityMode::Unbounded,
            ..Self::default()
        }
    }

    /// Parses a JSON document and validates the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that every field is usable by the simulation.
    ///
    /// ### Returns
    /// - `Ok(())` if the configuration is consistent.
    /// - `Err(ConfigError::Invalid)` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bounds.is_finite() && self.bounds.x > 0.0 && self.bounds.y > 0.0) {
            return Err(ConfigError::invalid(
                "bounds",
                format!("must be finite and positive, got {}", self.bounds),
            ));
        }
        if self.max_population == 0 {
            return Err(ConfigError::invalid("max_population", "must be at least 1"));
        }
        if self.initial_count > self.max_population {
            return Err(ConfigError::invalid(
                "initial_count",
                format!(
                    "{} exceeds max_population {}",
                    self.initial_count, self.max_population
                ),
            ));
        }
        if !(self.radius_min.is_finite() && self.radius_min > 0.0) {
            return Err(ConfigError::invalid("radius_min", "must be finite and positive"));
        }
        if !(self.radius_max.is_finite() && self.radius_max >= self.radius_min) {
            return Err(ConfigError::invalid(
                "radius_max",
                "must be finite and not below radius_min",
            ));
        }

        let non_negative = [
            ("spawn_jitter", self.spawn_jitter),
            ("initial_speed", self.initial_speed),
            ("spawn_speed", self.spawn_speed),
            ("connect_threshold", self.connect_threshold),
            ("influence_radius", self.influence_radius),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }

        for (field, value) in [
            ("gravity", self.gravity),
            ("attraction_strength", self.attraction_strength),
            ("hue_step", self.hue_step),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        if let Some(factor) = self.damping
            && !(factor > 0.0 && factor <= 1.0)
        {
            return Err(ConfigError::invalid(
                "damping",
                format!("must lie in (0, 1], got {factor}"),
            ));
        }
        if self.fps_refresh_every == 0 {
            return Err(ConfigError::invalid("fps_refresh_every", "must be at least 1"));
        }
        Ok(())
    }
}
