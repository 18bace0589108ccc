//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – driver options (steps per frame, parallel pair pass)
//! - [`ParametersConfig`] – world, time step and interaction constants
//! - [`SpawnConfig`]      – initial particle distribution and seed
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field is optional; missing fields and sections take the defaults
//! of the reference vesicle model.
//!
//! # YAML format
//! ```yaml
//! engine:
//!   steps_per_frame: 10
//!   parallel: false
//!
//! parameters:
//!   world_width: 480.0
//!   world_height: 270.0
//!   dt: 0.1
//!   interaction_radius: 8.0
//!   div_angle: 0.3
//!   mutual_viscosity: 0.8
//!
//! spawn:
//!   count: 100
//!   range_x: 120.0
//!   range_y: 67.0
//!   fixed_type: 2           # omit for random kinds
//!   seed: 42                # omit for a fresh random seed
//! ```
//!
//! The engine then maps this configuration into its runtime `Scenario`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::SpawnSettings;

/// Driver configuration
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub steps_per_frame: u32, // Steps integrated per presentation frame
    pub parallel: bool, // `true` - pairwise pass on the rayon pool
}

impl Default for EngineConfig {
    fn default() -> Self {
        let e = Engine::default();
        Self {
            steps_per_frame: e.steps_per_frame,
            parallel: e.parallel,
        }
    }
}

impl From<EngineConfig> for Engine {
    fn from(cfg: EngineConfig) -> Self {
        Self {
            steps_per_frame: cfg.steps_per_frame,
            parallel: cfg.parallel,
        }
    }
}

/// World, time step and interaction constants
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub dt: f32,
    pub interaction_radius: f32,
    pub dot_radius: f32,
    pub containing_force: f32,
    pub brownian_speed: f32,
    pub brownian_boost: f32,
    pub void_viscosity: f32,
    pub angular_damping: f32, // 0.995 reference model, 0.999 simple model
    pub force_strength: f32,
    pub div_angle: f32, // 0 disables the attractive cone
    pub mutual_viscosity: f32, // 0 disables pair velocity averaging
    pub centerize: bool,
    pub centerize_rate: f32,
    pub max_velocity: f32,
    pub max_angular_velocity: f32,
    pub min_separation_ratio: f32,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            world_width: p.world_width,
            world_height: p.world_height,
            dt: p.dt,
            interaction_radius: p.interaction_radius,
            dot_radius: p.dot_radius,
            containing_force: p.containing_force,
            brownian_speed: p.brownian_speed,
            brownian_boost: p.brownian_boost,
            void_viscosity: p.void_viscosity,
            angular_damping: p.angular_damping,
            force_strength: p.force_strength,
            div_angle: p.div_angle,
            mutual_viscosity: p.mutual_viscosity,
            centerize: p.centerize,
            centerize_rate: p.centerize_rate,
            max_velocity: p.max_velocity,
            max_angular_velocity: p.max_angular_velocity,
            min_separation_ratio: p.min_separation_ratio,
        }
    }
}

impl From<ParametersConfig> for Parameters {
    fn from(cfg: ParametersConfig) -> Self {
        Self {
            world_width: cfg.world_width,
            world_height: cfg.world_height,
            dt: cfg.dt,
            interaction_radius: cfg.interaction_radius,
            dot_radius: cfg.dot_radius,
            containing_force: cfg.containing_force,
            brownian_speed: cfg.brownian_speed,
            brownian_boost: cfg.brownian_boost,
            void_viscosity: cfg.void_viscosity,
            angular_damping: cfg.angular_damping,
            force_strength: cfg.force_strength,
            div_angle: cfg.div_angle,
            mutual_viscosity: cfg.mutual_viscosity,
            centerize: cfg.centerize,
            centerize_rate: cfg.centerize_rate,
            max_velocity: cfg.max_velocity,
            max_angular_velocity: cfg.max_angular_velocity,
            min_separation_ratio: cfg.min_separation_ratio,
        }
    }
}

/// Initial particle distribution
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnConfig {
    pub count: i64, // Number of particles; negative values are rejected when building
    pub range_x: f32,
    pub range_y: f32,
    pub velocity_range: f32,
    pub orientation_range: f32,
    pub type_count: i32,
    pub fixed_type: Option<i32>, // Same kind for every particle when set
    pub seed: Option<u64>, // Deterministic seed to make runs reproducible
}

impl Default for SpawnConfig {
    fn default() -> Self {
        let s = SpawnSettings::default();
        Self {
            count: s.count,
            range_x: s.range_x,
            range_y: s.range_y,
            velocity_range: s.velocity_range,
            orientation_range: s.orientation_range,
            type_count: s.type_count,
            fixed_type: s.fixed_type,
            seed: Some(42),
        }
    }
}

impl SpawnConfig {
    pub fn settings(&self) -> SpawnSettings {
        SpawnSettings {
            count: self.count,
            range_x: self.range_x,
            range_y: self.range_y,
            velocity_range: self.velocity_range,
            orientation_range: self.orientation_range,
            type_count: self.type_count,
            fixed_type: self.fixed_type,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Driver configuration
    pub parameters: ParametersConfig, // Physical and numerical constants
    pub spawn: SpawnConfig, // Initial state of the system
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
