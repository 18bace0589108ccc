//! Core state types for the particle simulation.
//!
//! - `Particle`: one oriented, self-propelled particle (`NVec2` based)
//! - `System`: the particle array plus simulated time and step counter
//! - `SpawnSettings` / `initialize`: seeded uniform initial conditions
//!
//! The particle count is fixed once the system is built; steps replace
//! particle states but never add or remove particles.

use std::f32::consts::TAU;

use nalgebra::Vector2;
use rand::Rng;

use crate::error::{Error, Result};

pub type NVec2 = Vector2<f32>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: NVec2,
    pub velocity: NVec2,
    pub orientation: f32, // heading in radians, never re-wrapped
    pub angular_velocity: f32,
    pub force: NVec2, // accumulator, recomputed every step
    pub torque: f32,  // accumulator, recomputed every step
    pub kind: i32,    // category, presentation only
}

impl Particle {
    /// Particle at rest apart from the given position, velocity and heading
    pub fn new(position: NVec2, velocity: NVec2, orientation: f32, kind: i32) -> Self {
        Self {
            position,
            velocity,
            orientation,
            angular_velocity: 0.0,
            force: NVec2::zeros(),
            torque: 0.0,
            kind,
        }
    }

    /// True if every kinematic and accumulator component is finite
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
            && self.velocity.iter().all(|c| c.is_finite())
            && self.force.iter().all(|c| c.is_finite())
            && self.orientation.is_finite()
            && self.angular_velocity.is_finite()
            && self.torque.is_finite()
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub particles: Vec<Particle>, // fixed-size collection
    pub t: f64, // simulated time
    pub steps: u64, // completed steps
}

impl System {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles, t: 0.0, steps: 0 }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total kinetic energy with unit masses: Σ ½|v|²
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .map(|p| 0.5 * p.velocity.norm_squared() as f64)
            .sum()
    }

    /// Mean particle speed, 0 for an empty system
    pub fn mean_speed(&self) -> f32 {
        if self.particles.is_empty() {
            return 0.0;
        }
        let total: f32 = self.particles.iter().map(|p| p.velocity.norm()).sum();
        total / self.particles.len() as f32
    }

    /// Mean particle position, origin for an empty system
    pub fn centroid(&self) -> NVec2 {
        if self.particles.is_empty() {
            return NVec2::zeros();
        }
        let sum = self
            .particles
            .iter()
            .fold(NVec2::zeros(), |acc, p| acc + p.position);
        sum / self.particles.len() as f32
    }

    /// Number of particles currently outside the centred `width × height` world
    pub fn count_outside(&self, width: f32, height: f32) -> usize {
        let (hw, hh) = (width / 2.0, height / 2.0);
        self.particles
            .iter()
            .filter(|p| p.position.x.abs() > hw || p.position.y.abs() > hh)
            .count()
    }
}

/// Initial condition ranges for `initialize`
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSettings {
    pub count: i64, // negative counts are rejected
    pub range_x: f32, // x drawn from [-range_x, range_x]
    pub range_y: f32, // y drawn from [-range_y, range_y]
    pub velocity_range: f32, // each velocity component from [-v, v]
    pub orientation_range: f32, // heading drawn from [0, range)
    pub type_count: i32, // kinds drawn from [0, type_count)
    pub fixed_type: Option<i32>, // overrides the random kind when set
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            count: 100,
            range_x: 120.0,
            range_y: 67.0,
            velocity_range: 2.0,
            orientation_range: TAU,
            type_count: 16,
            fixed_type: Some(2),
        }
    }
}

impl SpawnSettings {
    pub fn validate(&self) -> Result<usize> {
        let count = usize::try_from(self.count)
            .map_err(|_| Error::InvalidConfig(format!("particle count must be >= 0, got {}", self.count)))?;

        for (name, value) in [
            ("range_x", self.range_x),
            ("range_y", self.range_y),
            ("velocity_range", self.velocity_range),
        ] {
            // the sampled span [-v, v] must itself be finite
            if !value.is_finite() || value < 0.0 || !(2.0 * value).is_finite() {
                return Err(Error::InvalidConfig(format!("{name} must be >= 0 with a finite span")));
            }
        }
        if !self.orientation_range.is_finite() || self.orientation_range <= 0.0 {
            return Err(Error::InvalidConfig("orientation_range must be finite and > 0".into()));
        }
        if self.type_count < 1 {
            return Err(Error::InvalidConfig("type_count must be >= 1".into()));
        }
        Ok(count)
    }
}

/// Fill a fresh particle array with independent uniform draws.
///
/// Per particle the draws are, in order: x, y, vx, vy, heading, then the
/// kind (skipped when `fixed_type` is set). Angular velocity and the
/// accumulators start at zero.
///
/// Errors with `Error::InvalidConfig` for a negative count or bad ranges.
pub fn initialize<R: Rng>(spawn: &SpawnSettings, rng: &mut R) -> Result<Vec<Particle>> {
    let count = spawn.validate()?;

    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        let position = NVec2::new(
            rng.random_range(-spawn.range_x..=spawn.range_x),
            rng.random_range(-spawn.range_y..=spawn.range_y),
        );
        let velocity = NVec2::new(
            rng.random_range(-spawn.velocity_range..=spawn.velocity_range),
            rng.random_range(-spawn.velocity_range..=spawn.velocity_range),
        );
        let orientation = rng.random_range(0.0..spawn.orientation_range);
        let kind = match spawn.fixed_type {
            Some(kind) => kind,
            None => rng.random_range(0..spawn.type_count),
        };
        particles.push(Particle::new(position, velocity, orientation, kind));
    }

    Ok(particles)
}
