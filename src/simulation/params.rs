//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds every tunable the step reads:
//! - world extent and containment,
//! - time step and interaction cutoff,
//! - polar law, mutual viscosity and solid contact constants,
//! - speed floor, caps and dissipation.
//!
//! It is read at every step, so a driver may change values between steps.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub world_width: f32, // containment box is [-W/2, W/2]
    pub world_height: f32, // containment box is [-H/2, H/2]
    pub dt: f32, // step size
    pub interaction_radius: f32, // strict pair cutoff
    pub dot_radius: f32, // hard-contact size; repulsion engages below 4x
    pub containing_force: f32, // restoring force per exceeded axis
    pub brownian_speed: f32, // speeds at or below this get boosted
    pub brownian_boost: f32, // boost gain, force += gain * v / dt
    pub void_viscosity: f32, // per-step velocity decay factor
    pub angular_damping: f32, // per-step angular velocity decay factor
    pub force_strength: f32, // polar force scale
    pub div_angle: f32, // half-width of the attractive cone
    pub mutual_viscosity: f32, // pair velocity averaging gain
    pub centerize: bool, // soft pull toward the origin
    pub centerize_rate: f32,
    pub max_velocity: f32,
    pub max_angular_velocity: f32,
    pub min_separation_ratio: f32, // distance floor as a fraction of dot_radius
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            world_width: 480.0,
            world_height: 270.0,
            dt: 0.1,
            interaction_radius: 8.0,
            dot_radius: 2.0,
            containing_force: 1.0,
            brownian_speed: 1.0,
            brownian_boost: 0.1,
            void_viscosity: 0.999,
            angular_damping: 0.995,
            force_strength: 1.0,
            div_angle: 0.3,
            mutual_viscosity: 0.8,
            centerize: false,
            centerize_rate: 0.001,
            max_velocity: 10.0,
            max_angular_velocity: 10.0,
            min_separation_ratio: 0.1,
        }
    }
}

impl Parameters {
    /// Distance floor used in place of `|r|` in the singular terms
    #[inline]
    pub fn min_separation(&self) -> f32 {
        self.min_separation_ratio * self.dot_radius
    }

    /// Reject values the step cannot work with.
    ///
    /// Errors:
    /// - `Error::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("dt", self.dt),
            ("interaction_radius", self.interaction_radius),
            ("dot_radius", self.dot_radius),
            ("max_velocity", self.max_velocity),
            ("max_angular_velocity", self.max_angular_velocity),
            ("min_separation_ratio", self.min_separation_ratio),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!("{name} must be finite and > 0, got {value}")));
            }
        }

        let unit = [
            ("void_viscosity", self.void_viscosity),
            ("angular_damping", self.angular_damping),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!("{name} must be in [0, 1], got {value}")));
            }
        }

        let finite = [
            ("containing_force", self.containing_force),
            ("brownian_speed", self.brownian_speed),
            ("brownian_boost", self.brownian_boost),
            ("force_strength", self.force_strength),
            ("div_angle", self.div_angle),
            ("mutual_viscosity", self.mutual_viscosity),
            ("centerize_rate", self.centerize_rate),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!("{name} must be finite")));
            }
        }

        Ok(())
    }
}
