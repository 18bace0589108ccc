//! Pairwise interaction law between two oriented particles
//!
//! For an ordered pair `(p, other)` with separation `r = other.x - p.x`:
//!
//! - `θ = wrap(other.heading - p.heading)`, `φ = wrap(angle(r) - p.heading)`
//! - `ψ = 2φ - θ + π` is the pair invariant; `rot = sin ψ`
//! - the polar force is `r` rotated by `rot`, scaled by
//!   `(10 rot² + 1) · strength · aniso / |r|²`, where `aniso` flips to `-1`
//!   inside the cone `ψ² + θ² < 2 div²`
//! - the torque has unit magnitude decaying as `1 / |r|`, its sign picked by
//!   which side of the pair's mean heading `other` sits on
//! - mutual viscosity pulls `p` toward the pair's mean velocity
//! - solid repulsion adds `-r (2 dot / |r|)^9` below `4 dot`
//!
//! Only pairs strictly inside `interaction_radius` interact.

use std::f32::consts::{FRAC_PI_2, PI};
use std::ops::AddAssign;

use super::geometry::{angle_of, middle_angle, rotate, unit_vector, wrap_angle};
use super::params::Parameters;
use super::states::{NVec2, Particle};

/// Force and torque acting on one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Load {
    pub force: NVec2,
    pub torque: f32,
}

impl Load {
    pub fn zero() -> Self {
        Self { force: NVec2::zeros(), torque: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.force.iter().all(|c| c.is_finite()) && self.torque.is_finite()
    }
}

impl Default for Load {
    fn default() -> Self {
        Self::zero()
    }
}

impl AddAssign for Load {
    fn add_assign(&mut self, rhs: Self) {
        self.force += rhs.force;
        self.torque += rhs.torque;
    }
}

/// Full contribution of `other` to `p`, or `None` outside the cutoff.
///
/// Sums the polar force and torque, mutual viscosity and solid repulsion.
pub fn pair_load(params: &Parameters, p: &Particle, other: &Particle) -> Option<Load> {
    let r = other.position - p.position;
    let r_norm = r.norm();
    if !(r_norm < params.interaction_radius) {
        return None;
    }

    let mut load = polar_force_torque(params, p, other, &r, r_norm);
    load.force += mutual_viscosity(params, p, other);
    load.force += solid_repulsion(params, &r, r_norm);
    Some(load)
}

/// Orientation dependent force and torque on `p` due to `other`
pub fn polar_force_torque(params: &Parameters, p: &Particle, other: &Particle, r: &NVec2, r_norm: f32) -> Load {
    let theta = wrap_angle(other.orientation - p.orientation);
    let phi = wrap_angle(angle_of(r) - p.orientation);

    // ψ is not wrapped; the cone is centred on ψ = 0 only
    let psi = 2.0 * phi - theta + PI;
    let aniso = if psi * psi + theta * theta < 2.0 * params.div_angle * params.div_angle {
        -1.0
    } else {
        1.0
    };
    let rot = psi.sin();

    let dist = r_norm.max(params.min_separation());
    let distance_factor = 1.0 / (dist * dist);

    let force = rotate(r, rot) * ((10.0 * rot * rot + 1.0) * params.force_strength * aniso * distance_factor);
    let torque = torque_direction(p.orientation, other.orientation, r, theta, params.div_angle) / dist;

    Load { force, torque }
}

/// Sign of the torque on a particle heading `orientation` from a partner
/// heading `other_orientation` at separation `r`, with `theta` their wrapped
/// relative heading.
///
/// The partner is "left" when it lies on the positive side of the pair's
/// mean heading turned by `-π/2`. The sign is `+1` for a left partner with
/// `wrap((-θ - div)/2) < 0` or a right partner with `wrap((-θ + div)/2) < 0`,
/// `-1` otherwise.
pub fn torque_direction(orientation: f32, other_orientation: f32, r: &NVec2, theta: f32, div_angle: f32) -> f32 {
    let mid = middle_angle(orientation, other_orientation);
    let is_left = r.dot(&rotate(&unit_vector(mid), -FRAC_PI_2)) > 0.0;

    let left_offset = wrap_angle((-theta - div_angle) / 2.0);
    let right_offset = wrap_angle((-theta + div_angle) / 2.0);

    if (is_left && left_offset < 0.0) || (!is_left && right_offset < 0.0) {
        1.0
    } else {
        -1.0
    }
}

/// Drag pulling `p` toward the mean velocity of the pair
pub fn mutual_viscosity(params: &Parameters, p: &Particle, other: &Particle) -> NVec2 {
    ((p.velocity + other.velocity) / 2.0 - p.velocity) * params.mutual_viscosity
}

/// Steep short range penalty, zero at or beyond `4 dot_radius`
pub fn solid_repulsion(params: &Parameters, r: &NVec2, r_norm: f32) -> NVec2 {
    if r_norm < 4.0 * params.dot_radius {
        let dist = r_norm.max(params.min_separation());
        -r * (2.0 * params.dot_radius / dist).powi(9)
    } else {
        NVec2::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, orientation: f32) -> Particle {
        Particle::new(NVec2::new(x, y), NVec2::zeros(), orientation, 0)
    }

    #[test]
    fn facing_pair_pushes_apart_along_axis() {
        // θ = π, φ = 0 → ψ = 0, rot = 0, outside the cone
        let params = Parameters { interaction_radius: 20.0, ..Parameters::default() };
        let p0 = at(-5.0, 0.0, 0.0);
        let p1 = at(5.0, 0.0, PI);

        let load = pair_load(&params, &p0, &p1).expect("inside cutoff");
        assert!((load.force.x - 0.1).abs() < 1e-6);
        assert!(load.force.y.abs() < 1e-6);
        assert!((load.torque - 0.1).abs() < 1e-6);
    }

    #[test]
    fn aligned_cone_flips_force() {
        // partner straight below with the same heading: φ = -π/2, θ = 0 → ψ = 0
        let params = Parameters { interaction_radius: 20.0, ..Parameters::default() };
        let p = at(0.0, 0.0, 0.0);
        let other = at(0.0, -5.0, 0.0);

        let load = polar_force_torque(&params, &p, &other, &(other.position - p.position), 5.0);
        // r = (0, -5), rot = 0, aniso = -1 → force points back toward +y
        assert!(load.force.x.abs() < 1e-6);
        assert!((load.force.y - 0.2).abs() < 1e-5);
    }

    fn torque_from(other: &Particle) -> f32 {
        let params = Parameters::default();
        let p = at(0.0, 0.0, 0.0);
        let r = other.position - p.position;
        polar_force_torque(&params, &p, other, &r, r.norm()).torque
    }

    #[test]
    fn torque_sign_depends_on_side_inside_div_window() {
        // θ = 0.1 lies in (-div, div]: left and right offsets disagree
        assert!((torque_from(&at(0.0, 5.0, 0.1)) + 0.2).abs() < 1e-6);
        assert!((torque_from(&at(0.0, -5.0, 0.1)) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn torque_sign_ignores_side_outside_div_window() {
        // θ = 1.0 > div: both offsets negative
        assert!((torque_from(&at(0.0, 5.0, 1.0)) - 0.2).abs() < 1e-6);
        assert!((torque_from(&at(0.0, -5.0, 1.0)) - 0.2).abs() < 1e-6);
        // θ = -1.0 < -div: both offsets positive
        assert!((torque_from(&at(0.0, 5.0, -1.0)) + 0.2).abs() < 1e-6);
        assert!((torque_from(&at(0.0, -5.0, -1.0)) + 0.2).abs() < 1e-6);
    }

    #[test]
    fn repulsion_only_below_contact_band() {
        let params = Parameters::default();
        let far = NVec2::new(8.0, 0.0);
        assert_eq!(solid_repulsion(&params, &far, 8.0), NVec2::zeros());

        let near = NVec2::new(4.0, 0.0);
        let f = solid_repulsion(&params, &near, 4.0);
        // (2·2/4)^9 = 1 → -r
        assert!((f.x + 4.0).abs() < 1e-5);
    }

    #[test]
    fn coincident_particles_stay_finite() {
        let params = Parameters::default();
        let p = at(1.0, 1.0, 0.3);
        let q = at(1.0, 1.0, 2.0);
        let load = pair_load(&params, &p, &q).expect("zero separation is inside cutoff");
        assert!(load.is_finite());
        assert_eq!(load.force, NVec2::zeros());
    }

    #[test]
    fn mutual_viscosity_is_half_the_velocity_gap() {
        let params = Parameters { mutual_viscosity: 2.0, ..Parameters::default() };
        let mut p = at(0.0, 0.0, 0.0);
        let mut q = at(1.0, 0.0, 0.0);
        p.velocity = NVec2::new(1.0, 0.0);
        q.velocity = NVec2::new(3.0, 2.0);
        assert_eq!(mutual_viscosity(&params, &p, &q), NVec2::new(2.0, 2.0));
    }
}
