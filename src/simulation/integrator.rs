//! Fixed-step time integrator for the particle system
//!
//! Explicit Euler with unit mass and unit moment of inertia, driven by a
//! `ForceSet` and `Parameters`. Every step is two passes: all loads from
//! the settled state, then all particles advanced. The advanced state is
//! staged and only committed when every value is finite.

use log::{trace, warn};

use super::forces::ForceSet;
use super::geometry::cap_norm;
use super::interaction::Load;
use super::params::Parameters;
use super::states::{Particle, System};
use crate::error::{Error, Result};

/// Advance the system by one step of `params.dt`.
///
/// Per particle, from its settled load:
/// 1. `v += F dt`, `ω += τ dt`
/// 2. cap `|v|` at `max_velocity`, clamp `ω` to `±max_angular_velocity`
/// 3. optional centering pull `v -= centerize_rate · x`
/// 4. dissipation `v *= void_viscosity`, `ω *= angular_damping`
/// 5. `x += v dt`, `heading += ω dt`
///
/// The loads used are left in each particle's `force` / `torque`.
///
/// Errors:
/// - `Error::InvalidConfig` if `params` fails validation
/// - `Error::NonFinite` if a load or the advanced state is NaN/Inf; `sys`
///   is left untouched in both cases
pub fn euler_integrator(sys: &mut System, forces: &ForceSet, params: &Parameters) -> Result<()> {
    params.validate()?;

    let n = sys.particles.len();
    let dt = params.dt;

    // Phase 1: loads from the settled state
    let mut loads = vec![Load::zero(); n];
    forces.accumulate_loads(params, &*sys, &mut loads);

    // Phase 2: stage the advanced state
    let mut next = Vec::with_capacity(n);
    for (index, (p, load)) in sys.particles.iter().zip(loads.iter()).enumerate() {
        let advanced = advance(p, load, params);
        if !advanced.is_finite() {
            warn!("step {} aborted: particle {} is not finite ({:?})", sys.steps, index, advanced);
            return Err(Error::NonFinite { index, step: sys.steps });
        }
        next.push(advanced);
    }

    sys.particles = next;
    sys.t += dt as f64;
    sys.steps += 1;

    trace!("step {} done, t = {:.3}", sys.steps, sys.t);
    Ok(())
}

/// One particle's state after a step under `load`
fn advance(p: &Particle, load: &Load, params: &Parameters) -> Particle {
    let dt = params.dt;

    let mut velocity = p.velocity + load.force * dt;
    let mut angular_velocity = p.angular_velocity + load.torque * dt;

    velocity = cap_norm(&velocity, params.max_velocity);
    angular_velocity = angular_velocity.clamp(-params.max_angular_velocity, params.max_angular_velocity);

    if params.centerize {
        velocity -= p.position * params.centerize_rate;
    }

    velocity *= params.void_viscosity;
    angular_velocity *= params.angular_damping;

    Particle {
        position: p.position + velocity * dt,
        velocity,
        orientation: p.orientation + angular_velocity * dt,
        angular_velocity,
        force: load.force,
        torque: load.torque,
        kind: p.kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::NVec2;

    #[test]
    fn empty_system_only_advances_time() -> Result<()> {
        let mut sys = System::default();
        let params = Parameters::default();
        euler_integrator(&mut sys, &ForceSet::new(), &params)?;
        assert!(sys.particles.is_empty());
        assert_eq!(sys.steps, 1);
        assert!((sys.t - 0.1).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn caps_apply_before_dissipation() {
        let params = Parameters::default();
        let p = Particle::new(NVec2::zeros(), NVec2::new(9.0, 0.0), 0.0, 0);
        let load = Load { force: NVec2::new(1000.0, 0.0), torque: -1000.0 };

        let next = advance(&p, &load, &params);
        assert!((next.velocity.x - 10.0 * 0.999).abs() < 1e-4);
        assert!((next.angular_velocity + 10.0 * 0.995).abs() < 1e-4);
        assert_eq!(next.force, load.force);
    }

    #[test]
    fn centerize_pulls_toward_origin() {
        let params = Parameters { centerize: true, void_viscosity: 1.0, ..Parameters::default() };
        let p = Particle::new(NVec2::new(100.0, -50.0), NVec2::zeros(), 0.0, 0);
        let next = advance(&p, &Load::zero(), &params);
        assert!((next.velocity.x + 0.1).abs() < 1e-6);
        assert!((next.velocity.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn invalid_params_are_rejected_before_stepping() {
        let mut sys = System::new(vec![Particle::new(NVec2::zeros(), NVec2::zeros(), 0.0, 0)]);
        let params = Parameters { dt: -0.1, ..Parameters::default() };
        assert!(euler_integrator(&mut sys, &ForceSet::new(), &params).is_err());
        assert_eq!(sys.steps, 0);
    }
}
