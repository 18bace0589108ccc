//! Force / torque contributors for the particle engine
//!
//! Defines the `ForceTerm` trait and its container `ForceSet`, plus the
//! three terms the vesicle model uses:
//! - `PolarInteraction`: the O(n²) pairwise pass (serial or rayon)
//! - `Containment`: constant restoring force outside the world box
//! - `BrownianBoost`: speed floor kick for slow particles
//!
//! Every term reads the settled system immutably and adds into a separate
//! load buffer, so no particle sees a partially updated neighbour.

use rayon::prelude::*;

use crate::simulation::interaction::{pair_load, Load};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, System};

/// Collection of force terms
/// Each term implements [`ForceTerm`] and their contributions are summed
/// into a single load per particle
#[derive(Default)]
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total loads for all particles in `sys`
    /// - `out[i]` is reset, then set to the sum of contributions from all terms
    pub fn accumulate_loads(&self, params: &Parameters, sys: &System, out: &mut [Load]) {
        for load in out.iter_mut() {
            *load = Load::zero();
        }
        for term in &self.terms {
            term.accumulate(params, sys, out);
        }
    }
}

/// Trait for force and torque sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each particle
pub trait ForceTerm {
    fn accumulate(&self, params: &Parameters, sys: &System, out: &mut [Load]);
}

/// Pairwise polar law, mutual viscosity and solid repulsion
///
/// Each particle's load is summed over every other particle in index
/// order, skipping itself. With `parallel` set, rayon hands each task
/// exclusive ownership of one load slot; the per-slot summation order is
/// unchanged so both modes give identical results.
pub struct PolarInteraction {
    pub parallel: bool,
}

impl PolarInteraction {
    fn load_on(i: usize, params: &Parameters, sys: &System) -> Load {
        let p = &sys.particles[i];
        let mut total = Load::zero();
        for (j, other) in sys.particles.iter().enumerate() {
            if j == i {
                continue;
            }
            if let Some(load) = pair_load(params, p, other) {
                total += load;
            }
        }
        total
    }
}

impl ForceTerm for PolarInteraction {
    fn accumulate(&self, params: &Parameters, sys: &System, out: &mut [Load]) {
        if sys.particles.len() < 2 { // nothing to pair
            return;
        }

        if self.parallel {
            out.par_iter_mut().enumerate().for_each(|(i, slot)| {
                *slot += Self::load_on(i, params, sys);
            });
        } else {
            for (i, slot) in out.iter_mut().enumerate() {
                *slot += Self::load_on(i, params, sys);
            }
        }
    }
}

/// Constant push back toward the interior, per exceeded axis
pub struct Containment;

impl ForceTerm for Containment {
    fn accumulate(&self, params: &Parameters, sys: &System, out: &mut [Load]) {
        let half_w = params.world_width / 2.0;
        let half_h = params.world_height / 2.0;
        let c = params.containing_force;

        for (p, load) in sys.particles.iter().zip(out.iter_mut()) {
            if p.position.x > half_w { load.force += NVec2::new(-c, 0.0); }
            if p.position.x < -half_w { load.force += NVec2::new(c, 0.0); }
            if p.position.y > half_h { load.force += NVec2::new(0.0, -c); }
            if p.position.y < -half_h { load.force += NVec2::new(0.0, c); }
        }
    }
}

/// Speed floor: particles at or below `brownian_speed` are kicked along
/// their own velocity by `brownian_boost · v / dt`
pub struct BrownianBoost;

impl ForceTerm for BrownianBoost {
    fn accumulate(&self, params: &Parameters, sys: &System, out: &mut [Load]) {
        for (p, load) in sys.particles.iter().zip(out.iter_mut()) {
            if p.velocity.norm() <= params.brownian_speed {
                load.force += p.velocity * (params.brownian_boost / params.dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::Particle;

    fn still(x: f32, y: f32) -> Particle {
        Particle::new(NVec2::new(x, y), NVec2::zeros(), 0.0, 0)
    }

    #[test]
    fn accumulate_resets_stale_loads() {
        let sys = System::new(vec![still(0.0, 0.0)]);
        let set = ForceSet::new().with(Containment);
        let mut out = vec![Load { force: NVec2::new(5.0, 5.0), torque: 3.0 }];

        set.accumulate_loads(&Parameters::default(), &sys, &mut out);
        assert_eq!(out[0], Load::zero());
    }

    #[test]
    fn containment_pushes_on_each_exceeded_axis() {
        let params = Parameters::default();
        let sys = System::new(vec![still(300.0, -200.0), still(-300.0, 0.0)]);
        let mut out = vec![Load::zero(); 2];

        Containment.accumulate(&params, &sys, &mut out);
        assert_eq!(out[0].force, NVec2::new(-1.0, 1.0));
        assert_eq!(out[1].force, NVec2::new(1.0, 0.0));
    }

    #[test]
    fn brownian_boost_only_below_threshold() {
        let params = Parameters::default();
        let mut slow = still(0.0, 0.0);
        slow.velocity = NVec2::new(0.5, 0.0);
        let mut fast = still(0.0, 0.0);
        fast.velocity = NVec2::new(2.0, 0.0);
        let sys = System::new(vec![slow, fast]);
        let mut out = vec![Load::zero(); 2];

        BrownianBoost.accumulate(&params, &sys, &mut out);
        // 0.1 · 0.5 / 0.1
        assert!((out[0].force.x - 0.5).abs() < 1e-6);
        assert_eq!(out[1].force, NVec2::zeros());
    }

    #[test]
    fn pair_pass_skips_self_and_far_particles() {
        let params = Parameters::default();
        let sys = System::new(vec![still(0.0, 0.0), still(100.0, 0.0)]);
        let mut out = vec![Load::zero(); 2];

        PolarInteraction { parallel: false }.accumulate(&params, &sys, &mut out);
        assert_eq!(out, vec![Load::zero(); 2]);
    }
}
