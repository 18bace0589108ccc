//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with particles at t = 0)
//! - active force set (`ForceSet`)
//!
//! A driver owns the scenario, calls `run_frame` repeatedly and reads
//! `system.particles` for display. `parameters` may be edited between
//! steps; engine settings change through `set_engine`.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::ScenarioConfig;
use crate::error::Result;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{BrownianBoost, Containment, ForceSet, PolarInteraction};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{initialize, System};

pub struct Scenario {
    engine: Engine, // replaced only through `set_engine`
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
    pub seed: u64, // seed the particles were drawn with
}

impl Scenario {
    /// Validate `cfg`, draw the initial particles and register the force terms.
    ///
    /// Errors with `Error::InvalidConfig` for any rejected setting.
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let engine = Engine::from(cfg.engine);
        engine.validate()?;

        let parameters = Parameters::from(cfg.parameters);
        parameters.validate()?;

        // Without a seed, pick one and report it so the run can be replayed
        let seed = match cfg.spawn.seed {
            Some(s) => s,
            None => {
                let s = rand::rng().random();
                info!("no seed configured, drawing particles with seed {s}");
                s
            }
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = initialize(&cfg.spawn.settings(), &mut rng)?;
        let system = System::new(particles);

        let forces = Self::default_forces(&engine);

        debug!(
            "built scenario: {} particles, {} force terms, {} steps/frame, parallel = {}",
            system.len(),
            forces.len(),
            engine.steps_per_frame,
            engine.parallel
        );

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            seed,
        })
    }

    /// Pair pass, containment and speed floor, in that order
    pub fn default_forces(engine: &Engine) -> ForceSet {
        ForceSet::new()
            .with(PolarInteraction { parallel: engine.parallel })
            .with(Containment)
            .with(BrownianBoost)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Swap the engine settings and rebuild the default force set to match.
    ///
    /// Errors with `Error::InvalidConfig` and keeps the current engine if
    /// `engine` fails validation.
    pub fn set_engine(&mut self, engine: Engine) -> Result<()> {
        engine.validate()?;
        self.forces = Self::default_forces(&engine);
        debug!(
            "engine changed: {} steps/frame, parallel = {}",
            engine.steps_per_frame, engine.parallel
        );
        self.engine = engine;
        Ok(())
    }

    /// Advance by a single step
    pub fn step(&mut self) -> Result<()> {
        euler_integrator(&mut self.system, &self.forces, &self.parameters)
    }

    /// Advance by `engine.steps_per_frame` steps, stopping at the first failure
    pub fn run_frame(&mut self) -> Result<()> {
        for _ in 0..self.engine.steps_per_frame {
            self.step()?;
        }
        Ok(())
    }
}
