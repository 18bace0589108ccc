pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{Error, Result};

pub use simulation::states::{initialize, NVec2, Particle, SpawnSettings, System};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::interaction::{pair_load, Load};
pub use simulation::forces::{BrownianBoost, Containment, ForceSet, ForceTerm, PolarInteraction};
pub use simulation::integrator::euler_integrator;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, ScenarioConfig, SpawnConfig};

pub use visualization::palette::{tail_segment, type_color, TAIL_LENGTH};

pub use benchmark::benchmark::bench_step;
