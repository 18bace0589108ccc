use std::time::Instant;

use crate::error::Result;
use crate::simulation::engine::Engine;
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Particle, System};

/// Deterministic cloud of `n` particles, no rand needed
fn lattice_system(n: usize, params: &Parameters) -> System {
    let half_w = params.world_width / 2.0;
    let half_h = params.world_height / 2.0;

    let particles = (0..n)
        .map(|i| {
            let i_f = i as f32;
            let position = NVec2::new((i_f * 0.37).sin() * half_w, (i_f * 0.13).cos() * half_h);
            let velocity = NVec2::new((i_f * 0.07).sin(), (i_f * 0.11).cos());
            Particle::new(position, velocity, i_f * 0.61, 0)
        })
        .collect();

    System::new(particles)
}

/// Time serial against parallel steps for growing particle counts
pub fn bench_step() -> Result<()> {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let steps = 10;

    // Denser than the default world so most particles have neighbours
    let params = Parameters {
        world_width: 240.0,
        world_height: 135.0,
        ..Parameters::default()
    };

    for n in ns {
        let mut timings = [0.0f64; 2];

        for (slot, parallel) in [false, true].into_iter().enumerate() {
            let engine = Engine { steps_per_frame: 1, parallel };
            let forces = Scenario::default_forces(&engine);
            let mut sys = lattice_system(n, &params);

            // Warm up
            euler_integrator(&mut sys, &forces, &params)?;

            let t0 = Instant::now();
            for _ in 0..steps {
                euler_integrator(&mut sys, &forces, &params)?;
            }
            timings[slot] = t0.elapsed().as_secs_f64() / steps as f64;
        }

        println!(
            "N = {n:5}, serial = {:9.6} s/step, parallel = {:9.6} s/step, speedup = {:5.2}x",
            timings[0],
            timings[1],
            timings[0] / timings[1].max(f64::EPSILON)
        );
    }

    Ok(())
}
