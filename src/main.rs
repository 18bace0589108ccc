use vesim::{bench_step, tail_segment, type_color, Scenario, ScenarioConfig, TAIL_LENGTH};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Headless driver for the vesicle particle model
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario YAML; relative paths are tried under the crate's scenarios/ directory too
    #[arg(short, long, default_value = "vesicles.yaml")]
    file: PathBuf,

    /// Number of frames to run
    #[arg(short = 'n', long, default_value_t = 100)]
    frames: u32,

    /// Log diagnostics every K frames
    #[arg(long, default_value_t = 10)]
    report_every: u32,

    /// Time serial vs parallel steps instead of running a scenario
    #[arg(long)]
    bench: bool,

    /// Raise log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// load here to keep main clean
fn load_scenario(file: &Path) -> Result<ScenarioConfig> {
    let config_path = if file.exists() {
        file.to_path_buf()
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file)
    };
    debug!("loading scenario from {}", config_path.display());

    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn report(scenario: &Scenario, frame: u32) {
    let sys = &scenario.system;
    let c = sys.centroid();
    info!(
        "frame {frame:5} t = {:8.2} KE = {:10.3} mean |v| = {:6.3} centroid = ({:7.2}, {:7.2}) outside = {}",
        sys.t,
        sys.kinetic_energy(),
        sys.mean_speed(),
        c.x,
        c.y,
        sys.count_outside(scenario.parameters.world_width, scenario.parameters.world_height)
    );
}

fn census(scenario: &Scenario, type_count: i32) {
    let mut per_kind: BTreeMap<i32, usize> = BTreeMap::new();
    for p in &scenario.system.particles {
        *per_kind.entry(p.kind).or_default() += 1;
    }
    for (kind, count) in per_kind {
        let [r, g, b] = type_color(kind, type_count);
        info!("kind {kind:3} #{r:02x}{g:02x}{b:02x}: {count} particles");
    }

    if let Some(p) = scenario.system.particles.first() {
        let (start, end) = tail_segment(p, TAIL_LENGTH);
        debug!("particle 0 tail from ({:.2}, {:.2}) to ({:.2}, {:.2})", start.x, start.y, end.x, end.y);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if args.bench {
        bench_step()?;
        return Ok(());
    }

    let cfg = load_scenario(&args.file)?;
    let type_count = cfg.spawn.type_count;
    let mut scenario = Scenario::build_scenario(cfg)?;
    info!(
        "running {} particles for {} frames (seed {})",
        scenario.system.len(),
        args.frames,
        scenario.seed
    );

    let report_every = args.report_every.max(1);
    for frame in 1..=args.frames {
        scenario
            .run_frame()
            .with_context(|| format!("simulation aborted in frame {frame}"))?;
        if frame % report_every == 0 {
            report(&scenario, frame);
        }
    }

    census(&scenario, type_count);
    Ok(())
}
