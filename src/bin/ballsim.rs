use ballsim::{Arena, ScenarioConfig, Vector, World};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

/// Headless frame loop for the bouncing-ball simulation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML scenario file; the built-in eight-ball demo is used when omitted.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Place this many random balls in a 640x480 arena instead of loading a scenario.
    #[arg(long, conflicts_with = "scenario")]
    random: Option<usize>,

    /// Seed for --random.
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Number of frames to simulate.
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Target frames per second; 0 runs unpaced.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Print the ball snapshot every K frames; 0 disables.
    #[arg(long, default_value_t = 60)]
    print_every: u64,
}

fn load_world(args: &Args) -> Result<World> {
    if let Some(count) = args.random {
        let world = World::random(
            count,
            Arena::new(640.0, 480.0),
            20.0,
            Vector::planar(0.0, 0.3),
            3.0,
            args.seed,
        )?;
        return Ok(world);
    }
    let cfg = match &args.scenario {
        Some(path) => ScenarioConfig::from_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => ScenarioConfig::demo(),
    };
    Ok(cfg.build_world()?)
}

fn print_snapshot(world: &World) {
    println!("frame {}", world.frame());
    for (i, disc) in world.snapshot().enumerate() {
        println!("  ball {i}: center {} r {:.1}", disc.center, disc.radius);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if !args.fps.is_finite() || args.fps < 0.0 {
        anyhow::bail!("--fps must be a finite, non-negative number");
    }

    let mut world = load_world(&args)?;
    info!(balls = world.num_balls(), frames = args.frames, "starting simulation");

    let frame_budget = (args.fps > 0.0).then(|| Duration::from_secs_f64(1.0 / args.fps));
    let mut window_start = Instant::now();
    let mut window_frames = 0u32;

    for _ in 0..args.frames {
        let frame_start = Instant::now();

        world.step();

        let stats = world.last_step();
        if stats.degenerate_skipped > 0 {
            warn!(
                frame = world.frame(),
                pairs = stats.degenerate_skipped,
                "balls with coincident centers were not resolved"
            );
        }
        if args.print_every > 0 && world.frame() % args.print_every == 0 {
            print_snapshot(&world);
        }

        window_frames += 1;
        let elapsed = window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = f64::from(window_frames) / elapsed.as_secs_f64();
            info!(frame = world.frame(), fps = %format!("{fps:.2}"), "FPS");
            window_start = Instant::now();
            window_frames = 0;
        }

        if let Some(budget) = frame_budget {
            if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    info!(
        frame = world.frame(),
        kinetic_energy = world.kinetic_energy(),
        "simulation finished"
    );
    Ok(())
}
