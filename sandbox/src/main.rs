//! Headless sandbox: load a level, run the controller under the level's input script and log
//! the trajectory.
//!
//! Run with: RUST_LOG=debug cargo run -p sandbox -- sandbox/levels/demo.toml

use std::{error::Error, path::PathBuf, time::Duration};

use clap::Parser;
use log::{debug, info};
use platformer::{
    CharacterController, FixedTicker, LevelConfig, Point2, QueryWorld, SurfaceRider, TickDriver,
};

#[derive(Parser)]
#[command(name = "sandbox")]
#[command(about = "Run a platformer level headless and log the character trajectory", long_about = None)]
struct Cli {
    /// Level file (TOML)
    #[arg(default_value = "sandbox/levels/demo.toml")]
    level: PathBuf,
    /// Ticks to simulate (default: end of the input script plus one second)
    #[arg(short, long)]
    ticks: Option<u64>,
    /// Simulated render frame length in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: u64,
    /// Log the kinematic state every n-th tick
    #[arg(long, default_value = "5")]
    every: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let level = LevelConfig::from_file(&cli.level)?;
    info!(
        "loaded {} ({} solids, {} Hz)",
        level.name.as_deref().unwrap_or("unnamed level"),
        level.solids.len(),
        level.tick_hz
    );

    let interval = level.tick_interval();
    let dt = interval.as_secs_f32();
    let spawn = Point2::new(level.spawn[0], level.spawn[1]);

    let mut world = QueryWorld::build(level.solids.clone());
    let mut controller =
        CharacterController::new(spawn, level.footprint, SurfaceRider::new(level.footprint))
            .with_tick_seconds(dt);
    let mut driver = TickDriver::new(FixedTicker::from_hz(level.tick_hz), spawn);

    let total = cli
        .ticks
        .unwrap_or(level.script_end() + u64::from(level.tick_hz));
    let frame = Duration::from_millis(cli.frame_ms.max(1));
    let every = cli.every.max(1);

    let mut tick = 0u64;
    let mut frames = 0u64;
    while driver.ticks() < total {
        let pose = driver.frame(frame, || {
            let (input, payload) = level.input_at(tick);
            world.advance(dt);
            if let Some(transition) = controller.tick(&world, &input, &payload) {
                info!(
                    "tick {tick}: {transition:?} at {:?}",
                    controller.position()
                );
            }
            if tick % every == 0 {
                let p = controller.position();
                let v = controller.velocity();
                info!(
                    "tick {tick:>5}  pos ({:>8.3}, {:>8.3})  vel ({:>7.4}, {:>7.4})  {}",
                    p.x,
                    p.y,
                    v.x,
                    v.y,
                    if controller.is_attached() {
                        "attached"
                    } else {
                        "free"
                    }
                );
            }
            tick += 1;
            controller.resolved_poses()
        });
        debug!("frame {frames}: render pose ({:.3}, {:.3})", pose.x, pose.y);
        frames += 1;
    }

    info!(
        "done after {} ticks / {frames} frames, final position {:?}",
        driver.ticks(),
        controller.position()
    );
    Ok(())
}
