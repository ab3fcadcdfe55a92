//! Headless scene player
//!
//! Runs a scene document through the player for a fixed number of frames.
//!
//! ```text
//! scene_player [scene.json] [--config player.toml|player.ron] [--frames N]
//! ```

use clap::Parser;
use scene_player::foundation::logging;
use scene_player::prelude::*;
use scene_player::subsystems::ReferenceHandles;
use std::path::PathBuf;
use thiserror::Error;

const DEMO_SCENE: &str = include_str!("../scenes/demo.json");
const ORBIT_SPEED: f32 = 0.3;

#[derive(Parser, Debug)]
#[command(name = "scene_player")]
#[command(about = "Run a serialized 3D scene headless for a fixed number of frames", long_about = None)]
struct Args {
    /// Scene JSON file (built-in demo scene when omitted)
    #[arg(value_name = "SCENE_FILE")]
    scene: Option<PathBuf>,

    /// Player options file (.toml or .ron)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Frames to run before stopping
    #[arg(short, long, default_value_t = 300)]
    frames: u64,
}

#[derive(Error, Debug)]
enum AppError {
    #[error("Could not read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] scene_player::config::ConfigError),

    #[error(transparent)]
    Subsystem(#[from] SubsystemError),

    #[error(transparent)]
    Player(#[from] PlayerError),
}

fn run(args: Args) -> Result<(), AppError> {
    let options = match &args.config {
        Some(path) => {
            log::info!("Loading player options from {}", path.display());
            PlayerOptions::load_from_file(&path.to_string_lossy())?
        }
        None => PlayerOptions::default(),
    };
    let scene = match &args.scene {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEMO_SCENE.to_string(),
    };

    let (subsystems, handles) = reference_set(ORBIT_SPEED)?;
    let mut player = Player::new(options, HeadlessHost::default(), Box::new(JsonSceneLoader::new()), subsystems);
    player.render();
    player.on(PlayerEvent::Init, |p| {
        if let Some(context) = p.context() {
            log::info!("Scene '{}' bootstrapped", context.scene.borrow().name);
        }
    });

    pollster::block_on(player.start(scene))?;

    pump(&mut player, &handles, args.frames);

    if let Some(stats) = player.stats() {
        log::info!("{:.1} fps ({:.3} ms/frame)", stats.fps(), stats.average_frame_ms());
    }
    let report = handles.render_report.borrow().clone();
    log::info!("Rendered {} frames, {} object(s) visible in the last one", report.frames, report.last_visible);

    player.dispose();
    Ok(())
}

/// Answer frame requests and surface signals like a host event loop would
fn pump(player: &mut Player<HeadlessHost>, handles: &ReferenceHandles, frames: u64) {
    while player.host_mut().take_frame_request() {
        for signal in player.host_mut().drain_signals() {
            player.handle_surface_signal(signal);
        }
        player.tick();

        let frame = player.frame_count();
        if frame == frames / 3 {
            handles.input.push(InputEvent::pointer("click", 400.0, 300.0));
            handles.throw_ball.fire();
        }
        if frame == frames / 2 {
            player.host_mut().resize_window(1280, 720);
        }
        if frame >= frames {
            player.stop();
        }
    }
}

fn main() {
    logging::init();
    log::info!("Starting scene player");

    let args = Args::parse();
    match run(args) {
        Ok(()) => log::info!("Scene player finished successfully"),
        Err(e) => {
            log::error!("Scene player error: {}", e);
            std::process::exit(1);
        }
    }
}
