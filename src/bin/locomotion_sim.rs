//! Locomotion Sim - Headless Scripted Run
//!
//! Run with: `cargo run --bin locomotion_sim [config.json]`
//!
//! Walks a player across flat ground, jumps, dashes and idles, printing one
//! JSON object per rendered frame to stdout. Set `RUST_LOG=debug` to see
//! rejected triggers, `RUST_LOG=trace` for per-frame detail.
//!
//! Script (60 fps):
//! - 0.0s: walk forward
//! - 0.5s: jump
//! - 1.5s: dash to the right
//! - 2.0s: release input and coast to rest
//! - 2.1s: dash again (rejected, still on cooldown)

use std::error::Error;

use locomotion_engine::{
    ActionKind, CameraTransform, InputSample, MovementConfig, ParameterTable, PlayerController,
    Simulation, StaticWorld,
};
use serde_json::json;

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES: usize = 180;

/// Index of the frame that starts at `seconds`.
fn frame_at(seconds: f32) -> usize {
    (seconds / FRAME_DT).round() as usize
}

fn input_at(time: f32) -> InputSample {
    if time < 1.5 {
        InputSample::new(0.0, 1.0)
    } else if time < 2.0 {
        InputSample::new(1.0, 0.0)
    } else {
        InputSample::NONE
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => MovementConfig::load(&path)?,
        None => MovementConfig::default(),
    };
    log::info!("starting locomotion sim: {}", config.to_json_pretty()?);

    let mut player = PlayerController::new(config, ParameterTable::new())?;
    player.enable();

    let mut sim = Simulation::new(player, StaticWorld::flat_ground(0.0));
    // Slightly above and behind, looking down the -Z axis
    let camera = CameraTransform::from_yaw_pitch(0.0, -0.35);

    let jump_frame = frame_at(0.5);
    let dash_frame = frame_at(1.5);
    let second_dash_frame = frame_at(2.1);

    for frame in 0..FRAMES {
        let time = frame as f32 * FRAME_DT;
        let input = input_at(time);

        let trigger = if frame == jump_frame {
            Some(ActionKind::Jump)
        } else if frame == dash_frame || frame == second_dash_frame {
            Some(ActionKind::Dash)
        } else {
            None
        };
        let outcome = match trigger {
            Some(action) => Some(sim.trigger(action, input, Some(&camera))?),
            None => None,
        };

        let report = sim.frame(FRAME_DT, input, Some(&camera));
        if let Some(err) = report.error {
            return Err(err.into());
        }

        let state = sim.player().state();
        let line = json!({
            "frame": frame,
            "time": time,
            "fixed_steps": report.fixed_steps,
            "position": state.position,
            "velocity": state.velocity,
            "dashing": state.is_dashing,
            "trigger": trigger.map(|action| format!("{action:?}")),
            "outcome": outcome.map(|o| format!("{o:?}")),
            "animation": report.params,
        });
        println!("{line}");
    }

    Ok(())
}
