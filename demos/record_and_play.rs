//! Record and Play Example
//!
//! Poses a rig by hand, records a short wave as keyframes, saves it to disk,
//! loads it back through the asynchronous load queue and plays it in a loop.
//! Rendering is headless: draw calls are recorded and summarized in the log.
//!
//! Run with `RUST_LOG=info cargo run --example record_and_play`.

use std::ops::ControlFlow;
use std::time::Duration;

use marionette::animation::Joint;
use marionette::app::{InputEvent, InputResponse, TickLoop};
use marionette::assets::FileAnimationStorage;
use marionette::renderer::DrawRecorder;
use marionette::settings::EngineSettings;
use marionette::utils::{ManualClock, SystemClock};
use marionette::Engine;

/// Angles for limb 0 at each recorded keyframe: (base, mid, tip).
const WAVE: [(f32, f32, f32); 4] = [
    (0.0, 0.0, 0.0),
    (60.0, -30.0, 15.0),
    (90.0, 30.0, -45.0),
    (0.0, 0.0, 0.0),
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = EngineSettings::from_json_str(r#"{ "layout": { "limb_count": 6 } }"#)?;
    let mut engine = Engine::new(settings)?;
    let mut recorder = DrawRecorder::with_max_frames(1);

    // Posing happens on a deterministic clock, one keyframe every 400 ms.
    let mut posing = TickLoop::new(ManualClock::new(0, 400));
    let mut step = 0;
    posing.run(&mut engine, &mut recorder, |engine, now| {
        let Some(&(base, mid, tip)) = WAVE.get(step) else {
            return ControlFlow::Break(());
        };
        step += 1;
        for (joint, degrees) in [(Joint::Base, base), (Joint::Mid, mid), (Joint::Tip, tip)] {
            if let Err(e) = engine.set_joint_angle(0, joint, degrees) {
                log::error!("{e}");
                return ControlFlow::Break(());
            }
        }
        match engine.handle_input(InputEvent::RecordKeyframe, now) {
            Ok(InputResponse::Recorded { count }) => log::info!("Keyframe {count} at {now} ms"),
            Ok(_) => {}
            Err(_) => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    })?;

    let InputResponse::Saved(bytes) = engine.handle_input(InputEvent::SaveAnimation, 0)? else {
        anyhow::bail!("save produced no data");
    };

    let storage = FileAnimationStorage::new(std::env::temp_dir());
    storage.save("marionette_wave.json", &bytes)?;

    // Fresh engine: the animation arrives through the load queue.
    let mut player = Engine::new(EngineSettings::from_json_str(
        r#"{ "layout": { "limb_count": 6 } }"#,
    )?)?;
    storage
        .spawn_load("marionette_wave.json", player.load_sender())
        .join()
        .map_err(|_| anyhow::anyhow!("load thread panicked"))?;

    let mut playback = TickLoop::new(SystemClock::new()).with_frame_interval(Duration::from_millis(16));
    let mut started = false;
    let ticks = playback.run(&mut player, &mut recorder, |engine, now| {
        if !started && !engine.keyframes().is_empty() {
            match engine.handle_input(InputEvent::Play, now) {
                Ok(_) => started = true,
                Err(_) => return ControlFlow::Break(()),
            }
        }
        if now > 3000 {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    })?;

    let draws = recorder.last_frame().map_or(0, <[_]>::len);
    log::info!(
        "Played {} keyframes for {ticks} ticks, {draws} draw calls per frame, limb 0 base at {:.1}°",
        player.keyframes().len(),
        player.pose().angle(0, Joint::Base)?
    );
    Ok(())
}
