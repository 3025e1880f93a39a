//! Engine and tick loop tests
//!
//! Tests for:
//! - Draw calls per tick (one per node, traversal order, camera matrix)
//! - Record / play / stop through input events
//! - Pose editing locked during playback
//! - Save and load, including loads delivered between ticks
//! - TickLoop with a manual clock

use std::ops::ControlFlow;

use glam::Affine3A;
use marionette::animation::{Joint, PoseState};
use marionette::app::{InputEvent, InputResponse, TickLoop};
use marionette::assets::FileAnimationStorage;
use marionette::engine::Engine;
use marionette::errors::RigError;
use marionette::renderer::{DrawRecorder, Renderer};
use marionette::scene::{GeometryHandle, SkeletonLayout};
use marionette::settings::{EngineSettings, PlaybackSettings};
use marionette::utils::ManualClock;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-3;

fn settings(limbs: usize) -> EngineSettings {
    EngineSettings {
        layout: SkeletonLayout::with_limb_count(limbs),
        playback: PlaybackSettings { speed: 1.0 },
        ..EngineSettings::default()
    }
}

fn engine(limbs: usize) -> Engine {
    Engine::new(settings(limbs)).unwrap()
}

/// Two keyframes at 0 and 1000 ms, limb 0's base going 0 → 90.
fn record_two(engine: &mut Engine) {
    engine.handle_input(InputEvent::RecordKeyframe, 0).unwrap();
    engine
        .handle_input(
            InputEvent::SetJointAngle {
                limb: 0,
                joint: Joint::Base,
                degrees: 90.0,
            },
            500,
        )
        .unwrap();
    engine.handle_input(InputEvent::RecordKeyframe, 1000).unwrap();
}

fn base_angle(engine: &Engine) -> f32 {
    engine.pose().angle(0, Joint::Base).unwrap()
}

/// Counts frames without keeping them.
#[derive(Default)]
struct FrameCounter {
    frames: usize,
    open: bool,
}

impl Renderer for FrameCounter {
    fn begin_frame(&mut self) {
        self.open = true;
    }

    fn draw(&mut self, _: GeometryHandle, _: &Affine3A, _: &glam::Mat4) {
        assert!(self.open, "draw outside of a frame");
    }

    fn end_frame(&mut self) {
        self.open = false;
        self.frames += 1;
    }
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn tick_draws_every_node_in_traversal_order() {
    let mut engine = engine(8);
    let mut recorder = DrawRecorder::new();
    engine.tick(0, &mut recorder).unwrap();

    let frame = recorder.last_frame().unwrap();
    assert_eq!(frame.len(), 1 + 8 * 3);

    let expected: Vec<_> = engine
        .scene()
        .traverse()
        .map(|(_, node, world)| (node.geometry(), world))
        .collect();
    let drawn: Vec<_> = frame.iter().map(|c| (c.geometry, c.world)).collect();
    assert_eq!(drawn, expected);
    assert!(frame.iter().all(|c| c.view_projection == *engine.camera().view_projection()));
}

#[test]
fn camera_and_aspect_changes_reach_the_renderer() {
    let mut engine = engine(2);
    let mut recorder = DrawRecorder::new();
    engine.tick(0, &mut recorder).unwrap();
    let before = recorder.last_frame().unwrap()[0].view_projection;

    engine.handle_input(InputEvent::SetCameraAngle(60.0), 10).unwrap();
    engine.tick(16, &mut recorder).unwrap();
    let turned = recorder.last_frame().unwrap()[0].view_projection;
    assert_ne!(before, turned);

    engine.handle_input(InputEvent::SetAspectRatio(1.0), 20).unwrap();
    engine.tick(32, &mut recorder).unwrap();
    assert_ne!(turned, recorder.last_frame().unwrap()[0].view_projection);

    assert!(matches!(
        engine.handle_input(InputEvent::SetAspectRatio(0.0), 40),
        Err(RigError::InvalidCamera(_))
    ));
}

#[test]
fn body_orientation_rebuilds_the_scene() {
    let mut engine = engine(3);
    let before: Vec<_> = engine.scene().traverse().map(|(_, _, w)| w).collect();

    engine.handle_input(InputEvent::SetBodyOrientation(45.0), 0).unwrap();
    let after: Vec<_> = engine.scene().traverse().map(|(_, _, w)| w).collect();

    assert_eq!(engine.body_yaw_degrees(), 45.0);
    assert_ne!(before, after);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn set_joint_angle_updates_pose_and_scene() {
    let mut engine = engine(8);
    let layout = engine.layout().clone();

    let response = engine
        .handle_input(
            InputEvent::SetJointAngle {
                limb: 0,
                joint: Joint::Base,
                degrees: 90.0,
            },
            0,
        )
        .unwrap();
    assert_eq!(response, InputResponse::Applied);
    assert_eq!(base_angle(&engine), 90.0);

    let (_, end) = engine.scene().segment_endpoints(&layout, 0, Joint::Base).unwrap();
    assert!((end - glam::Vec3::new(7.0, -4.0, 0.0)).length() < EPSILON, "{end}");
}

#[test]
fn out_of_range_limb_is_rejected() {
    let mut engine = engine(4);
    let err = engine
        .handle_input(
            InputEvent::SetJointAngle {
                limb: 4,
                joint: Joint::Tip,
                degrees: 10.0,
            },
            0,
        )
        .unwrap_err();
    assert!(matches!(err, RigError::LimbOutOfRange { index: 4, count: 4 }));
    assert_eq!(engine.pose(), &PoseState::new(4));
}

#[test]
fn non_finite_angles_are_rejected_without_side_effects() {
    let mut engine = engine(3);
    let mut recorder = DrawRecorder::new();
    engine.handle_input(InputEvent::SetCameraAngle(30.0), 0).unwrap();
    engine.tick(0, &mut recorder).unwrap();
    let frame_before = recorder.last_frame().unwrap().to_vec();

    for degrees in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        let events = [
            InputEvent::SetJointAngle {
                limb: 0,
                joint: Joint::Base,
                degrees,
            },
            InputEvent::SetBodyOrientation(degrees),
            InputEvent::SetCameraAngle(degrees),
        ];
        for event in events {
            let err = engine.handle_input(event.clone(), 10).unwrap_err();
            assert!(matches!(err, RigError::InvalidAngle(_)), "{event:?}: {err}");
        }
    }

    assert_eq!(engine.pose(), &PoseState::new(3));
    assert_eq!(engine.body_yaw_degrees(), 0.0);
    assert_eq!(engine.camera().angle_degrees(), 30.0);

    engine.tick(16, &mut recorder).unwrap();
    let frame_after = recorder.last_frame().unwrap();
    assert!(frame_after.iter().all(|c| c.world.is_finite() && c.view_projection.is_finite()));
    assert_eq!(frame_after, frame_before.as_slice());

    // Whatever gets recorded afterwards still loads back.
    engine.handle_input(InputEvent::RecordKeyframe, 20).unwrap();
    let bytes = engine.keyframes().serialize().unwrap();
    let mut reloaded = engine.keyframes().clone();
    assert_eq!(reloaded.load(&bytes, 3).unwrap(), 1);
}

// ============================================================================
// Record / Play / Stop
// ============================================================================

#[test]
fn record_then_play_interpolates() {
    let mut engine = engine(3);
    let mut recorder = DrawRecorder::with_max_frames(1);
    record_two(&mut engine);
    assert_eq!(engine.keyframes().len(), 2);

    let response = engine.handle_input(InputEvent::Play, 2000).unwrap();
    assert_eq!(response, InputResponse::Playing);
    assert!(engine.is_playing());

    engine.tick(2500, &mut recorder).unwrap();
    assert!((base_angle(&engine) - 45.0).abs() < EPSILON);
    assert_eq!(engine.pose().angle(1, Joint::Base).unwrap(), 0.0);

    // One loop later the pose repeats.
    engine.tick(3500, &mut recorder).unwrap();
    assert!((base_angle(&engine) - 45.0).abs() < EPSILON);
    assert_eq!(recorder.frame_count(), 1);
}

#[test]
fn recorded_keyframes_are_snapshots() {
    let mut engine = engine(2);
    record_two(&mut engine);
    engine
        .set_joint_angle(0, Joint::Base, -30.0)
        .unwrap();

    let frames = engine.keyframes().keyframes();
    assert_eq!(frames[0].pose.angle(0, Joint::Base).unwrap(), 0.0);
    assert_eq!(frames[1].pose.angle(0, Joint::Base).unwrap(), 90.0);
}

#[test]
fn play_needs_two_keyframes() {
    let mut engine = engine(2);
    assert!(matches!(
        engine.handle_input(InputEvent::Play, 0),
        Err(RigError::InsufficientKeyframes { found: 0 })
    ));

    engine.handle_input(InputEvent::RecordKeyframe, 0).unwrap();
    assert!(engine.handle_input(InputEvent::Play, 10).is_err());
    assert!(!engine.is_playing());
}

#[test]
fn joints_are_locked_while_playing() {
    let mut engine = engine(2);
    record_two(&mut engine);
    engine.handle_input(InputEvent::Play, 0).unwrap();

    let err = engine.set_joint_angle(1, Joint::Mid, 20.0).unwrap_err();
    assert!(matches!(err, RigError::PoseLocked));
    assert_eq!(engine.pose().angle(1, Joint::Mid).unwrap(), 0.0);

    // The body and camera stay free.
    engine.handle_input(InputEvent::SetBodyOrientation(30.0), 5).unwrap();
    engine.handle_input(InputEvent::SetCameraAngle(30.0), 5).unwrap();

    engine.handle_input(InputEvent::Stop, 10).unwrap();
    assert!(!engine.is_playing());
    engine.set_joint_angle(1, Joint::Mid, 20.0).unwrap();
}

#[test]
fn stop_keeps_the_last_sampled_pose() {
    let mut engine = engine(2);
    let mut counter = FrameCounter::default();
    record_two(&mut engine);
    engine.handle_input(InputEvent::Play, 0).unwrap();
    engine.tick(250, &mut counter).unwrap();

    engine.handle_input(InputEvent::Stop, 300).unwrap();
    engine.tick(900, &mut counter).unwrap();

    assert!((base_angle(&engine) - 22.5).abs() < EPSILON);
    assert_eq!(counter.frames, 2);
}

#[test]
fn playback_speed_can_change_mid_play() {
    let mut engine = engine(2);
    let mut counter = FrameCounter::default();
    record_two(&mut engine);
    engine.handle_input(InputEvent::Play, 0).unwrap();
    engine.handle_input(InputEvent::SetPlaybackSpeed(2.0), 0).unwrap();

    engine.tick(250, &mut counter).unwrap();
    assert!((base_angle(&engine) - 45.0).abs() < EPSILON);

    assert!(matches!(
        engine.handle_input(InputEvent::SetPlaybackSpeed(-1.0), 300),
        Err(RigError::InvalidSpeed(_))
    ));
    assert_eq!(engine.player().speed(), 2.0);
}

// ============================================================================
// Save / Load
// ============================================================================

#[test]
fn save_then_load_into_another_engine() {
    let mut source = engine(3);
    record_two(&mut source);
    let InputResponse::Saved(bytes) = source.handle_input(InputEvent::SaveAnimation, 0).unwrap()
    else {
        panic!("expected saved bytes");
    };

    let mut target = engine(3);
    let response = target
        .handle_input(InputEvent::LoadAnimation(bytes), 0)
        .unwrap();
    assert_eq!(response, InputResponse::Loaded { count: 2 });
    assert_eq!(target.keyframes(), source.keyframes());
}

#[test]
fn load_with_wrong_limb_count_keeps_keyframes() {
    let mut source = engine(3);
    record_two(&mut source);
    let bytes = source.keyframes().serialize().unwrap();

    let mut target = engine(4);
    target.handle_input(InputEvent::RecordKeyframe, 0).unwrap();
    let before = target.keyframes().clone();

    let err = target
        .handle_input(InputEvent::LoadAnimation(bytes), 0)
        .unwrap_err();
    assert!(matches!(err, RigError::MalformedAnimation(_)));
    assert_eq!(target.keyframes(), &before);
}

#[test]
fn queued_loads_apply_on_next_tick() {
    let mut source = engine(2);
    record_two(&mut source);
    let bytes = source.keyframes().serialize().unwrap();

    let mut target = engine(2);
    let mut counter = FrameCounter::default();
    let sender = target.load_sender();
    sender.send(Err("disk on fire".into())).unwrap();
    sender.send(Ok(b"garbage".to_vec())).unwrap();
    assert!(target.keyframes().is_empty());

    target.tick(0, &mut counter).unwrap();
    assert!(target.keyframes().is_empty());

    sender.send(Ok(bytes)).unwrap();
    target.tick(16, &mut counter).unwrap();
    assert_eq!(target.keyframes(), source.keyframes());
}

#[test]
fn replacing_timeline_with_one_keyframe_stops_playback() {
    let mut engine = engine(1);
    let mut counter = FrameCounter::default();
    record_two(&mut engine);
    engine.handle_input(InputEvent::Play, 0).unwrap();

    let single = br#"[{"timestampMs": 0, "jointAngles": [{"base": 5, "mid": 0, "tip": 0}]}]"#;
    engine
        .handle_input(InputEvent::LoadAnimation(single.to_vec()), 10)
        .unwrap();
    engine.tick(20, &mut counter).unwrap();

    assert!(!engine.is_playing());
    assert_eq!(counter.frames, 1);
}

#[test]
fn file_storage_roundtrip_through_the_queue() {
    let dir = std::env::temp_dir().join(format!("marionette-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let storage = FileAnimationStorage::new(&dir);

    let mut source = engine(2);
    record_two(&mut source);
    storage
        .save("walk.json", &source.keyframes().serialize().unwrap())
        .unwrap();

    let mut target = engine(2);
    let mut counter = FrameCounter::default();
    storage
        .spawn_load("walk.json", target.load_sender())
        .join()
        .unwrap();
    storage
        .spawn_load("missing.json", target.load_sender())
        .join()
        .unwrap();
    target.tick(0, &mut counter).unwrap();

    assert_eq!(target.keyframes(), source.keyframes());
    std::fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// Tick Loop
// ============================================================================

#[test]
fn tick_loop_runs_frames_with_manual_clock() {
    let mut engine = engine(2);
    let mut recorder = DrawRecorder::new();
    let mut tick_loop = TickLoop::new(ManualClock::new(1000, 16));

    let ticks = tick_loop.run_frames(&mut engine, &mut recorder, 5).unwrap();
    assert_eq!(ticks, 5);
    assert_eq!(recorder.frame_count(), 5);
    assert_eq!(engine.timer().frame_count, 5);
    assert_eq!(engine.timer().delta.as_millis(), 16);
}

#[test]
fn tick_loop_applies_input_between_ticks() {
    let mut engine = engine(3);
    let mut recorder = DrawRecorder::with_max_frames(2);
    let mut tick_loop = TickLoop::new(ManualClock::new(0, 250));

    let ticks = tick_loop
        .run(&mut engine, &mut recorder, |engine, now| {
            let result = match now {
                0 => engine.handle_input(InputEvent::RecordKeyframe, now).map(drop),
                1000 => engine
                    .set_joint_angle(0, Joint::Base, 90.0)
                    .and_then(|()| engine.handle_input(InputEvent::RecordKeyframe, now))
                    .map(drop),
                2000 => engine.handle_input(InputEvent::Play, now).map(drop),
                t if t > 2500 => return ControlFlow::Break(()),
                _ => Ok(()),
            };
            assert!(result.is_ok());
            ControlFlow::Continue(())
        })
        .unwrap();

    assert_eq!(ticks, 11);
    assert_eq!(recorder.frame_count(), 2);
    assert!(engine.is_playing());
    assert!((base_angle(&engine) - 45.0).abs() < EPSILON);
}
