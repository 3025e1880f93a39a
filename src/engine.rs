//! Engine Core Module
//!
//! [`Engine`] owns every piece of mutable rig state: the current pose, the
//! body orientation, the camera, the recorded keyframes and the playback
//! state. It has no window and no graphics context; a frontend feeds it input
//! events between ticks and calls [`Engine::tick`] with a [`Renderer`].
//!
//! # Lifecycle
//!
//! 1. Create with [`Engine::new`]
//! 2. Apply user actions with [`Engine::handle_input`]
//! 3. Call [`Engine::tick`] once per displayed frame
//!
//! Several engines can live side by side (for example a preview pane); they
//! share nothing.

use crate::animation::{AnimationPlayer, Joint, KeyframeStore, PoseState};
use crate::app::input::{InputEvent, InputResponse};
use crate::assets::{LoadQueue, LoadSender};
use crate::errors::{RigError, Result};
use crate::renderer::Renderer;
use crate::scene::{OrbitCamera, SceneGraph, SkeletonLayout};
use crate::settings::EngineSettings;
use crate::utils::Timer;

pub struct Engine {
    layout: SkeletonLayout,
    pose: PoseState,
    body_yaw_degrees: f32,
    camera: OrbitCamera,
    keyframes: KeyframeStore,
    player: AnimationPlayer,
    graph: SceneGraph,
    loads: LoadQueue,
    timer: Timer,
}

impl Engine {
    /// Creates an engine with every joint at rest.
    pub fn new(settings: EngineSettings) -> Result<Self> {
        settings.validate()?;
        let EngineSettings {
            layout,
            camera,
            playback,
        } = settings;

        let pose = PoseState::new(layout.limb_count);
        let graph = SceneGraph::build(&layout, &pose, 0.0)?;

        log::info!(
            "Engine ready: {} limbs, playback speed {}x",
            layout.limb_count,
            playback.speed
        );

        Ok(Self {
            layout,
            pose,
            body_yaw_degrees: 0.0,
            camera: OrbitCamera::new(camera),
            keyframes: KeyframeStore::new(),
            player: AnimationPlayer::with_speed(playback.speed)?,
            graph,
            loads: LoadQueue::new(),
            timer: Timer::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn layout(&self) -> &SkeletonLayout {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub fn pose(&self) -> &PoseState {
        &self.pose
    }

    #[inline]
    #[must_use]
    pub fn body_yaw_degrees(&self) -> f32 {
        self.body_yaw_degrees
    }

    #[inline]
    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &KeyframeStore {
        &self.keyframes
    }

    #[inline]
    #[must_use]
    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// The scene graph for the current pose. Replaced on every pose change.
    #[inline]
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.graph
    }

    #[inline]
    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Sender for asynchronous animation reads; see [`crate::assets::io`].
    #[must_use]
    pub fn load_sender(&self) -> LoadSender {
        self.loads.sender()
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Applies one user action at time `now_ms`.
    ///
    /// A rejected action leaves the engine unchanged; the error is logged and
    /// returned for the frontend to show.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u64) -> Result<InputResponse> {
        self.apply_input(event, now_ms)
            .inspect_err(|e| log::warn!("Input rejected: {e}"))
    }

    fn apply_input(&mut self, event: InputEvent, now_ms: u64) -> Result<InputResponse> {
        match event {
            InputEvent::SetJointAngle {
                limb,
                joint,
                degrees,
            } => {
                self.set_joint_angle(limb, joint, degrees)?;
                Ok(InputResponse::Applied)
            }
            InputEvent::SetBodyOrientation(degrees) => {
                self.body_yaw_degrees = finite_degrees(degrees)?;
                self.rebuild()?;
                Ok(InputResponse::Applied)
            }
            InputEvent::SetCameraAngle(degrees) => {
                self.camera.set_angle(finite_degrees(degrees)?);
                Ok(InputResponse::Applied)
            }
            InputEvent::SetAspectRatio(aspect) => {
                if !(aspect.is_finite() && aspect > 0.0) {
                    return Err(RigError::InvalidCamera(format!(
                        "aspect ratio must be positive, got {aspect}"
                    )));
                }
                self.camera.set_aspect(aspect);
                Ok(InputResponse::Applied)
            }
            InputEvent::SetPlaybackSpeed(speed) => {
                self.player.set_speed(speed)?;
                Ok(InputResponse::Applied)
            }
            InputEvent::RecordKeyframe => {
                self.keyframes.append(now_ms, &self.pose);
                Ok(InputResponse::Recorded {
                    count: self.keyframes.len(),
                })
            }
            InputEvent::Play => {
                self.player.play(&self.keyframes, now_ms)?;
                Ok(InputResponse::Playing)
            }
            InputEvent::Stop => {
                self.player.stop();
                Ok(InputResponse::Stopped)
            }
            InputEvent::SaveAnimation => Ok(InputResponse::Saved(self.keyframes.serialize()?)),
            InputEvent::LoadAnimation(bytes) => {
                let count = self.load_animation(&bytes)?;
                Ok(InputResponse::Loaded { count })
            }
        }
    }

    /// Sets one joint and rebuilds the scene.
    ///
    /// Rejected with [`RigError::PoseLocked`] while an animation is playing
    /// and with [`RigError::InvalidAngle`] for NaN or infinite degrees.
    pub fn set_joint_angle(&mut self, limb: usize, joint: Joint, degrees: f32) -> Result<()> {
        let degrees = finite_degrees(degrees)?;
        if self.player.is_playing() {
            return Err(RigError::PoseLocked);
        }
        self.pose.set_angle(limb, joint, degrees)?;
        self.rebuild()
    }

    /// Replaces the recorded timeline with a saved animation.
    ///
    /// The bytes are fully decoded before anything changes, so on error the
    /// previous keyframes are kept.
    pub fn load_animation(&mut self, bytes: &[u8]) -> Result<usize> {
        let count = self.keyframes.load(bytes, self.layout.limb_count)?;
        log::info!("Loaded animation with {count} keyframes");
        Ok(count)
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Runs one frame: applies finished loads, advances playback and draws.
    pub fn tick<R: Renderer + ?Sized>(&mut self, now_ms: u64, renderer: &mut R) -> Result<()> {
        self.timer.tick(now_ms);
        self.apply_pending_loads();

        if let Some(sample) = self.player.sample(&self.keyframes, now_ms) {
            // The timeline was replaced by something unplayable.
            if let Err(e) = sample.and_then(|pose| self.pose.copy_from(&pose)) {
                log::warn!("Stopping playback: {e}");
                self.player.stop();
            } else {
                self.rebuild()?;
            }
        }

        self.draw(renderer);
        Ok(())
    }

    /// Draws the current scene without advancing anything.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let view_projection = self.camera.view_projection();
        renderer.begin_frame();
        for (_, node, world) in self.graph.traverse() {
            renderer.draw(node.geometry(), &world, view_projection);
        }
        renderer.end_frame();
    }

    fn apply_pending_loads(&mut self) {
        let results: Vec<_> = self.loads.drain().collect();
        for result in results {
            match result {
                Ok(bytes) => {
                    if let Err(e) = self.load_animation(&bytes) {
                        log::warn!("Animation load rejected: {e}");
                    }
                }
                Err(e) => log::warn!("Animation read failed: {e}"),
            }
        }
    }

    fn rebuild(&mut self) -> Result<()> {
        self.graph = SceneGraph::build(&self.layout, &self.pose, self.body_yaw_degrees)?;
        Ok(())
    }
}

fn finite_degrees(degrees: f32) -> Result<f32> {
    if degrees.is_finite() {
        Ok(degrees)
    } else {
        Err(RigError::InvalidAngle(degrees))
    }
}
