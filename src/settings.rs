//! Engine Settings
//!
//! Everything the engine needs that is fixed for its lifetime: the skeleton
//! layout, the camera projection and the default playback speed. All fields
//! have defaults, so a settings file only needs to name what it changes.
//!
//! ```rust,ignore
//! use marionette::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_json_str(r#"{ "layout": { "limb_count": 6 } }"#)?;
//! let engine = Engine::new(settings)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{RigError, Result};
use crate::scene::{CameraSettings, SkeletonLayout};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Multiplier applied to wall-clock time during playback.
    pub speed: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { speed: 5.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub layout: SkeletonLayout,
    pub camera: CameraSettings,
    pub playback: PlaybackSettings,
}

impl EngineSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).map_err(RigError::Settings)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let settings: Self = serde_json::from_slice(bytes).map_err(RigError::Settings)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        let speed = self.playback.speed;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(RigError::InvalidSpeed(speed));
        }
        let cam = &self.camera;
        if !(cam.near > 0.0 && cam.far > cam.near && cam.aspect > 0.0 && cam.fov > 0.0) {
            return Err(RigError::InvalidCamera(format!(
                "camera projection is degenerate: fov {}, aspect {}, near {}, far {}",
                cam.fov, cam.aspect, cam.near, cam.far
            )));
        }
        if !(cam.distance.is_finite() && cam.distance > 0.0 && cam.target.is_finite()) {
            return Err(RigError::InvalidCamera(format!(
                "camera orbit is degenerate: distance {}, target {}",
                cam.distance, cam.target
            )));
        }
        Ok(())
    }
}
