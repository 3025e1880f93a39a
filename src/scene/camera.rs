use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Horizontal distance from the orbit target.
    pub distance: f32,
    pub target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 45.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            distance: 10.0,
            target: Vec3::ZERO,
        }
    }
}

/// Perspective camera orbiting the rig around the world Y axis.
///
/// At angle 0 the camera sits on -Z looking towards the target.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    settings: CameraSettings,
    angle_degrees: f32,

    // Cached, read by the renderer
    view_matrix: Mat4,
    projection_matrix: Mat4,
    view_projection_matrix: Mat4,
}

impl OrbitCamera {
    #[must_use]
    pub fn new(settings: CameraSettings) -> Self {
        let mut cam = Self {
            settings,
            angle_degrees: 0.0,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam.update_view_matrix();
        cam
    }

    #[must_use]
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    #[must_use]
    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        let angle = self.angle_degrees.to_radians();
        let d = self.settings.distance;
        self.settings.target + Vec3::new(d * angle.sin(), 0.0, -d * angle.cos())
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle_degrees = degrees;
        self.update_view_matrix();
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.settings.aspect = aspect;
        self.update_projection_matrix();
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection_matrix
    }

    fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(
            self.settings.fov.to_radians(),
            self.settings.aspect,
            self.settings.near,
            self.settings.far,
        );
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_at_rh(self.position(), self.settings.target, Vec3::Y);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }
}
