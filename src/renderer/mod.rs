//! Renderer seam.
//!
//! The engine does not talk to a graphics API. Each tick it walks the posed
//! scene graph and hands every node to a [`Renderer`], which owns buffers,
//! shaders and draw calls. [`DrawRecorder`] is a headless implementation that
//! keeps the calls for inspection.

use glam::{Affine3A, Mat4};

use crate::scene::GeometryHandle;

/// Draw sink for posed rig segments.
pub trait Renderer {
    /// Called once per tick before the first `draw`.
    fn begin_frame(&mut self) {}

    /// Draws one node. Called in traversal order, once per node per tick.
    fn draw(&mut self, geometry: GeometryHandle, world: &Affine3A, view_projection: &Mat4);

    /// Called once per tick after the last `draw`.
    fn end_frame(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub geometry: GeometryHandle,
    pub world: Affine3A,
    pub view_projection: Mat4,
}

/// Records draw calls instead of issuing them.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    frames: Vec<Vec<DrawCall>>,
    current: Vec<DrawCall>,
    /// Keep at most this many finished frames (0 = unlimited).
    pub max_frames: usize,
}

impl DrawRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_frames(max_frames: usize) -> Self {
        Self {
            max_frames,
            ..Self::default()
        }
    }

    /// Finished frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Vec<DrawCall>] {
        &self.frames
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&[DrawCall]> {
        self.frames.last().map(Vec::as_slice)
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Renderer for DrawRecorder {
    fn begin_frame(&mut self) {
        self.current.clear();
    }

    fn draw(&mut self, geometry: GeometryHandle, world: &Affine3A, view_projection: &Mat4) {
        self.current.push(DrawCall {
            geometry,
            world: *world,
            view_projection: *view_projection,
        });
    }

    fn end_frame(&mut self) {
        self.frames.push(std::mem::take(&mut self.current));
        if self.max_frames > 0 && self.frames.len() > self.max_frames {
            let excess = self.frames.len() - self.max_frames;
            self.frames.drain(..excess);
        }
    }
}
