//! Seams to the rendering backend and to the host environment.
//!
//! The engine never draws anything itself: a [`RenderBackend`] turns the
//! scene graph into pixels, and a [`Host`] provides the viewport size, frame
//! scheduling and the document-level theme attribute. [`BufferBackend`] and
//! [`ManualHost`] are in-memory implementations used by the CLI, the wasm
//! binding (where the browser side does the drawing) and tests.

use crate::camera::{CameraUniform, PerspectiveCamera};
use crate::scene::Scene;
use serde::Serialize;

/// Size of the element the globe is mounted into (CSS pixels)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

pub trait RenderBackend {
    /// Size of the drawing buffer in device pixels
    fn set_size(&mut self, width: u32, height: u32);

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera);
}

pub trait Host {
    fn viewport(&self) -> Viewport;

    /// Ask the host to call back into the animation loop on its next frame
    fn request_animation_frame(&mut self);

    fn set_theme_attribute(&mut self, _value: &str) {}
}

/// Backend that keeps the last camera uniform and frame statistics instead
/// of drawing
#[derive(Clone, Debug, Default)]
pub struct BufferBackend {
    pub size: (u32, u32),
    pub frames: u64,
    pub last_uniform: Option<CameraUniform>,
    pub last_node_count: usize,
}

impl RenderBackend for BufferBackend {
    fn set_size(&mut self, width: u32, height: u32) {
        tracing::debug!("Backend size {}x{}", width, height);
        self.size = (width, height);
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        self.frames += 1;
        self.last_uniform = Some(CameraUniform::from_camera(camera));
        self.last_node_count = scene.len();
    }
}

/// Host whose frames are driven by the caller: requested frames queue up
/// until [`ManualHost::take_frame`] consumes them.
#[derive(Clone, Debug)]
pub struct ManualHost {
    pub viewport: Viewport,
    pending_frames: usize,
    requested_frames: u64,
    theme_attribute: Option<String>,
}

impl ManualHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pending_frames: 0,
            requested_frames: 0,
            theme_attribute: None,
        }
    }

    /// Consume one queued frame callback
    pub fn take_frame(&mut self) -> bool {
        if self.pending_frames == 0 {
            return false;
        }
        self.pending_frames -= 1;
        true
    }

    pub fn pending_frames(&self) -> usize {
        self.pending_frames
    }

    pub fn requested_frames(&self) -> u64 {
        self.requested_frames
    }

    pub fn theme_attribute(&self) -> Option<&str> {
        self.theme_attribute.as_deref()
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new(Viewport::new(1280.0, 720.0))
    }
}

impl Host for ManualHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_animation_frame(&mut self) {
        self.pending_frames += 1;
        self.requested_frames += 1;
    }

    fn set_theme_attribute(&mut self, value: &str) {
        self.theme_attribute = Some(value.to_string());
    }
}
