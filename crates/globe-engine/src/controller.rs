//! Controller: owns the scene, camera and orbit controls and drives a render
//! backend from host-scheduled animation frames.

use crate::backend::{Host, RenderBackend, Viewport};
use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::error::{EngineError, EngineResult};
use crate::event::Event;
use crate::options::ControllerOptions;
use crate::scene::{LineKind, NodeId, Scene, SceneNode};
use globe_core::Color;
use glam::Vec3;

/// What a single animation frame callback did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Next frame requested and the scene rendered
    Rendered,
    /// Loop was stopped; nothing scheduled, nothing drawn
    Stopped,
}

pub struct Controller<B: RenderBackend, H: Host> {
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    backend: B,
    host: H,
    options: ControllerOptions,
    animating: bool,
    /// A frame callback is queued with the host and has not run yet
    frame_pending: bool,
    frames: u64,
    /// Fired after the controller has applied a viewport change
    pub resize: Event<Viewport>,
}

impl<B: RenderBackend, H: Host> Controller<B, H> {
    pub fn new(backend: B, host: H, options: ControllerOptions) -> Self {
        let aspect = host.viewport().aspect();
        let camera = PerspectiveCamera::new(options.field_of_view, aspect);
        let controls = OrbitControls::from_options(&options);

        let mut controller = Self {
            scene: Scene::new(),
            camera,
            controls,
            backend,
            host,
            options,
            animating: false,
            frame_pending: false,
            frames: 0,
            resize: Event::new(),
        };
        controller.handle_resize();
        controller
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Frames rendered since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Re-read the host viewport: camera aspect follows it and the backend is
    /// sized to `viewport * pixel_ratio`. Then notifies `resize` listeners.
    pub fn handle_resize(&mut self) {
        let viewport = self.host.viewport();
        self.camera.set_aspect(viewport.aspect());

        let ratio = self.options.pixel_ratio;
        let width = (viewport.width * ratio).round().max(0.0) as u32;
        let height = (viewport.height * ratio).round().max(0.0) as u32;
        self.backend.set_size(width, height);

        self.resize.emit(&viewport);
    }

    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera.position = position;
    }

    /// Point the camera at `target` and orbit around it
    pub fn set_camera_focus(&mut self, target: Vec3) {
        self.camera.look_at(target);
        self.controls.target = target;
    }

    /// Point the camera at the bounding-box centre of a scene node
    pub fn set_camera_focus_node(&mut self, id: NodeId) -> EngineResult<()> {
        let center = self
            .scene
            .get(id)
            .and_then(SceneNode::center)
            .ok_or(EngineError::UnknownNode(id.0))?;
        self.set_camera_focus(center);
        Ok(())
    }

    /// Red, green and blue lines along X, Y and Z from `origin`
    pub fn add_axis_helper(&mut self, origin: Vec3, size: f32) -> [NodeId; 3] {
        [(Vec3::X, Color::RED), (Vec3::Y, Color::GREEN), (Vec3::Z, Color::BLUE)].map(|(axis, color)| {
            self.scene.add(SceneNode::Line {
                kind: LineKind::Axis,
                points: vec![origin, origin + axis * size],
                color,
            })
        })
    }

    pub fn set_theme_attribute(&mut self, value: &str) {
        self.host.set_theme_attribute(value);
    }

    /// Drag input in radians; applied on the next frame
    pub fn rotate_camera(&mut self, dx: f32, dy: f32) {
        self.controls.rotate_left(dx);
        self.controls.rotate_up(dy);
    }

    /// Wheel input; ignored unless zoom is enabled
    pub fn dolly_camera(&mut self, scale: f32) {
        self.controls.dolly(scale);
    }

    /// Ignored unless pan is enabled
    pub fn pan_camera(&mut self, offset: Vec3) {
        self.controls.pan(offset);
    }

    pub fn start_animation_loop(&mut self) -> EngineResult<()> {
        if self.animating {
            return Err(EngineError::InvalidState("Animation already started"));
        }
        self.animating = true;
        tracing::debug!("Animation loop started");

        // A frame queued before the last stop picks the loop back up
        if !self.frame_pending {
            self.animation_frame();
        }
        Ok(())
    }

    /// Takes effect at the top of the next frame: the already queued frame
    /// still runs and returns [`FrameOutcome::Stopped`].
    pub fn stop_animation_loop(&mut self) -> EngineResult<()> {
        if !self.animating {
            return Err(EngineError::InvalidState("Animation not started"));
        }
        self.animating = false;
        tracing::debug!("Animation loop stopped after {} frames", self.frames);
        Ok(())
    }

    /// Body of the frame callback the host invokes
    pub fn animation_frame(&mut self) -> FrameOutcome {
        self.frame_pending = false;
        if !self.animating {
            return FrameOutcome::Stopped;
        }
        self.frame_pending = true;
        self.host.request_animation_frame();
        self.render_animation_frame();
        FrameOutcome::Rendered
    }

    fn render_animation_frame(&mut self) {
        self.controls.update(&mut self.camera);
        self.backend.render(&self.scene, &self.camera);
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BufferBackend, ManualHost};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller() -> Controller<BufferBackend, ManualHost> {
        Controller::new(
            BufferBackend::default(),
            ManualHost::new(Viewport::new(800.0, 400.0)),
            ControllerOptions { pixel_ratio: 2.0, ..Default::default() },
        )
    }

    #[test]
    fn test_construction_applies_viewport() {
        let c = controller();
        assert_eq!(c.camera().aspect, 2.0);
        assert_eq!(c.camera().fov_y, 45.0);
        assert_eq!(c.backend().size, (1600, 800));
    }

    #[test]
    fn test_start_twice_is_invalid() {
        let mut c = controller();
        c.start_animation_loop().unwrap();
        let err = c.start_animation_loop().unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
        assert!(c.is_animating());
    }

    #[test]
    fn test_stop_when_not_started_is_invalid() {
        let mut c = controller();
        assert!(matches!(c.stop_animation_loop(), Err(EngineError::InvalidState(_))));

        c.start_animation_loop().unwrap();
        c.stop_animation_loop().unwrap();
        assert!(matches!(c.stop_animation_loop(), Err(EngineError::InvalidState(_))));
    }

    #[test]
    fn test_frames_reschedule_until_stopped() {
        let mut c = controller();
        c.start_animation_loop().unwrap();
        assert_eq!(c.frames(), 1);
        assert_eq!(c.host().pending_frames(), 1);

        for _ in 0..3 {
            assert!(c.host_mut().take_frame());
            assert_eq!(c.animation_frame(), FrameOutcome::Rendered);
        }
        assert_eq!(c.frames(), 4);
        assert_eq!(c.backend().frames, 4);

        c.stop_animation_loop().unwrap();
        // The frame queued before stop runs once as a no-op
        assert!(c.host_mut().take_frame());
        assert_eq!(c.animation_frame(), FrameOutcome::Stopped);
        assert!(!c.host_mut().take_frame());
        assert_eq!(c.frames(), 4);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut c = controller();
        c.start_animation_loop().unwrap();
        c.stop_animation_loop().unwrap();
        c.start_animation_loop().unwrap();
        assert!(c.is_animating());
    }

    #[test]
    fn test_restart_before_queued_frame_keeps_one_chain() {
        let mut c = controller();
        c.start_animation_loop().unwrap();
        c.stop_animation_loop().unwrap();
        c.start_animation_loop().unwrap();
        assert_eq!(c.host().pending_frames(), 1);
        assert_eq!(c.frames(), 1);

        for tick in 0..3u64 {
            assert!(c.host_mut().take_frame());
            assert_eq!(c.animation_frame(), FrameOutcome::Rendered);
            assert_eq!(c.host().pending_frames(), 1);
            assert_eq!(c.frames(), 2 + tick);
        }
    }

    #[test]
    fn test_restart_after_queued_frame_ran() {
        let mut c = controller();
        c.start_animation_loop().unwrap();
        c.stop_animation_loop().unwrap();
        assert!(c.host_mut().take_frame());
        assert_eq!(c.animation_frame(), FrameOutcome::Stopped);

        c.start_animation_loop().unwrap();
        assert_eq!(c.host().pending_frames(), 1);
        assert_eq!(c.frames(), 2);
    }

    fn still_controller(options: ControllerOptions) -> Controller<BufferBackend, ManualHost> {
        let mut c = Controller::new(
            BufferBackend::default(),
            ManualHost::default(),
            ControllerOptions { enable_auto_rotate: false, ..options },
        );
        c.set_camera_position(Vec3::new(0.0, 0.0, -6.0));
        c.set_camera_focus(Vec3::ZERO);
        c
    }

    fn settle(c: &mut Controller<BufferBackend, ManualHost>) {
        if !c.is_animating() {
            c.start_animation_loop().unwrap();
        }
        for _ in 0..200 {
            assert!(c.host_mut().take_frame());
            c.animation_frame();
        }
    }

    #[test]
    fn test_zoom_and_pan_gated_by_options() {
        let mut c = still_controller(ControllerOptions::default());
        c.dolly_camera(2.0);
        c.pan_camera(Vec3::new(1.0, 0.0, 1.0));
        settle(&mut c);

        assert!((c.camera().position.length() - 6.0).abs() < 1e-4);
        assert_eq!(c.controls().target, Vec3::ZERO);
    }

    #[test]
    fn test_zoom_and_pan_apply_when_enabled() {
        let mut c = still_controller(ControllerOptions {
            enable_zoom: true,
            enable_pan: true,
            ..Default::default()
        });
        c.dolly_camera(0.5);
        c.pan_camera(Vec3::new(1.0, 5.0, 0.0));
        settle(&mut c);

        let target = c.controls().target;
        assert!((c.camera().position.distance(target) - 3.0).abs() < 1e-3);
        // Ground-plane panning keeps the target's height
        assert!(target.x > 0.9);
        assert_eq!(target.y, 0.0);
    }

    #[test]
    fn test_rotate_moves_camera_around_target() {
        let mut c = still_controller(ControllerOptions::default());
        c.rotate_camera(0.5, 0.0);
        settle(&mut c);

        let position = c.camera().position;
        assert!((position.length() - 6.0).abs() < 1e-3);
        assert!(position.x.abs() > 1.0);
        assert!(position.y.abs() < 1e-4);
    }

    #[test]
    fn test_resize_listener_sees_new_viewport() {
        let mut c = controller();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        c.resize.on(move |v: &Viewport| s.borrow_mut().push(*v));

        c.host_mut().viewport = Viewport::new(300.0, 300.0);
        c.handle_resize();

        assert_eq!(*seen.borrow(), vec![Viewport::new(300.0, 300.0)]);
        assert_eq!(c.camera().aspect, 1.0);
        assert_eq!(c.backend().size, (600, 600));
    }

    #[test]
    fn test_focus_node_and_axis_helper() {
        let mut c = controller();
        let [x, _, _] = c.add_axis_helper(Vec3::ZERO, 2.0);
        c.set_camera_focus_node(x).unwrap();
        assert_eq!(c.controls().target, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(c.camera().target, Vec3::new(1.0, 0.0, 0.0));
        assert!(matches!(c.set_camera_focus_node(NodeId(99)), Err(EngineError::UnknownNode(99))));
    }
}
