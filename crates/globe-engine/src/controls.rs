//! Orbit controls: the camera circles a target point.
//!
//! Input and auto-rotation accumulate into a spherical delta that is applied
//! once per frame by [`OrbitControls::update`]. With damping enabled only a
//! fraction of the pending delta is applied each frame and the rest decays.

use crate::camera::PerspectiveCamera;
use crate::options::ControllerOptions;
use globe_core::constants::RESTRICTED_POLAR_ANGLE;
use glam::Vec3;
use std::f32::consts::PI;

/// Keeps the polar angle away from the poles where the view flips
const POLE_EPS: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around Y, measured from +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,

    pub enable_damping: bool,
    pub damping_factor: f32,

    pub auto_rotate: bool,
    /// 1.0 is one full turn per minute at 60 fps
    pub auto_rotate_speed: f32,

    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub screen_space_panning: bool,

    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            screen_space_panning: true,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Globe configuration: damped, slow auto-rotation, flags from options
    pub fn from_options(options: &ControllerOptions) -> Self {
        let mut controls = Self::new();
        if options.restrict_camera_angle {
            controls.max_polar_angle = RESTRICTED_POLAR_ANGLE as f32;
        }
        controls.screen_space_panning = false;
        controls.enable_zoom = options.enable_zoom;
        controls.enable_damping = true;
        controls.enable_pan = options.enable_pan;
        controls.damping_factor = 0.1;
        controls.auto_rotate = options.enable_auto_rotate;
        controls.auto_rotate_speed = 0.3;
        controls
    }

    pub fn auto_rotation_angle(&self) -> f32 {
        2.0 * PI / 60.0 / 60.0 * self.auto_rotate_speed
    }

    pub fn rotate_left(&mut self, angle: f32) {
        if self.enable_rotate {
            self.delta_theta -= angle;
        }
    }

    pub fn rotate_up(&mut self, angle: f32) {
        if self.enable_rotate {
            self.delta_phi -= angle;
        }
    }

    /// Scale > 1 moves the camera away from the target
    pub fn dolly(&mut self, scale: f32) {
        if self.enable_zoom && scale > 0.0 {
            self.scale *= scale;
        }
    }

    /// Move the target (and the camera with it). Without screen-space panning
    /// the vertical component is dropped so panning slides along the ground plane.
    pub fn pan(&mut self, offset: Vec3) {
        if !self.enable_pan {
            return;
        }
        let offset = if self.screen_space_panning {
            offset
        } else {
            Vec3::new(offset.x, 0.0, offset.z)
        };
        self.pan_offset += offset;
    }

    /// Apply pending motion to the camera; call once per frame.
    /// Returns true when the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let before = camera.position;
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        if self.auto_rotate {
            self.rotate_left(self.auto_rotation_angle());
        }

        if self.enable_damping {
            spherical.theta += self.delta_theta * self.damping_factor;
            spherical.phi += self.delta_phi * self.damping_factor;
        } else {
            spherical.theta += self.delta_theta;
            spherical.phi += self.delta_phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPS, PI - POLE_EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(before) > 1e-12
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}
