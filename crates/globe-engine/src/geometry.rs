/// Procedural geometry for star markers and decorative bands.

use glam::{EulerRot, Quat, Vec3};
use serde::Serialize;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug)]
pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: globe_core::constants::STAR_MARKER_RADIUS,
            width_segments: globe_core::constants::STAR_MARKER_SEGMENTS,
            height_segments: globe_core::constants::STAR_MARKER_SEGMENTS,
        }
    }
}

/// Indexed triangle mesh centred on the origin, shared by every star marker
#[derive(Clone, Debug, Default, Serialize)]
pub struct MarkerMesh {
    pub positions: Vec<[f32; 3]>,
    /// Triangle list, CCW winding
    pub indices: Vec<u32>,
}

impl MarkerMesh {
    pub fn sphere(opts: SphereOptions) -> Self {
        let stacks = opts.height_segments.max(2);
        let slices = opts.width_segments.max(3);

        let mut positions = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
        for stack in 0..=stacks {
            let (sin_phi, cos_phi) = (stack as f32 / stacks as f32 * PI).sin_cos();
            for slice in 0..=slices {
                let (sin_theta, cos_theta) = (slice as f32 / slices as f32 * 2.0 * PI).sin_cos();
                positions.push([
                    opts.radius * sin_phi * cos_theta,
                    opts.radius * cos_phi,
                    opts.radius * sin_phi * sin_theta,
                ]);
            }
        }

        let ring = slices + 1;
        let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);
        for stack in 0..stacks {
            for slice in 0..slices {
                let i0 = stack * ring + slice;
                let i1 = i0 + 1;
                let i2 = i0 + ring;
                let i3 = i2 + 1;
                indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
            }
        }

        Self { positions, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Points of a full ellipse in the XY plane, `segments + 1` of them (the
/// last repeats the first), rotated in-plane by `rotation` radians.
pub fn ellipse_points(x_radius: f32, y_radius: f32, segments: usize, rotation: f32) -> Vec<Vec3> {
    let segments = segments.max(3);
    let (sin_r, cos_r) = rotation.sin_cos();

    (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * 2.0 * PI;
            let x = x_radius * angle.cos();
            let y = y_radius * angle.sin();
            Vec3::new(cos_r * x - sin_r * y, sin_r * x + cos_r * y, 0.0)
        })
        .collect()
}

/// Rotate points by Euler angles applied in Z, Y, X order
pub fn rotate_zyx(points: &mut [Vec3], x: f32, y: f32, z: f32) {
    let q = Quat::from_euler(EulerRot::ZYX, z, y, x);
    for p in points {
        *p = q * *p;
    }
}

/// Axis-aligned bounds of a point set
pub fn bounds(points: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))))
}
