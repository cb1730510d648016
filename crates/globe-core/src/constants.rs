use std::f64::consts::PI;

/// Radius of the base globe sphere
pub const DEFAULT_RADIUS: f64 = 1.0;

/// Markers, lines and bands sit slightly above the base sphere to avoid z-fighting
pub const SURFACE_OFFSET: f64 = 1.02;

/// Radius of a single star marker (scene units, independent of data)
pub const STAR_MARKER_RADIUS: f32 = 0.01;

/// Width/height segments of the star marker sphere
pub const STAR_MARKER_SEGMENTS: u32 = 6;

/// Number of decorative bands around the globe
pub const BAND_COUNT: usize = 5;

/// Segments per band ellipse (the curve has one more point than this)
pub const BAND_SEGMENTS: usize = 50;

/// In-plane rotation of every band ellipse
pub const BAND_ROTATION: f64 = 0.3 * PI;

/// Fog distances: front of the globe as seen from the default camera
pub const FOG_NEAR: f32 = 5.0;

/// Fog distances: back of the globe
pub const FOG_FAR: f32 = 7.0;

/// Default camera placement, looking back at the origin
pub const CAMERA_START: [f32; 3] = [0.0, 0.0, -6.0];

/// Camera frustum
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Polar angle limit applied when the camera angle is restricted
pub const RESTRICTED_POLAR_ANGLE: f64 = 0.45 * PI;
