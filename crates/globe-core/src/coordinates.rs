use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

/// Equatorial coordinate pair as stored in the catalog (radians)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoord {
    /// Declination in radians
    pub dec: f64,
    /// Right ascension in radians
    pub ra: f64,
}

impl EquatorialCoord {
    pub fn new(dec: f64, ra: f64) -> Self {
        Self { dec, ra }
    }

    /// Catalog order is `[dec, ra]`
    pub fn from_pair(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    /// First stage of the placement chain: RA/Dec (radians) to globe
    /// latitude/longitude (degrees). Latitude is measured from the pole.
    pub fn to_lat_lon(&self) -> LatLon {
        LatLon {
            lat: 90.0 - (self.dec * 180.0) / PI,
            lon: (self.ra * 180.0) / PI,
        }
    }

    /// Full placement chain: RA/Dec -> lat/lon -> Cartesian
    pub fn to_cartesian(&self, radius: f64) -> CartesianPosition {
        self.to_lat_lon().to_cartesian(radius)
    }
}

/// Latitude/longitude on the globe (degrees)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Spherical to Cartesian with a 180° longitude offset and a flipped x axis,
    /// so the front of the globe faces the default camera at -Z.
    pub fn to_cartesian(&self, radius: f64) -> CartesianPosition {
        let phi = (90.0 - self.lat) * (PI / 180.0);
        let theta = (self.lon + 180.0) * (PI / 180.0);
        let sin_phi = phi.sin();

        CartesianPosition {
            x: -(radius * sin_phi * theta.cos()),
            y: radius * phi.cos(),
            z: radius * sin_phi * theta.sin(),
        }
    }
}

/// Scene-space Cartesian position (f64 for computation)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartesianPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Narrow to f32 for the scene graph
    pub fn as_vec3(&self) -> glam::Vec3 {
        glam::Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl From<CartesianPosition> for glam::DVec3 {
    fn from(p: CartesianPosition) -> Self {
        glam::DVec3::new(p.x, p.y, p.z)
    }
}
