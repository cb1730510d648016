//! Coordinate math, colors and themes shared by the catalog tools and the
//! globe engine.

pub mod color;
pub mod constants;
pub mod coordinates;


pub use color::{Color, Theme};
pub use coordinates::{CartesianPosition, EquatorialCoord, LatLon};
