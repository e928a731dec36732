//! Sun-style angle control for directional lights.
//!
//! Elevation 0 shines straight down (-Y); +-90 lies on the horizon. Azimuth is
//! measured with `atan2(x, z)`, so 0 faces +Z.

use glam::Vec3;

pub const ELEVATION_RANGE: (f32, f32) = (-90.0, 90.0);
pub const AZIMUTH_RANGE: (f32, f32) = (-180.0, 180.0);

/// Degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SunAngles {
    pub elevation: f32,
    pub azimuth: f32,
}

impl SunAngles {
    pub fn new(elevation: f32, azimuth: f32) -> Self {
        Self { elevation, azimuth }
    }

    /// Clamps both angles into the range the angle controls expose.
    pub fn clamped(self) -> Self {
        Self {
            elevation: self.elevation.clamp(ELEVATION_RANGE.0, ELEVATION_RANGE.1),
            azimuth: self.azimuth.clamp(AZIMUTH_RANGE.0, AZIMUTH_RANGE.1),
        }
    }
}

/// Unit light direction for the given angles.
pub fn angles_to_direction(angles: SunAngles) -> Vec3 {
    let elevation = (angles.elevation - 90.0).to_radians();
    let azimuth = angles.azimuth.to_radians();
    // Points from the scene toward the sun; light travels the other way.
    let toward_sun = Vec3::new(
        elevation.cos() * azimuth.sin(),
        -elevation.sin(),
        elevation.cos() * azimuth.cos(),
    );
    -toward_sun.normalize()
}

/// Angles for a unit light direction. Azimuth is 0 when `direction` is vertical.
pub fn direction_to_angles(direction: Vec3) -> SunAngles {
    let elevation = (-direction.y).clamp(-1.0, 1.0).asin().to_degrees() - 90.0;
    let azimuth = direction.x.atan2(direction.z).to_degrees();
    SunAngles { elevation, azimuth }
}
