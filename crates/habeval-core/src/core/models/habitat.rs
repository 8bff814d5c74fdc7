use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Minimum extent, in meters, accepted for each habitat axis.
pub const MIN_HABITAT_EXTENT: f64 = 1.0;

/// Interior dimensions of the rectangular habitat volume, in meters.
///
/// The habitat occupies the axis-aligned box `[0, x] × [0, y] × [0, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitatDimensions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl HabitatDimensions {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Total interior volume in cubic meters.
    pub fn volume(&self) -> f64 {
        self.x * self.y * self.z
    }

    /// Length of the space diagonal, the largest distance two points inside can have.
    pub fn diagonal(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn min_extent(&self) -> f64 {
        self.x.min(self.y).min(self.z)
    }

    /// Closed-interval containment: a point lying exactly on a wall is inside.
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0.0..=self.x).contains(&point.x)
            && (0.0..=self.y).contains(&point.y)
            && (0.0..=self.z).contains(&point.z)
    }
}
