use super::ids::ModuleId;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Minimum extent, in meters, accepted for each module box axis.
pub const MIN_MODULE_EXTENT: f64 = 0.1;

/// Center of a placed module box, in habitat coordinates (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_point(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Full extents of a module box along its local axes (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Size {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    pub fn half_extents(&self) -> Vector3<f64> {
        Vector3::new(self.width / 2.0, self.height / 2.0, self.depth / 2.0)
    }

    pub fn min_extent(&self) -> f64 {
        self.width.min(self.height).min(self.depth)
    }
}

/// Euler angles in degrees about the habitat X, Y and Z axes.
///
/// The box is rotated about Z first, then Y, then X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

/// One module box placed inside the habitat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedModule {
    pub module_id: ModuleId,
    pub position: Position,
    pub size: Size,
    #[serde(default)]
    pub rotation: Rotation,
}

impl PlacedModule {
    pub fn new(module_id: ModuleId, position: Position, size: Size) -> Self {
        Self {
            module_id,
            position,
            size,
            rotation: Rotation::default(),
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Volume actually allotted to the module, compared against its catalog NHV.
    pub fn volume(&self) -> f64 {
        self.size.volume()
    }

    pub fn center(&self) -> Point3<f64> {
        self.position.to_point()
    }
}
