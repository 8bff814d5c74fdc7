use crate::core::models::placement::{PlacedModule, Rotation};
use nalgebra::{Point3, Rotation3, Vector3};

/// Corner sign pattern, in the order the eight vertices are emitted.
const CORNER_SIGNS: [(f64, f64, f64); 8] = [
    (1.0, 1.0, 1.0),
    (-1.0, 1.0, 1.0),
    (1.0, -1.0, 1.0),
    (-1.0, -1.0, 1.0),
    (1.0, 1.0, -1.0),
    (-1.0, 1.0, -1.0),
    (1.0, -1.0, -1.0),
    (-1.0, -1.0, -1.0),
];

/// Orientation of a placement as a single rotation matrix.
///
/// Angles are Euler degrees applied to a local vector about Z first, then Y,
/// then X, so the composed matrix is `Rx * Ry * Rz`.
pub fn orientation(rotation: &Rotation) -> Rotation3<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), rotation.x.to_radians());
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), rotation.y.to_radians());
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), rotation.z.to_radians());
    rx * ry * rz
}

/// World-space corners of the placement's oriented box.
pub fn rotated_vertices(placement: &PlacedModule) -> [Point3<f64>; 8] {
    let half = placement.size.half_extents();
    let rotation = orientation(&placement.rotation);
    let center = placement.center();

    CORNER_SIGNS.map(|(sx, sy, sz)| {
        let local = Vector3::new(sx * half.x, sy * half.y, sz * half.z);
        center + rotation * local
    })
}

/// Strict interior test: points on a face of the box are outside.
pub fn point_in_oriented_box(point: &Point3<f64>, placement: &PlacedModule) -> bool {
    let half = placement.size.half_extents();
    let inverse = orientation(&placement.rotation).inverse();
    let local = inverse * (point - placement.center());

    local.x.abs() < half.x && local.y.abs() < half.y && local.z.abs() < half.z
}

#[inline]
pub fn distance(a: &PlacedModule, b: &PlacedModule) -> f64 {
    nalgebra::distance(&a.center(), &b.center())
}

/// Vertex-containment overlap heuristic.
///
/// Reports an overlap when any corner of one box lies strictly inside the
/// other. Boxes that interpenetrate without either containing a corner of the
/// other (a perpendicular "plus sign") are not detected. Two placements of the
/// same module id never overlap each other.
pub fn boxes_overlap(a: &PlacedModule, b: &PlacedModule) -> bool {
    if a.module_id == b.module_id {
        return false;
    }
    rotated_vertices(a)
        .iter()
        .any(|v| point_in_oriented_box(v, b))
        || rotated_vertices(b)
            .iter()
            .any(|v| point_in_oriented_box(v, a))
}
