//! Rotation axes for each face and layer.

use cgmath::Vector3;

use crate::Face;

/// Returns the unit rotation axis for turning `face`.
///
/// A positive turn is a right-handed quarter turn around this axis. Outer
/// faces use their outward normal; middle layers use the positive principal
/// axis. The axis is negated for a negative turn.
pub fn axis_for(face: Face, positive: bool) -> Vector3<f32> {
    let axis = match face {
        Face::Bottom => Vector3::new(0.0, -1.0, 0.0),
        Face::Top => Vector3::new(0.0, 1.0, 0.0),
        Face::Back => Vector3::new(0.0, 0.0, -1.0),
        Face::Front => Vector3::new(0.0, 0.0, 1.0),
        Face::Left => Vector3::new(-1.0, 0.0, 0.0),
        Face::Right => Vector3::new(1.0, 0.0, 0.0),
        Face::Horizontal => Vector3::new(0.0, 1.0, 0.0),
        Face::Vertical => Vector3::new(1.0, 0.0, 0.0),
        Face::Parallel => Vector3::new(0.0, 0.0, 1.0),
    };
    if positive { axis } else { -axis }
}

/// Returns whether the base quarter-turn cycle must be mirrored for `face`.
///
/// The row-major slot layout of each face is read in the same orientation
/// regardless of which way the axis points, so the cycle runs backwards for
/// these four.
pub fn is_reversed_handedness(face: Face) -> bool {
    match face {
        Face::Back | Face::Bottom | Face::Right | Face::Vertical => true,
        Face::Top | Face::Front | Face::Left | Face::Horizontal | Face::Parallel => false,
    }
}

/// Returns the index (0 for X, 1 for Y, 2 for Z) of the principal axis that a
/// face turns around.
pub(crate) fn axis_index(face: Face) -> usize {
    match face {
        Face::Left | Face::Right | Face::Vertical => 0,
        Face::Bottom | Face::Top | Face::Horizontal => 1,
        Face::Back | Face::Front | Face::Parallel => 2,
    }
}
