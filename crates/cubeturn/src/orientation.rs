//! Quaternion helpers for cubie orientations.

use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2};
use std::sync::LazyLock;

use cgmath::{InnerSpace, One, Quaternion, Rad, Rotation3, Vector3};
use float_ord::FloatOrd;

/// Number of orientations of a cube.
const CUBE_ROTATION_COUNT: usize = 24;

/// Every component of a cube rotation quaternion is one of these, up to sign.
const EXACT_COMPONENTS: [f32; 4] = [0.0, 0.5, FRAC_1_SQRT_2, 1.0];

static CUBE_ROTATIONS: LazyLock<Vec<Quaternion<f32>>> = LazyLock::new(|| {
    let axes = [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()];
    let generators = axes.map(quarter_turn);

    let mut rotations = vec![Quaternion::one()];
    let mut i = 0;
    while i < rotations.len() {
        for g in generators {
            let new = exact_components(g * rotations[i]);
            if !rotations.iter().any(|&q| same_rotation(q, new)) {
                rotations.push(new);
            }
        }
        i += 1;
    }
    debug_assert_eq!(rotations.len(), CUBE_ROTATION_COUNT);
    rotations
});

/// Returns the unit quaternion for a right-handed quarter turn around `axis`.
pub(crate) fn quarter_turn(axis: Vector3<f32>) -> Quaternion<f32> {
    Quaternion::from_axis_angle(axis, Rad(FRAC_PI_2))
}

/// Returns the 24 rotations that map the cube grid onto itself.
pub fn cube_rotations() -> &'static [Quaternion<f32>] {
    &CUBE_ROTATIONS
}

/// Returns the angle of the rotation that takes `a` to `b`, in `[0, π]`.
pub(crate) fn angle_between(a: Quaternion<f32>, b: Quaternion<f32>) -> f32 {
    2.0 * a.dot(b).abs().clamp(-1.0, 1.0).acos()
}

/// Rotates `current` toward `target` by at most `step` radians, landing
/// exactly on `target` rather than passing it.
pub fn rotate_towards(
    current: Quaternion<f32>,
    target: Quaternion<f32>,
    step: f32,
) -> Quaternion<f32> {
    let angle = angle_between(current, target);
    if angle == 0.0 || step >= angle {
        return target;
    }
    current.slerp(target, step / angle)
}

/// Returns the cube rotation nearest to `q`, with the same sign convention
/// as `q`.
///
/// Turn animations accumulate floating-point error in the orientation of
/// each cubie. Snapping after each completed turn keeps every resting
/// orientation an exact multiple of 90 degrees.
pub fn snap_orientation(q: Quaternion<f32>) -> Quaternion<f32> {
    let nearest = CUBE_ROTATIONS
        .iter()
        .copied()
        .max_by_key(|&r| FloatOrd(r.dot(q).abs()))
        .unwrap_or_else(Quaternion::one);
    if nearest.dot(q) < 0.0 { -nearest } else { nearest }
}

fn same_rotation(a: Quaternion<f32>, b: Quaternion<f32>) -> bool {
    a.dot(b).abs() > 1.0 - crate::EPSILON
}

/// Rounds each component of `q` to the nearest value a cube rotation can
/// have.
fn exact_components(q: Quaternion<f32>) -> Quaternion<f32> {
    let round = |x: f32| {
        let magnitude = EXACT_COMPONENTS
            .into_iter()
            .min_by_key(|&c| FloatOrd((x.abs() - c).abs()))
            .unwrap_or(0.0);
        magnitude.copysign(x)
    };
    Quaternion::new(round(q.s), round(q.v.x), round(q.v.y), round(q.v.z))
}

#[cfg(test)]
mod tests {
    use cgmath::Rotation;
    use itertools::Itertools;

    use super::*;

    fn assert_vectors_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < crate::EPSILON, "{a:?} != {b:?}");
    }

    #[test]
    fn test_cube_rotations_are_distinct_and_axis_preserving() {
        let rotations = cube_rotations();
        assert_eq!(rotations.len(), CUBE_ROTATION_COUNT);
        for (a, b) in rotations.iter().tuple_combinations() {
            assert!(!same_rotation(*a, *b), "{a:?} and {b:?} are the same");
        }
        for q in rotations {
            assert!((q.magnitude() - 1.0).abs() < 1e-6);
            let image = q.rotate_vector(Vector3::unit_x());
            let components = [image.x, image.y, image.z];
            let ones = components.iter().filter(|c| (c.abs() - 1.0).abs() < 1e-6);
            assert_eq!(ones.count(), 1, "{q:?} sends X to {image:?}");
        }
    }

    #[test]
    fn test_snap_removes_drift() {
        let turn = quarter_turn(Vector3::unit_y());
        let drift = Quaternion::new(0.003, -0.002, 0.0, 0.001);
        let drifted = turn + drift;
        let snapped = snap_orientation(drifted.normalize());
        assert_eq!(snapped, exact_components(turn));
        assert!(cube_rotations().contains(&snapped));

        // Sign of the input is preserved.
        let snapped_neg = snap_orientation(-drifted.normalize());
        assert_eq!(snapped_neg, -snapped);
    }

    #[test]
    fn test_snap_is_identity_on_cube_rotations() {
        for &q in cube_rotations() {
            assert_eq!(snap_orientation(q), q);
        }
    }

    #[test]
    fn test_rotate_towards_constant_speed() {
        let start = Quaternion::one();
        let target = quarter_turn(Vector3::unit_z());
        assert!((angle_between(start, target) - FRAC_PI_2).abs() < 1e-5);

        let mut q = start;
        for i in 1..=4 {
            q = rotate_towards(q, target, FRAC_PI_2 / 5.0);
            let turned = angle_between(start, q);
            assert!((turned - i as f32 * FRAC_PI_2 / 5.0).abs() < 1e-4);
        }
        // The last step would pass the target, so it stops there exactly.
        q = rotate_towards(q, target, FRAC_PI_2);
        assert_eq!(q, target);
        assert_eq!(rotate_towards(target, target, 1.0), target);
    }

    #[test]
    fn test_quarter_turn_direction() {
        let q = quarter_turn(Vector3::unit_x());
        assert_vectors_close(q.rotate_vector(Vector3::unit_y()), Vector3::unit_z());
        let q = quarter_turn(Vector3::unit_y());
        assert_vectors_close(q.rotate_vector(Vector3::unit_z()), Vector3::unit_x());
        let q = quarter_turn(Vector3::unit_z());
        assert_vectors_close(q.rotate_vector(Vector3::unit_x()), Vector3::unit_y());
    }
}
