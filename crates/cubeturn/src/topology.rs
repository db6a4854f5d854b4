//! Grid topology: slot coordinates, world positions, and layer membership.
//!
//! Slot `i` sits at `x = (i % 9) / 3`, `y = i / 9`, `z = i % 3`. Everything in
//! this module is a pure function of the slot index; none of it depends on
//! which cubie currently occupies a slot.

use std::fmt;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::{CubeError, Face, LAYER_SIZE, SLOT_COUNT};

/// One of the 27 fixed grid cells that a cubie can occupy.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(try_from = "usize", into = "usize")]
pub struct Slot(u8);

impl Slot {
    /// Returns the slot with linear index `index`.
    pub fn new(index: usize) -> Result<Self, CubeError> {
        if index < SLOT_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(CubeError::SlotOutOfRange(index))
        }
    }

    /// Returns the slot at grid coordinates `[x, y, z]`, each in `0..3`.
    pub fn from_coords([x, y, z]: [u8; 3]) -> Result<Self, CubeError> {
        let index = 9 * y as usize + 3 * x as usize + z as usize;
        if x < 3 && y < 3 && z < 3 {
            Ok(Self(index as u8))
        } else {
            Err(CubeError::SlotOutOfRange(index))
        }
    }

    /// Returns the slot with linear index `index`, which must be less than 27.
    pub(crate) fn from_raw(index: u8) -> Self {
        debug_assert!((index as usize) < SLOT_COUNT);
        Self(index)
    }

    /// Returns the linear index of the slot.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the grid coordinates `[x, y, z]` of the slot.
    pub fn coords(self) -> [u8; 3] {
        let i = self.0;
        [(i % 9) / 3, i / 9, i % 3]
    }

    /// Returns an iterator over all slots in ascending index order.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator + Clone {
        (0..SLOT_COUNT as u8).map(Self)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

impl TryFrom<usize> for Slot {
    type Error = CubeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slot> for usize {
    fn from(slot: Slot) -> Self {
        slot.index()
    }
}

/// Returns whether `slot` belongs to `face`.
pub fn membership(face: Face, slot: Slot) -> bool {
    let i = slot.index();
    match face {
        Face::Bottom => i < 9,
        Face::Top => i > 17,
        Face::Back => i % 3 == 0,
        Face::Front => i % 3 == 2,
        Face::Left => i % 9 < 3,
        Face::Right => i % 9 > 5,
        Face::Horizontal => i / 9 == 1,
        Face::Vertical => (i % 9) / 3 == 1,
        Face::Parallel => i % 3 == 1,
    }
}

/// Returns the 9 slots belonging to `face` in ascending index order.
///
/// This order is the row-major 3x3 layout that the quarter-turn permutation
/// operates on.
pub fn face_slots(face: Face) -> [Slot; LAYER_SIZE] {
    let mut ret = [Slot::default(); LAYER_SIZE];
    let matching = Slot::iter().filter(|&slot| membership(face, slot));
    for (dst, slot) in ret.iter_mut().zip(matching) {
        *dst = slot;
    }
    ret
}

/// Returns the three layers containing `slot`, one per principal axis, in
/// X, Y, Z order.
pub fn layers_containing(slot: Slot) -> [Face; 3] {
    let [x, y, z] = slot.coords();
    [
        [Face::Left, Face::Vertical, Face::Right][x as usize],
        [Face::Bottom, Face::Horizontal, Face::Top][y as usize],
        [Face::Back, Face::Parallel, Face::Front][z as usize],
    ]
}

/// Returns the world position of the center of `slot`, with the middle
/// cubie at the origin and `pitch` units between neighboring slot centers.
pub fn slot_position(slot: Slot, pitch: f32) -> Vector3<f32> {
    let [x, y, z] = slot.coords();
    Vector3::new(x as f32 - 1.0, y as f32 - 1.0, z as f32 - 1.0) * pitch
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    fn slots(indices: [usize; LAYER_SIZE]) -> [Slot; LAYER_SIZE] {
        indices.map(|i| Slot::new(i).unwrap())
    }

    #[test]
    fn test_slot_coords_roundtrip() {
        for slot in Slot::iter() {
            assert_eq!(Slot::from_coords(slot.coords()), Ok(slot));
        }
        assert_eq!(Slot::new(27), Err(CubeError::SlotOutOfRange(27)));
        assert!(Slot::from_coords([3, 0, 0]).is_err());
    }

    #[test]
    fn test_face_slots() {
        let expected = [
            (Face::Bottom, [0, 1, 2, 3, 4, 5, 6, 7, 8]),
            (Face::Top, [18, 19, 20, 21, 22, 23, 24, 25, 26]),
            (Face::Back, [0, 3, 6, 9, 12, 15, 18, 21, 24]),
            (Face::Front, [2, 5, 8, 11, 14, 17, 20, 23, 26]),
            (Face::Left, [0, 1, 2, 9, 10, 11, 18, 19, 20]),
            (Face::Right, [6, 7, 8, 15, 16, 17, 24, 25, 26]),
            (Face::Horizontal, [9, 10, 11, 12, 13, 14, 15, 16, 17]),
            (Face::Vertical, [3, 4, 5, 12, 13, 14, 21, 22, 23]),
            (Face::Parallel, [1, 4, 7, 10, 13, 16, 19, 22, 25]),
        ];
        for (face, indices) in expected {
            assert_eq!(face_slots(face), slots(indices), "{face}");
        }
    }

    #[test]
    fn test_every_face_has_nine_slots() {
        for face in Face::iter() {
            let count = Slot::iter().filter(|&s| membership(face, s)).count();
            assert_eq!(count, LAYER_SIZE, "{face} has {count} slots");
        }
    }

    #[test]
    fn test_layers_containing_agrees_with_membership() {
        for slot in Slot::iter() {
            let layers = layers_containing(slot);
            for face in Face::iter() {
                let member = membership(face, slot);
                assert_eq!(layers.contains(&face), member, "{face} {slot}");
            }
        }
    }

    #[test]
    fn test_slot_position_is_centered() {
        let center = Slot::new(13).unwrap();
        assert_eq!(slot_position(center, 1.0), Vector3::new(0.0, 0.0, 0.0));
        let corner = Slot::new(26).unwrap();
        assert_eq!(slot_position(corner, 0.5), Vector3::new(0.5, 0.5, 0.5));
        let slot = Slot::from_coords([2, 0, 1]).unwrap();
        assert_eq!(slot_position(slot, 2.0), Vector3::new(2.0, -2.0, 0.0));
    }
}
