//! Slot assignment and the quarter-turn permutation.

use std::fmt;
use std::ops::Index;

use cgmath::{One, Quaternion, Vector3};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::orientation::{quarter_turn, snap_orientation};
use crate::topology::{self, Slot};
use crate::{Face, LAYER_SIZE, Move, SLOT_COUNT, axis_for, is_reversed_handedness};

/// One-step image of a quarter turn on a 3x3 grid in row-major order: after
/// the turn, position `k` holds what was at position `QUARTER_TURN_CYCLE[k]`.
///
/// Corners and edges move in the 8-cycle `(0 3 6 7 8 5 2 1)`; the center is
/// fixed.
const QUARTER_TURN_CYCLE: [usize; LAYER_SIZE] = [6, 3, 0, 7, 4, 1, 8, 5, 2];

/// Stable identity of one of the 27 physical pieces, including the hidden
/// center.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CubieId(pub u8);

impl CubieId {
    /// Returns the cubie ID as an index.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the slot this cubie occupies when the cube is solved.
    pub fn home_slot(self) -> Slot {
        Slot::from_raw(self.0)
    }

    /// Returns an iterator over all cubie IDs.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..SLOT_COUNT as u8).map(Self)
    }
}

impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubie {}", self.0)
    }
}

/// Returns the positions to gather from when committing `mv`.
///
/// After the turn, position `k` of the face's row-major layout holds the
/// cubie that was at position `quarter_turn_gather(mv)[k]`. The base cycle is
/// reversed when exactly one of these holds: the face has reversed
/// handedness, or the turn is negative.
pub fn quarter_turn_gather(mv: Move) -> [usize; LAYER_SIZE] {
    let mut gather = QUARTER_TURN_CYCLE;
    if is_reversed_handedness(mv.face) == mv.positive {
        gather.reverse();
    }
    gather
}

/// Assignment of cubies to slots.
///
/// This is always a permutation of the 27 cubie IDs and is the only record
/// of which cubie is where.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct CubeOrder([CubieId; SLOT_COUNT]);

impl Default for CubeOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CubeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().map(|c| c.0).join(" "))
    }
}

impl Index<Slot> for CubeOrder {
    type Output = CubieId;

    fn index(&self, slot: Slot) -> &Self::Output {
        &self.0[slot.index()]
    }
}

impl CubeOrder {
    /// Returns the solved arrangement, with cubie `i` in slot `i`.
    pub fn new() -> Self {
        Self(std::array::from_fn(|i| CubieId(i as u8)))
    }

    /// Returns the cubie in `slot`.
    pub fn cubie_at(&self, slot: Slot) -> CubieId {
        self[slot]
    }

    /// Returns the slot containing `cubie`.
    pub fn slot_of(&self, cubie: CubieId) -> Slot {
        match self.0.iter().position(|&c| c == cubie) {
            Some(i) => Slot::from_raw(i as u8),
            None => {
                debug_panic!("{cubie} is missing from {self}");
                cubie.home_slot()
            }
        }
    }

    /// Returns the slots of `face`. Slots are fixed positions, so this does
    /// not depend on the current arrangement.
    pub fn slots_for_face(&self, face: Face) -> [Slot; LAYER_SIZE] {
        topology::face_slots(face)
    }

    /// Returns the cubies currently in `face`, in slot order.
    pub fn cubies_in_face(&self, face: Face) -> [CubieId; LAYER_SIZE] {
        self.slots_for_face(face).map(|slot| self[slot])
    }

    /// Returns an iterator over each slot and the cubie in it.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, CubieId)> + '_ {
        Slot::iter().map(|slot| (slot, self[slot]))
    }

    /// Returns whether every cubie is in its home slot.
    pub fn is_solved(&self) -> bool {
        self.iter().all(|(slot, cubie)| slot == cubie.home_slot())
    }

    /// Returns whether every cubie ID appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; SLOT_COUNT];
        for cubie in self.0 {
            match seen.get_mut(cubie.index()) {
                Some(s) if !*s => *s = true,
                _ => return false,
            }
        }
        true
    }

    /// Permutes the 9 slots of `mv.face` as a completed quarter turn.
    pub fn commit_turn(&mut self, mv: Move) {
        let slots = self.slots_for_face(mv.face);
        let before = self.cubies_in_face(mv.face);
        for (slot, src) in std::iter::zip(slots, quarter_turn_gather(mv)) {
            self.0[slot.index()] = before[src];
        }

        if !self.is_permutation() {
            debug_panic!("cube order is not a permutation after {mv}: {self}");
        }
    }
}

/// Visual transform of one physical piece.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cubie {
    /// Stable identity.
    pub id: CubieId,
    /// Orientation relative to the solved state.
    pub orientation: Quaternion<f32>,
    /// Position of the cubie's center, with the middle cubie at the origin.
    ///
    /// This follows from the cubie's slot while the cube is at rest and is
    /// interpolated during a turn.
    pub position: Vector3<f32>,
}

/// Cube arrangement plus the transform of every cubie.
#[derive(Debug, Clone)]
pub struct CubeState {
    order: CubeOrder,
    cubies: Vec<Cubie>,
    pitch: f32,
}

impl CubeState {
    /// Constructs a solved cube with `pitch` units between neighboring slot
    /// centers.
    pub fn new(pitch: f32) -> Self {
        let cubies = CubieId::iter()
            .map(|id| Cubie {
                id,
                orientation: Quaternion::one(),
                position: topology::slot_position(id.home_slot(), pitch),
            })
            .collect();
        Self {
            order: CubeOrder::new(),
            cubies,
            pitch,
        }
    }

    /// Returns the slot assignment.
    pub fn order(&self) -> &CubeOrder {
        &self.order
    }

    /// Returns all cubies, indexed by ID.
    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    /// Returns a cubie.
    pub fn cubie(&self, id: CubieId) -> &Cubie {
        &self.cubies[id.index()]
    }
    pub(crate) fn cubie_mut(&mut self, id: CubieId) -> &mut Cubie {
        &mut self.cubies[id.index()]
    }

    /// Returns the distance between neighboring slot centers.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Returns the resting position of `slot`.
    pub fn slot_position(&self, slot: Slot) -> Vector3<f32> {
        topology::slot_position(slot, self.pitch)
    }

    /// Commits `mv` to the slot assignment and snaps every cubie in the face
    /// to the exact resting transform of its new slot.
    ///
    /// The caller is responsible for having already rotated the orientation
    /// of those cubies by the turn.
    pub(crate) fn commit_turn(&mut self, mv: Move) {
        self.order.commit_turn(mv);
        for slot in self.order.slots_for_face(mv.face) {
            let position = self.slot_position(slot);
            let id = self.order[slot];
            let cubie = self.cubie_mut(id);
            cubie.position = position;
            cubie.orientation = snap_orientation(cubie.orientation);
        }
    }

    /// Applies `mv` immediately with no animation.
    pub fn apply_turn(&mut self, mv: Move) {
        let rotation = quarter_turn(axis_for(mv.face, mv.positive));
        for cubie in self.order.cubies_in_face(mv.face) {
            let cubie = self.cubie_mut(cubie);
            cubie.orientation = rotation * cubie.orientation;
        }
        self.commit_turn(mv);
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Rotation};
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    fn assert_invariants(order: &CubeOrder) {
        assert!(order.is_permutation(), "{order:?}");
        for face in Face::iter() {
            let mut cubies = order.cubies_in_face(face).to_vec();
            cubies.sort();
            cubies.dedup();
            assert_eq!(cubies.len(), LAYER_SIZE, "{face}");
        }
    }

    #[test]
    fn test_right_turn_scenario() {
        let mut order = CubeOrder::new();
        let ci = order.slots_for_face(Face::Right).map(|s| s.index() as u8);
        order.commit_turn(Move::new(Face::Right, true));

        let gather = [6, 3, 0, 7, 4, 1, 8, 5, 2];
        let mut expected = gather.map(|k| ci[k]);
        expected.reverse();
        assert_eq!(order.cubies_in_face(Face::Right), expected.map(CubieId));
        assert_eq!(expected, [8, 17, 26, 7, 16, 25, 6, 15, 24]);
        assert_invariants(&order);
    }

    #[test]
    fn test_turn_then_inverse_restores() {
        for face in Face::iter() {
            for positive in [true, false] {
                let mut order = CubeOrder::new();
                order.commit_turn(Move::new(Face::Top, true));
                order.commit_turn(Move::new(Face::Front, false));
                let before = order.clone();

                let mv = Move::new(face, positive);
                order.commit_turn(mv);
                assert_ne!(order, before, "{mv} had no effect");
                order.commit_turn(mv.inverse());
                assert_eq!(order, before, "{mv} was not undone");
            }
        }
    }

    #[test]
    fn test_quarter_turn_has_order_four() {
        for face in Face::iter() {
            for positive in [true, false] {
                let mut order = CubeOrder::new();
                let mv = Move::new(face, positive);
                for i in 0..4 {
                    assert_eq!(order.is_solved(), i == 0);
                    order.commit_turn(mv);
                    assert_invariants(&order);
                }
                assert!(order.is_solved(), "{mv} x4 did not restore");
            }
        }
    }

    #[test]
    fn test_commit_agrees_with_geometric_rotation() {
        // Each cubie's new slot must be where the rotation actually carries
        // its old slot.
        for face in Face::iter() {
            for positive in [true, false] {
                let mv = Move::new(face, positive);
                let rotation = quarter_turn(axis_for(face, positive));
                let before = CubeOrder::new();
                let mut after = before.clone();
                after.commit_turn(mv);
                for slot in face.slots() {
                    let cubie = before[slot];
                    let expected = rotation.rotate_vector(topology::slot_position(slot, 1.0));
                    let actual = topology::slot_position(after.slot_of(cubie), 1.0);
                    let distance = (expected - actual).magnitude();
                    assert!(distance < crate::EPSILON, "{mv} {slot}");
                }
            }
        }
    }

    #[test]
    fn test_reversed_gather_is_inverse() {
        for face in Face::iter() {
            let forward = quarter_turn_gather(Move::new(face, true));
            let backward = quarter_turn_gather(Move::new(face, false));
            for k in 0..LAYER_SIZE {
                assert_eq!(forward[backward[k]], k);
            }
            assert_eq!(forward[4], 4);
        }
    }

    #[test]
    fn test_display() {
        let mut order = CubeOrder::new();
        assert!(order.to_string().starts_with("[0 1 2 3 "));
        order.commit_turn(Move::new(Face::Bottom, true));
        assert_eq!(order.to_string().split(' ').count(), SLOT_COUNT);
    }

    #[test]
    fn test_slot_of() {
        let mut order = CubeOrder::new();
        order.commit_turn(Move::new(Face::Vertical, true));
        for (slot, cubie) in order.iter() {
            assert_eq!(order.slot_of(cubie), slot);
            assert_eq!(order.cubie_at(slot), cubie);
        }
        let center = Slot::new(13).unwrap();
        assert_eq!(order.cubie_at(center), CubieId(13));
        let top_middle = Slot::new(22).unwrap();
        assert_eq!(order.cubie_at(top_middle), CubieId(12));
    }

    #[test]
    fn test_apply_turn_snaps_transforms() {
        let mut state = CubeState::new(1.0);
        let mv = Move::new(Face::Front, true);
        state.apply_turn(mv);
        for slot in Face::Front.slots() {
            let cubie = state.cubie(state.order()[slot]);
            assert_eq!(cubie.position, state.slot_position(slot));
            let q = cubie.orientation;
            assert!(crate::cube_rotations().iter().any(|&r| r == q || -r == q));
        }
        for _ in 0..3 {
            state.apply_turn(mv);
        }
        assert!(state.order().is_solved());
        for cubie in state.cubies() {
            // A full turn is the identity rotation, possibly with flipped sign.
            assert_eq!(cubie.orientation.s.abs(), 1.0, "{}", cubie.id);
        }
    }
}
