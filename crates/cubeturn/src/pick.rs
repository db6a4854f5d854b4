//! Mapping a picked sticker to the layers it can be dragged along.
//!
//! Hit-testing is done by the caller, which reports the slot under the cursor
//! and the outward normal of the surface that was hit. Deciding which of the
//! candidate layers a drag gesture means is left to a [`DragResolver`].

use cgmath::{InnerSpace, Point2, Vector2, Vector3};
use smallvec::SmallVec;

use crate::topology::{self, Slot};
use crate::{CubeError, EPSILON, Face, Move};

/// Faces and layers that a picked sticker can be dragged along.
pub type DragCandidates = SmallVec<[Face; 3]>;

/// Returns the outer face whose outward direction is `normal`.
///
/// `normal` need not be unit length, but it must point along a principal
/// axis.
pub fn normal_face(normal: Vector3<f32>) -> Result<Face, CubeError> {
    let err = CubeError::NormalNotAxisAligned(normal);
    let magnitude = normal.magnitude();
    if !magnitude.is_finite() || magnitude < EPSILON {
        return Err(err);
    }
    let n = normal / magnitude;

    let (k, max) = (0..3)
        .map(|k| (k, n[k]))
        .max_by_key(|&(_, c)| float_ord::FloatOrd(c.abs()))
        .ok_or_else(|| err.clone())?;
    if (max.abs() - 1.0).abs() > EPSILON {
        return Err(err);
    }
    Ok(match (k, max > 0.0) {
        (0, true) => Face::Right,
        (0, false) => Face::Left,
        (1, true) => Face::Top,
        (1, false) => Face::Bottom,
        (_, true) => Face::Front,
        (_, false) => Face::Back,
    })
}

/// Returns every face or layer that contains `slot` except the one facing
/// along `normal`.
///
/// For a sticker on an outer face this is the two layers perpendicular to
/// the face.
pub fn drag_candidates(slot: Slot, normal: Vector3<f32>) -> Result<DragCandidates, CubeError> {
    let facing = normal_face(normal)?;
    Ok(topology::layers_containing(slot)
        .into_iter()
        .filter(|&face| face != facing)
        .collect())
}

/// Policy that turns a drag gesture into a move.
pub trait DragResolver {
    /// Returns the move meant by dragging `drag` (in screen pixels) on a
    /// sticker that can be dragged along `candidates`, or `None` if the
    /// gesture is ambiguous.
    fn resolve(&self, candidates: &[Face], drag: Vector2<f32>) -> Option<Move>;
}

impl<F: Fn(&[Face], Vector2<f32>) -> Option<Move>> DragResolver for F {
    fn resolve(&self, candidates: &[Face], drag: Vector2<f32>) -> Option<Move> {
        self(candidates, drag)
    }
}

#[derive(Debug, Clone)]
struct Press {
    candidates: DragCandidates,
    origin: Point2<f32>,
    reported: bool,
}

/// Tracks one pointer press and decides when it has become a drag.
#[derive(Debug, Clone)]
pub struct DragTracker {
    threshold: f32,
    press: Option<Press>,
}

impl DragTracker {
    /// Constructs a tracker that reports a drag after `threshold` pixels of
    /// pointer travel.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            press: None,
        }
    }

    /// Returns whether a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Returns the candidates of the current press.
    pub fn candidates(&self) -> Option<&[Face]> {
        Some(&self.press.as_ref()?.candidates)
    }

    /// Starts tracking a press on `slot` at screen position `cursor`,
    /// replacing any earlier press.
    pub fn press(
        &mut self,
        slot: Slot,
        normal: Vector3<f32>,
        cursor: Point2<f32>,
    ) -> Result<&[Face], CubeError> {
        let candidates = drag_candidates(slot, normal)?;
        let press = self.press.insert(Press {
            candidates,
            origin: cursor,
            reported: false,
        });
        Ok(&press.candidates)
    }

    /// Updates the cursor position. Returns the drag vector the first time
    /// the cursor is at least the threshold away from where it was pressed.
    pub fn update(&mut self, cursor: Point2<f32>) -> Option<Vector2<f32>> {
        let press = self.press.as_mut()?;
        let drag = cursor - press.origin;
        if !(drag.x.is_finite() && drag.y.is_finite()) {
            return None;
        }
        if press.reported || drag.magnitude() < self.threshold {
            return None;
        }
        press.reported = true;
        Some(drag)
    }

    /// Stops tracking the current press.
    pub fn release(&mut self) {
        self.press = None;
    }
}
