//! Slot permutation and turn animation core for an interactive 3x3x3 cube.
//!
//! The crate tracks which cubie occupies which grid slot, computes how a
//! quarter turn permutes the slots, and animates each turn over a sequence of
//! ticks. Rendering, hit-testing, and frame scheduling belong to the caller,
//! which feeds [`CubeSimulation`] with ticks and picks and consumes
//! [`CubeEvent`]s.

#[cfg(test)]
use pretty_assertions as _; // Only some test modules use it
#[cfg(test)]
use proptest as _;

/// Reports an internal consistency fault: panics in debug builds, logs an
/// error in release builds.
macro_rules! debug_panic {
    ($($tok:tt)*) => {
        match cfg!(debug_assertions) {
            true => panic!($($tok)*),
            false => log::error!($($tok)*),
        }
    };
}

mod animation;
mod axis;
mod error;
mod event;
mod face;
mod orientation;
mod permutation;
mod pick;
mod prefs;
mod shuffle;
mod simulation;
pub mod topology;

#[cfg(test)]
mod tests;

pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use crate::animation::{AnimationDriver, TurnAnimation};
    pub use crate::axis::{axis_for, is_reversed_handedness};
    pub use crate::error::CubeError;
    pub use crate::event::{CubeEvent, EventSink};
    pub use crate::face::{Face, Move, StickerColor};
    pub use crate::orientation::{cube_rotations, rotate_towards, snap_orientation};
    pub use crate::permutation::{CubeOrder, CubeState, Cubie, CubieId, quarter_turn_gather};
    pub use crate::pick::{DragCandidates, DragResolver, DragTracker, drag_candidates, normal_face};
    pub use crate::prefs::AnimationPreferences;
    pub use crate::shuffle::{ShuffleSequencer, generate_shuffle};
    pub use crate::simulation::CubeSimulation;
    pub use crate::topology::Slot;
}

/// Number of slots (and cubies) in the cube.
pub const SLOT_COUNT: usize = 27;

/// Number of slots in one face or middle layer.
pub const LAYER_SIZE: usize = 9;

/// Tolerance used when comparing positions, orientations, and normals.
pub const EPSILON: f32 = 0.001;
