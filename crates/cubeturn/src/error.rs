use cgmath::Vector3;
use thiserror::Error;

/// Error produced when a command from outside the core is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CubeError {
    /// Face or layer name is not one of the nine known names.
    #[error("unknown face {0:?}")]
    UnknownFace(String),
    /// Slot index is not in the range `0..27`.
    #[error("slot index {0} out of range")]
    SlotOutOfRange(usize),
    /// Surface normal does not point along a principal axis.
    #[error("surface normal ({}, {}, {}) is not axis-aligned", .0.x, .0.y, .0.z)]
    NormalNotAxisAligned(Vector3<f32>),
}
