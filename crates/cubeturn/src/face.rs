use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::topology::{self, Slot};
use crate::{CubeError, CubieId};

/// Outer face or middle layer of the cube.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Face {
    /// Outer layer at `y = 0`.
    Bottom,
    /// Outer layer at `y = 2`.
    Top,
    /// Outer layer at `z = 0`.
    Back,
    /// Outer layer at `z = 2`.
    Front,
    /// Outer layer at `x = 0`.
    Left,
    /// Outer layer at `x = 2`.
    Right,
    /// Middle layer at `y = 1`.
    Horizontal,
    /// Middle layer at `x = 1`.
    Vertical,
    /// Middle layer at `z = 1`.
    Parallel,
}

impl Face {
    /// The six outer faces, which are the only faces used for shuffling.
    pub const OUTER: [Face; 6] = [
        Face::Bottom,
        Face::Top,
        Face::Back,
        Face::Front,
        Face::Left,
        Face::Right,
    ];

    /// Parses a face name such as `"right"` or `"horizontal"`.
    pub fn from_name(name: &str) -> Result<Self, CubeError> {
        Self::from_str(name)
            .map_err(|_| CubeError::UnknownFace(name.to_owned()))
    }

    /// Returns whether this is an outer face rather than a middle layer.
    pub fn is_outer(self) -> bool {
        !matches!(self, Face::Horizontal | Face::Vertical | Face::Parallel)
    }

    /// Returns the 9 slots in this face, in ascending index order.
    pub fn slots(self) -> [Slot; crate::LAYER_SIZE] {
        topology::face_slots(self)
    }

    /// Returns whether `slot` is in this face.
    pub fn contains(self, slot: Slot) -> bool {
        topology::membership(self, slot)
    }

    /// Returns the sticker color of an outer face, or `None` for a middle
    /// layer.
    pub fn color(self) -> Option<StickerColor> {
        match self {
            Face::Right => Some(StickerColor::Red),
            Face::Left => Some(StickerColor::Orange),
            Face::Top => Some(StickerColor::Yellow),
            Face::Bottom => Some(StickerColor::White),
            Face::Front => Some(StickerColor::Blue),
            Face::Back => Some(StickerColor::Green),
            Face::Horizontal | Face::Vertical | Face::Parallel => None,
        }
    }

    /// Returns the outer faces on which `cubie` carries a sticker.
    ///
    /// Stickers are fixed to the cubie, so this is computed from the slot the
    /// cubie occupies in the solved arrangement. The hidden center cubie has
    /// no stickers.
    pub fn stickers(cubie: CubieId) -> SmallVec<[Face; 3]> {
        let home = cubie.home_slot();
        Face::iter()
            .filter(|face| face.is_outer() && face.contains(home))
            .collect()
    }
}

/// Color of a sticker on an outer face.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum StickerColor {
    Red,
    Orange,
    Yellow,
    White,
    Blue,
    Green,
}

/// Command to turn one face or layer by a quarter turn.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face or layer to turn.
    pub face: Face,
    /// Whether to turn in the positive direction around the face's axis.
    pub positive: bool,
}

impl Move {
    /// Constructs a move.
    pub fn new(face: Face, positive: bool) -> Self {
        Self { face, positive }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            positive: !self.positive,
        }
    }

    /// Returns whether doing `self` right after `other` would undo it.
    pub fn cancels(self, other: Move) -> bool {
        self == other.inverse()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{}{sign}", self.face)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_face_names() {
        for face in Face::iter() {
            assert_eq!(Face::from_name(&face.to_string()), Ok(face));
        }
        assert_eq!(Face::from_name("parallel"), Ok(Face::Parallel));
        assert_eq!(
            Face::from_name("middle"),
            Err(CubeError::UnknownFace("middle".to_owned())),
        );
        assert_eq!(<&'static str>::from(Face::Horizontal), "horizontal");
    }

    #[test]
    fn test_move_inverse() {
        let r = Move::new(Face::Right, true);
        assert_eq!(r.inverse(), Move::new(Face::Right, false));
        assert_eq!(r.inverse().inverse(), r);
        assert!(r.inverse().cancels(r));
        assert!(!r.cancels(r));
        assert!(!Move::new(Face::Left, false).cancels(r));
        assert_eq!(r.to_string(), "right+");
    }

    #[test]
    fn test_stickers() {
        use StickerColor::{Blue, Red, Yellow};

        let sticker_counts = (0..crate::SLOT_COUNT as u8)
            .map(|i| Face::stickers(CubieId(i)).len())
            .collect::<Vec<_>>();
        // 8 corners, 12 edges, 6 centers, 1 hidden core
        assert_eq!(sticker_counts.iter().filter(|&&n| n == 3).count(), 8);
        assert_eq!(sticker_counts.iter().filter(|&&n| n == 2).count(), 12);
        assert_eq!(sticker_counts.iter().filter(|&&n| n == 1).count(), 6);
        assert_eq!(sticker_counts[13], 0);

        let corner = Face::stickers(CubieId(26));
        assert_eq!(corner.as_slice(), &[Face::Top, Face::Front, Face::Right]);
        let colors: Vec<_> = corner.iter().filter_map(|f| f.color()).collect();
        assert_eq!(colors, [Yellow, Blue, Red]);
    }
}
