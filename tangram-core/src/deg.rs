use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

/// Whole-degree rotation, always normalized to `[0, 360)`.
#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash, Into, Serialize, Deserialize)]
#[display(fmt = "{}°", _0)]
#[serde(from = "i32")]
pub struct Deg(i32);

impl Deg {
    pub const FULL_TURN: i32 = 360;

    pub fn new(degrees: i32) -> Self {
        Deg(degrees.rem_euclid(Self::FULL_TURN))
    }

    pub fn degrees(&self) -> i32 {
        self.0
    }

    /// Adds `increment` degrees, wrapping in either direction.
    pub fn rotate(self, increment: i32) -> Self {
        Deg::new(self.0 + increment.rem_euclid(Self::FULL_TURN))
    }

    /// CSS `transform` value for this angle.
    pub fn css(&self) -> String {
        format!("rotate({}deg)", self.0)
    }
}

impl From<i32> for Deg {
    fn from(degrees: i32) -> Self {
        Deg::new(degrees)
    }
}
