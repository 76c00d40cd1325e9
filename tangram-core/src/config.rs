use serde::{Deserialize, Serialize};
use tsify::Tsify;

/// Tunable interaction constants.
///
/// Every field has a default, so partial objects (from JS or a session file)
/// deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Degrees added per double-click or rotate command
    pub rotate_step: i32,
    /// Pixels moved per nudge command
    pub nudge_step: f64,
    /// `z-index` applied to a piece while it is dragged
    pub front_z: i32,
    /// `z-index` applied otherwise
    pub base_z: i32,
    /// Label of the leading, value-less summary entry
    pub placeholder: String,
}

impl Config {
    pub const DEFAULT_ROTATE_STEP: i32 = 15;
    pub const DEFAULT_NUDGE_STEP: f64 = 1.;
    pub const DEFAULT_PLACEHOLDER: &'static str = "-- Piece Rotations --";
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rotate_step: Self::DEFAULT_ROTATE_STEP,
            nudge_step: Self::DEFAULT_NUDGE_STEP,
            front_z: 1000,
            base_z: 1,
            placeholder: Self::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}
