use serde::{Deserialize, Serialize};
use tangram_core::{Config, Direction};
use tsify::Tsify;

/// Where to find the puzzle's elements, plus interaction constants.
///
/// Every field is optional on the JS side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase", default)]
pub struct MountOptions {
    /// Selector for the container holding the pieces
    pub source: String,
    /// Selector for the container pieces can be dropped into, if any
    pub destination: Option<String>,
    /// Element id of the summary `<select>`
    pub dropdown: String,
    pub rotate_button: String,
    pub move_left_button: String,
    pub move_right_button: String,
    pub move_up_button: String,
    pub move_down_button: String,
    pub config: Config,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            source: ".puzzle-container".to_string(),
            destination: Some(".board-container".to_string()),
            dropdown: "angleDropdown".to_string(),
            rotate_button: "rotateBtn".to_string(),
            move_left_button: "moveLeftBtn".to_string(),
            move_right_button: "moveRightBtn".to_string(),
            move_up_button: "moveUpBtn".to_string(),
            move_down_button: "moveDownBtn".to_string(),
            config: Config::default(),
        }
    }
}

impl MountOptions {
    pub fn nudge_button(&self, direction: Direction) -> &str {
        match direction {
            Direction::Left => &self.move_left_button,
            Direction::Right => &self.move_right_button,
            Direction::Up => &self.move_up_button,
            Direction::Down => &self.move_down_button,
        }
    }
}
