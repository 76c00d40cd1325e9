use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Vector of length `delta` along this axis.
    pub fn delta(&self, delta: f64) -> R2<f64> {
        match self {
            Axis::X => R2::new(delta, 0.),
            Axis::Y => R2::new(0., delta),
        }
    }
}

/// Screen direction of a nudge command (`y` grows downward).
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "right")]
    Right,
    #[display(fmt = "up")]
    Up,
    #[display(fmt = "down")]
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Axis and sign of a `step`-pixel move in this direction.
    pub fn axis_delta(&self, step: f64) -> (Axis, f64) {
        match self {
            Direction::Left => (Axis::X, -step),
            Direction::Right => (Axis::X, step),
            Direction::Up => (Axis::Y, -step),
            Direction::Down => (Axis::Y, step),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unrecognized direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn axis_deltas() {
        assert_eq!(Direction::Left.axis_delta(1.), (Axis::X, -1.));
        assert_eq!(Direction::Down.axis_delta(2.), (Axis::Y, 2.));
        assert_eq!(Axis::Y.delta(-3.), R2::new(0., -3.));
    }

    #[test]
    fn parse() {
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("Up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("sideways".parse::<Direction>(), Err(ParseDirectionError("sideways".to_string())));
    }
}
