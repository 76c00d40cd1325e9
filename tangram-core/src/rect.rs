use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::r2::R2;

/// Axis-aligned rectangle in viewport coordinates, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn from_origin_size(origin: R2<f64>, size: R2<f64>) -> Self {
        Rect::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn origin(&self) -> R2<f64> {
        R2::new(self.x, self.y)
    }

    pub fn size(&self) -> R2<f64> {
        R2::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> R2<f64> {
        self.origin() + self.size() / 2.
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: &R2<f64>) -> bool {
        self.x <= p.x && p.x <= self.right() && self.y <= p.y && p.y <= self.bottom()
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1} {:.1}x{:.1}]", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_log::test;

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::new(10., 20., 100., 50.);
        assert!(r.contains(&R2::new(10., 20.)));
        assert!(r.contains(&R2::new(110., 70.)));
        assert!(r.contains(&R2::new(60., 45.)));
        assert!(!r.contains(&R2::new(9.9, 45.)));
        assert!(!r.contains(&R2::new(60., 70.1)));
    }

    #[test]
    fn center() {
        let r = Rect::new(10., 20., 100., 50.);
        assert_relative_eq!(r.center(), R2::new(60., 45.));
        let r = Rect::from_origin_size(R2::new(10., 20.), R2::new(100., 50.));
        assert_eq!(r, Rect::new(10., 20., 100., 50.));
        assert_eq!(r.right(), 110.);
        assert_eq!(r.bottom(), 70.);
    }
}
