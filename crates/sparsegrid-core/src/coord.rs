use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::error::GridError;

/// Signed grid coordinate. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ZERO: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// True when either component is negative
    pub fn is_negative(&self) -> bool {
        self.x < 0 || self.y < 0
    }

    /// `self + delta`, or `None` when either component leaves the `i32` range
    pub fn checked_add(self, delta: Coord) -> Option<Coord> {
        Some(Coord::new(
            self.x.checked_add(delta.x)?,
            self.y.checked_add(delta.y)?,
        ))
    }

    /// The 4-neighbourhood in the order +x, -x, +y, -y.
    ///
    /// Neighbours that would leave the `i32` range are skipped.
    pub fn neighbours(&self) -> impl Iterator<Item = Coord> {
        let origin = *self;
        [
            Coord::new(1, 0),
            Coord::new(-1, 0),
            Coord::new(0, 1),
            Coord::new(0, -1),
        ]
        .into_iter()
        .filter_map(move |step| origin.checked_add(step))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord {
    type Output = Coord;

    fn neg(self) -> Coord {
        Coord::new(-self.x, -self.y)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Coord) {
        *self = *self + rhs;
    }
}

impl SubAssign for Coord {
    fn sub_assign(&mut self, rhs: Coord) {
        *self = *self - rhs;
    }
}

/// Inclusive rectangle of coordinates.
///
/// `top`/`bottom` bound `y`, `left`/`right` bound `x`. All four edges are part
/// of the region, so a single coordinate is `Boundaries::new(y, y, x, x)`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Boundaries {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Boundaries {
    pub const fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Boundaries {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Build from two opposite corners in any order
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Boundaries {
            top: a.y.min(b.y),
            bottom: a.y.max(b.y),
            left: a.x.min(b.x),
            right: a.x.max(b.x),
        }
    }

    /// Check if a coordinate is within this region
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= self.left
            && coord.x <= self.right
            && coord.y >= self.top
            && coord.y <= self.bottom
    }

    /// A region with an inverted axis covers no coordinates
    pub fn is_degenerate(&self) -> bool {
        self.right < self.left || self.bottom < self.top
    }

    pub fn top_left(&self) -> Coord {
        Coord::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Coord {
        Coord::new(self.right, self.bottom)
    }
}

impl fmt::Display for Boundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.top_left(), self.bottom_right())
    }
}

/// Half-open rectangle covering `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Inclusive form of this rectangle, `None` when it covers nothing.
    ///
    /// The far edges are clamped to `i32::MAX`.
    pub fn to_boundaries(&self) -> Option<Boundaries> {
        if self.is_empty() {
            return None;
        }
        Some(Boundaries::new(
            self.y,
            last_index(self.y, self.height),
            self.x,
            last_index(self.x, self.width),
        ))
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.to_boundaries().is_some_and(|b| b.contains(coord))
    }
}

/// `coord + delta` for the translate operations
pub(crate) fn shifted(coord: Coord, delta: Coord) -> Result<Coord, GridError> {
    coord
        .checked_add(delta)
        .ok_or(GridError::CoordinateOverflow { coord, delta })
}

fn last_index(start: i32, len: i32) -> i32 {
    i32::try_from(i64::from(start) + i64::from(len) - 1).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_arithmetic() {
        let a = Coord::new(1, -2);
        let b = Coord::new(3, 4);
        assert_eq!(a + b, Coord::new(4, 2));
        assert_eq!(a - b, Coord::new(-2, -6));
        assert_eq!(-a, Coord::new(-1, 2));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);

        assert_eq!(a.checked_add(b), Some(Coord::new(4, 2)));
        assert_eq!(Coord::new(i32::MAX, 0).checked_add(Coord::new(1, 0)), None);
        assert_eq!(Coord::new(0, i32::MIN).checked_add(Coord::new(0, -1)), None);
    }

    #[test]
    fn test_neighbour_order() {
        let n: Vec<_> = Coord::new(0, 0).neighbours().collect();
        assert_eq!(
            n,
            vec![
                Coord::new(1, 0),
                Coord::new(-1, 0),
                Coord::new(0, 1),
                Coord::new(0, -1)
            ]
        );

        let edge: Vec<_> = Coord::new(i32::MAX, 0).neighbours().collect();
        assert_eq!(edge.len(), 3);
        assert!(!edge.contains(&Coord::new(i32::MIN, 0)));
    }

    #[test]
    fn test_boundaries_contains_is_inclusive() {
        let b = Boundaries::new(-1, 2, -3, 0);
        assert!(b.contains(Coord::new(-3, -1)));
        assert!(b.contains(Coord::new(0, 2)));
        assert!(!b.contains(Coord::new(1, 0)));
        assert!(!b.contains(Coord::new(0, 3)));
    }

    #[test]
    fn test_degenerate_boundaries() {
        let b = Boundaries::new(5, 4, 0, 0);
        assert!(b.is_degenerate());
        assert!(!b.contains(Coord::new(0, 4)));
    }

    #[test]
    fn test_rect_is_half_open() {
        let r = Rect::new(1, 1, 2, 3);
        assert_eq!(r.to_boundaries(), Some(Boundaries::new(1, 3, 1, 2)));
        assert!(r.contains(Coord::new(2, 3)));
        assert!(!r.contains(Coord::new(3, 1)));
        assert!(Rect::new(0, 0, 0, 5).to_boundaries().is_none());
    }

    #[test]
    fn test_rect_at_the_i32_edge() {
        let one = Rect::new(i32::MAX, i32::MAX, 1, 1);
        assert_eq!(
            one.to_boundaries(),
            Some(Boundaries::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX))
        );
        assert!(one.contains(Coord::new(i32::MAX, i32::MAX)));

        let past_the_end = Rect::new(i32::MAX - 1, 0, 10, 1);
        assert_eq!(
            past_the_end.to_boundaries(),
            Some(Boundaries::new(0, 0, i32::MAX - 1, i32::MAX))
        );
    }

    #[test]
    fn test_from_corners_normalizes() {
        let b = Boundaries::from_corners(Coord::new(4, -1), Coord::new(-2, 3));
        assert_eq!(b, Boundaries::new(-1, 3, -2, 4));
        assert_eq!(b.to_string(), "(-2, -1):(4, 3)");
    }
}
