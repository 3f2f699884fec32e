use std::ops::{Add, Sub};

use crate::{Contains, Point, Size, Vector};

/// A basic rectangle representation. Meant to be sorted and with finite values only.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// The whole normalized texture space, the default UV rectangle of a sprite.
    pub const UNIT: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 1.0,
        bottom: 1.0,
    };

    #[must_use]
    pub fn new(origin: impl Into<Point>, size: impl Into<Size>) -> Self {
        (origin.into(), size.into()).into()
    }

    #[must_use]
    pub fn from_size(size: impl Into<Size>) -> Self {
        (Point::default(), size.into()).into()
    }

    pub fn is_empty(&self) -> bool {
        // Written as the NOT of a non-empty rect so that NaN values count as empty.
        !(self.left < self.right && self.top < self.bottom)
    }

    pub fn size(&self) -> Size {
        (self.right - self.left, self.bottom - self.top).into()
    }

    pub fn origin(&self) -> Point {
        (self.left, self.top).into()
    }

    pub fn end(&self) -> Point {
        (self.right, self.bottom).into()
    }

    pub fn center(&self) -> Point {
        (
            self.left * 0.5 + self.right * 0.5,
            self.top * 0.5 + self.bottom * 0.5,
        )
            .into()
    }

    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        let other = other.into();
        let l = self.left.max(other.left);
        let r = self.right.min(other.right);
        let t = self.top.max(other.top);
        let b = self.bottom.min(other.bottom);
        l < r && t < b
    }

    pub fn joined(&self, other: impl Into<Self>) -> Self {
        let other = other.into();
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return other;
        }

        (
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
            .into()
    }

    pub fn to_scalars(&self) -> [f64; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

impl From<(f64, f64, f64, f64)> for Rect {
    fn from((left, top, right, bottom): (f64, f64, f64, f64)) -> Self {
        (Point::new(left, top), Point::new(right, bottom)).into()
    }
}

impl From<(Point, Size)> for Rect {
    fn from((origin, size): (Point, Size)) -> Self {
        let rb = origin + size;
        (origin, rb).into()
    }
}

impl From<(Point, Point)> for Rect {
    fn from((origin, end): (Point, Point)) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: end.x,
            bottom: end.y,
        }
    }
}

impl Add<Vector> for Rect {
    type Output = Self;

    fn add(self, d: Vector) -> Self::Output {
        Self {
            left: self.left + d.x,
            top: self.top + d.y,
            right: self.right + d.x,
            bottom: self.bottom + d.y,
        }
    }
}

impl Sub<Vector> for Rect {
    type Output = Self;

    fn sub(self, d: Vector) -> Self::Output {
        Self {
            left: self.left - d.x,
            top: self.top - d.y,
            right: self.right - d.x,
            bottom: self.bottom - d.y,
        }
    }
}

impl Contains<Point> for Rect {
    fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }
}

impl Contains<&Rect> for Rect {
    fn contains(&self, r: &Rect) -> bool {
        !r.is_empty()
            && !self.is_empty()
            && self.left <= r.left
            && self.top <= r.top
            && self.right >= r.right
            && self.bottom >= r.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;
    use crate::{Contains, Point};

    #[test]
    fn unit_rect_covers_normalized_uv_space() {
        assert_eq!(Rect::UNIT.size(), (1.0, 1.0).into());
        assert!(Rect::UNIT.contains(Point::new(0.5, 0.5)));
        assert!(!Rect::UNIT.contains(Point::new(1.0, 1.0)));
    }

    #[test]
    fn joined_ignores_empty_rects() {
        let r = Rect::new((10.0, 10.0), (5.0, 5.0));
        assert_eq!(r.joined(Rect::ZERO), r);
        assert_eq!(Rect::ZERO.joined(r), r);
    }
}
