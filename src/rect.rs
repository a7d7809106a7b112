use crate::units::*;

/// An axis-aligned rectangle, specified by two opposite corners in layout space (y grows
/// downwards, so `y1` is the top edge and `y2` the bottom edge).
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the left edge.
    pub x1: Px,
    /// The y-coordinate of the top edge.
    pub y1: Px,
    /// The x-coordinate of the right edge.
    pub x2: Px,
    /// The y-coordinate of the bottom edge.
    pub y2: Px,
}

impl Rect {
    /// Create a rectangle from its top-left corner and its size
    pub fn from_origin_size(x: Px, y: Px, width: Px, height: Px) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn left(&self) -> Px {
        self.x1
    }

    pub fn top(&self) -> Px {
        self.y1
    }

    pub fn right(&self) -> Px {
        self.x2
    }

    pub fn bottom(&self) -> Px {
        self.y2
    }

    pub fn width(&self) -> Px {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Px {
        self.y2 - self.y1
    }

    /// The smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Move the rectangle by the given offsets
    pub fn offset(&self, dx: Px, dy: Px) -> Rect {
        Rect {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_spans_both() {
        let annotation = Rect::from_origin_size(Px(5.0), Px(0.0), Px(30.0), Px(10.0));
        let base = Rect::from_origin_size(Px(0.0), Px(13.0), Px(40.0), Px(20.0));
        let combined = annotation.union(&base);
        assert_eq!(combined.left(), Px(0.0));
        assert_eq!(combined.top(), Px(0.0));
        assert_eq!(combined.width(), Px(40.0));
        assert_eq!(combined.height(), Px(33.0));
    }

    #[test]
    fn offset_moves_both_corners() {
        let r = Rect::from_origin_size(Px(1.0), Px(2.0), Px(3.0), Px(4.0)).offset(Px(10.0), Px(20.0));
        assert_eq!(r, Rect::from_origin_size(Px(11.0), Px(22.0), Px(3.0), Px(4.0)));
    }
}
