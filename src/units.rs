//! Pixel lengths used throughout layout.

use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

/// A length in device pixels. All layout geometry is expressed in `Px`, with the origin at the
/// top-left corner of the content area and y growing downwards.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Deref,
    DerefMut,
    Display,
    From,
    Into,
    Sum,
)]
#[display("{_0}px")]
pub struct Px(pub f32);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// An unconstrained width, used to ask for the natural (intrinsic) size of content
    pub const UNBOUNDED: Px = Px(f32::INFINITY);

    /// Whether this length is a real constraint rather than [`Px::UNBOUNDED`]
    pub fn is_bounded(self) -> bool {
        self.0.is_finite()
    }

    pub fn max(self, other: Px) -> Px {
        Px(self.0.max(other.0))
    }

    pub fn min(self, other: Px) -> Px {
        Px(self.0.min(other.0))
    }

    /// Round up to the next whole pixel
    pub fn ceil(self) -> Px {
        Px(self.0.ceil())
    }
}

impl Mul<f32> for Px {
    type Output = Px;

    fn mul(self, rhs: f32) -> Px {
        Px(self.0 * rhs)
    }
}

impl Mul<Px> for f32 {
    type Output = Px;

    fn mul(self, rhs: Px) -> Px {
        Px(self * rhs.0)
    }
}

impl Div<f32> for Px {
    type Output = Px;

    fn div(self, rhs: f32) -> Px {
        Px(self.0 / rhs)
    }
}

impl Neg for Px {
    type Output = Px;

    fn neg(self) -> Px {
        Px(-self.0)
    }
}

impl From<u16> for Px {
    fn from(value: u16) -> Self {
        Px(value as f32)
    }
}
