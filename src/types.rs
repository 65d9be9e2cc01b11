//! Geometric primitives shared by the inference passes.
//!
//! All coordinates are design units (pixels in the host document). Boxes are
//! axis-aligned; rotated geometry is folded into its bounding box before it
//! reaches anything in this module.

use std::fmt;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

#[inline]
fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// One of the two layout axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Axis-aligned box: top-left corner plus extent
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box with validation (rejects NaN/infinite components)
    pub fn try_new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, NumericError> {
        Ok(Self::new(finite(x)?, finite(y)?, finite(width)?, finite(height)?))
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Leading coordinate along `axis` (x or y)
    #[inline]
    pub fn leading(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Extent along `axis` (width or height)
    #[inline]
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Trailing coordinate along `axis` (right or bottom)
    #[inline]
    pub fn trailing(&self, axis: Axis) -> f64 {
        self.leading(axis) + self.extent(axis)
    }

    /// Zero or negative extent on either axis
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether `other` lies entirely inside this box (edges may touch)
    pub fn encloses(&self, other: &Bounds) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Same box moved by `(dx, dy)`
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Bounds {
        Bounds {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Insets on the four sides of a box
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Sides {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Sides {
    pub const ZERO: Sides = Sides::new(0.0, 0.0, 0.0, 0.0);

    /// CSS order: top, right, bottom, left
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of the two insets on `axis` (left+right for X)
    #[inline]
    pub fn along(&self, axis: Axis) -> f64 {
        let (low, high) = self.pair(axis);
        low + high
    }

    /// Leading and trailing inset on `axis`
    #[inline]
    pub fn pair(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.left, self.right),
            Axis::Y => (self.top, self.bottom),
        }
    }

    /// Replace the leading and trailing inset on `axis`
    pub fn set_pair(&mut self, axis: Axis, low: f64, high: f64) {
        match axis {
            Axis::X => {
                self.left = low;
                self.right = high;
            }
            Axis::Y => {
                self.top = low;
                self.bottom = high;
            }
        }
    }

    /// Every inset floored at zero
    pub fn clamped(&self) -> Sides {
        Sides {
            top: self.top.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
            left: self.left.max(0.0),
        }
    }

    /// Every inset rounded to the nearest unit
    pub fn rounded(&self) -> Sides {
        Sides {
            top: self.top.round(),
            right: self.right.round(),
            bottom: self.bottom.round(),
            left: self.left.round(),
        }
    }
}
