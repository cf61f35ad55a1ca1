//! 26.6 fixed-point scalars and points
//!
//! All geometry in exprint is carried in units of 1/64 of a point, matching
//! the convention of the glyph backend (font advances come back in the same
//! unit). Summing nested child offsets therefore stays exact; the only
//! lossy step is the initial float-to-fixed truncation.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Reference device resolution in units per inch.
pub const DPI: f64 = 72.0;

/// A 26.6 fixed-point scalar: 26 integer bits, 6 fractional bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);

    /// Wrap a raw 26.6 value.
    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    /// The raw 26.6 value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert from points, truncating toward zero at 1/64 granularity.
    pub fn from_f64(v: f64) -> Self {
        Fixed((v * DPI * 64.0 / 72.0) as i32)
    }

    /// Convert back to points. Exact for every representable value, so
    /// `from_f64` followed by `to_f64` only loses the sub-1/64 remainder.
    pub fn to_f64(self) -> f64 {
        (self.0 >> 6) as f64 + (self.0 & 63) as f64 / 64.0
    }

    /// Whole-pixel part, rounding toward negative infinity.
    pub fn floor(self) -> i32 {
        self.0 >> 6
    }

    /// Multiply by the ratio `num/den`, truncating toward zero.
    ///
    /// The layout rules are phrased in small integer ratios (9/8, 4/9,
    /// 3/5, ...); doing the arithmetic in i64 keeps the intermediate
    /// product from overflowing.
    pub fn scale(self, num: i32, den: i32) -> Self {
        Fixed((self.0 as i64 * num as i64 / den as i64) as i32)
    }
}

impl Add for Fixed {
    type Output = Fixed;
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 -= rhs.0;
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

/// A 2D point (or size) in 26.6 fixed-point units.
///
/// `x` grows rightward, `y` grows downward; a box's draw anchor is its
/// left-baseline point, so offsets above the baseline are negative in `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    pub const ZERO: FixedPoint = FixedPoint {
        x: Fixed::ZERO,
        y: Fixed::ZERO,
    };

    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    pub fn to_f64(self) -> (f64, f64) {
        (self.x.to_f64(), self.y.to_f64())
    }
}

impl Add for FixedPoint {
    type Output = FixedPoint;
    fn add(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for FixedPoint {
    type Output = FixedPoint;
    fn sub(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
