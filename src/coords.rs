use std::fmt;
use std::ops::{Add, Neg};

use serde::{Deserialize, Serialize};

/// A cell address in axial hex coordinates. The implicit third cube axis is
/// `s = -q - r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Component-wise product sum. Used as a projection key when ordering
    /// cells along a direction, not as a distance.
    pub const fn dot(self, other: Self) -> i32 {
        self.q * other.q + self.r * other.r
    }

    /// Membership in the hexagon of the given radius: all three cube axes lie
    /// strictly inside `(-radius, radius)`.
    pub const fn is_in_grid(self, radius: i32) -> bool {
        self.q > -radius
            && self.q < radius
            && self.r > -radius
            && self.r < radius
            && self.q + self.r > -radius
            && self.q + self.r < radius
    }
}

impl Add for AxialCoord {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            q: self.q + other.q,
            r: self.r + other.r,
        }
    }
}

impl Neg for AxialCoord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            q: -self.q,
            r: -self.r,
        }
    }
}

impl From<(i32, i32)> for AxialCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self { q, r }
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

// Pixel projection for flat-top hexes. `size` is the center-to-corner radius.

pub fn axial_to_pixel(c: AxialCoord, size: f64) -> (f64, f64) {
    let q = f64::from(c.q);
    let r = f64::from(c.r);
    let sqrt3 = 3f64.sqrt();
    (size * 1.5 * q, size * (sqrt3 / 2.0 * q + sqrt3 * r))
}

/// Fractional inverse of [`axial_to_pixel`].
pub fn pixel_to_axial(x: f64, y: f64, size: f64) -> (f64, f64) {
    let q = (2.0 / 3.0 * x) / size;
    let r = (-1.0 / 3.0 * x + 3f64.sqrt() / 3.0 * y) / size;
    (q, r)
}

pub fn pixel_to_axial_rounded(x: f64, y: f64, size: f64) -> AxialCoord {
    let (q, r) = pixel_to_axial(x, y, size);
    AxialCoord::new(q.round() as i32, r.round() as i32)
}

/// Corner offsets of a unit flat-top hexagon, at `60 * i - 30` degrees.
pub fn unit_corners() -> [(f64, f64); 6] {
    std::array::from_fn(|i| {
        let rad = (60.0 * i as f64 - 30.0).to_radians();
        (rad.cos(), rad.sin())
    })
}
