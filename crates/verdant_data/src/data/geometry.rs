use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector used for positions, velocities and steering forces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians).
    #[must_use]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[must_use]
    pub fn magnitude_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    #[must_use]
    pub fn distance(self, other: Vector2) -> f64 {
        (self - other).magnitude()
    }

    /// Direction of the vector in radians, `atan2(y, x)`.
    #[must_use]
    pub fn heading(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 && mag.is_finite() {
            self / mag
        } else {
            Self::ZERO
        }
    }

    /// Same direction, magnitude `mag`. The zero vector stays zero.
    #[must_use]
    pub fn set_magnitude(self, mag: f64) -> Self {
        self.normalize() * mag
    }

    /// Clamps the magnitude to `max`. Negative caps are treated as zero.
    #[must_use]
    pub fn limit(self, max: f64) -> Self {
        let max = max.max(0.0);
        let mag_sq = self.magnitude_squared();
        if mag_sq > max * max {
            let scaled = self.set_magnitude(max);
            // set_magnitude can land one ulp above the cap
            if scaled.magnitude() > max {
                scaled * (max / scaled.magnitude())
            } else {
                scaled
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl DivAssign<f64> for Vector2 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner `(x, y)`.
///
/// A rectangle with a negative width or height is empty: it contains no
/// point and intersects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `side` centred on `center`.
    #[must_use]
    pub fn centered(center: Vector2, side: f64) -> Self {
        Self::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.w >= 0.0 && self.h >= 0.0)
    }

    /// Inclusive of all four edges.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        !self.is_empty() && x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    #[must_use]
    pub fn contains_point(&self, p: Vector2) -> bool {
        self.contains(p.x, p.y)
    }

    /// True on any overlap, edge contact included, in either direction.
    #[must_use]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && other.x <= self.right()
            && self.x <= other.right()
            && other.y <= self.bottom()
            && self.y <= other.bottom()
    }
}
