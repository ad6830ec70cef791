// Pointer-space vector math for paper gestures
use std::ops::{Add, AddAssign, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector, or `None` for a zero-length vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(Vec2::new(self.x / len, self.y / len))
    }

    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Whole degrees in [0, 360). Halves round up, like `Math.round`.
pub fn wrap_degrees(degrees: f64) -> f64 {
    (degrees + 0.5).floor().rem_euclid(360.0)
}

/// Screen-space angle of the vector `from -> to` (y grows downward), or `None`
/// when both points coincide.
pub fn direction_degrees(from: Vec2, to: Vec2) -> Option<f64> {
    let dir = (to - from).normalized()?;
    Some(wrap_degrees(dir.y.atan2(dir.x).to_degrees()))
}
