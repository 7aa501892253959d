use std::ops::{Add, Mul, Sub};

/// Screen-space point in physical pixels, origin top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// World-space vector. +y is up, the camera looks down -z by default.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit vector in the same direction, or `None` for a zero/non-finite input.
    pub fn try_normalize(self) -> Option<Vec3> {
        let len_sq = self.length_squared();
        if len_sq <= 0.0 || !len_sq.is_finite() {
            return None;
        }
        Some(self * len_sq.sqrt().recip())
    }

    pub fn normalize_or_zero(self) -> Vec3 {
        self.try_normalize().unwrap_or(Vec3::ZERO)
    }

    pub fn clamp_length_max(self, max: f32) -> Vec3 {
        let len_sq = self.length_squared();
        if len_sq <= max * max {
            return self;
        }
        self * (max / len_sq.sqrt())
    }

    pub fn clamp(self, min: Vec3, max: Vec3) -> Vec3 {
        Vec3::new(
            self.x.clamp(min.x, max.x),
            self.y.clamp(min.y, max.y),
            self.z.clamp(min.z, max.z),
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Heading in radians: pitch about x, yaw about y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
}

/// Spherical to cartesian with `polar` measured from +y and `azimuth` around +y
/// starting at +z.
pub fn spherical_to_cartesian(radius: f32, polar: f32, azimuth: f32) -> Vec3 {
    let sin_polar_radius = polar.sin() * radius;
    Vec3::new(
        sin_polar_radius * azimuth.sin(),
        polar.cos() * radius,
        sin_polar_radius * azimuth.cos(),
    )
}

/// Frame-rate independent step of `current` toward `target`. The blend factor
/// is clamped to `[0, 1]` so a long frame lands on the target instead of past it.
pub fn approach(current: f32, target: f32, rate: f32, dt_seconds: f32) -> f32 {
    let alpha = (rate * dt_seconds).clamp(0.0, 1.0);
    current + (target - current) * alpha
}
