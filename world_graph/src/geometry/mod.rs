//! Integer geometry: room positions, deltas between them, and compass directions.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// Fixed-point length that [`Vector::normalized`] scales to.
pub const UNIT_SCALE: i64 = 100;

/// A room position in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Vector pointing from this position to `other`.
    pub fn vector_to(&self, other: Position) -> Vector {
        other - *self
    }

    /// Integer distance in meters.
    pub fn distance_to(&self, other: Position) -> i32 {
        self.vector_to(other).length()
    }
}

impl Sub for Position {
    type Output = Vector;

    fn sub(self, rhs: Position) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<Vector> for Position {
    type Output = Position;

    fn add(self, rhs: Vector) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// An integer delta between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0, y: 0, z: 0 };

    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    fn squared_length(&self) -> i64 {
        let (x, y, z) = (self.x as i64, self.y as i64, self.z as i64);
        x * x + y * y + z * z
    }

    /// Exact Euclidean length.
    pub fn length_f64(&self) -> f64 {
        (self.squared_length() as f64).sqrt()
    }

    /// Euclidean length truncated to whole meters.
    pub fn length(&self) -> i32 {
        self.length_f64() as i32
    }

    pub fn dot(&self, other: Vector) -> i64 {
        self.x as i64 * other.x as i64
            + self.y as i64 * other.y as i64
            + self.z as i64 * other.z as i64
    }

    /// Scale to a fixed-point unit vector of length ~[`UNIT_SCALE`].
    ///
    /// The zero vector normalizes to itself.
    pub fn normalized(&self) -> Vector {
        let length = self.length() as i64;
        if length == 0 {
            return Vector::ZERO;
        }
        Vector::new(
            (self.x as i64 * UNIT_SCALE / length) as i32,
            (self.y as i64 * UNIT_SCALE / length) as i32,
            (self.z as i64 * UNIT_SCALE / length) as i32,
        )
    }

    /// Angle between two vectors in radians.
    ///
    /// Returns NaN when either vector is zero; callers decide what that means.
    pub fn angle(&self, other: Vector) -> f64 {
        let lengths = self.length_f64() * other.length_f64();
        if lengths == 0.0 {
            return f64::NAN;
        }
        (self.dot(other) as f64 / lengths).clamp(-1.0, 1.0).acos()
    }

    /// Classify into one of the eight compass points or up/down.
    pub fn direction(&self) -> Option<Direction> {
        Direction::for_vector(*self)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

/// Compass directions plus vertical. `+x` is east, `+y` is north, `+z` is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Up,
    Down,
}

impl Direction {
    /// Counter-clockwise from east, one entry per 45 degree sector.
    const COMPASS: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Classify a vector. Mostly-vertical vectors are up/down; everything else
    /// is bucketed into 45 degree sectors centred on the compass points.
    pub fn for_vector(v: Vector) -> Option<Direction> {
        if v.is_zero() {
            return None;
        }
        let horizontal = ((v.x as f64).powi(2) + (v.y as f64).powi(2)).sqrt();
        if (v.z as f64).abs() > horizontal {
            return Some(if v.z > 0 {
                Direction::Up
            } else {
                Direction::Down
            });
        }

        let degrees = (v.y as f64).atan2(v.x as f64).to_degrees();
        let sector = ((degrees + 22.5).rem_euclid(360.0) / 45.0) as usize;
        Some(Self::COMPASS[sector % 8])
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::NorthEast => "north-east",
            Direction::East => "east",
            Direction::SouthEast => "south-east",
            Direction::South => "south",
            Direction::SouthWest => "south-west",
            Direction::West => "west",
            Direction::NorthWest => "north-west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// "from the north", "from above", "from below".
    pub fn from_phrase(&self) -> String {
        match self {
            Direction::Up => "from above".to_string(),
            Direction::Down => "from below".to_string(),
            compass => format!("from the {}", compass.name()),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
