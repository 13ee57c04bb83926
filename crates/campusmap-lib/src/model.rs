use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Opaque server-assigned identifier for a location record.
///
/// Identifiers are never generated client-side for persisted records; the
/// directory service owns assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new<T: Into<String>>(id: T) -> Self {
        LocationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cartesian coordinates in the map's 2D canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Rectangular viewport the map renders into. Positions must stay inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub width: f64,
    pub height: f64,
}

impl MapBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a position lies within the viewport (origin inclusive).
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x <= self.width
            && position.y <= self.height
    }
}

impl Default for MapBounds {
    /// The reference rendering uses an 800x600 canvas.
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Closed set of location categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Building,
    Library,
    Cafeteria,
    Gym,
    Hostel,
}

impl Category {
    /// All supported categories, in wire order.
    pub const ALL: [Category; 5] = [
        Category::Building,
        Category::Library,
        Category::Cafeteria,
        Category::Gym,
        Category::Hostel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Building => "building",
            Category::Library => "library",
            Category::Cafeteria => "cafeteria",
            Category::Gym => "gym",
            Category::Hostel => "hostel",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or(ValidationError::UnknownCategory {
                value: value.to_string(),
            })
    }
}

/// A point of interest known to the directory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    #[serde(flatten)]
    pub position: Position,
    #[serde(rename = "type")]
    pub category: Category,
}

/// Candidate captured by the add-location flow before validation.
///
/// Coordinate, name, and category are captured together as one atomic
/// candidate; validation never sees a partial submission.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCandidate {
    pub name: String,
    pub position: Position,
    pub category: Category,
}

impl LocationCandidate {
    pub fn new<T: Into<String>>(name: T, position: Position, category: Category) -> Self {
        Self {
            name: name.into(),
            position,
            category,
        }
    }
}

/// Payload submitted to the directory service when creating a location.
///
/// Carries no identifier: the directory service assigns one on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLocation {
    pub name: String,
    #[serde(flatten)]
    pub position: Position,
    #[serde(rename = "type")]
    pub category: Category,
}

impl From<LocationCandidate> for NewLocation {
    fn from(candidate: LocationCandidate) -> Self {
        Self {
            name: candidate.name,
            position: candidate.position,
            category: candidate.category,
        }
    }
}
