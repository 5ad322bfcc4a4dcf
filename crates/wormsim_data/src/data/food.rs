use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// A food pellet dropped on the canvas by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodMarker {
    pub position: Point,
}

impl FoodMarker {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }
}

impl From<Point> for FoodMarker {
    fn from(position: Point) -> Self {
        Self { position }
    }
}
