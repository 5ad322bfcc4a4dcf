//! Food markers placed by the user.

use wormsim_data::{FoodMarker, Point};

/// Insertion-ordered collection of food markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodField {
    markers: Vec<FoodMarker>,
}

/// What the head ran into this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoodContact {
    /// At least one marker was within sensing radius.
    pub sensed: bool,
    pub consumed: usize,
}

impl FoodField {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, position: Point) {
        self.markers.push(FoodMarker::from(position));
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    #[must_use]
    pub fn markers(&self) -> &[FoodMarker] {
        &self.markers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Checks every marker against `probe`.
    ///
    /// Markers within `consumption_radius` are removed; any marker within
    /// `sensing_radius` (consumed ones included) marks the contact as sensed.
    pub fn sense(
        &mut self,
        probe: Point,
        sensing_radius: f64,
        consumption_radius: f64,
    ) -> FoodContact {
        let mut contact = FoodContact::default();
        self.markers.retain(|marker| {
            let distance = probe.distance(&marker.position);
            if distance <= sensing_radius {
                contact.sensed = true;
                if distance <= consumption_radius {
                    contact.consumed += 1;
                    return false;
                }
            }
            true
        });
        contact
    }
}
