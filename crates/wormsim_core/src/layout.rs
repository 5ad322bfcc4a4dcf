//! Grid placement and classification of neurons for the overlay.

use std::collections::BTreeMap;
use wormsim_data::{NeuronCategory, Point};

const SENSORY_PREFIXES: &[&str] = &[
    "ADF", "ASE", "ASG", "ASH", "ASI", "ASJ", "ASK", "AWA", "AWB", "AWC",
];
const MOTOR_PREFIXES: &[&str] = &["DA", "DB", "DD", "VA", "VB", "VC", "VD"];
const INTER_PREFIXES: &[&str] = &[
    "AIA", "AIB", "AIM", "AIY", "AIZ", "DVA", "PVC", "RIA", "RIB", "RIM",
];

/// Sensory, then motor, then inter prefixes are tried; anything else is `Other`.
#[must_use]
pub fn classify(id: &str) -> NeuronCategory {
    let matches = |prefixes: &[&str]| prefixes.iter().any(|p| id.starts_with(p));
    if matches(SENSORY_PREFIXES) {
        NeuronCategory::Sensory
    } else if matches(MOTOR_PREFIXES) {
        NeuronCategory::Motor
    } else if matches(INTER_PREFIXES) {
        NeuronCategory::Inter
    } else {
        NeuronCategory::Other
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeuronPlacement {
    pub id: String,
    pub position: Point,
    pub category: NeuronCategory,
}

/// Where each neuron sits on the canvas. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeuronLayout {
    placements: Vec<NeuronPlacement>,
    index: BTreeMap<String, usize>,
    rows: usize,
    cols: usize,
}

impl NeuronLayout {
    /// Lays `ids` out row by row on a near-square grid spread evenly over a
    /// `width` x `height` canvas. Duplicate identifiers keep their first slot.
    pub fn build<I, S>(ids: I, width: f64, height: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        let mut index: BTreeMap<String, usize> = BTreeMap::new();
        for id in ids {
            let id = id.as_ref();
            if !index.contains_key(id) {
                index.insert(id.to_string(), unique.len());
                unique.push(id.to_string());
            }
        }

        let count = unique.len();
        if count == 0 {
            return Self::default();
        }

        let rows = (count as f64).sqrt().floor() as usize;
        let cols = count.div_ceil(rows);
        let cell_width = width / (cols + 1) as f64;
        let cell_height = height / (rows + 1) as f64;

        let placements = unique
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                let row = i / cols;
                let col = i % cols;
                NeuronPlacement {
                    position: Point::new(
                        (col + 1) as f64 * cell_width,
                        (row + 1) as f64 * cell_height,
                    ),
                    category: classify(&id),
                    id,
                }
            })
            .collect();

        Self {
            placements,
            index,
            rows,
            cols,
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NeuronPlacement> {
        self.index.get(id).map(|&i| &self.placements[i])
    }

    #[must_use]
    pub fn position(&self, id: &str) -> Option<Point> {
        self.get(id).map(|p| p.position)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Placements in layout order.
    pub fn iter(&self) -> std::slice::Iter<'_, NeuronPlacement> {
        self.placements.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// `(rows, cols)` of the grid; `(0, 0)` when empty.
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn count_by_category(&self, category: NeuronCategory) -> usize {
        self.placements
            .iter()
            .filter(|p| p.category == category)
            .count()
    }
}
