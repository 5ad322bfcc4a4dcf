//! Follow-the-leader inverse kinematics.
//!
//! Every tick the head is pinned to the target and each following segment is
//! dragged toward its predecessor, then placed exactly one segment length
//! behind it. A single forward pass, no relaxation, so the links never stretch
//! or drift.

use wormsim_data::Point;

/// A rigid link of fixed length.
#[derive(Debug, Clone, PartialEq)]
pub struct IkSegment {
    length: f64,
    pub angle: f64,
    pub position: Point,
}

impl IkSegment {
    #[must_use]
    pub fn new(length: f64) -> Self {
        Self {
            length,
            angle: 0.0,
            position: Point::ORIGIN,
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Points this segment at `anchor` and places it `length` behind it.
    ///
    /// A zero-length pull has no direction; the angle is then 0 and the
    /// segment lands directly left of the anchor.
    pub fn update(&mut self, anchor: Point) {
        let dx = anchor.x - self.position.x;
        let dy = anchor.y - self.position.y;
        self.angle = if dx == 0.0 && dy == 0.0 {
            0.0
        } else {
            dy.atan2(dx)
        };
        self.position = Point::new(
            anchor.x - self.angle.cos() * self.length,
            anchor.y - self.angle.sin() * self.length,
        );
    }
}

/// Segments ordered head to tail.
#[derive(Debug, Clone, PartialEq)]
pub struct IkChain {
    segments: Vec<IkSegment>,
}

impl IkChain {
    /// `count` segments of `segment_length`, all starting at the origin.
    #[must_use]
    pub fn new(count: usize, segment_length: f64) -> Self {
        Self {
            segments: (0..count).map(|_| IkSegment::new(segment_length)).collect(),
        }
    }

    /// Re-solves the whole chain for a new head anchor.
    pub fn update(&mut self, target: Point) {
        let Some(head) = self.segments.first_mut() else {
            return;
        };
        head.position = target;

        for i in 1..self.segments.len() {
            let anchor = self.segments[i - 1].position;
            self.segments[i].update(anchor);
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[IkSegment] {
        &self.segments
    }

    #[must_use]
    pub fn head(&self) -> Option<&IkSegment> {
        self.segments.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(|s| s.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_first_update_lays_chain_out_straight() {
        let mut chain = IkChain::new(3, 10.0);
        chain.update(Point::new(100.0, 0.0));

        let positions: Vec<Point> = chain.positions().collect();
        assert_eq!(positions[0], Point::new(100.0, 0.0));
        assert!((positions[1].x - 90.0).abs() < EPS && positions[1].y.abs() < EPS);
        assert!((positions[2].x - 80.0).abs() < EPS && positions[2].y.abs() < EPS);
    }

    #[test]
    fn test_head_is_pinned_to_target() {
        let mut chain = IkChain::new(5, 7.5);
        for target in [
            Point::new(12.5, -3.0),
            Point::new(300.0, 200.0),
            Point::new(0.1, 0.2),
        ] {
            chain.update(target);
            assert_eq!(chain.head().map(|h| h.position), Some(target));
        }
    }

    #[test]
    fn test_degenerate_pull_has_zero_angle() {
        let mut segment = IkSegment::new(10.0);
        segment.position = Point::new(5.0, 5.0);
        segment.update(Point::new(5.0, 5.0));

        assert_eq!(segment.angle, 0.0);
        assert_eq!(segment.position, Point::new(-5.0, 5.0));
        assert!(segment.position.is_finite());
    }

    #[test]
    fn test_chain_at_origin_with_target_at_origin_stays_finite() {
        let mut chain = IkChain::new(4, 10.0);
        chain.update(Point::ORIGIN);
        for p in chain.positions() {
            assert!(p.is_finite());
        }
        assert_eq!(chain.segments()[1].position, Point::new(-10.0, 0.0));
    }

    #[test]
    fn test_segment_trails_along_pull_direction() {
        let mut segment = IkSegment::new(5.0);
        segment.update(Point::new(0.0, 20.0));
        assert!((segment.angle - std::f64::consts::FRAC_PI_2).abs() < EPS);
        assert!(segment.position.x.abs() < EPS);
        assert!((segment.position.y - 15.0).abs() < EPS);
    }

    #[test]
    fn test_empty_chain_update_is_noop() {
        let mut chain = IkChain::new(0, 10.0);
        chain.update(Point::new(1.0, 1.0));
        assert!(chain.is_empty());
        assert!(chain.head().is_none());
    }
}
