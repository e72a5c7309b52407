// src/trail.rs

//! Bounded history of visited curve points.

use crate::geometry::Point2D;
use std::collections::VecDeque;

/// Fixed-capacity sequence of curve-space points in time order.
///
/// Pushing onto a full trail evicts the oldest point first.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Point2D>,
    capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: Point2D) {
        if self.capacity == 0 {
            return;
        }
        while self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Oldest point first.
    pub fn iter(&self) -> impl Iterator<Item = &Point2D> + '_ {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn newest(&self) -> Option<&Point2D> {
        self.points.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: f64) -> Point2D {
        Point2D::new(v, -v)
    }

    #[test]
    fn fills_up_to_capacity_in_insertion_order() {
        let mut trail = Trail::with_capacity(3);
        trail.push(p(1.0));
        trail.push(p(2.0));
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.iter().copied().collect::<Vec<_>>(), vec![p(1.0), p(2.0)]);
    }

    #[test]
    fn evicts_the_oldest_points_once_full() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..7 {
            trail.push(p(i as f64));
            assert!(trail.len() <= 3);
        }
        assert_eq!(
            trail.iter().copied().collect::<Vec<_>>(),
            vec![p(4.0), p(5.0), p(6.0)]
        );
        assert_eq!(trail.newest(), Some(&p(6.0)));
    }

    #[test]
    fn zero_capacity_trail_stays_empty() {
        let mut trail = Trail::with_capacity(0);
        trail.push(p(1.0));
        assert!(trail.is_empty());
    }
}
