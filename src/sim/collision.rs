//! Collision detection for axis-aligned sprites
//!
//! Every sprite is treated as its bounding rectangle. Queries return all
//! overlapping items so a single bullet can take out several shield blocks
//! in one tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::search::first_not_smaller_by_key;

/// An axis-aligned rectangle, stored by centre and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// True if the two rectangles share interior area (touching edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }
}

/// Anything with a collision rectangle
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Indices of every item in `items` overlapping `area`, in order
pub fn collisions_with_list<T: Bounds>(area: &Rect, items: &[T]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| area.overlaps(&item.bounds()))
        .map(|(i, _)| i)
        .collect()
}

/// Like [`collisions_with_list`] for items sorted by their left edge.
///
/// `max_width` must be at least the width of the widest item. Items whose
/// left edge is too far left to reach the area, or at/after the area's
/// right edge, are skipped with two binary searches.
pub fn collisions_with_sorted_list<T: Bounds>(
    area: &Rect,
    items: &[T],
    max_width: f32,
) -> Vec<usize> {
    let start = first_not_smaller_by_key(items, area.left() - max_width, |item| {
        item.bounds().left()
    })
    .unwrap_or(items.len());
    let end = first_not_smaller_by_key(&items[start..], area.right(), |item| {
        item.bounds().left()
    })
    .map_or(items.len(), |i| start + i);

    (start..end)
        .filter(|&i| area.overlaps(&items[i].bounds()))
        .collect()
}

/// Remove the items at `indices` (ascending), keeping the rest in order
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut next = indices.iter().peekable();
    let mut i = 0;
    items.retain(|_| {
        let hit = next.peek().is_some_and(|&&idx| idx == i);
        if hit {
            next.next();
        }
        i += 1;
        !hit
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_rect_edges() {
        let r = rect(10.0, 20.0, 4.0, 6.0);
        assert_eq!(r.left(), 8.0);
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.bottom(), 17.0);
        assert_eq!(r.top(), 23.0);
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
        // Shares an edge only
        assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(0.0, 30.0, 10.0, 10.0)));
    }

    #[test]
    fn test_sorted_list_matches_linear() {
        let mut blocks: Vec<Rect> = (0..40)
            .flat_map(|col| {
                (0..3).map(move |row| rect(col as f32 * 5.0, row as f32 * 10.0, 5.0, 10.0))
            })
            .collect();
        blocks.sort_by(|a, b| a.center.x.total_cmp(&b.center.x));

        for x in [-10.0, 0.0, 3.0, 47.5, 100.0, 195.0, 250.0] {
            let area = rect(x, 10.0, 7.2, 43.2);
            assert_eq!(
                collisions_with_sorted_list(&area, &blocks, 5.0),
                collisions_with_list(&area, &blocks),
                "area at x={x}"
            );
        }
    }

    #[test]
    fn test_remove_indices() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        remove_indices(&mut v, &[0, 2, 4]);
        assert_eq!(v, vec!['b', 'd']);
        remove_indices(&mut v, &[]);
        assert_eq!(v, vec!['b', 'd']);
    }
}
