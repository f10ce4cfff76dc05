use crate::Coord;

/// A 2D area represented by a min + max coordinate pair.
///
/// The two coordinates form an _inclusive_ 2D range, i.e. unlike in a
/// half-open range, it's possible for a point with `x == x_max`
/// to be contained in the area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: usize,
    pub y_min: usize,
    pub x_max: usize,
    pub y_max: usize,
}

impl BoundingBox {
    pub fn singleton(pos: Coord) -> Self {
        Self {
            x_min: pos.x,
            y_min: pos.y,
            x_max: pos.x,
            y_max: pos.y,
        }
    }

    pub fn from_coordinates_iter(mut iter: impl Iterator<Item = Coord>) -> Option<Self> {
        let mut bbox = Self::singleton(iter.next()?);
        for pos in iter {
            bbox.update(pos);
        }
        Some(bbox)
    }

    /// Expands the bounding box to cover `pos`.
    pub fn update(&mut self, pos: Coord) {
        self.x_min = self.x_min.min(pos.x);
        self.x_max = self.x_max.max(pos.x);
        self.y_min = self.y_min.min(pos.y);
        self.y_max = self.y_max.max(pos.y);
    }
}
