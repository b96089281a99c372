//! Cell lookup and search functionality
//!
//! All queries scan the cells in load order. At the size of the Belgian grid a
//! scan per request is cheap; a bucketed or tree index could replace it behind
//! the same `find` signature.

use super::SpatialIndex;
use crate::app::models::{Bounds, Cell};

impl SpatialIndex {
    /// Find the cell containing a projected point
    ///
    /// A cell matches when `x_min <= x < x_max` and `y_min <= y < y_max`, so a
    /// point on a shared edge belongs to exactly one of the neighbouring cells.
    /// The first matching cell in load order is returned.
    ///
    /// # Examples
    /// ```
    /// # use accesstc::app::models::{Cell, GridVariant};
    /// # use accesstc::SpatialIndex;
    /// # use std::collections::BTreeMap;
    /// let cell = Cell::new(1, 0.0, 0.0, 2.0, None, BTreeMap::new()).unwrap();
    /// let index = SpatialIndex::new(vec![cell], GridVariant::Simple);
    ///
    /// assert!(index.find(-1.0, 0.0).is_some());
    /// assert!(index.find(1.0, 0.0).is_none());
    /// ```
    pub fn find(&self, x: f64, y: f64) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.contains(x, y))
    }

    /// Get the first cell with the given identifier
    pub fn get_cell(&self, id: i64) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.id == id)
    }

    /// Check if a cell with the given identifier exists
    pub fn contains_cell(&self, id: i64) -> bool {
        self.get_cell(id).is_some()
    }

    /// Find cells whose area intersects a rectangle
    ///
    /// Cells that only touch the rectangle along an edge are not returned.
    pub fn cells_in_region(&self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Vec<&Cell> {
        let region = Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        };

        self.cells
            .iter()
            .filter(|cell| cell.bounds.intersects(&region))
            .collect()
    }

    /// Iterate over all cells in load order
    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Count cells without a headline score
    pub fn unscored_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.score.is_none()).count()
    }
}
