use std::vec::Vec;

/// Per-row sizes and cumulative start offsets along the scroll axis.
///
/// Invariants:
/// - `position_of(0) == 0`
/// - `position_of(i + 1) == position_of(i) + size_of(i)`
/// - `total_extent() == position_of(n - 1) + size_of(n - 1)`, or `0` when empty
///
/// Lookups are `O(1)`. Size updates and insertions shift every downstream position and run in
/// `O(n - i)`; updates are driven by on-screen measurement, so the work per render pass is
/// bounded by the window, not by the collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionIndex {
    sizes: Vec<f64>,
    positions: Vec<f64>,
    total: f64,
}

impl PositionIndex {
    /// Allocates `count` rows of `default_size` each.
    pub fn new(count: usize, default_size: f64) -> Self {
        let default_size = sanitize(default_size);
        let mut positions = Vec::with_capacity(count);
        let mut pos = 0.0;
        for _ in 0..count {
            positions.push(pos);
            pos += default_size;
        }
        Self {
            sizes: vec![default_size; count],
            positions,
            total: pos,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Start offset of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.len()`.
    pub fn position_of(&self, row: usize) -> f64 {
        self.positions[row]
    }

    /// Size of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.len()`.
    pub fn size_of(&self, row: usize) -> f64 {
        self.sizes[row]
    }

    /// End offset of row `row` (`position + size`).
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.len()`.
    pub fn end_of(&self, row: usize) -> f64 {
        self.positions[row] + self.sizes[row]
    }

    pub fn total_extent(&self) -> f64 {
        self.total
    }

    /// Mean row size, or `None` for an empty index.
    pub fn average_size(&self) -> Option<f64> {
        if self.sizes.is_empty() {
            return None;
        }
        Some(self.total / self.sizes.len() as f64)
    }

    /// Sets the size of `row` and shifts every later position by the difference.
    ///
    /// Returns the applied delta (`0.0` when the size is unchanged). Out-of-range rows are
    /// ignored.
    pub fn update_size(&mut self, row: usize, size: f64) -> f64 {
        let Some(&cur) = self.sizes.get(row) else {
            return 0.0;
        };
        let size = sanitize(size);
        if size == cur {
            return 0.0;
        }
        let delta = size - cur;
        self.sizes[row] = size;
        for pos in &mut self.positions[row + 1..] {
            *pos += delta;
        }
        self.total += delta;
        delta
    }

    /// Inserts a new row of `size` before `row`, shifting that row and everything after it
    /// down by one slot.
    ///
    /// `row == self.len()` appends. Larger rows are ignored.
    pub fn insert_at(&mut self, row: usize, size: f64) {
        let n = self.sizes.len();
        if row > n {
            return;
        }
        let size = sanitize(size);
        let start = if row == n {
            self.total
        } else {
            self.positions[row]
        };
        self.sizes.insert(row, size);
        self.positions.insert(row, start);
        for pos in &mut self.positions[row + 1..] {
            *pos += size;
        }
        self.total += size;
    }

    /// Appends a row of `size`.
    pub fn push(&mut self, size: f64) {
        self.insert_at(self.sizes.len(), size);
    }

    /// Returns the smallest row whose start offset is `>= offset`.
    ///
    /// Offsets past the last row's start return `self.len()`.
    pub fn find_row_at(&self, offset: f64) -> usize {
        self.positions.partition_point(|&pos| pos < offset)
    }
}

fn sanitize(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}
