use crate::{PositionIndex, Window, WindowMetrics};

/// Turns a scroll offset and viewport extent into the window of rows to materialize.
///
/// The look-ahead buffer is `max(buffer, 3 * screen_rows)` rows, centered on the first visible
/// row. The 3x over-provisioning absorbs the scroll distance the change filter lets through
/// without a render (up to one average row size per notification).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowCalculator {
    buffer: usize,
}

impl WindowCalculator {
    /// `buffer` is the minimum number of look-ahead rows.
    pub fn new(buffer: usize) -> Self {
        Self { buffer }
    }

    pub fn buffer(&self) -> usize {
        self.buffer
    }

    /// Computes the average row size and the screen/buffer row counts for a viewport.
    ///
    /// Returns `None` for an empty index.
    pub fn metrics(&self, viewport_extent: f64, index: &PositionIndex) -> Option<WindowMetrics> {
        let average_size = index.average_size()?;
        let viewport_extent = finite_or_zero(viewport_extent);
        let screen_rows = if average_size > 0.0 {
            // Saturating float -> int cast.
            (viewport_extent / average_size).ceil() as usize
        } else {
            index.len()
        };
        let buffer_rows = self.buffer.max(screen_rows.saturating_mul(3));
        Some(WindowMetrics {
            average_size,
            screen_rows,
            buffer_rows,
        })
    }

    /// Computes the `[start, end)` row window for the given scroll state.
    ///
    /// Always returns `start <= end <= index.len()`. For non-uniform sizes the end is extended,
    /// if needed, so every row intersecting the raw viewport is included.
    pub fn compute_range(
        &self,
        scroll_offset: f64,
        viewport_extent: f64,
        index: &PositionIndex,
    ) -> Window {
        let Some(metrics) = self.metrics(viewport_extent, index) else {
            return Window::EMPTY;
        };
        let row_count = index.len();
        let scroll_offset = finite_or_zero(scroll_offset);
        let viewport_extent = finite_or_zero(viewport_extent);

        let found = index.find_row_at(scroll_offset);
        let first_visible =
            if found > 0 && (found == row_count || index.position_of(found) > scroll_offset) {
                found - 1
            } else {
                found
            };
        let start = found
            .saturating_sub(metrics.buffer_rows / 2)
            .min(first_visible);

        let mut end = row_count.min(
            start
                .saturating_add(metrics.screen_rows)
                .saturating_add(metrics.buffer_rows),
        );
        if viewport_extent > 0.0 {
            let last_needed = index.find_row_at(scroll_offset + viewport_extent);
            end = end.max(last_needed.min(row_count));
        }

        Window::new(start, end.max(start))
    }

    /// Extent-overlap test for `row` against the raw viewport, or against the viewport grown by
    /// `buffer_rows * average_size` on each side when `with_buffer` is set.
    pub fn is_row_visible(
        &self,
        row: usize,
        scroll_offset: f64,
        viewport_extent: f64,
        index: &PositionIndex,
        with_buffer: bool,
    ) -> bool {
        if row >= index.len() {
            return false;
        }
        let scroll_offset = finite_or_zero(scroll_offset);
        let viewport_extent = finite_or_zero(viewport_extent);
        let mut lo = scroll_offset;
        let mut hi = scroll_offset + viewport_extent;
        if with_buffer {
            if let Some(m) = self.metrics(viewport_extent, index) {
                let pad = m.buffer_rows as f64 * m.average_size;
                lo -= pad;
                hi += pad;
            }
        }
        index.end_of(row) > lo && index.position_of(row) < hi
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}
