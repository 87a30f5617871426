use std::vec::Vec;
use core::ops::Range;

/// The scroll axis a list is laid out along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// A generated item: a renderable handle, optionally with an explicit size along the scroll axis.
///
/// `Bare` handles take the configured default size.
#[derive(Clone, Debug, PartialEq)]
pub enum Item<H> {
    Bare(H),
    Sized(H, f64),
}

impl<H> Item<H> {
    pub fn handle(&self) -> &H {
        match self {
            Self::Bare(h) | Self::Sized(h, _) => h,
        }
    }

    pub fn into_handle(self) -> H {
        match self {
            Self::Bare(h) | Self::Sized(h, _) => h,
        }
    }

    /// Returns the explicit size, or `default` for bare handles.
    ///
    /// Negative or non-finite sizes are treated as zero.
    pub fn size_or(&self, default: f64) -> f64 {
        match self {
            Self::Bare(_) => default,
            Self::Sized(_, size) if size.is_finite() && *size > 0.0 => *size,
            Self::Sized(..) => 0.0,
        }
    }
}

/// A contiguous `[start, end)` range of rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start: usize,
    pub end: usize, // exclusive
}

impl Window {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "Window start must not exceed end ({start} > {end})");
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start && row < self.end
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// One materialized item, positioned along the scroll axis.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedItem<H> {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    /// Number of columns per row (1 outside of grid mode).
    pub columns: usize,
    /// Start of the item's row along the scroll axis.
    pub offset: f64,
    /// Size of the item's row along the scroll axis.
    pub size: f64,
    pub handle: H,
}

impl<H> PositionedItem<H> {
    pub fn end(&self) -> f64 {
        self.offset + self.size
    }

    /// Returns the `(start, extent)` of this item across the scroll axis, as fractions of the
    /// viewport's cross extent.
    pub fn cross_span(&self) -> (f64, f64) {
        let columns = self.columns.max(1) as f64;
        (self.column as f64 / columns, 1.0 / columns)
    }
}

/// Everything a render pass hands to the surface.
///
/// Items are ordered by increasing index.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderBatch<H> {
    pub axis: Axis,
    pub window: Window,
    pub content_extent: f64,
    pub items: Vec<PositionedItem<H>>,
}

/// What a frame registration is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameKind {
    Render,
    Scroll,
}

/// Identifies one frame registration with the host's frame pump.
///
/// A token is only honored while it matches the registration its owner is waiting on; stale
/// tokens are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameToken {
    pub kind: FrameKind,
    pub generation: u64,
}

/// The sizing figures a window computation was based on.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowMetrics {
    pub average_size: f64,
    pub screen_rows: usize,
    pub buffer_rows: usize,
}

/// A lightweight snapshot of the list's layout state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSnapshot {
    pub axis: Axis,
    pub total_items: usize,
    pub row_count: usize,
    pub total_extent: f64,
    pub window: Window,
    pub render_pending: bool,
    pub animating: bool,
}
