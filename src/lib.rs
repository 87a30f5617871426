//! A headless windowing engine for virtualized lists and fixed-column grids.
//!
//! Only the rows intersecting (or near) the viewport are materialized, while callers keep a
//! stable coordinate space for the whole collection. The crate covers the hard parts:
//!
//! - per-row sizes and cumulative offsets that stay correct as items report their real size
//!   and as rows are inserted ([`PositionIndex`])
//! - turning a scroll offset and viewport extent into a buffered row window
//!   ([`WindowCalculator`])
//! - coalescing bursts of scroll/resize/mutation events into single frame-aligned render passes
//!   ([`RenderScheduler`])
//! - cancellable, eased scroll-to-index animation ([`ScrollAnimator`])
//!
//! It is UI-agnostic. The host provides:
//! - a [`RenderSurface`]: scroll offset, viewport extent, and a sink for positioned items
//! - a [`FramePump`]: frame registrations that are fed back through [`VirtualList::on_frame`]
//! - an item generator (`index -> Item`)
//!
//! Enable the `tracing` feature for `trace`/`debug` events under the `virtualist` target, and
//! `serde` for (de)serializable plain data types.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod animator;
mod error;
mod item_cache;
mod list;
mod options;
mod position_index;
mod scheduler;
mod surface;
mod types;
mod window;


pub use animator::{AnimationStep, Easing, ScrollAnimation, ScrollAnimator};
pub use error::{ConfigError, Error, GenerateError};
pub use item_cache::ItemCache;
pub use list::VirtualList;
pub use options::{AfterGenerateHook, AfterRenderHook, BeforeGenerateHook, Generator, ListOptions};
pub use position_index::PositionIndex;
pub use scheduler::{ChangeFilter, RenderScheduler};
pub use surface::{FramePump, RenderSurface};
pub use types::{
    Axis, FrameKind, FrameToken, Item, LayoutSnapshot, PositionedItem, RenderBatch, Window,
    WindowMetrics,
};
pub use window::WindowCalculator;
