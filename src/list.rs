use std::vec::Vec;

use crate::scheduler::ChangeFilter;
use crate::{
    ConfigError, Error, FrameKind, FramePump, FrameToken, Generator, Item, ItemCache,
    LayoutSnapshot, ListOptions, PositionIndex, PositionedItem, RenderBatch, RenderScheduler,
    RenderSurface, ScrollAnimator, Window, WindowCalculator, WindowMetrics,
};

/// A virtualized list (or fixed-column grid) bound to a render surface and a frame pump.
///
/// The list owns all layout state: row sizes and positions, the item cache, the current window,
/// and the pending render / scroll-animation registrations. It is driven entirely by the host:
///
/// - [`Self::on_scroll`] / [`Self::on_resize`] when the surface reports a change
/// - [`Self::on_frame`] when a frame requested through the [`FramePump`] fires
///
/// Everything runs on the caller's thread; a render pass always completes (including handing its
/// batch to the surface) before the call that triggered it returns.
#[derive(Debug)]
pub struct VirtualList<H, S, P> {
    options: ListOptions<H>,
    surface: S,
    pump: P,

    rows: PositionIndex,
    cache: ItemCache<H>,
    calc: WindowCalculator,
    scheduler: RenderScheduler,
    animator: ScrollAnimator,
    filter: ChangeFilter,

    window: Window,
    last_start: Option<usize>,
    last_content_extent: Option<f64>,
    destroyed: bool,
}

impl<H: Clone, S: RenderSurface<H>, P: FramePump> VirtualList<H, S, P> {
    /// Validates `options`, lays out every row at the default size, and runs the first render
    /// pass.
    pub fn new(options: ListOptions<H>, surface: S, pump: P) -> Result<Self, Error> {
        options.validate()?;
        let axis = options.axis();
        vdebug!(
            total_items = options.total_items,
            item_size = options.item_size,
            items_per_row = options.items_per_row(),
            horizontal = axis.is_horizontal(),
            "VirtualList::new"
        );
        let mut list = Self {
            rows: PositionIndex::new(options.row_count(), options.item_size),
            cache: ItemCache::new(),
            calc: WindowCalculator::new(options.buffer),
            scheduler: RenderScheduler::new(),
            animator: ScrollAnimator::new(),
            filter: ChangeFilter::new(surface.viewport_extent(axis)),
            window: Window::EMPTY,
            last_start: None,
            last_content_extent: None,
            destroyed: false,
            options,
            surface,
            pump,
        };
        list.sync_content_extent();
        list.render(false)?;
        Ok(list)
    }

    pub fn options(&self) -> &ListOptions<H> {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn pump(&self) -> &P {
        &self.pump
    }

    pub fn pump_mut(&mut self) -> &mut P {
        &mut self.pump
    }

    pub fn positions(&self) -> &PositionIndex {
        &self.rows
    }

    pub fn cache(&self) -> &ItemCache<H> {
        &self.cache
    }

    pub fn total_items(&self) -> usize {
        self.options.total_items
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_extent(&self) -> f64 {
        self.rows.total_extent()
    }

    /// Rows materialized by the last completed render pass.
    pub fn window(&self) -> Window {
        self.window
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.options.items_per_row()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_render_pending(&self) -> bool {
        self.scheduler.is_scheduled()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Window sizing figures for the surface's current viewport.
    pub fn metrics(&self) -> Option<WindowMetrics> {
        let viewport = self.surface.viewport_extent(self.options.axis());
        self.calc.metrics(viewport, &self.rows)
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            axis: self.options.axis(),
            total_items: self.options.total_items,
            row_count: self.rows.len(),
            total_extent: self.rows.total_extent(),
            window: self.window,
            render_pending: self.scheduler.is_scheduled(),
            animating: self.animator.is_animating(),
        }
    }

    /// Whether item `index` overlaps the surface's viewport (or the buffered viewport).
    pub fn is_item_visible(&self, index: usize, with_buffer: bool) -> bool {
        if self.destroyed || index >= self.options.total_items {
            return false;
        }
        let axis = self.options.axis();
        self.calc.is_row_visible(
            self.row_of(index),
            self.surface.scroll_offset(axis),
            self.surface.viewport_extent(axis),
            &self.rows,
            with_buffer,
        )
    }

    /// Runs a render pass now.
    ///
    /// Unless `force` is set, the pass is skipped when the computed window starts at the same
    /// row as the previous one. Returns whether a batch was handed to the surface.
    pub fn render(&mut self, force: bool) -> Result<bool, Error> {
        if self.destroyed {
            return Ok(false);
        }
        let axis = self.options.axis();
        let scroll_offset = self.surface.scroll_offset(axis);
        let viewport = self.surface.viewport_extent(axis);
        let window = self.calc.compute_range(scroll_offset, viewport, &self.rows);

        if !force && self.last_start == Some(window.start) {
            vtrace!(start = window.start, "render skipped: window unchanged");
            return Ok(false);
        }
        vtrace!(
            start = window.start,
            end = window.end,
            force,
            scroll_offset,
            "render pass"
        );

        let items = self.materialize(window)?;
        self.last_start = Some(window.start);
        self.window = window;
        self.sync_content_extent();

        self.surface.apply(RenderBatch {
            axis,
            window,
            content_extent: self.rows.total_extent(),
            items,
        });
        self.filter.commit_repaint(self.surface.scroll_offset(axis));

        if let Some(hook) = &self.options.after_render {
            hook();
        }
        Ok(true)
    }

    /// Generates (or fetches from cache) every item of `window`, records row sizes, and
    /// positions the items. Rows are visited in increasing order.
    fn materialize(&mut self, window: Window) -> Result<Vec<PositionedItem<H>>, Error> {
        let generate = self.generator()?;
        let per_row = self.options.items_per_row();
        let total = self.options.total_items;
        let default_size = self.options.item_size;

        let mut items = Vec::with_capacity(window.len().saturating_mul(per_row));
        for row in window.rows() {
            let first = row * per_row;
            let last = total.min(first + per_row);
            let row_start = items.len();
            let mut row_size: Option<f64> = None;

            for index in first..last {
                if let Some(hook) = &self.options.before_generate {
                    hook(index, self.cache.peek(index).map(Item::handle));
                }
                let item = self
                    .cache
                    .get_or_try_insert_with(index, |i| generate(i))
                    .map_err(|source| {
                        vwarn!(index, "item generation failed; render pass aborted");
                        Error::Generate { index, source }
                    })?;
                let size = item.size_or(default_size);
                row_size = Some(row_size.map_or(size, |s| s.max(size)));
                items.push(PositionedItem {
                    index,
                    row,
                    column: index - first,
                    columns: per_row,
                    offset: 0.0,
                    size,
                    handle: item.handle().clone(),
                });
            }

            if let Some(size) = row_size {
                self.rows.update_size(row, size);
            }
            let offset = self.rows.position_of(row);
            let size = self.rows.size_of(row);
            for item in &mut items[row_start..] {
                item.offset = offset;
                item.size = size;
                if let Some(hook) = &self.options.after_generate {
                    hook(item.index, &item.handle);
                }
            }
        }
        Ok(items)
    }

    /// Handles a scroll notification from the surface.
    ///
    /// Only a move of more than one average row size since the last render pass requests a
    /// render. Smaller moves that add up across notifications are not tracked.
    pub fn on_scroll(&mut self) {
        if self.destroyed {
            return;
        }
        let offset = self.surface.scroll_offset(self.options.axis());
        let Some(average) = self.rows.average_size() else {
            return;
        };
        if !self.filter.scroll_passes(offset, average) {
            vtrace!(offset, "scroll below threshold");
            return;
        }
        self.request_render(false);
    }

    /// Handles a viewport-extent change reported by the surface.
    ///
    /// Changes of more than one average row size request a forced render.
    pub fn on_resize(&mut self, extent: f64) {
        if self.destroyed {
            return;
        }
        let average = self.rows.average_size().unwrap_or(0.0);
        if !self.filter.resize_passes(extent, average) {
            vtrace!(extent, "resize below threshold");
            return;
        }
        self.request_render(true);
    }

    /// Handles a fired frame registration.
    ///
    /// Stale tokens (cancelled, superseded, or after `destroy`) are ignored. Generation failures
    /// of the render pass are returned.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: u64) -> Result<(), Error> {
        if self.destroyed {
            vtrace!(generation = token.generation, "frame after destroy ignored");
            return Ok(());
        }
        match token.kind {
            FrameKind::Render => {
                let Some(force) = self.scheduler.take(token) else {
                    vtrace!(generation = token.generation, "stale render frame");
                    return Ok(());
                };
                self.render(force)?;
            }
            FrameKind::Scroll => {
                let Some(step) = self.animator.tick(token, now_ms) else {
                    vtrace!(generation = token.generation, "stale scroll frame");
                    return Ok(());
                };
                self.surface.set_scroll_offset(self.options.axis(), step.offset);
                if !step.done {
                    self.pump.request_frame(token);
                }
            }
        }
        Ok(())
    }

    /// Requests a render on the next frame, coalescing with any pass already pending.
    pub fn request_render(&mut self, force: bool) {
        if self.destroyed {
            return;
        }
        if let Some(token) = self.scheduler.request(force) {
            self.pump.request_frame(token);
        }
    }

    /// Applies new options and re-renders (forced).
    ///
    /// Row layout is rebuilt when the item count, default size, or items per row changed; the
    /// item cache is always dropped. With `immediate` the pass runs now, otherwise on the next
    /// frame.
    pub fn refresh(&mut self, options: ListOptions<H>, immediate: bool) -> Result<(), Error> {
        if self.destroyed {
            return Ok(());
        }
        options.validate()?;
        let relayout = options.total_items != self.options.total_items
            || options.item_size != self.options.item_size
            || options.items_per_row() != self.options.items_per_row();
        let axis_changed = options.axis() != self.options.axis();
        self.options = options;
        if axis_changed {
            self.last_content_extent = None;
            self.filter = ChangeFilter::new(self.surface.viewport_extent(self.options.axis()));
        }
        self.calc = WindowCalculator::new(self.options.buffer);
        if relayout {
            self.rows = PositionIndex::new(self.options.row_count(), self.options.item_size);
            self.cache = ItemCache::new();
            self.window = Window::EMPTY;
        } else {
            self.cache.clear();
        }
        vdebug!(
            total_items = self.options.total_items,
            relayout,
            immediate,
            "VirtualList::refresh"
        );
        self.sync_content_extent();
        self.schedule_forced(immediate)
    }

    /// Regenerates item `index`.
    ///
    /// Items that are not currently materialized are left alone. If the new item's size differs
    /// from its row's size, every later position shifts and a forced render follows (now with
    /// `immediate`, otherwise on the next frame). Otherwise the item is swapped in place.
    pub fn update_item(&mut self, index: usize, immediate: bool) -> Result<(), Error> {
        if self.destroyed || index >= self.options.total_items {
            vtrace!(index, "update_item out of range");
            return Ok(());
        }
        let row = self.row_of(index);
        if !self.window.contains(row) || !self.cache.contains(index) {
            vtrace!(index, "update_item: item not materialized");
            return Ok(());
        }
        let Some(previous) = self.cache.invalidate(index) else {
            return Ok(());
        };

        let generate = self.generator()?;
        let item = self
            .cache
            .get_or_try_insert_with(index, |i| generate(i))
            .map_err(|source| Error::Generate { index, source })?;
        let size = item.size_or(self.options.item_size);
        let handle = item.handle().clone();

        let row_size = self.rows.size_of(row);
        let per_row = self.options.items_per_row();
        let first = row * per_row;
        let last = self.options.total_items.min(first + per_row);
        // Grid rows take their largest member, so only a change of that maximum moves rows.
        let row_max = (first..last)
            .filter_map(|i| self.cache.peek(i))
            .map(|it| it.size_or(self.options.item_size))
            .fold(size, f64::max);
        if row_max != row_size {
            vdebug!(index, row, from = row_size, to = row_max, "row resized; forcing render");
            return self.schedule_forced(immediate);
        }

        self.surface.replace(
            previous.into_handle(),
            PositionedItem {
                index,
                row,
                column: index % per_row,
                columns: per_row,
                offset: self.rows.position_of(row),
                size: row_size,
                handle,
            },
        );
        Ok(())
    }

    /// Inserts a new item before `index` (`index == total_items` appends).
    ///
    /// Later items and rows shift down. A forced render follows only when the insertion lands
    /// inside the current window, or opens a row the window would have covered had the list been
    /// longer. The content extent is updated either way.
    pub fn add_item(&mut self, index: usize, immediate: bool) -> Result<(), Error> {
        if self.destroyed || index > self.options.total_items {
            vtrace!(index, "add_item out of range");
            return Ok(());
        }
        let per_row = self.options.items_per_row();
        let row = index / per_row;
        let prev_rows = self.rows.len();

        self.options.total_items += 1;
        self.cache.insert_slot(index);
        if per_row == 1 {
            self.rows.insert_at(row, self.options.item_size);
            if row < self.window.start {
                self.window = Window::new(self.window.start + 1, self.window.end + 1);
                self.last_start = self.last_start.map(|start| start + 1);
            }
        } else if self.options.row_count() > prev_rows {
            self.rows.push(self.options.item_size);
        }
        vtrace!(index, total_items = self.options.total_items, "add_item");
        self.sync_content_extent();

        if self.window.contains(row) || self.extends_window_tail(row, prev_rows) {
            return self.schedule_forced(immediate);
        }
        Ok(())
    }

    /// Whether `row` was appended right after a window that stopped short only because the list
    /// ran out of rows.
    fn extends_window_tail(&self, row: usize, prev_rows: usize) -> bool {
        if row != prev_rows || self.window.end != prev_rows || row < self.window.start {
            return false;
        }
        self.metrics().is_some_and(|m| {
            let reach = self
                .window
                .start
                .saturating_add(m.screen_rows)
                .saturating_add(m.buffer_rows);
            row < reach
        })
    }

    /// Animates the surface's scroll offset to the start of item `index`'s row.
    ///
    /// Any animation in flight is cancelled first. The animation only moves the scroll offset;
    /// rendering follows from the surface's own scroll notifications. Returns the target offset,
    /// or `None` for out-of-range indexes.
    pub fn scroll_to_index(&mut self, index: usize, duration_ms: u64, now_ms: u64) -> Option<f64> {
        if self.destroyed || index >= self.options.total_items {
            return None;
        }
        let axis = self.options.axis();
        let target = self.rows.position_of(self.row_of(index));
        let from = self.surface.scroll_offset(axis);
        self.cancel_scroll();
        let token = self
            .animator
            .animate_to(from, target, now_ms, duration_ms, self.options.easing);
        vtrace!(index, from, target, duration_ms, "scroll_to_index");
        self.pump.request_frame(token);
        Some(target)
    }

    /// Stops the scroll animation in flight, if any.
    pub fn cancel_scroll(&mut self) {
        if let Some(token) = self.animator.cancel() {
            self.pump.cancel_frame(token);
        }
    }

    /// Cancels pending frames and animations, clears the surface, and releases all layout state.
    ///
    /// Calling it again is a no-op, as is every other operation afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Some(token) = self.scheduler.cancel() {
            self.pump.cancel_frame(token);
        }
        self.cancel_scroll();
        self.surface.clear();

        self.cache.clear();
        self.rows = PositionIndex::default();
        self.window = Window::EMPTY;
        self.last_start = None;
        self.options.generate = None;
        self.options.before_generate = None;
        self.options.after_generate = None;
        self.options.after_render = None;
        vdebug!("VirtualList::destroy");
    }

    fn schedule_forced(&mut self, immediate: bool) -> Result<(), Error> {
        if immediate {
            self.render(true)?;
        } else {
            self.request_render(true);
        }
        Ok(())
    }

    fn generator(&self) -> Result<Generator<H>, Error> {
        self.options
            .generate
            .clone()
            .ok_or_else(|| ConfigError::MissingGenerator.into())
    }

    /// Pushes the total extent to the surface when it changed since the last push.
    fn sync_content_extent(&mut self) {
        let extent = self.rows.total_extent();
        if self.last_content_extent == Some(extent) {
            return;
        }
        vtrace!(extent, "content extent changed");
        self.last_content_extent = Some(extent);
        self.surface.set_content_extent(self.options.axis(), extent);
    }
}
