use std::collections::VecDeque;

use virtualist::{
    Axis, FramePump, FrameToken, Item, ListOptions, PositionedItem, RenderBatch, RenderSurface,
    VirtualList,
};

// A headless "DOM": remembers the scroll offset and the rows currently presented.
#[derive(Debug, Default)]
struct Viewport {
    scroll: f64,
    extent: f64,
    content: f64,
    rows: Vec<PositionedItem<String>>,
}

impl RenderSurface<String> for Viewport {
    fn scroll_offset(&self, _axis: Axis) -> f64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, _axis: Axis, offset: f64) {
        self.scroll = offset;
    }

    fn viewport_extent(&self, _axis: Axis) -> f64 {
        self.extent
    }

    fn set_content_extent(&mut self, _axis: Axis, extent: f64) {
        self.content = extent;
    }

    fn clear(&mut self) {
        self.rows.clear();
    }

    fn insert(&mut self, item: PositionedItem<String>) {
        self.rows.push(item);
    }

    fn replace(&mut self, previous: String, item: PositionedItem<String>) {
        if let Some(slot) = self.rows.iter_mut().find(|r| r.handle == previous) {
            *slot = item;
        }
    }

    fn apply(&mut self, batch: RenderBatch<String>) {
        println!(
            "render window={:?} items={} content_extent={}",
            batch.window,
            batch.items.len(),
            batch.content_extent
        );
        self.rows = batch.items;
    }
}

// Frames fire when the simulated event loop drains the queue.
#[derive(Debug, Default)]
struct FrameQueue {
    pending: VecDeque<FrameToken>,
}

impl FramePump for FrameQueue {
    fn request_frame(&mut self, token: FrameToken) {
        self.pending.push_back(token);
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
    }
}

fn drain(list: &mut VirtualList<String, Viewport, FrameQueue>, now_ms: u64) {
    // Frames requested while draining fire on the next tick.
    let fired: Vec<FrameToken> = list.pump_mut().pending.drain(..).collect();
    for token in fired {
        if let Err(err) = list.on_frame(token, now_ms) {
            eprintln!("frame failed: {err}");
        }
    }
}

fn main() {
    let options = ListOptions::new(100_000, 24.0).with_generate(|i| {
        // Every tenth row is a taller section header.
        if i % 10 == 0 {
            Item::Sized(format!("section {}", i / 10), 40.0)
        } else {
            Item::Bare(format!("row {i}"))
        }
    });
    let viewport = Viewport {
        extent: 480.0,
        ..Viewport::default()
    };
    let mut list = match VirtualList::new(options, viewport, FrameQueue::default()) {
        Ok(list) => list,
        Err(err) => {
            eprintln!("failed to build list: {err}");
            return;
        }
    };
    println!("snapshot={:?}", list.snapshot());

    // A burst of scroll events coalesces into one render.
    for step in 1..=5 {
        list.surface_mut().scroll = step as f64 * 300.0;
        list.on_scroll();
    }
    drain(&mut list, 16);

    // Animate to item 50_000, one frame per 16ms, re-rendering as the surface scrolls.
    let mut now_ms = 32;
    if let Some(target) = list.scroll_to_index(50_000, 250, now_ms) {
        println!("scrolling to offset {target}");
    }
    while list.is_animating() {
        drain(&mut list, now_ms);
        list.on_scroll();
        drain(&mut list, now_ms);
        now_ms += 16;
    }

    let first = list.surface().rows.first().map(|r| r.handle.clone());
    println!(
        "settled at scroll={} first={first:?} window={:?}",
        list.surface().scroll,
        list.window()
    );

    if let Err(err) = list.add_item(list.window().start + 1, true) {
        eprintln!("add_item failed: {err}");
    }
    list.destroy();
    println!("destroyed={} rows={}", list.is_destroyed(), list.surface().rows.len());
}
