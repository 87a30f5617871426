use std::sync::Arc;

use crate::{Axis, ConfigError, Easing, GenerateError, Item};

/// Produces the item for an index.
///
/// Must be deterministic for a given index under a given configuration: cached indexes are not
/// regenerated unless explicitly invalidated.
pub type Generator<H> = Arc<dyn Fn(usize) -> Result<Item<H>, GenerateError> + Send + Sync>;

/// Called before an item in the window is materialized, with its previously cached handle.
pub type BeforeGenerateHook<H> = Arc<dyn Fn(usize, Option<&H>) + Send + Sync>;

/// Called after an item has been materialized and positioned.
pub type AfterGenerateHook<H> = Arc<dyn Fn(usize, &H) + Send + Sync>;

/// Called after a render pass has been applied to the surface.
pub type AfterRenderHook = Arc<dyn Fn() + Send + Sync>;

/// Configuration for [`crate::VirtualList`].
///
/// Closures are stored in `Arc`s so a copy can be tweaked and passed to `refresh` without
/// reallocating them.
pub struct ListOptions<H> {
    pub total_items: usize,
    /// Default size along the scroll axis, used until an item reports its own.
    pub item_size: f64,
    pub generate: Option<Generator<H>>,
    /// Minimum number of look-ahead rows.
    pub buffer: usize,
    pub horizontal: bool,
    /// Items sharing one row (grid mode). `0` is treated as `1`.
    pub items_per_row: usize,
    pub before_generate: Option<BeforeGenerateHook<H>>,
    pub after_generate: Option<AfterGenerateHook<H>>,
    pub after_render: Option<AfterRenderHook>,
    /// Curve used by `scroll_to_index`.
    pub easing: Easing,
}

impl<H> Clone for ListOptions<H> {
    fn clone(&self) -> Self {
        Self {
            total_items: self.total_items,
            item_size: self.item_size,
            generate: self.generate.clone(),
            buffer: self.buffer,
            horizontal: self.horizontal,
            items_per_row: self.items_per_row,
            before_generate: self.before_generate.clone(),
            after_generate: self.after_generate.clone(),
            after_render: self.after_render.clone(),
            easing: self.easing,
        }
    }
}

impl<H> ListOptions<H> {
    /// Creates options for `total_items` items of default size `item_size`.
    ///
    /// A generator must be added with [`Self::with_generate`] or [`Self::with_try_generate`]
    /// before the options are usable.
    pub fn new(total_items: usize, item_size: f64) -> Self {
        Self {
            total_items,
            item_size,
            generate: None,
            buffer: 0,
            horizontal: false,
            items_per_row: 1,
            before_generate: None,
            after_generate: None,
            after_render: None,
            easing: Easing::default(),
        }
    }

    /// Checks the options, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generate.is_none() {
            return Err(ConfigError::MissingGenerator);
        }
        if !self.item_size.is_finite() || self.item_size <= 0.0 {
            return Err(ConfigError::InvalidItemSize(self.item_size));
        }
        Ok(())
    }

    pub fn axis(&self) -> Axis {
        Axis::from_horizontal(self.horizontal)
    }

    pub fn items_per_row(&self) -> usize {
        self.items_per_row.max(1)
    }

    /// Number of rows needed for `total_items` at `items_per_row`.
    pub fn row_count(&self) -> usize {
        self.total_items.div_ceil(self.items_per_row())
    }

    /// Sets an infallible generator.
    pub fn with_generate(
        mut self,
        generate: impl Fn(usize) -> Item<H> + Send + Sync + 'static,
    ) -> Self
    where
        H: 'static,
    {
        self.generate = Some(Arc::new(
            move |i: usize| -> Result<Item<H>, GenerateError> { Ok(generate(i)) },
        ));
        self
    }

    /// Sets a fallible generator. Its errors abort the render pass and reach the caller.
    pub fn with_try_generate(
        mut self,
        generate: impl Fn(usize) -> Result<Item<H>, GenerateError> + Send + Sync + 'static,
    ) -> Self {
        self.generate = Some(Arc::new(generate));
        self
    }

    pub fn with_total_items(mut self, total_items: usize) -> Self {
        self.total_items = total_items;
        self
    }

    pub fn with_item_size(mut self, item_size: f64) -> Self {
        self.item_size = item_size;
        self
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_items_per_row(mut self, items_per_row: usize) -> Self {
        self.items_per_row = items_per_row;
        self
    }

    pub fn with_before_generate(
        mut self,
        hook: Option<impl Fn(usize, Option<&H>) + Send + Sync + 'static>,
    ) -> Self {
        self.before_generate = hook.map(|f| -> BeforeGenerateHook<H> { Arc::new(f) });
        self
    }

    pub fn with_after_generate(
        mut self,
        hook: Option<impl Fn(usize, &H) + Send + Sync + 'static>,
    ) -> Self {
        self.after_generate = hook.map(|f| -> AfterGenerateHook<H> { Arc::new(f) });
        self
    }

    pub fn with_after_render(mut self, hook: Option<impl Fn() + Send + Sync + 'static>) -> Self {
        self.after_render = hook.map(|f| -> AfterRenderHook { Arc::new(f) });
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl<H> core::fmt::Debug for ListOptions<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("total_items", &self.total_items)
            .field("item_size", &self.item_size)
            .field("has_generate", &self.generate.is_some())
            .field("buffer", &self.buffer)
            .field("horizontal", &self.horizontal)
            .field("items_per_row", &self.items_per_row)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}
