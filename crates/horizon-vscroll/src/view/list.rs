//! VirtualScrollList, the host-facing control.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use horizon_vscroll::prelude::*;
//! use horizon_vscroll::render::RecordingPainter;
//!
//! let template = Template::new(
//!     TemplateNode::container("Row", Rect::new(0.0, 0.0, 200.0, 20.0))
//!         .with_child(TemplateNode::text("-name", Rect::new(0.0, 0.0, 200.0, 20.0), "{0}")),
//! );
//!
//! let items = shared_items(vec![
//!     Item::map([("name", Value::from("Apple"))]),
//!     Item::map([("name", Value::from("Milk"))]),
//! ]);
//!
//! let mut list = VirtualScrollList::new(OperatingMode::Runtime)
//!     .with_template(Arc::new(template))
//!     .with_items(items);
//! list.set_geometry(Rect::new(0.0, 0.0, 200.0, 100.0));
//!
//! list.item_selected.connect(|index| {
//!     println!("Selected: {:?}", index);
//! });
//!
//! let mut painter = RecordingPainter::new();
//! list.paint(&mut painter);
//! assert_eq!(painter.texts(), vec!["Apple", "Milk"]);
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use horizon_vscroll_core::logging::targets;
use horizon_vscroll_core::{Item, Signal};
use horizon_vscroll_render::{Painter, Point, Rect};

use crate::config::{DragBehavior, LayoutMode, ListConfig};
use crate::events::{
    MouseButton, MouseMoveEvent, MousePressEvent, MouseReleaseEvent, PointerEvent, WheelEvent,
};
use crate::template::Template;

use super::alignment::GridAlignment;
use super::draw::{DrawContext, DrawStats};
use super::geometry::LayoutMetrics;
use super::mode::{ModeStrategy, OperatingMode};
use super::scroll::ScrollController;

/// A host-owned item collection shared with the list.
///
/// The host may add, remove or replace items between passes. Every pass
/// reads the current length again.
pub type SharedItems = Arc<RwLock<Vec<Item>>>;

/// Wrap a vector of items for sharing with a list.
pub fn shared_items(items: Vec<Item>) -> SharedItems {
    Arc::new(RwLock::new(items))
}

/// A scrollable list or grid that only draws the items in view.
///
/// Every item is drawn from the same [`Template`]. Layout is derived from the
/// template's size and the viewport, so the cost of a frame depends on how
/// many items fit on screen, not on how many items exist.
///
/// # Signals
///
/// - `item_selected(Option<usize>)`: Emitted when the selection changes
/// - `redraw_requested(())`: Emitted when the list goes from clean to dirty
pub struct VirtualScrollList {
    // Behavior
    mode: Box<dyn ModeStrategy>,
    config: ListConfig,

    // Content
    template: Option<Arc<Template>>,
    items: SharedItems,
    template_warned: bool,

    // Viewport
    geometry: Rect,
    scroll: ScrollController,

    // Interaction
    selected: Option<usize>,
    pressed: bool,
    last_pointer: Option<Point>,

    needs_redraw: bool,

    // Signals
    /// Emitted when the selected item changes.
    pub item_selected: Signal<Option<usize>>,
    /// Emitted when the list needs to be painted again.
    pub redraw_requested: Signal<()>,
}

impl Default for VirtualScrollList {
    fn default() -> Self {
        Self::new(OperatingMode::Runtime)
    }
}

impl VirtualScrollList {
    /// Create an empty list with the default configuration.
    pub fn new(mode: OperatingMode) -> Self {
        let config = ListConfig::default();
        Self {
            mode: mode.strategy(),
            scroll: ScrollController::new(config.scroll_tick_amount)
                .with_correction_rate(config.correction_rate),
            config,
            template: None,
            items: shared_items(Vec::new()),
            template_warned: false,
            geometry: Rect::ZERO,
            selected: None,
            pressed: false,
            last_pointer: None,
            needs_redraw: true,
            item_selected: Signal::new(),
            redraw_requested: Signal::new(),
        }
    }

    /// Set the configuration using builder pattern.
    pub fn with_config(mut self, config: ListConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Set the template using builder pattern.
    pub fn with_template(mut self, template: Arc<Template>) -> Self {
        self.set_template(Some(template));
        self
    }

    /// Set the item collection using builder pattern.
    pub fn with_items(mut self, items: SharedItems) -> Self {
        self.set_items(items);
        self
    }

    /// The operating mode chosen at construction.
    pub fn mode(&self) -> OperatingMode {
        self.mode.mode()
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// The template drawn for each item.
    pub fn template(&self) -> Option<&Arc<Template>> {
        self.template.as_ref()
    }

    /// Replace the template. `None` leaves the list inert.
    pub fn set_template(&mut self, template: Option<Arc<Template>>) {
        self.template = template;
        self.template_warned = false;
        self.request_redraw();
    }

    /// The shared item collection.
    pub fn items(&self) -> &SharedItems {
        &self.items
    }

    /// Replace the shared item collection.
    pub fn set_items(&mut self, items: SharedItems) {
        self.items = items;
        self.request_redraw();
    }

    /// Number of items currently in the collection.
    pub fn item_count(&self) -> usize {
        self.items.read().len()
    }

    /// Append an item to the shared collection.
    pub fn add_item(&mut self, item: impl Into<Item>) {
        self.items.write().push(item.into());
        self.request_redraw();
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ListConfig) {
        self.scroll.set_tick_amount(config.scroll_tick_amount);
        self.scroll.set_correction_rate(config.correction_rate);
        self.config = config;
        self.request_redraw();
    }

    /// Scroll distance of one wheel step.
    pub fn scroll_tick_amount(&self) -> f32 {
        self.config.scroll_tick_amount
    }

    pub fn set_scroll_tick_amount(&mut self, amount: f32) {
        self.config.scroll_tick_amount = amount;
        self.scroll.set_tick_amount(amount);
    }

    /// Fixed item width. Zero or negative sizes items automatically.
    pub fn row_width(&self) -> f32 {
        self.config.row_width
    }

    pub fn set_row_width(&mut self, width: f32) {
        self.config.row_width = width;
        self.request_redraw();
    }

    pub fn alignment(&self) -> GridAlignment {
        self.config.alignment
    }

    pub fn set_alignment(&mut self, alignment: GridAlignment) {
        self.config.alignment = alignment;
        self.request_redraw();
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.config.layout_mode
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        self.config.layout_mode = mode;
        self.request_redraw();
    }

    /// Toggle item and node outlines for this list.
    pub fn set_debug_draw(&mut self, enabled: bool) {
        self.config.diagnostics.debug_draw = enabled;
        self.request_redraw();
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The list's rect in its parent.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the list's rect. Positions passed to the list are relative to its
    /// top-left corner.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.request_redraw();
        }
    }

    /// Layout values for the current viewport, template and item count.
    ///
    /// `None` without a template.
    pub fn metrics(&self) -> Option<LayoutMetrics> {
        let template = self.template.as_ref()?;
        Some(LayoutMetrics::compute(
            self.geometry.size,
            template.size(),
            &self.config,
            self.item_count(),
        ))
    }

    /// Index of the item under `pos`, in list-local coordinates.
    pub fn index_at(&self, pos: Point) -> Option<usize> {
        self.metrics()?.index_at(pos, self.scroll.offset())
    }

    /// Rect of the item at `index` in list-local coordinates.
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        let metrics = self.metrics()?;
        (index < metrics.item_count).then(|| metrics.item_rect(index, self.scroll.offset()))
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// The current scroll offset.
    pub fn scroll(&self) -> f32 {
        self.scroll.offset()
    }

    /// Jump to a scroll offset. Out-of-range offsets ease back on later ticks.
    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll.set_offset(offset);
        self.request_redraw();
    }

    /// Advance the frame clock by `dt` seconds.
    ///
    /// Returns `true` if the scroll offset moved and the list needs a redraw.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.mode.corrects_scroll() {
            return false;
        }
        let Some(metrics) = self.active_metrics() else {
            return false;
        };

        let _span = tracing::trace_span!(target: targets::SCROLL, "horizon_vscroll::tick", dt).entered();
        let moved = self
            .scroll
            .tick(dt, metrics.content_extent, metrics.viewport.height);
        if moved {
            self.request_redraw();
        }
        moved
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selected index, if it still refers to an existing item.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.filter(|&index| index < self.item_count())
    }

    /// Select an item and emit `item_selected`.
    ///
    /// Indices past the end of the collection clear the selection. The signal
    /// fires even if the selection did not change.
    pub fn select_item(&mut self, index: Option<usize>) {
        let index = index.filter(|&index| index < self.item_count());
        self.selected = index;
        self.request_redraw();
        self.item_selected.emit(index);
    }

    fn select_from_input(&mut self, index: Option<usize>) {
        if self.selected != index {
            tracing::debug!(target: targets::INPUT, ?index, "selection changed");
            self.selected = index;
            self.item_selected.emit(index);
        }
        self.request_redraw();
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Whether a redraw has been requested since the last paint.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clear and return the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn request_redraw(&mut self) {
        if !self.needs_redraw {
            self.needs_redraw = true;
            self.redraw_requested.emit(());
        }
    }

    /// Draw the visible items.
    #[tracing::instrument(
        skip_all,
        name = "horizon_vscroll::paint",
        target = "horizon_vscroll::draw",
        level = "trace"
    )]
    pub fn paint(&mut self, painter: &mut dyn Painter) -> DrawStats {
        self.needs_redraw = false;
        let Some(template) = self.active_template() else {
            return DrawStats::default();
        };

        let items = self.items.read();
        let metrics = LayoutMetrics::compute(self.geometry.size, template.size(), &self.config, items.len());
        let ctx = DrawContext {
            template: &template,
            items: &items,
            metrics: &metrics,
            scroll: self.scroll.offset(),
            selected: self.selected,
            diagnostics: &self.config.diagnostics,
        };
        self.mode.paint(&ctx, painter)
    }

    /// The template, warning once per missing template.
    fn active_template(&mut self) -> Option<Arc<Template>> {
        if self.template.is_none() && !self.template_warned {
            self.template_warned = true;
            tracing::warn!(target: targets::CONFIG, "virtual list template not found");
        }
        self.template.clone()
    }

    fn active_metrics(&mut self) -> Option<LayoutMetrics> {
        self.active_template()?;
        self.metrics()
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// Handle a pointer event. Returns `true` if the list consumed it.
    pub fn handle_event(&mut self, event: &PointerEvent) -> bool {
        if !self.mode.accepts_input() || self.active_template().is_none() {
            return false;
        }

        match event {
            PointerEvent::Press(e) => self.handle_mouse_press(e),
            PointerEvent::Release(e) => self.handle_mouse_release(e),
            PointerEvent::Move(e) => self.handle_mouse_move(e),
            PointerEvent::Wheel(e) => self.handle_wheel(e),
        }
    }

    fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }

        self.pressed = true;
        self.last_pointer = Some(event.local_pos);
        let index = self.index_at(event.local_pos);
        self.select_from_input(index);
        true
    }

    fn handle_mouse_release(&mut self, event: &MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }

        self.pressed = false;
        self.last_pointer = None;
        self.request_redraw();
        true
    }

    fn handle_mouse_move(&mut self, event: &MouseMoveEvent) -> bool {
        if !self.pressed {
            return false;
        }

        match self.config.drag_behavior {
            DragBehavior::Select => {
                let index = self.index_at(event.local_pos);
                self.select_from_input(index);
            }
            DragBehavior::Scroll => {
                let last = self.last_pointer.unwrap_or(event.local_pos);
                self.scroll.scroll_by(last.y - event.local_pos.y);
                self.request_redraw();
            }
        }
        self.last_pointer = Some(event.local_pos);
        true
    }

    fn handle_wheel(&mut self, event: &WheelEvent) -> bool {
        let ticks = if event.delta_y > 0.0 {
            -1
        } else if event.delta_y < 0.0 {
            1
        } else {
            return false;
        };

        self.scroll.scroll_by_ticks(ticks);
        tracing::trace!(target: targets::INPUT, ticks, offset = self.scroll.offset(), "wheel");
        self.request_redraw();
        true
    }
}

impl std::fmt::Debug for VirtualScrollList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualScrollList")
            .field("mode", &self.mode())
            .field("config", &self.config)
            .field("has_template", &self.template.is_some())
            .field("item_count", &self.item_count())
            .field("geometry", &self.geometry)
            .field("scroll", &self.scroll.offset())
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(VirtualScrollList: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateNode;
    use horizon_vscroll_core::Value;
    use horizon_vscroll_render::RecordingPainter;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn grid_list(count: usize) -> VirtualScrollList {
        let template = Template::new(
            TemplateNode::container("Cell", Rect::new(0.0, 0.0, 50.0, 20.0))
                .with_child(TemplateNode::text("-name", Rect::new(0.0, 0.0, 50.0, 20.0), "{0}")),
        );
        let items = (0..count)
            .map(|i| Item::map([("name", Value::from(format!("#{i}")))]))
            .collect();

        let mut list = VirtualScrollList::new(OperatingMode::Runtime)
            .with_config(ListConfig {
                row_width: 50.0,
                ..ListConfig::default()
            })
            .with_template(Arc::new(template))
            .with_items(shared_items(items));
        list.set_geometry(Rect::new(0.0, 0.0, 200.0, 60.0));
        list
    }

    #[test]
    fn test_press_selects_and_emits_once() {
        let mut list = grid_list(10);
        let emitted = Arc::new(AtomicUsize::new(0));
        let counter = emitted.clone();
        list.item_selected.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(list.handle_event(&PointerEvent::press(MouseButton::Left, Point::new(120.0, 25.0))));
        assert_eq!(list.selected_index(), Some(6));

        // Same item again: no signal
        list.handle_event(&PointerEvent::release(MouseButton::Left, Point::new(120.0, 25.0)));
        list.handle_event(&PointerEvent::press(MouseButton::Left, Point::new(121.0, 26.0)));
        assert_eq!(emitted.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_press_on_empty_space_clears_selection() {
        let mut list = grid_list(5);
        list.handle_event(&PointerEvent::press(MouseButton::Left, Point::new(10.0, 5.0)));
        assert_eq!(list.selected_index(), Some(0));

        // Row 1 only holds item 4
        list.handle_event(&PointerEvent::press(MouseButton::Left, Point::new(110.0, 25.0)));
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut list = grid_list(10);
        assert!(!list.handle_event(&PointerEvent::press(MouseButton::Right, Point::new(10.0, 5.0))));
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn test_drag_selects() {
        let mut list = grid_list(10);
        list.handle_event(&PointerEvent::press(MouseButton::Left, Point::new(10.0, 5.0)));
        list.handle_event(&PointerEvent::motion(Point::new(60.0, 5.0), MouseButton::Left.mask()));
        assert_eq!(list.selected_index(), Some(1));

        list.handle_event(&PointerEvent::release(MouseButton::Left, Point::new(60.0, 5.0)));
        assert!(!list.handle_event(&PointerEvent::motion(Point::new(110.0, 5.0), 0)));
        assert_eq!(list.selected_index(), Some(1));
    }

    #[test]
    fn test_drag_scrolls() {
        let mut list = grid_list(40);
        list.set_config(ListConfig {
            row_width: 50.0,
            drag_behavior: DragBehavior::Scroll,
            ..ListConfig::default()
        });

        list.handle_event(&PointerEvent::press(MouseButton::Left, Point::new(10.0, 50.0)));
        list.handle_event(&PointerEvent::motion(Point::new(10.0, 30.0), MouseButton::Left.mask()));
        list.handle_event(&PointerEvent::motion(Point::new(10.0, 20.0), MouseButton::Left.mask()));
        assert_eq!(list.scroll(), 30.0);
    }

    #[test]
    fn test_wheel() {
        let mut list = grid_list(40);
        list.handle_event(&PointerEvent::wheel(Point::new(0.0, 0.0), -120.0));
        list.handle_event(&PointerEvent::wheel(Point::new(0.0, 0.0), -1.0));
        assert_eq!(list.scroll(), 20.0);
        list.handle_event(&PointerEvent::wheel(Point::new(0.0, 0.0), 3.0));
        assert_eq!(list.scroll(), 10.0);
        assert!(!list.handle_event(&PointerEvent::wheel(Point::new(0.0, 0.0), 0.0)));
    }

    #[test]
    fn test_select_item_always_emits() {
        let mut list = grid_list(3);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();
        list.item_selected.connect(move |index| sink.lock().push(*index));

        list.select_item(Some(2));
        list.select_item(Some(2));
        list.select_item(Some(9));
        assert_eq!(*seen.lock(), vec![Some(2), Some(2), None]);
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn test_selection_hidden_after_shrink() {
        let mut list = grid_list(5);
        list.select_item(Some(4));
        list.items().write().truncate(2);
        assert_eq!(list.selected_index(), None);
    }

    #[test]
    fn test_redraw_requests_coalesce() {
        let mut list = grid_list(5);
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = requests.clone();
        list.redraw_requested.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        list.paint(&mut RecordingPainter::new());
        assert!(!list.needs_redraw());

        list.set_scroll(5.0);
        list.add_item(Value::from("extra"));
        assert_eq!(requests.load(Ordering::SeqCst), 1);
        assert!(list.take_redraw_request());
        assert!(!list.take_redraw_request());
    }

    #[test]
    fn test_missing_template_is_inert() {
        let mut list = VirtualScrollList::default().with_items(shared_items(vec![Item::from(Value::from(1))]));
        list.set_geometry(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.set_scroll(-40.0);

        let mut painter = RecordingPainter::new();
        assert_eq!(list.paint(&mut painter), DrawStats::default());
        assert!(painter.is_empty());
        assert!(!list.tick(0.1));
        assert_eq!(list.scroll(), -40.0);
        assert!(!list.handle_event(&PointerEvent::press(MouseButton::Left, Point::new(1.0, 1.0))));
        assert_eq!(list.index_at(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_preview_mode() {
        let mut list = grid_list(10);
        let template = list.template().cloned();
        let mut preview = VirtualScrollList::new(OperatingMode::Preview)
            .with_config(list.config().clone())
            .with_items(list.items().clone());
        preview.set_template(template);
        preview.set_geometry(list.geometry());
        preview.set_scroll(-30.0);

        assert_eq!(preview.mode(), OperatingMode::Preview);
        assert!(!preview.tick(0.1));
        assert_eq!(preview.scroll(), -30.0);
        assert!(!preview.handle_event(&PointerEvent::press(MouseButton::Left, Point::new(10.0, 5.0))));

        let mut painter = RecordingPainter::new();
        let stats = preview.paint(&mut painter);
        assert_eq!(stats.items_drawn, 1);
        assert_eq!(painter.texts(), vec!["{0}"]);

        // The runtime list draws the items instead
        let mut painter = RecordingPainter::new();
        assert!(list.paint(&mut painter).items_drawn > 1);
    }
}
