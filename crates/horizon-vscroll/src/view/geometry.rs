//! Layout math for the virtual window.
//!
//! Every item has the same size, so placement is pure arithmetic on the
//! index: no per-item layout is ever stored. The free functions compute one
//! quantity each; [`LayoutMetrics`] bundles the values for one pass so that
//! drawing, hit-testing and scroll correction agree on the same numbers.

use std::ops::Range;

use horizon_vscroll_render::{Point, Rect, Size};

use crate::config::{LayoutMode, ListConfig};

use super::hit_test;

/// Size of every item slot.
///
/// The height is the template's natural height. The width is `fixed_width`
/// when it is positive, otherwise the viewport width when `fill_width` is
/// set, otherwise the template's natural width.
pub fn item_size(viewport: Size, template_size: Size, fixed_width: Option<f32>, fill_width: bool) -> Size {
    let width = match fixed_width {
        Some(width) if width > 0.0 => width,
        _ if fill_width => viewport.width,
        _ => template_size.width,
    };
    Size::new(width, template_size.height)
}

/// Number of items per row. Always at least one.
pub fn column_count(viewport_width: f32, item_width: f32, mode: LayoutMode) -> usize {
    match mode {
        LayoutMode::List => 1,
        LayoutMode::Grid => {
            if !(item_width > 0.0) || !item_width.is_finite() || !viewport_width.is_finite() {
                return 1;
            }
            ((viewport_width / item_width).floor() as usize).max(1)
        }
    }
}

/// Total scrollable height of the content.
///
/// This is the continuous ratio `count * height / columns`, so a partially
/// filled last row contributes a fraction of a row.
pub fn content_extent(item_count: usize, item_height: f32, columns: usize) -> f32 {
    (item_count as f32 * item_height) / columns.max(1) as f32
}

/// Indices of the items that intersect the viewport, plus one row of overscan.
///
/// Empty when the geometry is degenerate or the offset lies past the end.
pub fn visible_range(
    scroll: f32,
    viewport_height: f32,
    item_height: f32,
    columns: usize,
    item_count: usize,
) -> Range<usize> {
    if !(item_height > 0.0) || !(viewport_height > 0.0) || !scroll.is_finite() {
        return 0..0;
    }
    let columns = columns.max(1);

    // Negative offsets clamp to the first row
    let first_row = (scroll / item_height).floor().max(0.0) as usize;
    let rows = (viewport_height / item_height + 1.0).ceil() as usize;

    let start = first_row.saturating_mul(columns);
    let end = start
        .saturating_add(rows.saturating_mul(columns))
        .min(item_count);

    if start > end { end..end } else { start..end }
}

/// Rect of the item at `index` in viewport coordinates.
pub fn item_rect(index: usize, columns: usize, item_size: Size, scroll: f32, margin: f32) -> Rect {
    let columns = columns.max(1);
    let col = (index % columns) as f32;
    let row = (index / columns) as f32;
    Rect::new(
        col * item_size.width + margin,
        row * item_size.height - scroll,
        item_size.width,
        item_size.height,
    )
}

/// Layout values derived for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Viewport size.
    pub viewport: Size,
    /// Size of every item slot.
    pub item_size: Size,
    /// Items per row.
    pub columns: usize,
    /// Horizontal offset of the grid block.
    pub margin: f32,
    /// Number of items in the collection.
    pub item_count: usize,
    /// Total scrollable height.
    pub content_extent: f32,
}

impl LayoutMetrics {
    /// Derive the metrics for a viewport, template size and item count.
    pub fn compute(viewport: Size, template_size: Size, config: &ListConfig, item_count: usize) -> Self {
        let item_size = item_size(viewport, template_size, config.fixed_width(), config.fill_width);
        let columns = column_count(viewport.width, item_size.width, config.layout_mode);
        let margin = match config.layout_mode {
            LayoutMode::Grid => config.alignment.margin(viewport.width, item_size.width, columns),
            LayoutMode::List => 0.0,
        };

        Self {
            viewport,
            item_size,
            columns,
            margin,
            item_count,
            content_extent: content_extent(item_count, item_size.height, columns),
        }
    }

    /// Whether items have no area to be drawn or hit in.
    pub fn is_degenerate(&self) -> bool {
        self.item_size.is_empty()
    }

    /// The visible window at `scroll`.
    pub fn visible_range(&self, scroll: f32) -> Range<usize> {
        if self.is_degenerate() {
            return 0..0;
        }
        visible_range(
            scroll,
            self.viewport.height,
            self.item_size.height,
            self.columns,
            self.item_count,
        )
    }

    /// Rect of the item at `index` at `scroll`.
    pub fn item_rect(&self, index: usize, scroll: f32) -> Rect {
        item_rect(index, self.columns, self.item_size, scroll, self.margin)
    }

    /// Index of the item under `pos` at `scroll`.
    pub fn index_at(&self, pos: Point, scroll: f32) -> Option<usize> {
        hit_test::index_at(
            pos,
            scroll,
            self.margin,
            self.item_size,
            self.columns,
            self.item_count,
        )
    }

    /// Largest resting scroll offset.
    pub fn max_scroll(&self) -> f32 {
        (self.content_extent - self.viewport.height).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::GridAlignment;

    #[test]
    fn test_item_size() {
        let viewport = Size::new(300.0, 200.0);
        let template = Size::new(50.0, 20.0);

        assert_eq!(item_size(viewport, template, None, true), Size::new(300.0, 20.0));
        assert_eq!(item_size(viewport, template, None, false), Size::new(50.0, 20.0));
        assert_eq!(item_size(viewport, template, Some(80.0), true), Size::new(80.0, 20.0));
        assert_eq!(item_size(viewport, template, Some(-1.0), false), Size::new(50.0, 20.0));
    }

    #[test]
    fn test_column_count() {
        assert_eq!(column_count(200.0, 50.0, LayoutMode::Grid), 4);
        assert_eq!(column_count(199.0, 50.0, LayoutMode::Grid), 3);
        assert_eq!(column_count(30.0, 50.0, LayoutMode::Grid), 1);
        assert_eq!(column_count(200.0, 0.0, LayoutMode::Grid), 1);
        assert_eq!(column_count(200.0, f32::NAN, LayoutMode::Grid), 1);
        assert_eq!(column_count(200.0, 50.0, LayoutMode::List), 1);
    }

    #[test]
    fn test_content_extent_is_continuous() {
        assert_eq!(content_extent(8, 20.0, 4), 40.0);
        assert_eq!(content_extent(7, 20.0, 4), 35.0);
        assert_eq!(content_extent(0, 20.0, 4), 0.0);
    }

    #[test]
    fn test_visible_range() {
        // 100px viewport over 20px rows shows 5 rows, plus one overscan row
        assert_eq!(visible_range(0.0, 100.0, 20.0, 1, 100), 0..6);
        assert_eq!(visible_range(45.0, 100.0, 20.0, 1, 100), 2..8);
        assert_eq!(visible_range(0.0, 100.0, 20.0, 3, 100), 0..18);
        assert_eq!(visible_range(0.0, 100.0, 20.0, 1, 3), 0..3);
        assert_eq!(visible_range(-30.0, 100.0, 20.0, 1, 100), 0..6);
    }

    #[test]
    fn test_visible_range_past_end_is_empty() {
        let range = visible_range(1000.0, 100.0, 20.0, 1, 10);
        assert!(range.is_empty());
        assert!(range.start <= 10);
    }

    #[test]
    fn test_visible_range_degenerate() {
        assert_eq!(visible_range(0.0, 100.0, 0.0, 1, 10), 0..0);
        assert_eq!(visible_range(0.0, 0.0, 20.0, 1, 10), 0..0);
        assert_eq!(visible_range(f32::NAN, 100.0, 20.0, 1, 10), 0..0);
    }

    #[test]
    fn test_item_rect() {
        let size = Size::new(50.0, 20.0);
        assert_eq!(item_rect(0, 4, size, 0.0, 0.0), Rect::new(0.0, 0.0, 50.0, 20.0));
        assert_eq!(item_rect(6, 4, size, 0.0, 0.0), Rect::new(100.0, 20.0, 50.0, 20.0));
        assert_eq!(item_rect(6, 4, size, 15.0, 5.0), Rect::new(105.0, 5.0, 50.0, 20.0));
    }

    #[test]
    fn test_metrics_grid_margin() {
        let config = ListConfig {
            row_width: 50.0,
            alignment: GridAlignment::Center,
            ..ListConfig::default()
        };
        let metrics = LayoutMetrics::compute(Size::new(210.0, 100.0), Size::new(40.0, 20.0), &config, 9);

        assert_eq!(metrics.item_size, Size::new(50.0, 20.0));
        assert_eq!(metrics.columns, 4);
        assert_eq!(metrics.margin, 5.0);
        assert_eq!(metrics.content_extent, 45.0);
        assert_eq!(metrics.max_scroll(), 0.0);
    }

    #[test]
    fn test_metrics_list_ignores_alignment() {
        let config = ListConfig {
            row_width: 50.0,
            alignment: GridAlignment::End,
            layout_mode: LayoutMode::List,
            ..ListConfig::default()
        };
        let metrics = LayoutMetrics::compute(Size::new(210.0, 100.0), Size::new(40.0, 20.0), &config, 9);
        assert_eq!(metrics.columns, 1);
        assert_eq!(metrics.margin, 0.0);
        assert_eq!(metrics.content_extent, 180.0);
        assert_eq!(metrics.max_scroll(), 80.0);
    }

    #[test]
    fn test_metrics_degenerate_template() {
        let metrics = LayoutMetrics::compute(
            Size::new(200.0, 100.0),
            Size::new(40.0, 0.0),
            &ListConfig::default(),
            10,
        );
        assert!(metrics.is_degenerate());
        assert!(metrics.visible_range(0.0).is_empty());
        assert_eq!(metrics.index_at(Point::new(5.0, 5.0), 0.0), None);
    }
}
