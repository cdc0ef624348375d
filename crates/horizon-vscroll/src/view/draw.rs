//! The paint pass.
//!
//! Only items inside the visible window are drawn. For each one the template
//! is bound to the item and walked at the item's position, so the number of
//! primitives issued depends on the viewport size, never on the collection
//! size.

use horizon_vscroll_core::Item;
use horizon_vscroll_core::logging::targets;
use horizon_vscroll_render::{Color, Painter, Point, Rect};

use crate::binding::bind_tree;
use crate::config::DiagnosticsConfig;
use crate::template::Template;

use super::geometry::LayoutMetrics;

/// Counters for one paint pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Items whose template was drawn.
    pub items_drawn: usize,
    /// Primitives issued to the painter.
    pub commands: usize,
}

/// Everything one paint pass reads.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext<'a> {
    pub template: &'a Template,
    pub items: &'a [Item],
    pub metrics: &'a LayoutMetrics,
    pub scroll: f32,
    pub selected: Option<usize>,
    pub diagnostics: &'a DiagnosticsConfig,
}

/// Draw every item in the visible window.
pub fn draw_items(ctx: &DrawContext<'_>, painter: &mut dyn Painter) -> DrawStats {
    let mut stats = DrawStats::default();
    let range = ctx.metrics.visible_range(ctx.scroll);
    let diagnostics = ctx.diagnostics;

    for index in range.clone() {
        // The collection may have shrunk since the range was derived
        let Some(item) = ctx.items.get(index) else {
            break;
        };
        let rect = ctx.metrics.item_rect(index, ctx.scroll);
        let selected = ctx.selected == Some(index);

        if diagnostics.debug_draw {
            let color = if selected {
                diagnostics.selection_color
            } else {
                Color::TRANSPARENT
            };
            painter.stroke_rect(rect, color, diagnostics.selection_border_width);
            stats.commands += 1;
        } else if diagnostics.highlight_selection && selected {
            painter.stroke_rect(rect, diagnostics.selection_color, diagnostics.selection_border_width);
            stats.commands += 1;
        }

        stats.commands += draw_template(ctx.template, Some(item), rect.origin, diagnostics, painter);
        stats.items_drawn += 1;
    }

    tracing::trace!(
        target: targets::DRAW,
        start = range.start,
        end = range.end,
        items = stats.items_drawn,
        commands = stats.commands,
        "drew visible window"
    );
    stats
}

/// Draw the bare template once at `(margin, 0)` with no item bound.
pub fn draw_preview(ctx: &DrawContext<'_>, painter: &mut dyn Painter) -> DrawStats {
    let origin = Point::new(ctx.metrics.margin, 0.0);
    let commands = draw_template(ctx.template, None, origin, ctx.diagnostics, painter);
    DrawStats {
        items_drawn: 1,
        commands,
    }
}

fn draw_template(
    template: &Template,
    item: Option<&Item>,
    origin: Point,
    diagnostics: &DiagnosticsConfig,
    painter: &mut dyn Painter,
) -> usize {
    let mut commands = 0;
    bind_tree(template, item, origin, |_, rect: Rect, drawable| {
        if drawable.draw(painter) {
            commands += 1;
        }
        if diagnostics.debug_draw {
            painter.stroke_rect(rect, Color::WHITE, 1.0);
            commands += 1;
        }
    });
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListConfig;
    use crate::template::TemplateNode;
    use horizon_vscroll_core::Value;
    use horizon_vscroll_render::{DrawCommand, RecordingPainter, Size};

    fn template() -> Template {
        Template::new(
            TemplateNode::container("Row", Rect::new(0.0, 0.0, 50.0, 20.0))
                .with_child(TemplateNode::text("-name", Rect::new(0.0, 0.0, 50.0, 20.0), "{0}")),
        )
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item::map([("name", Value::from(format!("item {i}")))]))
            .collect()
    }

    fn paint(
        items: &[Item],
        selected: Option<usize>,
        diagnostics: &DiagnosticsConfig,
        preview: bool,
    ) -> (DrawStats, RecordingPainter) {
        let template = template();
        let config = ListConfig {
            row_width: 50.0,
            ..ListConfig::default()
        };
        let metrics = LayoutMetrics::compute(Size::new(100.0, 40.0), template.size(), &config, items.len());
        let ctx = DrawContext {
            template: &template,
            items,
            metrics: &metrics,
            scroll: 0.0,
            selected,
            diagnostics,
        };
        let mut painter = RecordingPainter::new();
        let stats = if preview {
            draw_preview(&ctx, &mut painter)
        } else {
            draw_items(&ctx, &mut painter)
        };
        (stats, painter)
    }

    #[test]
    fn test_draws_visible_window_only() {
        // 2 columns, 40px viewport over 20px rows: 2 rows + 1 overscan
        let items = items(100);
        let (stats, painter) = paint(&items, None, &DiagnosticsConfig::default(), false);
        assert_eq!(stats.items_drawn, 6);
        assert_eq!(stats.commands, 6);
        assert_eq!(painter.texts()[..3], ["item 0", "item 1", "item 2"]);
    }

    #[test]
    fn test_selection_outline() {
        let items = items(4);
        let (stats, painter) = paint(&items, Some(1), &DiagnosticsConfig::default(), false);
        assert_eq!(stats.commands, 5);

        let outlines: Vec<_> = painter.commands().iter().filter(|c| c.is_outline()).collect();
        assert_eq!(
            outlines,
            vec![&DrawCommand::Rect {
                rect: Rect::new(50.0, 0.0, 50.0, 20.0),
                color: Color::RED,
                filled: false,
                border_width: 8.0,
            }]
        );
    }

    #[test]
    fn test_debug_outlines() {
        let items = items(2);
        let diagnostics = DiagnosticsConfig {
            debug_draw: true,
            ..DiagnosticsConfig::default()
        };
        let (stats, painter) = paint(&items, Some(0), &diagnostics, false);

        // Per item: one item outline, the text, and one outline per node
        assert_eq!(stats.commands, 2 * (1 + 1 + 2));
        let first = &painter.commands()[0];
        assert!(matches!(first, DrawCommand::Rect { color, filled: false, .. } if *color == Color::RED));
        let unselected = painter
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { color, .. } if *color == Color::TRANSPARENT))
            .count();
        assert_eq!(unselected, 1);
    }

    #[test]
    fn test_no_highlight() {
        let items = items(2);
        let diagnostics = DiagnosticsConfig {
            highlight_selection: false,
            ..DiagnosticsConfig::default()
        };
        let (stats, _) = paint(&items, Some(0), &diagnostics, false);
        assert_eq!(stats.commands, 2);
    }

    #[test]
    fn test_empty_collection_draws_nothing() {
        let (stats, painter) = paint(&[], None, &DiagnosticsConfig::default(), false);
        assert_eq!(stats, DrawStats::default());
        assert!(painter.is_empty());
    }

    #[test]
    fn test_preview_draws_raw_template() {
        let items = items(10);
        let (stats, painter) = paint(&items, None, &DiagnosticsConfig::default(), true);
        assert_eq!(stats.items_drawn, 1);
        assert_eq!(painter.texts(), vec!["{0}"]);
    }
}
