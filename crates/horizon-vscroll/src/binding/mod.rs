//! Binding template nodes to items.
//!
//! The binder turns one template node plus one item into a [`Drawable`]: the
//! primitive that node contributes at a given position. Text nodes whose name
//! carries the [`BINDING_MARKER`](crate::template::BINDING_MARKER) look up
//! the matching item field and format it into their text. Every other node
//! draws its static content.
//!
//! Nothing here mutates the template, so the same tree serves every item.

mod format;

pub use format::{FormatError, format, format_value};

use horizon_vscroll_core::logging::targets;
use horizon_vscroll_core::{Item, Value, lookup};
use horizon_vscroll_render::{Color, Font, HorizontalAlign, Painter, Point, Rect, Texture};

use crate::template::{NodeKind, Template, TemplateNode, TextNode, Theme};

/// The primitive a template node resolves to for one item.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable<'a> {
    /// A run of text. `position` is the left end of the first baseline.
    Text {
        position: Point,
        text: String,
        align: HorizontalAlign,
        font: &'a Font,
        size: f32,
        wrap_width: f32,
    },
    /// A texture stretched over `rect`.
    Texture {
        rect: Rect,
        texture: &'a Texture,
        tile: bool,
        modulate: Color,
    },
    /// A solid rectangle.
    Fill { rect: Rect, color: Color },
    /// Nothing to draw.
    Empty,
}

impl Drawable<'_> {
    /// Issue this drawable's primitive. Returns `true` if anything was drawn.
    pub fn draw(&self, painter: &mut dyn Painter) -> bool {
        match self {
            Drawable::Text {
                position,
                text,
                align,
                font,
                size,
                wrap_width,
            } => painter.draw_text(*position, text, *align, font, *size, *wrap_width),
            Drawable::Texture {
                rect,
                texture,
                tile,
                modulate,
            } => painter.draw_texture_rect(*rect, texture, *tile, *modulate),
            Drawable::Fill { rect, color } => painter.fill_rect(*rect, *color),
            Drawable::Empty => return false,
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Drawable::Empty)
    }

    /// The text of a text drawable.
    pub fn text(&self) -> Option<&str> {
        match self {
            Drawable::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Resolve `node` placed at `origin` for `item`.
///
/// `origin` is the node's absolute top-left corner. With no item, bound text
/// nodes show their raw format string.
pub fn resolve_node<'a>(
    node: &'a TemplateNode,
    item: Option<&Item>,
    origin: Point,
    theme: &'a Theme,
) -> Drawable<'a> {
    let rect = Rect::from_origin_size(origin, node.rect().size);

    match node.kind() {
        NodeKind::Text(text_node) => {
            let size = theme.font_size_for(text_node);
            Drawable::Text {
                position: origin.offset(0.0, size),
                text: node_text(node, text_node, item),
                align: text_node.align,
                font: theme.font_for(text_node),
                size,
                wrap_width: rect.width(),
            }
        }
        NodeKind::Image(image) => match &image.texture {
            Some(texture) => Drawable::Texture {
                rect,
                texture,
                tile: false,
                modulate: image.modulate,
            },
            None => Drawable::Empty,
        },
        NodeKind::Fill(fill) => Drawable::Fill {
            rect,
            color: fill.color,
        },
        NodeKind::Container => Drawable::Empty,
    }
}

fn node_text(node: &TemplateNode, text_node: &TextNode, item: Option<&Item>) -> String {
    let (Some(key), Some(item)) = (node.binding_key(), item) else {
        return text_node.text.clone();
    };

    let value = lookup(item, key).unwrap_or(Value::None);
    match format(&text_node.text, std::slice::from_ref(&value)) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(
                target: targets::BINDING,
                node = node.name(),
                template = %text_node.text,
                %error,
                "invalid format string, drawing raw text"
            );
            text_node.text.clone()
        }
    }
}

/// Walk every node of `template` depth-first, parents before children.
///
/// Node rects are relative to their parent, so the walk threads the
/// accumulated offset down the tree starting at `offset`. `visit` receives
/// each node with its absolute rect and resolved drawable.
pub fn bind_tree<'t, F>(template: &'t Template, item: Option<&Item>, offset: Point, mut visit: F)
where
    F: FnMut(&'t TemplateNode, Rect, Drawable<'t>),
{
    walk(template.root(), template.theme(), item, offset, &mut visit);
}

fn walk<'t, F>(
    node: &'t TemplateNode,
    theme: &'t Theme,
    item: Option<&Item>,
    parent_origin: Point,
    visit: &mut F,
) where
    F: FnMut(&'t TemplateNode, Rect, Drawable<'t>),
{
    let rect = node.rect().translate(parent_origin);
    visit(node, rect, resolve_node(node, item, rect.origin, theme));

    for child in node.children() {
        walk(child, theme, item, rect.origin, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_vscroll_render::{RecordingPainter, TextureId};

    fn price_template() -> Template {
        Template::new(
            TemplateNode::container("Row", Rect::new(0.0, 0.0, 100.0, 20.0))
                .with_child(TemplateNode::text("-price", Rect::new(10.0, 2.0, 60.0, 16.0), "${0:0.0}"))
                .with_child(TemplateNode::text("Title", Rect::new(70.0, 2.0, 30.0, 16.0), "Total")),
        )
    }

    fn apple() -> Item {
        Item::map([("name", Value::from("Apple")), ("price", Value::from(1.5))])
    }

    #[test]
    fn test_bound_text() {
        let template = price_template();
        let node = &template.root().children()[0];
        let item = apple();

        let drawable = resolve_node(node, Some(&item), Point::new(10.0, 2.0), template.theme());
        assert_eq!(drawable.text(), Some("$1.5"));
        match drawable {
            Drawable::Text {
                position,
                wrap_width,
                size,
                ..
            } => {
                assert_eq!(position, Point::new(10.0, 18.0));
                assert_eq!(size, 16.0);
                assert_eq!(wrap_width, 60.0);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_static_text_ignores_item() {
        let template = price_template();
        let node = &template.root().children()[1];
        let drawable = resolve_node(node, Some(&apple()), Point::ZERO, template.theme());
        assert_eq!(drawable.text(), Some("Total"));
    }

    #[test]
    fn test_missing_field_formats_empty() {
        let node = TemplateNode::text("-weight", Rect::new(0.0, 0.0, 10.0, 10.0), "[{0}]");
        let theme = Theme::default();
        let drawable = resolve_node(&node, Some(&apple()), Point::ZERO, &theme);
        assert_eq!(drawable.text(), Some("[]"));
    }

    #[test]
    fn test_bad_format_falls_back_to_raw_text() {
        let node = TemplateNode::text("-price", Rect::new(0.0, 0.0, 10.0, 10.0), "{0");
        let theme = Theme::default();
        let drawable = resolve_node(&node, Some(&apple()), Point::ZERO, &theme);
        assert_eq!(drawable.text(), Some("{0"));

        let wide = TemplateNode::text("-price", Rect::new(0.0, 0.0, 10.0, 10.0), "{0,2147483647}");
        let drawable = resolve_node(&wide, Some(&apple()), Point::ZERO, &theme);
        assert_eq!(drawable.text(), Some("{0,2147483647}"));
    }

    #[test]
    fn test_no_item_shows_raw_text() {
        let template = price_template();
        let node = &template.root().children()[0];
        let drawable = resolve_node(node, None, Point::ZERO, template.theme());
        assert_eq!(drawable.text(), Some("${0:0.0}"));
    }

    #[test]
    fn test_image_and_fill() {
        let theme = Theme::default();
        let texture = Texture::new(TextureId(3), 8, 8);
        let image = TemplateNode::image("Icon", Rect::new(0.0, 0.0, 8.0, 8.0), Some(texture.clone()));
        let missing = TemplateNode::image("Icon", Rect::new(0.0, 0.0, 8.0, 8.0), None);
        let fill = TemplateNode::fill("Back", Rect::new(0.0, 0.0, 4.0, 4.0), Color::BLUE);

        assert_eq!(
            resolve_node(&image, None, Point::new(1.0, 1.0), &theme),
            Drawable::Texture {
                rect: Rect::new(1.0, 1.0, 8.0, 8.0),
                texture: &texture,
                tile: false,
                modulate: Color::WHITE,
            }
        );
        assert!(resolve_node(&missing, None, Point::ZERO, &theme).is_empty());
        assert_eq!(
            resolve_node(&fill, None, Point::new(2.0, 3.0), &theme),
            Drawable::Fill {
                rect: Rect::new(2.0, 3.0, 4.0, 4.0),
                color: Color::BLUE,
            }
        );
    }

    #[test]
    fn test_bind_tree_threads_offsets() {
        let template = Template::new(
            TemplateNode::container("Row", Rect::new(0.0, 0.0, 100.0, 40.0)).with_child(
                TemplateNode::container("Inner", Rect::new(10.0, 5.0, 50.0, 30.0))
                    .with_child(TemplateNode::fill("Dot", Rect::new(2.0, 3.0, 4.0, 4.0), Color::RED)),
            ),
        );

        let mut visited = Vec::new();
        bind_tree(&template, None, Point::new(100.0, 200.0), |node, rect, _| {
            visited.push((node.name().to_string(), rect.origin));
        });

        assert_eq!(
            visited,
            vec![
                ("Row".to_string(), Point::new(100.0, 200.0)),
                ("Inner".to_string(), Point::new(110.0, 205.0)),
                ("Dot".to_string(), Point::new(112.0, 208.0)),
            ]
        );
    }

    #[test]
    fn test_bind_tree_leaves_template_unchanged() {
        let template = price_template();
        let before = template.clone();
        let item = apple();

        let mut painter = RecordingPainter::new();
        bind_tree(&template, Some(&item), Point::new(0.0, 40.0), |_, _, drawable| {
            drawable.draw(&mut painter);
        });

        assert_eq!(template, before);
        assert_eq!(painter.texts(), vec!["$1.5", "Total"]);
    }
}
