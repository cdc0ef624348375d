//! Template nodes.

use horizon_vscroll_render::{Color, Font, HorizontalAlign, Rect, Texture};

/// Prefix marking a node whose content comes from the item.
///
/// A text node named `-price` formats the item's `price` field into its text.
pub const BINDING_MARKER: char = '-';

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    /// Static text, or the format string for bound nodes.
    pub text: String,
    /// Alignment within the node width.
    pub align: HorizontalAlign,
    /// Font override. `None` uses the theme font.
    pub font: Option<Font>,
    /// Font size override. `None` uses the theme size.
    pub font_size: Option<f32>,
}

impl TextNode {
    /// A left-aligned label using the theme font.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: HorizontalAlign::Left,
            font: None,
            font_size: None,
        }
    }
}

/// A texture drawn stretched over the node rect.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    /// The texture, if one is assigned.
    pub texture: Option<Texture>,
    /// Color the texture is multiplied by.
    pub modulate: Color,
}

/// A solid rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillNode {
    pub color: Color,
}

/// What a template node draws.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Text(TextNode),
    Image(ImageNode),
    Fill(FillNode),
    /// Groups children without drawing anything itself.
    Container,
}

/// One node of an item template.
///
/// `rect` is relative to the parent node. The root's rect gives the natural
/// item size.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateNode {
    name: String,
    kind: NodeKind,
    rect: Rect,
    children: Vec<TemplateNode>,
}

impl TemplateNode {
    /// Create a node of any kind.
    pub fn new(name: impl Into<String>, kind: NodeKind, rect: Rect) -> Self {
        Self {
            name: name.into(),
            kind,
            rect,
            children: Vec::new(),
        }
    }

    /// A node that only groups children.
    pub fn container(name: impl Into<String>, rect: Rect) -> Self {
        Self::new(name, NodeKind::Container, rect)
    }

    /// A text label.
    pub fn text(name: impl Into<String>, rect: Rect, text: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Text(TextNode::new(text)), rect)
    }

    /// An image node drawn with an unmodulated texture.
    pub fn image(name: impl Into<String>, rect: Rect, texture: Option<Texture>) -> Self {
        Self::new(
            name,
            NodeKind::Image(ImageNode {
                texture,
                modulate: Color::WHITE,
            }),
            rect,
        )
    }

    /// A solid color rectangle.
    pub fn fill(name: impl Into<String>, rect: Rect, color: Color) -> Self {
        Self::new(name, NodeKind::Fill(FillNode { color }), rect)
    }

    /// Append a child using builder pattern.
    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children using builder pattern.
    pub fn with_children(mut self, children: impl IntoIterator<Item = TemplateNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the text alignment. Ignored for non-text nodes.
    pub fn with_align(mut self, align: HorizontalAlign) -> Self {
        if let NodeKind::Text(text) = &mut self.kind {
            text.align = align;
        }
        self
    }

    /// Override the theme font. Ignored for non-text nodes.
    pub fn with_font(mut self, font: Font) -> Self {
        if let NodeKind::Text(text) = &mut self.kind {
            text.font = Some(font);
        }
        self
    }

    /// Override the theme font size. Ignored for non-text nodes.
    pub fn with_font_size(mut self, size: f32) -> Self {
        if let NodeKind::Text(text) = &mut self.kind {
            text.font_size = Some(size);
        }
        self
    }

    /// Set the texture modulation. Ignored for non-image nodes.
    pub fn with_modulate(mut self, modulate: Color) -> Self {
        if let NodeKind::Image(image) = &mut self.kind {
            image.modulate = modulate;
        }
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Rect relative to the parent node.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn children(&self) -> &[TemplateNode] {
        &self.children
    }

    /// The item field this node is bound to, if its name carries the marker.
    pub fn binding_key(&self) -> Option<&str> {
        self.name
            .strip_prefix(BINDING_MARKER)
            .filter(|key| !key.is_empty())
    }

    /// Whether the node takes its content from the item.
    pub fn is_bound(&self) -> bool {
        self.binding_key().is_some()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TemplateNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_key() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(TemplateNode::text("-price", rect, "{0}").binding_key(), Some("price"));
        assert_eq!(TemplateNode::text("Title", rect, "Total").binding_key(), None);
        assert_eq!(TemplateNode::text("-", rect, "{0}").binding_key(), None);
        assert!(TemplateNode::container("-row", rect).is_bound());
    }

    #[test]
    fn test_text_builders() {
        let node = TemplateNode::text("-name", Rect::new(0.0, 0.0, 80.0, 20.0), "{0}")
            .with_align(HorizontalAlign::Right)
            .with_font_size(12.0);

        let NodeKind::Text(text) = node.kind() else {
            panic!("expected a text node");
        };
        assert_eq!(text.align, HorizontalAlign::Right);
        assert_eq!(text.font_size, Some(12.0));
        assert_eq!(text.font, None);
    }

    #[test]
    fn test_builders_ignore_other_kinds() {
        let node = TemplateNode::fill("Back", Rect::new(0.0, 0.0, 10.0, 10.0), Color::GRAY)
            .with_font_size(30.0)
            .with_modulate(Color::RED);
        assert_eq!(node.kind(), &NodeKind::Fill(FillNode { color: Color::GRAY }));
    }

    #[test]
    fn test_node_count() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let root = TemplateNode::container("Row", rect)
            .with_child(TemplateNode::container("Left", rect).with_child(TemplateNode::text("A", rect, "a")))
            .with_child(TemplateNode::text("B", rect, "b"));
        assert_eq!(root.node_count(), 4);
    }
}
