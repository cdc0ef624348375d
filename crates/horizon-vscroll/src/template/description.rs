//! Serializable template descriptions.
//!
//! These mirror [`Template`](super::Template) in a form serde can read from
//! TOML or JSON. Rects are `[x, y, width, height]`, colors are `#RRGGBBAA`
//! strings and textures are host-assigned ids.

use serde::{Deserialize, Serialize};

use horizon_vscroll_render::{
    Color, Font, FontFamily, FontWeight, HorizontalAlign, Rect, Texture, TextureId,
};

use super::node::{FillNode, ImageNode, NodeKind, TemplateNode, TextNode};
use super::{DEFAULT_FONT_SIZE, Theme};
use crate::error::{Result, VScrollError};

/// Top-level template description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDescription {
    #[serde(default)]
    pub theme: Option<ThemeDescription>,
    pub root: NodeDescription,
}

/// Theme section of a description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeDescription {
    /// Family name, or `sans-serif`, `serif` or `monospace`.
    pub font: Option<String>,
    pub font_weight: Option<u16>,
    pub font_size: Option<f32>,
}

impl ThemeDescription {
    pub(crate) fn into_theme(self) -> Theme {
        Theme {
            font: font_from(self.font.as_deref(), self.font_weight).unwrap_or_default(),
            font_size: self
                .font_size
                .filter(|size| size.is_finite() && *size > 0.0)
                .unwrap_or(DEFAULT_FONT_SIZE),
        }
    }
}

/// Node kinds as spelled in descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindDescription {
    #[default]
    Container,
    Text,
    Image,
    Fill,
}

/// One node of a description. Fields that do not apply to the node's kind
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDescription {
    pub name: String,
    pub kind: NodeKindDescription,
    /// `[x, y, width, height]` relative to the parent.
    pub rect: [f32; 4],

    // Text
    pub text: Option<String>,
    /// `left`, `center`, `right` or `justified`.
    pub align: Option<String>,
    pub font: Option<String>,
    pub font_weight: Option<u16>,
    pub font_size: Option<f32>,

    // Image
    pub texture: Option<u64>,
    /// Pixel size of the texture. Defaults to the node size.
    pub texture_size: Option<[u32; 2]>,
    pub modulate: Option<String>,

    // Fill
    pub color: Option<String>,

    pub children: Vec<NodeDescription>,
}

impl NodeDescription {
    pub(crate) fn into_node(self) -> Result<TemplateNode> {
        let [x, y, width, height] = self.rect;
        if !self.rect.iter().all(|v| v.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(invalid(&self.name, "rect must be finite with a non-negative size"));
        }
        let rect = Rect::new(x, y, width, height);

        let kind = match self.kind {
            NodeKindDescription::Container => NodeKind::Container,
            NodeKindDescription::Text => {
                let align = match self.align.as_deref() {
                    Some(name) => parse_align(name)
                        .ok_or_else(|| invalid(&self.name, &format!("unknown alignment `{name}`")))?,
                    None => HorizontalAlign::Left,
                };
                NodeKind::Text(TextNode {
                    text: self.text.unwrap_or_default(),
                    align,
                    font: font_from(self.font.as_deref(), self.font_weight),
                    font_size: self.font_size,
                })
            }
            NodeKindDescription::Image => {
                let texture = self.texture.map(|id| {
                    let [tw, th] = self
                        .texture_size
                        .unwrap_or([width.round() as u32, height.round() as u32]);
                    Texture::new(TextureId(id), tw, th)
                });
                let modulate = match self.modulate.as_deref() {
                    Some(hex) => parse_color(&self.name, hex)?,
                    None => Color::WHITE,
                };
                NodeKind::Image(ImageNode { texture, modulate })
            }
            NodeKindDescription::Fill => {
                let hex = self
                    .color
                    .as_deref()
                    .ok_or_else(|| invalid(&self.name, "fill node requires a color"))?;
                NodeKind::Fill(FillNode {
                    color: parse_color(&self.name, hex)?,
                })
            }
        };

        let children = self
            .children
            .into_iter()
            .map(NodeDescription::into_node)
            .collect::<Result<Vec<_>>>()?;

        Ok(TemplateNode::new(self.name, kind, rect).with_children(children))
    }
}

fn font_from(family: Option<&str>, weight: Option<u16>) -> Option<Font> {
    if family.is_none() && weight.is_none() {
        return None;
    }
    let family = family.map(FontFamily::parse).unwrap_or_default();
    let weight = weight.map(FontWeight).unwrap_or_default();
    Some(Font::new(family).with_weight(weight))
}

fn parse_align(name: &str) -> Option<HorizontalAlign> {
    match name.to_ascii_lowercase().as_str() {
        "left" | "start" => Some(HorizontalAlign::Left),
        "center" => Some(HorizontalAlign::Center),
        "right" | "end" => Some(HorizontalAlign::Right),
        "justified" | "fill" => Some(HorizontalAlign::Justified),
        _ => None,
    }
}

fn parse_color(node: &str, hex: &str) -> Result<Color> {
    Color::from_hex(hex).ok_or_else(|| invalid(node, &format!("invalid color `{hex}`")))
}

fn invalid(node: &str, reason: &str) -> VScrollError {
    VScrollError::InvalidTemplate {
        node: node.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_size_defaults_to_node_size() {
        let node = NodeDescription {
            name: "Icon".into(),
            kind: NodeKindDescription::Image,
            rect: [0.0, 0.0, 24.0, 12.0],
            texture: Some(4),
            ..Default::default()
        }
        .into_node()
        .unwrap();

        let NodeKind::Image(image) = node.kind() else {
            panic!("expected an image node");
        };
        let texture = image.texture.as_ref().unwrap();
        assert_eq!((texture.width(), texture.height()), (24, 12));
    }

    #[test]
    fn test_unknown_alignment() {
        let result = NodeDescription {
            name: "-name".into(),
            kind: NodeKindDescription::Text,
            align: Some("diagonal".into()),
            ..Default::default()
        }
        .into_node();

        match result {
            Err(VScrollError::InvalidTemplate { node, reason }) => {
                assert_eq!(node, "-name");
                assert!(reason.contains("diagonal"));
            }
            other => panic!("expected InvalidTemplate, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_errors_propagate() {
        let root = NodeDescription {
            name: "Row".into(),
            rect: [0.0, 0.0, 10.0, 10.0],
            children: vec![NodeDescription {
                name: "Swatch".into(),
                kind: NodeKindDescription::Fill,
                color: Some("#GG0000".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(matches!(
            root.into_node(),
            Err(VScrollError::InvalidTemplate { node, .. }) if node == "Swatch"
        ));
    }

    #[test]
    fn test_theme_font() {
        let theme = ThemeDescription {
            font: Some("Inter".into()),
            font_weight: Some(700),
            font_size: None,
        }
        .into_theme();
        assert_eq!(theme.font.family(), &FontFamily::Name("Inter".into()));
        assert_eq!(theme.font.weight(), FontWeight::BOLD);
        assert_eq!(theme.font_size, DEFAULT_FONT_SIZE);
    }
}
