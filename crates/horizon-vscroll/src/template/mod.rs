//! Item templates.
//!
//! A [`Template`] is a small tree of [`TemplateNode`]s laid out once and then
//! drawn for every visible item. Nodes whose name starts with
//! [`BINDING_MARKER`] take their content from the item being drawn; all
//! other nodes are drawn as they are. The tree is never modified while
//! drawing, so a single `Arc<Template>` serves every item of every frame.
//!
//! Templates are built in code or loaded from a TOML or JSON description:
//!
//! ```
//! use horizon_vscroll::template::Template;
//!
//! let template = Template::from_toml_str(r#"
//!     [root]
//!     name = "Row"
//!     rect = [0, 0, 200, 40]
//!
//!     [[root.children]]
//!     name = "-price"
//!     kind = "text"
//!     rect = [8, 4, 120, 20]
//!     text = "${0:0.00}"
//! "#).unwrap();
//!
//! assert_eq!(template.size().height, 40.0);
//! assert_eq!(template.root().children()[0].binding_key(), Some("price"));
//! ```

mod description;
mod node;

pub use description::{NodeDescription, NodeKindDescription, TemplateDescription, ThemeDescription};
pub use node::{BINDING_MARKER, FillNode, ImageNode, NodeKind, TemplateNode, TextNode};

use horizon_vscroll_core::logging::targets;
use horizon_vscroll_render::{Font, Size};

use crate::error::{Result, VScrollError};

/// Default font size for text nodes without an override.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Fallback text styling for a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Font for text nodes without an override.
    pub font: Font,
    /// Font size for text nodes without an override.
    pub font_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font: Font::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Theme {
    /// The font a text node is drawn with.
    pub fn font_for<'a>(&'a self, node: &'a TextNode) -> &'a Font {
        node.font.as_ref().unwrap_or(&self.font)
    }

    /// The font size a text node is drawn with.
    ///
    /// Overrides that are zero, negative or not finite count as unset.
    pub fn font_size_for(&self, node: &TextNode) -> f32 {
        node.font_size
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(self.font_size)
    }
}

/// The node tree drawn for each item.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    root: TemplateNode,
    theme: Theme,
}

impl Template {
    /// Create a template with the default theme.
    pub fn new(root: TemplateNode) -> Self {
        Self {
            root,
            theme: Theme::default(),
        }
    }

    /// Set the theme using builder pattern.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Parse a template from a TOML description.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let description: TemplateDescription =
            toml::from_str(source).map_err(VScrollError::TemplateToml)?;
        description.build()
    }

    /// Parse a template from a JSON description.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let description: TemplateDescription = serde_json::from_str(source)?;
        description.build()
    }

    #[inline]
    pub fn root(&self) -> &TemplateNode {
        &self.root
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Natural item size: the size of the root node.
    pub fn size(&self) -> Size {
        self.root.rect().size
    }
}

impl TemplateDescription {
    /// Validate the description and build the template.
    pub fn build(self) -> Result<Template> {
        let theme = self.theme.map(ThemeDescription::into_theme).unwrap_or_default();
        let root = self.root.into_node()?;
        tracing::debug!(
            target: targets::CONFIG,
            root = root.name(),
            nodes = root.node_count(),
            "built template from description"
        );
        Ok(Template::new(root).with_theme(theme))
    }
}
