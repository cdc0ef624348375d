//! Opaque texture handles.
//!
//! Texture decoding and upload belong to the host. The list only carries a
//! handle around so the painter can look the real texture up again.

use crate::types::Size;

/// A host-assigned texture identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// A reference to a texture owned by the host renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
}

impl Texture {
    /// Create a handle for the texture with the given id and pixel size.
    pub fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// The host-assigned identifier.
    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Get the width of the texture in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of the texture in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the size of the texture.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}
