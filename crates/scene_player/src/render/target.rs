//! Render target (the rendering surface node placed in the mount container)

use crate::host::SurfaceId;

/// Rendering surface with a pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    surface: SurfaceId,
    width: u32,
    height: u32,
    /// RGBA clear color
    pub clear_color: [f32; 4],
    /// Frames presented to this surface
    pub frames_presented: u64,
}

impl RenderTarget {
    /// Create a render target bound to `surface`
    pub fn new(surface: SurfaceId, width: u32, height: u32) -> Self {
        Self {
            surface,
            width,
            height,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            frames_presented: 0,
        }
    }

    /// Surface node backing this target
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Resize the drawing buffer
    pub fn set_size(&mut self, width: u32, height: u32) {
        if (self.width, self.height) != (width, height) {
            log::debug!(
                "Render target {:?} resized {}x{} -> {}x{}",
                self.surface, self.width, self.height, width, height
            );
        }
        self.width = width;
        self.height = height;
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }
}
