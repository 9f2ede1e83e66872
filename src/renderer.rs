//! Render-cycle driver: scene text in, presented pixel buffer out.

use crate::error::Result;
use crate::framebuffer::PixelBuffer;
use crate::output::Display;
use crate::scene::{render_scene, Scene};

/// Owns a pixel buffer and an injected [`Display`].
///
/// Each [`Renderer::render`] call clears the buffer, parses the scene, draws
/// it and hands the result to the display. The display is only invoked when
/// the whole scene rendered successfully.
///
/// # Example
///
/// ```
/// use trueno_raster::output::TerminalDisplay;
/// use trueno_raster::renderer::Renderer;
///
/// let mut renderer = Renderer::new(8, TerminalDisplay::new(Vec::new())).unwrap();
/// let scene = renderer.render("v,0,0,1,0,0;v,7,7,0,0,1;l,0,1").unwrap();
///
/// assert_eq!(scene.commands().len(), 1);
/// assert_eq!(renderer.buffer().set_count(), 8);
/// ```
#[derive(Debug)]
pub struct Renderer<D: Display> {
    buffer: PixelBuffer,
    display: D,
}

impl<D: Display> Renderer<D> {
    /// Create a renderer with an empty `pixels_wide` grid.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidSize`] if `pixels_wide` is zero.
    pub fn new(pixels_wide: u32, display: D) -> Result<Self> {
        Ok(Self { buffer: PixelBuffer::new(pixels_wide)?, display })
    }

    /// Run one render cycle.
    ///
    /// # Errors
    ///
    /// Any parse or rasterization error (the buffer is left cleared), or the
    /// display's own error.
    pub fn render(&mut self, text: &str) -> Result<Scene> {
        let scene = render_scene(&mut self.buffer, text)?;
        log::debug!("presenting {} set cells", self.buffer.set_count());
        self.display.present(&self.buffer)?;
        Ok(scene)
    }

    /// The buffer holding the last rendered scene.
    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// The attached display.
    #[must_use]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the attached display.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Split into buffer and display.
    pub fn into_parts(self) -> (PixelBuffer, D) {
        (self.buffer, self.display)
    }
}
