//! WebAssembly bindings for trueno-raster.
//!
//! Renders scene text in the browser without any JavaScript drawing code.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmRasterizer } from 'trueno-raster';
//!
//! await init();
//!
//! const raster = new WasmRasterizer(64);
//! const rgba = raster.image_data("v,0,0,1,0,0;v,63,63,0,0,1;l,0,1");
//! ctx.putImageData(new ImageData(rgba, 64, 64), 0, 0);
//!
//! // Or a scaled PNG
//! const png = raster.render_png("v,0,0,1,0,0;v,63,63,0,0,1;l,0,1", 8);
//! const blob = new Blob([png], { type: 'image/png' });
//! document.getElementById('scene').src = URL.createObjectURL(blob);
//! ```

use wasm_bindgen::prelude::*;

use crate::color::Rgba;
use crate::error::Error;
use crate::framebuffer::PixelBuffer;
use crate::output::PngEncoder;
use crate::scene::render_scene;

fn to_js(e: &Error) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&format!("trueno-raster: {e}")));
    JsValue::from_str(&e.to_string())
}

/// A persistent pixel grid that scene text is rendered into.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WasmRasterizer {
    buffer: PixelBuffer,
}

#[wasm_bindgen]
impl WasmRasterizer {
    /// Create a `pixels_wide x pixels_wide` grid.
    #[wasm_bindgen(constructor)]
    pub fn new(pixels_wide: u32) -> Result<WasmRasterizer, JsValue> {
        let buffer = PixelBuffer::new(pixels_wide).map_err(|e| to_js(&e))?;
        Ok(Self { buffer })
    }

    /// Grid side length in cells.
    #[wasm_bindgen(getter)]
    pub fn pixels_wide(&self) -> u32 {
        self.buffer.pixels_wide()
    }

    /// Render a scene and return one RGBA quadruple per cell, row-major.
    /// Unset cells are fully transparent.
    pub fn render(&mut self, scene: &str) -> Result<Vec<u8>, JsValue> {
        render_scene(&mut self.buffer, scene).map_err(|e| to_js(&e))?;
        PngEncoder::new()
            .background(Rgba::TRANSPARENT)
            .to_rgba_pixels(&self.buffer)
            .map_err(|e| to_js(&e))
    }

    /// Like [`WasmRasterizer::render`], as a `Uint8ClampedArray` ready for `ImageData`.
    pub fn image_data(&mut self, scene: &str) -> Result<js_sys::Uint8ClampedArray, JsValue> {
        let pixels = self.render(scene)?;
        Ok(js_sys::Uint8ClampedArray::from(pixels.as_slice()))
    }

    /// Render a scene to PNG bytes, `scale` image pixels per cell side.
    pub fn render_png(&mut self, scene: &str, scale: u32) -> Result<Vec<u8>, JsValue> {
        render_scene(&mut self.buffer, scene).map_err(|e| to_js(&e))?;
        PngEncoder::new().scale(scale).to_bytes(&self.buffer).map_err(|e| to_js(&e))
    }

    /// Number of cells set by the last render.
    pub fn set_count(&self) -> usize {
        self.buffer.set_count()
    }
}

/// Get library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
