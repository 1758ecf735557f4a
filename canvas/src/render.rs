//! Compositing: paints the loaded room images onto the 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives read-only views of the
//! camera and the layer set and produces pixels — it does not mutate any
//! engine state. Every repaint is total: clear, transform, draw every loaded
//! image. The catalog is small enough that a differential repaint would buy
//! nothing.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`;
//! the top-level caller ([`crate::engine::Engine`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::camera::Camera;
use crate::loader::LayerSet;

/// Draw the full scene.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device
/// pixel ratio; the backing store is assumed to be `viewport * dpr` pixels.
/// Images are drawn in slot (catalog) order at their world positions, with
/// smoothing disabled so pixel art stays crisp under zoom.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    camera: &Camera,
    layers: &LayerSet<HtmlImageElement>,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
    background: &str,
) -> Result<(), JsValue> {
    // Layer 1: clear to the background colour and set up transforms.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(background);
    ctx.fill_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;
    ctx.set_image_smoothing_enabled(false);

    // Layer 2: room images in catalog order (bottom first).
    for (img, position) in layers.drawable() {
        ctx.draw_image_with_html_image_element(img, position.x, position.y)?;
    }

    Ok(())
}
