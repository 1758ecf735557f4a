//! Engine: per-surface state and the glue between camera, loader, and
//! renderer.
//!
//! [`EngineCore`] holds everything that does not depend on the browser — the
//! camera, the viewport dimensions, the layer set, and the render-request
//! flag — and is generic over the image handle type so it can be tested
//! without WASM. [`Engine`] wraps it for the browser: it owns the canvas
//! element, creates an `HtmlImageElement` per layer request, and routes
//! `onload`/`onerror` events back into the core with the scope token they
//! were issued under.
//!
//! Redraws coalesce through a single last-write-wins flag: every state
//! change sets it, and the host's animation-frame callback drains it with
//! [`Engine::render_if_needed`]. Pointer-driven view changes can therefore
//! arrive at any rate without queuing more than one pending frame.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use catalog::tree::{BoundingBox, Room};

use crate::camera::{Camera, SurfaceSize};
use crate::loader::{Delivery, Layer, LayerRequest, LayerSet, ScopeToken};
use crate::render;

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies.
#[derive(Debug)]
pub struct EngineCore<H> {
    pub camera: Camera,
    pub layers: LayerSet<H>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    scope_box: Option<BoundingBox>,
    render_needed: bool,
}

impl<H> Default for EngineCore<H> {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            layers: LayerSet::new(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            scope_box: None,
            render_needed: false,
        }
    }
}

impl<H> EngineCore<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Scope ---

    /// Show a new set of rooms: open a fresh loader scope over every placed
    /// room, refit the camera to their combined extent, and return the image
    /// fetches the host must issue. Rooms without a world position are
    /// skipped — they have no placement on the composited map.
    pub fn show_rooms<'a, I>(&mut self, rooms: I) -> Vec<LayerRequest>
    where
        I: IntoIterator<Item = (&'a str, &'a Room)>,
    {
        let mut placed: Vec<&Room> = Vec::new();
        let mut layers = Vec::new();
        for (id, room) in rooms {
            let Some(position) = room.position else {
                continue;
            };
            placed.push(room);
            layers.push(Layer {
                room_id: id.to_owned(),
                url: room.image.clone(),
                position,
            });
        }
        self.scope_box = BoundingBox::over(placed);
        self.layers.begin_scope(layers);
        self.refit();
        self.request_render();
        self.layers.requests().collect()
    }

    /// Combined world extent of the current scope's placed rooms.
    #[must_use]
    pub fn scope_box(&self) -> Option<BoundingBox> {
        self.scope_box
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, refitting the
    /// camera to the current scope.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
        self.refit();
        self.request_render();
    }

    /// Replace the camera with one pushed by the interaction surface
    /// (pan/zoom gestures are handled outside this crate).
    pub fn set_view(&mut self, camera: Camera) {
        self.camera = camera;
        self.request_render();
    }

    // --- Load events ---

    /// Record a loaded image. Stale events (superseded scope) are dropped;
    /// applied events request a repaint.
    pub fn image_loaded(&mut self, token: ScopeToken, index: usize, handle: H) -> Delivery {
        let delivery = self.layers.complete(token, index, handle);
        if delivery == Delivery::Applied {
            self.request_render();
        }
        delivery
    }

    /// Record a failed image load. The slot is left out of the drawable set;
    /// nothing visible changes, so no repaint is requested.
    pub fn image_failed(&mut self, token: ScopeToken, index: usize) -> Delivery {
        self.layers.fail(token, index)
    }

    // --- Render coalescing ---

    /// Mark the scene dirty. Repeated calls collapse into one pending frame.
    pub fn request_render(&mut self) {
        self.render_needed = true;
    }

    /// Consume the pending render request, if any.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::replace(&mut self.render_needed, false)
    }

    /// Refit the camera to the scope extent. A no-op until both a non-empty
    /// scope and a non-zero surface exist; a degenerate extent is logged and
    /// leaves the camera untouched.
    fn refit(&mut self) {
        let Some(bbox) = self.scope_box else {
            return;
        };
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return;
        }
        let surface = SurfaceSize::new(self.viewport_width, self.viewport_height);
        match Camera::fit(surface, bbox) {
            Ok(camera) => self.camera = camera,
            Err(err) => log::warn!("cannot fit view: {err}"),
        }
    }
}

/// The full canvas engine. Wraps [`EngineCore`] and owns the browser canvas
/// element.
///
/// The core sits behind `Rc<RefCell<…>>` because the per-image
/// `onload`/`onerror` closures need to deliver events into it after the
/// engine call that created them has returned. Everything runs on the
/// browser main thread, so load events are naturally serialized with the
/// rest of the engine.
pub struct Engine {
    canvas: HtmlCanvasElement,
    core: Rc<RefCell<EngineCore<HtmlImageElement>>>,
    background: String,
    images: Vec<HtmlImageElement>,
    callbacks: Vec<Closure<dyn FnMut()>>,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self {
            canvas,
            core: Rc::new(RefCell::new(EngineCore::new())),
            background: "#eeeeee".to_owned(),
            images: Vec::new(),
            callbacks: Vec::new(),
        }
    }

    /// Background colour painted behind the images (a CSS colour string).
    pub fn set_background(&mut self, background: impl Into<String>) {
        self.background = background.into();
        self.core.borrow_mut().request_render();
    }

    // --- Delegated state ---

    /// Update viewport dimensions and DPR, and resize the backing store.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.canvas.set_width((width_css * dpr).round() as u32);
        self.canvas.set_height((height_css * dpr).round() as u32);
        self.core.borrow_mut().set_viewport(width_css, height_css, dpr);
    }

    /// Push a camera update from the interaction surface.
    pub fn set_view(&mut self, camera: Camera) {
        self.core.borrow_mut().set_view(camera);
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.borrow().camera
    }

    /// Combined world extent of the current scope's placed rooms.
    #[must_use]
    pub fn scope_box(&self) -> Option<BoundingBox> {
        self.core.borrow().scope_box()
    }

    // --- Scope ---

    /// Show a new set of rooms, issuing one image fetch per placed room.
    ///
    /// Handlers of the superseded scope are detached before the new fetches
    /// start, so a late arrival cannot fire into a dropped closure; the
    /// scope token check in the core remains the backstop for anything that
    /// slips through.
    pub fn show_rooms<'a, I>(&mut self, rooms: I)
    where
        I: IntoIterator<Item = (&'a str, &'a Room)>,
    {
        for img in self.images.drain(..) {
            img.set_onload(None);
            img.set_onerror(None);
        }
        self.callbacks.clear();

        let requests = self.core.borrow_mut().show_rooms(rooms);
        let token = self.core.borrow().layers.scope();
        for request in requests {
            self.spawn_fetch(token, request);
        }
    }

    fn spawn_fetch(&mut self, token: ScopeToken, request: LayerRequest) {
        let Ok(img) = HtmlImageElement::new() else {
            return;
        };
        let index = request.index;

        let onload = {
            let core = Rc::clone(&self.core);
            let img = img.clone();
            Closure::wrap(Box::new(move || {
                let _ = core.borrow_mut().image_loaded(token, index, img.clone());
            }) as Box<dyn FnMut()>)
        };
        let onerror = {
            let core = Rc::clone(&self.core);
            Closure::wrap(Box::new(move || {
                let _ = core.borrow_mut().image_failed(token, index);
            }) as Box<dyn FnMut()>)
        };

        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        img.set_src(&request.url);

        self.images.push(img);
        self.callbacks.push(onload);
        self.callbacks.push(onerror);
    }

    // --- Render ---

    /// Repaint now, regardless of the pending-frame flag.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let core = self.core.borrow();
        let ctx = self.context_2d()?;
        render::draw(
            &ctx,
            &core.camera,
            &core.layers,
            core.viewport_width,
            core.viewport_height,
            core.dpr,
            &self.background,
        )
    }

    /// Repaint if anything requested a frame since the last call. Returns
    /// whether a repaint happened. The host calls this once per animation
    /// frame.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the repaint itself fails.
    pub fn render_if_needed(&self) -> Result<bool, JsValue> {
        if self.core.borrow_mut().take_render_request() {
            self.render()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn context_2d(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        self.canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)
    }
}
