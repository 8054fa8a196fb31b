//! Browser implementation of [`Platform`] and [`Surface`] on web-sys.
//!
//! This is the only module that touches the DOM. Events are flattened into
//! [`PointerSnapshot`]s here and listeners and frames are gloo handles, so
//! dropping what this module hands out is enough to unregister it.

use std::f64::consts::PI;
use std::sync::Once;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::AnimationFrame;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, MouseEvent, TouchEvent, TouchList, Window};

use crate::color::Rgba;
use crate::consts::OVERLAY_CSS;
use crate::error::FireworksError;
use crate::geom::{Point, Rect, Size};
use crate::input::{EventKind, ListenTarget, PointerSnapshot};
use crate::platform::{EventHandler, FrameCallback, Platform};
use crate::random::RngSampler;
use crate::sizing::{CanvasBox, Sizable};
use crate::surface::{GlyphPen, GlyphSpec, Surface, TextExtent, Texture, draw_glyph};

static LOGGING: Once = Once::new();

/// Route `log` to the browser console and panics to `console.error`. Safe to call repeatedly.
pub fn init_logging() {
    LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
        if let Err(err) = console_log::init_with_level(level) {
            web_sys::console::warn_1(&format!("fireworks: logger already set: {err}").into());
        }
    });
}

/// A sampler seeded from `Math.random` and the wall clock.
#[must_use]
pub fn browser_sampler() -> RngSampler {
    RngSampler::seeded(js_sys::Math::random().to_bits() ^ js_sys::Date::now().to_bits())
}

// =============================================================
// Platform
// =============================================================

pub struct WebPlatform {
    window: Window,
    document: Document,
}

impl WebPlatform {
    /// # Errors
    ///
    /// [`FireworksError::NoWindow`] outside a browser main thread.
    pub fn new() -> Result<Self, FireworksError> {
        let window = web_sys::window().ok_or(FireworksError::NoWindow)?;
        let document = window.document().ok_or(FireworksError::NoWindow)?;
        Ok(Self { window, document })
    }
}

impl Platform for WebPlatform {
    type Surface = CanvasSurface;
    type Listener = EventListener;
    type Frame = AnimationFrame;

    fn viewport(&self) -> Size {
        viewport_of(&self.window)
    }

    fn find_canvas(&self, selector: &str) -> Result<CanvasSurface, FireworksError> {
        let not_found = || FireworksError::CanvasNotFound { selector: selector.to_owned() };
        let element = self.document.query_selector(selector)?.ok_or_else(not_found)?;
        let canvas = element.dyn_into::<HtmlCanvasElement>().map_err(|_| not_found())?;
        CanvasSurface::new(canvas)
    }

    fn create_overlay(&self) -> Result<CanvasSurface, FireworksError> {
        let canvas = create_canvas(&self.document)?;
        canvas.style().set_css_text(OVERLAY_CSS);
        let body = self.document.body().ok_or_else(|| FireworksError::Js("document has no body".into()))?;
        body.append_child(&canvas)?;
        CanvasSurface::new(canvas)
    }

    fn remove_overlay(&self, overlay: &CanvasSurface) {
        let Some(parent) = overlay.canvas.parent_node() else {
            return;
        };
        if let Err(err) = parent.remove_child(&overlay.canvas) {
            log::debug!("overlay removal failed: {}", FireworksError::from(err));
        }
    }

    fn listen(&self, kind: EventKind, mut handler: EventHandler) -> EventListener {
        let options =
            if kind.passive() { EventListenerOptions::default() } else { EventListenerOptions::enable_prevent_default() };
        let callback = move |event: &Event| handler(&snapshot(event));
        match kind.target() {
            ListenTarget::Document => EventListener::new_with_options(&self.document, kind.name(), options, callback),
            ListenTarget::Window => EventListener::new_with_options(&self.window, kind.name(), options, callback),
        }
    }

    fn request_frame(&self, callback: FrameCallback) -> AnimationFrame {
        gloo_render::request_animation_frame(callback)
    }
}

fn create_canvas(document: &Document) -> Result<HtmlCanvasElement, FireworksError> {
    document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FireworksError::Js("created element is not a canvas".into()))
}

/// `innerWidth` by `innerHeight` in CSS pixels.
#[must_use]
pub fn viewport_of(window: &Window) -> Size {
    let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
    };
    Size::new(read(window.inner_width()), read(window.inner_height()))
}

// =============================================================
// Events
// =============================================================

/// Flatten a DOM event into the coordinate sources [`crate::input`] understands.
#[must_use]
pub fn snapshot(event: &Event) -> PointerSnapshot {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return PointerSnapshot::mouse(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
    }
    if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        return PointerSnapshot::touch(touch_points(&touch.touches()), touch_points(&touch.changed_touches()));
    }
    PointerSnapshot::default()
}

fn touch_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect()
}

// =============================================================
// Surface
// =============================================================

/// A canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// # Errors
    ///
    /// [`FireworksError::ContextUnavailable`] if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FireworksError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(FireworksError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FireworksError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }
}

impl Sizable for CanvasSurface {
    fn apply_box(&self, canvas_box: &CanvasBox) -> Result<(), FireworksError> {
        apply_box_to(&self.canvas, canvas_box)
    }
}

impl Sizable for HtmlCanvasElement {
    fn apply_box(&self, canvas_box: &CanvasBox) -> Result<(), FireworksError> {
        apply_box_to(self, canvas_box)
    }
}

fn apply_box_to(canvas: &HtmlCanvasElement, canvas_box: &CanvasBox) -> Result<(), FireworksError> {
    canvas.set_width(canvas_box.width);
    canvas.set_height(canvas_box.height);
    let style = canvas.style();
    style.set_property("width", &canvas_box.css_width)?;
    style.set_property("height", &canvas_box.css_height)?;
    Ok(())
}

impl Surface for CanvasSurface {
    type Texture = GlyphCanvas;

    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn origin(&self) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(rect.left(), rect.top())
    }

    fn clear(&self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_circle(&self, center: Point, radius: f64, color: Rgba) -> Result<(), FireworksError> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, 2.0 * PI)?;
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
        Ok(())
    }

    fn draw_texture(&self, texture: &GlyphCanvas, dest: Rect) -> Result<(), FireworksError> {
        self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            &texture.canvas,
            dest.x,
            dest.y,
            dest.width,
            dest.height,
        )?;
        Ok(())
    }

    fn rasterize_glyph(&self, glyph: &GlyphSpec<'_>) -> Result<GlyphCanvas, FireworksError> {
        let document = self.canvas.owner_document().ok_or(FireworksError::NoWindow)?;
        let texture = draw_glyph(self, glyph, |width, height| {
            let canvas = create_canvas(&document)?;
            canvas.set_width(width);
            canvas.set_height(height);
            CanvasSurface::new(canvas)
        })?;
        Ok(GlyphCanvas { canvas: texture.canvas })
    }
}

impl GlyphPen for CanvasSurface {
    fn set_text_style(&self, font: &str, align: &str, baseline: &str) {
        self.ctx.set_font(font);
        self.ctx.set_text_align(align);
        self.ctx.set_text_baseline(baseline);
    }

    fn measure(&self, text: &str) -> Result<TextExtent, FireworksError> {
        let metrics = self.ctx.measure_text(text)?;
        Ok(TextExtent {
            width: metrics.width(),
            ascent: metrics.actual_bounding_box_ascent(),
            descent: metrics.actual_bounding_box_descent(),
        })
    }

    fn fill(&self, text: &str, color: &str, at: Point) -> Result<(), FireworksError> {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_text(text, at.x, at.y)?;
        Ok(())
    }
}

/// An off-screen canvas holding one pre-rendered glyph.
pub struct GlyphCanvas {
    canvas: HtmlCanvasElement,
}

impl Texture for GlyphCanvas {
    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }
}
