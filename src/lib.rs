//! Pointer-triggered firework bursts and falling glyph trails on an HTML canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. A page calls
//! `createFireworks(config)` once per effect; the returned function tears the
//! effect down again. Bursts are drawn on a canvas the page provides, trails on
//! a full-viewport overlay the effect creates itself.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`fireworks`] | Install/teardown controller and [`fireworks::Teardown`] |
//! | [`engine`] | Browser-independent effect state, [`engine::EffectCore`] |
//! | [`trail`] | Trail particles, glyph textures and the per-frame update |
//! | [`burst`] | Burst particles, their timelines and the live-burst field |
//! | [`timeline`] | Declarative tween tracks |
//! | [`easing`] | Easing curves |
//! | [`config`] | JSON configuration, defaults and sanitization |
//! | [`input`] | Pointer snapshots, coordinate extraction, listened events |
//! | [`sizing`] | Canvas backing-store and CSS sizing |
//! | [`surface`] | Drawing traits implemented by the browser canvas |
//! | [`platform`] | Host abstraction and the self-rescheduling frame loop |
//! | [`web`] | web-sys implementation of the platform and surface |
//! | [`color`] | CSS color parsing and `rgba()` output |
//! | [`random`] | Injectable uniform randomness |
//! | [`geom`] | Points, sizes and rectangles |
//! | [`consts`] | Shared numeric constants (trail physics, burst timings, etc.) |
//! | [`error`] | Crate error type |

pub mod burst;
pub mod color;
pub mod config;
pub mod consts;
pub mod easing;
pub mod engine;
pub mod error;
pub mod fireworks;
pub mod geom;
pub mod input;
pub mod platform;
pub mod random;
pub mod sizing;
pub mod surface;
pub mod timeline;
pub mod trail;
pub mod web;

#[cfg(test)]
#[path = "fake_test.rs"]
pub(crate) mod fake;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::FireworksConfig;
use crate::error::FireworksError;
use crate::fireworks::{Teardown, create_fireworks};
use crate::geom::Size;
use crate::input::coords_from_event;
use crate::web::WebPlatform;

/// Install an effect. Returns a teardown function, or `undefined` if the
/// effect could not be installed (the reason is logged).
#[wasm_bindgen(js_name = createFireworks)]
pub fn create_fireworks_js(config: JsValue) -> JsValue {
    web::init_logging();
    let config = read_config(&config);
    match install(config) {
        Ok(teardown) => teardown_function(teardown),
        Err(err) => {
            log::warn!("fireworks not installed: {err}");
            JsValue::UNDEFINED
        }
    }
}

/// Viewport coordinates of a mouse or touch event as `{ x, y }`, or
/// `undefined` if the event carries none.
///
/// # Errors
///
/// Returns `Err` if the result object cannot be built.
#[wasm_bindgen(js_name = getCoordsFromEvent)]
pub fn get_coords_from_event(event: &web_sys::Event) -> Result<JsValue, JsValue> {
    let Some(point) = coords_from_event(&web::snapshot(event)) else {
        return Ok(JsValue::UNDEFINED);
    };
    let coords = js_sys::Object::new();
    js_sys::Reflect::set(&coords, &"x".into(), &point.x.into())?;
    js_sys::Reflect::set(&coords, &"y".into(), &point.y.into())?;
    Ok(coords.into())
}

/// Size `canvas` to `width` by `height`, or to the viewport when either is missing.
///
/// # Errors
///
/// Returns `Err` if there is no window or the style update fails.
#[wasm_bindgen(js_name = setCanvasSize)]
pub fn set_canvas_size_js(
    canvas: &web_sys::HtmlCanvasElement,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(FireworksError::NoWindow)?;
    let size = width.zip(height).map(|(w, h)| Size::new(w, h));
    sizing::set_canvas_size(canvas, size, web::viewport_of(&window))?;
    Ok(())
}

fn read_config(raw: &JsValue) -> FireworksConfig {
    if raw.is_undefined() || raw.is_null() {
        return FireworksConfig::default();
    }
    let parsed = js_sys::JSON::stringify(raw)
        .map_err(FireworksError::from)
        .and_then(|json| FireworksConfig::from_json(&String::from(json)));
    parsed.unwrap_or_else(|err| {
        log::warn!("fireworks config ignored: {err}");
        FireworksConfig::default()
    })
}

fn install(config: FireworksConfig) -> Result<Teardown, FireworksError> {
    let platform = Rc::new(WebPlatform::new()?);
    create_fireworks(platform, config, Box::new(web::browser_sampler()))
}

/// Wrap `teardown` in a JS function that runs it on the first call only.
fn teardown_function(teardown: Teardown) -> JsValue {
    Closure::wrap(Box::new(teardown.into_callback()) as Box<dyn FnMut()>).into_js_value()
}
