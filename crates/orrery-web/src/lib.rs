pub mod canvas;
pub mod frame_loop;
pub mod runner;

use std::cell::RefCell;
use std::rc::Rc;

use orrery::{BodyKind, FrameLoop, InputEvent, Orrery, OrreryConfig, OrreryError, ViewMode};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

pub use frame_loop::RafHost;
pub use runner::WebRunner;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = const { RefCell::new(None) };
    static FRAME_LOOP: RefCell<Option<FrameLoop<RafHost>>> = const { RefCell::new(None) };
}

/// Run `f` on the runner. `None` (and a warning) before `start`.
fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("orrery not started");
                None
            }
        }
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

fn to_js(e: OrreryError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn on_frame() {
    let draw = FRAME_LOOP.with(|cell| cell.borrow_mut().as_mut().map(|lp| lp.on_frame()));
    match draw {
        Some(Ok(true)) => {
            let now = js_sys::Date::now();
            if let Some(Err(e)) = with_runner(|r| r.frame(now)) {
                log::error!("frame failed: {e:?}");
            }
        }
        Some(Err(e)) => log::error!("{e}"),
        _ => {}
    }
}

/// Acquire the three canvases and start the animation loop. If any canvas or
/// its 2D context is missing the loop never starts.
#[wasm_bindgen]
pub fn start(orbit_id: &str, sphere_id: &str, cross_section_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    stop();

    let config = OrreryConfig::from_json(config_json).map_err(to_js)?;
    let orrery = Orrery::builtin(config).map_err(to_js)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let runner = WebRunner::new(orrery, &document, orbit_id, sphere_id, cross_section_id).map_err(|e| {
        log::error!("orrery cannot start: {e:?}");
        e
    })?;
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));

    let callback: frame_loop::FrameCallback = Rc::new(RefCell::new(None));
    *callback.borrow_mut() = Some(Closure::new(on_frame));
    let mut frame_loop = FrameLoop::new(RafHost::new(window, callback));
    frame_loop.start().map_err(to_js)?;
    FRAME_LOOP.with(|cell| *cell.borrow_mut() = Some(frame_loop));
    Ok(())
}

/// Cancel the animation loop and release the canvases.
#[wasm_bindgen]
pub fn stop() {
    if let Some(mut frame_loop) = FRAME_LOOP.with(|cell| cell.borrow_mut().take()) {
        frame_loop.cancel();
    }
    RUNNER.with(|cell| cell.borrow_mut().take());
}

// ---- Orbit canvas ----

#[wasm_bindgen]
pub fn orbit_pointer_down(x: f32, y: f32) {
    push(InputEvent::OrbitPointerDown { x, y });
}

#[wasm_bindgen]
pub fn orbit_pointer_move(x: f32, y: f32) {
    push(InputEvent::OrbitPointerMove { x, y });
}

#[wasm_bindgen]
pub fn orbit_pointer_up(x: f32, y: f32) {
    push(InputEvent::OrbitPointerUp { x, y });
}

#[wasm_bindgen]
pub fn orbit_pointer_leave() {
    push(InputEvent::OrbitPointerLeave);
}

#[wasm_bindgen]
pub fn orbit_wheel(delta_y: f32) {
    push(InputEvent::Wheel { delta_y });
}

// ---- Sphere canvas ----

#[wasm_bindgen]
pub fn sphere_pointer_down(x: f32) {
    push(InputEvent::SpherePointerDown { x });
}

#[wasm_bindgen]
pub fn sphere_pointer_move(x: f32) {
    push(InputEvent::SpherePointerMove { x });
}

#[wasm_bindgen]
pub fn sphere_pointer_up() {
    push(InputEvent::SpherePointerUp);
}

#[wasm_bindgen]
pub fn sphere_pointer_leave() {
    push(InputEvent::SpherePointerLeave);
}

// ---- Controls ----

#[wasm_bindgen]
pub fn zoom_in() {
    push(InputEvent::ZoomIn);
}

#[wasm_bindgen]
pub fn zoom_out() {
    push(InputEvent::ZoomOut);
}

#[wasm_bindgen]
pub fn reset_view() {
    push(InputEvent::ResetView);
}

/// `mode` is one of `top`, `perspective`, `side`.
#[wasm_bindgen]
pub fn set_view_mode(mode: &str) -> Result<(), JsValue> {
    let mode: ViewMode = mode.parse().map_err(|e: String| JsValue::from_str(&e))?;
    push(InputEvent::SetViewMode(mode));
    Ok(())
}

/// Select by `(type, name)` from an external list. Unknown names clear the
/// selection; an unknown type is an error.
#[wasm_bindgen]
pub fn select_body(kind: &str, name: &str) -> Result<(), JsValue> {
    let kind: BodyKind = kind.parse().map_err(|e: String| JsValue::from_str(&e))?;
    push(InputEvent::Select {
        kind,
        name: name.to_string(),
    });
    Ok(())
}

#[wasm_bindgen]
pub fn deselect() {
    push(InputEvent::Deselect);
}

#[wasm_bindgen]
pub fn switch_system(name: &str) -> Result<(), JsValue> {
    with_runner(|r| r.flush().switch_system(name))
        .unwrap_or(Ok(()))
        .map_err(to_js)
}

// ---- State for the host page ----

/// JSON of the selected body, or `null`.
#[wasm_bindgen]
pub fn selection_json() -> Result<String, JsValue> {
    snapshot(|o| o.selection_json())
}

/// JSON `{ viewMode, zoom, system }`.
#[wasm_bindgen]
pub fn view_json() -> Result<String, JsValue> {
    snapshot(|o| o.view_json())
}

/// JSON `{ systems, active }`.
#[wasm_bindgen]
pub fn system_names_json() -> Result<String, JsValue> {
    snapshot(|o| o.system_names_json())
}

fn snapshot(f: impl FnOnce(&mut Orrery) -> orrery::Result<String>) -> Result<String, JsValue> {
    match with_runner(|r| f(r.flush())) {
        Some(json) => json.map_err(to_js),
        None => Ok("null".to_string()),
    }
}
