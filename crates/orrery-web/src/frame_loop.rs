//! `requestAnimationFrame` as a [`FrameHost`].

use std::cell::RefCell;
use std::rc::Rc;

use orrery::{FrameHost, OrreryError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct RafHost {
    window: Window,
    callback: FrameCallback,
}

impl RafHost {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameHost for RafHost {
    type Handle = i32;

    fn request_frame(&mut self) -> orrery::Result<i32> {
        let callback = self.callback.borrow();
        let closure = callback
            .as_ref()
            .ok_or_else(|| OrreryError::Host("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(|e| OrreryError::Host(format!("requestAnimationFrame failed: {e:?}")))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {e:?}");
        }
    }
}
