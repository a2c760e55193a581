use crate::core::scene::BodyKind;
use crate::renderer::projection::ViewMode;

/// Input events the orrery understands.
/// Pointer positions are canvas pixels relative to the canvas' top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A press began on the orbit canvas.
    OrbitPointerDown { x: f32, y: f32 },
    OrbitPointerMove { x: f32, y: f32 },
    /// A press ended on the orbit canvas; a click if it never became a drag.
    OrbitPointerUp { x: f32, y: f32 },
    /// The pointer left the orbit canvas; any gesture is abandoned.
    OrbitPointerLeave,
    /// Wheel over the orbit canvas. Negative `delta_y` zooms in.
    Wheel { delta_y: f32 },
    /// Sphere canvas events only carry the horizontal position.
    SpherePointerDown { x: f32 },
    SpherePointerMove { x: f32 },
    SpherePointerUp,
    SpherePointerLeave,
    ZoomIn,
    ZoomOut,
    ResetView,
    SetViewMode(ViewMode),
    /// Selection from the external body list, by `(type, name)`.
    Select { kind: BodyKind, name: String },
    /// Clear the selection.
    Deselect,
    SwitchSystem { name: String },
    /// Canvas size changes, in pixels.
    ResizeOrbit { width: f32, height: f32 },
    ResizeSphere { width: f32, height: f32 },
    ResizeCrossSection { width: f32, height: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them between frames.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
