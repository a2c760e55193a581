pub mod api;
pub mod assets;
pub mod bridge;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::OrreryConfig;
pub use api::error::{OrreryError, Result};
pub use api::orrery::{Frame, Orrery, Viewports};
pub use api::schedule::{FrameHost, FrameLoop, LoopToken};
pub use assets::catalog::SystemCatalog;
pub use assets::registry::SystemRegistry;
pub use bridge::panel::{SelectionSnapshot, SystemList, ViewSnapshot};
pub use crate::core::scene::{BodyKind, BodyRef, CelestialBody, Moon, Planet, Star, StarSystem};
pub use crate::core::time::SimClock;
pub use input::gesture::{DragGesture, GestureEnd};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::{Color, DrawCommand, DrawList, OrbitCamera, PixelBuffer, Projector, Rgba8, TextAlign, ViewMode};
pub use systems::layout::SceneLayout;
pub use systems::sphere::SphereView;
