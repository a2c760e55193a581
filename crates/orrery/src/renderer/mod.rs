pub mod camera;
pub mod color;
pub mod draw_list;
pub mod pixels;
pub mod projection;

pub use camera::{OrbitCamera, ZoomLimits};
pub use color::Color;
pub use draw_list::{DrawCommand, DrawList, TextAlign};
pub use pixels::{PixelBuffer, Rgba8};
pub use projection::{Projected, Projector, ViewMode};
