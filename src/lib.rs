pub mod camera;
pub mod cube;
pub mod logging;
pub mod renderer;
pub mod stats;

pub use camera::Camera;
pub use renderer::{Renderer, RendererError, ShaderPaths};
pub use stats::FrameStats;
