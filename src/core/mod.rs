pub mod loading;
pub mod orientation;
pub mod project;
pub mod selector;
pub mod swipe;

pub use loading::*;
pub use orientation::*;
pub use project::*;
pub use selector::*;
pub use swipe::*;

// Shaders bundled as string constants
pub static PANORAMA_WGSL: &str = include_str!("../../shaders/panorama.wgsl");
