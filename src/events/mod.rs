pub mod orientation;
pub mod pointer;

pub use orientation::{request_orientation_permission, wire_device_orientation};
pub use pointer::{wire_panorama_drag, wire_swipe_card, SwipeCardWiring};
