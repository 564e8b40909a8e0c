//! Viewing side of the cloudscope pipeline
//!
//! Owns the camera and object transforms, interprets multi-touch
//! gestures into camera/object motion, and drives one render tick per
//! display refresh. Actual draw calls, projection setup, and windowing
//! belong to the host; the scene hands a caller-supplied draw routine the
//! current front frame and matrices once per tick.

pub mod config;
pub mod controller;
pub mod gesture;
pub mod scene;

pub use config::*;
pub use controller::*;
pub use gesture::*;
pub use scene::*;
