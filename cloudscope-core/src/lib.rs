//! Core data structures for cloudscope
//!
//! This crate provides the fundamental types shared by the streaming and
//! viewing sides of the pipeline: the affine transform engine, the decoded
//! point-cloud frame, and the double-buffered frame store.

pub mod error;
pub mod frame;
pub mod store;
pub mod transform;

pub use error::*;
pub use frame::*;
pub use store::*;
pub use transform::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};

/// Common result type for cloudscope operations
pub type Result<T> = std::result::Result<T, Error>;
