//! Streaming ingress for cloudscope
//!
//! This crate is the producer side of the pipeline: it models the
//! incoming sensor point-cloud message and decodes its binary payload
//! into the frame store's back buffer. The transport layer that delivers
//! messages (topic subscription, socket plumbing) is external; anything
//! that can construct a [`PointCloudMessage`] can feed the decoder.

pub mod config;
pub mod decode;
pub mod msg;

pub use config::*;
pub use decode::*;
pub use msg::*;
