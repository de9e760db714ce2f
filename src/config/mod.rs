//! Configuration types for opening streams.
//!
//! This module provides:
//! - `StreamOptions`: Loop, header and start-offset settings for one open
//! - `StreamKey`: Structured identity of an open stream
//! - `ReopenPolicy`: Policy for re-opening a key that is already registered
//! - `ReplayConfig`: Declarative list of streams to open together

mod replay;
mod spec;

pub use replay::{ReplayConfig, StreamConfig};
pub use spec::{ReopenPolicy, StreamKey, StreamOptions};
