//! State Module - Runtime state shared between components.
//!
//! - **Context** - The map handle slot a container publishes and binders read

mod context;

pub use context::*;
