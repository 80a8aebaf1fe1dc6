//! Map Engine - The backend seam and the objects that cross it.
//!
//! The engine holds everything the binding layer hands to, or reads from, a
//! mapping library:
//! - Backend: the [`MapBackend`] trait and the [`MapFactory`] that builds it
//! - View: center and zoom with clamping
//! - Layer / Control: the bound objects, with their sources and options
//! - Surface: the visual target a map draws into
//! - Memory: [`MemoryMap`], an in-process backend with a call journal
//! - Registry: id allocation and attach bookkeeping
//!
//! # Ownership
//!
//! ```text
//! Binder ──builds──▶ Layer/Control ──add──▶ MapBackend ──remove──▶ dropped
//! ```
//!
//! A bound object is owned by its binder until attached, then by the backend
//! until the binder detaches it.

mod backend;
mod control;
mod layer;
mod memory;
mod registry;
mod surface;
mod view;

pub use backend::*;
pub use control::*;
pub use layer::*;
pub use memory::*;
pub use registry::*;
pub use surface::*;
pub use view::*;
