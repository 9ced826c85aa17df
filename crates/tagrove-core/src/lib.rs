//! # tagrove-core
//!
//! Core types, traits, and abstractions for the tagrove library.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the tagrove vault layer depends on: the folder-tag data model, the
//! service traits at the host boundary, the vault event bus, and the shared
//! error type.

pub mod defaults;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use events::{EventEnvelope, VaultEvent, VaultEventBus};
pub use models::*;
pub use traits::*;
