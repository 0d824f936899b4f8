//! # Depsense Vocabulary
//!
//! The shared words of the Depsense knowledge base: the closed set of relation
//! kinds a package fact can carry, the normalized name every concept is keyed
//! by, and the runtime configuration. This crate holds no knowledge-base logic.

pub mod config;
pub mod names;
pub mod relations;

pub use config::*;
pub use names::*;
pub use relations::*;
