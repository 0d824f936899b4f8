//! Knowledge Base module - the concept store behind every answer.
//!
//! The knowledge base consists of:
//! - **Concepts**: One record per normalized term, holding typed relations,
//!   co-occurrence links, an activation counter, and retained context snippets
//! - **Facts**: Typed relation edges extracted from sentences and applied to
//!   concepts through the store's paired mutators
//! - **Count tables**: Store-wide co-occurrence and next-token counts
//! - **Snapshots**: The flat JSON document used for durability across runs

mod concept;
mod fact;
mod snapshot;
mod store;
mod tables;

pub use concept::*;
pub use fact::*;
pub use snapshot::*;
pub use store::*;
pub use tables::*;
