//! # Depsense Core
//!
//! A small knowledge base of software-package facts that learns from plain
//! sentences and answers plain questions. Facts are pulled out of text with
//! ordered regular-expression templates, stored per concept, and read back by
//! a second set of templates that map a question onto a canned answer.
//!
//! ## Core Components
//!
//! - **knowledge_base**: The concept store, typed facts, count tables, and snapshots
//! - **extractor**: Sentence ingestion - pattern detection, co-occurrence, sequences
//! - **answerer**: Intent matching and structured response rendering
//! - **engine**: The [`Depsense`] facade tying the three together
//!
//! ## Entry Points
//!
//! - [`Depsense::learn_text`] ingests a text source and reports how many
//!   sentences were processed
//! - [`Depsense::answer`] turns a question into a [`Response`]

pub mod answerer;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod knowledge_base;

pub use answerer::*;
pub use engine::*;
pub use error::*;
pub use extractor::*;
pub use knowledge_base::*;
