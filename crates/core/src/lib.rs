//! # Frontdesk Core
//!
//! Domain types, traits, and error definitions for the frontdesk
//! retrieval-augmented QA service. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem seam is defined as a trait or value type here.
//! Implementations live in their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod history;
pub mod knowledge;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use history::Exchange;
pub use knowledge::{Chunk, KnowledgeEntry, ScoredChunk};
pub use provider::AnswerAdapter;
