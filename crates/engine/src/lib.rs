//! # Frontdesk Engine
//!
//! The decision core of the service: a deterministic fallback chain over
//! the answer adapters (direct intercept → contextual primary → contextual
//! secondary → context-free general), followed by response normalization
//! with the front-desk house rules.
//!
//! Provider failures never escape this crate — every adapter error is
//! converted to absence and the chain degrades until the terminal strategy,
//! which always yields a user-facing string.

pub mod fallback;
pub mod normalize;

pub use fallback::AnswerEngine;
pub use normalize::{normalize, APOLOGY_REPLY, SCHOOL_ADDRESS_REPLY};
