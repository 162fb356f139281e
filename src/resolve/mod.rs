//! Part and layout resolution
//!
//! Given an area, a content item, and optionally an explicit layout name,
//! the engine decides which ordered fragment sequence to render. Precedence
//! runs page-specific assignment, then named layout, then post-type
//! default, then the global per-area default; an unconfigured area resolves
//! to an empty sequence, never an error.
//!
//! Every resolve call is a pure computation over the registries and the
//! content source; nothing about the current area or the produced sequence
//! is kept on shared state, so nested or repeated resolution cannot bleed
//! into each other.

mod engine;
mod fields;

pub use engine::{
    ResolutionEngine, ResolveRequest, ResolvedPart, ResolvedSequence, SequenceSource,
};
pub use fields::{slot_field, FieldError, SlotRef};
