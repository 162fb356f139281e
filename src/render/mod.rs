//! Dispatching a resolved sequence to the template loader
//!
//! The dispatcher walks a [`crate::resolve::ResolvedSequence`], looks each
//! part up in the registry, and hands the part's file to a
//! [`TemplateLoader`]. Lifecycle events bracket the whole sequence and each
//! fragment; subscribers such as the wrap feature write their markup from
//! those events instead of being wired into the dispatch loop.

mod dispatcher;
mod events;
mod loader;
mod wrap;

pub use dispatcher::{Dispatcher, RenderError};
pub use events::{RenderEvent, RenderObserver};
pub use loader::{FileTemplateLoader, TemplateLoader};
pub use wrap::Wrapper;
