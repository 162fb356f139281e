//! page-parts - compose page bodies out of reusable template fragments
//!
//! This library is the resolution core of a page builder: editors arrange
//! theme-provided template fragments ("parts") per page, per area, or as
//! named reusable layouts, and the engine decides deterministically which
//! ordered sequence of fragments to render for a given request.
//!
//! Precedence runs page-specific assignment, then an explicitly named
//! layout, then the post-type default layout, then the global per-area
//! default, and finally nothing at all. An unconfigured area is a normal
//! state and resolves to an empty sequence.
//!
//! # Example
//!
//! ```rust
//! use page_parts::{
//!     MemoryContent, PageBuilder, RequestContext, ResolveRequest, Slot,
//! };
//! use page_parts::part::PartDiscovery;
//!
//! # fn example(discovery: impl PartDiscovery + 'static) {
//! let builder = PageBuilder::new(discovery);
//! let mut content = MemoryContent::new();
//! content.insert_item(42, "page");
//! content.set_assignment(42, "page_builder_default", vec![Slot::new("hero")]);
//!
//! let resolved = builder.resolve(
//!     &content,
//!     &RequestContext::singular(42),
//!     &ResolveRequest::new(),
//! );
//! assert_eq!(resolved.slugs(), vec!["hero"]);
//! # }
//! ```

pub mod area;
pub mod content;
pub mod layout;
pub mod options;
pub mod part;
pub mod render;
pub mod resolve;

pub use area::{AreaMetadata, AreaRegistry, DEFAULT_AREA};
pub use content::{ContentId, ContentSource, MemoryContent, RequestContext, Slot, NONE_SLUG};
pub use layout::{Layout, LayoutId, LayoutStore};
pub use options::BuilderOptions;
pub use part::{Part, PartRegistry};
pub use render::{Dispatcher, FileTemplateLoader, RenderError, TemplateLoader};
pub use resolve::{ResolutionEngine, ResolveRequest, ResolvedSequence, SequenceSource};

use part::{DiscoverError, PartDiscovery};
use std::fmt;

/// The builder's registries and options, wired together
///
/// A convenience over owning the four pieces separately; hosts with their
/// own wiring can use [`ResolutionEngine`] and [`Dispatcher`] directly.
/// Content and per-request state stay outside: pass a [`ContentSource`]
/// and [`RequestContext`] per call, and create one [`Dispatcher`] per
/// request.
pub struct PageBuilder {
    pub areas: AreaRegistry,
    pub layouts: LayoutStore,
    pub parts: PartRegistry,
    pub options: BuilderOptions,
}

impl PageBuilder {
    /// A builder over the given part discovery strategy, with default
    /// options and the default area registered
    pub fn new(discovery: impl PartDiscovery + 'static) -> Self {
        Self {
            areas: AreaRegistry::new(),
            layouts: LayoutStore::new(),
            parts: PartRegistry::new(discovery),
            options: BuilderOptions::default(),
        }
    }

    /// Replace the options
    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    /// Refresh the part registry's discovery cache
    pub fn refresh_parts(&mut self) -> Result<(), DiscoverError> {
        self.parts.refresh()
    }

    /// Resolve the fragment sequence for a request
    pub fn resolve(
        &self,
        content: &dyn ContentSource,
        ctx: &RequestContext,
        request: &ResolveRequest,
    ) -> ResolvedSequence {
        ResolutionEngine::new(&self.areas, &self.layouts, content, &self.options)
            .resolve(request, ctx)
    }

    /// Resolve and render one area in a single call
    ///
    /// This is the template-tag entry point: a theme calls it once per area
    /// it renders. Returns `Ok(true)` when anything was rendered.
    pub fn render_area(
        &self,
        area: &str,
        content: &dyn ContentSource,
        ctx: &RequestContext,
        dispatcher: &mut Dispatcher,
        loader: &mut dyn TemplateLoader,
        out: &mut dyn fmt::Write,
    ) -> Result<bool, RenderError> {
        let resolved = self.resolve(content, ctx, &ResolveRequest::for_area(area));
        dispatcher.render(&resolved, &self.parts, loader, out)
    }
}
