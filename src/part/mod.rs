//! Template parts - the reusable fragments pages are built from
//!
//! A part is a theme-provided template file identified by a slug. Parts are
//! found by a [`PartDiscovery`] strategy (scanning theme directories for
//! prefixed files with a metadata header, or reading a declared manifest)
//! and served from [`PartRegistry`], which caches discovery results with
//! explicit invalidation.

mod discovery;
mod registry;

pub use discovery::{DiscoverError, HeaderDiscovery, ManifestDiscovery, PartDiscovery};
pub use registry::{Part, PartRegistry, NO_PARTS_LABEL};
