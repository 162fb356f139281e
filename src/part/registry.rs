//! Registry of discovered template parts

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::content::NONE_SLUG;

use super::discovery::{DiscoverError, PartDiscovery};

/// Label for the synthetic "none" entry in part selection lists
pub const NO_PARTS_LABEL: &str = "- No Template Parts -";

/// Default freshness window for cached discovery results
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// A discovered template part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Unique slug, derived from the filename or declared in the manifest
    pub slug: String,
    /// Declared display name
    pub name: String,
    /// Declared description
    pub description: String,
    /// Area slugs this part is limited to; empty means allowed everywhere
    pub areas: Vec<String>,
    /// Location of the template file
    pub path: PathBuf,
}

impl Part {
    /// Whether this part may be used in the given area
    pub fn allowed_in(&self, area: &str) -> bool {
        self.areas.is_empty() || self.areas.iter().any(|a| a == area)
    }
}

/// Lookup table of available parts, backed by a discovery strategy
///
/// Discovery results are cached for a long freshness window and refreshed
/// explicitly: [`PartRegistry::invalidate`] drops the cache, and a registry
/// created with [`PartRegistry::for_admin`] rediscovers on every refresh so
/// editors see newly added theme files promptly.
///
/// Refresh happens only through [`PartRegistry::refresh`]; reads never
/// trigger discovery, so lookups stay stable for the whole of a resolution
/// pass.
pub struct PartRegistry {
    discovery: Box<dyn PartDiscovery>,
    cache: Option<Cache>,
    ttl: Duration,
    admin: bool,
}

struct Cache {
    parts: BTreeMap<String, Part>,
    discovered_at: Instant,
}

impl PartRegistry {
    /// Registry over the given discovery strategy
    pub fn new(discovery: impl PartDiscovery + 'static) -> Self {
        Self {
            discovery: Box::new(discovery),
            cache: None,
            ttl: DEFAULT_CACHE_TTL,
            admin: false,
        }
    }

    /// Registry for an administrative context: every refresh rediscovers
    pub fn for_admin(discovery: impl PartDiscovery + 'static) -> Self {
        Self {
            admin: true,
            ..Self::new(discovery)
        }
    }

    /// Override the cache freshness window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Drop the cached discovery results
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Run discovery if the cache is missing or stale
    pub fn refresh(&mut self) -> Result<(), DiscoverError> {
        if self.admin {
            self.cache = None;
        }
        let stale = match &self.cache {
            None => true,
            Some(cache) => cache.discovered_at.elapsed() >= self.ttl,
        };
        if stale {
            self.cache = Some(Cache {
                parts: self.discovery.discover()?,
                discovered_at: Instant::now(),
            });
        }
        Ok(())
    }

    /// Look up a part by slug; `None` until the first refresh
    pub fn get(&self, slug: &str) -> Option<&Part> {
        self.cache.as_ref()?.parts.get(slug)
    }

    /// All discovered parts, keyed by slug
    pub fn all(&self) -> Option<&BTreeMap<String, Part>> {
        self.cache.as_ref().map(|cache| &cache.parts)
    }

    /// Slug/label pairs for a part selection list
    ///
    /// The synthetic `none` entry always comes first. With an area filter,
    /// parts that declare a non-empty area list excluding that area are
    /// left out.
    pub fn select_options(&self, area_filter: Option<&str>) -> Vec<(String, String)> {
        let mut options = vec![(NONE_SLUG.to_string(), NO_PARTS_LABEL.to_string())];
        if let Some(cache) = &self.cache {
            for (slug, part) in &cache.parts {
                if let Some(area) = area_filter {
                    if !part.allowed_in(area) {
                        continue;
                    }
                }
                options.push((slug.clone(), part.name.clone()));
            }
        }
        options
    }
}
