//! Builder areas - independently configurable regions of a page
//!
//! A theme registers the areas it renders; each area resolves its own
//! fragment sequence, so one page can host several independent builder
//! regions. The `page_builder_default` area always exists and is the
//! fallback when a template tag names no area.

use std::collections::BTreeMap;

/// Slug of the always-present default area
pub const DEFAULT_AREA: &str = "page_builder_default";

/// Static metadata attached to a registered area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaMetadata {
    /// Human-readable name, shown in the editor UI
    pub name: String,
    /// Description shown alongside the area in the editor UI
    pub description: String,
    /// Whether the per-content-item configuration UI is shown for this area
    pub edit_on_page: bool,
    /// Hardcoded part slugs rendered for non-singular targets; bypasses
    /// per-content-item configuration entirely when non-empty
    pub template_group: Vec<String>,
}

impl AreaMetadata {
    /// Metadata with a name derived from the slug and no description
    pub fn for_slug(slug: &str) -> Self {
        Self {
            name: title_case(slug),
            description: String::new(),
            edit_on_page: true,
            template_group: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_edit_on_page(mut self, edit_on_page: bool) -> Self {
        self.edit_on_page = edit_on_page;
        self
    }

    /// Hardcode the parts this area renders on non-singular targets
    pub fn with_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.template_group = templates.into_iter().map(Into::into).collect();
        self
    }
}

/// Title-case a slug: `featured-posts` becomes `Featured Posts`
fn title_case(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Registry of builder areas, keyed by slug
///
/// Areas are registered at process start and treated as immutable for the
/// rest of the request. An unregistered area is "feature not configured",
/// never an error.
#[derive(Debug, Clone)]
pub struct AreaRegistry {
    areas: BTreeMap<String, AreaMetadata>,
}

impl Default for AreaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaRegistry {
    /// Create a registry with the default area pre-registered
    pub fn new() -> Self {
        let mut registry = Self {
            areas: BTreeMap::new(),
        };
        registry.register(
            DEFAULT_AREA,
            AreaMetadata::for_slug(DEFAULT_AREA)
                .with_name("Default Page Builder Area")
                .with_description(
                    "This is the default area. Render it from your theme to display. \
                     You can also register custom areas.",
                ),
        );
        registry
    }

    /// Register an area; re-registering a slug overwrites silently
    pub fn register(&mut self, slug: impl Into<String>, metadata: AreaMetadata) {
        self.areas.insert(slug.into(), metadata);
    }

    /// Look up a registered area
    pub fn get(&self, slug: &str) -> Option<&AreaMetadata> {
        self.areas.get(slug)
    }

    /// All registered areas, keyed by slug
    pub fn all(&self) -> &BTreeMap<String, AreaMetadata> {
        &self.areas
    }

    /// Slug/name pairs for admin selection UI, default area first
    pub fn select_options(&self) -> Vec<(String, String)> {
        let mut options = vec![(DEFAULT_AREA.to_string(), "Page Builder Default".to_string())];
        for (slug, meta) in &self.areas {
            if slug != DEFAULT_AREA {
                options.push((slug.clone(), meta.name.clone()));
            }
        }
        options
    }
}
