//! Admin-configured builder options
//!
//! The editor-facing options page lives outside the core; what the core
//! reads is this plain options struct. Defaults match the plugin's
//! historical defaults so an unconfigured site behaves the same as before.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::layout::LayoutId;

/// Options the core consults during resolution and dispatch
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Post types allowed to use the builder
    pub post_types: Vec<String>,

    /// Directory (relative to the theme root) holding part files
    pub parts_dir: String,

    /// Filename prefix identifying part files
    pub parts_prefix: String,

    /// Whether each part is wrapped in an HTML container element
    pub use_wrap: bool,

    /// Tag name of the wrapper element
    pub container: String,

    /// Class applied to every wrapper element
    pub container_class: String,

    /// Global fallback layout per area, applied when nothing more specific
    /// resolves
    pub default_area_layouts: BTreeMap<String, LayoutId>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            post_types: vec!["page".to_string()],
            parts_dir: "parts".to_string(),
            parts_prefix: "part".to_string(),
            use_wrap: false,
            container: "section".to_string(),
            container_class: "pagebuilder-part".to_string(),
            default_area_layouts: BTreeMap::new(),
        }
    }
}

impl BuilderOptions {
    /// Create options with the historical defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML document
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Whether the given post type may use the builder
    pub fn allows_post_type(&self, post_type: &str) -> bool {
        self.post_types.iter().any(|t| t == post_type)
    }

    /// The global default layout configured for an area, if any
    pub fn global_default(&self, area: &str) -> Option<LayoutId> {
        self.default_area_layouts.get(area).copied()
    }

    /// Set the allowed post types
    pub fn with_post_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.post_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable the per-part wrapper element
    pub fn with_wrap(mut self, use_wrap: bool) -> Self {
        self.use_wrap = use_wrap;
        self
    }

    /// Set the wrapper tag name
    pub fn with_container(mut self, tag: impl Into<String>) -> Self {
        self.container = tag.into();
        self
    }

    /// Set the wrapper class
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    /// Set the parts directory and filename prefix
    pub fn with_parts_location(
        mut self,
        dir: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        self.parts_dir = dir.into();
        self.parts_prefix = prefix.into();
        self
    }

    /// Set the global default layout for an area
    pub fn with_default_layout(mut self, area: impl Into<String>, layout: LayoutId) -> Self {
        self.default_area_layouts.insert(area.into(), layout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_plugin_defaults() {
        let options = BuilderOptions::default();
        assert_eq!(options.post_types, vec!["page".to_string()]);
        assert_eq!(options.parts_dir, "parts");
        assert_eq!(options.parts_prefix, "part");
        assert!(!options.use_wrap);
        assert_eq!(options.container, "section");
        assert_eq!(options.container_class, "pagebuilder-part");
        assert!(options.default_area_layouts.is_empty());
    }

    #[test]
    fn test_from_toml_partial() {
        let options = BuilderOptions::from_toml(
            r#"
            use_wrap = true
            container = "div"

            [default_area_layouts]
            sidebar = 3
            "#,
        )
        .unwrap();

        assert!(options.use_wrap);
        assert_eq!(options.container, "div");
        assert_eq!(options.global_default("sidebar"), Some(3));
        assert_eq!(options.global_default("page_builder_default"), None);
        // Untouched keys keep their defaults.
        assert_eq!(options.container_class, "pagebuilder-part");
    }

    #[test]
    fn test_builder_methods() {
        let options = BuilderOptions::new()
            .with_post_types(["page", "post"])
            .with_wrap(true)
            .with_container("article")
            .with_default_layout("sidebar", 7);

        assert!(options.allows_post_type("post"));
        assert!(!options.allows_post_type("product"));
        assert_eq!(options.container, "article");
        assert_eq!(options.global_default("sidebar"), Some(7));
    }
}
