//! The resolution engine and its outputs

use crate::area::{AreaRegistry, DEFAULT_AREA};
use crate::content::{is_effectively_empty, ContentId, ContentSource, RequestContext, Slot};
use crate::layout::LayoutStore;
use crate::options::BuilderOptions;

/// A request to resolve one area's fragment sequence
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Area to resolve; defaults to `page_builder_default`
    pub area: String,
    /// Content item to resolve for; `None` means infer from the request
    /// context
    pub content_item: Option<ContentId>,
    /// Explicit layout name override, consulted when nothing is stored on
    /// the content item itself
    pub layout: Option<String>,
}

impl Default for ResolveRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveRequest {
    /// Request for the default area, inferring the content item
    pub fn new() -> Self {
        Self {
            area: DEFAULT_AREA.to_string(),
            content_item: None,
            layout: None,
        }
    }

    /// Request for a named area
    pub fn for_area(area: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            ..Self::new()
        }
    }

    /// Pin the request to a specific content item
    pub fn with_content_item(mut self, id: ContentId) -> Self {
        self.content_item = Some(id);
        self
    }

    /// Ask for a specific layout by name
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }
}

/// Which precedence tier produced the resolved sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSource {
    /// The content item's own per-area assignment
    Assignment,
    /// A layout looked up by the name the caller passed
    NamedLayout,
    /// A layout that is the default for this area and post type
    PostTypeDefault,
    /// The admin-configured global default layout for the area
    GlobalDefault,
    /// The area's hardcoded template list, used for non-singular targets
    AreaTemplates,
    /// Nothing resolved
    Empty,
}

/// One renderable entry of a resolved sequence
///
/// `index` is the slot's position in the stored sequence it came from, so
/// per-slot field lookups line up even after `none` slots are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPart {
    pub index: usize,
    pub slug: String,
}

/// The engine's output: an ordered fragment list ready for dispatch
///
/// Transient and recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSequence {
    /// Area the sequence was resolved for
    pub area: String,
    /// Content item the sequence was resolved for, when one applied
    pub content_item: Option<ContentId>,
    /// Ordered parts to render
    pub parts: Vec<ResolvedPart>,
    /// Which precedence tier won
    pub source: SequenceSource,
    /// Whether a matching post-type default layout asks for the per-item
    /// editing UI to be suppressed; a hint for the admin layer only
    pub hide_metabox: bool,
}

impl ResolvedSequence {
    fn empty(area: &str, content_item: Option<ContentId>, hide_metabox: bool) -> Self {
        Self {
            area: area.to_string(),
            content_item,
            parts: Vec::new(),
            source: SequenceSource::Empty,
            hide_metabox,
        }
    }

    /// Whether nothing resolved
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Whether the sequence contains a part with the given slug
    pub fn contains(&self, slug: &str) -> bool {
        self.parts.iter().any(|part| part.slug == slug)
    }

    /// The part slugs in render order
    pub fn slugs(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.slug.as_str()).collect()
    }
}

/// Computes the fragment sequence for one (area, content item) pair
///
/// Borrows the registries and content source for the duration of a pass;
/// each [`ResolutionEngine::resolve`] call is independent and side-effect
/// free.
pub struct ResolutionEngine<'a> {
    areas: &'a AreaRegistry,
    layouts: &'a LayoutStore,
    content: &'a dyn ContentSource,
    options: &'a BuilderOptions,
}

impl<'a> ResolutionEngine<'a> {
    pub fn new(
        areas: &'a AreaRegistry,
        layouts: &'a LayoutStore,
        content: &'a dyn ContentSource,
        options: &'a BuilderOptions,
    ) -> Self {
        Self {
            areas,
            layouts,
            content,
            options,
        }
    }

    /// Resolve the fragment sequence for a request
    pub fn resolve(&self, request: &ResolveRequest, ctx: &RequestContext) -> ResolvedSequence {
        let area = request.area.as_str();

        // An unregistered area is unconfigured, not an error.
        let Some(area_meta) = self.areas.get(area) else {
            return ResolvedSequence::empty(area, None, false);
        };

        let content_item = request.content_item.or_else(|| {
            if ctx.singular {
                ctx.queried_object
            } else {
                None
            }
        });

        // Non-singular targets (archives, 404s) carry no per-item
        // configuration; only a hardcoded area template list can render.
        let Some(item) = content_item else {
            if area_meta.template_group.is_empty() {
                return ResolvedSequence::empty(area, None, false);
            }
            let slots: Vec<Slot> = area_meta
                .template_group
                .iter()
                .map(|slug| Slot::new(slug.clone()))
                .collect();
            return finalize(area, None, &slots, SequenceSource::AreaTemplates, false);
        };

        let post_type = self.content.post_type(item);

        // The metabox-suppression hint follows the matching post-type
        // default layout even when a higher tier wins the sequence.
        let hide_metabox = post_type
            .as_deref()
            .and_then(|pt| self.layouts.find_default_for(area, pt))
            .map(|layout| layout.hide_metabox)
            .unwrap_or(false);

        // Assignments apply only to post types the builder is enabled for;
        // layouts are not gated, they are opt-in by construction.
        let builder_enabled = post_type
            .as_deref()
            .map(|pt| self.options.allows_post_type(pt))
            .unwrap_or(false);

        if builder_enabled {
            let assignment = self.content.assignment(item, area);
            if !is_effectively_empty(assignment.as_deref()) {
                let slots = assignment.unwrap_or_default();
                return finalize(
                    area,
                    Some(item),
                    &slots,
                    SequenceSource::Assignment,
                    hide_metabox,
                );
            }
        }

        if let Some(name) = request.layout.as_deref() {
            if let Some(slots) = self.named_layout_slots(name) {
                if !is_effectively_empty(Some(&slots)) {
                    return finalize(
                        area,
                        Some(item),
                        &slots,
                        SequenceSource::NamedLayout,
                        hide_metabox,
                    );
                }
            }
        }

        if let Some(pt) = post_type.as_deref() {
            if let Some(slots) = self.post_type_default_slots(area, pt) {
                if !is_effectively_empty(Some(&slots)) {
                    return finalize(
                        area,
                        Some(item),
                        &slots,
                        SequenceSource::PostTypeDefault,
                        hide_metabox,
                    );
                }
            }
        }

        if let Some(layout_id) = self.options.global_default(area) {
            if let Some(layout) = self.layouts.get(layout_id) {
                if !is_effectively_empty(Some(&layout.slots)) {
                    return finalize(
                        area,
                        Some(item),
                        &layout.slots,
                        SequenceSource::GlobalDefault,
                        hide_metabox,
                    );
                }
            }
        }

        ResolvedSequence::empty(area, Some(item), hide_metabox)
    }

    /// Slots for an explicitly named layout: published saved layouts first,
    /// then code-registered layouts in registration order
    fn named_layout_slots(&self, name: &str) -> Option<Vec<Slot>> {
        if let Some(layout) = self.layouts.find_by_slug(name) {
            return Some(layout.slots.clone());
        }
        self.layouts
            .find_registered(name)
            .map(|layout| layout.slots.clone())
    }

    /// Slots for the (area, post type) default: saved layouts first, then
    /// code-registered defaults
    fn post_type_default_slots(&self, area: &str, post_type: &str) -> Option<Vec<Slot>> {
        if let Some(layout) = self.layouts.find_default_for(area, post_type) {
            return Some(layout.slots.clone());
        }
        self.layouts
            .find_registered_default(post_type)
            .map(|layout| layout.slots.clone())
    }
}

/// Turn stored slots into a renderable sequence
///
/// Malformed slots (empty slug) and `none` sentinels are dropped, then
/// immediately consecutive repeats of the same slug collapse to one entry.
/// The collapse runs after the drop, so a repeat separated only by a `none`
/// slot still collapses. Non-consecutive repeats are kept; a part may
/// appear several times on one page.
fn finalize(
    area: &str,
    content_item: Option<ContentId>,
    slots: &[Slot],
    source: SequenceSource,
    hide_metabox: bool,
) -> ResolvedSequence {
    let mut parts: Vec<ResolvedPart> = Vec::new();
    for (index, slot) in slots.iter().enumerate() {
        if slot.template_group.is_empty() || slot.is_none_sentinel() {
            continue;
        }
        if parts
            .last()
            .is_some_and(|last| last.slug == slot.template_group)
        {
            continue;
        }
        parts.push(ResolvedPart {
            index,
            slug: slot.template_group.clone(),
        });
    }

    let source = if parts.is_empty() {
        SequenceSource::Empty
    } else {
        source
    };

    ResolvedSequence {
        area: area.to_string(),
        content_item,
        parts,
        source,
        hide_metabox,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaMetadata;
    use crate::content::MemoryContent;
    use crate::layout::Layout;

    fn slots(slugs: &[&str]) -> Vec<Slot> {
        slugs.iter().map(|s| Slot::new(*s)).collect()
    }

    struct Fixture {
        areas: AreaRegistry,
        layouts: LayoutStore,
        content: MemoryContent,
        options: BuilderOptions,
    }

    impl Fixture {
        fn new() -> Self {
            let mut content = MemoryContent::new();
            content.insert_item(42, "page");
            Self {
                areas: AreaRegistry::new(),
                layouts: LayoutStore::new(),
                content,
                options: BuilderOptions::default(),
            }
        }

        fn resolve(&self, request: &ResolveRequest, ctx: &RequestContext) -> ResolvedSequence {
            ResolutionEngine::new(&self.areas, &self.layouts, &self.content, &self.options)
                .resolve(request, ctx)
        }
    }

    #[test]
    fn test_nothing_configured_resolves_empty() {
        let fixture = Fixture::new();
        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));

        assert!(resolved.is_empty());
        assert_eq!(resolved.source, SequenceSource::Empty);
    }

    #[test]
    fn test_none_only_assignment_resolves_empty() {
        let mut fixture = Fixture::new();
        fixture
            .content
            .set_assignment(42, DEFAULT_AREA, vec![Slot::none()]);

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_assignment_wins_over_matching_layout() {
        let mut fixture = Fixture::new();
        fixture.layouts.save(
            Layout::new("page-default", slots(&["layout-hero", "layout-footer"]))
                .as_default_for(DEFAULT_AREA, ["page"]),
        );
        fixture
            .content
            .set_assignment(42, DEFAULT_AREA, slots(&["item-hero"]));

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["item-hero"]);
        assert_eq!(resolved.source, SequenceSource::Assignment);
    }

    #[test]
    fn test_post_type_default_scoped_by_area_and_post_type() {
        let mut fixture = Fixture::new();
        fixture.areas.register("sidebar", AreaMetadata::for_slug("sidebar"));
        fixture.layouts.save(
            Layout::new("sidebar-posts", slots(&["widget"])).as_default_for("sidebar", ["post"]),
        );

        // Content item 42 is a page; the layout is for posts.
        let resolved = fixture.resolve(
            &ResolveRequest::for_area("sidebar"),
            &RequestContext::singular(42),
        );
        assert!(resolved.is_empty());

        fixture.content.insert_item(7, "post");
        let resolved = fixture.resolve(
            &ResolveRequest::for_area("sidebar"),
            &RequestContext::singular(7),
        );
        assert_eq!(resolved.slugs(), vec!["widget"]);
        assert_eq!(resolved.source, SequenceSource::PostTypeDefault);
    }

    #[test]
    fn test_named_layout_beaten_by_assignment_but_beats_defaults() {
        let mut fixture = Fixture::new();
        fixture.layouts.save(Layout::new("landing", slots(&["named-hero"])));
        fixture.layouts.save(
            Layout::new("page-default", slots(&["default-hero"]))
                .as_default_for(DEFAULT_AREA, ["page"]),
        );

        let request = ResolveRequest::new().with_layout("landing");
        let resolved = fixture.resolve(&request, &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["named-hero"]);
        assert_eq!(resolved.source, SequenceSource::NamedLayout);

        fixture
            .content
            .set_assignment(42, DEFAULT_AREA, slots(&["item-hero"]));
        let resolved = fixture.resolve(&request, &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["item-hero"]);
    }

    #[test]
    fn test_named_layout_falls_back_to_registered() {
        let mut fixture = Fixture::new();
        fixture.layouts.register("code-layout", slots(&["promo"]));

        let request = ResolveRequest::new().with_layout("code-layout");
        let resolved = fixture.resolve(&request, &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["promo"]);
        assert_eq!(resolved.source, SequenceSource::NamedLayout);
    }

    #[test]
    fn test_registered_default_applies_when_no_saved_layout_matches() {
        let mut fixture = Fixture::new();
        fixture
            .layouts
            .register_default("code-default", slots(&["promo"]), ["page"]);

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["promo"]);
        assert_eq!(resolved.source, SequenceSource::PostTypeDefault);
    }

    #[test]
    fn test_global_default_last_resort() {
        let mut fixture = Fixture::new();
        let id = fixture.layouts.save(Layout::new("fallback", slots(&["fallback-hero"])));
        fixture.options = BuilderOptions::default().with_default_layout(DEFAULT_AREA, id);

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["fallback-hero"]);
        assert_eq!(resolved.source, SequenceSource::GlobalDefault);
    }

    #[test]
    fn test_global_default_with_no_slots_is_empty() {
        let mut fixture = Fixture::new();
        let id = fixture.layouts.save(Layout::new("hollow", vec![Slot::none()]));
        fixture.options = BuilderOptions::default().with_default_layout(DEFAULT_AREA, id);

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_unregistered_area_is_empty() {
        let fixture = Fixture::new();
        let resolved = fixture.resolve(
            &ResolveRequest::for_area("not-registered"),
            &RequestContext::singular(42),
        );
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_archive_uses_area_templates() {
        let mut fixture = Fixture::new();
        fixture.areas.register(
            "archive-banner",
            AreaMetadata::for_slug("archive-banner").with_templates(["hero", "cta"]),
        );

        let resolved = fixture.resolve(
            &ResolveRequest::for_area("archive-banner"),
            &RequestContext::archive(),
        );
        assert_eq!(resolved.slugs(), vec!["hero", "cta"]);
        assert_eq!(resolved.source, SequenceSource::AreaTemplates);

        // Without hardcoded templates an archive resolves empty.
        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::archive());
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_dedup_collapses_consecutive_only() {
        let mut fixture = Fixture::new();
        fixture
            .content
            .set_assignment(42, DEFAULT_AREA, slots(&["a", "a", "b", "a"]));

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_dedup_collapses_across_dropped_none() {
        let mut fixture = Fixture::new();
        fixture.content.set_assignment(
            42,
            DEFAULT_AREA,
            vec![Slot::new("a"), Slot::none(), Slot::new("a")],
        );

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["a"]);
    }

    #[test]
    fn test_none_slots_dropped_and_indices_preserved() {
        let mut fixture = Fixture::new();
        fixture.content.set_assignment(
            42,
            DEFAULT_AREA,
            vec![Slot::new("hero"), Slot::none(), Slot::new("footer")],
        );

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert_eq!(
            resolved.parts,
            vec![
                ResolvedPart { index: 0, slug: "hero".to_string() },
                ResolvedPart { index: 2, slug: "footer".to_string() },
            ]
        );
    }

    #[test]
    fn test_malformed_slots_skipped() {
        let mut fixture = Fixture::new();
        fixture.content.set_assignment(
            42,
            DEFAULT_AREA,
            vec![Slot::new(""), Slot::new("hero")],
        );

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert_eq!(resolved.slugs(), vec!["hero"]);
    }

    #[test]
    fn test_disallowed_post_type_skips_assignment() {
        let mut fixture = Fixture::new();
        fixture.content.insert_item(9, "product");
        fixture
            .content
            .set_assignment(9, DEFAULT_AREA, slots(&["item-hero"]));

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(9));
        assert!(resolved.is_empty());

        fixture.options = BuilderOptions::default().with_post_types(["page", "product"]);
        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(9));
        assert_eq!(resolved.slugs(), vec!["item-hero"]);
    }

    #[test]
    fn test_hide_metabox_hint_survives_assignment_win() {
        let mut fixture = Fixture::new();
        fixture.layouts.save(
            Layout::new("page-default", slots(&["layout-hero"]))
                .as_default_for(DEFAULT_AREA, ["page"])
                .with_hide_metabox(true),
        );
        fixture
            .content
            .set_assignment(42, DEFAULT_AREA, slots(&["item-hero"]));

        let resolved = fixture.resolve(&ResolveRequest::new(), &RequestContext::singular(42));
        assert_eq!(resolved.source, SequenceSource::Assignment);
        assert!(resolved.hide_metabox);
    }
}
