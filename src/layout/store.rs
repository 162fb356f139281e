//! Storage and lookup for layouts

use crate::content::{Slot, NONE_SLUG};

/// Identifier assigned to a saved layout
pub type LayoutId = u64;

/// A named, reusable ordered fragment sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Unique slug, matched exactly by name lookups
    pub slug: String,
    /// Title shown in admin selection lists
    pub title: String,
    /// Ordered fragment slots
    pub slots: Vec<Slot>,
    /// Post types this layout is the automatic default for
    pub default_post_types: Vec<String>,
    /// Area this layout defaults for, when it is a post-type default
    pub default_area: Option<String>,
    /// Suppress the per-content-item editing UI where this layout applies
    pub hide_metabox: bool,
    /// Only published layouts take part in resolution
    pub published: bool,
}

impl Layout {
    /// A published layout with the given slug and slots
    pub fn new(slug: impl Into<String>, slots: Vec<Slot>) -> Self {
        let slug = slug.into();
        Self {
            title: slug.clone(),
            slug,
            slots,
            default_post_types: Vec::new(),
            default_area: None,
            hide_metabox: false,
            published: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Mark this layout as the default for an area and set of post types
    pub fn as_default_for<I, S>(mut self, area: impl Into<String>, post_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_area = Some(area.into());
        self.default_post_types = post_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hide_metabox(mut self, hide: bool) -> Self {
        self.hide_metabox = hide;
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }
}

/// A layout registered from theme code rather than saved by an editor
///
/// Consulted by name, or as a post-type default, only after saved layouts;
/// kept in registration order and never listed in the admin UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredLayout {
    pub name: String,
    pub slots: Vec<Slot>,
    /// Post types this registered layout is the default for
    pub default_post_types: Vec<String>,
}

/// CRUD and lookup over layouts
///
/// Saved layouts are held newest-first for default lookups (highest id
/// first); that first-match order is part of the contract of
/// [`LayoutStore::find_default_for`].
#[derive(Debug, Default)]
pub struct LayoutStore {
    saved: Vec<(LayoutId, Layout)>,
    registered: Vec<RegisteredLayout>,
    next_id: LayoutId,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self {
            saved: Vec::new(),
            registered: Vec::new(),
            next_id: 1,
        }
    }

    /// Persist a layout, stripping `none` sentinel slots first
    ///
    /// Saving a slug that already exists replaces that layout in place and
    /// keeps its id; otherwise a fresh id is assigned.
    pub fn save(&mut self, mut layout: Layout) -> LayoutId {
        layout.slots.retain(|slot| slot.template_group != NONE_SLUG);

        if let Some((id, existing)) = self
            .saved
            .iter_mut()
            .find(|(_, existing)| existing.slug == layout.slug)
        {
            *existing = layout;
            return *id;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.saved.push((id, layout));
        id
    }

    /// Register a layout from code
    pub fn register(&mut self, name: impl Into<String>, slots: Vec<Slot>) {
        self.registered.push(RegisteredLayout {
            name: name.into(),
            slots,
            default_post_types: Vec::new(),
        });
    }

    /// Register a code layout that is the default for some post types
    pub fn register_default<I, S>(&mut self, name: impl Into<String>, slots: Vec<Slot>, post_types: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registered.push(RegisteredLayout {
            name: name.into(),
            slots,
            default_post_types: post_types.into_iter().map(Into::into).collect(),
        });
    }

    /// A saved layout by id
    pub fn get(&self, id: LayoutId) -> Option<&Layout> {
        self.saved
            .iter()
            .find(|(saved_id, _)| *saved_id == id)
            .map(|(_, layout)| layout)
    }

    /// A published saved layout by exact slug
    pub fn find_by_slug(&self, slug: &str) -> Option<&Layout> {
        self.saved
            .iter()
            .map(|(_, layout)| layout)
            .find(|layout| layout.published && layout.slug == slug)
    }

    /// The default layout for an area and post type, newest first
    ///
    /// Scans published layouts whose `default_area` matches, most recently
    /// saved first, and returns the first whose post-type set contains
    /// `post_type`. The tie-break between several matching layouts is
    /// deliberately "latest saved wins" and nothing subtler.
    pub fn find_default_for(&self, area: &str, post_type: &str) -> Option<&Layout> {
        self.saved
            .iter()
            .rev()
            .map(|(_, layout)| layout)
            .filter(|layout| layout.published)
            .filter(|layout| layout.default_area.as_deref() == Some(area))
            .find(|layout| layout.default_post_types.iter().any(|t| t == post_type))
    }

    /// A registered layout by name, registration order
    pub fn find_registered(&self, name: &str) -> Option<&RegisteredLayout> {
        self.registered.iter().find(|layout| layout.name == name)
    }

    /// The first registered layout that is a default for `post_type`
    pub fn find_registered_default(&self, post_type: &str) -> Option<&RegisteredLayout> {
        self.registered
            .iter()
            .find(|layout| layout.default_post_types.iter().any(|t| t == post_type))
    }

    /// Published layouts as (id, title) pairs, title ascending
    ///
    /// Ordering matches what the admin selection UI expects.
    pub fn list_all(&self) -> Vec<(LayoutId, String)> {
        let mut list: Vec<(LayoutId, String)> = self
            .saved
            .iter()
            .filter(|(_, layout)| layout.published)
            .map(|(id, layout)| (*id, layout.title.clone()))
            .collect();
        list.sort_by(|a, b| a.1.cmp(&b.1));
        list
    }
}
