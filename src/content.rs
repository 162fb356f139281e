//! Data contracts shared with the host persistence layer
//!
//! The core never talks to a database directly. Assignments (the fragment
//! sequence stored on one content item for one area) live in an external
//! key-value metadata store; [`ContentSource`] is the seam the host
//! implements over that store. [`MemoryContent`] is a complete in-process
//! implementation suitable for hosts that load their data up front, and for
//! tests.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Identifier for a content item in the host's store
pub type ContentId = u64;

/// The reserved slug meaning "empty slot"
///
/// A slot carrying this value never renders, and a sequence made up solely
/// of these is treated the same as no sequence at all.
pub const NONE_SLUG: &str = "none";

/// One entry in a stored fragment sequence
///
/// The on-disk shape is an ordered list of `{template_group: slug}` maps;
/// any extra keys are per-slot custom fields owned by the editor UI and are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slug of the part to render in this slot
    pub template_group: String,
    /// Custom per-slot fields, preserved as opaque strings
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Slot {
    /// Create a slot referencing a part by slug
    pub fn new(template_group: impl Into<String>) -> Self {
        Self {
            template_group: template_group.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Create the "empty slot" sentinel
    pub fn none() -> Self {
        Self::new(NONE_SLUG)
    }

    /// Attach a custom field to the slot
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Whether this slot is the "none" sentinel
    pub fn is_none_sentinel(&self) -> bool {
        self.template_group == NONE_SLUG
    }
}

/// True when the sequence is missing, empty, or made up only of "none"
/// sentinels and malformed (empty-slug) slots.
///
/// Such a sequence never wins a precedence tier; resolution moves on to the
/// next fallback as if nothing were stored.
pub fn is_effectively_empty(slots: Option<&[Slot]>) -> bool {
    match slots {
        None => true,
        Some(slots) => slots
            .iter()
            .all(|s| s.is_none_sentinel() || s.template_group.is_empty()),
    }
}

/// Read access to content items and their area assignments
///
/// Implemented by the host over its metadata store. Lookups for unknown
/// items return `None`; that is a normal state, not an error.
pub trait ContentSource {
    /// The post type of a content item, if the item exists
    fn post_type(&self, id: ContentId) -> Option<String>;

    /// The fragment sequence stored on `id` for `area`, if any
    fn assignment(&self, id: ContentId, area: &str) -> Option<Vec<Slot>>;
}

/// Ambient facts about the request being rendered
///
/// Mirrors what the host's routing layer knows: which content item the
/// request resolved to (if any) and whether the target is a singular
/// content view rather than an archive or error page.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// The content item the current request resolved to
    pub queried_object: Option<ContentId>,
    /// Whether the request targets a single content item
    pub singular: bool,
}

impl RequestContext {
    /// Context for a singular view of one content item
    pub fn singular(id: ContentId) -> Self {
        Self {
            queried_object: Some(id),
            singular: true,
        }
    }

    /// Context for a non-singular view (archive, 404, search)
    pub fn archive() -> Self {
        Self::default()
    }
}

/// In-memory [`ContentSource`] implementation
#[derive(Debug, Default)]
pub struct MemoryContent {
    items: HashMap<ContentId, String>,
    assignments: HashMap<(ContentId, String), Vec<Slot>>,
}

impl MemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a content item with the given post type
    pub fn insert_item(&mut self, id: ContentId, post_type: impl Into<String>) {
        self.items.insert(id, post_type.into());
    }

    /// Store the fragment sequence for (item, area), replacing any existing one
    pub fn set_assignment(&mut self, id: ContentId, area: &str, slots: Vec<Slot>) {
        self.assignments.insert((id, area.to_string()), slots);
    }

    /// Remove the fragment sequence for (item, area)
    pub fn clear_assignment(&mut self, id: ContentId, area: &str) {
        self.assignments.remove(&(id, area.to_string()));
    }
}

impl ContentSource for MemoryContent {
    fn post_type(&self, id: ContentId) -> Option<String> {
        self.items.get(&id).cloned()
    }

    fn assignment(&self, id: ContentId, area: &str) -> Option<Vec<Slot>> {
        self.assignments.get(&(id, area.to_string())).cloned()
    }
}
