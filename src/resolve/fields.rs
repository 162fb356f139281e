//! Per-slot custom field lookup
//!
//! Slots can carry extra editor-defined fields next to their part slug.
//! A part's template asks for those fields by (index, slug) so that the
//! same part used twice on a page reads its own slot's data.

use thiserror::Error;

use crate::content::{is_effectively_empty, ContentId, ContentSource};
use crate::layout::LayoutStore;
use crate::options::BuilderOptions;

/// Errors from slot field lookups
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The caller passed a slot reference without a slug
    #[error("slot reference has an empty slug; pass the part slug the slot should hold")]
    EmptySlug,
}

/// Reference to one slot of a stored sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRef {
    /// Position in the stored sequence
    pub index: usize,
    /// Part slug the slot is expected to hold
    pub slug: String,
}

impl SlotRef {
    pub fn new(index: usize, slug: impl Into<String>) -> Self {
        Self {
            index,
            slug: slug.into(),
        }
    }
}

/// Read a custom field from one slot of a content item's sequence
///
/// Reads the (item, area) assignment, falling back to the area's global
/// default layout when the assignment is missing or none-only, the same
/// fallback the engine applies. Returns the field value only when the slot
/// at `slot.index` actually holds `slot.slug` and carries `key`; any
/// mismatch is `None`, since stale references are normal after an editor
/// reorders slots.
pub fn slot_field(
    content: &dyn ContentSource,
    options: &BuilderOptions,
    layouts: &LayoutStore,
    area: &str,
    item: ContentId,
    slot: &SlotRef,
    key: &str,
) -> Result<Option<String>, FieldError> {
    if slot.slug.is_empty() {
        return Err(FieldError::EmptySlug);
    }

    let assignment = content.assignment(item, area);
    let slots = if is_effectively_empty(assignment.as_deref()) {
        match options
            .global_default(area)
            .and_then(|id| layouts.get(id))
        {
            Some(layout) => layout.slots.clone(),
            None => return Ok(None),
        }
    } else {
        assignment.unwrap_or_default()
    };

    Ok(slots
        .get(slot.index)
        .filter(|stored| stored.template_group == slot.slug)
        .and_then(|stored| stored.fields.get(key))
        .cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::DEFAULT_AREA;
    use crate::content::{MemoryContent, Slot};
    use crate::layout::Layout;

    fn content_with_fields() -> MemoryContent {
        let mut content = MemoryContent::new();
        content.insert_item(42, "page");
        content.set_assignment(
            42,
            DEFAULT_AREA,
            vec![
                Slot::new("hero").with_field("heading", "Welcome"),
                Slot::new("hero").with_field("heading", "Second hero"),
            ],
        );
        content
    }

    #[test]
    fn test_field_by_index_and_slug() {
        let content = content_with_fields();
        let options = BuilderOptions::default();
        let layouts = LayoutStore::new();

        let value = slot_field(
            &content,
            &options,
            &layouts,
            DEFAULT_AREA,
            42,
            &SlotRef::new(1, "hero"),
            "heading",
        )
        .unwrap();
        assert_eq!(value.as_deref(), Some("Second hero"));
    }

    #[test]
    fn test_mismatched_slug_is_none() {
        let content = content_with_fields();
        let options = BuilderOptions::default();
        let layouts = LayoutStore::new();

        let value = slot_field(
            &content,
            &options,
            &layouts,
            DEFAULT_AREA,
            42,
            &SlotRef::new(0, "footer"),
            "heading",
        )
        .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_empty_slug_is_validation_error() {
        let content = MemoryContent::new();
        let options = BuilderOptions::default();
        let layouts = LayoutStore::new();

        let err = slot_field(
            &content,
            &options,
            &layouts,
            DEFAULT_AREA,
            42,
            &SlotRef::new(0, ""),
            "heading",
        )
        .unwrap_err();
        assert_eq!(err, FieldError::EmptySlug);
    }

    #[test]
    fn test_falls_back_to_global_default_layout() {
        let mut content = MemoryContent::new();
        content.insert_item(42, "page");

        let mut layouts = LayoutStore::new();
        let id = layouts.save(Layout::new(
            "fallback",
            vec![Slot::new("hero").with_field("heading", "From layout")],
        ));
        let options = BuilderOptions::default().with_default_layout(DEFAULT_AREA, id);

        let value = slot_field(
            &content,
            &options,
            &layouts,
            DEFAULT_AREA,
            42,
            &SlotRef::new(0, "hero"),
            "heading",
        )
        .unwrap();
        assert_eq!(value.as_deref(), Some("From layout"));
    }
}
