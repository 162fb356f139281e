//! The optional per-part wrapper element

use std::fmt;

use super::events::{RenderEvent, RenderObserver};

/// Wraps every fragment in a configurable HTML container element
///
/// Subscribed by the dispatcher when the wrap option is on. The opening tag
/// carries the computed class list; the closing tag is followed by a
/// comment naming the part, which keeps rendered markup diffable.
#[derive(Debug, Default)]
pub struct Wrapper;

impl Wrapper {
    pub fn new() -> Self {
        Self
    }
}

impl RenderObserver for Wrapper {
    fn on_event(&mut self, event: &RenderEvent<'_>, out: &mut dyn fmt::Write) -> fmt::Result {
        match event {
            RenderEvent::BeforeFragment {
                container, classes, ..
            } => {
                write!(out, "<{container} class=\"{classes}\">")
            }
            RenderEvent::AfterFragment {
                container, slug, ..
            } => {
                write!(out, "</{container}><!-- .{slug} -->")
            }
            _ => Ok(()),
        }
    }
}
