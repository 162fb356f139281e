//! Lifecycle events emitted during dispatch

use std::fmt;

use crate::content::ContentId;
use crate::part::Part;

/// Events emitted while a sequence renders
///
/// Ordering is guaranteed: `BeforeAll` precedes every fragment, each
/// fragment's `BeforeFragment` precedes its output and `AfterFragment`
/// follows it, and `AfterAll` closes the sequence. Observers run
/// synchronously in subscription order.
#[derive(Debug)]
pub enum RenderEvent<'a> {
    /// The sequence is about to render
    BeforeAll {
        area: &'a str,
        content_item: Option<ContentId>,
    },
    /// One fragment is about to render
    BeforeFragment {
        /// Wrapper tag name in effect for this render
        container: &'a str,
        /// Space-joined class list for the fragment's wrapper
        classes: &'a str,
        slug: &'a str,
        part: &'a Part,
    },
    /// One fragment finished rendering
    AfterFragment {
        container: &'a str,
        slug: &'a str,
        part: &'a Part,
    },
    /// The whole sequence finished
    AfterAll {
        area: &'a str,
        content_item: Option<ContentId>,
    },
}

/// A subscriber to render lifecycle events
///
/// Observers may write into the output stream; the wrap feature is one of
/// these rather than dispatcher-internal logic.
pub trait RenderObserver {
    fn on_event(&mut self, event: &RenderEvent<'_>, out: &mut dyn fmt::Write) -> fmt::Result;
}
