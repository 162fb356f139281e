//! Saved and code-registered layouts
//!
//! A layout is a named, reusable ordered fragment sequence that lives
//! independently of any single content item. Saved layouts are editor-
//! managed content items of their own non-public kind; registered layouts
//! are declared in theme code and never shown in the editor.

mod store;

pub use store::{Layout, LayoutId, LayoutStore, RegisteredLayout};
