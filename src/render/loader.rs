//! The seam to the host's template loader

use std::fmt;
use std::fs;

use crate::part::Part;

use super::dispatcher::RenderError;

/// Loads and executes one template part, writing its output
///
/// The host's loader owns inclusion and execution semantics; the core only
/// hands it the part's resolved file path via the [`Part`] record. Loaders
/// are trusted not to re-enter the dispatcher.
pub trait TemplateLoader {
    fn load(&mut self, part: &Part, out: &mut dyn fmt::Write) -> Result<(), RenderError>;
}

/// Loader that includes the template file's contents verbatim
///
/// Suitable for static fragments and for tests; hosts with an executable
/// template format supply their own loader.
#[derive(Debug, Default)]
pub struct FileTemplateLoader;

impl FileTemplateLoader {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateLoader for FileTemplateLoader {
    fn load(&mut self, part: &Part, out: &mut dyn fmt::Write) -> Result<(), RenderError> {
        let contents = fs::read_to_string(&part.path).map_err(|source| RenderError::Loader {
            path: part.path.clone(),
            source,
        })?;
        out.write_str(&contents)?;
        Ok(())
    }
}
