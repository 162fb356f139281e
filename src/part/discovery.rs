//! Discovery strategies for template parts
//!
//! Two concrete strategies are provided. [`HeaderDiscovery`] scans an
//! ordered stack of directories for prefixed template files and reads their
//! declared metadata out of a header comment, the way the original theme
//! convention worked. [`ManifestDiscovery`] reads one TOML file that
//! declares every part explicitly, for themes that prefer not to rely on
//! filename conventions.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::registry::Part;

/// Errors raised while discovering parts
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// The manifest file could not be read
    #[error("error reading manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The manifest file is not valid TOML
    #[error("error parsing manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// A source of template parts
///
/// Returns the full map of available parts keyed by slug. Implementations
/// must be deterministic for a fixed filesystem state; the registry relies
/// on that to keep lookups stable within one resolution pass.
pub trait PartDiscovery {
    fn discover(&self) -> Result<BTreeMap<String, Part>, DiscoverError>;
}

/// Maximum number of bytes read from a file when looking for its header
const HEADER_READ_LIMIT: usize = 8 * 1024;

/// Header-comment discovery over a stack of search directories
///
/// Directories are searched in order; the first file found for a slug wins,
/// which gives child-theme files precedence over parent-theme files and
/// both precedence over the plugin fallback directory. A file with no
/// declared `Part Name` is malformed and excluded.
#[derive(Debug, Clone)]
pub struct HeaderDiscovery {
    stack: Vec<PathBuf>,
    prefix: String,
    extension: String,
}

impl HeaderDiscovery {
    /// Discovery over the given directory stack, highest precedence first
    pub fn new<I, P>(stack: I, prefix: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            stack: stack.into_iter().map(Into::into).collect(),
            prefix: prefix.into(),
            extension: "php".to_string(),
        }
    }

    /// Change the file extension matched by the scan (default `php`)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Slug for a matching filename, `None` when the prefix does not match
    fn slug_for(&self, path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_str()?;
        if path.extension()?.to_str()? != self.extension {
            return None;
        }
        let slug = stem.strip_prefix(&self.prefix)?.strip_prefix('-')?;
        if slug.is_empty() {
            return None;
        }
        Some(slug.to_string())
    }
}

impl PartDiscovery for HeaderDiscovery {
    fn discover(&self) -> Result<BTreeMap<String, Part>, DiscoverError> {
        let mut parts = BTreeMap::new();

        for dir in &self.stack {
            // A missing search directory is unconfigured, not an error.
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };

            let mut files: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .collect();
            files.sort();

            for path in files {
                let Some(slug) = self.slug_for(&path) else {
                    continue;
                };
                // Earlier directories in the stack shadow later ones.
                if parts.contains_key(&slug) {
                    continue;
                }
                let Some(header) = read_header(&path) else {
                    continue;
                };
                let Some(name) = header.get("Part Name").filter(|n| !n.is_empty()) else {
                    continue;
                };
                let areas = header
                    .get("Areas")
                    .or_else(|| header.get("Area"))
                    .map(|list| split_area_list(list))
                    .unwrap_or_default();

                parts.insert(
                    slug.clone(),
                    Part {
                        slug,
                        name: name.clone(),
                        description: header.get("Description").cloned().unwrap_or_default(),
                        areas,
                        path,
                    },
                );
            }
        }

        Ok(parts)
    }
}

/// Parse `Key: value` declarations from the head of a template file
///
/// Only the first few kilobytes are examined. Each known key is searched
/// for anywhere in that window, so the declarations work inside whatever
/// comment syntax the template format uses; the value runs to the end of
/// its line, with a trailing comment terminator stripped.
fn read_header(path: &Path) -> Option<BTreeMap<String, String>> {
    let mut file = fs::File::open(path).ok()?;
    let mut buf = vec![0u8; HEADER_READ_LIMIT];
    let read = file.read(&mut buf).ok()?;
    buf.truncate(read);
    let text = String::from_utf8_lossy(&buf);

    let mut header = BTreeMap::new();
    for key in ["Part Name", "Description", "Area", "Areas"] {
        let marker = format!("{key}:");
        let Some(pos) = text.find(&marker) else {
            continue;
        };
        let rest = &text[pos + marker.len()..];
        let value = rest
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .trim_end_matches("*/")
            .trim();
        header.insert(key.to_string(), value.to_string());
    }
    Some(header)
}

fn split_area_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|area| !area.is_empty())
        .map(str::to_string)
        .collect()
}

/// One part declaration in a manifest file
#[derive(Debug, Deserialize)]
struct ManifestPart {
    slug: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    areas: Vec<String>,
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default, rename = "part")]
    parts: Vec<ManifestPart>,
}

/// Manifest-file discovery
///
/// The manifest is a TOML document with one `[[part]]` table per part.
/// Relative part paths are resolved against the manifest's directory.
#[derive(Debug, Clone)]
pub struct ManifestDiscovery {
    manifest_path: PathBuf,
}

impl ManifestDiscovery {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }
}

impl PartDiscovery for ManifestDiscovery {
    fn discover(&self) -> Result<BTreeMap<String, Part>, DiscoverError> {
        let source =
            fs::read_to_string(&self.manifest_path).map_err(|source| DiscoverError::ManifestRead {
                path: self.manifest_path.clone(),
                source,
            })?;
        let manifest: Manifest =
            toml::from_str(&source).map_err(|source| DiscoverError::ManifestParse {
                path: self.manifest_path.clone(),
                source,
            })?;

        let base = self.manifest_path.parent().unwrap_or(Path::new(""));
        let mut parts = BTreeMap::new();
        for declared in manifest.parts {
            if declared.name.is_empty() {
                continue;
            }
            let path = if declared.path.is_absolute() {
                declared.path
            } else {
                base.join(declared.path)
            };
            parts.insert(
                declared.slug.clone(),
                Part {
                    slug: declared.slug,
                    name: declared.name,
                    description: declared.description,
                    areas: declared.areas,
                    path,
                },
            );
        }
        Ok(parts)
    }
}
