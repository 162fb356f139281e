//! The render dispatcher

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::ContentId;
use crate::options::BuilderOptions;
use crate::part::PartRegistry;
use crate::resolve::ResolvedSequence;

use super::events::{RenderEvent, RenderObserver};
use super::loader::TemplateLoader;
use super::wrap::Wrapper;

/// Errors raised while dispatching a sequence
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template loader failed on a part's file
    #[error("error loading template {path}: {source}")]
    Loader {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The output sink refused a write
    #[error("error writing render output: {0}")]
    Write(#[from] fmt::Error),
}

/// Walks a resolved sequence and renders each part
///
/// One dispatcher spans one request: it remembers which (area, content
/// item) pairs have already rendered and makes a second trigger of the same
/// pair a no-op, so a template tag wired to several host hooks cannot
/// duplicate output. Distinct pairs render independently, which is what
/// makes nested areas inside a fragment safe.
pub struct Dispatcher {
    container: String,
    container_class: String,
    observers: Vec<Box<dyn RenderObserver>>,
    completed: HashSet<(String, Option<ContentId>)>,
}

impl Dispatcher {
    /// Dispatcher configured from the builder options
    ///
    /// When the wrap option is on, a [`Wrapper`] is subscribed up front;
    /// wrapping is observer behavior, not dispatch-loop logic.
    pub fn new(options: &BuilderOptions) -> Self {
        let mut dispatcher = Self {
            container: options.container.clone(),
            container_class: options.container_class.clone(),
            observers: Vec::new(),
            completed: HashSet::new(),
        };
        if options.use_wrap {
            dispatcher.subscribe(Wrapper::new());
        }
        dispatcher
    }

    /// Subscribe an observer to the render lifecycle events
    pub fn subscribe(&mut self, observer: impl RenderObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Render a sequence with the configured container and no extra classes
    ///
    /// Returns `Ok(true)` when the sequence rendered, `Ok(false)` when it
    /// was empty or this (area, content item) pair already rendered on this
    /// dispatcher.
    pub fn render(
        &mut self,
        sequence: &ResolvedSequence,
        registry: &PartRegistry,
        loader: &mut dyn TemplateLoader,
        out: &mut dyn fmt::Write,
    ) -> Result<bool, RenderError> {
        self.render_with(sequence, registry, loader, None, None, out)
    }

    /// Render a sequence with a per-call container and class override
    pub fn render_with(
        &mut self,
        sequence: &ResolvedSequence,
        registry: &PartRegistry,
        loader: &mut dyn TemplateLoader,
        container: Option<&str>,
        extra_class: Option<&str>,
        out: &mut dyn fmt::Write,
    ) -> Result<bool, RenderError> {
        let guard_key = (sequence.area.clone(), sequence.content_item);
        if sequence.is_empty() || self.completed.contains(&guard_key) {
            return Ok(false);
        }

        let container = container
            .filter(|c| !c.is_empty())
            .unwrap_or(self.container.as_str())
            .to_string();

        emit(
            &mut self.observers,
            &RenderEvent::BeforeAll {
                area: &sequence.area,
                content_item: sequence.content_item,
            },
            out,
        )?;

        for entry in &sequence.parts {
            // A slug with no discovered part is data drift (the theme
            // changed after the assignment was saved); skip it silently.
            let Some(part) = registry.get(&entry.slug) else {
                continue;
            };

            let classes = self.classes_for(&entry.slug, extra_class);
            emit(
                &mut self.observers,
                &RenderEvent::BeforeFragment {
                    container: &container,
                    classes: &classes,
                    slug: &entry.slug,
                    part,
                },
                out,
            )?;

            loader.load(part, out)?;

            emit(
                &mut self.observers,
                &RenderEvent::AfterFragment {
                    container: &container,
                    slug: &entry.slug,
                    part,
                },
                out,
            )?;
        }

        emit(
            &mut self.observers,
            &RenderEvent::AfterAll {
                area: &sequence.area,
                content_item: sequence.content_item,
            },
            out,
        )?;

        self.completed.insert(guard_key);
        Ok(true)
    }

    /// Class list for one part: extra classes, the part slug, then the
    /// configured container class, order-preserving deduped
    fn classes_for(&self, slug: &str, extra_class: Option<&str>) -> String {
        let mut classes: Vec<&str> = Vec::new();
        if let Some(extra) = extra_class {
            classes.extend(extra.split_whitespace());
        }
        classes.push(slug);
        classes.extend(self.container_class.split_whitespace());

        let mut unique: Vec<&str> = Vec::new();
        for class in classes {
            if !unique.contains(&class) {
                unique.push(class);
            }
        }
        unique.join(" ")
    }
}

/// Notify every observer, in subscription order
fn emit(
    observers: &mut [Box<dyn RenderObserver>],
    event: &RenderEvent<'_>,
    out: &mut dyn fmt::Write,
) -> Result<(), RenderError> {
    for observer in observers {
        observer.on_event(event, out)?;
    }
    Ok(())
}
