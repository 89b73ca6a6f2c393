//! Read-only context threaded through every render call.

use crate::render::OutputMode;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Resolves a cross-reference identifier to a permalink.
///
/// Returning `None` is a legitimate outcome (external or undocumented
/// targets); renderers degrade to plain text instead of failing.
pub trait PermalinkResolver {
    fn resolve(&self, refid: &str, kindref: &str) -> Option<String>;
}

/// A slim view of a compound, enough to build inner-index tables and
/// source-location links without holding the full definition.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSummary {
    pub refid: String,
    pub kind: String,
    pub name: String,
    pub brief: Option<String>,
}

/// Looks up compound views by refid, and file compounds by source path.
pub trait CompoundLookup {
    fn lookup(&self, refid: &str) -> Option<&CompoundSummary>;
    fn lookup_by_path(&self, path: &str) -> Option<&CompoundSummary>;
}

/// Rendering toggles sourced from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit a TODO placeholder where a brief/detailed description is missing
    pub suggest_todos: bool,
}

/// The shared workspace for one render pass over one compound.
///
/// Everything here is read-only for renderers except the touched-files set,
/// which collects source paths for the "generated from" footer.
pub struct RenderContext<'a> {
    pub mode: OutputMode,
    pub resolver: &'a dyn PermalinkResolver,
    pub lookup: &'a dyn CompoundLookup,
    pub options: RenderOptions,
    touched_files: RefCell<BTreeSet<String>>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        mode: OutputMode,
        resolver: &'a dyn PermalinkResolver,
        lookup: &'a dyn CompoundLookup,
        options: RenderOptions,
    ) -> Self {
        Self {
            mode,
            resolver,
            lookup,
            options,
            touched_files: RefCell::new(BTreeSet::new()),
        }
    }

    /// Same context, different output mode. Used where a fragment must be
    /// extracted as plain text (front matter, table cells).
    pub fn with_mode(&self, mode: OutputMode) -> RenderContext<'a> {
        RenderContext {
            mode,
            resolver: self.resolver,
            lookup: self.lookup,
            options: self.options,
            touched_files: RefCell::new(self.touched_files.borrow().clone()),
        }
    }

    /// Record a source file path encountered during rendering.
    pub fn note_file(&self, path: &str) {
        self.touched_files.borrow_mut().insert(path.to_string());
    }

    /// Source paths recorded so far, sorted.
    pub fn touched_files(&self) -> Vec<String> {
        self.touched_files.borrow().iter().cloned().collect()
    }
}

/// Resolver backed by a prebuilt refid → URL map.
#[derive(Debug, Default)]
pub struct MapResolver {
    urls: BTreeMap<String, String>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, refid: impl Into<String>, url: impl Into<String>) {
        self.urls.insert(refid.into(), url.into());
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl PermalinkResolver for MapResolver {
    fn resolve(&self, refid: &str, _kindref: &str) -> Option<String> {
        self.urls.get(refid).cloned()
    }
}

/// Lookup backed by prebuilt summary maps.
#[derive(Debug, Default)]
pub struct MapLookup {
    by_refid: BTreeMap<String, CompoundSummary>,
    by_path: BTreeMap<String, String>,
}

impl MapLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, summary: CompoundSummary) {
        self.by_refid.insert(summary.refid.clone(), summary);
    }

    /// Associate a source path with a file compound's refid.
    pub fn insert_path(&mut self, path: impl Into<String>, refid: impl Into<String>) {
        self.by_path.insert(path.into(), refid.into());
    }
}

impl CompoundLookup for MapLookup {
    fn lookup(&self, refid: &str) -> Option<&CompoundSummary> {
        self.by_refid.get(refid)
    }

    fn lookup_by_path(&self, path: &str) -> Option<&CompoundSummary> {
        self.by_path.get(path).and_then(|refid| self.by_refid.get(refid))
    }
}

/// Resolver that knows no permalinks. Every reference degrades to plain text.
#[derive(Debug, Default)]
pub struct NullResolver;

impl PermalinkResolver for NullResolver {
    fn resolve(&self, _refid: &str, _kindref: &str) -> Option<String> {
        None
    }
}

/// Lookup that knows no compounds.
#[derive(Debug, Default)]
pub struct NullLookup;

impl CompoundLookup for NullLookup {
    fn lookup(&self, _refid: &str) -> Option<&CompoundSummary> {
        None
    }

    fn lookup_by_path(&self, _path: &str) -> Option<&CompoundSummary> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_resolver_hits_and_misses() {
        let mut resolver = MapResolver::new();
        resolver.insert("classA", "/api/class-a");
        assert_eq!(
            resolver.resolve("classA", "compound").as_deref(),
            Some("/api/class-a")
        );
        assert_eq!(resolver.resolve("classB", "compound"), None);
    }

    #[test]
    fn touched_files_are_sorted_and_deduplicated() {
        let resolver = NullResolver;
        let lookup = NullLookup;
        let ctx = RenderContext::new(
            OutputMode::Markdown,
            &resolver,
            &lookup,
            RenderOptions::default(),
        );
        ctx.note_file("src/b.hpp");
        ctx.note_file("src/a.hpp");
        ctx.note_file("src/b.hpp");
        assert_eq!(ctx.touched_files(), vec!["src/a.hpp", "src/b.hpp"]);
    }

    #[test]
    fn path_lookup_goes_through_refid() {
        let mut lookup = MapLookup::new();
        lookup.insert(CompoundSummary {
            refid: "point_8hpp".to_string(),
            kind: "file".to_string(),
            name: "point.hpp".to_string(),
            brief: None,
        });
        lookup.insert_path("geo/point.hpp", "point_8hpp");
        assert_eq!(
            lookup.lookup_by_path("geo/point.hpp").unwrap().name,
            "point.hpp"
        );
        assert!(lookup.lookup_by_path("geo/other.hpp").is_none());
    }
}
