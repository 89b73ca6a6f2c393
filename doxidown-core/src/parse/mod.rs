//! Tree-building: one builder per grammar production, plus the per-run
//! parse session that owns the resulting compound forest.
//!
//! Builders are strict about cardinality (missing mandatory children abort
//! the run as [`ConvertError::Schema`]) and lenient about vocabulary
//! (unrecognized elements/attributes inside permissive content models are
//! logged and dropped). The two severities are deliberate and must not be
//! unified; see `error.rs` for the rationale.

pub mod compound;
pub mod doc;
pub mod doxyfile;
pub mod index;

use crate::error::ConvertError;
use crate::model::compound::CompoundDef;
use crate::model::index::DoxygenIndex;
use crate::xml::XmlElement;
use std::collections::BTreeMap;

/// A soft, non-fatal finding accumulated during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Name of the element the finding was observed on
    pub context: String,
    pub message: String,
}

/// Per-run parse state: the compound arena, the index, the hierarchy map and
/// accumulated diagnostics.
///
/// Constructed once per conversion run and passed by reference through every
/// builder, so that independent runs never share state. Compounds are kept in
/// insertion order because later passes (member-kind back-fill, first
/// definition wins) depend on the fixed, sequential parse order.
#[derive(Debug, Default)]
pub struct ParseSession {
    compounds: Vec<CompoundDef>,
    by_id: BTreeMap<String, usize>,
    index: Option<DoxygenIndex>,
    parents: BTreeMap<String, String>,
    files_parsed: usize,
    diagnostics: Vec<Diagnostic>,
    backfilled: bool,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a soft diagnostic and keep going.
    pub fn warn(&mut self, context: &str, message: impl Into<String>) {
        let message = message.into();
        log::warn!("<{context}>: {message}");
        self.diagnostics.push(Diagnostic {
            context: context.to_string(),
            message,
        });
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Register a parsed compound. On a duplicate refid the first definition
    /// wins and the duplicate is dropped with a diagnostic.
    pub fn add_compound(&mut self, compound: CompoundDef) {
        if self.by_id.contains_key(&compound.id) {
            self.warn(
                "compounddef",
                format!("duplicate compound id '{}', first definition wins", compound.id),
            );
            return;
        }
        self.by_id.insert(compound.id.clone(), self.compounds.len());
        self.compounds.push(compound);
    }

    /// All compounds, in parse order.
    pub fn compounds(&self) -> &[CompoundDef] {
        &self.compounds
    }

    pub fn compound(&self, refid: &str) -> Option<&CompoundDef> {
        self.by_id.get(refid).map(|&i| &self.compounds[i])
    }

    pub fn set_index(&mut self, index: DoxygenIndex) {
        self.index = Some(index);
    }

    pub fn index(&self) -> Option<&DoxygenIndex> {
        self.index.as_ref()
    }

    pub(crate) fn index_mut(&mut self) -> Option<&mut DoxygenIndex> {
        self.index.as_mut()
    }

    /// Refid of the compound that lists `refid` as an inner compound, once
    /// [`index::link_hierarchy`] has run.
    pub fn parent_of(&self, refid: &str) -> Option<&str> {
        self.parents.get(refid).map(String::as_str)
    }

    pub(crate) fn set_parent(&mut self, child: String, parent: String) {
        self.parents.insert(child, parent);
    }

    pub fn note_file_parsed(&mut self) {
        self.files_parsed += 1;
    }

    pub fn files_parsed(&self) -> usize {
        self.files_parsed
    }

    pub(crate) fn mark_backfilled(&mut self) -> Result<(), ConvertError> {
        if self.backfilled {
            return Err(ConvertError::schema(
                "doxygenindex",
                "member-kind back-fill ran more than once",
            ));
        }
        self.backfilled = true;
        Ok(())
    }

    pub fn backfill_done(&self) -> bool {
        self.backfilled
    }
}

/// Report any attribute not in the builder's known set. Part of the
/// grammar-completeness contract: nothing present in the source XML may be
/// silently dropped.
pub(crate) fn check_attributes(el: &XmlElement, known: &[&str], sess: &mut ParseSession) {
    for name in el.attribute_names() {
        if !known.contains(&name) {
            sess.warn(el.name(), format!("unrecognized attribute '{name}'"));
        }
    }
}
