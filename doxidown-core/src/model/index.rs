//! Model for `index.xml`, the listing of every compound in the corpus.

use crate::model::compound::CompoundKind;

/// The parsed `index.xml` root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoxygenIndex {
    pub version: String,
    pub compounds: Vec<IndexCompound>,
}

/// One `compound` entry of the index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexCompound {
    pub refid: String,
    pub kind: CompoundKind,
    pub name: String,
    pub members: Vec<IndexMember>,
}

/// One `member` entry of an index compound.
///
/// The `kind` starts out provisional (possibly empty) and is overwritten for
/// every member by the back-fill pass, which copies it from the authoritative
/// `memberdef` record sharing the same refid. See `parse::index`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMember {
    pub refid: String,
    pub kind: String,
    pub name: String,
}
