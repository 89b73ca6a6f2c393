//! Structural metadata model: compounds, members, sections and linked text.

use crate::model::doc::{DocNode, ProgramListing, RefText};

/// Visibility of a compound or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protection {
    #[default]
    Public,
    Protected,
    Private,
    Package,
}

impl Protection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "public" => Some(Protection::Public),
            "protected" => Some(Protection::Protected),
            "private" => Some(Protection::Private),
            "package" => Some(Protection::Package),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protection::Public => "public",
            Protection::Protected => "protected",
            Protection::Private => "private",
            Protection::Package => "package",
        }
    }
}

/// Virtualness of a member or base-class relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Virtualness {
    #[default]
    NonVirtual,
    Virtual,
    PureVirtual,
}

impl Virtualness {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "non-virtual" => Some(Virtualness::NonVirtual),
            "virtual" => Some(Virtualness::Virtual),
            "pure-virtual" => Some(Virtualness::PureVirtual),
            _ => None,
        }
    }
}

/// Kind of a top-level documented entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompoundKind {
    Class,
    Struct,
    Union,
    Interface,
    Concept,
    Namespace,
    File,
    Dir,
    Group,
    Page,
    Exception,
    /// Kinds this converter has no dedicated handling for; kept verbatim
    Other(String),
}

impl CompoundKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "class" => CompoundKind::Class,
            "struct" => CompoundKind::Struct,
            "union" => CompoundKind::Union,
            "interface" => CompoundKind::Interface,
            "concept" => CompoundKind::Concept,
            "namespace" => CompoundKind::Namespace,
            "file" => CompoundKind::File,
            "dir" => CompoundKind::Dir,
            "group" => CompoundKind::Group,
            "page" => CompoundKind::Page,
            "exception" => CompoundKind::Exception,
            other => CompoundKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompoundKind::Class => "class",
            CompoundKind::Struct => "struct",
            CompoundKind::Union => "union",
            CompoundKind::Interface => "interface",
            CompoundKind::Concept => "concept",
            CompoundKind::Namespace => "namespace",
            CompoundKind::File => "file",
            CompoundKind::Dir => "dir",
            CompoundKind::Group => "group",
            CompoundKind::Page => "page",
            CompoundKind::Exception => "exception",
            CompoundKind::Other(s) => s,
        }
    }

    /// Whether members of this compound can be constructors/destructors.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            CompoundKind::Class
                | CompoundKind::Struct
                | CompoundKind::Union
                | CompoundKind::Interface
                | CompoundKind::Exception
        )
    }
}

/// Kind of a documented member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Define,
    Function,
    Variable,
    Typedef,
    Enum,
    Signal,
    Slot,
    Friend,
    Property,
    Event,
    Other(String),
}

impl MemberKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "define" => MemberKind::Define,
            "function" => MemberKind::Function,
            "variable" => MemberKind::Variable,
            "typedef" => MemberKind::Typedef,
            "enum" => MemberKind::Enum,
            "signal" => MemberKind::Signal,
            "slot" => MemberKind::Slot,
            "friend" => MemberKind::Friend,
            "property" => MemberKind::Property,
            "event" => MemberKind::Event,
            other => MemberKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MemberKind::Define => "define",
            MemberKind::Function => "function",
            MemberKind::Variable => "variable",
            MemberKind::Typedef => "typedef",
            MemberKind::Enum => "enum",
            MemberKind::Signal => "signal",
            MemberKind::Slot => "slot",
            MemberKind::Friend => "friend",
            MemberKind::Property => "property",
            MemberKind::Event => "event",
            MemberKind::Other(s) => s,
        }
    }
}

/// A brief, detailed or in-body description block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Description {
    pub title: String,
    pub children: Vec<DocNode>,
}

impl Description {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.children.is_empty()
    }
}

/// One entry of a linked-text sequence: a type or initializer expression
/// interleaving plain text with hyperlinked identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkedTextChild {
    Text(String),
    Ref(RefText),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkedText {
    pub children: Vec<LinkedTextChild>,
}

impl LinkedText {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The expression with link markup stripped.
    pub fn as_plain_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                LinkedTextChild::Text(text) => out.push_str(text),
                LinkedTextChild::Ref(r) => out.push_str(&r.text),
            }
        }
        out
    }
}

/// A base/derived compound relation. The refid is absent for external bases.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundRef {
    pub refid: Option<String>,
    pub prot: Protection,
    pub virt: Virtualness,
    pub text: String,
}

/// An inner-compound listing entry (`innerclass`, `innernamespace`, ...).
/// These drive the second-pass hierarchy reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerRef {
    pub refid: String,
    pub prot: Option<Protection>,
    pub name: String,
}

/// An `#include` relation of a file compound.
#[derive(Debug, Clone, PartialEq)]
pub struct Include {
    pub refid: Option<String>,
    pub local: bool,
    pub text: String,
}

/// A `references`/`referencedby` entry of a member.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencedItem {
    pub refid: String,
    pub compoundref: Option<String>,
    pub startline: Option<u32>,
    pub endline: Option<u32>,
    pub text: String,
}

/// Source location of a definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub file: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub bodyfile: Option<String>,
    pub bodystart: Option<u32>,
    pub bodyend: Option<u32>,
}

/// A function/template parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Param {
    pub attributes: Option<String>,
    pub ty: Option<LinkedText>,
    pub declname: Option<String>,
    pub defname: Option<String>,
    pub array: Option<String>,
    pub defval: Option<LinkedText>,
    pub typeconstraint: Option<LinkedText>,
    pub briefdescription: Option<Description>,
}

impl Param {
    /// Declared name, falling back to the definition name.
    pub fn display_name(&self) -> Option<&str> {
        self.declname.as_deref().or(self.defname.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateParamList {
    pub params: Vec<Param>,
}

/// One enumerator of an enum member.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub id: String,
    pub name: String,
    pub prot: Protection,
    pub initializer: Option<LinkedText>,
    pub briefdescription: Option<Description>,
    pub detaileddescription: Option<Description>,
}

/// A member re-implementation relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reimplement {
    pub refid: String,
    pub text: String,
}

/// A fully parsed `memberdef`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDef {
    pub kind: MemberKind,
    pub id: String,
    pub name: String,
    pub qualified_name: Option<String>,
    pub prot: Protection,
    pub is_static: bool,
    pub is_const: bool,
    pub is_explicit: bool,
    pub is_inline: bool,
    pub is_mutable: bool,
    pub virt: Virtualness,
    pub ty: Option<LinkedText>,
    pub definition: Option<String>,
    pub argsstring: Option<String>,
    pub template_params: Option<TemplateParamList>,
    pub params: Vec<Param>,
    pub enum_values: Vec<EnumValue>,
    pub initializer: Option<LinkedText>,
    pub reimplements: Vec<Reimplement>,
    pub reimplemented_by: Vec<Reimplement>,
    pub briefdescription: Option<Description>,
    pub detaileddescription: Option<Description>,
    pub inbodydescription: Option<Description>,
    pub location: Location,
    pub references: Vec<ReferencedItem>,
    pub referenced_by: Vec<ReferencedItem>,
}

/// A member grouping within a compound (`sectiondef`).
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDef {
    pub kind: String,
    pub header: Option<String>,
    pub description: Option<Description>,
    pub members: Vec<MemberDef>,
}

/// A fully parsed `compounddef`: one documentation tree root.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundDef {
    pub id: String,
    pub kind: CompoundKind,
    pub language: Option<String>,
    pub prot: Option<Protection>,
    pub name: String,
    pub title: Option<String>,
    pub base_refs: Vec<CompoundRef>,
    pub derived_refs: Vec<CompoundRef>,
    pub includes: Vec<Include>,
    pub included_by: Vec<Include>,
    pub inner_dirs: Vec<InnerRef>,
    pub inner_files: Vec<InnerRef>,
    pub inner_classes: Vec<InnerRef>,
    pub inner_concepts: Vec<InnerRef>,
    pub inner_namespaces: Vec<InnerRef>,
    pub inner_pages: Vec<InnerRef>,
    pub inner_groups: Vec<InnerRef>,
    pub template_params: Option<TemplateParamList>,
    pub sections: Vec<SectionDef>,
    pub briefdescription: Option<Description>,
    pub detaileddescription: Option<Description>,
    pub listing: Option<ProgramListing>,
    pub location: Option<Location>,
}

impl CompoundDef {
    /// All inner-compound references, in listing order.
    pub fn inner_refs(&self) -> impl Iterator<Item = &InnerRef> {
        self.inner_dirs
            .iter()
            .chain(&self.inner_files)
            .chain(&self.inner_classes)
            .chain(&self.inner_concepts)
            .chain(&self.inner_namespaces)
            .chain(&self.inner_pages)
            .chain(&self.inner_groups)
    }

    /// Unqualified name (last `::` component).
    pub fn unqualified_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}
