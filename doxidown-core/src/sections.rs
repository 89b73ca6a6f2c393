//! Regrouping of raw member sections into presentation categories.
//!
//! Doxygen's `sectiondef` kinds lump constructors, destructors, operators and
//! plain functions together. Pages want them apart, so members are
//! reclassified once per compound by a pure function of (member kind, member
//! name, owning-class name).

use crate::model::compound::{CompoundDef, MemberDef, MemberKind};

/// Symbols that may legally follow the `operator` keyword in C++.
/// Includes space (conversion operators, `operator new`) and the double
/// quote (user-defined literals).
const OPERATOR_SYMBOLS: &str = "+-*/%^&|~!=<>,()[] \"";

/// Derived grouping of a member for page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SectionCategory {
    Constructor,
    Destructor,
    Operator,
    Function,
    Variable,
    Typedef,
    Enum,
    Define,
    Property,
    Signal,
    Slot,
    Event,
    Friend,
    Other,
}

impl SectionCategory {
    /// Heading used for this category on a rendered page.
    pub fn heading(&self) -> &'static str {
        match self {
            SectionCategory::Constructor => "Constructors",
            SectionCategory::Destructor => "Destructors",
            SectionCategory::Operator => "Operators",
            SectionCategory::Function => "Functions",
            SectionCategory::Variable => "Variables",
            SectionCategory::Typedef => "Type definitions",
            SectionCategory::Enum => "Enumerations",
            SectionCategory::Define => "Macros",
            SectionCategory::Property => "Properties",
            SectionCategory::Signal => "Signals",
            SectionCategory::Slot => "Slots",
            SectionCategory::Event => "Events",
            SectionCategory::Friend => "Friends",
            SectionCategory::Other => "Members",
        }
    }
}

/// Whether `name` spells an operator: the `operator` keyword followed by one
/// of the fixed symbol characters.
pub fn is_operator_name(name: &str) -> bool {
    match name.strip_prefix("operator") {
        Some(rest) => rest
            .chars()
            .next()
            .is_some_and(|c| OPERATOR_SYMBOLS.contains(c)),
        None => false,
    }
}

/// Classify one member. `class_name` is the owning compound's unqualified
/// name, or `None` when the compound cannot have constructors (namespaces,
/// files, groups).
pub fn categorize_member(member: &MemberDef, class_name: Option<&str>) -> SectionCategory {
    match &member.kind {
        MemberKind::Function => {
            if let Some(class_name) = class_name {
                if member.name == class_name {
                    return SectionCategory::Constructor;
                }
                if let Some(rest) = member.name.strip_prefix('~') {
                    if rest == class_name {
                        return SectionCategory::Destructor;
                    }
                }
            }
            if is_operator_name(&member.name) {
                SectionCategory::Operator
            } else {
                SectionCategory::Function
            }
        }
        MemberKind::Variable => SectionCategory::Variable,
        MemberKind::Typedef => SectionCategory::Typedef,
        MemberKind::Enum => SectionCategory::Enum,
        MemberKind::Define => SectionCategory::Define,
        MemberKind::Property => SectionCategory::Property,
        MemberKind::Signal => SectionCategory::Signal,
        MemberKind::Slot => SectionCategory::Slot,
        MemberKind::Event => SectionCategory::Event,
        MemberKind::Friend => SectionCategory::Friend,
        MemberKind::Other(_) => SectionCategory::Other,
    }
}

/// Members of one derived category, in their original parse order.
#[derive(Debug)]
pub struct CategorizedSection<'a> {
    pub category: SectionCategory,
    pub members: Vec<&'a MemberDef>,
}

/// Regroup a compound's sections by derived category.
///
/// Categories appear in the order their first member was encountered, and
/// members keep their relative order within a category, so output is stable
/// across runs of the same input.
pub fn categorize_sections(compound: &CompoundDef) -> Vec<CategorizedSection<'_>> {
    let class_name = compound
        .kind
        .is_class_like()
        .then(|| compound.unqualified_name());

    let mut out: Vec<CategorizedSection<'_>> = Vec::new();
    for section in &compound.sections {
        for member in &section.members {
            let category = categorize_member(member, class_name);
            match out.iter_mut().find(|s| s.category == category) {
                Some(slot) => slot.members.push(member),
                None => out.push(CategorizedSection {
                    category,
                    members: vec![member],
                }),
            }
        }
    }
    out
}

/// Whether a refid names an anonymous entity (unnamed structs/unions get
/// generated `@N` path components).
pub fn is_anonymous_refid(refid: &str) -> bool {
    refid.contains("_0x")
}

/// Whether a display name belongs to an anonymous entity.
pub fn is_anonymous_name(name: &str) -> bool {
    name.rsplit("::").next().is_some_and(|n| n.starts_with('@'))
}
