//! Core data structures for description content.
//!
//! Doxygen's description grammar is mixed content: free text and typed
//! elements interleave in document order inside paragraphs, titles and markup
//! spans. The model keeps that interleaving in a single ordered sequence of
//! [`DocChild`] values; splitting text and elements into separate buckets
//! would destroy rendering order.

/// One ordered entry of a mixed-content container.
#[derive(Debug, Clone, PartialEq)]
pub enum DocChild {
    /// A literal text run, exactly as encountered in the source XML
    Text(String),
    Node(DocNode),
}

/// A universal, semantic representation of a description node.
///
/// The variant set mirrors the element vocabulary of Doxygen's
/// compound/description grammar; [`DocNode::kind`] returns the originating
/// element name, which is also the dispatch tag for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Para(Markup),
    Title(Markup),
    Bold(Markup),
    Emphasis(Markup),
    Underline(Markup),
    Strike(Markup),
    Subscript(Markup),
    Superscript(Markup),
    ComputerOutput(Markup),
    Center(Markup),
    Small(Markup),
    Preformatted(Markup),
    Heading(HeadingNode),
    LineBreak,
    HorizontalRuler,
    Anchor(Anchor),
    Formula(Formula),
    Image(ImageNode),
    ULink(ULink),
    Ref(RefText),
    SimpleSect(SimpleSect),
    ItemizedList(ListNode),
    OrderedList(ListNode),
    VariableList(VariableList),
    ParameterList(ParameterListNode),
    XrefSect(XrefSect),
    Table(TableNode),
    ProgramListing(ProgramListing),
    Verbatim(String),
    BlockQuote(Vec<DocNode>),
}

impl DocNode {
    /// The originating XML element name.
    pub fn kind(&self) -> &'static str {
        match self {
            DocNode::Para(_) => "para",
            DocNode::Title(_) => "title",
            DocNode::Bold(_) => "bold",
            DocNode::Emphasis(_) => "emphasis",
            DocNode::Underline(_) => "underline",
            DocNode::Strike(_) => "strike",
            DocNode::Subscript(_) => "subscript",
            DocNode::Superscript(_) => "superscript",
            DocNode::ComputerOutput(_) => "computeroutput",
            DocNode::Center(_) => "center",
            DocNode::Small(_) => "small",
            DocNode::Preformatted(_) => "preformatted",
            DocNode::Heading(_) => "heading",
            DocNode::LineBreak => "linebreak",
            DocNode::HorizontalRuler => "hruler",
            DocNode::Anchor(_) => "anchor",
            DocNode::Formula(_) => "formula",
            DocNode::Image(_) => "image",
            DocNode::ULink(_) => "ulink",
            DocNode::Ref(_) => "ref",
            DocNode::SimpleSect(_) => "simplesect",
            DocNode::ItemizedList(_) => "itemizedlist",
            DocNode::OrderedList(_) => "orderedlist",
            DocNode::VariableList(_) => "variablelist",
            DocNode::ParameterList(_) => "parameterlist",
            DocNode::XrefSect(_) => "xrefsect",
            DocNode::Table(_) => "table",
            DocNode::ProgramListing(_) => "programlisting",
            DocNode::Verbatim(_) => "verbatim",
            DocNode::BlockQuote(_) => "blockquote",
        }
    }

    /// Ordered mixed-content children, for the variants that carry them.
    pub fn children(&self) -> Option<&[DocChild]> {
        match self {
            DocNode::Para(m)
            | DocNode::Title(m)
            | DocNode::Bold(m)
            | DocNode::Emphasis(m)
            | DocNode::Underline(m)
            | DocNode::Strike(m)
            | DocNode::Subscript(m)
            | DocNode::Superscript(m)
            | DocNode::ComputerOutput(m)
            | DocNode::Center(m)
            | DocNode::Small(m)
            | DocNode::Preformatted(m) => Some(&m.children),
            DocNode::Heading(h) => Some(&h.children),
            DocNode::ULink(u) => Some(&u.children),
            _ => None,
        }
    }
}

/// A mixed-content span: the payload of paragraphs, titles and markup spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Markup {
    pub children: Vec<DocChild>,
}

impl Markup {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A `heading` element with its 1-6 level.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingNode {
    pub level: u8,
    pub children: Vec<DocChild>,
}

/// An `anchor` link target.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub id: String,
}

/// An inline or display `formula`; the source is raw LaTeX.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    pub id: String,
    pub source: String,
}

/// An `image` element; caption is the element's mixed content.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    /// Output class the image targets (`html`, `latex`, ...)
    pub kind: String,
    pub name: String,
    pub caption: Vec<DocChild>,
}

/// An external hyperlink (`ulink`).
#[derive(Debug, Clone, PartialEq)]
pub struct ULink {
    pub url: String,
    pub children: Vec<DocChild>,
}

/// A cross-reference to another documented entity.
///
/// The model only carries the identifier forward; permalink resolution
/// happens at render time through a collaborator and may legitimately fail
/// for external/undocumented targets.
#[derive(Debug, Clone, PartialEq)]
pub struct RefText {
    pub refid: String,
    /// `compound` or `member`
    pub kindref: String,
    pub external: Option<String>,
    /// Display label; never empty for a well-formed ref
    pub text: String,
}

/// A `simplesect` block: a fixed-vocabulary admonition or titled section.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSect {
    pub kind: String,
    /// Only present for `kind="par"`, which carries a user title
    pub title: Option<Markup>,
    pub children: Vec<DocNode>,
}

/// An itemized or ordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub items: Vec<ListItemNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItemNode {
    pub children: Vec<DocNode>,
}

/// A `variablelist`, reconstructed into explicit term/description pairs.
///
/// The grammar has no pairing wrapper; `varlistentry` and `listitem` simply
/// alternate. The builder enforces the pairing (see `parse::doc`).
#[derive(Debug, Clone, PartialEq)]
pub struct VariableList {
    pub pairs: Vec<VariableListPair>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableListPair {
    pub term: Markup,
    pub children: Vec<DocNode>,
}

/// A `parameterlist` (`param`, `retval`, `exception` or `templateparam`).
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterListNode {
    pub kind: String,
    pub items: Vec<ParameterItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterItem {
    pub names: Vec<ParameterName>,
    /// Mandatory in the grammar; its absence fails the parse
    pub description: Vec<DocNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterName {
    pub direction: Option<String>,
    pub content: Markup,
}

/// A cross-referenced section (`\todo`, `\bug`, `\deprecated`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct XrefSect {
    pub id: String,
    pub title: String,
    pub children: Vec<DocNode>,
}

/// A `table` with its declared geometry and nested cell content.
#[derive(Debug, Clone, PartialEq)]
pub struct TableNode {
    pub rows: usize,
    pub cols: usize,
    pub caption: Option<Markup>,
    pub body: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub thead: bool,
    pub children: Vec<DocNode>,
}

/// A syntax-highlighted code block (`programlisting`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramListing {
    pub filename: Option<String>,
    pub lines: Vec<CodeLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeLine {
    pub lineno: Option<u32>,
    pub refid: Option<String>,
    pub highlights: Vec<Highlight>,
}

/// One token run of a code line; `class` names the token category.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub class: String,
    pub children: Vec<DocChild>,
}
