//! Doxygen XML to Markdown/MDX conversion
//!
//!     This crate turns a directory of Doxygen-generated XML (index.xml plus
//!     one <refid>.xml per compound) into rendered documentation pages for a
//!     static-site generator, with an HTML-flavored variant for legacy
//!     pipelines.
//!
//!     This is a pure lib: it powers doxidown-cli but is shell agnostic, that
//!     is no code should be written that supposes a shell environment, be it
//!     to std print, env vars etc. File reading and page writing belong to
//!     the caller; the crate consumes XML text and produces page strings.
//!
//! Architecture
//!
//!     The pipeline is split into a typed XML access layer, a semantic node
//!     model, per-production tree builders, and a dispatch-by-kind renderer:
//!     .
//!     ├── xml.rs                  # Typed accessors over roxmltree nodes
//!     ├── error.rs                # The fatal error type; soft diagnostics live on ParseSession
//!     ├── model
//!     │   ├── doc.rs              # Mixed-content description nodes
//!     │   ├── compound.rs         # Compounds, members, sections, linked text
//!     │   └── index.rs            # index.xml entries
//!     ├── parse
//!     │   ├── doc.rs              # Description-grammar builders
//!     │   ├── compound.rs         # compounddef/memberdef builders
//!     │   ├── index.rs            # index.xml + back-fill and hierarchy passes
//!     │   └── doxyfile.rs         # Doxyfile.xml options
//!     ├── sections.rs             # Member reclassification for page layout
//!     ├── render
//!     │   ├── escape.rs           # Leaf-level, mode-specific escaping
//!     │   ├── context.rs          # Resolver/lookup traits and the render workspace
//!     │   ├── inline.rs           # String-producing renderers
//!     │   └── block.rs            # Line-list-producing renderers
//!     └── page.rs                 # Per-compound page assembly
//!
//! Core Algorithms
//!
//!     The hard part is order-preserving mixed-content walking: paragraphs
//!     interleave free text and typed elements, and that interleaving must
//!     survive parsing and rendering verbatim. Builders therefore consume a
//!     single ordered child sequence (see xml::XmlElement::ordered_children)
//!     and renderers never reorder or deduplicate children.
//!
//!     Parsing is strictly sequential in index order. Two corpus-wide passes
//!     run after the last file: member-kind back-fill (index member kinds are
//!     copied from their memberdefs, exactly once) and hierarchy linking
//!     (parents reconstructed from inner-compound reference lists, which may
//!     point forward in parse order).

pub mod error;
pub mod model;
pub mod page;
pub mod parse;
pub mod render;
pub mod sections;
pub mod xml;

pub use error::ConvertError;
pub use page::render_compound_page;
pub use parse::{Diagnostic, ParseSession};
pub use render::{
    CompoundLookup, CompoundSummary, MapLookup, MapResolver, OutputMode, PermalinkResolver,
    RenderContext, RenderOptions,
};
