//! Rendering dispatch: one renderer per node kind and output mode.
//!
//! Inline constructs render to a single string; block constructs render to an
//! ordered list of lines. The two shapes compose: block renderers join inline
//! results, and neither reorders children. All context (permalink resolver,
//! compound lookup, output mode) is read-only during the walk.

pub mod block;
pub mod context;
pub mod escape;
pub mod inline;

pub use block::{render_block, render_blocks, render_description};
pub use context::{
    CompoundLookup, CompoundSummary, MapLookup, MapResolver, NullLookup, NullResolver,
    PermalinkResolver, RenderContext, RenderOptions,
};
pub use inline::{render_children, render_inline};

/// Output flavor a render pass targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Raw text extraction, markup stripped
    Plain,
    #[default]
    Markdown,
    Html,
}
