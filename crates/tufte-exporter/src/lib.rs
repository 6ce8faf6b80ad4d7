//! Tufte-CSS decorations for Org-Mode HTML export
//!
//! This crate does not parse or export documents on its own. A host exporter
//! supplies the baseline HTML through the [`BlockExporter`],
//! [`ReferenceResolver`] and [`InlineRenderer`] traits, and this crate turns
//! the relevant pieces into the toggle-revealed annotations used by
//! [Tufte CSS](https://edwardtufte.github.io/tufte-css/): sidenotes, margin
//! notes and captioned quotes/verses/figures.
//!
//! # Examples
//!
//! Rendering a single margin note with a fixed id source:
//!
//! ```rust
//! use org_tufte_exporter::{render_annotation, AnnotationRequest, CountingIds, TufteConfig};
//!
//! let conf = TufteConfig::default();
//! let mut ids = CountingIds::starting_at(7);
//! let req = AnnotationRequest::text("<p>hello</p>", None);
//!
//! assert_eq!(
//!     render_annotation(&req, &conf, &mut ids),
//!     "<label for='mn-auto.7' class='margin-toggle'>&#8853;</label>\
//!      <input type='checkbox' id='mn-auto.7' class='margin-toggle'>\
//!      <span class='marginnote'>hello</span>"
//! );
//! ```
//!
//! Attaching a citation to an exported quote:
//!
//! ```rust
//! use org_tufte_exporter::with_caption;
//!
//! let out = with_caption(
//!     "<blockquote><p>x</p></blockquote>",
//!     "<footer>Cite</footer>",
//!     "</blockquote>",
//! );
//! assert_eq!(out, "<blockquote><p>x</p><footer>Cite</footer></blockquote>");
//! ```

macro_rules! w {
    ($dst:expr, $($arg:tt)*) => {
        $dst.write_fmt(format_args!($($arg)*)).expect("writing to buffer during export failed")
    };
}

mod annotation;
mod block;
mod config;
mod exporter;
mod footnote;
mod ids;
mod sanitize;
mod syntax;
mod types;

pub use annotation::{render_annotation, render_annotation_with_id, AnnotationBody, AnnotationRequest};
pub use block::{decorate, with_caption, BlockKind};
pub use config::{ConfigOverrides, TufteConfig};
pub use exporter::TufteExporter;
pub use footnote::{
    footnote_input_id, footnote_label_id, render_footnote, render_footnote_section,
    FootnoteDefinition, FootnoteOccurrence,
};
pub use ids::{CountingIds, IdSource, RandomIds, ToggleId, UniqueIds, DEFAULT_ID_LIMIT};
pub use sanitize::{strip_paragraph_tags, AttrEscape};
pub use syntax::{from_block, from_link, from_macro, LinkNode, MacroCall, SpecialBlock, INLINE_BREAK};
pub use types::{
    AdapterError, BlockExporter, ConfigError, InlineRenderer, PassThrough, ReferenceResolver,
};
