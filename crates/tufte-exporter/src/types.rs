use thiserror::Error;

/// Host exporter for whole blocks.
///
/// Produces the baseline HTML for quote/verse/figure/special blocks and
/// footnote definitions, before any Tufte decoration is applied. A single
/// host type may implement this for several node types.
pub trait BlockExporter<N: ?Sized> {
    fn render(&mut self, node: &N) -> String;
}

impl<N: ?Sized, F> BlockExporter<N> for F
where
    F: FnMut(&N) -> String,
{
    fn render(&mut self, node: &N) -> String {
        self(node)
    }
}

/// Host footnote bookkeeping.
///
/// Sequence numbers must be stable across every occurrence of the same
/// footnote, and must agree with whatever numbering the host uses for its
/// own definition list.
pub trait ReferenceResolver {
    /// A footnote reference as it appears in the host tree.
    type Reference: ?Sized;
    /// The structured definition the reference points at.
    type Definition: ?Sized;

    fn number_of(&self, reference: &Self::Reference) -> u32;
    fn is_first_occurrence(&self, reference: &Self::Reference) -> bool;
    fn definition_of(&self, reference: &Self::Reference) -> Option<&Self::Definition>;
}

/// Host renderer for inline markup.
///
/// Annotation text may contain links, nested references or evaluated code,
/// so adapters hand it back to the host before embedding it.
pub trait InlineRenderer {
    fn render_inline(&mut self, text: &str) -> String;
}

impl<F> InlineRenderer for F
where
    F: FnMut(&str) -> String,
{
    fn render_inline(&mut self, text: &str) -> String {
        self(text)
    }
}

/// Treats annotation text as finished HTML.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThrough;

impl InlineRenderer for PassThrough {
    fn render_inline(&mut self, text: &str) -> String {
        text.to_owned()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`id-limit` must be greater than zero")]
    ZeroIdLimit,
    #[error("`{field}` must not be empty")]
    EmptyName { field: &'static str },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AdapterError {
    #[error("expected at least {expected} params, received {received} instead")]
    WrongArity { expected: usize, received: usize },
    #[error("margin note link `{path}` has no description")]
    EmptyAnnotation { path: String },
}
