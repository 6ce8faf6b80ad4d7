//! Per-document driver tying the renderers to the host collaborators.

use tracing::debug;

use crate::annotation::render_annotation;
use crate::block::{decorate, BlockKind};
use crate::config::TufteConfig;
use crate::footnote::{render_footnote, render_footnote_section, FootnoteDefinition, FootnoteOccurrence};
use crate::ids::{IdSource, RandomIds};
use crate::sanitize::strip_paragraph_tags;
use crate::syntax::{from_block, from_link, from_macro, LinkNode, MacroCall, SpecialBlock};
use crate::types::{AdapterError, BlockExporter, ConfigError, InlineRenderer, ReferenceResolver};

/// Tufte export state for a single document.
///
/// Create one per render pass; it owns the id source and collects footnote
/// definitions for [`TufteExporter::finish`].
pub struct TufteExporter<'c, R, B, I, S = RandomIds> {
    conf: &'c TufteConfig,
    resolver: R,
    blocks: B,
    inline: I,
    ids: S,
    definitions: Vec<FootnoteDefinition>,
}

impl<'c, R, B, I> TufteExporter<'c, R, B, I, RandomIds>
where
    R: ReferenceResolver,
    I: InlineRenderer,
{
    pub fn new(conf: &'c TufteConfig, resolver: R, blocks: B, inline: I) -> Result<Self, ConfigError> {
        Self::with_ids(conf, resolver, blocks, inline, RandomIds::new())
    }
}

impl<'c, R, B, I, S> TufteExporter<'c, R, B, I, S>
where
    R: ReferenceResolver,
    I: InlineRenderer,
    S: IdSource,
{
    pub fn with_ids(
        conf: &'c TufteConfig,
        resolver: R,
        blocks: B,
        inline: I,
        ids: S,
    ) -> Result<Self, ConfigError> {
        conf.validate()?;
        Ok(Self {
            conf,
            resolver,
            blocks,
            inline,
            ids,
            definitions: Vec::new(),
        })
    }

    pub fn config(&self) -> &TufteConfig {
        self.conf
    }

    /// `[[mn:tag][text]]`; `None` for any other link.
    pub fn margin_note_link(&mut self, link: &LinkNode<'_>) -> Option<Result<String, AdapterError>> {
        let req = from_link(link, self.conf, &mut self.inline)?;
        Some(req.map(|req| render_annotation(&req, self.conf, &mut self.ids)))
    }

    /// `#+begin_marginnote`; `None` for any other special block.
    pub fn margin_note_block(&mut self, block: &SpecialBlock<'_>) -> Option<String> {
        let req = from_block(block, self.conf)?;
        Some(render_annotation(&req, self.conf, &mut self.ids))
    }

    /// `{{{marginnote(...)}}}`; `None` for other macros, or when the
    /// expressive syntax is switched off.
    pub fn margin_note_macro(&mut self, call: &MacroCall<'_>) -> Option<Result<String, AdapterError>> {
        let req = from_macro(call, self.conf, &mut self.inline)?;
        Some(req.map(|req| render_annotation(&req, self.conf, &mut self.ids)))
    }

    /// Renders a footnote reference as a sidenote.
    ///
    /// `preceded_by_footnote` is true when the previous sibling in the host
    /// tree was itself a footnote reference.
    pub fn footnote_reference(&mut self, reference: &R::Reference, preceded_by_footnote: bool) -> String
    where
        B: BlockExporter<R::Definition>,
    {
        let number = self.resolver.number_of(reference);
        let first_reference = self.resolver.is_first_occurrence(reference);
        let definition_html = match self.resolver.definition_of(reference) {
            Some(def) => self.blocks.render(def),
            None => {
                debug!(number, "footnote has no definition");
                String::new()
            }
        };
        let nonce = self.ids.next_id(self.conf.id_limit).to_string();

        if first_reference && self.conf.footnotes_section {
            self.definitions.push(FootnoteDefinition {
                number,
                html: definition_html.clone(),
            });
        }

        render_footnote(
            &FootnoteOccurrence {
                number,
                first_reference,
                nonce: &nonce,
                definition_html: &definition_html,
            },
            preceded_by_footnote,
            self.conf,
        )
    }

    pub fn quote_block<N: ?Sized>(&mut self, node: &N, caption: Option<&str>) -> String
    where
        B: BlockExporter<N>,
    {
        self.captioned(BlockKind::Quote, node, caption)
    }

    pub fn verse_block<N: ?Sized>(&mut self, node: &N, caption: Option<&str>) -> String
    where
        B: BlockExporter<N>,
    {
        self.captioned(BlockKind::Verse, node, caption)
    }

    pub fn figure_block<N: ?Sized>(&mut self, node: &N, caption: Option<&str>) -> String
    where
        B: BlockExporter<N>,
    {
        self.captioned(BlockKind::Figure, node, caption)
    }

    fn captioned<N: ?Sized>(&mut self, kind: BlockKind, node: &N, caption: Option<&str>) -> String
    where
        B: BlockExporter<N>,
    {
        let exported = self.blocks.render(node);
        let caption_html = match caption.filter(|c| !c.trim().is_empty()) {
            Some(text) => {
                let html = self.inline.render_inline(text);
                strip_paragraph_tags(&html).trim().to_owned()
            }
            None => String::new(),
        };
        decorate(kind, &exported, &caption_html)
    }

    /// Ends the document: the bottom footnote section when enabled, otherwise
    /// nothing.
    pub fn finish(self) -> String {
        if self.conf.footnotes_section {
            render_footnote_section(&self.definitions)
        } else {
            String::new()
        }
    }
}
