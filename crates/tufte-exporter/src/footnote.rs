//! Footnotes rendered as numbered sidenotes.
//!
//! The first reference to footnote `N` is labelled `fnr.N`. That anchor is
//! shared with the definition list ([`render_footnote_section`], or the host's
//! own), whose back-links point at `#fnr.N`. Repeated references get a nonce
//! appended so every id in the document stays distinct.

use std::fmt::Write;

use tracing::debug;

use crate::config::TufteConfig;
use crate::sanitize::{strip_paragraph_tags, AttrEscape};

/// One reference to a footnote, as seen at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteOccurrence<'a> {
    /// Stable across every reference to the same footnote.
    pub number: u32,
    pub first_reference: bool,
    pub nonce: &'a str,
    pub definition_html: &'a str,
}

/// A definition queued for the bottom footnote section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteDefinition {
    pub number: u32,
    pub html: String,
}

pub fn footnote_label_id(number: u32, first_reference: bool, nonce: &str) -> String {
    if first_reference {
        format!("fnr.{number}")
    } else {
        format!("fnr.{number}.{nonce}")
    }
}

pub fn footnote_input_id(number: u32, nonce: &str) -> String {
    format!("fnr-in.{number}.{nonce}")
}

/// Renders a footnote reference as a sidenote.
///
/// `preceded_by_footnote` prepends the configured separator so that
/// consecutive markers stay visually apart.
pub fn render_footnote(
    occ: &FootnoteOccurrence<'_>,
    preceded_by_footnote: bool,
    conf: &TufteConfig,
) -> String {
    let label_id = footnote_label_id(occ.number, occ.first_reference, occ.nonce);
    let input_id = footnote_input_id(occ.number, occ.nonce);
    let definition = strip_paragraph_tags(occ.definition_html);
    let number = occ.number;

    debug!(%label_id, first = occ.first_reference, "rendering sidenote");

    let label_id = AttrEscape(label_id);
    let input_id = AttrEscape(input_id);
    let mut out = String::new();
    if preceded_by_footnote {
        out.push_str(&conf.footnote_separator);
    }
    w!(
        out,
        "<label id='{label_id}' for='{input_id}' class='margin-toggle sidenote-number'>\
         <sup class='numeral'>{number}</sup></label>\
         <input type='checkbox' id='{input_id}' class='margin-toggle'>\
         <span class='sidenote'><sup class='numeral'>{number}</sup>{}</span>",
        definition.trim()
    );
    out
}

/// Definition list for the bottom of the document.
///
/// Definitions are listed once each, in number order. Renders nothing when
/// there are no definitions.
pub fn render_footnote_section(defs: &[FootnoteDefinition]) -> String {
    let mut defs: Vec<&FootnoteDefinition> = defs.iter().collect();
    defs.sort_by_key(|def| def.number);
    defs.dedup_by_key(|def| def.number);

    let mut out = String::new();
    if defs.is_empty() {
        return out;
    }

    w!(
        out,
        r#"<div id="footnotes">
<h2 class="footnotes">Footnotes</h2>
<div id="text-footnotes">
"#
    );
    for def in defs {
        w!(
            out,
            r##"<div class="footdef"><sup><a id="fn.{0}" href="#fnr.{0}" role="doc-backlink">{0}</a></sup> <div class="footpara">{1}</div></div>
"##,
            def.number,
            strip_paragraph_tags(&def.html).trim()
        );
    }
    w!(out, "</div>\n</div>\n");
    out
}
