//! Margin notes: the label + checkbox + content triad.

use std::borrow::Cow;
use std::fmt::Write;

use tracing::trace;

use crate::config::TufteConfig;
use crate::ids::{IdSource, ToggleId};
use crate::sanitize::{strip_paragraph_tags, AttrEscape};

/// What a margin note shows once revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationBody<'a> {
    /// Inline HTML, wrapped in `<span class='marginnote'>`.
    Text(Cow<'a, str>),
    /// A finished block element (e.g. a `<figure>`), used verbatim.
    Block(Cow<'a, str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRequest<'a> {
    body: AnnotationBody<'a>,
    placement_tag: Option<&'a str>,
}

impl<'a> AnnotationRequest<'a> {
    /// Inline annotation. Paragraph wrappers are stripped here, so a
    /// request never carries block-level tags into a `<span>`.
    pub fn text(raw: impl Into<Cow<'a, str>>, placement_tag: Option<&'a str>) -> Self {
        let body = match raw.into() {
            Cow::Borrowed(s) => strip_paragraph_tags(s),
            Cow::Owned(s) => match strip_paragraph_tags(&s) {
                Cow::Owned(stripped) => Cow::Owned(stripped),
                Cow::Borrowed(_) => Cow::Owned(s),
            },
        };
        Self {
            body: AnnotationBody::Text(body),
            placement_tag,
        }
    }

    /// Pre-rendered block content.
    pub fn block(html: impl Into<Cow<'a, str>>, placement_tag: Option<&'a str>) -> Self {
        Self {
            body: AnnotationBody::Block(html.into()),
            placement_tag,
        }
    }

    pub fn body(&self) -> &AnnotationBody<'a> {
        &self.body
    }

    pub fn placement_tag(&self) -> Option<&'a str> {
        self.placement_tag
    }
}

/// Renders `request` with a freshly drawn [`ToggleId`].
///
/// The result is three sibling elements with no wrapper; the caller places
/// them wherever the note should anchor.
pub fn render_annotation<S: IdSource + ?Sized>(
    request: &AnnotationRequest<'_>,
    conf: &TufteConfig,
    ids: &mut S,
) -> String {
    let id = ToggleId::new(request.placement_tag(), ids.next_id(conf.id_limit));
    trace!(%id, "rendering margin note");
    render_annotation_with_id(request, &id, &conf.symbol_glyph)
}

pub fn render_annotation_with_id(
    request: &AnnotationRequest<'_>,
    id: &ToggleId,
    glyph: &str,
) -> String {
    let id = AttrEscape(id.as_str());
    let mut out = String::new();

    w!(
        out,
        "<label for='{id}' class='margin-toggle'>{glyph}</label>\
         <input type='checkbox' id='{id}' class='margin-toggle'>"
    );
    match &request.body {
        AnnotationBody::Text(text) => w!(out, "<span class='marginnote'>{text}</span>"),
        AnnotationBody::Block(html) => out.push_str(html),
    }
    out
}
