//! The three ways to write a margin note, each reduced to one
//! [`AnnotationRequest`]:
//!
//! - a link: `[[mn:tag][text]]` or `[[mn][text]]`
//! - a special block: `#+begin_marginnote` ... `#+end_marginnote`
//! - a macro call: `{{{marginnote(text, more text)}}}`
//!
//! The node structs are host-neutral views; a host fills them from its own
//! tree. Every adapter returns `None` when the node is not a margin note, so
//! the host can fall back to its regular export.

use std::borrow::Cow;

use crate::annotation::AnnotationRequest;
use crate::config::TufteConfig;
use crate::types::{AdapterError, InlineRenderer};

/// Explicit line break, placed between macro arguments.
pub const INLINE_BREAK: &str = "\\\\\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNode<'a> {
    /// Raw link path, including its type: `mn:tag`.
    pub path: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialBlock<'a> {
    pub name: &'a str,
    /// The block's contents, already exported (and captioned) by the host.
    pub body_html: &'a str,
    pub placement_tag: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroCall<'a> {
    pub name: &'a str,
    pub args: Vec<Cow<'a, str>>,
}

// `mn` -> Some(None), `mn:tag` -> Some(Some("tag")), anything else -> None
fn reserved_link_tag<'a>(path: &'a str, prefix: &str) -> Option<Option<&'a str>> {
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        return Some(None);
    }
    let tag = rest.strip_prefix(':')?;
    Some(Some(tag).filter(|t| !t.trim().is_empty()))
}

pub fn from_link<'a, I: InlineRenderer + ?Sized>(
    link: &LinkNode<'a>,
    conf: &TufteConfig,
    inline: &mut I,
) -> Option<Result<AnnotationRequest<'a>, AdapterError>> {
    let tag = reserved_link_tag(link.path, &conf.link_prefix)?;

    let Some(text) = link.description.filter(|d| !d.trim().is_empty()) else {
        return Some(Err(AdapterError::EmptyAnnotation {
            path: link.path.to_owned(),
        }));
    };

    let html = inline.render_inline(text);
    Some(Ok(AnnotationRequest::text(html, tag)))
}

pub fn from_block<'a>(block: &SpecialBlock<'a>, conf: &TufteConfig) -> Option<AnnotationRequest<'a>> {
    if !block.name.eq_ignore_ascii_case(&conf.block_name) {
        return None;
    }
    Some(AnnotationRequest::block(block.body_html, block.placement_tag))
}

/// Only recognized while [`TufteConfig::expressive_syntax`] is on.
pub fn from_macro<'a, I: InlineRenderer + ?Sized>(
    call: &MacroCall<'_>,
    conf: &TufteConfig,
    inline: &mut I,
) -> Option<Result<AnnotationRequest<'a>, AdapterError>> {
    if !conf.expressive_syntax || !call.name.eq_ignore_ascii_case(&conf.macro_name) {
        return None;
    }
    if call.args.is_empty() {
        return Some(Err(AdapterError::WrongArity {
            expected: 1,
            received: 0,
        }));
    }

    let joined = call.args.join(INLINE_BREAK);
    let html = inline.render_inline(&joined);
    Some(Ok(AnnotationRequest::text(html, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationBody;
    use crate::types::PassThrough;
    use pretty_assertions::assert_eq;

    // stand-in for the host: paragraphs around everything, `\\` as <br>
    fn host(text: &str) -> String {
        format!("<p>{}</p>\n", text.replace(INLINE_BREAK, "<br>\n"))
    }

    fn text_of(req: &AnnotationRequest<'_>) -> String {
        match req.body() {
            AnnotationBody::Text(t) | AnnotationBody::Block(t) => t.to_string(),
        }
    }

    #[test]
    fn link_with_tag() {
        let conf = TufteConfig::default();
        let link = LinkNode {
            path: "mn:fig1",
            description: Some("see *this*"),
        };
        let req = from_link(&link, &conf, &mut host).unwrap().unwrap();

        assert_eq!(req.placement_tag(), Some("fig1"));
        assert_eq!(text_of(&req), "see *this*\n");
    }

    #[test]
    fn link_without_tag() {
        let conf = TufteConfig::default();
        for path in ["mn", "mn:", "mn: "] {
            let link = LinkNode {
                path,
                description: Some("x"),
            };
            let req = from_link(&link, &conf, &mut PassThrough).unwrap().unwrap();
            assert_eq!(req.placement_tag(), None);
        }
    }

    #[test]
    fn other_links_fall_through() {
        let conf = TufteConfig::default();
        for path in ["https://example.com", "mnemonic", "file:mn"] {
            let link = LinkNode {
                path,
                description: Some("x"),
            };
            assert!(from_link(&link, &conf, &mut PassThrough).is_none());
        }
    }

    #[test]
    fn link_needs_description() {
        let conf = TufteConfig::default();
        let link = LinkNode {
            path: "mn:a",
            description: None,
        };
        assert_eq!(
            from_link(&link, &conf, &mut PassThrough),
            Some(Err(AdapterError::EmptyAnnotation {
                path: "mn:a".into()
            }))
        );
    }

    #[test]
    fn special_block() {
        let conf = TufteConfig::default();
        let fig = "<figure><img src='x.png'></figure>\n";
        let block = SpecialBlock {
            name: "MarginNote",
            body_html: fig,
            placement_tag: Some("img"),
        };
        let req = from_block(&block, &conf).unwrap();
        assert_eq!(req.body(), &AnnotationBody::Block(fig.into()));
        assert_eq!(req.placement_tag(), Some("img"));

        let aside = SpecialBlock {
            name: "aside",
            ..block
        };
        assert!(from_block(&aside, &conf).is_none());
    }

    #[test]
    fn macro_joins_args() {
        let conf = TufteConfig::default();
        let call = MacroCall {
            name: "marginnote",
            args: vec!["first".into(), " second".into()],
        };
        let req = from_macro(&call, &conf, &mut host).unwrap().unwrap();
        assert_eq!(text_of(&req), "first<br>\n second\n");
        assert_eq!(req.placement_tag(), None);
    }

    #[test]
    fn macro_gated_by_config() {
        let conf = TufteConfig {
            expressive_syntax: false,
            ..Default::default()
        };
        let call = MacroCall {
            name: "marginnote",
            args: vec!["x".into()],
        };
        assert!(from_macro(&call, &conf, &mut PassThrough).is_none());
    }

    #[test]
    fn macro_arity() {
        let conf = TufteConfig::default();
        let call = MacroCall {
            name: "marginnote",
            args: Vec::new(),
        };
        assert_eq!(
            from_macro(&call, &conf, &mut PassThrough),
            Some(Err(AdapterError::WrongArity {
                expected: 1,
                received: 0
            }))
        );

        let other = MacroCall {
            name: "keyword",
            args: Vec::new(),
        };
        assert!(from_macro(&other, &conf, &mut PassThrough).is_none());
    }

    #[test]
    fn converge_on_one_rendering() {
        use crate::annotation::render_annotation_with_id;
        use crate::ids::ToggleId;

        let conf = TufteConfig::default();
        let id = ToggleId::new(None, 5);

        let by_link = from_link(
            &LinkNode {
                path: "mn",
                description: Some("same"),
            },
            &conf,
            &mut host,
        )
        .unwrap()
        .unwrap();
        let by_macro = from_macro(
            &MacroCall {
                name: "marginnote",
                args: vec!["same".into()],
            },
            &conf,
            &mut host,
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            render_annotation_with_id(&by_link, &id, &conf.symbol_glyph),
            render_annotation_with_id(&by_macro, &id, &conf.symbol_glyph)
        );
    }
}
