use std::borrow::Cow;

use phf::phf_map;
use tracing::warn;

/// Block types that take a Tufte caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `<footer>` citation inside the `<blockquote>`.
    Quote,
    /// Epigraph-style verse: wrapped in a blockquote, citation as `<footer>`.
    Verse,
    /// `<figcaption>` inside the `<figure>`.
    Figure,
}

static BLOCK_KINDS: phf::Map<&'static str, BlockKind> = phf_map! {
    "quote" => BlockKind::Quote,
    "verse" => BlockKind::Verse,
    "figure" => BlockKind::Figure,
};

impl BlockKind {
    /// Looks up a block by its (case-insensitive) name, e.g. `begin_quote`'s `quote`.
    pub fn from_name(name: &str) -> Option<BlockKind> {
        BLOCK_KINDS.get(name.to_ascii_lowercase().as_str()).copied()
    }

    pub fn closing_tag(self) -> &'static str {
        match self {
            BlockKind::Quote | BlockKind::Verse => "</blockquote>",
            BlockKind::Figure => "</figure>",
        }
    }

    /// Wraps caption markup in the element this block expects.
    pub fn caption_element(self, caption_html: &str) -> String {
        match self {
            BlockKind::Quote | BlockKind::Verse => format!("<footer>{caption_html}</footer>"),
            BlockKind::Figure => format!("<figcaption>{caption_html}</figcaption>"),
        }
    }
}

/// Splices `caption_html` in front of the last `closing_tag` of `html`.
///
/// The last occurrence is used so blocks nesting their own tag name keep the
/// caption on the outermost element. An empty caption returns `html` as is.
/// If `closing_tag` is missing (or empty) the caption is dropped rather than
/// appended somewhere that would break the markup.
pub fn with_caption<'a>(html: &'a str, caption_html: &str, closing_tag: &str) -> Cow<'a, str> {
    if caption_html.is_empty() {
        return Cow::Borrowed(html);
    }

    match html.rfind(closing_tag).filter(|_| !closing_tag.is_empty()) {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + caption_html.len());
            out.push_str(&html[..pos]);
            out.push_str(caption_html);
            out.push_str(&html[pos..]);
            Cow::Owned(out)
        }
        None => {
            warn!(closing_tag, "closing tag not found, dropping caption");
            Cow::Borrowed(html)
        }
    }
}

/// Decorates the host's HTML for a `kind` block.
///
/// `caption_html` is the bare caption; it is wrapped in the element `kind`
/// calls for. An empty caption adds no element at all.
pub fn decorate(kind: BlockKind, exported: &str, caption_html: &str) -> String {
    let caption = if caption_html.is_empty() {
        String::new()
    } else {
        kind.caption_element(caption_html)
    };

    match kind {
        BlockKind::Quote | BlockKind::Figure => {
            with_caption(exported, &caption, kind.closing_tag()).into_owned()
        }
        BlockKind::Verse => {
            let wrapped = format!("<div class='verse'><blockquote>\n{exported}</blockquote></div>\n");
            with_caption(&wrapped, &caption, kind.closing_tag()).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn footer_before_close() {
        assert_eq!(
            with_caption(
                "<blockquote><p>x</p></blockquote>",
                "<footer>Cite</footer>",
                "</blockquote>"
            ),
            "<blockquote><p>x</p><footer>Cite</footer></blockquote>"
        );
    }

    proptest! {
        #[test]
        fn prop_empty_caption_is_identity(
            html in prop_oneof![
                ".{0,48}",
                "[a-z ]{0,8}".prop_map(|s| format!("<blockquote>{s}</blockquote>")),
            ],
            pat in prop_oneof![Just(String::new()), Just("</blockquote>".to_string()), "</?[a-z]{0,8}>?"],
        ) {
            let out = with_caption(&html, "", &pat);
            prop_assert!(matches!(out, Cow::Borrowed(_)));
            prop_assert_eq!(&*out, html.as_str());
        }
    }

    #[test]
    fn last_occurrence() {
        let html = "<blockquote><blockquote>inner</blockquote></blockquote>\n";
        assert_eq!(
            with_caption(html, "<footer>c</footer>", "</blockquote>"),
            "<blockquote><blockquote>inner</blockquote><footer>c</footer></blockquote>\n"
        );
    }

    #[test]
    fn missing_tag_drops_caption() {
        let html = "<div>x</div>";
        assert_eq!(with_caption(html, "<footer>c</footer>", "</blockquote>"), html);
        assert_eq!(with_caption(html, "<footer>c</footer>", ""), html);
    }

    #[test]
    fn kinds_by_name() {
        assert_eq!(BlockKind::from_name("QUOTE"), Some(BlockKind::Quote));
        assert_eq!(BlockKind::from_name("verse"), Some(BlockKind::Verse));
        assert_eq!(BlockKind::from_name("figure"), Some(BlockKind::Figure));
        assert_eq!(BlockKind::from_name("center"), None);
    }

    #[test]
    fn decorate_kinds() {
        assert_eq!(
            decorate(BlockKind::Quote, "<blockquote>\n<p>q</p>\n</blockquote>\n", "A"),
            "<blockquote>\n<p>q</p>\n<footer>A</footer></blockquote>\n"
        );
        assert_eq!(
            decorate(BlockKind::Figure, "<figure><img src='a.png'></figure>", "Fig"),
            "<figure><img src='a.png'><figcaption>Fig</figcaption></figure>"
        );
        assert_eq!(
            decorate(BlockKind::Verse, "<p class='verse'>line</p>\n", "Poet"),
            "<div class='verse'><blockquote>\n<p class='verse'>line</p>\n<footer>Poet</footer></blockquote></div>\n"
        );
        assert_eq!(
            decorate(BlockKind::Quote, "<blockquote>q</blockquote>", ""),
            "<blockquote>q</blockquote>"
        );
    }
}
