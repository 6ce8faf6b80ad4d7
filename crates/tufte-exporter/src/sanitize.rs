use core::fmt;
use std::borrow::Cow;

use lazy_static::lazy_static;
use memchr::memchr3_iter;
use regex::Regex;

lazy_static! {
    // <p>, </p>, <p class="x">, <P/> ... but not <pre> or <param>
    static ref PARAGRAPH_TAG_RE: Regex = Regex::new(r"(?i)</?p(?:\s[^>]*)?/?>").unwrap();
}

/// Removes every opening and closing paragraph tag, keeping everything else.
///
/// Labels and spans cannot hold block-level paragraphs, but the generic
/// exporter wraps almost everything in them. Only simple open/close pairs are
/// understood: malformed or nested paragraph markup is not repaired.
pub fn strip_paragraph_tags(html: &str) -> Cow<'_, str> {
    PARAGRAPH_TAG_RE.replace_all(html, "")
}

/// Escapes a value destined for a single-quoted HTML attribute.
pub struct AttrEscape<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> fmt::Display for AttrEscape<S> {
    // `<` and `&` could start markup or an entity, `'` would close the attribute
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0.as_ref();
        let mut prev_pos = 0;

        for ret in memchr3_iter(b'<', b'&', b'\'', v.as_bytes()) {
            f.write_str(&v[prev_pos..ret])?;
            f.write_str(match v.as_bytes()[ret] {
                b'<' => "&lt;",
                b'&' => "&amp;",
                b'\'' => "&#39;",
                _ => unreachable!(),
            })?;
            prev_pos = ret + 1;
        }

        f.write_str(&v[prev_pos..])
    }
}
