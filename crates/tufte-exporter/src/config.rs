use serde::Deserialize;

use crate::ids::DEFAULT_ID_LIMIT;
use crate::types::ConfigError;

/// Settings read by every render call.
///
/// Treat a value as read-only for the duration of an export. Per-export
/// tweaks go through [`TufteConfig::scoped`], which hands back a fresh value
/// instead of mutating the shared one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct TufteConfig {
    /// Contents of the `<label>` that toggles a margin note.
    pub symbol_glyph: String,
    /// Exclusive upper bound for generated id suffixes.
    pub id_limit: u64,
    /// Also emit the footnote definitions at the bottom of the document.
    pub footnotes_section: bool,
    /// Enable the macro-call margin note syntax.
    pub expressive_syntax: bool,
    /// Inserted between two adjacent footnote references.
    pub footnote_separator: String,
    /// Link type reserved for margin notes, as in `[[mn:tag][text]]`.
    pub link_prefix: String,
    /// Special block name reserved for margin notes.
    pub block_name: String,
    /// Macro name reserved for margin notes.
    pub macro_name: String,
}

impl Default for TufteConfig {
    fn default() -> Self {
        Self {
            symbol_glyph: "&#8853;".into(),
            id_limit: DEFAULT_ID_LIMIT,
            footnotes_section: false,
            expressive_syntax: true,
            footnote_separator: "<sup>, </sup>".into(),
            link_prefix: "mn".into(),
            block_name: "marginnote".into(),
            macro_name: "marginnote".into(),
        }
    }
}

/// Values that take precedence over a [`TufteConfig`] for one export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub symbol_glyph: Option<String>,
    pub id_limit: Option<u64>,
    pub footnotes_section: Option<bool>,
    pub expressive_syntax: Option<bool>,
}

impl TufteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.id_limit == 0 {
            return Err(ConfigError::ZeroIdLimit);
        }
        for (field, val) in [
            ("link-prefix", &self.link_prefix),
            ("block-name", &self.block_name),
            ("macro-name", &self.macro_name),
        ] {
            if val.trim().is_empty() {
                return Err(ConfigError::EmptyName { field });
            }
        }
        Ok(())
    }

    /// Returns a copy with `overrides` applied; `self` is left untouched.
    pub fn scoped(&self, overrides: &ConfigOverrides) -> TufteConfig {
        let mut conf = self.clone();
        if let Some(glyph) = &overrides.symbol_glyph {
            conf.symbol_glyph = glyph.clone();
        }
        if let Some(limit) = overrides.id_limit {
            conf.id_limit = limit;
        }
        if let Some(section) = overrides.footnotes_section {
            conf.footnotes_section = section;
        }
        if let Some(expressive) = overrides.expressive_syntax {
            conf.expressive_syntax = expressive;
        }
        conf
    }
}
