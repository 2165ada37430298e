//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A type-safe wrapper for config field paths.
///
/// Used with `#[derive(Config)]` to generate compile-time checked
/// field path accessors.
///
/// # Example
///
/// ```ignore
/// #[derive(Config)]
/// #[config(section = "site.settings")]
/// pub struct SeoSettings {
///     pub twitter_handle: String,
/// }
///
/// // Generated:
/// impl SeoSettings {
///     pub const FIELDS: SeoSettingsFields = ...;
/// }
///
/// // Usage:
/// diag.error(SeoSettings::FIELDS.twitter_handle, "invalid handle");
/// ```
///
/// Paths that depend on runtime data (the index of a `[[page]]` entry) are
/// built with [`FieldPath::indexed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    /// Path for an array-of-tables entry, e.g. `page[2].seo.canonical_url`.
    ///
    /// Diagnostics are collected once per config load, so the leaked string
    /// is bounded by the size of the config file.
    pub fn indexed(table: &str, index: usize, rest: &str) -> Self {
        let path = if rest.is_empty() {
            format!("{table}[{index}]")
        } else {
            format!("{table}[{index}].{rest}")
        };
        Self(Box::leak(path.into_boxed_str()))
    }

    /// Insert an array index after the first segment:
    /// `site.settings.twitter_handle` becomes `site[1].settings.twitter_handle`.
    pub fn at_index(self, index: usize) -> Self {
        match self.0.split_once('.') {
            Some((table, rest)) => Self::indexed(table, index, rest),
            None => Self::indexed(self.0, index, ""),
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}
