//! Dependency specifier parsing
//!
//! A specifier names a library to add, optionally carrying a scope, a
//! sub-path and a version or dist-tag: `@scope/name@tag`, `name@tag`,
//! `name/subpath`. Both the install step and the generation step read
//! the same parse, so the two can never disagree about what was asked
//! for.

/// Fallback dist-tag when the specifier carries no version
pub const DEFAULT_TAG: &str = "latest";

/// A parsed dependency specifier
///
/// Built once per invocation from the raw input string and consumed by
/// both the installer and the collection loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    /// Registry-resolvable package name, scope-aware, tag stripped
    pub package_name: String,
    /// Collection to load generators from: the package name plus any
    /// sub-path that followed it in the raw specifier
    pub collection_name: String,
    /// Version or dist-tag, `"latest"` when absent
    pub tag: String,
}

impl Specifier {
    /// Parse a raw specifier
    ///
    /// Malformed input never fails; absent segments fall back to
    /// defaults. A scoped name keeps its first two `/`-delimited
    /// segments, an unscoped name only its first.
    pub fn parse(raw: &str) -> Self {
        let scoped = raw.starts_with('@');

        // Package-name portion of the specifier; may still carry a tag.
        let head = if scoped {
            raw.split('/').take(2).collect::<Vec<_>>().join("/")
        } else {
            raw.split('/').next().unwrap_or_default().to_string()
        };

        // Strip the tag. The scope's leading `@` is a split boundary of
        // its own, so scoped names keep one more segment.
        let keep = if scoped { 2 } else { 1 };
        let package_name = head.split('@').take(keep).collect::<Vec<_>>().join("@");

        // Whatever followed the package name (a sub-path export) stays
        // part of the collection name.
        let collection_name = format!("{package_name}{}", &raw[head.len()..]);

        let tag = head
            .split('@')
            .nth(keep)
            .filter(|tag| !tag.is_empty())
            .unwrap_or(DEFAULT_TAG)
            .to_string();

        Self {
            package_name,
            collection_name,
            tag,
        }
    }
}
