//! Path patterns and matching.
//!
//! A [`PathPattern`] is the matchable unit of the route registry: either a
//! literal path compared for exact equality, or a parameterized pattern
//! whose named capture groups become route params.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;

use wayfarer_core::{WayfarerError, WayfarerResult};

/// A parameterized path pattern: a regex source with named capture groups
/// plus a normalized flag set.
///
/// The raw source and flags are kept alongside the compiled regex so that
/// patterns can be [joined](crate::join::join) after construction.
#[derive(Debug, Clone)]
pub struct ParamPattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl ParamPattern {
    /// Returns the raw (unanchored-as-written) pattern source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the normalized flag set (deduplicated, sorted).
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Returns the compiled matching regex.
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// A matchable unit: a literal path or a parameterized pattern.
///
/// Literal patterns match iff the path equals the literal exactly
/// (case-sensitive, no trailing-slash normalization). Parameterized
/// patterns match iff the compiled expression spans the whole path;
/// prefix semantics only arise through explicit joining.
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// An exact-match string path.
    Literal(String),
    /// A compiled pattern with named capture groups.
    Parameterized(ParamPattern),
}

impl PathPattern {
    /// Creates a literal pattern.
    pub fn literal(path: impl Into<String>) -> Self {
        Self::Literal(path.into())
    }

    /// Creates a parameterized pattern from a regex source and a flag
    /// string.
    ///
    /// Supported flags are `i`, `m`, `s`, `x` (applied as inline regex
    /// flags) and `u` (accepted for compatibility; the engine is already
    /// Unicode-aware). Flags are deduplicated and sorted, so the flag
    /// string is order-independent.
    ///
    /// # Errors
    ///
    /// Returns [`WayfarerError::ImproperlyConfigured`] if the source does
    /// not compile (including duplicate capture group names) or a flag is
    /// unsupported.
    pub fn parameterized(source: &str, flags: &str) -> WayfarerResult<Self> {
        let flags = normalize_flags(flags)?;
        let regex = compile_anchored(source, &flags)?;
        Ok(Self::Parameterized(ParamPattern {
            source: source.to_string(),
            flags,
            regex,
        }))
    }

    /// Returns `true` for the parameterized variant.
    pub const fn is_parameterized(&self) -> bool {
        matches!(self, Self::Parameterized(_))
    }

    /// Attempts to match the given path against this pattern.
    ///
    /// Returns the captured params on success (empty for literals).
    /// Named optional groups that did not participate in the match are
    /// absent from the map rather than mapped to an empty value.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        match self {
            Self::Literal(literal) => (literal == path).then(HashMap::new),
            Self::Parameterized(pattern) => {
                let captures = pattern.regex.captures(path)?;

                let mut params = HashMap::new();
                for name in pattern.regex.capture_names().flatten() {
                    if let Some(m) = captures.name(name) {
                        params.insert(name.to_string(), m.as_str().to_string());
                    }
                }
                Some(params)
            }
        }
    }
}

/// Validates and normalizes a flag string: deduplicated and sorted so
/// that flag unions are order-independent.
pub(crate) fn normalize_flags(flags: &str) -> WayfarerResult<String> {
    let mut set = BTreeSet::new();
    for flag in flags.chars() {
        match flag {
            'i' | 'm' | 's' | 'u' | 'x' => {
                set.insert(flag);
            }
            other => {
                return Err(WayfarerError::ImproperlyConfigured(format!(
                    "Unsupported pattern flag '{other}'"
                )));
            }
        }
    }
    Ok(set.into_iter().collect())
}

/// Compiles a pattern source for whole-path matching.
///
/// The source is wrapped in `^(?:...)$` so that a match must span the
/// entire path and top-level alternations keep their meaning. Inner
/// anchors written by the pattern author stay valid.
fn compile_anchored(source: &str, flags: &str) -> WayfarerResult<Regex> {
    // `u` has no inline form and no effect here.
    let inline: String = flags.chars().filter(|c| *c != 'u').collect();
    let full = if inline.is_empty() {
        format!("^(?:{source})$")
    } else {
        format!("(?{inline})^(?:{source})$")
    };

    Regex::new(&full)
        .map_err(|e| WayfarerError::ImproperlyConfigured(format!("Invalid pattern regex: {e}")))
}
