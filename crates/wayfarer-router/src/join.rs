//! Combining a parent path pattern with a child path pattern.
//!
//! Joining is how prefix semantics arise in the route registry: a layout
//! group joins its base pattern with each child pattern before
//! registration, so the registry itself only ever holds whole-path
//! patterns.

use std::collections::BTreeSet;

use wayfarer_core::WayfarerResult;

use crate::pattern::PathPattern;

/// Joins a parent pattern and a child pattern into one composite pattern.
///
/// Two literals concatenate into a literal. If either side is
/// parameterized, the result is parameterized:
///
/// - a trailing unescaped end-of-input anchor on the parent source is
///   stripped, so a pattern built to match a full path alone stays
///   composable as a prefix;
/// - literal sides are spliced into the combined source verbatim — literal
///   segments must therefore be free of regex metacharacters;
/// - the two flag sets are unioned (deduplicated, order-independent).
///
/// Joining is associative in effect: `join(join(a, b), c)` and
/// `join(a, join(b, c))` accept the same paths and capture the same
/// named groups.
///
/// # Errors
///
/// Returns [`WayfarerError::ImproperlyConfigured`](wayfarer_core::WayfarerError::ImproperlyConfigured)
/// if the combined source does not compile, including when the two sides
/// declare a capture group with the same name.
pub fn join(parent: &PathPattern, child: &PathPattern) -> WayfarerResult<PathPattern> {
    match (parent, child) {
        (PathPattern::Literal(a), PathPattern::Literal(b)) => {
            Ok(PathPattern::literal(format!("{a}{b}")))
        }
        _ => {
            let parent_source = match parent {
                PathPattern::Literal(a) => a.as_str(),
                PathPattern::Parameterized(p) => strip_end_anchor(p.source()),
            };
            let child_source = match child {
                PathPattern::Literal(b) => b.as_str(),
                PathPattern::Parameterized(p) => p.source(),
            };
            let flags = union_flags(flags_of(parent), flags_of(child));

            PathPattern::parameterized(&format!("{parent_source}{child_source}"), &flags)
        }
    }
}

fn flags_of(pattern: &PathPattern) -> &str {
    match pattern {
        PathPattern::Literal(_) => "",
        PathPattern::Parameterized(p) => p.flags(),
    }
}

fn union_flags(a: &str, b: &str) -> String {
    a.chars().chain(b.chars()).collect::<BTreeSet<char>>().into_iter().collect()
}

/// Strips exactly one trailing end-of-input anchor, if present.
///
/// An escaped `\$` is a literal dollar sign, not an anchor, and is left
/// alone.
fn strip_end_anchor(source: &str) -> &str {
    let Some(stripped) = source.strip_suffix('$') else {
        return source;
    };
    let trailing_backslashes = stripped.chars().rev().take_while(|c| *c == '\\').count();
    if trailing_backslashes % 2 == 0 {
        stripped
    } else {
        source
    }
}
