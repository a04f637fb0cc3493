//! Splitting path text into top-level segments.
//!
//! This is the only place that knows how brackets, parentheses and quoted
//! literals nest. Everything else (the step compiler, the breadcrumb builder,
//! the generator's output) goes through [`parse_segments`], [`join`] and
//! [`predicate_groups`].
//!
//! # Example
//!
//! ```
//! use xpathquill::xpath::segments::{parse_segments, Origin};
//!
//! let parsed = parse_segments(r#"//a[@href="/x/y"]/@href"#).unwrap();
//! assert_eq!(parsed.origin, Origin::Anywhere);
//! assert_eq!(parsed.segments, vec![r#"a[@href="/x/y"]"#, "@href"]);
//! ```

use super::error::ParseError;
use std::fmt;
use std::ops::Range;

/// Segment separator.
pub const SEPARATOR: char = '/';

/// Where evaluation of a path starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// `/…`: from the document node.
    Absolute,
    /// `//…`: from the document node and every element below it.
    Anywhere,
}

impl Origin {
    /// Returns the leading marker for this origin.
    pub fn marker(self) -> &'static str {
        match self {
            Origin::Absolute => "/",
            Origin::Anywhere => "//",
        }
    }

    /// Returns true for `//` paths.
    pub fn is_relative(self) -> bool {
        self == Origin::Anywhere
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// A path split into its origin and raw segment texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub origin: Origin,
    pub segments: Vec<String>,
}

impl ParsedPath {
    /// Returns true for `//` paths.
    pub fn is_relative(&self) -> bool {
        self.origin.is_relative()
    }

    /// Joins the segments back into path text.
    pub fn join(&self) -> String {
        join(self.origin, &self.segments)
    }
}

/// Joins segments behind an origin marker.
///
/// ```
/// use xpathquill::xpath::segments::{join, Origin};
///
/// assert_eq!(join(Origin::Absolute, &["html", "body"]), "/html/body");
/// assert_eq!(join(Origin::Anywhere, &["div[2]"]), "//div[2]");
/// ```
pub fn join<S: AsRef<str>>(origin: Origin, segments: &[S]) -> String {
    let body: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
    format!("{}{}", origin.marker(), body.join("/"))
}

/// Splits a path into origin and segments.
///
/// The separator only splits at nesting depth zero and outside quoted
/// literals. Empty fragments at either end are dropped; an empty fragment in
/// the middle is an error. Each segment is trimmed.
pub fn parse_segments(path: &str) -> Result<ParsedPath, ParseError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (origin, rest, offset) = if let Some(rest) = trimmed.strip_prefix("//") {
        (Origin::Anywhere, rest, 2)
    } else if let Some(rest) = trimmed.strip_prefix(SEPARATOR) {
        (Origin::Absolute, rest, 1)
    } else {
        return Err(ParseError::MissingOrigin);
    };

    let mut cuts = Vec::new();
    scan(rest, offset, |position, ch, depth| {
        if ch == SEPARATOR && depth == 0 {
            cuts.push(position - offset);
        }
    })?;

    let mut fragments: Vec<(usize, &str)> = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        fragments.push((start, &rest[start..cut]));
        start = cut + SEPARATOR.len_utf8();
    }
    fragments.push((start, &rest[start..]));

    let first = fragments.iter().position(|(_, f)| !f.trim().is_empty());
    let last = fragments.iter().rposition(|(_, f)| !f.trim().is_empty());
    let (first, last) = match (first, last) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ParseError::Empty),
    };

    let mut segments = Vec::with_capacity(last - first + 1);
    for &(start, fragment) in &fragments[first..=last] {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(ParseError::EmptySegment {
                position: offset + start,
            });
        }
        segments.push(fragment.to_string());
    }

    Ok(ParsedPath { origin, segments })
}

/// Returns the byte ranges of a segment's top-level `[…]` groups,
/// brackets included.
///
/// ```
/// use xpathquill::xpath::segments::predicate_groups;
///
/// let segment = r#"div[@class="a[b]"][2]"#;
/// let groups = predicate_groups(segment).unwrap();
/// assert_eq!(&segment[groups[0].clone()], r#"[@class="a[b]"]"#);
/// assert_eq!(&segment[groups[1].clone()], "[2]");
/// ```
pub fn predicate_groups(segment: &str) -> Result<Vec<Range<usize>>, ParseError> {
    let mut groups = Vec::new();
    let mut open_at = None;
    scan(segment, 0, |position, ch, depth| match ch {
        '[' if depth == 0 => open_at = Some(position),
        ']' if depth == 0 => {
            if let Some(start) = open_at.take() {
                groups.push(start..position + 1);
            }
        }
        _ => {}
    })?;
    Ok(groups)
}

/// Walks `text`, reporting every character outside quoted literals together
/// with its nesting depth.
///
/// Openers report the depth before they open, closers the depth after they
/// close, so a top-level `[` and its `]` both report zero. Positions are
/// byte offsets shifted by `offset`.
fn scan<F>(text: &str, offset: usize, mut visit: F) -> Result<(), ParseError>
where
    F: FnMut(usize, char, usize),
{
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut literal: Option<(char, usize)> = None;

    for (index, ch) in text.char_indices() {
        let position = index + offset;

        if let Some((quote, _)) = literal {
            if ch == quote {
                literal = None;
            }
            continue;
        }

        match ch {
            '"' | '\'' => literal = Some((ch, position)),
            '[' | '(' => {
                visit(position, ch, stack.len());
                stack.push((ch, position));
            }
            ']' | ')' => {
                let expected = if ch == ']' { '[' } else { '(' };
                match stack.pop() {
                    Some((open, _)) if open == expected => visit(position, ch, stack.len()),
                    _ => {
                        return Err(ParseError::UnbalancedBracket {
                            position,
                            found: ch,
                        })
                    }
                }
            }
            _ => visit(position, ch, stack.len()),
        }
    }

    if let Some((_, position)) = literal {
        return Err(ParseError::UnterminatedLiteral { position });
    }
    if let Some((open, position)) = stack.pop() {
        return Err(ParseError::UnclosedBracket { position, open });
    }
    Ok(())
}
