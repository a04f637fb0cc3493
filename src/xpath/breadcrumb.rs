//! Breadcrumb affordances for a path and the paths derived from them.
//!
//! A breadcrumb is one parsed segment rendered as something the user can
//! activate: the tag part narrows the path, the ordinal part (when there is
//! one) can be removed. Nothing here touches a tree; callers re-evaluate
//! whatever path comes back.
//!
//! ```
//! use xpathquill::xpath::breadcrumb;
//!
//! let path = "/html/body/div[3]/span";
//! assert_eq!(
//!     breadcrumb::remove_ordinal(path, 2).unwrap().as_deref(),
//!     Some("/html/body/div/span")
//! );
//! assert_eq!(
//!     breadcrumb::narrow(path, 2, false).unwrap().as_deref(),
//!     Some("/html/body/div[3]")
//! );
//! assert_eq!(
//!     breadcrumb::narrow(path, 2, true).unwrap().as_deref(),
//!     Some("//div[3]/span")
//! );
//! ```

use super::error::ParseError;
use super::segments::{join, parse_segments, predicate_groups, Origin};
use std::ops::Range;

/// One activatable crumb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    /// Segment index in the path.
    pub index: usize,
    /// Tag matcher text (`div`, `*`) or the attribute selector (`@href`).
    pub label: String,
    /// Value of the segment's ordinal predicate, if it has one.
    pub ordinal: Option<usize>,
    /// The remaining predicate groups, brackets included.
    pub predicates: Vec<String>,
    /// False for attribute selectors.
    pub clickable: bool,
    /// The full segment text.
    pub segment: String,
}

/// The crumbs for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumbs {
    pub origin: Origin,
    pub segments: Vec<String>,
    pub affordances: Vec<Affordance>,
}

impl Breadcrumbs {
    pub fn len(&self) -> usize {
        self.affordances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.affordances.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Affordance> {
        self.affordances.get(index)
    }

    /// Derives a narrowed path from the crumb at `index`.
    ///
    /// Without the descendant modifier the result keeps the origin and the
    /// segments up to and including `index`. With it, the result is a `//`
    /// path starting at `index`.
    pub fn narrow(&self, index: usize, descendant: bool) -> Option<String> {
        if !self.get(index)?.clickable {
            return None;
        }
        Some(if descendant {
            join(Origin::Anywhere, &self.segments[index..])
        } else {
            join(self.origin, &self.segments[..=index])
        })
    }

    /// Derives the path with the ordinal of segment `index` removed.
    pub fn remove_ordinal(&self, index: usize) -> Option<String> {
        let segment = self.segments.get(index)?;
        let range = ordinal_group(segment)?.0;

        let mut segments = self.segments.clone();
        let mut stripped = segment.clone();
        stripped.replace_range(range, "");
        segments[index] = stripped;
        Some(join(self.origin, &segments))
    }
}

/// Parses a path and builds its crumbs.
pub fn build(path: &str) -> Result<Breadcrumbs, ParseError> {
    let parsed = parse_segments(path)?;
    let mut affordances = Vec::with_capacity(parsed.segments.len());
    for (index, segment) in parsed.segments.iter().enumerate() {
        affordances.push(affordance(index, segment)?);
    }
    Ok(Breadcrumbs {
        origin: parsed.origin,
        segments: parsed.segments,
        affordances,
    })
}

/// Parses `path` and narrows it at `index`. See [`Breadcrumbs::narrow`].
pub fn narrow(path: &str, index: usize, descendant: bool) -> Result<Option<String>, ParseError> {
    Ok(build(path)?.narrow(index, descendant))
}

/// Parses `path` and removes the ordinal of segment `index`.
/// See [`Breadcrumbs::remove_ordinal`].
pub fn remove_ordinal(path: &str, index: usize) -> Result<Option<String>, ParseError> {
    Ok(build(path)?.remove_ordinal(index))
}

fn affordance(index: usize, segment: &str) -> Result<Affordance, ParseError> {
    if segment.starts_with('@') {
        return Ok(Affordance {
            index,
            label: segment.to_string(),
            ordinal: None,
            predicates: Vec::new(),
            clickable: false,
            segment: segment.to_string(),
        });
    }

    let groups = predicate_groups(segment)?;
    let head_end = groups.first().map(|g| g.start).unwrap_or(segment.len());
    let ordinal = ordinal_group(segment);
    let predicates = groups
        .iter()
        .filter(|g| ordinal.as_ref().map_or(true, |(o, _)| o != *g))
        .map(|g| segment[g.clone()].to_string())
        .collect();

    Ok(Affordance {
        index,
        label: segment[..head_end].trim().to_string(),
        ordinal: ordinal.map(|(_, n)| n),
        predicates,
        clickable: true,
        segment: segment.to_string(),
    })
}

/// Finds the first `[n]` group of a segment.
fn ordinal_group(segment: &str) -> Option<(Range<usize>, usize)> {
    predicate_groups(segment)
        .ok()?
        .into_iter()
        .find_map(|group| {
            let inner = segment[group.start + 1..group.end - 1].trim();
            if inner.is_empty() || !inner.chars().all(|ch| ch.is_ascii_digit()) {
                return None;
            }
            inner.parse::<usize>().ok().map(|n| (group, n))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_affordances() {
        let crumbs = build(r#"/html/body/div[@class="x"][3]/a/@href"#).unwrap();
        assert_eq!(crumbs.len(), 5);

        let div = crumbs.get(2).unwrap();
        assert_eq!(div.label, "div");
        assert_eq!(div.ordinal, Some(3));
        assert_eq!(div.predicates, vec![r#"[@class="x"]"#]);
        assert!(div.clickable);

        let href = crumbs.get(4).unwrap();
        assert_eq!(href.label, "@href");
        assert!(!href.clickable);
    }

    #[test]
    fn test_narrow_keeps_origin() {
        assert_eq!(
            narrow("//main/div[2]/p", 1, false).unwrap().as_deref(),
            Some("//main/div[2]")
        );
        assert_eq!(narrow("/html/body", 0, false).unwrap().as_deref(), Some("/html"));
    }

    #[test]
    fn test_narrow_descendant_rooted() {
        assert_eq!(
            narrow("/html/body/div[3]/span", 3, true).unwrap().as_deref(),
            Some("//span")
        );
    }

    #[test]
    fn test_attribute_segment_is_not_clickable() {
        assert_eq!(narrow("//a/@href", 1, false).unwrap(), None);
        assert_eq!(narrow("//a/@href", 1, true).unwrap(), None);
        assert_eq!(narrow("//a/@href", 7, false).unwrap(), None);
    }

    #[test]
    fn test_remove_ordinal_only_touches_one_segment() {
        assert_eq!(
            remove_ordinal("//ul[2]/li[4]", 1).unwrap().as_deref(),
            Some("//ul[2]/li")
        );
        assert_eq!(
            remove_ordinal(r#"/div[@id="a"][2]"#, 0).unwrap().as_deref(),
            Some(r#"/div[@id="a"]"#)
        );
    }

    #[test]
    fn test_remove_ordinal_without_ordinal() {
        assert_eq!(remove_ordinal("/html/body", 1).unwrap(), None);
        assert_eq!(remove_ordinal(r#"//*[@id="x"]"#, 0).unwrap(), None);
    }

    #[test]
    fn test_slash_inside_predicate_stays_in_segment() {
        let crumbs = build(r#"//a[starts-with(@href,"/docs/")][2]"#).unwrap();
        assert_eq!(crumbs.len(), 1);
        assert_eq!(
            crumbs.remove_ordinal(0).as_deref(),
            Some(r#"//a[starts-with(@href,"/docs/")]"#)
        );
    }

    #[test]
    fn test_parse_errors_surface() {
        assert!(build("/div[").is_err());
        assert_eq!(narrow("div", 0, false), Err(ParseError::MissingOrigin));
    }
}
