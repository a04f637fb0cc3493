//! The overlay of match rectangles.
//!
//! A `HighlightSet` is never patched: every evaluation clears it and builds it
//! again from the new matches, so it always mirrors the latest `MatchSet`.

use super::geometry::{Geometry, Rect};
use crate::document::node::NodeId;
use crate::xpath::evaluator::MatchSet;

/// One highlighted element. `rect` is `None` when the element is off screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub node: NodeId,
    pub rect: Option<Rect>,
}

impl Highlight {
    pub fn at(node: NodeId, geometry: &dyn Geometry) -> Self {
        Self {
            node,
            rect: geometry.bounding_box(node),
        }
    }
}

/// Which style a node is highlighted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    primary: Option<Highlight>,
    secondary: Vec<Highlight>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.primary = None;
        self.secondary.clear();
    }

    /// Clears the set, then highlights the first match as primary and the rest as secondary.
    pub fn rebuild(&mut self, matches: &MatchSet, geometry: &dyn Geometry) {
        self.clear();
        self.primary = matches.primary().map(|m| Highlight::at(m.node, geometry));
        self.secondary = matches
            .secondary()
            .iter()
            .map(|m| Highlight::at(m.node, geometry))
            .collect();
    }

    pub fn primary(&self) -> Option<&Highlight> {
        self.primary.as_ref()
    }

    pub fn secondary(&self) -> &[Highlight] {
        &self.secondary
    }

    /// Total number of highlights.
    pub fn len(&self) -> usize {
        self.primary.iter().count() + self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_empty()
    }

    /// Returns how a node is highlighted, if at all.
    pub fn kind_of(&self, node: NodeId) -> Option<HighlightKind> {
        if self.primary.is_some_and(|h| h.node == node) {
            Some(HighlightKind::Primary)
        } else if self.secondary.iter().any(|h| h.node == node) {
            Some(HighlightKind::Secondary)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::geometry::NoGeometry;
    use crate::xpath::evaluator::Match;

    fn matches(ids: &[usize]) -> MatchSet {
        MatchSet::new(
            ids.iter()
                .map(|&i| Match {
                    node: NodeId(i),
                    value: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_rebuild_splits_primary_and_secondary() {
        let mut set = HighlightSet::new();
        set.rebuild(&matches(&[4, 7, 9]), &NoGeometry);
        assert_eq!(set.primary().map(|h| h.node), Some(NodeId(4)));
        assert_eq!(set.secondary().len(), 2);
        assert_eq!(set.kind_of(NodeId(9)), Some(HighlightKind::Secondary));
        assert_eq!(set.kind_of(NodeId(1)), None);
    }

    #[test]
    fn test_rebuild_replaces_previous_contents() {
        let mut set = HighlightSet::new();
        set.rebuild(&matches(&[1, 2, 3]), &NoGeometry);
        set.rebuild(&matches(&[]), &NoGeometry);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_rects_come_from_geometry() {
        let geometry = |node: NodeId| Some(Rect::new(0, node.index() as i32, 5, 1));
        let mut set = HighlightSet::new();
        set.rebuild(&matches(&[3]), &geometry);
        assert_eq!(set.primary().and_then(|h| h.rect), Some(Rect::new(0, 3, 5, 1)));
    }
}
