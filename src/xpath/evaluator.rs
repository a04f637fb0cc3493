//! Running path expressions against a `DocumentTree`.

use super::ast::{NameTest, Operand, PathExpression, Predicate, Step};
use super::error::XPathError;
use super::segments::Origin;
use crate::document::node::NodeId;
use crate::document::tree::DocumentTree;

/// One result of an evaluation.
///
/// For attribute-selecting paths `node` is the owning element and `value`
/// carries the attribute's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub node: NodeId,
    pub value: Option<String>,
}

/// The ordered results of an evaluation, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    matches: Vec<Match>,
}

impl MatchSet {
    pub fn new(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }

    /// The first match in document order.
    pub fn primary(&self) -> Option<&Match> {
        self.matches.first()
    }

    /// Every match after the first.
    pub fn secondary(&self) -> &[Match] {
        self.matches.get(1..).unwrap_or(&[])
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.matches.iter().map(|m| m.node).collect()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.matches.iter().any(|m| m.node == node)
    }

    /// Returns the single matched node, if there is exactly one.
    pub fn single(&self) -> Option<NodeId> {
        match self.matches.as_slice() {
            [only] => Some(only.node),
            _ => None,
        }
    }
}

impl<'s> IntoIterator for &'s MatchSet {
    type Item = &'s Match;
    type IntoIter = std::slice::Iter<'s, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

/// Read-only path evaluator over a tree.
pub struct Evaluator<'a> {
    tree: &'a DocumentTree,
}

impl<'a> Evaluator<'a> {
    pub fn new(tree: &'a DocumentTree) -> Self {
        Evaluator { tree }
    }

    /// Parses, compiles and evaluates path text.
    ///
    /// ```
    /// use xpathquill::document::parser::parse_html;
    /// use xpathquill::xpath::evaluator::Evaluator;
    ///
    /// let tree = parse_html("<ul><li>a</li><li>b</li></ul>").unwrap();
    /// let matches = Evaluator::new(&tree).evaluate("//li[2]").unwrap();
    /// assert_eq!(matches.len(), 1);
    /// assert_eq!(tree[matches.primary().unwrap().node].text(), "b");
    /// ```
    pub fn evaluate(&self, path: &str) -> Result<MatchSet, XPathError> {
        let expression = PathExpression::parse(path)?;
        let matches = self.evaluate_expression(&expression);
        tracing::debug!("evaluated {} -> {} matches", path, matches.len());
        Ok(matches)
    }

    /// Evaluates an already compiled expression.
    pub fn evaluate_expression(&self, expression: &PathExpression) -> MatchSet {
        let ranks = self.tree.document_order();

        let mut current = match expression.origin {
            Origin::Absolute => vec![NodeId::DOCUMENT],
            Origin::Anywhere => {
                let mut all = vec![NodeId::DOCUMENT];
                all.extend(self.tree.descendants(NodeId::DOCUMENT));
                all
            }
        };
        if expression.origin == Origin::Anywhere
            && expression.steps.is_empty()
            && expression.attribute.is_some()
        {
            current.retain(|&id| id != NodeId::DOCUMENT);
        }

        for step in &expression.steps {
            let mut next = Vec::new();
            for &context in &current {
                next.extend(self.apply_step(context, step));
            }
            next.retain(|id| ranks[id.index()].is_some());
            next.sort_by_key(|id| ranks[id.index()]);
            next.dedup();
            current = next;
        }

        let matches = match &expression.attribute {
            Some(name) => current
                .into_iter()
                .filter_map(|id| {
                    self.tree[id].attribute(name).map(|value| Match {
                        node: id,
                        value: Some(value.to_string()),
                    })
                })
                .collect(),
            None => current
                .into_iter()
                .filter(|&id| id != NodeId::DOCUMENT)
                .map(|node| Match { node, value: None })
                .collect(),
        };
        MatchSet::new(matches)
    }

    /// Selects the element children of `context` that pass the step.
    fn apply_step(&self, context: NodeId, step: &Step) -> Vec<NodeId> {
        let mut candidates: Vec<NodeId> = self.tree[context]
            .children()
            .iter()
            .copied()
            .filter(|&child| self.name_matches(&step.test, child))
            .collect();

        for predicate in &step.predicates {
            let size = candidates.len();
            candidates = candidates
                .into_iter()
                .enumerate()
                .filter(|&(index, id)| self.test(predicate, id, index + 1, size))
                .map(|(_, id)| id)
                .collect();
        }
        candidates
    }

    fn name_matches(&self, test: &NameTest, id: NodeId) -> bool {
        let node = &self.tree[id];
        !node.is_document() && test.matches(node.tag())
    }

    fn test(&self, predicate: &Predicate, id: NodeId, position: usize, size: usize) -> bool {
        let node = &self.tree[id];
        match predicate {
            Predicate::Position(n) => position == *n,
            Predicate::Last => position == size,
            Predicate::HasAttribute(name) => node.attribute(name).is_some(),
            Predicate::AttributeEquals {
                name,
                value,
                negated,
            } => match node.attribute(name) {
                Some(actual) => (actual == value) != *negated,
                None => false,
            },
            Predicate::TextEquals { value, negated } => (node.text() == value) != *negated,
            Predicate::Contains { operand, needle } => {
                self.operand_value(operand, id).contains(needle.as_str())
            }
            Predicate::StartsWith { operand, prefix } => {
                self.operand_value(operand, id).starts_with(prefix.as_str())
            }
            Predicate::And(left, right) => {
                self.test(left, id, position, size) && self.test(right, id, position, size)
            }
            Predicate::Or(left, right) => {
                self.test(left, id, position, size) || self.test(right, id, position, size)
            }
            Predicate::Not(inner) => !self.test(inner, id, position, size),
        }
    }

    /// Missing attributes read as the empty string.
    fn operand_value(&self, operand: &Operand, id: NodeId) -> String {
        let node = &self.tree[id];
        match operand {
            Operand::Attribute(name) => node.attribute(name).unwrap_or_default().to_string(),
            Operand::Text => node.text().to_string(),
            Operand::Context => self.tree.text_content(id),
        }
    }
}
