//! Synthesizing a path that identifies a target element.
//!
//! Strategies are tried in priority order and the first one that succeeds
//! wins:
//!
//! 1. identifier: `//*[@id="…"]`
//! 2. the root element and the body node get their fixed canonical paths
//! 3. the element's class tokens, ANDed into one wildcard step
//! 4. the ancestor chain from the root, with ordinals where tags repeat
//!
//! Identifier and class candidates are evaluated before they are returned and
//! only accepted if they match the target alone. Hyperlinks with a followable
//! destination get an `/@href` selector appended.

use super::ast::{quote_literal, PathExpression, Predicate, Step};
use super::evaluator::Evaluator;
use crate::document::node::NodeId;
use crate::document::tree::DocumentTree;

/// Which strategy produced a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Identifier,
    Canonical,
    ClassCandidate,
    AncestorChain,
}

/// A generated path and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPath {
    pub expression: PathExpression,
    pub strategy: Strategy,
    /// Attribute whose value should be shown instead of the element's text.
    pub display_attribute: Option<String>,
}

impl GeneratedPath {
    pub fn text(&self) -> String {
        self.expression.to_string()
    }
}

pub struct PathGenerator<'a> {
    tree: &'a DocumentTree,
}

impl<'a> PathGenerator<'a> {
    pub fn new(tree: &'a DocumentTree) -> Self {
        PathGenerator { tree }
    }

    /// Generates a path for `target`.
    ///
    /// ```
    /// use xpathquill::document::parser::parse_html;
    /// use xpathquill::xpath::generator::{PathGenerator, Strategy};
    ///
    /// let tree = parse_html("<p>a</p><p>b</p>").unwrap();
    /// let body = tree.body().unwrap();
    /// let second = tree[body].children()[1];
    ///
    /// let generated = PathGenerator::new(&tree).generate(second);
    /// assert_eq!(generated.strategy, Strategy::AncestorChain);
    /// assert_eq!(generated.text(), "/html/body/p[2]");
    /// ```
    pub fn generate(&self, target: NodeId) -> GeneratedPath {
        let (mut expression, strategy) = self
            .by_identifier(target)
            .map(|e| (e, Strategy::Identifier))
            .or_else(|| self.canonical(target).map(|e| (e, Strategy::Canonical)))
            .or_else(|| self.by_classes(target).map(|e| (e, Strategy::ClassCandidate)))
            .unwrap_or_else(|| (self.ancestor_chain(target), Strategy::AncestorChain));

        let mut display_attribute = None;
        if self.tree[target].link_destination().is_some() {
            expression = expression.with_attribute("href");
            display_attribute = Some("href".to_string());
        }

        tracing::debug!("generated {} for {} via {:?}", expression, target, strategy);
        GeneratedPath {
            expression,
            strategy,
            display_attribute,
        }
    }

    fn by_identifier(&self, target: NodeId) -> Option<PathExpression> {
        let id = self.tree[target].id()?;
        quote_literal(id)?;
        let candidate = PathExpression::anywhere(vec![
            Step::any().with_predicate(Predicate::attribute_equals("id", id))
        ]);
        self.identifies(&candidate, target).then_some(candidate)
    }

    fn canonical(&self, target: NodeId) -> Option<PathExpression> {
        let root = self.tree.root_element()?;
        let root_step = Step::tag(self.tree[root].tag());
        if target == root {
            return Some(PathExpression::absolute(vec![root_step]));
        }
        if Some(target) == self.tree.body() {
            let body_step = Step::tag(self.tree[target].tag());
            return Some(PathExpression::absolute(vec![root_step, body_step]));
        }
        None
    }

    /// Builds the class candidate for `target`, without checking uniqueness.
    ///
    /// Repeated class tokens are only tested once. Returns `None` when
    /// the element has no classes or a token cannot be written as a literal.
    pub fn class_candidate(&self, target: NodeId) -> Option<PathExpression> {
        let mut tokens: Vec<&str> = Vec::new();
        for class in self.tree[target].classes() {
            quote_literal(class)?;
            if !tokens.contains(&class) {
                tokens.push(class);
            }
        }
        let predicate = Predicate::all(
            tokens
                .into_iter()
                .map(|class| Predicate::attribute_contains("class", class))
                .collect(),
        )?;
        Some(PathExpression::anywhere(vec![
            Step::any().with_predicate(predicate)
        ]))
    }

    fn by_classes(&self, target: NodeId) -> Option<PathExpression> {
        let candidate = self.class_candidate(target)?;
        self.identifies(&candidate, target).then_some(candidate)
    }

    /// Builds the root-to-target chain of tag steps.
    ///
    /// A parentless node yields a single `/tag` step that may match nothing.
    pub fn ancestor_chain(&self, target: NodeId) -> PathExpression {
        let mut steps = Vec::new();
        let mut current = Some(target);
        while let Some(id) = current {
            let node = &self.tree[id];
            if node.is_document() {
                break;
            }
            let mut step = Step::tag(node.tag());
            if let Some((position, count)) = self.tree.ordinal_among_same_tag(id) {
                if count > 1 {
                    step = step.with_predicate(Predicate::Position(position));
                }
            }
            steps.push(step);
            current = node.parent();
        }
        steps.reverse();
        PathExpression::absolute(steps)
    }

    fn identifies(&self, candidate: &PathExpression, target: NodeId) -> bool {
        Evaluator::new(self.tree).evaluate_expression(candidate).single() == Some(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Node;

    fn skeleton() -> (DocumentTree, NodeId, NodeId) {
        let mut tree = DocumentTree::new();
        let html = tree.append(NodeId::DOCUMENT, Node::new("html"));
        let body = tree.append(html, Node::new("body"));
        (tree, html, body)
    }

    #[test]
    fn test_identifier_path() {
        let (mut tree, _, body) = skeleton();
        let form = tree.append(body, Node::new("form").with_attribute("id", "login"));
        let generated = PathGenerator::new(&tree).generate(form);
        assert_eq!(generated.strategy, Strategy::Identifier);
        assert_eq!(generated.text(), r#"//*[@id="login"]"#);
        assert_eq!(generated.display_attribute, None);
    }

    #[test]
    fn test_duplicate_identifier_falls_through() {
        let (mut tree, _, body) = skeleton();
        tree.append(body, Node::new("div").with_attribute("id", "dup"));
        let second = tree.append(body, Node::new("div").with_attribute("id", "dup"));
        let generated = PathGenerator::new(&tree).generate(second);
        assert_eq!(generated.strategy, Strategy::AncestorChain);
        assert_eq!(generated.text(), "/html/body/div[2]");
    }

    #[test]
    fn test_canonical_paths() {
        let (tree, html, body) = skeleton();
        let generator = PathGenerator::new(&tree);
        assert_eq!(generator.generate(html).text(), "/html");
        assert_eq!(generator.generate(body).text(), "/html/body");
        assert_eq!(generator.generate(body).strategy, Strategy::Canonical);
    }

    #[test]
    fn test_unique_class_candidate() {
        let (mut tree, _, body) = skeleton();
        tree.append(body, Node::new("div").with_attribute("class", "card"));
        let featured = tree.append(body, Node::new("div").with_attribute("class", "card featured"));
        let generated = PathGenerator::new(&tree).generate(featured);
        assert_eq!(generated.strategy, Strategy::ClassCandidate);
        assert_eq!(
            generated.text(),
            r#"//*[contains(@class,"card") and contains(@class,"featured")]"#
        );
    }

    #[test]
    fn test_repeated_class_tokens_are_deduplicated() {
        let (mut tree, _, body) = skeleton();
        let node = tree.append(body, Node::new("div").with_attribute("class", "x x"));
        let candidate = PathGenerator::new(&tree).class_candidate(node).unwrap();
        assert_eq!(candidate.to_string(), r#"//*[contains(@class,"x")]"#);
    }

    #[test]
    fn test_ambiguous_classes_fall_through() {
        let (mut tree, _, body) = skeleton();
        let section = tree.append(body, Node::new("section").with_attribute("class", "card featured"));
        tree.append(body, Node::new("div").with_attribute("class", "card featured"));
        let generated = PathGenerator::new(&tree).generate(section);
        assert_eq!(generated.strategy, Strategy::AncestorChain);
        assert_eq!(generated.text(), "/html/body/section");
    }

    #[test]
    fn test_ordinal_counts_same_tag_siblings_only() {
        let (mut tree, _, body) = skeleton();
        tree.append(body, Node::new("p"));
        tree.append(body, Node::new("div"));
        let p2 = tree.append(body, Node::new("p"));
        let span = tree.append(p2, Node::new("span"));
        let generated = PathGenerator::new(&tree).generate(span);
        assert_eq!(generated.text(), "/html/body/p[2]/span");
    }

    #[test]
    fn test_hyperlink_selects_href() {
        let (mut tree, _, body) = skeleton();
        let link = tree.append(body, Node::new("a").with_attribute("href", "/docs"));
        let generated = PathGenerator::new(&tree).generate(link);
        assert_eq!(generated.text(), "/html/body/a/@href");
        assert_eq!(generated.display_attribute.as_deref(), Some("href"));
    }

    #[test]
    fn test_script_link_keeps_element() {
        let (mut tree, _, body) = skeleton();
        let link = tree.append(body, Node::new("a").with_attribute("href", "javascript:void(0)"));
        let generated = PathGenerator::new(&tree).generate(link);
        assert_eq!(generated.text(), "/html/body/a");
        assert_eq!(generated.display_attribute, None);
    }

    #[test]
    fn test_unquotable_identifier_is_skipped() {
        let (mut tree, _, body) = skeleton();
        let node = tree.append(body, Node::new("div").with_attribute("id", r#"a"b'c"#));
        let generated = PathGenerator::new(&tree).generate(node);
        assert_eq!(generated.strategy, Strategy::AncestorChain);
    }

    #[test]
    fn test_detached_node_is_degenerate() {
        let (mut tree, _, _) = skeleton();
        let orphan = tree.create(Node::new("li"));
        let generated = PathGenerator::new(&tree).generate(orphan);
        assert_eq!(generated.text(), "/li");
        assert!(Evaluator::new(&tree)
            .evaluate_expression(&generated.expression)
            .is_empty());
    }
}
