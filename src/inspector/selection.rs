//! Human-readable facts about the most recently clicked element.

use crate::document::node::NodeId;
use crate::document::tree::DocumentTree;

/// Text preview cap used when none is configured.
pub const DEFAULT_PREVIEW_LIMIT: usize = 300;

const EMPTY: &str = "(empty)";
const NO_ATTRIBUTES: &str = "(none)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDetails {
    pub node: NodeId,
    pub tag: String,
    /// `<tag> #id .a.b`
    pub summary: String,
    /// Trimmed text content, capped, or "(empty)".
    pub text_preview: String,
    /// `name="value"` entries, or a single "(none)".
    pub attributes: Vec<String>,
    /// What the selection stands for: a link's destination or the element text.
    pub display_text: String,
}

impl SelectionDetails {
    /// Describes `node`. `display_attribute` is the attribute the generated
    /// path selects, if any.
    ///
    /// ```
    /// use xpathquill::document::parser::parse_html;
    /// use xpathquill::inspector::selection::SelectionDetails;
    ///
    /// let tree = parse_html(r#"<a id="home" class="nav top" href="/">Home</a>"#).unwrap();
    /// let body = tree.body().unwrap();
    /// let link = tree[body].children()[0];
    ///
    /// let details = SelectionDetails::describe(&tree, link, Some("href"), 300);
    /// assert_eq!(details.summary, "<a> #home .nav.top");
    /// assert_eq!(details.text_preview, "Home");
    /// assert_eq!(details.display_text, "/");
    /// ```
    pub fn describe(
        tree: &DocumentTree,
        node: NodeId,
        display_attribute: Option<&str>,
        preview_limit: usize,
    ) -> Self {
        let element = &tree[node];

        let mut summary = format!("<{}>", element.tag());
        if let Some(id) = element.id() {
            summary.push_str(" #");
            summary.push_str(id);
        }
        let classes = element.classes();
        if !classes.is_empty() {
            summary.push_str(" .");
            summary.push_str(&classes.join("."));
        }

        let text = tree.text_content(node);
        let text_preview = preview(&text, preview_limit);

        let mut attributes: Vec<String> = element
            .attributes()
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect();
        if attributes.is_empty() {
            attributes.push(NO_ATTRIBUTES.to_string());
        }

        let display_text = display_attribute
            .and_then(|name| element.attribute(name))
            .map(str::to_string)
            .unwrap_or_else(|| text.trim().to_string());

        Self {
            node,
            tag: element.tag().to_string(),
            summary,
            text_preview,
            attributes,
            display_text,
        }
    }
}

/// Trims `text` and caps it at `limit` characters, or returns "(empty)".
pub fn preview(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return EMPTY.to_string();
    }
    if trimmed.chars().count() <= limit {
        trimmed.to_string()
    } else {
        let mut capped: String = trimmed.chars().take(limit).collect();
        capped.push('…');
        capped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::Node;

    #[test]
    fn test_preview_caps_on_characters() {
        assert_eq!(preview("  héllo  ", 10), "héllo");
        assert_eq!(preview("abcdef", 3), "abc…");
        assert_eq!(preview("   ", 3), "(empty)");
    }

    #[test]
    fn test_element_without_attributes() {
        let mut tree = DocumentTree::new();
        let html = tree.append(NodeId::DOCUMENT, Node::new("html"));
        let p = tree.append(html, Node::new("p"));
        let details = SelectionDetails::describe(&tree, p, None, 300);
        assert_eq!(details.summary, "<p>");
        assert_eq!(details.attributes, vec!["(none)"]);
        assert_eq!(details.text_preview, "(empty)");
        assert_eq!(details.display_text, "");
    }
}
