//! Abstract syntax tree types for path expressions.

use super::error::XPathError;
use super::segments::{parse_segments, Origin};
use std::fmt;

/// The tag matcher of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// A literal tag name (compared ASCII case-insensitively)
    Tag(String),
    /// `*`: any element
    Any,
}

impl NameTest {
    /// Returns true if an element with this tag passes the test.
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            NameTest::Tag(name) => name.eq_ignore_ascii_case(tag),
            NameTest::Any => true,
        }
    }
}

impl fmt::Display for NameTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameTest::Tag(name) => f.write_str(name),
            NameTest::Any => f.write_str("*"),
        }
    }
}

/// The string a string function looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// `@name`
    Attribute(String),
    /// `text()`: the element's own text
    Text,
    /// `.`: the element's full text content
    Context,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Attribute(name) => write!(f, "@{}", name),
            Operand::Text => f.write_str("text()"),
            Operand::Context => f.write_str("."),
        }
    }
}

/// A filter applied to the candidates of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `[n]` or `position()=n` (1-based)
    Position(usize),
    /// `last()`
    Last,
    /// `@name`
    HasAttribute(String),
    /// `@name="value"` / `@name!="value"`
    AttributeEquals {
        name: String,
        value: String,
        negated: bool,
    },
    /// `text()="value"` / `text()!="value"`
    TextEquals { value: String, negated: bool },
    /// `contains(operand,"needle")`
    Contains { operand: Operand, needle: String },
    /// `starts-with(operand,"prefix")`
    StartsWith { operand: Operand, prefix: String },
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    /// `contains(@name,"needle")`
    pub fn attribute_contains(name: &str, needle: &str) -> Self {
        Predicate::Contains {
            operand: Operand::Attribute(name.to_string()),
            needle: needle.to_string(),
        }
    }

    /// `@name="value"`
    pub fn attribute_equals(name: &str, value: &str) -> Self {
        Predicate::AttributeEquals {
            name: name.to_string(),
            value: value.to_string(),
            negated: false,
        }
    }

    /// ANDs a list of predicates left to right. Returns `None` for an empty list.
    pub fn all(predicates: Vec<Predicate>) -> Option<Self> {
        predicates
            .into_iter()
            .reduce(|left, right| Predicate::And(Box::new(left), Box::new(right)))
    }

    /// Returns true for a plain ordinal (`[n]`).
    pub fn is_ordinal(&self) -> bool {
        matches!(self, Predicate::Position(_))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Position(n) => write!(f, "{}", n),
            Predicate::Last => f.write_str("last()"),
            Predicate::HasAttribute(name) => write!(f, "@{}", name),
            Predicate::AttributeEquals {
                name,
                value,
                negated,
            } => write!(
                f,
                "@{}{}{}",
                name,
                if *negated { "!=" } else { "=" },
                display_literal(value)
            ),
            Predicate::TextEquals { value, negated } => write!(
                f,
                "text(){}{}",
                if *negated { "!=" } else { "=" },
                display_literal(value)
            ),
            Predicate::Contains { operand, needle } => {
                write!(f, "contains({},{})", operand, display_literal(needle))
            }
            Predicate::StartsWith { operand, prefix } => {
                write!(f, "starts-with({},{})", operand, display_literal(prefix))
            }
            Predicate::And(left, right) => {
                write_operand(f, left)?;
                f.write_str(" and ")?;
                write_operand(f, right)
            }
            Predicate::Or(left, right) => write!(f, "{} or {}", left, right),
            Predicate::Not(inner) => write!(f, "not({})", inner),
        }
    }
}

/// `and` binds tighter than `or`, so an `or` under an `and` needs parentheses.
fn write_operand(f: &mut fmt::Formatter<'_>, predicate: &Predicate) -> fmt::Result {
    if matches!(predicate, Predicate::Or(..)) {
        write!(f, "({})", predicate)
    } else {
        write!(f, "{}", predicate)
    }
}

/// Quotes a value as a path literal.
///
/// Double quotes are preferred; single quotes are used when the value itself
/// contains a double quote. A value containing both cannot be written as a
/// single literal and yields `None`.
///
/// ```
/// use xpathquill::xpath::ast::quote_literal;
///
/// assert_eq!(quote_literal("card").as_deref(), Some("\"card\""));
/// assert_eq!(quote_literal("say \"hi\"").as_deref(), Some("'say \"hi\"'"));
/// assert_eq!(quote_literal("it's \"x\""), None);
/// ```
pub fn quote_literal(value: &str) -> Option<String> {
    if !value.contains('"') {
        Some(format!("\"{}\"", value))
    } else if !value.contains('\'') {
        Some(format!("'{}'", value))
    } else {
        None
    }
}

fn display_literal(value: &str) -> String {
    quote_literal(value).unwrap_or_else(|| format!("\"{}\"", value.replace('"', "'")))
}

/// One tag-matcher-plus-predicates unit of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub test: NameTest,
    pub predicates: Vec<Predicate>,
}

impl Step {
    /// A step matching a literal tag.
    pub fn tag(name: &str) -> Self {
        Self {
            test: NameTest::Tag(name.to_string()),
            predicates: Vec::new(),
        }
    }

    /// A `*` step.
    pub fn any() -> Self {
        Self {
            test: NameTest::Any,
            predicates: Vec::new(),
        }
    }

    /// Appends a predicate and returns the step.
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Returns the ordinal of the first plain `[n]` predicate, if any.
    pub fn ordinal(&self) -> Option<usize> {
        self.predicates.iter().find_map(|p| match p {
            Predicate::Position(n) => Some(*n),
            _ => None,
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.test)?;
        for predicate in &self.predicates {
            write!(f, "[{}]", predicate)?;
        }
        Ok(())
    }
}

/// A complete, compiled path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    pub origin: Origin,
    pub steps: Vec<Step>,
    /// Trailing `@name` selector, if the path selects an attribute value.
    pub attribute: Option<String>,
}

impl PathExpression {
    /// Creates a path with the given origin and steps.
    pub fn new(origin: Origin, steps: Vec<Step>) -> Self {
        Self {
            origin,
            steps,
            attribute: None,
        }
    }

    /// Creates a `/…` path.
    pub fn absolute(steps: Vec<Step>) -> Self {
        Self::new(Origin::Absolute, steps)
    }

    /// Creates a `//…` path.
    pub fn anywhere(steps: Vec<Step>) -> Self {
        Self::new(Origin::Anywhere, steps)
    }

    /// Appends an attribute selector and returns the path.
    pub fn with_attribute(mut self, name: &str) -> Self {
        self.attribute = Some(name.to_string());
        self
    }

    /// Parses and compiles path text.
    ///
    /// ```
    /// use xpathquill::xpath::ast::{PathExpression, Step};
    /// use xpathquill::xpath::segments::Origin;
    ///
    /// let expr = PathExpression::parse("/html/body/div[3]").unwrap();
    /// assert_eq!(expr.origin, Origin::Absolute);
    /// assert_eq!(expr.steps.len(), 3);
    /// assert_eq!(expr.steps[2].ordinal(), Some(3));
    /// assert_eq!(expr.to_string(), "/html/body/div[3]");
    /// ```
    pub fn parse(text: &str) -> Result<Self, XPathError> {
        let parsed = parse_segments(text)?;
        Ok(super::compile::compile(&parsed)?)
    }

    /// Returns the segment texts this expression renders to.
    pub fn segments(&self) -> Vec<String> {
        let mut segments: Vec<String> = self.steps.iter().map(ToString::to_string).collect();
        if let Some(attribute) = &self.attribute {
            segments.push(format!("@{}", attribute));
        }
        segments
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::segments::join(self.origin, &self.segments()))
    }
}
