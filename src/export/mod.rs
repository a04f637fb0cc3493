//! Copying paths out of the inspector and checking recorded fields.
//!
//! Paths leave the program as plain text or as a `field: path` mapping. The
//! mapping is written as YAML so it can be pasted into scraper configs.

use crate::document::tree::DocumentTree;
use crate::xpath::evaluator::Evaluator;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use thiserror::Error;

/// Longest sample shown in a field report, in characters.
pub const SAMPLE_LIMIT: usize = 100;

#[derive(Debug, Error)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Destination for copied text.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The system clipboard.
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = arboard::Clipboard::new().context("Failed to open system clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

/// In-memory clipboard that keeps everything it receives.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub history: Vec<String>,
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.history.push(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyFormat {
    /// The path text alone.
    #[default]
    Plain,
    /// A `field: path` YAML mapping.
    KeyValue,
}

/// Named paths recorded during a session, in recording order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMappings {
    fields: IndexMap<String, String>,
}

/// How one recorded path fares against the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Matched { count: usize, sample: String },
    NoMatch,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub field: String,
    pub xpath: String,
    pub outcome: FieldOutcome,
}

impl FieldMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) a field. Re-recording keeps the original position.
    pub fn insert(&mut self, field: &str, xpath: &str) {
        self.fields.insert(field.to_string(), xpath.to_string());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.shift_remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the mapping as YAML.
    ///
    /// ```
    /// use indexmap::IndexMap;
    /// use xpathquill::export::FieldMappings;
    ///
    /// let mut fields = FieldMappings::new();
    /// fields.insert("title", "//h1");
    /// fields.insert("price", r#"//*[@id="price"]"#);
    ///
    /// let yaml = fields.to_yaml().unwrap();
    /// assert!(yaml.starts_with("title: //h1\n"));
    /// let back: IndexMap<String, String> = serde_yaml::from_str(&yaml).unwrap();
    /// assert_eq!(back["price"], r#"//*[@id="price"]"#);
    /// ```
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.fields).context("Failed to render field mappings")
    }

    /// Evaluates every recorded path against `tree`.
    pub fn report(&self, tree: &DocumentTree) -> Vec<FieldReport> {
        let evaluator = Evaluator::new(tree);
        self.fields
            .iter()
            .map(|(field, xpath)| {
                let outcome = match evaluator.evaluate(xpath) {
                    Ok(matches) => match matches.primary() {
                        Some(first) => {
                            let text = match &first.value {
                                Some(value) => value.clone(),
                                None => tree.text_content(first.node),
                            };
                            FieldOutcome::Matched {
                                count: matches.len(),
                                sample: sample(&text),
                            }
                        }
                        None => FieldOutcome::NoMatch,
                    },
                    Err(e) => FieldOutcome::Error(e.to_string()),
                };
                FieldReport {
                    field: field.clone(),
                    xpath: xpath.clone(),
                    outcome,
                }
            })
            .collect()
    }
}

fn sample(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "(empty)".to_string()
    } else {
        trimmed.chars().take(SAMPLE_LIMIT).collect()
    }
}

impl std::fmt::Display for FieldReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            FieldOutcome::Matched { count, sample } => {
                write!(f, "{}: {} match(es), e.g. {}", self.field, count, sample)
            }
            FieldOutcome::NoMatch => write!(f, "{}: no match", self.field),
            FieldOutcome::Error(message) => write!(f, "{}: error: {}", self.field, message),
        }
    }
}

/// Produces the text for `format`.
pub fn render(format: CopyFormat, displayed_path: &str, fields: &FieldMappings) -> Result<String> {
    match format {
        CopyFormat::Plain => Ok(displayed_path.to_string()),
        CopyFormat::KeyValue => fields.to_yaml(),
    }
}
