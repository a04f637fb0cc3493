//! Inspector state and the interaction state machine.
//!
//! This module provides the `InspectorState` type, which owns everything the
//! inspector shows: the displayed path text, the latest `MatchSet`, the
//! highlight overlay, the breadcrumbs, the floating panel and the pending
//! debounce deadline.
//!
//! The document tree and its on-screen geometry are owned by the host and are
//! passed into every call that needs them. Nothing read from the tree is kept
//! across calls except `NodeId` handles, and those are only used to look
//! things up again.
//!
//! # Example
//!
//! ```
//! use xpathquill::config::Config;
//! use xpathquill::document::parser::parse_html;
//! use xpathquill::inspector::geometry::NoGeometry;
//! use xpathquill::inspector::state::{Disposition, InspectorState};
//!
//! let tree = parse_html(r#"<form id="login"></form><p>a</p><p>b</p>"#).unwrap();
//! let body = tree.body().unwrap();
//! let form = tree[body].children()[0];
//!
//! let mut state = InspectorState::new(&Config::default());
//! assert_eq!(state.click(form, &tree, &NoGeometry), Disposition::Suppressed);
//! assert_eq!(state.path_text(), r#"//*[@id="login"]"#);
//! assert_eq!(state.matches().len(), 1);
//!
//! state.set_path_text("//p");
//! state.confirm(&tree, &NoGeometry);
//! assert_eq!(state.highlights().secondary().len(), 1);
//! assert_eq!(state.message().unwrap().text, "2 matches");
//! ```

use super::debounce::Debouncer;
use super::geometry::{Geometry, Point, Size};
use super::highlight::{Highlight, HighlightSet};
use super::mode::InspectorMode;
use super::panel::{Panel, PanelControl, PanelHit};
use super::selection::SelectionDetails;
use crate::analyze::{render_result, AnalyzeRequest, Analyzer};
use crate::config::Config;
use crate::document::node::NodeId;
use crate::document::tree::DocumentTree;
use crate::export::{self, ClipboardSink, CopyFormat, FieldMappings, FieldReport};
use crate::xpath::breadcrumb::{self, Breadcrumbs};
use crate::xpath::error::XPathError;
use crate::xpath::evaluator::{Evaluator, MatchSet};
use crate::xpath::generator::{PathGenerator, Strategy};
use std::time::Instant;

/// Represents a message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub level: MessageLevel,
}

/// Message severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Whether the host should still run its own handling of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The inspector consumed the click.
    Suppressed,
    /// The inspector ignored the click.
    PassThrough,
}

/// Outcome of the last analyze request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisView {
    Result(String),
    Failed(String),
}

/// State captured when a drag or resize starts.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    resume: InspectorMode,
    offset: Point,
    initial_size: Size,
    initial_pointer: Point,
}

pub struct InspectorState {
    mode: InspectorMode,
    panel: Panel,
    gesture: Option<Gesture>,
    hover: Option<Highlight>,
    path_text: String,
    matches: MatchSet,
    highlights: HighlightSet,
    breadcrumbs: Option<Breadcrumbs>,
    debouncer: Debouncer,
    selection: Option<SelectionDetails>,
    strategy: Option<Strategy>,
    message: Option<Message>,
    analysis: Option<AnalysisView>,
    fields: FieldMappings,
    preview_limit: usize,
    close_requested: bool,
}

impl InspectorState {
    /// Creates an inspector in `Inspecting` mode with an empty path.
    pub fn new(config: &Config) -> Self {
        Self {
            mode: InspectorMode::Inspecting,
            panel: Panel::new(Point::default(), config.panel_size(), config.min_panel_size()),
            gesture: None,
            hover: None,
            path_text: String::new(),
            matches: MatchSet::default(),
            highlights: HighlightSet::new(),
            breadcrumbs: None,
            debouncer: Debouncer::new(config.debounce()),
            selection: None,
            strategy: None,
            message: None,
            analysis: None,
            fields: FieldMappings::new(),
            preview_limit: config.text_preview_limit,
            close_requested: false,
        }
    }

    pub fn mode(&self) -> InspectorMode {
        self.mode
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Moves the panel to the bottom-right corner of a screen.
    pub fn place_panel(&mut self, screen: Size) {
        let x = (screen.width - self.panel.size.width - 1).max(0);
        let y = (screen.height - self.panel.size.height - 2).max(0);
        self.panel.move_to(Point::new(x, y));
    }

    pub fn hover(&self) -> Option<&Highlight> {
        self.hover.as_ref()
    }

    /// The path text as currently displayed, including unconfirmed edits.
    pub fn path_text(&self) -> &str {
        &self.path_text
    }

    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn breadcrumbs(&self) -> Option<&Breadcrumbs> {
        self.breadcrumbs.as_ref()
    }

    pub fn selection(&self) -> Option<&SelectionDetails> {
        self.selection.as_ref()
    }

    /// Strategy of the last generated path.
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    pub fn analysis(&self) -> Option<&AnalysisView> {
        self.analysis.as_ref()
    }

    pub fn fields(&self) -> &FieldMappings {
        &self.fields
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn set_message(&mut self, text: String, level: MessageLevel) {
        self.message = Some(Message { text, level });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Returns true if an edit is waiting for its quiet period to pass.
    pub fn is_edit_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<std::time::Duration> {
        self.debouncer.time_until_due(now)
    }

    /// Returns true once the panel's close control was pressed.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Switches between `Inspecting` and `Paused`. Other modes are left alone.
    pub fn toggle_inspection(&mut self) -> InspectorMode {
        self.mode = match self.mode {
            InspectorMode::Inspecting => {
                self.hover = None;
                InspectorMode::Paused
            }
            InspectorMode::Paused => InspectorMode::Inspecting,
            other => other,
        };
        tracing::debug!("inspector mode is now {}", self.mode);
        self.mode
    }

    /// Handles a pointer press, starting a gesture or running a panel control.
    pub fn pointer_press(&mut self, point: Point) -> PanelHit {
        let hit = self.panel.hit_test(point);
        if self.mode.is_gesture() {
            return hit;
        }
        match hit {
            PanelHit::DragHandle => self.start_gesture(InspectorMode::DraggingPanel, point),
            PanelHit::ResizeHandle => self.start_gesture(InspectorMode::ResizingPanel, point),
            PanelHit::Control(PanelControl::Toggle) => {
                self.toggle_inspection();
            }
            PanelHit::Control(PanelControl::Close) => {
                self.close_requested = true;
            }
            PanelHit::Body | PanelHit::Outside => {}
        }
        hit
    }

    fn start_gesture(&mut self, mode: InspectorMode, point: Point) {
        self.gesture = Some(Gesture {
            resume: self.mode,
            offset: point - self.panel.origin,
            initial_size: self.panel.size,
            initial_pointer: point,
        });
        self.hover = None;
        self.mode = mode;
    }

    /// Moves or resizes the panel while a gesture is active.
    pub fn pointer_move(&mut self, point: Point) {
        let Some(gesture) = self.gesture else {
            return;
        };
        match self.mode {
            InspectorMode::DraggingPanel => self.panel.move_to(point - gesture.offset),
            InspectorMode::ResizingPanel => self
                .panel
                .resize_from(gesture.initial_size, point - gesture.initial_pointer),
            _ => {}
        }
    }

    /// Ends a gesture and returns to the mode it started from.
    pub fn pointer_release(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            self.mode = gesture.resume;
        }
    }

    /// Shows the hover highlight for a document node.
    pub fn pointer_enter(&mut self, node: NodeId, geometry: &dyn Geometry) {
        if self.mode == InspectorMode::Inspecting {
            self.hover = Some(Highlight::at(node, geometry));
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    /// Generates and applies a path for a clicked node.
    pub fn click(
        &mut self,
        node: NodeId,
        tree: &DocumentTree,
        geometry: &dyn Geometry,
    ) -> Disposition {
        if self.mode != InspectorMode::Inspecting {
            return Disposition::PassThrough;
        }
        self.hover = None;

        let generated = PathGenerator::new(tree).generate(node);
        self.selection = Some(SelectionDetails::describe(
            tree,
            node,
            generated.display_attribute.as_deref(),
            self.preview_limit,
        ));
        self.strategy = Some(generated.strategy);
        self.path_text = generated.text();
        self.debouncer.cancel();
        self.apply(tree, geometry);
        Disposition::Suppressed
    }

    /// Replaces the displayed text and (re)starts the quiet period.
    pub fn edit_path(&mut self, text: &str, now: Instant) {
        self.path_text = text.to_string();
        self.debouncer.schedule(now);
    }

    /// Replaces the displayed text without scheduling an evaluation.
    pub fn set_path_text(&mut self, text: &str) {
        self.path_text = text.to_string();
    }

    /// Applies the displayed text once the quiet period has passed.
    ///
    /// Returns true if an evaluation ran.
    pub fn tick(&mut self, now: Instant, tree: &DocumentTree, geometry: &dyn Geometry) -> bool {
        if !self.debouncer.fire_if_due(now) {
            return false;
        }
        self.apply(tree, geometry);
        true
    }

    /// Applies the displayed text immediately, cancelling any pending evaluation.
    pub fn confirm(&mut self, tree: &DocumentTree, geometry: &dyn Geometry) {
        self.debouncer.cancel();
        self.apply(tree, geometry);
    }

    /// Narrows the path through the breadcrumb at `index`.
    ///
    /// Returns false if there is no such crumb or it cannot be activated.
    pub fn activate_breadcrumb(
        &mut self,
        index: usize,
        descendant: bool,
        tree: &DocumentTree,
        geometry: &dyn Geometry,
    ) -> bool {
        let derived = self
            .breadcrumbs
            .as_ref()
            .and_then(|crumbs| crumbs.narrow(index, descendant));
        self.apply_derived(derived, tree, geometry)
    }

    /// Drops the ordinal of the breadcrumb at `index`.
    pub fn remove_ordinal(
        &mut self,
        index: usize,
        tree: &DocumentTree,
        geometry: &dyn Geometry,
    ) -> bool {
        let derived = self
            .breadcrumbs
            .as_ref()
            .and_then(|crumbs| crumbs.remove_ordinal(index));
        self.apply_derived(derived, tree, geometry)
    }

    fn apply_derived(
        &mut self,
        derived: Option<String>,
        tree: &DocumentTree,
        geometry: &dyn Geometry,
    ) -> bool {
        match derived {
            Some(path) => {
                self.path_text = path;
                self.confirm(tree, geometry);
                true
            }
            None => false,
        }
    }

    /// Evaluates the displayed text and refreshes matches, highlights and breadcrumbs.
    fn apply(&mut self, tree: &DocumentTree, geometry: &dyn Geometry) {
        let text = self.path_text.clone();
        match Evaluator::new(tree).evaluate(&text) {
            Ok(matches) => {
                self.highlights.rebuild(&matches, geometry);
                self.matches = matches;
                self.breadcrumbs = breadcrumb::build(&text).ok();
                let message = match self.matches.len() {
                    0 => "No match".to_string(),
                    1 => "1 match".to_string(),
                    n => format!("{} matches", n),
                };
                self.set_message(message, MessageLevel::Info);
            }
            Err(XPathError::Parse(e)) => {
                // Keep showing the last good result until the text parses again.
                self.set_message(format!("Invalid path: {}", e), MessageLevel::Error);
            }
            Err(XPathError::Eval(e)) => {
                self.matches = MatchSet::default();
                self.highlights.clear();
                self.breadcrumbs = breadcrumb::build(&text).ok();
                self.set_message(e.to_string(), MessageLevel::Error);
            }
        }
    }

    /// Sends the displayed path to the analyze service.
    ///
    /// The path, matches and highlights are never changed by this call.
    pub fn analyze(&mut self, analyzer: &dyn Analyzer, source_url: &str) {
        if self.path_text.trim().is_empty() {
            self.set_message("Nothing to analyze".to_string(), MessageLevel::Warning);
            return;
        }
        let request = AnalyzeRequest {
            xpath: self.path_text.clone(),
            url: source_url.to_string(),
            context: self.selection.as_ref().map(|s| s.tag.clone()),
        };
        match analyzer.analyze(&request) {
            Ok(value) => {
                self.analysis = Some(AnalysisView::Result(render_result(&value)));
                self.set_message("Analysis complete".to_string(), MessageLevel::Info);
            }
            Err(e) => {
                tracing::warn!("analyze failed: {}", e);
                self.analysis = Some(AnalysisView::Failed(e.to_string()));
                self.set_message(e.to_string(), MessageLevel::Error);
            }
        }
    }

    /// Copies the displayed path (or the recorded fields) to a clipboard.
    pub fn copy_path(&mut self, sink: &mut dyn ClipboardSink, format: CopyFormat) -> bool {
        if format == CopyFormat::Plain && self.path_text.is_empty() {
            self.set_message("Nothing to copy".to_string(), MessageLevel::Warning);
            return false;
        }
        if format == CopyFormat::KeyValue && self.fields.is_empty() {
            self.set_message("No fields recorded".to_string(), MessageLevel::Warning);
            return false;
        }

        let copied = export::render(format, &self.path_text, &self.fields)
            .map_err(|e| e.to_string())
            .and_then(|text| sink.set_text(&text).map_err(|e| e.to_string()));
        match copied {
            Ok(()) => {
                let what = match format {
                    CopyFormat::Plain => "path".to_string(),
                    CopyFormat::KeyValue => format!("{} field(s)", self.fields.len()),
                };
                self.set_message(format!("Copied {}", what), MessageLevel::Info);
                true
            }
            Err(e) => {
                self.set_message(e, MessageLevel::Error);
                false
            }
        }
    }

    /// Records the displayed path under a field name.
    pub fn capture_field(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            self.set_message("Field name cannot be empty".to_string(), MessageLevel::Error);
            return false;
        }
        if self.path_text.trim().is_empty() {
            self.set_message("No path to record".to_string(), MessageLevel::Warning);
            return false;
        }
        self.fields.insert(name, self.path_text.trim());
        self.set_message(format!("Recorded field '{}'", name), MessageLevel::Info);
        true
    }

    /// Forgets a recorded field, returning its path.
    pub fn forget_field(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name.trim())
    }

    pub fn field_report(&self, tree: &DocumentTree) -> Vec<FieldReport> {
        self.fields.report(tree)
    }
}
