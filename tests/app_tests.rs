use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use xpathquill::analyze::{AnalyzeError, AnalyzeRequest, Analyzer};
use xpathquill::app::mode::AppMode;
use xpathquill::app::{AppState, PointerButton};
use xpathquill::config::Config;
use xpathquill::export::{ClipboardError, ClipboardSink};
use xpathquill::file::loader::load_sample_page;
use xpathquill::input::handler::handle_input;
use xpathquill::input::InputEvent;
use xpathquill::inspector::geometry::Point;
use xpathquill::theme::get_builtin_theme;
use xpathquill::ui::UI;

struct Recording(Rc<RefCell<Vec<AnalyzeRequest>>>);

impl Analyzer for Recording {
    fn analyze(&self, request: &AnalyzeRequest) -> Result<serde_json::Value, AnalyzeError> {
        self.0.borrow_mut().push(request.clone());
        Ok(serde_json::json!({"mappings": [{"field": "price"}]}))
    }
}

#[derive(Clone, Default)]
struct Clipboard(Rc<RefCell<Vec<String>>>);

impl ClipboardSink for Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct Harness {
    state: AppState,
    ui: UI,
    terminal: Terminal<TestBackend>,
    requests: Rc<RefCell<Vec<AnalyzeRequest>>>,
    clipboard: Clipboard,
}

impl Harness {
    fn new() -> Self {
        let requests: Rc<RefCell<Vec<AnalyzeRequest>>> = Rc::default();
        let clipboard = Clipboard::default();
        let mut state = AppState::new(
            load_sample_page().unwrap(),
            Config::default(),
            Box::new(Recording(Rc::clone(&requests))),
            Box::new(clipboard.clone()),
        );
        state.set_source_url("https://shop.example".to_string());
        let mut harness = Self {
            state,
            ui: UI::new(get_builtin_theme("default-dark").unwrap()),
            terminal: Terminal::new(TestBackend::new(120, 40)).unwrap(),
            requests,
            clipboard,
        };
        harness.render();
        harness
    }

    fn render(&mut self) {
        self.ui.render(&mut self.terminal, &mut self.state).unwrap();
    }

    fn send(&mut self, input: InputEvent) -> bool {
        let quit = handle_input(input, &mut self.state);
        self.render();
        quit
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(InputEvent::InsertCharacter(c));
        }
    }

    fn command(&mut self, line: &str) -> bool {
        self.send(InputEvent::EnterCommandMode);
        self.type_text(line);
        self.send(InputEvent::InsertEnter)
    }

    fn path(&self) -> String {
        self.state.inspector().unwrap().path_text().to_string()
    }

    fn matches(&self) -> usize {
        self.state.inspector().unwrap().matches().len()
    }

    fn row_of(&self, label: &str) -> usize {
        self.state
            .outline()
            .lines()
            .iter()
            .position(|line| line.label == label)
            .unwrap()
    }

    fn screen(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let width = buffer.area().width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[test]
fn test_select_edit_and_record_fields() {
    let mut h = Harness::new();

    let form = h.row_of("<form#login>");
    h.state.move_cursor(form as isize);
    h.send(InputEvent::Select);
    assert_eq!(h.path(), r#"//*[@id="login"]"#);
    assert_eq!(h.matches(), 1);
    assert!(!h.command("field login"));

    // edits apply after the quiet period
    h.send(InputEvent::EditPath);
    h.type_text("/input");
    assert_eq!(h.path(), r#"//*[@id="login"]/input"#);
    assert_eq!(h.matches(), 1);
    h.state.tick(Instant::now() + Duration::from_secs(2));
    h.render();
    assert_eq!(h.matches(), 2);
    h.send(InputEvent::ExitMode);
    assert_eq!(h.state.mode(), AppMode::Normal);
    assert!(!h.command("field inputs"));

    h.send(InputEvent::FieldReport);
    let screen = h.screen();
    assert!(screen.contains("login: 1 match(es)"), "{}", screen);
    assert!(screen.contains("inputs: 2 match(es)"), "{}", screen);

    h.send(InputEvent::CopyFields);
    let copied = h.clipboard.0.borrow().last().cloned().unwrap();
    assert!(copied.starts_with("login: "), "{}", copied);
    assert!(copied.contains("inputs: "), "{}", copied);
}

#[test]
fn test_breadcrumb_keys_narrow_the_path() {
    let mut h = Harness::new();

    let price = h.row_of("<span.price>");
    h.state.move_cursor(price as isize);
    h.send(InputEvent::Select);
    assert_eq!(h.path(), "/html/body/main/div[1]/span");
    assert_eq!(h.matches(), 1);

    h.state.remove_ordinal(3);
    h.render();
    assert_eq!(h.path(), "/html/body/main/div/span");
    assert_eq!(h.matches(), 3);

    h.send(InputEvent::NarrowCrumb(2));
    assert_eq!(h.path(), "/html/body/main");

    h.send(InputEvent::DescendCrumb(2));
    assert_eq!(h.path(), "//main");
    assert_eq!(h.matches(), 1);
}

#[test]
fn test_analyze_sends_displayed_path() {
    let mut h = Harness::new();
    let main = h.row_of("<main#content>");
    h.state.move_cursor(main as isize);
    h.send(InputEvent::Select);
    h.send(InputEvent::Analyze);

    let requests = h.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].xpath, r#"//*[@id="content"]"#);
    assert_eq!(requests[0].url, "https://shop.example");
    assert_eq!(requests[0].context.as_deref(), Some("main"));
    drop(requests);

    assert!(h.screen().contains("Analysis:"));
    assert_eq!(h.path(), r#"//*[@id="content"]"#);
}

#[test]
fn test_clicks_on_outline_and_panel() {
    let mut h = Harness::new();
    let rect = h.state.inspector().unwrap().panel().rect();

    // a press on the title bar drags the panel instead of clicking the outline
    let grab = Point::new(rect.x + 2, rect.y);
    h.state.pointer_press(grab, PointerButton::Primary);
    h.state.pointer_hold(grab + Point::new(-10, -3));
    h.state.pointer_release();
    let moved = h.state.inspector().unwrap().panel().rect();
    assert_eq!((moved.x, moved.y), (rect.x - 10, rect.y - 3));
    assert!(h.path().is_empty());

    let title = h.row_of("<title>");
    h.state.pointer_press(Point::new(4, title as i32), PointerButton::Primary);
    h.render();
    assert_eq!(h.path(), "/html/head/title");
    assert_eq!(h.state.cursor(), title);
}

#[test]
fn test_quit_from_normal_mode_only() {
    let mut h = Harness::new();
    h.send(InputEvent::EditPath);
    assert!(!h.send(InputEvent::InsertCharacter('q')));
    h.send(InputEvent::ExitMode);
    assert!(h.send(InputEvent::Quit));
}
