use anyhow::{anyhow, Context, Result};
use clap::Parser;
use ratatui::{backend::TermionBackend, Terminal};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use termion::input::MouseTerminal;
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;

use xpathquill::analyze::HttpAnalyzer;
use xpathquill::app::AppState;
use xpathquill::config::Config;
use xpathquill::export::{ClipboardSink, MemoryClipboard, SystemClipboard};
use xpathquill::file::loader::{load_html_file, load_html_from_stdin, load_sample_page};
use xpathquill::input::InputHandler;
use xpathquill::logging;
use xpathquill::theme::get_builtin_theme;
use xpathquill::ui::UI;

/// Longest wait for input before the loop services timers.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// XPathQuill - A terminal-based HTML element inspector
#[derive(Parser)]
#[command(name = "xpathquill")]
#[command(version)]
#[command(about = "A terminal-based HTML element inspector that generates XPath expressions", long_about = None)]
struct Cli {
    /// HTML file to inspect, plain or gzipped (omit to read from stdin if piped, or open a sample page)
    file: Option<String>,

    /// Theme name (default: from the config file, else default-dark)
    #[arg(short, long)]
    theme: Option<String>,

    /// Page URL sent with analyze requests
    #[arg(short, long)]
    url: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

/// Set up a panic hook that restores the terminal before displaying panic information.
///
/// This ensures that panics are visible even when the terminal is in raw mode with alternate screen.
fn setup_panic_hook() {
    use std::panic;

    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        default_panic(panic_info);
    }));
}

fn file_url(path: &str) -> String {
    let path = Path::new(path);
    let absolute = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();
    let config = Config::load();

    if let Some(log_file) = cli.log.as_ref().or(config.log_file.as_ref()) {
        logging::init(log_file, &config.log_level)?;
    }

    // Load the page BEFORE terminal setup
    // (stdin might carry the HTML, so it has to be read before taking over the terminal)
    let (tree, filename, stdin_was_piped) = if let Some(file_path) = cli.file {
        let tree = load_html_file(&file_path)?;
        (tree, Some(file_path), false)
    } else if !io::stdin().is_terminal() {
        (load_html_from_stdin()?, None, true)
    } else {
        (load_sample_page()?, None, false)
    };

    let source_url = match (&cli.url, &filename) {
        (Some(url), _) => url.clone(),
        (None, Some(path)) => file_url(path),
        (None, None) => "about:sample".to_string(),
    };

    let clipboard: Box<dyn ClipboardSink> = match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            tracing::warn!("system clipboard unavailable, copies stay in memory: {:#}", e);
            Box::new(MemoryClipboard::default())
        }
    };
    let analyzer = HttpAnalyzer::new(&config.analyze_endpoint, config.analyze_timeout())
        .map_err(|e| anyhow!("Failed to create analyze client: {}", e))?;

    let theme_name = cli.theme.clone().unwrap_or_else(|| config.theme.clone());
    let theme = match get_builtin_theme(&theme_name) {
        Some(theme) => theme,
        None => {
            eprintln!(
                "Warning: Theme '{}' not found, using default-dark",
                theme_name
            );
            get_builtin_theme("default-dark").ok_or_else(|| anyhow!("default-dark theme missing"))?
        }
    };

    let mut input_handler = if stdin_was_piped {
        InputHandler::new_with_tty()
            .context("Failed to open /dev/tty for keyboard input when stdin was piped")?
    } else {
        InputHandler::new()
    };

    let mut state = AppState::new(tree, config, Box::new(analyzer), clipboard);
    if let Some(name) = filename {
        state.set_filename(name);
    }
    state.set_source_url(source_url);

    // Termion can use /dev/tty directly when stdin is piped, no redirection needed
    let stdout = io::stdout()
        .into_raw_mode()
        .context("Failed to enable raw mode")?;
    let stdout = MouseTerminal::from(stdout);
    let stdout = stdout
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;

    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut ui = UI::new(theme);
    tracing::info!("inspecting {}", state.source_url());

    let result = run_event_loop(&mut terminal, &mut ui, &mut input_handler, &mut state);

    // Termion restores the screen and raw mode through Drop guards,
    // but the cursor still has to be shown
    write!(terminal.backend_mut(), "{}", termion::cursor::Show)?;
    terminal.backend_mut().flush()?;

    result
}

fn run_event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    ui: &mut UI,
    input_handler: &mut InputHandler,
    state: &mut AppState,
) -> Result<()> {
    loop {
        if let Some(theme_name) = state.take_pending_theme() {
            ui.set_theme(&theme_name);
        }

        ui.render(terminal, state)?;

        // Wake up in time for a pending path edit
        let timeout = state
            .time_until_due(Instant::now())
            .map_or(POLL_INTERVAL, |due| due.min(POLL_INTERVAL));

        if let Some(event) = input_handler.poll_event(timeout)? {
            let should_quit = input_handler.handle_event(event, state)?;
            if should_quit {
                break;
            }
        }

        // Every pass redraws, so the redraw hint is not needed here
        let _ = state.tick(Instant::now());
    }

    Ok(())
}
