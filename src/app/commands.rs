//! `:` command lines.
//!
//! Breadcrumb numbers are 1-based as typed; `Command` stores them 0-based.
//!
//! ```
//! use xpathquill::app::commands::Command;
//!
//! assert_eq!(Command::parse("crumb 2"), Ok(Command::Narrow(1)));
//! assert_eq!(Command::parse(" field title "), Ok(Command::Field("title".into())));
//! assert!(Command::parse("crumb 0").is_err());
//! ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Record the displayed path under a name.
    Field(String),
    /// Forget a recorded field.
    Unfield(String),
    /// Check every recorded field against the document.
    Fields,
    /// Write the recorded fields to a YAML file.
    Write(String),
    Narrow(usize),
    Descend(usize),
    RemoveOrdinal(usize),
    /// Start or stop the inspector.
    Inspect,
    /// List the built-in themes.
    Themes,
    Theme(String),
    /// Set the page URL sent along with analyze requests.
    Url(String),
    Mouse(bool),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, argument) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match (name, argument) {
            ("q" | "quit", "") => Command::Quit,
            ("fields", "") => Command::Fields,
            ("inspect", "") => Command::Inspect,
            ("theme", "") => Command::Themes,
            ("field", name) if !name.is_empty() => Command::Field(name.to_string()),
            ("unfield", name) if !name.is_empty() => Command::Unfield(name.to_string()),
            ("w" | "write", path) if !path.is_empty() => Command::Write(path.to_string()),
            ("theme", theme) => Command::Theme(theme.to_string()),
            ("url", url) if !url.is_empty() => Command::Url(url.to_string()),
            ("crumb", n) => Command::Narrow(crumb_index(n)?),
            ("descend", n) => Command::Descend(crumb_index(n)?),
            ("unordinal", n) => Command::RemoveOrdinal(crumb_index(n)?),
            ("set", "mouse") => Command::Mouse(true),
            ("set", "nomouse") => Command::Mouse(false),
            ("", "") => return Err("Empty command".to_string()),
            _ => return Err(format!("Unknown command: {}", line)),
        };
        Ok(command)
    }
}

fn crumb_index(argument: &str) -> Result<usize, String> {
    match argument.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("Expected a breadcrumb number, got '{}'", argument)),
    }
}
