//! `:` commands.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `refresh` | Reload companies and the current page |
//! | `health` | Probe the backend |
//! | `page <n>` | Jump to page `n` |
//! | `limit <n>` | Set the page size (1–100) |
//! | `company <name>` | Filter by company |
//! | `all` | Clear the company filter |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `help` | Toggle the help popup |

use crate::{
    browser::{BrowserState, Request},
    theme::Theme,
};
use druglist_core::store::MAX_PAGE_SIZE;

/// A parsed, validated command ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Refresh,
    Health,
    Page(u32),
    Limit(u32),
    Company(String),
    All,
    Theme(String),
    Help,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// An empty string returns `Err("")` as a sentinel meaning "close without
    /// acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "refresh" => Ok(Command::Refresh),
            "health" => Ok(Command::Health),
            "help" => Ok(Command::Help),
            "all" => Ok(Command::All),
            "page" => match rest.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(Command::Page(n)),
                _ => Err("usage: page <n>  (n ≥ 1)".to_string()),
            },
            "limit" => match rest.parse::<u32>() {
                Ok(n) if (1..=MAX_PAGE_SIZE).contains(&n) => Ok(Command::Limit(n)),
                Ok(_) => Err(format!("limit must be 1–{MAX_PAGE_SIZE}")),
                Err(_) => Err(format!("usage: limit <1-{MAX_PAGE_SIZE}>")),
            },
            "company" => {
                if rest.is_empty() {
                    Err("usage: company <name>".to_string())
                } else {
                    Ok(Command::Company(rest.to_string()))
                }
            }
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the browser state.
pub fn execute_command(s: &mut BrowserState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Refresh => s.request(Request::Refresh),
        Command::Health => s.request(Request::Health),
        Command::Page(n) => s.set_page(n),
        Command::Limit(n) => s.set_page_size(n),
        Command::Company(name) => s.select_company(Some(name)),
        Command::All => s.select_company(None),
        Command::Theme(name) => s.theme = Theme::by_name(&name),
        Command::Help => s.show_help = !s.show_help,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
