//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so the browser state never touches crossterm.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `→`               | `Nav(Left)` / `Nav(Right)` |
//! | `n`, `PageDown`         | `NextPage`                 |
//! | `p`, `PageUp`           | `PrevPage`                 |
//! | `+`, `=`                | `PageSizeUp`               |
//! | `-`                     | `PageSizeDown`             |
//! | `r`                     | `Refresh`                  |
//! | `h`                     | `Health`                   |
//! | `f`                     | `FocusFilter`              |
//! | `x`                     | `ClearFilter`              |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | `Esc`                   | `Escape`                   |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! While the command bar is open the event loop calls [`to_app_event_insert`]
//! instead: every printable character is forwarded as `Char`, arrows still
//! move the text cursor, and only `Ctrl+c`, `Escape`, `Enter`, `Tab` and
//! `Backspace` keep their special bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cursor direction for list, table and text-cursor navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane.
    FocusNext,
    /// Move the cursor of the focused pane.
    Nav(Direction),
    NextPage,
    PrevPage,
    /// Step the page size up through the size presets.
    PageSizeUp,
    /// Step the page size down through the size presets.
    PageSizeDown,
    /// Reload companies and the current page.
    Refresh,
    /// Probe the backend health endpoint.
    Health,
    /// Jump to the company filter pane.
    FocusFilter,
    /// Drop the active company filter.
    ClearFilter,
    /// A printable character forwarded to the active text input.
    Char(char),
    Backspace,
    /// Confirm the active input or select the item under the cursor.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (command bar, help popup).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let plain = key.modifiers == Mod::NONE;
    // `+` is shifted on most layouts
    let typed = plain || key.modifiers == Mod::SHIFT;

    match key.code {
        Char('q') if plain => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if plain => Some(AppEvent::FocusNext),

        Up | Char('k') if plain => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if plain => Some(AppEvent::Nav(Direction::Down)),
        Left if plain => Some(AppEvent::Nav(Direction::Left)),
        Right if plain => Some(AppEvent::Nav(Direction::Right)),

        Char('n') if plain => Some(AppEvent::NextPage),
        Char('p') if plain => Some(AppEvent::PrevPage),
        PageDown => Some(AppEvent::NextPage),
        PageUp => Some(AppEvent::PrevPage),

        Char('+') | Char('=') if typed => Some(AppEvent::PageSizeUp),
        Char('-') if plain => Some(AppEvent::PageSizeDown),

        Char('r') if plain => Some(AppEvent::Refresh),
        Char('h') if plain => Some(AppEvent::Health),
        Char('f') if plain => Some(AppEvent::FocusFilter),
        Char('x') if plain => Some(AppEvent::ClearFilter),

        Char(c) if typed => Some(AppEvent::Char(c)),

        Backspace if plain => Some(AppEvent::Backspace),
        Enter if plain => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
