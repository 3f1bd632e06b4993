//! Application shell and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop and
//! tears everything down cleanly on exit or panic. Between frames it drains
//! the [`BrowserState`] request queue against its [`DrugSource`] on a
//! current-thread Tokio runtime.

use crate::{
    browser::{BrowserState, Focus, Request},
    event,
    widgets::{
        command_bar::CommandBar, company_list::CompanyList, drug_table::DrugTable,
        footer::Footer, header::Header, help::HelpPopup,
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use druglist_client::DrugSource;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};

pub struct App<S> {
    state: BrowserState,
    source: S,
    runtime: tokio::runtime::Runtime,
}

impl<S: DrugSource> App<S> {
    pub fn new(source: S, state: BrowserState) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self { state, source, runtime })
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BrowserState {
        &mut self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        self.state.request(Request::Load);
        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.expire_status(Instant::now());
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            // The frame above shows the loading state; fetch before reading keys.
            if self.state.has_pending() {
                self.sync();
                continue;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if matches!(raw, Event::Key(key) if key.kind != KeyEventKind::Press) {
                    continue;
                }
                let app_event = if self.state.focus == Focus::Command {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    self.state.handle(ev);
                }
            }
        }
        Ok(())
    }

    /// Fulfil every queued request against the source.
    pub fn sync(&mut self) {
        for request in self.state.take_requests() {
            tracing::debug!(?request, "fulfilling request");
            match request {
                Request::Load => {
                    match self.runtime.block_on(self.source.table_config()) {
                        Ok(table) => self.state.apply_table_config(table),
                        Err(e) => tracing::warn!(error = %e, "failed to load table config"),
                    }
                    self.load_companies();
                    self.load_page();
                }
                Request::Drugs => {
                    self.load_page();
                }
                Request::Refresh => {
                    self.load_companies();
                    if self.load_page() {
                        self.state.apply_refreshed();
                    }
                }
                Request::Health => {
                    let result = self.runtime.block_on(self.source.health());
                    if let Err(e) = &result {
                        tracing::warn!(error = %e, "health check failed");
                    }
                    self.state.apply_health(result.is_ok());
                }
            }
        }
    }

    fn load_companies(&mut self) {
        match self.runtime.block_on(self.source.companies()) {
            Ok(companies) => self.state.apply_companies(companies),
            Err(e) => tracing::warn!(error = %e, "failed to load companies"),
        }
    }

    fn load_page(&mut self) -> bool {
        let query = self.state.query();
        match self.runtime.block_on(self.source.drugs(&query)) {
            Ok(page) => {
                tracing::debug!(
                    rows = page.data.len(),
                    total = page.pagination.total_records,
                    "page loaded"
                );
                self.state.apply_page(page);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, ?query, "failed to load drugs");
                self.state.apply_load_failure();
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &BrowserState) {
    let area = frame.area();

    // Vertical: 1-line header | body | 2-line footer
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .areas(area);

    let [companies, table] =
        Layout::horizontal([Constraint::Percentage(28), Constraint::Fill(1)]).areas(body);

    frame.render_widget(Header::new(&state.theme), header);
    frame.render_widget(
        CompanyList::new(state, state.focus == Focus::Companies),
        companies,
    );
    frame.render_widget(DrugTable::new(state, state.focus == Focus::Table), table);
    frame.render_widget(Footer::new(state), footer);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
