//! Browsing state machine.
//!
//! [`BrowserState`] holds everything the screen shows and reacts to
//! [`AppEvent`]s without doing any I/O. Actions that need the backend queue a
//! [`Request`]; the [`App`](crate::App) drains the queue, calls the
//! [`DrugSource`](druglist_client::DrugSource) and feeds the results back via
//! the `apply_*` methods.

use crate::{
    commands::{execute_command, Command},
    event::{AppEvent, Direction},
    theme::Theme,
    widgets::command_bar::CommandBarState,
};
use druglist_core::{config::UiConfig, DrugPage, DrugQuery, DrugRow, Pagination, TableConfig};
use std::time::{Duration, Instant};

/// Page size presets cycled with `+` / `-`.
pub const PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// How long a status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

pub const LOAD_FAILED: &str =
    "Failed to fetch data. Please make sure the backend server is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Companies,
    Table,
    /// Vim-style `:` command line is active.
    Command,
}

/// Backend work queued by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Table layout, companies and the current page.
    Load,
    /// The current page only.
    Drugs,
    /// Companies and the current page, then confirm with a status message.
    Refresh,
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub shown_at: Instant,
}

// ---------------------------------------------------------------------------
// BrowserState
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct BrowserState {
    pub table: TableConfig,
    pub companies: Vec<String>,
    /// Cursor in the company pane; 0 is "All Companies".
    pub company_cursor: usize,
    /// Active company filter.
    pub company: Option<String>,
    pub page: u32,
    pub page_size: u32,
    pub rows: Vec<DrugRow>,
    pub pagination: Option<Pagination>,
    pub row_cursor: usize,
    pub loading: bool,
    pub load_error: Option<String>,
    pub status: Option<StatusMessage>,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub theme: Theme,
    /// chrono format for the launch date column.
    pub date_format: String,
    pub quit: bool,
    pending: Vec<Request>,
}

impl BrowserState {
    pub fn new(ui: &UiConfig, theme: Theme) -> Self {
        Self {
            table: TableConfig::default(),
            companies: Vec::new(),
            company_cursor: 0,
            company: None,
            page: 1,
            page_size: ui.page_size.max(1),
            rows: Vec::new(),
            pagination: None,
            row_cursor: 0,
            loading: false,
            load_error: None,
            status: None,
            focus: Focus::Table,
            prev_focus: Focus::Table,
            show_help: false,
            command_bar: CommandBarState::default(),
            theme,
            date_format: ui.date_format.clone(),
            quit: false,
            pending: Vec::new(),
        }
    }

    /// Query for the page currently on screen.
    pub fn query(&self) -> DrugQuery {
        let query = DrugQuery::new()
            .page(i64::from(self.page))
            .limit(i64::from(self.page_size));
        match &self.company {
            Some(company) => query.company(company.as_str()),
            None => query,
        }
    }

    // -----------------------------------------------------------------------
    // Request queue
    // -----------------------------------------------------------------------

    /// Queue backend work. Duplicate requests collapse.
    pub fn request(&mut self, request: Request) {
        if !self.pending.contains(&request) {
            tracing::debug!(?request, "queued request");
            self.pending.push(request);
        }
        if request != Request::Health {
            self.loading = true;
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.pending)
    }

    // -----------------------------------------------------------------------
    // Status line
    // -----------------------------------------------------------------------

    pub fn info(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), StatusKind::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), StatusKind::Error);
    }

    fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status = Some(StatusMessage { text, kind, shown_at: Instant::now() });
    }

    /// Drop the status message once it is older than [`STATUS_TTL`].
    pub fn expire_status(&mut self, now: Instant) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.shown_at) >= STATUS_TTL)
        {
            self.status = None;
        }
    }

    // -----------------------------------------------------------------------
    // Backend results
    // -----------------------------------------------------------------------

    pub fn apply_table_config(&mut self, table: TableConfig) {
        self.page_size = self.page_size.clamp(1, table.settings.max_page_size.max(1));
        self.table = table;
    }

    pub fn apply_companies(&mut self, companies: Vec<String>) {
        self.companies = companies;
        self.company_cursor = self.company_position();
    }

    pub fn apply_page(&mut self, page: DrugPage) {
        self.page = page.pagination.current_page.max(1);
        self.pagination = Some(page.pagination);
        self.rows = page.data;
        self.row_cursor = self.row_cursor.min(self.rows.len().saturating_sub(1));
        self.loading = false;
        self.load_error = None;
    }

    pub fn apply_load_failure(&mut self) {
        self.rows.clear();
        self.pagination = None;
        self.row_cursor = 0;
        self.loading = false;
        self.load_error = Some(LOAD_FAILED.to_string());
    }

    pub fn apply_health(&mut self, ok: bool) {
        if ok {
            self.info("Health: OK");
        } else {
            self.error("Backend not reachable");
        }
    }

    pub fn apply_refreshed(&mut self) {
        self.info("Data refreshed");
    }

    // -----------------------------------------------------------------------
    // Filtering and paging
    // -----------------------------------------------------------------------

    /// Apply (or with `None`, clear) the company filter and reload page 1.
    pub fn select_company(&mut self, company: Option<String>) {
        tracing::debug!(?company, "company filter");
        self.company = company.filter(|c| !c.is_empty());
        self.company_cursor = self.company_position();
        self.page = 1;
        self.row_cursor = 0;
        self.request(Request::Drugs);
    }

    pub fn clear_filter(&mut self) {
        if self.company.is_some() {
            self.select_company(None);
        }
    }

    /// Position of the active filter in the company pane.
    fn company_position(&self) -> usize {
        self.company
            .as_ref()
            .and_then(|c| self.companies.iter().position(|x| x == c))
            .map_or(0, |i| i + 1)
    }

    /// Jump to page `n`, clamped to the known page count.
    pub fn set_page(&mut self, n: u32) {
        let last = self.pagination.map_or(0, |p| p.total_pages);
        let n = if last > 0 { n.clamp(1, last) } else { n.max(1) };
        if n != self.page {
            self.page = n;
            self.row_cursor = 0;
            self.request(Request::Drugs);
        }
    }

    pub fn next_page(&mut self) {
        if self.pagination.is_some_and(|p| self.page < p.total_pages) {
            self.set_page(self.page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.set_page(self.page - 1);
        }
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = size.clamp(1, self.table.settings.max_page_size.max(1));
        self.page = 1;
        self.row_cursor = 0;
        self.request(Request::Drugs);
    }

    /// Step through [`PAGE_SIZES`], wrapping at either end.
    pub fn cycle_page_size(&mut self, up: bool) {
        let next = if up {
            PAGE_SIZES
                .iter()
                .copied()
                .find(|&s| s > self.page_size)
                .unwrap_or(PAGE_SIZES[0])
        } else {
            PAGE_SIZES
                .iter()
                .rev()
                .copied()
                .find(|&s| s < self.page_size)
                .unwrap_or(PAGE_SIZES[PAGE_SIZES.len() - 1])
        };
        self.set_page_size(next);
    }

    // -----------------------------------------------------------------------
    // Derived display text
    // -----------------------------------------------------------------------

    /// "Showing A to B of N records", once a page has loaded.
    pub fn showing_text(&self) -> Option<String> {
        self.pagination.map(|p| {
            format!(
                "Showing {} to {} of {} records",
                p.first_record(),
                p.last_record(),
                p.total_records
            )
        })
    }

    pub fn empty_message(&self) -> String {
        match &self.company {
            Some(company) => format!("No drugs found for company \"{company}\"."),
            None => "No drugs found.".to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // Event handling
    // -----------------------------------------------------------------------

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        if self.focus == Focus::Command {
            self.handle_command_mode(event);
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::FocusNext => {
                self.focus = match self.focus {
                    Focus::Companies => Focus::Table,
                    Focus::Table | Focus::Command => Focus::Companies,
                };
                tracing::debug!(focus = ?self.focus, "focus cycle");
            }
            AppEvent::FocusFilter => {
                self.focus = Focus::Companies;
                self.info("Moved to filter");
            }
            AppEvent::Refresh => self.request(Request::Refresh),
            AppEvent::Health => self.request(Request::Health),
            AppEvent::ClearFilter => self.clear_filter(),
            AppEvent::NextPage => self.next_page(),
            AppEvent::PrevPage => self.prev_page(),
            AppEvent::PageSizeUp => self.cycle_page_size(true),
            AppEvent::PageSizeDown => self.cycle_page_size(false),
            AppEvent::Nav(direction) => self.navigate(direction),
            AppEvent::Enter => self.activate(),
            AppEvent::Char(_) | AppEvent::Backspace | AppEvent::Escape | AppEvent::Resize(..) => {}
        }
    }

    fn handle_command_mode(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Quit => self.quit = true,
            AppEvent::Enter => {
                let input = self.command_bar.input.clone();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        execute_command(self, cmd);
                    }
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    // Bar stays open showing the error
                    Err(msg) => self.command_bar.error = Some(msg),
                }
            }
            other => self.command_bar.handle(&other),
        }
    }

    fn navigate(&mut self, direction: Direction) {
        match (self.focus, direction) {
            (Focus::Companies, Direction::Up) => {
                self.company_cursor = self.company_cursor.saturating_sub(1);
            }
            (Focus::Companies, Direction::Down) => {
                // +1 for the "All Companies" entry
                self.company_cursor = (self.company_cursor + 1).min(self.companies.len());
            }
            (Focus::Table, Direction::Up) => {
                self.row_cursor = self.row_cursor.saturating_sub(1);
            }
            (Focus::Table, Direction::Down) => {
                self.row_cursor = (self.row_cursor + 1).min(self.rows.len().saturating_sub(1));
            }
            (Focus::Table, Direction::Left) => self.prev_page(),
            (Focus::Table, Direction::Right) => self.next_page(),
            _ => {}
        }
    }

    fn activate(&mut self) {
        match self.focus {
            Focus::Companies => {
                let company = self
                    .company_cursor
                    .checked_sub(1)
                    .and_then(|i| self.companies.get(i))
                    .cloned();
                self.select_company(company);
            }
            Focus::Table => {
                if let Some(row) = self.rows.get(self.row_cursor) {
                    let company = row.company.clone();
                    self.select_company(Some(company));
                }
            }
            Focus::Command => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
