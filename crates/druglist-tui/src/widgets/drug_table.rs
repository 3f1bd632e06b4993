//! Drug table pane: one page of the listing.
//!
//! Columns come from the served table config. The top row shows the active
//! company filter as a chip (`x` clears it). `↑`/`↓` move the row cursor,
//! `←`/`→` change page and `Enter` filters by the company of the row under
//! the cursor.

use crate::browser::BrowserState;
use chrono::{DateTime, NaiveDate};
use druglist_core::DrugRow;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{
        Block, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Table, TableState, Widget, Wrap,
    },
};
use std::fmt::Write;

pub struct DrugTable<'a> {
    state: &'a BrowserState,
    focused: bool,
}

impl<'a> DrugTable<'a> {
    pub fn new(state: &'a BrowserState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Widget for DrugTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = self.state;
        let theme = &s.theme;

        let title = match s.pagination {
            Some(p) => format!(" Drugs · page {}/{} ", p.current_page, p.total_pages.max(1)),
            None => " Drugs ".to_string(),
        };
        let block = Block::bordered().title(title).border_style(theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let [chip_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);

        let chip = match &s.company {
            Some(company) => Line::from(vec![
                Span::styled("Company: ", theme.hint),
                Span::styled(format!(" {company} ✕ "), theme.filter_chip),
                Span::styled("  x to clear", theme.hint),
            ]),
            None => Line::from(Span::styled("All Companies", theme.hint)),
        };
        buf.set_line(chip_area.x, chip_area.y, &chip, chip_area.width);

        if let Some(err) = &s.load_error {
            Paragraph::new(err.as_str())
                .style(theme.status_error)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(body, buf);
            return;
        }

        if s.rows.is_empty() {
            let msg = if s.loading { "Loading…".to_string() } else { s.empty_message() };
            Paragraph::new(msg)
                .style(theme.empty)
                .alignment(Alignment::Center)
                .render(body, buf);
            return;
        }

        let columns = &s.table.columns;
        let header = Row::new(columns.iter().map(|c| Cell::from(c.label.clone())))
            .style(theme.table_header);
        let widths: Vec<Constraint> =
            columns.iter().map(|c| Constraint::Fill(c.width.max(1))).collect();
        let rows = s.rows.iter().map(|row| {
            Row::new(
                columns
                    .iter()
                    .map(|c| Cell::from(cell_text(row, &c.id, &s.date_format))),
            )
        });

        // One column on the right for the scrollbar.
        let text_area = Rect { width: body.width.saturating_sub(1), ..body };
        let sb_area = Rect { x: body.right().saturating_sub(1), width: 1, ..body };

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(theme.highlight);
        let mut table_state = TableState::default().with_selected(Some(s.row_cursor));
        StatefulWidget::render(table, text_area, buf, &mut table_state);

        let mut sb_state = ScrollbarState::new(s.rows.len()).position(s.row_cursor);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

/// Text of column `column` for `row`. Unknown columns render empty.
pub fn cell_text(row: &DrugRow, column: &str, date_format: &str) -> String {
    match column {
        "id" => row.id.to_string(),
        "code" => row.code.clone(),
        "name" => row.name.clone(),
        "company" => row.company.clone(),
        "launchDate" => format_launch_date(&row.launch_date, date_format),
        _ => String::new(),
    }
}

/// Render a stored launch date with `format`. Text that is neither RFC 3339
/// nor `YYYY-MM-DD` (or a format chrono rejects) is shown unchanged.
pub fn format_launch_date(raw: &str, format: &str) -> String {
    let mut out = String::new();
    let written = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        write!(out, "{}", dt.format(format))
    } else if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        write!(out, "{}", date.format(format))
    } else {
        return raw.to_string();
    };

    match written {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
