//! Footer: record range, paging controls and the transient status line.

use crate::browser::{BrowserState, StatusKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

/// Two rows: "Showing A to B of N records" with the page controls, then
/// the current status message (if any).
pub struct Footer<'a> {
    state: &'a BrowserState,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a BrowserState) -> Self {
        Self { state }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let s = self.state;
        let theme = &s.theme;

        if let Some(showing) = s.showing_text() {
            buf.set_string(area.x + 1, area.y, showing, Style::default());
        }

        let pages = s.pagination.map_or(1, |p| p.total_pages.max(1));
        let controls = format!(
            " page {}/{}  size {}  n/p:page  +/-:size ",
            s.page, pages, s.page_size
        );
        let x = area.right().saturating_sub(controls.chars().count() as u16);
        buf.set_string(x, area.y, controls, theme.hint);

        if area.height < 2 {
            return;
        }
        if let Some(status) = &s.status {
            let style = match status.kind {
                StatusKind::Info => theme.status_info,
                StatusKind::Error => theme.status_error,
            };
            let line = Line::from(Span::styled(format!(" {}", status.text), style));
            buf.set_line(area.x, area.y + 1, &line, area.width);
        }
    }
}
