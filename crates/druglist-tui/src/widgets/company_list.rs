//! Company filter pane: "All Companies" followed by every company.
//!
//! `↑`/`k` and `↓`/`j` move the cursor; `Enter` applies the entry under it.
//! The active filter is marked with `●`.

use crate::browser::BrowserState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

pub const ALL_COMPANIES: &str = "All Companies";

pub struct CompanyList<'a> {
    state: &'a BrowserState,
    focused: bool,
}

impl<'a> CompanyList<'a> {
    pub fn new(state: &'a BrowserState, focused: bool) -> Self {
        Self { state, focused }
    }
}

impl Widget for CompanyList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;
        let block = Block::bordered()
            .title(" Filter by Company ")
            .border_style(theme.border(self.focused));

        let active = self.state.company.as_deref();
        let entry = |label: &str, is_active: bool| {
            if is_active {
                ListItem::new(Line::from(vec![
                    Span::styled("● ", theme.filter_active),
                    Span::styled(label.to_string(), theme.filter_active),
                ]))
            } else {
                ListItem::new(Line::from(format!("  {label}")))
            }
        };

        let items: Vec<ListItem> = std::iter::once(entry(ALL_COMPANIES, active.is_none()))
            .chain(
                self.state
                    .companies
                    .iter()
                    .map(|c| entry(c, active == Some(c.as_str()))),
            )
            .collect();

        let list = List::new(items).block(block).highlight_style(theme.highlight);
        let selected = self.focused.then_some(self.state.company_cursor);
        let mut list_state = ListState::default().with_selected(selected);
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}
