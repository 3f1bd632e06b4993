//! Header bar: the title strip at the top of the screen.

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

pub const TITLE: &str = "Drug Information";

/// One-line title bar with key hints right-aligned in the same row.
pub struct Header<'a> {
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.theme.header_title);
        buf.set_string(area.x + 1, area.y, TITLE, self.theme.header_title);

        let hint = " r:refresh  h:health  f:filter  ?:help  q:quit ";
        let hint_width = hint.chars().count() as u16;
        // Drop the hints rather than overwrite the title on narrow terminals
        if area.width > hint_width + TITLE.len() as u16 + 2 {
            let hint_x = area.right().saturating_sub(hint_width);
            buf.set_string(hint_x, area.y, hint, self.theme.header_title.patch(self.theme.hint));
        }
    }
}
