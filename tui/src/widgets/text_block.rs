//! TextBlock Widget
//!
//! A borderless, word-wrapped text region that keeps its tail in view, so a
//! pitch being typed out never scrolls its newest characters off screen.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Block cursor drawn after the text while it is still being revealed
pub const CURSOR: &str = "▌";

/// A borderless text block that follows its last line
pub struct TextBlock<'a> {
    content: &'a str,
    style: Style,
    cursor: Option<Style>,
}

impl<'a> TextBlock<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
            cursor: None,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Draw a cursor after the last character
    pub fn cursor(mut self, style: Style) -> Self {
        self.cursor = Some(style);
        self
    }
}

/// Wrap `content` to `width` columns, keeping blank lines
pub fn wrap_lines(content: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    content
        .split('\n')
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                wrap(line, width)
                    .into_iter()
                    .map(|cow| cow.to_string())
                    .collect()
            }
        })
        .collect()
}

impl Widget for TextBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let wrapped = wrap_lines(self.content, area.width as usize);
        let skip = wrapped.len().saturating_sub(area.height as usize);

        let mut last = (area.x, area.y);
        for (i, line) in wrapped.iter().skip(skip).enumerate() {
            let y = area.y + i as u16;
            buf.set_string(area.x, y, line, self.style);
            last = (area.x + line.width() as u16, y);
        }

        if let Some(style) = self.cursor {
            let (x, y) = last;
            if x < area.right() {
                buf.set_string(x, y, CURSOR, style);
            }
        }
    }
}
