#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

// Left/right border plus one space of padding on each side.
const FRAME_WIDTH: usize = 4;
const OUTER_PADDING_PERCENTAGE: f32 = 0.04;

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let outer_padding =
            (self.window_max_width as f32 * OUTER_PADDING_PERCENTAGE).ceil() as usize;
        let max_line_length = self
            .window_max_width
            .saturating_sub(outer_padding + FRAME_WIDTH)
            .max(1);

        let title = self.message.author.to_string();
        let wrapped = self.message.as_string_lines(max_line_length);

        // The top border embeds the title, so the bubble is never narrower
        // than the title itself.
        let inner_width = wrapped
            .iter()
            .map(|line| return line.chars().count())
            .max()
            .unwrap_or(1)
            .max(title.chars().count() + 1);

        let style = self.style();
        let left_offset = self.left_offset(inner_width + FRAME_WIDTH, outer_padding);

        let mut lines: Vec<Line> = Vec::with_capacity(wrapped.len() + 2);

        let top_filler = "─".repeat(inner_width - title.chars().count() - 1);
        lines.push(self.to_line(format!("╭─ {title} {top_filler}╮"), left_offset, style));

        for text_line in wrapped {
            let filler = " ".repeat(inner_width.saturating_sub(text_line.chars().count()));
            lines.push(self.to_line(format!("│ {text_line}{filler} │"), left_offset, style));
        }

        let bottom_filler = "─".repeat(inner_width + 2);
        lines.push(self.to_line(format!("╰{bottom_filler}╯"), left_offset, style));

        return lines;
    }

    fn style(&self) -> Style {
        if self.message.message_type() == MessageType::Error {
            return Style::default().fg(Color::Red);
        }

        if self.message.author == Author::User {
            return Style::default().fg(Color::Cyan);
        }

        return Style::default();
    }

    fn left_offset(&self, bubble_width: usize, outer_padding: usize) -> usize {
        if self.alignment == BubbleAlignment::Right {
            return self
                .window_max_width
                .saturating_sub(bubble_width + outer_padding);
        }

        return 0;
    }

    fn to_line(&self, text: String, left_offset: usize, style: Style) -> Line<'static> {
        if left_offset == 0 {
            return Line::from(Span::styled(text, style));
        }

        return Line::from(vec![
            Span::from(" ".repeat(left_offset)),
            Span::styled(text, style),
        ]);
    }
}
