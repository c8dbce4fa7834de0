#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Message;

struct BubbleCacheEntry<'a> {
    content: String,
    lines: Vec<Line<'a>>,
}

/// Renders the transcript as a stack of bubbles. Entries are cached per
/// index, but the transcript is replaced wholesale after every exchange, so
/// an entry is only reused while the message at its index is unchanged.
pub struct BubbleList<'a> {
    cache: HashMap<usize, BubbleCacheEntry<'a>>,
    line_width: usize,
    lines_len: usize,
}

impl<'a> BubbleList<'a> {
    pub fn new() -> BubbleList<'a> {
        return BubbleList {
            cache: HashMap::new(),
            line_width: 0,
            lines_len: 0,
        };
    }

    pub fn set_messages(&mut self, messages: &[Message], line_width: u16) {
        if self.line_width != line_width as usize {
            self.cache.clear();
            self.line_width = line_width as usize;
        }

        self.cache.retain(|idx, _| return *idx < messages.len());

        self.lines_len = messages
            .iter()
            .enumerate()
            .map(|(idx, message)| {
                if let Some(cache_entry) = self.cache.get(&idx) {
                    if cache_entry.content == message.content {
                        return cache_entry.lines.len();
                    }
                }

                let mut align = BubbleAlignment::Left;
                if message.author == Author::User {
                    align = BubbleAlignment::Right;
                }

                let bubble_lines = Bubble::new(message, align, self.line_width).as_lines();
                let bubble_lines_len = bubble_lines.len();

                self.cache.insert(
                    idx,
                    BubbleCacheEntry {
                        content: message.content.to_string(),
                        lines: bubble_lines,
                    },
                );

                return bubble_lines_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();

        let lines: Vec<Line<'a>> = indexes
            .iter()
            .flat_map(|idx| {
                return self.cache.get(idx).unwrap().lines.to_owned();
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
