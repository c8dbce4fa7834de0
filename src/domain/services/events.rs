use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => {
                return Some(Event::KeyboardPaste(text));
            }
            CrosstermEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => {
                    return Some(Event::UIScrollUp());
                }
                MouseEventKind::ScrollDown => {
                    return Some(Event::UIScrollDown());
                }
                _ => {
                    return None;
                }
            },
            CrosstermEvent::Key(key_event) => {
                let input: Input = key_event.into();
                match (input.key, input.ctrl) {
                    (Key::Up, _) => {
                        return Some(Event::UIScrollUp());
                    }
                    (Key::Down, _) => {
                        return Some(Event::UIScrollDown());
                    }
                    (Key::PageUp, _) | (Key::Char('u'), true) => {
                        return Some(Event::UIScrollPageUp());
                    }
                    (Key::PageDown, _) | (Key::Char('d'), true) => {
                        return Some(Event::UIScrollPageDown());
                    }
                    (Key::Char('c'), true) => {
                        return Some(Event::KeyboardCTRLC());
                    }
                    (Key::Char('r'), true) => {
                        return Some(Event::KeyboardCTRLR());
                    }
                    (Key::Enter, _) => {
                        return Some(Event::KeyboardEnter());
                    }
                    _ => {
                        return Some(Event::KeyboardCharInput(input));
                    }
                }
            }
            _ => {
                return None;
            }
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None,
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick()),
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
