use tui_textarea::Input;

use super::Message;

pub enum Event {
    BackendMessage(Message),
    TranscriptReplaced(Vec<Message>),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLR(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
