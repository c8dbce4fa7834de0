use anyhow::bail;
use anyhow::Result;
use test_utils::billing_reply_fixture;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::TurnRequest;
use crate::domain::services::actions::TURN_FAILED_NOTICE;
use crate::domain::services::BubbleList;
use crate::domain::services::Scroll;

impl Default for AppState<'static> {
    fn default() -> AppState<'static> {
        return AppState {
            bubble_list: BubbleList::new(),
            last_known_height: 40,
            last_known_width: 100,
            messages: vec![],
            scroll: Scroll::default(),
            thread_id: "11111111-2222-3333-4444-555555555555".to_string(),
            waiting_for_backend: false,
        };
    }
}

fn to_turn(action: Option<Action>) -> Result<TurnRequest> {
    match action.unwrap() {
        Action::BackendRequest(turn) => return Ok(turn),
        _ => bail!("Wrong type from recv"),
    }
}

#[test]
fn it_appends_exactly_one_optimistic_message() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    let submitted = app_state.submit("  요금제 종류 알려줘  ", &tx)?;

    assert!(submitted);
    assert_eq!(app_state.messages.len(), 1);
    assert_eq!(app_state.messages[0].author, Author::User);
    assert_eq!(app_state.messages[0].content, "요금제 종류 알려줘");
    assert!(app_state.waiting_for_backend);

    let turn = to_turn(rx.blocking_recv())?;
    assert_eq!(turn.message, "요금제 종류 알려줘");
    assert_eq!(turn.thread_id, app_state.thread_id);

    return Ok(());
}

#[test]
fn it_rejects_submits_while_turn_in_flight() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    app_state.submit("2월 요금 알려줘", &tx)?;
    to_turn(rx.blocking_recv())?;

    let submitted = app_state.submit("아직 안 왔어?", &tx)?;

    assert!(!submitted);
    assert_eq!(app_state.messages.len(), 1);
    assert!(app_state.waiting_for_backend);
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[test]
fn it_rejects_empty_and_whitespace_input() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    assert!(!app_state.submit("", &tx)?);
    assert!(!app_state.submit("   \n  ", &tx)?);
    assert!(app_state.messages.is_empty());
    assert!(!app_state.waiting_for_backend);
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[test]
fn it_replaces_state_with_server_transcript() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();
    app_state.add_message(Message::new_with_type(
        Author::Assistant,
        MessageType::Error,
        TURN_FAILED_NOTICE,
    ));

    app_state.submit("요금제 종류 알려줘", &tx)?;
    to_turn(rx.blocking_recv())?;

    let transcript = vec![
        Message::new(Author::User, "요금제 종류 알려줘"),
        Message::new(Author::Assistant, billing_reply_fixture()),
    ];
    app_state.handle_transcript(transcript);

    assert_eq!(app_state.messages.len(), 2);
    assert_eq!(app_state.messages[0].author, Author::User);
    assert_eq!(app_state.messages[0].content, "요금제 종류 알려줘");
    assert_eq!(app_state.messages[1].author, Author::Assistant);
    assert_eq!(app_state.messages[1].content, billing_reply_fixture());
    assert!(!app_state.waiting_for_backend);

    return Ok(());
}

#[test]
fn it_appends_a_single_notice_on_failure() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    app_state.submit("2월 요금 알려줘", &tx)?;
    to_turn(rx.blocking_recv())?;

    app_state.handle_backend_message(Message::new_with_type(
        Author::Assistant,
        MessageType::Error,
        TURN_FAILED_NOTICE,
    ));

    assert_eq!(app_state.messages.len(), 2);
    assert_eq!(app_state.messages[0].author, Author::User);
    assert_eq!(app_state.messages[0].content, "2월 요금 알려줘");
    assert_eq!(app_state.messages[1].author, Author::Assistant);
    assert_eq!(app_state.messages[1].content, TURN_FAILED_NOTICE);
    assert_eq!(app_state.messages[1].message_type(), MessageType::Error);
    assert!(!app_state.waiting_for_backend);

    // A failed turn lands back in idle, so resending works immediately.
    assert!(app_state.submit("2월 요금 알려줘", &tx)?);

    return Ok(());
}

#[test]
fn it_keeps_the_thread_token_stable_across_turns() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();

    app_state.submit("요금제 종류 알려줘", &tx)?;
    let first = to_turn(rx.blocking_recv())?;

    app_state.handle_transcript(vec![
        Message::new(Author::User, "요금제 종류 알려줘"),
        Message::new(Author::Assistant, billing_reply_fixture()),
    ]);

    app_state.submit("프로로 바꿔줘", &tx)?;
    let second = to_turn(rx.blocking_recv())?;

    assert_eq!(first.thread_id, app_state.thread_id);
    assert_eq!(second.thread_id, app_state.thread_id);

    return Ok(());
}

#[test]
fn it_finds_the_last_user_turn() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = AppState::default();
    assert_eq!(app_state.last_user_turn(), None);

    app_state.submit("요금제 종류 알려줘", &tx)?;
    app_state.handle_backend_message(Message::new_with_type(
        Author::Assistant,
        MessageType::Error,
        TURN_FAILED_NOTICE,
    ));

    assert_eq!(
        app_state.last_user_turn(),
        Some("요금제 종류 알려줘".to_string())
    );

    return Ok(());
}

mod handle_slash_commands {
    use super::*;

    #[test]
    fn it_breaks_on_quit() {
        let mut app_state = AppState::default();
        let (should_break, handled) = app_state.handle_slash_commands("/q");

        assert!(should_break);
        assert!(!handled);
        assert!(!app_state.waiting_for_backend);
    }

    #[test]
    fn it_shows_help_locally() {
        let mut app_state = AppState::default();
        let (should_break, handled) = app_state.handle_slash_commands("/help");

        assert!(!should_break);
        assert!(handled);
        assert!(!app_state.waiting_for_backend);

        let last_message = app_state.messages.last().unwrap();
        assert_eq!(last_message.author, Author::Assistant);
        assert!(last_message.content.contains("COMMANDS:"));
    }

    #[test]
    fn it_passes_regular_messages_through() {
        let mut app_state = AppState::default();
        let (should_break, handled) = app_state.handle_slash_commands("요금제 종류 알려줘");

        assert!(!should_break);
        assert!(!handled);
        assert!(app_state.messages.is_empty());
    }
}
