use test_utils::billing_reply_fixture;

use super::BubbleList;
use crate::domain::models::Author;
use crate::domain::models::Message;

#[test]
fn it_counts_lines_for_all_bubbles() {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(
        &[
            Message::new(Author::User, "2월 요금 알려줘"),
            Message::new(Author::Assistant, billing_reply_fixture()),
        ],
        100,
    );

    // Two bubbles, each at least a border, a content line, and a border.
    assert!(bubble_list.len() >= 6);
}

#[test]
fn it_rebuilds_entries_when_the_transcript_is_replaced() {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(&[Message::new(Author::User, "first")], 100);
    let initial_len = bubble_list.len();

    bubble_list.set_messages(
        &[
            Message::new(Author::User, "first"),
            Message::new(Author::Assistant, billing_reply_fixture()),
        ],
        100,
    );

    assert!(bubble_list.len() > initial_len);
}

#[test]
fn it_drops_stale_entries_when_the_transcript_shrinks() {
    let mut bubble_list = BubbleList::new();
    bubble_list.set_messages(
        &[
            Message::new(Author::User, "2월 요금 알려줘"),
            Message::new(Author::Assistant, billing_reply_fixture()),
        ],
        100,
    );

    bubble_list.set_messages(&[Message::new(Author::User, "2월 요금 알려줘")], 100);

    assert_eq!(bubble_list.len(), 3);
}

#[test]
fn it_invalidates_the_cache_on_resize() {
    let mut bubble_list = BubbleList::new();
    let messages = [Message::new(Author::Assistant, billing_reply_fixture())];

    bubble_list.set_messages(&messages, 100);
    let wide_len = bubble_list.len();

    bubble_list.set_messages(&messages, 30);
    assert!(bubble_list.len() > wide_len);
}
