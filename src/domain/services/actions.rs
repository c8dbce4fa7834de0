use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::infrastructure::backends::BackendManager;

/// Shown in place of a reply when a turn cannot complete. Whatever actually
/// failed goes to the debug log, not the transcript.
pub const TURN_FAILED_NOTICE: &str = "I couldn't reach the billing service, so that message didn't go through. Please send it again in a moment.";

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /quit /exit (/q) - Exit Billchat.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Interrupt waiting for a reply if in progress, otherwise exit.
- CTRL+R - Resubmit your last message to the assistant.

ASKING ABOUT YOUR BILL:
The assistant can calculate charges across plans, look up monthly statements, explain why a bill ran over, recommend a plan for a budget, and change or schedule subscription plan changes. Ask in plain language. One question is one turn: your message goes out, and the reply comes back with the whole conversation so far.
        "#;

    return text.trim().to_string();
}

fn worker_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tracing::error!(error = ?err, "turn failed");
    tx.send(Event::BackendMessage(Message::new_with_type(
        Author::Assistant,
        MessageType::Error,
        TURN_FAILED_NOTICE,
    )))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            match action.unwrap() {
                Action::BackendAbort() => {
                    worker.abort();
                }
                Action::BackendRequest(turn) => {
                    worker = tokio::spawn(async move {
                        match BackendManager::get()?.send_turn(turn).await {
                            Ok(transcript) => {
                                worker_tx.send(Event::TranscriptReplaced(transcript))?;
                            }
                            Err(err) => {
                                worker_error(err, &worker_tx)?;
                            }
                        }

                        return Ok(());
                    });
                }
            }
        }
    }
}
