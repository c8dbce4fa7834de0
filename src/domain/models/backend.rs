use anyhow::Result;
use async_trait::async_trait;

use super::Message;

/// One user turn on its way to the agent. The thread token correlates every
/// turn of a conversation on the backend; it is invented client side and the
/// agent only learns about it when the first turn referencing it arrives.
pub struct TurnRequest {
    pub message: String,
    pub thread_id: String,
}

impl TurnRequest {
    pub fn new(message: &str, thread_id: &str) -> TurnRequest {
        return TurnRequest {
            message: message.to_string(),
            thread_id: thread_id.to_string(),
        };
    }
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;

#[async_trait]
pub trait Backend {
    /// Probed once at startup so a dead agent is reported before the first
    /// turn is typed.
    async fn health_check(&self) -> Result<()>;

    /// Sends one turn and returns the authoritative transcript for the whole
    /// conversation. Callers replace their local state with the result; there
    /// is no merging.
    async fn send_turn(&self, turn: TurnRequest) -> Result<Vec<Message>>;
}
