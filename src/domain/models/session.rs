#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use uuid::Uuid;

pub struct Session {}

impl Session {
    /// Generated once per run and sent unchanged with every turn. UUIDs keep
    /// concurrent users from landing on each other's conversation state.
    pub fn create_thread_id() -> String {
        return Uuid::new_v4().to_string();
    }
}
