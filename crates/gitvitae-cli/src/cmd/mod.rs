pub mod ai;
pub mod init;
pub mod seed;
pub mod serve;

use gitvitae_ai::{Message, Role};
use gitvitae_core::prompts::PromptMessage;

/// Map stored prompt messages onto chat client messages.
pub fn to_chat_messages(rendered: Vec<PromptMessage>) -> Vec<Message> {
    rendered
        .into_iter()
        .map(|m| Message {
            role: if m.role == "system" {
                Role::System
            } else {
                Role::User
            },
            content: m.content,
        })
        .collect()
}
