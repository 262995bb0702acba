//! Plain-text prompt assembly from a history window.

use history::{Message, Role};

/// Render `history` as a transcript followed by the new human input.
///
/// ```
/// use history::Message;
/// use llm::compose_prompt;
///
/// let history = [Message::human("hi"), Message::assistant("hello")];
/// let prompt = compose_prompt(&history, "how are you?");
/// assert_eq!(prompt, "Human: hi\nAssistant: hello\nHuman: how are you?\nAssistant:");
/// ```
pub fn compose_prompt(history: &[Message], input: &str) -> String {
    let mut out = String::new();
    for message in history {
        out.push_str(speaker(message.role));
        out.push_str(": ");
        out.push_str(&message.content);
        out.push('\n');
    }
    out.push_str("Human: ");
    out.push_str(input);
    out.push_str("\nAssistant:");
    out
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::Human => "Human",
        Role::Assistant => "Assistant",
    }
}
