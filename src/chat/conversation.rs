use std::fmt;

/// A role in a conversation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// System instructions that frame the exchange
    System,
    /// Human input
    User,
    /// Model output
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single message in a conversation
#[derive(Clone, Debug)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// An ordered conversation history.
///
/// Ordering is semantically meaningful (system framing precedes the user's
/// request) and is preserved exactly as messages are pushed.
#[derive(Clone, Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a conversation opened by a system turn
    pub fn with_system(system_message: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_message)],
        }
    }

    /// Appends a user turn
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Appends any message
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All turns, in insertion order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// True if any turn has no content after trimming whitespace
    pub fn has_blank_turn(&self) -> bool {
        self.messages.iter().any(|m| m.content.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_turn_precedes_user_turn() {
        let mut convo = Conversation::with_system("You are a helpful AI assistant.");
        convo.push_user("Hello!");

        let messages = convo.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Hello!");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut convo = Conversation::new();
        convo.push(Message::system("first"));
        convo.push(Message::user("second"));
        convo.push(Message::assistant("third"));

        let contents: Vec<&str> = convo.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn blank_turns_are_detected() {
        let mut convo = Conversation::with_system("You are a helpful AI assistant.");
        convo.push_user("   ");
        assert!(convo.has_blank_turn());

        let mut convo = Conversation::with_system("You are a helpful AI assistant.");
        convo.push_user("Hello!");
        assert!(!convo.has_blank_turn());
    }

    #[test]
    fn role_display_matches_wire_names() {
        assert_eq!(Role::System.to_string(), "system");
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }
}
