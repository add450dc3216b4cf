use serde::{Deserialize, Serialize};

use super::message::Message;
use super::role::Role;

/// An append-only log of messages in conversational order.
///
/// Providers only ever borrow a transcript. The reply they return is a new
/// [`Message`] and it is up to the caller to [`push`](Transcript::push) it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.push(message);
        self
    }

    pub fn with_system<S: Into<String>>(self, content: S) -> Self {
        self.with_message(Message::system(content))
    }

    pub fn with_user<S: Into<String>>(self, content: S) -> Self {
        self.with_message(Message::user(content))
    }

    pub fn with_assistant<S: Into<String>>(self, content: S) -> Self {
        self.with_message(Message::assistant(content))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Messages whose role a backend understands, in order.
    pub fn conversational(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role.is_conversational())
    }

    /// Roles outside System/User/Assistant, in order of appearance.
    pub fn unrecognized_roles(&self) -> Vec<&Role> {
        self.messages
            .iter()
            .map(|m| &m.role)
            .filter(|role| !role.is_conversational())
            .collect()
    }
}

impl Extend<Message> for Transcript {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        self.messages.extend(iter);
    }
}

impl FromIterator<Message> for Transcript {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Transcript {
            messages: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Message>> for Transcript {
    fn from(messages: Vec<Message>) -> Self {
        Transcript { messages }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_keeps_call_order() {
        let transcript = Transcript::new()
            .with_system("You are terse.")
            .with_user("Hi")
            .with_assistant("Hello")
            .with_user("Bye");

        let roles: Vec<_> = transcript.iter().map(|m| m.role.clone()).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert_eq!(transcript.len(), 4);
        assert_eq!(transcript.last().unwrap().content, "Bye");
    }

    #[test]
    fn test_conversational_skips_bookkeeping() {
        let mut transcript = Transcript::new().with_user("one");
        transcript.push(Message::new(Role::from("note"), "internal"));
        transcript.push(Message::assistant("two"));

        let kept: Vec<_> = transcript.conversational().map(|m| m.content.as_str()).collect();
        assert_eq!(kept, vec!["one", "two"]);
        assert_eq!(
            transcript.unrecognized_roles(),
            vec![&Role::Other("note".to_string())]
        );
    }

    #[test]
    fn test_transcript_serializes_as_array() {
        let transcript: Transcript = vec![Message::user("a"), Message::assistant("b")].into();
        assert_eq!(
            serde_json::to_value(&transcript).unwrap(),
            json!([
                {"role": "user", "content": "a"},
                {"role": "assistant", "content": "b"}
            ])
        );
    }
}
