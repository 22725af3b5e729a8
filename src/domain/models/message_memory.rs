use super::Message;

/// Append-only conversation buffer.
///
/// Insertion order is conversation order. Each session owns its own instance;
/// appending requires `&mut self`, so sharing one buffer between concurrent
/// generations needs an explicit lock on the caller's side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageMemory {
    messages: Vec<Message>,
}

impl MessageMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append `message` and return the full history including it.
    pub fn register_message(&mut self, message: Message) -> &[Message] {
        self.messages.push(message);
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_on_empty_memory_yields_single_message() {
        let mut memory = MessageMemory::new();
        assert!(memory.is_empty());

        let msg = Message::user("Generate.");
        let history = memory.register_message(msg.clone());
        assert_eq!(history, [msg.clone()]);

        assert_eq!(memory.get_messages(), [msg]);
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn registration_preserves_insertion_order() {
        let mut memory = MessageMemory::new();
        let first = Message::system("rules");
        let second = Message::user("question");
        let third = Message::assistant("answer");

        memory.register_message(first.clone());
        let before: Vec<Message> = memory.get_messages().to_vec();

        memory.register_message(second.clone());
        memory.register_message(third.clone());

        assert_eq!(memory.get_messages(), [first, second, third.clone()]);
        assert_eq!(memory.get_messages()[..1], before[..]);
        assert_eq!(memory.last(), Some(&third));
    }

    #[test]
    fn repeated_reads_are_equal() {
        let mut memory = MessageMemory::new();
        memory.register_message(Message::user("a"));
        memory.register_message(Message::user("a"));

        let first = memory.get_messages().to_vec();
        let second = memory.get_messages().to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2, "no deduplication");
    }
}
