/// Blocking user-input capabilities supplied by the host
#[cfg_attr(test, mockall::automock)]
pub trait UserInput {
    /// Asks for a line of text. Returns `None` when the user cancels.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;

    /// Asks a yes/no question
    fn confirm(&mut self, message: &str) -> bool;
}

/// Scripted answers, for hosts without interactive input and for tests.
///
/// Prompts pop from `replies` (an exhausted queue counts as cancelled);
/// every confirmation returns `confirm_answer`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    replies: std::collections::VecDeque<Option<String>>,
    confirm_answer: bool,
    asked: Vec<String>,
}

impl ScriptedInput {
    pub fn new(confirm_answer: bool) -> Self {
        Self {
            confirm_answer,
            ..Self::default()
        }
    }

    /// Queues the answer for the next prompt
    pub fn reply(mut self, answer: Option<&str>) -> Self {
        self.replies.push_back(answer.map(str::to_string));
        self
    }

    /// Every prompt and confirmation message shown so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl UserInput for ScriptedInput {
    fn prompt(&mut self, message: &str, _default: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.replies.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.confirm_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replies_in_order() {
        let mut input = ScriptedInput::new(true).reply(Some("a")).reply(None);

        assert_eq!(input.prompt("first", "").as_deref(), Some("a"));
        assert_eq!(input.prompt("second", ""), None);
        assert_eq!(input.prompt("exhausted", ""), None);
        assert!(input.confirm("sure?"));
        assert_eq!(input.asked(), ["first", "second", "exhausted", "sure?"]);
    }
}
