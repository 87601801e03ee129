use crate::battle::actions::Action;
use std::collections::VecDeque;

/// FIFO work list of pending actions for the current turn.
///
/// Reactions splice in at the front, preserving their relative order, so
/// everything a move triggers resolves before the next selected move. This
/// keeps resolution depth-first without recursion.
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: VecDeque<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            actions: VecDeque::new(),
        }
    }

    pub fn push_back(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    /// Splice reactions ahead of everything pending. `reactions[0]` ends up
    /// at the head of the queue.
    pub fn push_front_batch(&mut self, reactions: Vec<Action>) {
        for action in reactions.into_iter().rev() {
            self.actions.push_front(action);
        }
    }

    pub fn pop_front(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(text: &str) -> Action {
        Action::Message(text.to_string())
    }

    #[test]
    fn test_front_batch_preserves_relative_order() {
        let mut queue = ActionQueue::new();
        queue.push_back(msg("third"));
        queue.push_front_batch(vec![msg("first"), msg("second")]);
        assert_eq!(queue.pop_front(), Some(msg("first")));
        assert_eq!(queue.pop_front(), Some(msg("second")));
        assert_eq!(queue.pop_front(), Some(msg("third")));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_nested_splices_resolve_depth_first() {
        let mut queue = ActionQueue::new();
        queue.push_back(msg("b"));
        queue.push_front_batch(vec![msg("a")]);
        // A reaction produced while "a" resolves lands ahead of "b".
        queue.pop_front();
        queue.push_front_batch(vec![msg("a1")]);
        assert_eq!(queue.pop_front(), Some(msg("a1")));
        assert_eq!(queue.pop_front(), Some(msg("b")));
    }
}
