use crate::direction::Direction;
use std::fmt;
use thiserror::Error;

/// One successful player action: a plain step or a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub direction: Direction,
    pub push: bool,
}

impl Action {
    pub fn step(direction: Direction) -> Self {
        Action {
            direction,
            push: false,
        }
    }

    pub fn push(direction: Direction) -> Self {
        Action {
            direction,
            push: true,
        }
    }

    /// LURD code: lowercase for a step, uppercase for a push.
    pub fn code(&self) -> char {
        if self.push {
            self.direction.push_code()
        } else {
            self.direction.move_code()
        }
    }

    pub fn from_code(code: char) -> Option<Action> {
        Direction::from_code(code).map(|(direction, push)| Action { direction, push })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("unknown move code '{code}' at offset {offset}")]
    UnknownCode { code: char, offset: usize },
}

/// Parse a LURD string such as `"rrUUl"`. Whitespace is ignored.
pub fn parse_moves(codes: &str) -> Result<Vec<Action>, HistoryError> {
    codes
        .char_indices()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(offset, code)| {
            Action::from_code(code).ok_or(HistoryError::UnknownCode { code, offset })
        })
        .collect()
}

/// Ordered log of successful actions. Only ever appended to, or popped by undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    actions: Vec<Action>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn pop(&mut self) -> Option<Action> {
        self.actions.pop()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of push actions in the log.
    pub fn push_count(&self) -> usize {
        self.actions.iter().filter(|action| action.push).count()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            write!(f, "{}", action)?;
        }
        Ok(())
    }
}
