//! The action history: a strict undo stack of performed top-level actions.

use crate::error::EngineError;
use crate::state::GameState;

use super::{Action, ActionError, ActionKind};

/// Performed top-level actions in match order; only the top can be undone.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an already-performed action as the new top of the stack.
    pub fn record(&mut self, action: Action) -> Result<(), ActionError> {
        if !action.is_performed() {
            return Err(ActionError::NotPerformed(action.kind()));
        }
        self.entries.push(action);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.entries.iter()
    }

    /// Undoes and pops the top action.
    ///
    /// An empty stack is an error. A Turn action on top is undone only when
    /// `can_undo_turns` is set; otherwise the stack is left intact and
    /// `Ok(false)` reports the refusal. Any failure inside undo itself
    /// propagates with the action still on the stack.
    pub fn undo_last(
        &mut self,
        state: &mut GameState,
        can_undo_turns: bool,
    ) -> Result<bool, EngineError> {
        let top = self.entries.last_mut().ok_or(ActionError::HistoryEmpty)?;
        if top.kind() == ActionKind::Turn && !can_undo_turns {
            return Ok(false);
        }
        top.undo(state)?;
        self.entries.pop();
        Ok(true)
    }
}
