//! Stock selector implementations.

use std::collections::VecDeque;

use hexmarch_core::{PromptRequest, Selectable, Selector};

/// Always picks the first candidate. Useful for smoke tests and bots that
/// do not care about the choice.
#[derive(Debug, Default)]
pub struct AutoSelector;

impl Selector for AutoSelector {
    fn select(&mut self, request: &PromptRequest) -> Option<Selectable> {
        request.candidates.first().copied()
    }
}

/// Replays a scripted sequence of answers; once exhausted, every further
/// prompt is cancelled.
#[derive(Debug, Default)]
pub struct ScriptedSelector {
    answers: VecDeque<Option<Selectable>>,
}

impl ScriptedSelector {
    pub fn new(answers: impl IntoIterator<Item = Option<Selectable>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }
}

impl Selector for ScriptedSelector {
    fn select(&mut self, _request: &PromptRequest) -> Option<Selectable> {
        self.answers.pop_front().flatten()
    }
}
