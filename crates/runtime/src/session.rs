//! A running match with its selector.

use tracing::{debug, info_span, warn};

use hexmarch_core::{
    AbilityId, EngineError, Game, HexCoordinate, PieceId, PlayOutcome, Selector,
};
use hexmarch_content::new_standard_match;

/// One match plus the selector that answers its prompts.
///
/// The session is a thin declaration router: every entry point delegates to
/// the engine's declare methods, and an ability play that suspends into a
/// selection prompt is resolved immediately through the selector, so the
/// engine is never left suspended between session calls.
pub struct MatchSession<S> {
    game: Game,
    selector: S,
    span: tracing::Span,
}

impl<S: Selector> MatchSession<S> {
    pub fn new(game: Game, selector: S) -> Self {
        Self {
            game,
            selector,
            span: info_span!("match_session"),
        }
    }

    /// Starts a session on the standard map with the standard ruleset.
    pub fn standard(selector: S) -> Result<Self, EngineError> {
        Ok(Self::new(new_standard_match()?, selector))
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn end_turn(&mut self) -> Result<(), EngineError> {
        let _guard = self.span.enter();
        debug!(player = %self.game.state().current_player, "end turn");
        self.game.declare_turn()
    }

    pub fn move_piece(
        &mut self,
        piece: PieceId,
        destination: HexCoordinate,
    ) -> Result<(), EngineError> {
        let _guard = self.span.enter();
        debug!(%piece, %destination, "declare move");
        self.game.declare_move(piece, destination)
    }

    /// Plays an ability, routing any follow-up prompt through the selector.
    pub fn play_ability(
        &mut self,
        ability: AbilityId,
        source: Option<PieceId>,
        target: HexCoordinate,
    ) -> Result<(), EngineError> {
        let _guard = self.span.enter();
        debug!(%ability, %target, "declare ability");
        match self.game.declare_play_ability(ability, source, target)? {
            PlayOutcome::Completed => Ok(()),
            PlayOutcome::AwaitingSelection(request) => {
                let choice = self.selector.select(&request);
                if choice.is_none() {
                    warn!(%ability, "follow-up prompt cancelled");
                }
                self.game.resolve_selection(choice)
            }
        }
    }

    pub fn undo(&mut self, can_undo_turns: bool) -> Result<bool, EngineError> {
        let _guard = self.span.enter();
        let undone = self.game.undo_last(can_undo_turns)?;
        debug!(undone, "undo last");
        Ok(undone)
    }
}
