//! The standard ruleset: match assembly and baseline passives.

use hexmarch_core::{
    Action, ActionBody, ActivatePassive, Board, EngineError, Game, GameConfig, GameState,
    ManualActionsSet, PassiveKind, Player, PlayerId, Team,
};

use crate::abilities::standard_abilities;
use crate::maps::standard_layout;

/// Installs the baseline turn economy: an EnergyUpkeep passive per player,
/// activated through one setup action so the whole installation sits on the
/// undo stack as a single unit. The opening player also receives their
/// initial manual-action budget, since no upkeep has run for them yet.
pub fn install_standard_ruleset(game: &mut Game) -> Result<(), EngineError> {
    let config = game.state().config;
    let opener = game.state().current_player;
    let players: Vec<PlayerId> = game.state().players().map(|p| p.id).collect();

    let mut setup = Action::new(opener, ActionBody::Container);
    for player in players {
        let upkeep = game.register_passive(
            PassiveKind::EnergyUpkeep {
                grant: config.turn_energy_grant,
                base_actions: config.base_manual_actions,
            },
            player,
        );
        setup.queue_resultant(Action::new(
            opener,
            ActionBody::ActivatePassive(ActivatePassive::new(upkeep)),
        ))?;
    }
    setup.queue_resultant(Action::new(
        opener,
        ActionBody::ManualActionsSet(ManualActionsSet::new(opener, config.base_manual_actions)),
    ))?;
    game.push_action(setup)
}

/// Assembles a ready-to-play match on the standard map with the standard
/// ability book and ruleset.
pub fn new_standard_match() -> Result<Game, EngineError> {
    let config = GameConfig::default();
    let (board, _spawned) = Board::generate(&standard_layout(), config.starting_health)?;
    let state = GameState::new(
        config,
        board,
        vec![
            Player::new(PlayerId(0), Team::Red),
            Player::new(PlayerId(1), Team::Blue),
        ],
    );
    let mut game = Game::new(state, standard_abilities());
    install_standard_ruleset(&mut game)?;
    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_match_opens_ready_for_red() {
        let game = new_standard_match().unwrap();
        let state = game.state();
        assert_eq!(state.current_player, PlayerId(0));
        assert_eq!(state.board.piece_count(), 4);
        assert_eq!(
            state.player(PlayerId(0)).unwrap().manual_actions,
            GameConfig::DEFAULT_MANUAL_ACTIONS
        );
        assert_eq!(state.passives.iter().filter(|p| p.active).count(), 2);
    }

    #[test]
    fn first_turn_hand_off_grants_the_standard_upkeep() {
        let mut game = new_standard_match().unwrap();
        game.declare_turn().unwrap();
        let state = game.state();
        assert_eq!(state.current_player, PlayerId(1));
        assert_eq!(
            state.player(PlayerId(1)).unwrap().energy,
            GameConfig::DEFAULT_TURN_ENERGY_GRANT
        );
        assert_eq!(
            state.player(PlayerId(1)).unwrap().manual_actions,
            GameConfig::DEFAULT_MANUAL_ACTIONS
        );
        assert_eq!(state.player(PlayerId(0)).unwrap().energy, 0);
    }
}
