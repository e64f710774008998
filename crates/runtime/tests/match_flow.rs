//! End-to-end match scenarios across engine, content, and runtime.

use anyhow::Result;

use hexmarch_content::{new_standard_match, standard_abilities, standard_layout};
use hexmarch_core::{
    AbilityId, Action, ActionBody, Board, CellSpec, EffectKind, EnergyChange, Game, GameConfig,
    GameState, HexCoordinate, ManualActionsSet, MapLayout, PieceId, Player, PlayerId, Selectable,
    Team,
};
use hexmarch_runtime::{MatchSession, ScriptedSelector, logging};

// Standard book order, see hexmarch-content.
const VENOM_DART: AbilityId = AbilityId(0);
const AEGIS: AbilityId = AbilityId(1);
const LUNGE: AbilityId = AbilityId(4);

struct Skirmish {
    game: Game,
    red: PieceId,
    blue: PieceId,
}

/// An open board with one piece per side and the standard ability book.
fn skirmish(radius: i32, red_at: HexCoordinate, blue_at: HexCoordinate) -> Skirmish {
    let mut board = Board::new();
    for x in -radius..=radius {
        for y in (-radius).max(-x - radius)..=radius.min(-x + radius) {
            board
                .insert_cell(HexCoordinate::new(x, y, -x - y), CellSpec::GROUND)
                .unwrap();
        }
    }
    let red = board.spawn_piece(Team::Red, red_at, 5).unwrap();
    let blue = board.spawn_piece(Team::Blue, blue_at, 5).unwrap();
    let state = GameState::new(
        GameConfig::default(),
        board,
        vec![
            Player::new(PlayerId(0), Team::Red),
            Player::new(PlayerId(1), Team::Blue),
        ],
    );
    Skirmish {
        game: Game::new(state, standard_abilities()),
        red,
        blue,
    }
}

fn give_energy(game: &mut Game, player: PlayerId, amount: i32) -> Result<()> {
    game.push_action(Action::new(
        player,
        ActionBody::EnergyChange(EnergyChange::new(player, move |e| e + amount)),
    ))?;
    Ok(())
}

#[test]
fn standard_match_boards_stay_occupancy_consistent() -> Result<()> {
    logging::init();
    let game = new_standard_match()?;
    let state = game.state();
    assert_eq!(state.board.cell_count(), 63);
    assert_eq!(state.board.piece_count(), 4);
    for piece in state.board.pieces() {
        let cell = state.board.cell_at(piece.position, true)?.unwrap();
        assert_eq!(cell.occupant(), Some(piece.id));
    }
    Ok(())
}

#[test]
fn generated_open_ground_has_six_reachable_neighbors() -> Result<()> {
    let layout = MapLayout {
        rows: vec!["ggggg".into(); 5],
        legend: [('g', CellSpec::GROUND)].into_iter().collect(),
        spawns: vec![],
    };
    let (board, _) = Board::generate(&layout, 5)?;
    let center = HexCoordinate::axial(2, 2);
    let map = board.path_find(
        center,
        (1, 1),
        |_, next| !next.blocks_pathing,
        |cell| cell.is_free(),
        |_, _| 1,
    )?;
    assert_eq!(map.len(), 6);
    Ok(())
}

#[test]
fn pushed_energy_change_round_trips() -> Result<()> {
    let Skirmish { mut game, .. } = skirmish(
        1,
        HexCoordinate::ORIGIN,
        HexCoordinate::new(1, 0, -1),
    );
    give_energy(&mut game, PlayerId(0), 2)?;
    assert_eq!(game.state().player(PlayerId(0))?.energy, 2);
    assert!(game.undo_last(false)?);
    assert_eq!(game.state().player(PlayerId(0))?.energy, 0);
    Ok(())
}

#[test]
fn shield_absorbs_the_damage_tick_and_undo_restores_it() -> Result<()> {
    let Skirmish {
        mut game,
        red,
        blue,
    } = skirmish(3, HexCoordinate::ORIGIN, HexCoordinate::new(2, 0, -2));
    give_energy(&mut game, PlayerId(0), 2)?;
    give_energy(&mut game, PlayerId(1), 1)?;

    // Red poisons the blue piece.
    game.declare_play_ability(VENOM_DART, Some(red), HexCoordinate::new(2, 0, -2))?;
    assert_eq!(game.state().effects.active_on(blue).count(), 1);

    // Handing the turn to Blue ticks the poison: 5 -> 4.
    game.declare_turn()?;
    assert_eq!(game.state().board.piece(blue)?.health, 4);

    // Blue wards itself, hands the turn back, Red passes again.
    game.declare_play_ability(AEGIS, Some(blue), HexCoordinate::new(2, 0, -2))?;
    game.declare_turn()?;
    game.declare_turn()?;

    // The shield was consumed instead of the second tick.
    assert_eq!(game.state().board.piece(blue)?.health, 4);
    let shield_id = game
        .state()
        .effects
        .iter()
        .find(|e| matches!(e.kind, EffectKind::Shield))
        .map(|e| e.id)
        .unwrap();
    assert!(!game.state().effects.get(shield_id)?.active);

    // Undoing the last turn restores the shield.
    assert!(game.undo_last(true)?);
    assert!(game.state().effects.get(shield_id)?.active);
    assert_eq!(game.state().board.piece(blue)?.health, 4);
    Ok(())
}

#[test]
fn undoing_every_action_restores_the_exact_snapshot() -> Result<()> {
    let Skirmish { mut game, red, .. } = skirmish(
        3,
        HexCoordinate::ORIGIN,
        HexCoordinate::new(2, -2, 0),
    );
    game.push_action(Action::new(
        PlayerId(0),
        ActionBody::ManualActionsSet(ManualActionsSet::new(PlayerId(0), 2)),
    ))?;

    let snapshot = game.state().clone();

    game.declare_move(red, HexCoordinate::new(0, 2, -2))?;
    game.declare_turn()?;
    assert_ne!(game.state(), &snapshot);

    assert!(game.undo_last(true)?);
    assert!(game.undo_last(false)?);
    assert_eq!(game.state(), &snapshot);
    Ok(())
}

#[test]
fn session_resolves_a_follow_up_through_its_selector() -> Result<()> {
    logging::init();
    let target = HexCoordinate::new(1, 0, -1);
    let Skirmish {
        mut game,
        red,
        blue,
    } = skirmish(3, HexCoordinate::ORIGIN, target);
    give_energy(&mut game, PlayerId(0), 1)?;

    let destination = HexCoordinate::new(0, 1, -1);
    let mut session = MatchSession::new(
        game,
        ScriptedSelector::new([Some(Selectable::Cell(destination))]),
    );
    session.play_ability(LUNGE, Some(red), target)?;

    let state = session.game().state();
    assert_eq!(state.board.piece(red)?.position, destination);
    assert!(session.game().pending_prompt().is_none());
    // The slow landed on the target.
    assert_eq!(state.effects.active_on(blue).count(), 1);
    Ok(())
}

#[test]
fn cancelled_follow_up_still_counts_the_cast() -> Result<()> {
    let target = HexCoordinate::new(1, 0, -1);
    let Skirmish { mut game, red, .. } = skirmish(2, HexCoordinate::ORIGIN, target);
    give_energy(&mut game, PlayerId(0), 1)?;

    let mut session = MatchSession::new(game, ScriptedSelector::default());
    session.play_ability(LUNGE, Some(red), target)?;

    let state = session.game().state();
    assert_eq!(state.board.piece(red)?.position, HexCoordinate::ORIGIN);
    assert_eq!(state.player(PlayerId(0))?.energy, 0);
    Ok(())
}

#[test]
fn standard_layout_round_trips_through_generation() -> Result<()> {
    let layout = standard_layout();
    let (board, spawned) = Board::generate(&layout, GameConfig::DEFAULT_STARTING_HEALTH)?;
    assert_eq!(spawned.len(), 2);
    for side in &spawned {
        for &id in side {
            assert_eq!(board.piece(id)?.health, GameConfig::DEFAULT_STARTING_HEALTH);
        }
    }
    Ok(())
}
