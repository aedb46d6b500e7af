//! Placement scenarios driven through the engine.

use grid_duel::board::{Arrows, CellIndex, Direction};
use grid_duel::cards::{AttackType, Card, CardId, CardTypeId};
use grid_duel::core::{Input, MatchConfig, MatchMode, ScriptedRng, Side};
use grid_duel::engine::Engine;
use grid_duel::events::MatchEvent;

fn idx(raw: u8) -> CellIndex {
    CellIndex::new(raw).unwrap()
}

fn blank(id: u32, side: Side) -> Card {
    Card::new(CardId::new(id), CardTypeId::new(1), side)
}

fn hands() -> (Vec<Card>, Vec<Card>) {
    let player = (1..=5).map(|id| blank(id, Side::Player)).collect();
    let opponent = (101..=105).map(|id| blank(id, Side::Opponent)).collect();
    (player, opponent)
}

/// Start a match where the opponent opens (coin roll 1), followed by `rolls`.
fn opponent_first(mode: MatchMode, player: Vec<Card>, opponent: Vec<Card>, rolls: &[u32]) -> Engine<ScriptedRng> {
    let rng = ScriptedRng::new().with_rolls(std::iter::once(1).chain(rolls.iter().copied()));
    let (engine, _) = Engine::start(MatchConfig::new(mode), player, opponent, [true; 16], rng).unwrap();
    assert_eq!(engine.current_turn(), Some(Side::Opponent));
    engine
}

fn has_battle(events: &[MatchEvent]) -> bool {
    events.iter().any(|e| matches!(e, MatchEvent::BattleResolved { .. }))
}

fn has_combo(events: &[MatchEvent]) -> bool {
    events.iter().any(|e| matches!(e, MatchEvent::ComboTriggered { .. }))
}

// =============================================================================
// Instant Capture
// =============================================================================

#[test]
fn test_unopposed_arrow_captures_without_battle() {
    let (mut player, opponent) = hands();
    player[0] = player[0].with_arrows(Arrows::from_directions(&[Direction::Top]));
    let mut engine = opponent_first(MatchMode::Standard, player, opponent, &[]);

    engine.submit(Input::opponent_move(CardId::new(101), 1)).unwrap();
    let events = engine.submit(Input::player_move(CardId::new(1), 5)).unwrap();

    assert!(!has_battle(&events));
    assert!(events.contains(&MatchEvent::OwnershipChanged {
        changes: vec![(idx(1), Side::Player)]
    }));
    assert_eq!(engine.field().owner_at(idx(1)), Some(Side::Player));
    assert_eq!(engine.rng().remaining_rolls(), 0);
}

#[test]
fn test_capture_needs_an_arrow_toward_the_neighbour() {
    let (mut player, opponent) = hands();
    player[0] = player[0].with_arrows(Arrows::from_directions(&[Direction::Bottom]));
    let mut engine = opponent_first(MatchMode::Standard, player, opponent, &[]);

    engine.submit(Input::opponent_move(CardId::new(101), 1)).unwrap();
    let events = engine.submit(Input::player_move(CardId::new(1), 5)).unwrap();

    assert!(!events.iter().any(|e| matches!(e, MatchEvent::OwnershipChanged { .. })));
    assert_eq!(engine.field().owner_at(idx(1)), Some(Side::Opponent));
}

// =============================================================================
// Battles
// =============================================================================

#[test]
fn test_contested_arrow_battles_and_attacker_wins() {
    let (mut player, mut opponent) = hands();
    player[0] = player[0]
        .with_arrows(Arrows::from_directions(&[Direction::Top]))
        .with_attack(5, AttackType::Physical);
    opponent[0] = opponent[0]
        .with_arrows(Arrows::from_directions(&[Direction::Bottom]))
        .with_defense(4, 0);
    let mut engine = opponent_first(MatchMode::Standard, player, opponent, &[3, 1]);

    engine.submit(Input::opponent_move(CardId::new(101), 1)).unwrap();
    let events = engine.submit(Input::player_move(CardId::new(1), 5)).unwrap();

    assert!(events.contains(&MatchEvent::BattleResolved {
        attacker_cell: idx(5),
        defender_cell: idx(1),
        attack_roll: 3,
        defense_roll: 1,
        winner: Side::Player,
    }));
    assert_eq!(engine.field().owner_at(idx(1)), Some(Side::Player));
}

#[test]
fn test_lost_battle_flips_placed_card_only() {
    let (mut player, mut opponent) = hands();
    player[0] = player[0]
        .with_arrows(Arrows::from_directions(&[Direction::Top, Direction::Right]))
        .with_attack(5, AttackType::Physical);
    opponent[0] = opponent[0]
        .with_arrows(Arrows::from_directions(&[Direction::Bottom]))
        .with_defense(4, 0);
    // The card at cell 6 does not point back, so it is captured outright.
    opponent[1] = opponent[1].with_arrows(Arrows::from_directions(&[Direction::Right]));
    let mut engine = opponent_first(MatchMode::Standard, player, opponent, &[0, 4]);

    engine.submit(Input::opponent_move(CardId::new(101), 1)).unwrap();
    engine.submit(Input::player_move(CardId::new(2), 15)).unwrap();
    engine.submit(Input::opponent_move(CardId::new(102), 6)).unwrap();
    let events = engine.submit(Input::player_move(CardId::new(1), 5)).unwrap();

    assert!(events.contains(&MatchEvent::BattleResolved {
        attacker_cell: idx(5),
        defender_cell: idx(1),
        attack_roll: 0,
        defense_roll: 4,
        winner: Side::Opponent,
    }));
    assert_eq!(engine.field().owner_at(idx(5)), Some(Side::Opponent));
    assert_eq!(engine.field().owner_at(idx(1)), Some(Side::Opponent));
    // The instant capture of the same placement still happens.
    assert_eq!(engine.field().owner_at(idx(6)), Some(Side::Player));
}

// =============================================================================
// Edges and Corners
// =============================================================================

#[test]
fn test_corner_has_three_neighbours() {
    let dirs: Vec<_> = idx(0).neighbors().map(|(d, _)| d).collect();
    assert_eq!(dirs, vec![Direction::Right, Direction::BottomRight, Direction::Bottom]);

    for d in [
        Direction::Top,
        Direction::TopRight,
        Direction::Left,
        Direction::TopLeft,
        Direction::BottomLeft,
    ] {
        assert_eq!(idx(0).neighbor(d), None);
    }
}

#[test]
fn test_no_wraparound_captures() {
    let (mut player, opponent) = hands();
    player[0] = player[0].with_arrows(Arrows::ALL);
    let mut engine = opponent_first(MatchMode::Standard, player, opponent, &[]);

    // Cells that would be neighbours of 4 only with wraparound.
    engine.submit(Input::opponent_move(CardId::new(101), 3)).unwrap();
    engine.submit(Input::player_move(CardId::new(2), 15)).unwrap();
    engine.submit(Input::opponent_move(CardId::new(102), 7)).unwrap();
    engine.submit(Input::player_move(CardId::new(3), 14)).unwrap();
    engine.submit(Input::opponent_move(CardId::new(103), 11)).unwrap();
    let events = engine.submit(Input::player_move(CardId::new(1), 4)).unwrap();

    assert!(!events.iter().any(|e| matches!(e, MatchEvent::OwnershipChanged { .. })));
    assert_eq!(engine.scores()[Side::Opponent], 3);
}

// =============================================================================
// Combos
// =============================================================================

fn combo_setup(mode: MatchMode, contested: bool, rolls: &[u32]) -> (Engine<ScriptedRng>, Vec<MatchEvent>) {
    let (mut player, mut opponent) = hands();
    player[0] = player[0]
        .with_arrows(Arrows::from_directions(&[Direction::Top]))
        .with_attack(50, AttackType::Physical);
    let mut link = vec![Direction::Right];
    if contested {
        link.push(Direction::Bottom);
    }
    opponent[0] = opponent[0].with_arrows(Arrows::from_directions(&link)).with_defense(10, 10);
    let mut engine = opponent_first(mode, player, opponent, rolls);

    engine.submit(Input::opponent_move(CardId::new(101), 1)).unwrap();
    engine.submit(Input::player_move(CardId::new(2), 15)).unwrap();
    engine.submit(Input::opponent_move(CardId::new(102), 2)).unwrap();
    let events = engine.submit(Input::player_move(CardId::new(1), 5)).unwrap();
    (engine, events)
}

#[test]
fn test_instant_capture_seeds_combo_in_standard() {
    let (engine, events) = combo_setup(MatchMode::Standard, false, &[]);

    assert!(events.contains(&MatchEvent::ComboTriggered { captured: vec![idx(2)] }));
    assert_eq!(engine.field().owner_at(idx(2)), Some(Side::Player));
}

#[test]
fn test_instant_capture_does_not_seed_combo_in_hard() {
    let (engine, events) = combo_setup(MatchMode::Hard, false, &[]);

    assert!(!has_combo(&events));
    assert_eq!(engine.field().owner_at(idx(1)), Some(Side::Player));
    assert_eq!(engine.field().owner_at(idx(2)), Some(Side::Opponent));
}

#[test]
fn test_won_battle_seeds_combo_in_hard() {
    let (engine, events) = combo_setup(MatchMode::Hard, true, &[20, 5]);

    assert!(has_battle(&events));
    assert!(events.contains(&MatchEvent::ComboTriggered { captured: vec![idx(2)] }));
    assert_eq!(engine.field().owner_at(idx(2)), Some(Side::Player));
}

#[test]
fn test_lost_battle_seeds_nothing() {
    let (engine, events) = combo_setup(MatchMode::Standard, true, &[1, 9]);

    assert!(!has_combo(&events));
    assert_eq!(engine.field().owner_at(idx(5)), Some(Side::Opponent));
    assert_eq!(engine.field().owner_at(idx(2)), Some(Side::Opponent));
}
