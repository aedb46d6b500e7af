//! The match engine.
//!
//! `Engine` owns the field, both hands, the turn state and the RNG. It is
//! driven one `Input` at a time and returns the events each input caused.
//! Rejected inputs leave the engine untouched.
//!
//! ## Resolution order for one placement
//!
//! 1. The card leaves the hand and goes onto the field.
//! 2. Neighbours are classified into instant captures and battles.
//! 3. With several battle candidates the acting side picks one; the rest
//!    are dropped. A single candidate is fought directly.
//! 4. The battle is rolled. A win flips the defender and seeds a combo; a
//!    loss flips the placed card and seeds nothing.
//! 5. Instant captures flip. They seed combos except in Hard mode.
//! 6. Combos cascade from the seeds. The placed cell is never recaptured.
//! 7. End check: next turn, a skipped turn, or the end of the match.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::phase::Phase;
use super::snapshot::{MatchSnapshot, SNAPSHOT_VERSION};
use crate::ai::{HeuristicAi, OpponentPolicy};
use crate::board::{CellIndex, CellSet, Field, CELL_COUNT};
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{
    GameRng, Input, MatchConfig, MatchMode, MatchRng, MoveRecord, MoveRejection, SetupError, Side, SideMap,
    SnapshotError,
};
use crate::events::MatchEvent;
use crate::progression::{forfeit_candidates, reward_candidates, roll_level_ups, MatchOutcome};
use crate::rules::{battle, combo, conflict, outcome, MatchResult};

/// Cards per hand at the start of a match.
pub const HAND_SIZE: usize = 5;

/// A single match.
///
/// ## Example
///
/// ```
/// use grid_duel::board::{Arrows, Direction};
/// use grid_duel::cards::{AttackType, Card, CardId, CardTypeId};
/// use grid_duel::core::{Input, MatchConfig, MatchMode, ScriptedRng, Side};
/// use grid_duel::engine::Engine;
///
/// let hand = |base: u32, side: Side| -> Vec<Card> {
///     (0..5)
///         .map(|i| {
///             Card::new(CardId::new(base + i), CardTypeId::new(1), side)
///                 .with_arrows(Arrows::from_directions(&[Direction::Top]))
///                 .with_attack(40, AttackType::Physical)
///         })
///         .collect()
/// };
///
/// // Hardcore: the player always opens.
/// let (mut engine, _) = Engine::start(
///     MatchConfig::new(MatchMode::Hardcore),
///     hand(1, Side::Player),
///     hand(100, Side::Opponent),
///     [true; 16],
///     ScriptedRng::new(),
/// )
/// .unwrap();
///
/// let events = engine.submit(Input::player_move(CardId::new(1), 5)).unwrap();
/// assert!(!events.is_empty());
/// assert_eq!(engine.current_turn(), Some(Side::Opponent));
/// ```
#[derive(Clone)]
pub struct Engine<R: MatchRng = GameRng> {
    config: MatchConfig,
    field: Field,
    /// Unplaced cards per side, in hand order.
    hands: SideMap<Vec<Card>>,
    phase: Phase,
    turn_number: u32,
    rng: R,
    policy: Arc<dyn OpponentPolicy>,
    catalog: Option<Arc<dyn CardCatalog + Send + Sync>>,
    log: im::Vector<MatchEvent>,
    history: Vec<MoveRecord>,
    outcome: MatchOutcome,
}

impl Engine<GameRng> {
    /// Start a match using a `GameRng` seeded from `config.seed`.
    pub fn seeded(
        config: MatchConfig,
        player_hand: Vec<Card>,
        opponent_hand: Vec<Card>,
        availability: [bool; CELL_COUNT],
    ) -> Result<(Self, Vec<MatchEvent>), SetupError> {
        let rng = GameRng::new(config.seed);
        Self::start(config, player_hand, opponent_hand, availability, rng)
    }
}

impl<R: MatchRng> Engine<R> {
    /// Validate the hands, flip for the first turn and open it.
    pub fn start(
        config: MatchConfig,
        player_hand: Vec<Card>,
        opponent_hand: Vec<Card>,
        availability: [bool; CELL_COUNT],
        mut rng: R,
    ) -> Result<(Self, Vec<MatchEvent>), SetupError> {
        let hands = validate_hands(player_hand, opponent_hand)?;

        let first = if config.mode.player_always_first() || rng.roll(1) == 0 {
            Side::Player
        } else {
            Side::Opponent
        };
        debug!(mode = %config.mode, %first, "match started");

        let mut engine = Self::assemble(config, Field::new(availability), hands, rng);
        let mut events = vec![MatchEvent::MatchStarted {
            mode: engine.config.mode,
            first,
        }];
        engine.advance(first, &mut events);
        engine.record(&events);
        Ok((engine, events))
    }

    /// Restart a snapshotted match at move intake for the stored side.
    ///
    /// The snapshot's mode wins over `config.mode`.
    pub fn resume(snapshot: MatchSnapshot, mut config: MatchConfig, rng: R) -> Result<(Self, Vec<MatchEvent>), SnapshotError> {
        snapshot.validate()?;
        config.mode = snapshot.mode;

        let hands = SideMap::from_pair(snapshot.player_hand, snapshot.opponent_hand);
        let mut engine = Self::assemble(config, snapshot.field, hands, rng);
        engine.turn_number = snapshot.turn_number;
        engine.phase = Phase::AwaitingMove(snapshot.current_turn);
        debug!(side = %snapshot.current_turn, turn = snapshot.turn_number, "match resumed");

        let events = vec![MatchEvent::TurnStarted {
            side: snapshot.current_turn,
            turn_number: snapshot.turn_number,
        }];
        engine.record(&events);
        Ok((engine, events))
    }

    fn assemble(config: MatchConfig, field: Field, hands: SideMap<Vec<Card>>, rng: R) -> Self {
        let policy = Arc::new(HeuristicAi::new(config.ai.clone()));
        Self {
            config,
            field,
            hands,
            phase: Phase::AwaitingMove(Side::Player),
            turn_number: 0,
            rng,
            policy,
            catalog: None,
            log: im::Vector::new(),
            history: Vec::new(),
            outcome: MatchOutcome::default(),
        }
    }

    /// Use `catalog` for post-match level-ups. Without one, no card levels up.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn CardCatalog + Send + Sync>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replace the built-in heuristic opponent.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn OpponentPolicy>) -> Self {
        self.policy = policy;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.config.mode
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Unplaced cards of `side`, in hand order.
    #[must_use]
    pub fn hand(&self, side: Side) -> &[Card] {
        &self.hands[side]
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Side expected to place a card, if the engine waits for a placement.
    #[must_use]
    pub fn current_turn(&self) -> Option<Side> {
        match self.phase {
            Phase::AwaitingMove(side) => Some(side),
            _ => None,
        }
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.result.is_some()
    }

    /// Final result once the match has ended.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.outcome.result
    }

    /// Level-ups and card transfers decided so far.
    #[must_use]
    pub fn outcome(&self) -> &MatchOutcome {
        &self.outcome
    }

    /// Field cards owned by each side.
    #[must_use]
    pub fn scores(&self) -> SideMap<u32> {
        outcome::scores(&self.field)
    }

    /// Cards in both hands plus cards on the field.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hands[Side::Player].len() + self.hands[Side::Opponent].len() + self.field.card_count()
    }

    /// Every event emitted so far.
    #[must_use]
    pub fn events(&self) -> &im::Vector<MatchEvent> {
        &self.log
    }

    /// Every accepted placement.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    // === Inputs ===

    /// Apply one input.
    pub fn submit(&mut self, input: Input) -> Result<Vec<MatchEvent>, MoveRejection> {
        let mut events = Vec::new();
        match input {
            Input::PlayerMove { card, cell } => self.place(Side::Player, card, cell, &mut events)?,
            Input::OpponentMove { card, cell } => self.place(Side::Opponent, card, cell, &mut events)?,
            Input::BattleTarget { cell } => self.choose_target(cell, &mut events)?,
            Input::RewardChoice(cell) => self.choose_reward(cell, &mut events)?,
        }
        self.record(&events);
        Ok(events)
    }

    /// Let the opponent policy play the opponent's turn, including any
    /// battle target choice it triggers.
    pub fn play_opponent_turn(&mut self) -> Result<Vec<MatchEvent>, MoveRejection> {
        match self.phase {
            Phase::AwaitingMove(Side::Opponent) => {}
            Phase::AwaitingMove(Side::Player) => {
                return Err(MoveRejection::WrongTurn {
                    expected: Side::Player,
                    actual: Side::Opponent,
                })
            }
            Phase::Done => return Err(MoveRejection::MatchOver),
            _ => return Err(MoveRejection::NotAwaitingMove),
        }

        let mut events = Vec::new();
        let choice = self
            .policy
            .choose_move(&self.field, &self.hands[Side::Opponent], self.config.mode);

        let result = match choice {
            Some(choice) => self
                .place(Side::Opponent, choice.card, choice.cell.raw(), &mut events)
                .and_then(|()| self.opponent_target(&mut events)),
            None => {
                debug!("opponent has no move");
                self.advance(Side::Player, &mut events);
                Ok(())
            }
        };

        self.record(&events);
        result.map(|()| events)
    }

    /// Settle a pending battle choice for the opponent. A policy answer
    /// outside the candidates falls back to the first candidate.
    fn opponent_target(&mut self, events: &mut Vec<MatchEvent>) -> Result<(), MoveRejection> {
        let Phase::AwaitingTarget { attacker, candidates, .. } = &self.phase else {
            return Ok(());
        };

        let picked = self.policy.choose_target(&self.field, *attacker, candidates);
        let target = match picked {
            Some(cell) if candidates.contains(&cell) => Some(cell),
            Some(cell) => {
                warn!(%cell, "policy picked a cell outside the battle candidates");
                candidates.first().copied()
            }
            None => candidates.first().copied(),
        };

        match target {
            Some(target) => self.choose_target(target.raw(), events),
            None => Ok(()),
        }
    }

    /// Capture the state at a turn boundary.
    pub fn snapshot(&self) -> Result<MatchSnapshot, SnapshotError> {
        let current_turn = match self.phase.actor() {
            Some(side) if self.phase.is_turn_boundary() => side,
            _ => return Err(SnapshotError::NotAtTurnBoundary),
        };
        Ok(MatchSnapshot {
            version: SNAPSHOT_VERSION,
            mode: self.config.mode,
            current_turn,
            turn_number: self.turn_number,
            player_hand: self.hands[Side::Player].clone(),
            opponent_hand: self.hands[Side::Opponent].clone(),
            field: self.field.clone(),
        })
    }

    // === Move intake ===

    fn place(&mut self, side: Side, card: CardId, cell: u8, events: &mut Vec<MatchEvent>) -> Result<(), MoveRejection> {
        match self.phase {
            Phase::AwaitingMove(expected) if expected != side => {
                return Err(MoveRejection::WrongTurn { expected, actual: side })
            }
            Phase::AwaitingMove(_) => {}
            Phase::Done => return Err(MoveRejection::MatchOver),
            _ => return Err(MoveRejection::NotAwaitingMove),
        }

        let cell = CellIndex::parse(cell)?;
        self.field.check_placement(cell)?;
        let Some(slot) = self.hands[side].iter().position(|c| c.id == card) else {
            let played = self.field.occupied().any(|(_, c)| c.id == card && c.origin == side);
            return Err(if played {
                MoveRejection::CardAlreadyUsed(card)
            } else {
                MoveRejection::UnknownCard(card)
            });
        };

        let placed = self.hands[side].remove(slot);
        self.field.place(cell, placed)?;
        self.history.push(MoveRecord::new(side, card, cell, self.turn_number));
        events.push(MatchEvent::CardPlaced { side, card, cell });
        debug!(%side, %card, %cell, "card placed");

        let conflicts = conflict::analyze(&self.field, cell);
        let captures: SmallVec<[CellIndex; 8]> = conflicts.captures().collect();
        let candidates = conflicts.battle_cells();

        if candidates.len() > 1 {
            events.push(MatchEvent::BattleCandidates {
                attacker_cell: cell,
                candidates: candidates.to_vec(),
            });
            debug!(%cell, count = candidates.len(), "awaiting battle target");
            self.phase = Phase::AwaitingTarget {
                side,
                attacker: cell,
                candidates,
                captures,
            };
            return Ok(());
        }

        self.resolve(side, cell, candidates.first().copied(), &captures, events);
        Ok(())
    }

    fn choose_target(&mut self, cell: u8, events: &mut Vec<MatchEvent>) -> Result<(), MoveRejection> {
        let (side, attacker, captures, target) = match &self.phase {
            Phase::AwaitingTarget {
                side,
                attacker,
                candidates,
                captures,
            } => {
                let target = CellIndex::parse(cell)?;
                if !candidates.contains(&target) {
                    return Err(MoveRejection::InvalidTarget(target));
                }
                (*side, *attacker, captures.clone(), target)
            }
            Phase::Done => return Err(MoveRejection::MatchOver),
            _ => return Err(MoveRejection::NotAwaitingTarget),
        };

        debug!(%side, %target, "battle target chosen");
        self.resolve(side, attacker, Some(target), &captures, events);
        Ok(())
    }

    // === Resolution ===

    fn resolve(
        &mut self,
        side: Side,
        placed: CellIndex,
        target: Option<CellIndex>,
        captures: &[CellIndex],
        events: &mut Vec<MatchEvent>,
    ) {
        let mut seeds: SmallVec<[CellIndex; 8]> = SmallVec::new();

        if let Some(defender) = target {
            if let Some(result) = battle::resolve(&mut self.field, placed, defender, &mut self.rng) {
                debug!(
                    attack = result.attack_roll,
                    defense = result.defense_roll,
                    winner = %result.winner,
                    "battle resolved"
                );
                events.push(MatchEvent::battle(&result));
                events.push(MatchEvent::ownership([result.flipped_cell()], result.winner));
                if result.attacker_won() {
                    seeds.push(defender);
                }
            }
        }

        let flipped: SmallVec<[CellIndex; 8]> = captures
            .iter()
            .copied()
            .filter(|&c| self.field.set_owner(c, side).is_some_and(|prev| prev != side))
            .collect();
        if !flipped.is_empty() {
            events.push(MatchEvent::ownership(flipped.iter().copied(), side));
            if self.config.mode.instant_captures_seed_combos() {
                seeds.extend(flipped.iter().copied());
            }
        }

        if !seeds.is_empty() {
            let visited: CellSet = [placed].into_iter().collect();
            let chain = combo::propagate(&mut self.field, &seeds, side, visited);
            for wave in chain.waves {
                debug!(%side, captured = wave.len(), "combo wave");
                events.push(MatchEvent::ComboTriggered { captured: wave.clone() });
                events.push(MatchEvent::ownership(wave, side));
            }
        }

        self.advance(side.other(), events);
    }

    // === End check ===

    /// Open `next`'s turn, skip it when `next` has no cards, or end the match.
    fn advance(&mut self, next: Side, events: &mut Vec<MatchEvent>) {
        let hands_empty = self.hands[Side::Player].is_empty() && self.hands[Side::Opponent].is_empty();
        if !self.field.has_open_cell() || hands_empty {
            self.finish(events);
            return;
        }

        let side = if self.hands[next].is_empty() {
            debug!(side = %next, "turn skipped");
            events.push(MatchEvent::TurnSkipped { side: next });
            next.other()
        } else {
            next
        };

        self.turn_number += 1;
        self.phase = Phase::AwaitingMove(side);
        events.push(MatchEvent::TurnStarted {
            side,
            turn_number: self.turn_number,
        });
    }

    fn finish(&mut self, events: &mut Vec<MatchEvent>) {
        let scores = outcome::scores(&self.field);
        let result = MatchResult::from_scores(&scores);
        debug!(?result, player = scores[Side::Player], opponent = scores[Side::Opponent], "match ended");
        events.push(MatchEvent::MatchEnded {
            result,
            player_score: scores[Side::Player],
            opponent_score: scores[Side::Opponent],
        });

        let level_ups = match &self.catalog {
            Some(catalog) => roll_level_ups(
                self.field.occupied().map(|(_, c)| c),
                catalog.as_ref(),
                &mut self.rng,
                self.config.level_up_chance,
                self.config.max_level,
            ),
            None => Vec::new(),
        };
        if !level_ups.is_empty() {
            events.push(MatchEvent::CardsLeveledUp {
                level_ups: level_ups.clone(),
            });
        }
        self.outcome.result = Some(result);
        self.outcome.level_ups = level_ups;

        self.phase = Phase::Done;
        match result {
            MatchResult::Winner(Side::Player) => {
                let candidates = reward_candidates(&self.field);
                if !candidates.is_empty() {
                    events.push(MatchEvent::RewardCandidates {
                        cells: candidates.clone(),
                    });
                    self.phase = Phase::AwaitingReward { candidates };
                }
            }
            MatchResult::Winner(Side::Opponent) => {
                let forfeits = forfeit_candidates(&self.field);
                if let Some(card) = self.policy.choose_forfeit(&forfeits) {
                    debug!(%card, "card forfeited");
                    self.outcome.lost = Some(card);
                    events.push(MatchEvent::RewardApplied {
                        card,
                        recipient: Side::Opponent,
                    });
                }
            }
            MatchResult::Draw => {}
        }
    }

    fn choose_reward(&mut self, choice: Option<u8>, events: &mut Vec<MatchEvent>) -> Result<(), MoveRejection> {
        let Phase::AwaitingReward { candidates } = &self.phase else {
            return Err(if self.phase.is_done() {
                MoveRejection::MatchOver
            } else {
                MoveRejection::NotAwaitingReward
            });
        };

        let cell = match choice {
            Some(raw) => {
                let cell = CellIndex::parse(raw)?;
                if !candidates.contains(&cell) {
                    return Err(MoveRejection::InvalidRewardChoice(cell));
                }
                cell
            }
            None => match candidates.first() {
                Some(&first) => first,
                None => return Err(MoveRejection::NotAwaitingReward),
            },
        };

        if let Some(card) = self.field.card(cell).copied() {
            debug!(card = %card.id, "reward taken");
            self.outcome.gained = Some(card);
            events.push(MatchEvent::RewardApplied {
                card: card.id,
                recipient: Side::Player,
            });
        }
        self.phase = Phase::Done;
        Ok(())
    }

    fn record(&mut self, events: &[MatchEvent]) {
        self.log.extend(events.iter().cloned());
    }
}

/// Check hand sizes and id uniqueness, then reset every card to its
/// starting state in its side's hand.
fn validate_hands(player_hand: Vec<Card>, opponent_hand: Vec<Card>) -> Result<SideMap<Vec<Card>>, SetupError> {
    let mut seen = rustc_hash::FxHashSet::default();
    let mut hands = SideMap::from_pair(player_hand, opponent_hand);

    for side in Side::BOTH {
        let hand = &mut hands[side];
        if hand.len() != HAND_SIZE {
            return Err(SetupError::HandSize {
                side,
                expected: HAND_SIZE,
                actual: hand.len(),
            });
        }
        for card in hand.iter_mut() {
            if !seen.insert(card.id) {
                return Err(SetupError::DuplicateCard(card.id));
            }
            card.owner = side;
            card.origin = side;
            card.used = false;
            card.in_hand = true;
        }
    }

    Ok(hands)
}
