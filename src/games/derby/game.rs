//! The derby memory game state machine.

use std::time::Duration;

use im::Vector;
use log::{debug, info, trace};

use crate::board::{build_board, Board};
use crate::cards::{Card, CardId, DerbyCatalog, DerbyRecord};
use crate::core::{Action, ActionRecord, GameConfig, GameRng, PlayerId, PlayerMap, Selection, TurnState};
use crate::error::Result;
use crate::events::{GameEvent, GameSummary, MatchAnnouncement, RoundResult};
use crate::rules::{evaluate_pair, GameResult};
use crate::scheduler::{DeferredQueue, DeferredTask, TaskHandle, TaskKind};

/// One game session: board, turn, pending pair and input lock.
///
/// All mutation goes through `select_card`, `reset_game` and the
/// deferred-task drivers (`advance`, `fire`, `resolve_pending`). Each
/// returns the events it caused.
#[derive(Clone, Debug)]
pub struct DerbyMemory {
    config: GameConfig,
    catalog: DerbyCatalog,
    rng: GameRng,
    board: Board,
    turn: TurnState,
    selection: Selection,
    /// Set while a pending pair is being resolved.
    locked: bool,
    deferred: DeferredQueue,
    history: Vector<ActionRecord>,
}

/// Builder for creating a `DerbyMemory` session.
///
/// ```
/// use std::time::Duration;
/// use derby_memory::games::derby::DerbyMemoryBuilder;
///
/// let game = DerbyMemoryBuilder::new()
///     .player_count(2)
///     .mismatch_delay(Duration::from_millis(800))
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(game.board().len(), 16);
/// assert!(!game.is_locked());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DerbyMemoryBuilder {
    catalog: Option<DerbyCatalog>,
    records: Option<Vec<DerbyRecord>>,
    config: GameConfig,
}

impl DerbyMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a validated catalog (default: the reference catalog).
    pub fn catalog(mut self, catalog: DerbyCatalog) -> Self {
        self.catalog = Some(catalog);
        self.records = None;
        self
    }

    /// Use raw derby records, validated when the session is built.
    pub fn records(mut self, records: Vec<DerbyRecord>) -> Self {
        self.records = Some(records);
        self.catalog = None;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.config.player_count = count;
        self
    }

    pub fn mismatch_delay(mut self, delay: Duration) -> Self {
        self.config.mismatch_delay = delay;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate configuration and catalog, then deal the first board.
    pub fn build(self) -> Result<DerbyMemory> {
        self.config.validate()?;

        let catalog = match (self.catalog, self.records) {
            (Some(catalog), _) => catalog,
            (None, Some(records)) => DerbyCatalog::new(records)?,
            (None, None) => DerbyCatalog::reference(),
        };

        let mut rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let board = build_board(&catalog, &mut rng);

        info!(
            "new session: {} derbies, {} player(s), seed {}",
            catalog.len(),
            self.config.player_count,
            rng.seed()
        );

        Ok(DerbyMemory {
            turn: TurnState::new(self.config.player_count),
            config: self.config,
            catalog,
            rng,
            board,
            selection: Selection::new(),
            locked: false,
            deferred: DeferredQueue::new(),
            history: Vector::new(),
        })
    }
}

impl DerbyMemory {
    /// Two-player session on the reference catalog with the given seed.
    pub fn with_seed(seed: u64) -> Result<Self> {
        DerbyMemoryBuilder::new().seed(seed).build()
    }

    // === Mutation ===

    /// Turn a card face-up for the active player.
    ///
    /// Silently ignored (no events, no state change) while the input lock
    /// is set, or when the card is unknown, already face-up or matched.
    /// The second card of a turn resolves the pair immediately; a
    /// mismatch keeps the lock until its flip-back task runs.
    pub fn select_card(&mut self, card: CardId) -> Vec<GameEvent> {
        if self.locked {
            trace!("ignoring {card}: pair resolution in progress");
            return Vec::new();
        }
        match self.board.get(card) {
            None => {
                trace!("ignoring {card}: not on the board");
                return Vec::new();
            }
            Some(c) if !c.is_selectable() => {
                trace!("ignoring {card}: already face-up");
                return Vec::new();
            }
            Some(_) => {}
        }

        let player = self.turn.active_player;
        self.board.flip_up(card);
        let sequence = self.selection.push(card) - 1;
        self.history.push_back(ActionRecord::new(
            player,
            Action::Select(card),
            self.turn.turn_number,
            sequence as u32,
        ));
        debug!("{player} reveals {card}");

        let mut events = vec![GameEvent::CardRevealed { card, player }];
        if let Some((first, second)) = self.selection.pair() {
            self.locked = true;
            self.resolve_pair(first, second, &mut events);
        }
        events
    }

    /// Deal a fresh board and start over with player 1.
    ///
    /// Always valid, including mid-delay: the new epoch voids any pending
    /// flip-back from the old board. The clock rewinds to zero and the
    /// history restarts with a single `Reset` record.
    pub fn reset_game(&mut self) -> Vec<GameEvent> {
        let epoch = self.deferred.invalidate();

        self.board = build_board(&self.catalog, &mut self.rng);
        self.turn.reset();
        self.selection.clear();
        self.locked = false;
        self.history.clear();
        self.history.push_back(ActionRecord::new(PlayerId::FIRST, Action::Reset, 0, 0));

        info!("board reset (epoch {epoch})");
        vec![GameEvent::BoardReset { epoch }]
    }

    /// Move the logical clock forward, running any task that falls due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for task in self.deferred.advance(elapsed) {
            self.run_task(task, &mut events);
        }
        events
    }

    /// Run a scheduled task now, for shells that keep their own timers.
    ///
    /// Stale or already-run handles are ignored.
    pub fn fire(&mut self, handle: TaskHandle) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.deferred.is_current(handle) {
            trace!("ignoring task {}: issued before reset (epoch {})", handle.id(), handle.epoch());
            return events;
        }
        match self.deferred.take(handle) {
            Some(task) => self.run_task(task, &mut events),
            None => trace!("ignoring task {}: already run", handle.id()),
        }
        events
    }

    /// Run every pending task immediately, ignoring deadlines.
    pub fn resolve_pending(&mut self) -> Vec<GameEvent> {
        let handles: Vec<TaskHandle> = self.deferred.pending().map(|t| t.handle).collect();
        handles.into_iter().flat_map(|h| self.fire(h)).collect()
    }

    fn resolve_pair(&mut self, first: CardId, second: CardId, events: &mut Vec<GameEvent>) {
        let outcome = evaluate_pair(&self.board, first, second);
        let player = self.turn.active_player;

        if !outcome.is_match {
            let flip_back = self.deferred.schedule(
                self.config.mismatch_delay,
                TaskKind::FlipBack { first, second },
            );
            debug!(
                "{player} missed with {first}/{second}, flip-back due in {:?}",
                self.config.mismatch_delay
            );
            events.push(GameEvent::Round(RoundResult::Mismatch {
                first,
                second,
                player,
                flip_back,
            }));
            return;
        }

        let (a, b) = (self.card(first), self.card(second));
        let group = a.group;
        let derby_name = a.face.derby_name.clone();
        let first_team = a.face.team.name.clone();
        let second_team = b.face.team.name.clone();

        self.board.mark_group_matched(group);
        let score = self.turn.award_point();

        let announcement = MatchAnnouncement {
            player,
            group,
            derby_name,
            first_team,
            second_team,
            score,
            is_game_complete: outcome.is_game_complete,
        };
        info!("{player} found the {} ({score} pairs)", announcement.derby_name);
        events.push(GameEvent::Round(RoundResult::Match(announcement)));

        if outcome.is_game_complete {
            let summary = GameSummary::from_scores(self.turn.scores.clone());
            info!("game complete: {}", summary.result);
            events.push(GameEvent::GameComplete(summary));
        }

        self.turn.advance_turn();
        self.selection.clear();
        self.locked = false;
    }

    fn run_task(&mut self, task: DeferredTask, events: &mut Vec<GameEvent>) {
        match task.kind {
            TaskKind::FlipBack { first, second } => {
                self.board.flip_down(first);
                self.board.flip_down(second);
                events.push(GameEvent::CardsHidden { first, second });

                let from = self.turn.active_player;
                let to = self.turn.pass_turn();
                if from != to {
                    debug!("turn passes from {from} to {to}");
                    events.push(GameEvent::TurnPassed { from, to });
                }

                self.turn.advance_turn();
                self.selection.clear();
                self.locked = false;
            }
        }
    }

    fn card(&self, card: CardId) -> &Card {
        match self.board.get(card) {
            Some(c) => c,
            None => panic!("{card} is not on the board"),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// O(1) copy of the board for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.turn.active_player
    }

    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.turn.scores
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Every pair has been found; only a reset changes the board now.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.board.is_cleared()
    }

    /// Final result once the board is cleared.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.is_complete()
            .then(|| GameResult::from_scores(&self.turn.scores))
    }

    /// Cards the active player may select right now.
    #[must_use]
    pub fn selectable_cards(&self) -> Vec<CardId> {
        if self.locked {
            return Vec::new();
        }
        self.board.face_down().collect()
    }

    /// Handle of the pending flip-back, if a mismatch is on display.
    #[must_use]
    pub fn pending_flip_back(&self) -> Option<TaskHandle> {
        self.deferred.pending().next().map(|t| t.handle)
    }

    /// When the next deferred task falls due, on the logical clock.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.deferred.next_deadline()
    }

    /// Logical time driven by `advance`, since the current board was dealt.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.deferred.now()
    }

    /// Board generation; bumped by every reset.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.deferred.epoch()
    }

    /// Accepted actions on the current board, starting with the `Reset`
    /// that dealt it (if any).
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn catalog(&self) -> &DerbyCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the session RNG, for replaying a session.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
