//! Headless self-play.
//!
//! Plays complete sessions without a presentation shell, waiting out each
//! mismatch pause on the logical clock. Used by the `selfplay` binary, the
//! benches and end-to-end tests.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, GroupId};
use crate::core::{GameRng, DEFAULT_MISMATCH_DELAY};
use crate::error::Result;
use crate::events::GameEvent;
use crate::games::derby::{DerbyMemory, DerbyMemoryBuilder};
use crate::rules::GameResult;

/// How a bot picks its next card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Uniform over the selectable cards.
    Random,
    /// Remembers every revealed face and completes known pairs first.
    #[default]
    Recall,
}

/// Configuration for a batch of self-play games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub games: usize,
    /// Seats at the table, all driven by the same strategy.
    pub players: usize,
    /// Seed of the first game; game `i` uses `seed + i`.
    pub seed: u64,
    pub strategy: Strategy,
    /// Accepted selections before a game is abandoned.
    pub max_selections: usize,
    pub mismatch_delay: Duration,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            games: 10,
            players: 2,
            seed: 0,
            strategy: Strategy::Recall,
            max_selections: 10_000,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
        }
    }
}

/// Outcome of one self-played game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Position in the batch.
    pub game_id: usize,
    pub seed: u64,
    pub strategy: Strategy,
    /// Accepted selections (two per turn).
    pub selections: usize,
    pub mismatches: usize,
    /// Completed turns.
    pub turns: u32,
    /// Final score per seat.
    pub scores: Vec<u32>,
    /// `None` when the game hit `max_selections` first.
    pub result: Option<GameResult>,
    /// Logical time spent, mismatch pauses included.
    pub elapsed: Duration,
}

impl GameRecord {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }
}

/// Aggregate over a batch of games.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub games: usize,
    pub completed: usize,
    /// Outright wins per seat.
    pub wins: Vec<usize>,
    /// Games with more than one player on the top score.
    pub shared: usize,
    pub total_selections: usize,
    pub total_mismatches: usize,
}

impl SelfPlayStats {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let seats = records.iter().map(|r| r.scores.len()).max().unwrap_or(0);
        let mut stats = SelfPlayStats {
            games: records.len(),
            wins: vec![0; seats],
            ..Default::default()
        };

        for record in records {
            stats.total_selections += record.selections;
            stats.total_mismatches += record.mismatches;
            match &record.result {
                Some(GameResult::Winner(player)) => {
                    stats.completed += 1;
                    stats.wins[player.index()] += 1;
                }
                Some(_) => {
                    stats.completed += 1;
                    stats.shared += 1;
                }
                None => {}
            }
        }
        stats
    }

    /// Mean accepted selections per game.
    #[must_use]
    pub fn mean_selections(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_selections as f64 / self.games as f64
    }
}

impl fmt::Display for SelfPlayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games, {} complete, {:.1} selections/game, {} mismatches",
            self.games,
            self.completed,
            self.mean_selections(),
            self.total_mismatches
        )?;
        for (seat, wins) in self.wins.iter().enumerate() {
            write!(f, ", P{} wins {}", seat + 1, wins)?;
        }
        write!(f, ", shared {}", self.shared)
    }
}

/// Card picker for one table. All seats share it, so a `Recall` bot
/// remembers faces revealed by every player.
struct Bot {
    strategy: Strategy,
    rng: GameRng,
    seen: FxHashMap<CardId, GroupId>,
}

impl Bot {
    fn new(strategy: Strategy, rng: GameRng) -> Self {
        Bot {
            strategy,
            rng,
            seen: FxHashMap::default(),
        }
    }

    fn observe(&mut self, game: &DerbyMemory, event: &GameEvent) {
        match event {
            GameEvent::CardRevealed { card, .. } => {
                if let Some(c) = game.board().get(*card) {
                    self.seen.insert(*card, c.group);
                }
            }
            GameEvent::BoardReset { .. } => self.seen.clear(),
            _ => {}
        }
    }

    fn choose(&mut self, game: &DerbyMemory) -> Option<CardId> {
        let selectable = game.selectable_cards();
        if selectable.is_empty() {
            return None;
        }
        match self.strategy {
            Strategy::Random => self.rng.choose(&selectable).copied(),
            Strategy::Recall => self
                .recall(game, &selectable)
                .or_else(|| self.rng.choose(&selectable).copied()),
        }
    }

    fn recall(&mut self, game: &DerbyMemory, selectable: &[CardId]) -> Option<CardId> {
        let known = |card: &CardId| self.seen.get(card).copied();

        match game.selection().as_slice() {
            [first] => {
                let group = game.board().get(*first)?.group;
                if let Some(partner) = selectable.iter().find(|c| known(*c) == Some(group)) {
                    return Some(*partner);
                }
            }
            _ => {
                let mut by_group: FxHashMap<GroupId, usize> = FxHashMap::default();
                for group in selectable.iter().filter_map(known) {
                    *by_group.entry(group).or_default() += 1;
                }
                let pair = selectable
                    .iter()
                    .find(|c| known(*c).is_some_and(|g| by_group.get(&g) == Some(&2)));
                if let Some(card) = pair {
                    return Some(*card);
                }
            }
        }

        let unseen: Vec<CardId> = selectable
            .iter()
            .copied()
            .filter(|c| !self.seen.contains_key(c))
            .collect();
        self.rng.choose(&unseen).copied()
    }
}

/// Play one game to completion (or `max_selections`) with the given seed.
pub fn play_game(config: &SelfPlayConfig, seed: u64) -> Result<GameRecord> {
    let mut game = DerbyMemoryBuilder::new()
        .player_count(config.players)
        .mismatch_delay(config.mismatch_delay)
        .seed(seed)
        .build()?;
    let mut bot = Bot::new(config.strategy, GameRng::new(seed).fork());

    let mut selections = 0;
    let mut mismatches = 0;

    while !game.is_complete() && selections < config.max_selections {
        let Some(card) = bot.choose(&game) else {
            break;
        };

        let events = game.select_card(card);
        selections += 1;
        for event in &events {
            bot.observe(&game, event);
            if let GameEvent::Round(round) = event {
                if !round.is_match() {
                    mismatches += 1;
                }
            }
        }

        if let Some(deadline) = game.next_deadline() {
            let wait = deadline.saturating_sub(game.clock());
            game.advance(wait);
        }
    }

    let result = game.result();
    if result.is_none() {
        warn!("game with seed {seed} stopped after {selections} selections");
    }

    Ok(GameRecord {
        game_id: 0,
        seed,
        strategy: config.strategy,
        selections,
        mismatches,
        turns: game.turn().turn_number - 1,
        scores: game.scores().iter().map(|(_, score)| *score).collect(),
        result,
        elapsed: game.clock(),
    })
}

/// Play `config.games` games with consecutive seeds.
pub fn run(config: &SelfPlayConfig) -> Result<Vec<GameRecord>> {
    let mut records = Vec::with_capacity(config.games);

    for game_id in 0..config.games {
        let seed = config.seed.wrapping_add(game_id as u64);
        let mut record = play_game(config, seed)?;
        record.game_id = game_id;

        debug!(
            "game {game_id} (seed {seed}): {} selections, scores {:?}",
            record.selections, record.scores
        );
        records.push(record);
    }

    info!("{}", SelfPlayStats::from_records(&records));
    Ok(records)
}
