//! Session tests: selection gating, pair resolution, the mismatch pause,
//! completion and reset, driven through the public `DerbyMemory` API.

use std::time::Duration;

use proptest::prelude::*;

use derby_memory::cards::{CardId, DerbyRecord, GroupId, TeamInfo};
use derby_memory::core::{Action, PlayerId};
use derby_memory::events::{GameEvent, RoundResult};
use derby_memory::games::derby::{DerbyMemory, DerbyMemoryBuilder};
use derby_memory::rules::GameResult;

const P1: PlayerId = PlayerId(0);
const P2: PlayerId = PlayerId(1);

/// Derby `g` pairs team "{g}A" with team "{g}B".
fn records(derbies: u32) -> Vec<DerbyRecord> {
    (1..=derbies)
        .map(|g| {
            DerbyRecord::new(
                GroupId::new(g),
                format!("Derby {g}"),
                TeamInfo::new(format!("{g}A"), format!("{g}a.png")),
                TeamInfo::new(format!("{g}B"), format!("{g}b.png")),
            )
        })
        .collect()
}

fn session(derbies: u32, players: usize, seed: u64) -> DerbyMemory {
    DerbyMemoryBuilder::new()
        .records(records(derbies))
        .player_count(players)
        .seed(seed)
        .build()
        .unwrap()
}

/// Current board position of a team's card.
fn card(game: &DerbyMemory, team: &str) -> CardId {
    game.board()
        .iter()
        .find(|c| c.face.team.name == team)
        .map(|c| c.card_id)
        .unwrap()
}

fn wait_out_pause(game: &mut DerbyMemory) -> Vec<GameEvent> {
    game.advance(Duration::from_millis(1000))
}

// === Gating ===

#[test]
fn test_select_ignored_while_locked() {
    let mut game = session(3, 2, 1);
    let (a, c, e) = (card(&game, "1A"), card(&game, "2A"), card(&game, "3A"));

    game.select_card(a);
    game.select_card(c);
    assert!(game.is_locked());

    let before = game.snapshot();
    assert!(game.select_card(e).is_empty());
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.selection().as_slice(), &[a, c]);
}

#[test]
fn test_select_ignored_for_face_up_card() {
    let mut game = session(2, 2, 1);
    let a = card(&game, "1A");

    game.select_card(a);
    assert!(game.select_card(a).is_empty());
    assert_eq!(game.selection().len(), 1);
    assert!(!game.is_locked());
}

#[test]
fn test_select_ignored_for_matched_card() {
    let mut game = session(2, 2, 1);
    let (a, b) = (card(&game, "1A"), card(&game, "1B"));

    game.select_card(a);
    game.select_card(b);

    assert!(game.select_card(a).is_empty());
    assert!(game.select_card(b).is_empty());
    assert!(game.selection().is_empty());
    assert_eq!(game.scores()[P1], 1);
}

#[test]
fn test_select_ignored_for_unknown_card() {
    let mut game = session(2, 2, 1);
    let before = game.snapshot();

    assert!(game.select_card(CardId::new(4)).is_empty());
    assert!(game.select_card(CardId::new(u32::MAX)).is_empty());
    assert_eq!(game.snapshot(), before);
    assert!(game.history().is_empty());
}

// === Resolution ===

#[test]
fn test_match_announcement_in_selection_order() {
    let mut game = session(2, 2, 3);
    let (a, b) = (card(&game, "1A"), card(&game, "1B"));

    game.select_card(b);
    let events = game.select_card(a);
    let announcement = events[1].as_match().unwrap();

    assert_eq!(announcement.first_team, "1B");
    assert_eq!(announcement.second_team, "1A");
    assert_eq!(announcement.group, GroupId::new(1));
    assert_eq!(announcement.player, P1);
    assert_eq!(
        announcement.to_string(),
        "Match! 1B vs 1A: the Derby 1. Player 1 goes again."
    );
    assert!(game.board().get(a).unwrap().is_matched());
    assert!(game.board().get(b).unwrap().is_matched());
}

#[test]
fn test_mismatch_via_fire() {
    let mut game = session(2, 2, 3);
    let (a, c) = (card(&game, "1A"), card(&game, "2A"));

    game.select_card(a);
    let events = game.select_card(c);
    let handle = match &events[1] {
        GameEvent::Round(RoundResult::Mismatch { first, second, player, flip_back }) => {
            assert_eq!((*first, *second, *player), (a, c, P1));
            *flip_back
        }
        other => panic!("expected a mismatch, got {other:?}"),
    };
    assert_eq!(game.pending_flip_back(), Some(handle));
    assert_eq!(game.next_deadline(), Some(Duration::from_millis(1000)));

    let events = game.fire(handle);
    assert_eq!(events[0], GameEvent::CardsHidden { first: a, second: c });
    assert_eq!(game.active_player(), P2);
    assert!(game.pending_flip_back().is_none());

    // Already run: a second fire is a no-op.
    assert!(game.fire(handle).is_empty());
}

#[test]
fn test_custom_delay() {
    let mut game = DerbyMemoryBuilder::new()
        .records(records(2))
        .mismatch_delay(Duration::from_millis(250))
        .seed(8)
        .build()
        .unwrap();
    let (a, c) = (card(&game, "1A"), card(&game, "2B"));

    game.select_card(a);
    game.select_card(c);

    assert!(game.advance(Duration::from_millis(249)).is_empty());
    assert_eq!(game.advance(Duration::from_millis(1)).len(), 2);
    assert_eq!(game.clock(), Duration::from_millis(250));
}

#[test]
fn test_resolve_pending_skips_the_wait() {
    let mut game = session(2, 2, 3);
    game.select_card(card(&game, "1A"));
    game.select_card(card(&game, "2A"));

    let events = game.resolve_pending();

    assert_eq!(events.len(), 2);
    assert!(!game.is_locked());
    assert_eq!(game.clock(), Duration::ZERO);
}

// === Full games ===

#[test]
fn test_two_derby_game_end_to_end() {
    let mut game = session(2, 2, 42);
    let (a, b, c, d) = (
        card(&game, "1A"),
        card(&game, "1B"),
        card(&game, "2A"),
        card(&game, "2B"),
    );

    // Player 1 misses.
    assert_eq!(game.select_card(a), vec![GameEvent::CardRevealed { card: a, player: P1 }]);
    let events = game.select_card(c);
    assert!(matches!(events[1], GameEvent::Round(RoundResult::Mismatch { .. })));
    assert_eq!(
        wait_out_pause(&mut game),
        vec![
            GameEvent::CardsHidden { first: a, second: c },
            GameEvent::TurnPassed { from: P1, to: P2 },
        ]
    );

    // Player 2 finds derby 1 and goes again.
    game.select_card(a);
    let events = game.select_card(b);
    let first = events[1].as_match().unwrap();
    assert_eq!(first.player, P2);
    assert_eq!(first.score, 1);
    assert!(!first.is_game_complete);
    assert_eq!(game.active_player(), P2);

    // ...then clears the board.
    game.select_card(c);
    let events = game.select_card(d);
    assert_eq!(events.len(), 3);
    let last = events[1].as_match().unwrap();
    assert!(last.is_game_complete);
    assert_eq!(last.score, 2);

    let summary = events[2].as_summary().unwrap();
    assert_eq!(summary.result, GameResult::Winner(P2));
    assert_eq!(
        summary.to_string(),
        "Complete! Every derby found. Player 1: 0, Player 2: 2. Player 2 wins."
    );

    assert!(game.is_complete());
    assert_eq!(game.result(), Some(GameResult::Winner(P2)));
    assert!(game.selectable_cards().is_empty());
}

#[test]
fn test_single_derby_completes_on_first_pair() {
    let mut game = session(1, 2, 6);
    game.select_card(CardId::new(0));
    let events = game.select_card(CardId::new(1));

    assert!(events[1].as_match().unwrap().is_game_complete);
    assert!(events[2].as_summary().is_some());
}

#[test]
fn test_tie_game() {
    let mut game = session(4, 2, 17);
    // P1 misses, P2 takes derbies 1 and 2, misses, P1 takes 3 and 4.
    game.select_card(card(&game, "1A"));
    game.select_card(card(&game, "2A"));
    wait_out_pause(&mut game);

    for g in 1..=2 {
        game.select_card(card(&game, &format!("{g}A")));
        game.select_card(card(&game, &format!("{g}B")));
    }
    game.select_card(card(&game, "3A"));
    game.select_card(card(&game, "4A"));
    wait_out_pause(&mut game);

    game.select_card(card(&game, "3A"));
    game.select_card(card(&game, "3B"));
    game.select_card(card(&game, "4B"));
    let events = game.select_card(card(&game, "4A"));

    let summary = events.last().and_then(GameEvent::as_summary).unwrap();
    assert_eq!(summary.result, GameResult::Draw);
    assert!(summary.to_string().ends_with("Player 1: 2, Player 2: 2. It's a tie."));
}

#[test]
fn test_solo_player_keeps_turn_after_mismatch() {
    let mut game = session(2, 1, 5);
    game.select_card(card(&game, "1A"));
    game.select_card(card(&game, "2A"));

    let events = wait_out_pause(&mut game);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], GameEvent::CardsHidden { .. }));
    assert_eq!(game.active_player(), P1);
}

#[test]
fn test_turn_rotates_through_three_players() {
    let mut game = session(3, 3, 5);
    let mut seen = vec![game.active_player()];

    for _ in 0..3 {
        game.select_card(card(&game, "1A"));
        game.select_card(card(&game, "2A"));
        wait_out_pause(&mut game);
        seen.push(game.active_player());
    }

    assert_eq!(seen, vec![PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(0)]);
}

// === Reset ===

#[test]
fn test_reset_is_fresh_start() {
    let mut game = session(3, 2, 9);
    game.select_card(card(&game, "1A"));
    game.select_card(card(&game, "1B"));
    game.select_card(card(&game, "2A"));

    let events = game.reset_game();

    assert_eq!(events, vec![GameEvent::BoardReset { epoch: 1 }]);
    assert_eq!(game.board().face_down().count(), 6);
    assert_eq!(game.scores()[P1], 0);
    assert_eq!(game.active_player(), P1);
    assert!(game.selection().is_empty());
    assert!(!game.is_locked());
    assert!(!game.is_complete());
}

#[test]
fn test_reset_twice() {
    let mut game = session(3, 2, 9);
    game.reset_game();
    let events = game.reset_game();

    assert_eq!(events, vec![GameEvent::BoardReset { epoch: 2 }]);
    assert_eq!(game.board().unmatched_count(), 6);
    assert_eq!(game.turn().turn_number, 1);
}

#[test]
fn test_reset_after_completion() {
    let mut game = session(1, 2, 9);
    game.select_card(CardId::new(0));
    game.select_card(CardId::new(1));
    assert!(game.is_complete());

    game.reset_game();
    assert!(!game.is_complete());
    assert!(game.result().is_none());
    assert_eq!(game.selectable_cards().len(), 2);
}

#[test]
fn test_reset_voids_pending_flip_back() {
    let mut game = session(3, 2, 12);
    game.select_card(card(&game, "1A"));
    let events = game.select_card(card(&game, "2A"));
    let handle = match &events[1] {
        GameEvent::Round(RoundResult::Mismatch { flip_back, .. }) => *flip_back,
        other => panic!("expected a mismatch, got {other:?}"),
    };

    game.reset_game();
    let fresh = game.snapshot();

    assert!(game.fire(handle).is_empty());
    assert!(game.advance(Duration::from_secs(5)).is_empty());
    assert_eq!(game.snapshot(), fresh);
    assert_eq!(game.active_player(), P1);
    assert!(!game.is_locked());

    // The new board is fully playable.
    let a = card(&game, "3A");
    assert_eq!(game.select_card(a).len(), 1);
}

#[test]
fn test_reset_history_matches_fresh_session() {
    let mut played = session(3, 2, 21);
    played.select_card(card(&played, "1A"));
    played.select_card(card(&played, "2A"));
    wait_out_pause(&mut played);
    played.reset_game();
    played.select_card(card(&played, "3A"));
    played.select_card(card(&played, "3B"));

    let mut fresh = session(3, 2, 21);
    fresh.select_card(card(&fresh, "3A"));
    fresh.select_card(card(&fresh, "3B"));

    let shape = |game: &DerbyMemory| -> Vec<_> {
        game.history()
            .iter()
            .map(|r| (r.player, r.action.card().is_some(), r.turn, r.sequence))
            .collect()
    };
    let reset_shape = shape(&played);
    assert_eq!(played.history()[0].action, Action::Reset);
    assert_eq!(reset_shape[1..], shape(&fresh)[..]);
    assert_eq!(played.clock(), Duration::ZERO);
}

#[test]
fn test_unbounded_delay_is_safe() {
    let mut game = DerbyMemoryBuilder::new()
        .records(records(2))
        .mismatch_delay(Duration::MAX)
        .seed(1)
        .build()
        .unwrap();

    game.advance(Duration::from_millis(1));
    game.select_card(card(&game, "1A"));
    game.select_card(card(&game, "2A"));

    assert!(game.advance(Duration::from_secs(86_400)).is_empty());
    assert!(game.is_locked());
    assert_eq!(game.advance(Duration::MAX).len(), 2);
    assert_eq!(game.active_player(), P2);
}

// === Properties ===

#[derive(Clone, Copy, Debug)]
enum Step {
    Select(u32),
    Wait(u64),
    Reset,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        8 => (0u32..10).prop_map(Step::Select),
        3 => (0u64..1500).prop_map(Step::Wait),
        1 => Just(Step::Reset),
    ]
}

proptest! {
    #[test]
    fn prop_session_invariants(seed in any::<u64>(), steps in prop::collection::vec(step(), 1..80)) {
        let mut game = session(4, 2, seed);

        for step in steps {
            let before = game.snapshot();
            let was_locked = game.is_locked();

            let events = match step {
                Step::Select(id) => game.select_card(CardId::new(id)),
                Step::Wait(ms) => game.advance(Duration::from_millis(ms)),
                Step::Reset => game.reset_game(),
            };

            if was_locked {
                if let Step::Select(_) = step {
                    prop_assert!(events.is_empty());
                    prop_assert_eq!(&game.snapshot(), &before);
                }
            }

            let board = game.board();
            let matched = board.len() - board.unmatched_count();
            let scored: u32 = game.scores().iter().map(|(_, s)| *s).sum();
            prop_assert_eq!(matched, 2 * scored as usize);

            let face_up_unmatched = board.iter().filter(|c| c.is_flipped() && !c.is_matched()).count();
            prop_assert_eq!(face_up_unmatched, game.selection().len());
            prop_assert_eq!(game.is_locked(), game.selection().len() == 2);
            prop_assert_eq!(game.is_locked(), game.pending_flip_back().is_some());
        }
    }
}
