//! Board and outcome integration tests.

use connect_four_mcts::core::{BoardError, BoardState, Cell, Player};
use connect_four_mcts::rules::outcome::has_connect_four;
use connect_four_mcts::rules::Outcome;
use proptest::prelude::*;

/// Play `picks` as indices into the current legal moves until the game ends.
fn play(width: usize, height: usize, picks: &[usize]) -> Vec<BoardState> {
    let mut board = BoardState::new(width, height, Player::A);
    let mut history = vec![board.clone()];

    for &pick in picks {
        let legal = board.legal_moves();
        if legal.is_empty() {
            break;
        }
        board.apply_move(legal[pick % legal.len()]).unwrap();
        board.switch_mover();
        history.push(board.clone());
    }
    history
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_empty_board_offers_every_column() {
    let board = BoardState::new(7, 6, Player::A);

    assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(board.outcome(), Outcome::InProgress);
}

#[test]
fn test_full_column_is_not_legal() {
    let mut board = BoardState::new(7, 6, Player::A);
    for _ in 0..6 {
        board.apply_move(0).unwrap();
        board.switch_mover();
    }

    assert_eq!(board.legal_moves(), vec![1, 2, 3, 4, 5, 6]);
    assert!(matches!(board.apply_move(0), Err(BoardError::ColumnFull { column: 0 })));
}

#[test]
fn test_vertical_four_wins() {
    let mut board = BoardState::new(7, 6, Player::A);
    for _ in 0..4 {
        board.apply_move(0).unwrap();
    }

    assert_eq!(board.outcome(), Outcome::AWon);
    assert!(board.legal_moves().is_empty());
}

#[test]
fn test_from_grid_matches_played_position() {
    let mut played = BoardState::new(3, 2, Player::A);
    for column in [0, 2, 0] {
        played.apply_move(column).unwrap();
        played.switch_mover();
    }

    let grid = vec![
        vec![Cell::A, Cell::A],
        vec![Cell::Empty, Cell::Empty],
        vec![Cell::B, Cell::Empty],
    ];
    let built = BoardState::from_grid(&grid, Player::B).unwrap();

    assert_eq!(played, built);
    assert_eq!(built.legal_moves(), vec![1, 2]);
}

#[test]
fn test_from_grid_rejects_floating_marker() {
    let grid = vec![vec![Cell::Empty, Cell::A], vec![Cell::Empty; 2]];
    let err = BoardState::from_grid(&grid, Player::A).unwrap_err();

    assert!(matches!(err, BoardError::MalformedGrid(_)));
    assert!(err.to_string().contains("floating"));
}

#[test]
fn test_board_serialization() {
    let history = play(7, 6, &[3, 3, 2, 4, 1]);
    let board = history.last().unwrap();

    let json = serde_json::to_string(board).unwrap();
    let restored: BoardState = serde_json::from_str(&json).unwrap();

    assert_eq!(board, &restored);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_legal_moves_sorted_unique_and_open(
        width in 1usize..9,
        height in 1usize..8,
        picks in prop::collection::vec(0usize..16, 0..80)
    ) {
        for board in play(width, height, &picks) {
            let legal = board.legal_moves();
            prop_assert!(legal.windows(2).all(|w| w[0] < w[1]));
            for &column in &legal {
                prop_assert!(column < width);
                prop_assert!(!board.is_column_full(column));
            }
            if board.outcome().is_decided() {
                prop_assert!(legal.is_empty());
            }
        }
    }

    #[test]
    fn prop_each_move_adds_one_marker(
        picks in prop::collection::vec(0usize..7, 0..60)
    ) {
        let history = play(7, 6, &picks);
        for (i, board) in history.iter().enumerate() {
            prop_assert_eq!(board.marker_count(), i);
            prop_assert_eq!(board.width(), 7);
            prop_assert_eq!(board.height(), 6);
        }
    }

    #[test]
    fn prop_mover_alternates(
        picks in prop::collection::vec(0usize..7, 0..60)
    ) {
        for (i, board) in play(7, 6, &picks).iter().enumerate() {
            let expected = if i % 2 == 0 { Player::A } else { Player::B };
            prop_assert_eq!(board.mover(), expected);
        }
    }

    #[test]
    fn prop_game_ends_with_at_most_one_winner(
        picks in prop::collection::vec(0usize..7, 42..80)
    ) {
        let history = play(7, 6, &picks);
        let last = history.last().unwrap();

        // Long enough pick lists always finish the game.
        prop_assert!(last.outcome().is_decided());

        // Play stops on the first decided position, so only the final board
        // can be decided.
        for board in &history[..history.len() - 1] {
            prop_assert_eq!(board.outcome(), Outcome::InProgress);
        }

        for board in &history {
            let a = has_connect_four(board, Cell::A);
            let b = has_connect_four(board, Cell::B);
            prop_assert!(!(a && b));
            prop_assert_eq!(board.outcome() == Outcome::AWon, a);
            prop_assert_eq!(board.outcome() == Outcome::BWon, b);
        }
    }

    #[test]
    fn prop_clone_is_independent(
        picks in prop::collection::vec(0usize..7, 0..20),
        column in 0usize..7
    ) {
        let original = play(7, 6, &picks).pop().unwrap();
        let snapshot = original.clone();
        let mut copy = original.clone();

        if copy.apply_move(column).is_ok() {
            copy.switch_mover();
            prop_assert_ne!(&copy, &original);
        }
        prop_assert_eq!(original, snapshot);
    }
}
