extern crate rand;
extern crate talon_core;

use talon_core::board::Board;

#[test]
fn repetition_detected_on_first_repeat() {
    let mut chess_board = Board::start_pos();
    assert!(!chess_board.is_repetition());

    // Shuffle a knight out and back; the position repeats with no capture,
    // pawn push, or castle in between to reset rule_50, so is_repetition()
    // should fire on this first repeat.
    chess_board.apply_uci_move("g1f3");
    assert!(!chess_board.is_repetition());
    chess_board.apply_uci_move("g8f6");
    assert!(!chess_board.is_repetition());
    chess_board.apply_uci_move("f3g1");
    assert!(!chess_board.is_repetition());
    chess_board.apply_uci_move("f6g8");
    // Back to the starting position: the first repeat.
    assert!(chess_board.is_repetition());
}

#[test]
fn fifty_move_rule_triggers_after_100_reversible_plies() {
    let mut chess_board = Board::start_pos();
    assert!(!chess_board.fifty_move_rule());

    // 25 round trips of a knight shuffle = 100 reversible half-moves, with no
    // capture, pawn push, or castle to reset the counter.
    for _ in 0..25 {
        chess_board.apply_uci_move("g1f3");
        chess_board.apply_uci_move("g8f6");
        chess_board.apply_uci_move("f3g1");
        chess_board.apply_uci_move("f6g8");
    }

    assert!(chess_board.fifty_move_rule());
}

#[test]
fn stalemate_is_not_checkmate() {
    // A textbook stalemate position: black to move, no legal moves, not in check.
    let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(board.stalemate());
    assert!(!board.checkmate());
    assert!(board.generate_moves().is_empty());
}
