//! Check, checkmate and stalemate detection, and self-check rejection.

use rchess::game::board::Board;
use rchess::game::piece::{Color, PieceKind};
use rchess::{ChessError, Game, GameStatus, MoveError, Promotion, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn board_with(pieces: &[(Color, PieceKind, &str)]) -> Board {
    let mut board = Board::empty();
    for &(color, kind, at) in pieces {
        board.place(color, kind, sq(at));
    }
    board
}

#[test]
fn test_rook_gives_check_until_blocked() {
    let mut board = board_with(&[
        (Color::Black, PieceKind::King, "e8"),
        (Color::White, PieceKind::Rook, "e1"),
        (Color::White, PieceKind::King, "a1"),
    ]);
    assert!(board.is_check(Color::Black));
    assert!(!board.is_check(Color::White));

    board.place(Color::Black, PieceKind::Knight, sq("e5"));
    assert!(!board.is_check(Color::Black));
}

#[test]
fn test_pawn_checks_diagonally_only() {
    let mut board = board_with(&[
        (Color::Black, PieceKind::King, "e5"),
        (Color::White, PieceKind::Pawn, "e4"),
        (Color::White, PieceKind::King, "a1"),
    ]);
    assert!(!board.is_check(Color::Black));
    board.place(Color::White, PieceKind::Pawn, sq("d4"));
    assert!(board.is_check(Color::Black));
}

#[test]
fn test_queen_mate_on_back_rank() {
    // Queen on e7 guarded by the king on e6.
    let mut board = board_with(&[
        (Color::Black, PieceKind::King, "e8"),
        (Color::White, PieceKind::Queen, "e7"),
        (Color::White, PieceKind::King, "e6"),
    ]);
    let before = board.clone();
    assert!(board.is_checkmate(Color::Black));
    assert_eq!(board, before, "the probe must restore every square");
}

#[test]
fn test_unguarded_queen_can_be_captured() {
    let mut board = board_with(&[
        (Color::Black, PieceKind::King, "e8"),
        (Color::White, PieceKind::Queen, "e7"),
        (Color::White, PieceKind::King, "a1"),
    ]);
    assert!(board.is_check(Color::Black));
    assert!(!board.is_checkmate(Color::Black));
}

#[test]
fn test_single_flight_square_prevents_mate() {
    let mut board = board_with(&[
        (Color::Black, PieceKind::King, "h8"),
        (Color::White, PieceKind::Queen, "h6"),
        (Color::White, PieceKind::King, "e1"),
    ]);
    // g8 is the only square not covered by the queen.
    assert!(board.is_check(Color::Black));
    assert!(!board.is_checkmate(Color::Black));
    assert!(board.is_legal_move(sq("h8"), sq("g8")));
    assert!(!board.is_legal_move(sq("h8"), sq("h7")));

    board.place(Color::White, PieceKind::Knight, sq("e7"));
    assert!(board.is_checkmate(Color::Black));
}

#[test]
fn test_back_rank_mate_and_interposition() {
    let mut board = board_with(&[
        (Color::Black, PieceKind::King, "g8"),
        (Color::Black, PieceKind::Pawn, "f7"),
        (Color::Black, PieceKind::Pawn, "g7"),
        (Color::Black, PieceKind::Pawn, "h7"),
        (Color::White, PieceKind::Rook, "a8"),
        (Color::White, PieceKind::King, "g1"),
    ]);
    assert!(board.is_checkmate(Color::Black));

    // A rook that can step in between.
    board.place(Color::Black, PieceKind::Rook, sq("d6"));
    assert!(board.is_check(Color::Black));
    assert!(!board.is_checkmate(Color::Black));
    assert!(board.is_legal_move(sq("d6"), sq("d8")));
}

#[test]
fn test_pawn_push_can_block_check() {
    let mut board = board_with(&[
        (Color::White, PieceKind::King, "h1"),
        (Color::White, PieceKind::Pawn, "h2"),
        (Color::White, PieceKind::Pawn, "f2"),
        (Color::Black, PieceKind::Bishop, "d5"),
        (Color::Black, PieceKind::Rook, "g8"),
        (Color::Black, PieceKind::King, "a8"),
    ]);
    assert!(board.is_check(Color::White));
    assert!(!board.is_checkmate(Color::White));
    assert!(board.is_legal_move(sq("f2"), sq("f3")));
    assert!(!board.is_legal_move(sq("h2"), sq("h3")));

    board.set_piece_at(None, sq("f2"));
    assert!(board.is_checkmate(Color::White));
}

#[test]
fn test_checkmate_of_side_not_to_move() {
    let mut board = board_with(&[
        (Color::Black, PieceKind::King, "e8"),
        (Color::White, PieceKind::Queen, "e7"),
        (Color::White, PieceKind::King, "e6"),
    ]);
    board.set_current_player(Color::White);
    assert!(board.is_checkmate(Color::Black));
    assert_eq!(board.current_player(), Color::White);
}

#[test]
fn test_stalemate() {
    let mut board = board_with(&[
        (Color::Black, PieceKind::King, "a8"),
        (Color::White, PieceKind::Queen, "b6"),
        (Color::White, PieceKind::King, "c7"),
    ]);
    board.set_current_player(Color::Black);
    assert!(!board.is_check(Color::Black));
    assert!(board.is_stalemate(Color::Black));
    assert!(!board.is_checkmate(Color::Black));

    let mut game = Game::from_board(board);
    assert_eq!(game.status(), Ok(GameStatus::Stalemate));
    assert_eq!(
        game.play(sq("a8"), sq("a7"), &mut Promotion::Queen),
        Err(ChessError::IllegalMove(MoveError::GameOver))
    );
}

#[test]
fn test_pinned_piece_cannot_move() {
    let board = board_with(&[
        (Color::White, PieceKind::King, "e1"),
        (Color::White, PieceKind::Bishop, "e2"),
        (Color::Black, PieceKind::Rook, "e8"),
        (Color::Black, PieceKind::King, "a8"),
    ]);
    let mut game = Game::from_board(board.clone());
    assert_eq!(
        game.play(sq("e2"), sq("d3"), &mut Promotion::Queen),
        Err(ChessError::IllegalMove(MoveError::LeavesKingInCheck(Color::White)))
    );
    assert_eq!(game.board(), &board);
    assert_eq!(game.current_player(), Color::White);

    // The board primitive does not look at the king; the engine layer does.
    let mut raw = board.clone();
    assert!(raw.move_piece(sq("e2"), sq("d3")));
    assert!(raw.is_check(Color::White));
}

#[test]
fn test_king_cannot_step_into_attack() {
    let board = board_with(&[
        (Color::White, PieceKind::King, "e1"),
        (Color::Black, PieceKind::Rook, "d8"),
        (Color::Black, PieceKind::King, "h8"),
    ]);
    let mut game = Game::from_board(board.clone());
    assert_eq!(
        game.play(sq("e1"), sq("d1"), &mut Promotion::Queen),
        Err(ChessError::IllegalMove(MoveError::LeavesKingInCheck(Color::White)))
    );
    assert_eq!(game.board(), &board);
    assert_eq!(game.play(sq("e1"), sq("f1"), &mut Promotion::Queen), Ok(GameStatus::InProgress));
}

#[test]
fn test_every_rejected_move_restores_board() {
    let board = board_with(&[
        (Color::White, PieceKind::King, "e1"),
        (Color::White, PieceKind::Knight, "d2"),
        (Color::White, PieceKind::Pawn, "f2"),
        (Color::White, PieceKind::Rook, "h1"),
        (Color::Black, PieceKind::Bishop, "b4"),
        (Color::Black, PieceKind::Queen, "h4"),
        (Color::Black, PieceKind::King, "e8"),
    ]);
    let game = Game::from_board(board.clone());
    for from in Square::all() {
        for to in Square::all() {
            let mut attempt = game.clone();
            if attempt.play(from, to, &mut Promotion::Queen).is_err() {
                assert_eq!(attempt.board(), &board, "{} -> {}", from, to);
            } else {
                assert!(!attempt.board().is_check(Color::White), "{} -> {}", from, to);
            }
        }
    }
}

#[test]
fn test_status_reports_check() {
    let mut game = Game::new();
    for (from, to) in [("e2", "e4"), ("f7", "f6"), ("d1", "h5")] {
        game.play(sq(from), sq(to), &mut Promotion::Queen).unwrap();
    }
    assert_eq!(game.status(), Ok(GameStatus::Check));
    assert_eq!(game.current_player(), Color::Black);

    assert_eq!(
        game.play(sq("a7"), sq("a6"), &mut Promotion::Queen),
        Err(ChessError::IllegalMove(MoveError::LeavesKingInCheck(Color::Black)))
    );
    assert_eq!(game.play(sq("g7"), sq("g6"), &mut Promotion::Queen), Ok(GameStatus::InProgress));
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();
    let moves = [("f2", "f3"), ("e7", "e5"), ("g2", "g4")];
    for (from, to) in moves {
        assert_eq!(game.play(sq(from), sq(to), &mut Promotion::Queen), Ok(GameStatus::InProgress));
    }
    assert_eq!(
        game.play(sq("d8"), sq("h4"), &mut Promotion::Queen),
        Ok(GameStatus::Checkmate { winner: Color::Black })
    );
    assert_eq!(
        game.play(sq("e1"), sq("f2"), &mut Promotion::Queen),
        Err(ChessError::IllegalMove(MoveError::GameOver))
    );
}

#[test]
fn test_wrong_turn_and_empty_square_errors() {
    let mut game = Game::new();
    assert_eq!(
        game.play(sq("e7"), sq("e5"), &mut Promotion::Queen),
        Err(ChessError::IllegalMove(MoveError::WrongTurn { expected: Color::White }))
    );
    assert_eq!(
        game.play(sq("e4"), sq("e5"), &mut Promotion::Queen),
        Err(ChessError::IllegalMove(MoveError::NoPiece(sq("e4"))))
    );
    assert_eq!(
        game.play(sq("e2"), sq("e5"), &mut Promotion::Queen),
        Err(ChessError::IllegalMove(MoveError::RuleViolation { from: sq("e2"), to: sq("e5") }))
    );
}

#[test]
fn test_king_capture_is_rolled_back() {
    let board = board_with(&[
        (Color::White, PieceKind::King, "a1"),
        (Color::White, PieceKind::Rook, "e1"),
        (Color::Black, PieceKind::King, "e8"),
    ]);
    let mut game = Game::from_board(board.clone());
    assert_eq!(
        game.play(sq("e1"), sq("e8"), &mut Promotion::Queen),
        Err(ChessError::NoKingFound(Color::Black))
    );
    assert_eq!(game.board(), &board);
    assert_eq!(game.current_player(), Color::White);
}
