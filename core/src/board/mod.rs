//! This module contains [`Board`], the object representing the current state of a chessboard.
//! All modifications to the current state of the board is done through this object, as well as
//! gathering information about the current state of the board.
//!
//! This module also contains structures used by the board, such as [`Castling`] for
//! determining castling rights throughout a game, and [`PieceLocations`], a mailbox
//! for determining what is on a given square without consulting the bitboards.
//!
//! [`Board`]: struct.Board.html
//! [`Castling`]: castle_rights/struct.Castling.html
//! [`PieceLocations`]: piece_locations/struct.PieceLocations.html

pub mod movegen;
pub mod castle_rights;
pub mod piece_locations;
pub mod board_state;
pub mod fen;
pub mod perft;

use core::piece_move::{BitMove, MoveType};
use core::move_list::MoveList;
use core::masks::*;
use core::sq::{SQ, NO_SQ};
use core::bitboard::BitBoard;
use core::score::{Score, Value};
use core::*;

use helper::Helper;

use self::castle_rights::Castling;
use self::piece_locations::PieceLocations;
use self::board_state::BoardState;

use std::{fmt, char, num};

use log::debug;
use thiserror::Error;

/// Represents possible Errors encountered while building a `Board` from a fen string.
#[derive(Error, Debug)]
pub enum FenBuildError {
    #[error("invalid number of fen sections: {sections}, expected 6")]
    NotEnoughSections { sections: usize },
    #[error("invalid number of ranks: {ranks}, expected 8")]
    IncorrectRankAmounts { ranks: usize },
    #[error("invalid turn: {turn}, expected 'w' or 'b'")]
    UnrecognizedTurn { turn: String },
    #[error("unreadable En-passant square: {ep}")]
    EPSquareUnreadable { ep: String },
    #[error("invalid En-passant square: {ep}")]
    EPSquareInvalid { ep: String },
    #[error("square number too small for rank, rank: {rank} square: {square}")]
    SquareSmallerRank { rank: usize, square: String },
    #[error("square number too large for rank, rank: {rank} square: {square}")]
    SquareLargerRank { rank: usize, square: String },
    #[error("unrecognized piece: {piece}")]
    UnrecognizedPiece { piece: char },
    #[error("unable to parse move count")]
    UnreadableMoves(#[from] num::ParseIntError),
    #[error("too many checking pieces: {num}")]
    IllegalNumCheckingPieces { num: u8 },
    #[error("these two pieces cannot check the king at the same time: {piece_1:?}, {piece_2:?}")]
    IllegalCheckState {
        piece_1: PieceType,
        piece_2: PieceType,
    },
    #[error("too many pawns for player: player: {player:?}, # pawns {num}")]
    TooManyPawns { player: Player, num: u8 },
    #[error("pawn on first or last row")]
    PawnOnLastRow,
}

/// Errors encountered while parsing a move given in Long Algebraic Notation
/// (e.g. `"e2e4"`, `"e7e8q"`) against a specific position.
#[derive(Error, Debug)]
pub enum MoveParseError {
    #[error("LAN string too short or too long: {lan}")]
    WrongLength { lan: String },
    #[error("unreadable square in LAN move: {lan}")]
    UnreadableSquare { lan: String },
    #[error("unrecognized promotion piece: {promo}")]
    UnrecognizedPromotion { promo: char },
    #[error("not a pseudo-legal move in this position: {lan}")]
    InvalidMove { lan: String },
}

/// Parses `lan` (e.g. `"e2e4"`, `"a7a8q"`) into the matching pseudo-legal move for
/// `board`, the current side to move. The inverse of `BitMove`'s `Display` impl, and
/// the data-format counterpart to [`Board::apply_uci_move`], which does the same
/// lookup but reports success as a `bool` rather than a typed error.
pub fn from_lan(lan: &str, board: &Board) -> Result<BitMove, MoveParseError> {
    if lan.len() != 4 && lan.len() != 5 {
        return Err(MoveParseError::WrongLength { lan: lan.to_string() });
    }
    if !lan.is_char_boundary(4) || !lan[0..4].chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(MoveParseError::UnreadableSquare { lan: lan.to_string() });
    }
    if lan.len() == 5 {
        let promo = lan.as_bytes()[4] as char;
        if !matches!(promo, 'n' | 'b' | 'r' | 'q') {
            return Err(MoveParseError::UnrecognizedPromotion { promo });
        }
    }

    let moves: MoveList = board.generate_pseudolegal_moves();
    moves
        .iter()
        .find(|m| format!("{}", m) == lan)
        .cloned()
        .ok_or_else(|| MoveParseError::InvalidMove { lan: lan.to_string() })
}

/// Represents a Chessboard through a `Board`.
///
/// `Board` contains everything that needs to be known about the current state of the game. It
/// is used both by the search and by anything wanting to inspect a position.
///
/// Ideally, the search owns the canonical representation of a board, and hands out
/// `Board::shallow_clone()`s to worker threads / recursive search frames that need their own
/// mutable copy to make and unmake moves with.
///
/// # Examples
///
/// ```
/// use talon_core::Board;
///
/// let mut chessboard = Board::default();
///
/// let moves = chessboard.generate_moves();
/// chessboard.apply_move(moves[0]);
///
/// let b2 = chessboard.shallow_clone(); // boards allow for easy cloning
/// assert_eq!(chessboard.moves_played(), b2.moves_played());
/// ```
///
/// # `BitBoard` Representation
///
/// For the majority of the struct, the board utilizes [BitBoard]s, which is a u64 where each bit
/// represents an occupied location, and each bit index represents a certain square (as in bit 0
/// is Square A1, bit 1 is B1, etc.). Indexes increase first horizontally by File, and then by
/// Rank.
///
/// The exact mapping from each square to bits is as follows:
///
/// ```md,ignore
/// 8 | 56 57 58 59 60 61 62 63
/// 7 | 48 49 50 51 52 53 54 55
/// 6 | 40 41 42 43 44 45 46 47
/// 5 | 32 33 34 35 36 37 38 39
/// 4 | 24 25 26 27 28 29 30 31
/// 3 | 16 17 18 19 20 21 22 23
/// 2 | 8  9  10 11 12 13 14 15
/// 1 | 0  1  2  3  4  5  6  7
///   -------------------------
///      a  b  c  d  e  f  g  h
/// ```
pub struct Board {
    turn: Player,
    bit_boards: [[BitBoard; PIECE_TYPE_CNT]; PLAYER_CNT],
    occ: [BitBoard; PLAYER_CNT],
    occ_all: BitBoard,
    half_moves: u16,
    depth: u16,
    piece_counts: [[u8; PIECE_TYPE_CNT]; PLAYER_CNT],
    piece_locations: PieceLocations,

    // Current state of the board. `history` is the undo stack: `do_move` pushes a copy of
    // `state` before mutating it, `undo_move` pops the stack back into `state`.
    state: BoardState,
    history: Vec<BoardState>,

    /// Handle to the pre-computed lookup tables (magic attacks, Zobrist keys, PSQT).
    #[doc(hidden)]
    pub helper: Helper,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty_string())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Board: {}", &self.pretty_string())
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.turn == other.turn
            && self.occ_all == other.occ_all
            && self.state == other.state
            && self.piece_locations == other.piece_locations
    }
}

impl Clone for Board {
    fn clone(&self) -> Self {
        self.shallow_clone()
    }
}

impl Board {
    /// Constructs a board from the starting position.
    ///
    /// # Examples
    ///
    /// ```
    /// use talon_core::{Board, Player};
    ///
    /// let chessboard = Board::default();
    /// assert_eq!(chessboard.count_pieces_player(Player::White), 16);
    /// ```
    pub fn default() -> Board {
        let mut bit_boards: [[BitBoard; PIECE_TYPE_CNT]; PLAYER_CNT] =
            [[BitBoard(0); PIECE_TYPE_CNT]; PLAYER_CNT];
        bit_boards[Player::White as usize][PieceType::P as usize] = BitBoard(START_W_PAWN);
        bit_boards[Player::White as usize][PieceType::N as usize] = BitBoard(START_W_KNIGHT);
        bit_boards[Player::White as usize][PieceType::B as usize] = BitBoard(START_W_BISHOP);
        bit_boards[Player::White as usize][PieceType::R as usize] = BitBoard(START_W_ROOK);
        bit_boards[Player::White as usize][PieceType::Q as usize] = BitBoard(START_W_QUEEN);
        bit_boards[Player::White as usize][PieceType::K as usize] = BitBoard(START_W_KING);
        bit_boards[Player::Black as usize][PieceType::P as usize] = BitBoard(START_B_PAWN);
        bit_boards[Player::Black as usize][PieceType::N as usize] = BitBoard(START_B_KNIGHT);
        bit_boards[Player::Black as usize][PieceType::B as usize] = BitBoard(START_B_BISHOP);
        bit_boards[Player::Black as usize][PieceType::R as usize] = BitBoard(START_B_ROOK);
        bit_boards[Player::Black as usize][PieceType::Q as usize] = BitBoard(START_B_QUEEN);
        bit_boards[Player::Black as usize][PieceType::K as usize] = BitBoard(START_B_KING);

        let mut b = Board {
            turn: Player::White,
            bit_boards,
            occ: [BitBoard(START_WHITE_OCC), BitBoard(START_BLACK_OCC)],
            occ_all: BitBoard(START_OCC_ALL),
            half_moves: 0,
            depth: 0,
            piece_counts: [[0, 8, 2, 2, 2, 1, 1, 0], [0, 8, 2, 2, 2, 1, 1, 0]],
            piece_locations: unsafe { PieceLocations::default() },
            state: BoardState::default(),
            history: Vec::new(),
            helper: Helper::new(),
        };
        b.set_piece_states();
        b.set_zob_hash();
        b.set_check_info();
        b
    }

    /// Constructs a shallow clone of the `Board`.
    ///
    /// Contains only the information necessary to apply future moves; the undo history is
    /// dropped and depth is reset to zero. Intended for handing a fresh, independent copy of
    /// the position off to a worker that will search from here.
    ///
    /// # Safety
    ///
    /// After this method is called, [`Board::undo_move()`] cannot be called until at least one
    /// move has been applied to the clone.
    ///
    /// [`Board::undo_move()`]: #method.undo_move
    pub fn shallow_clone(&self) -> Board {
        Board {
            turn: self.turn,
            bit_boards: BitBoard::clone_all_occ(&self.bit_boards),
            occ: BitBoard::clone_occ_bbs(&self.occ),
            occ_all: self.occ_all,
            half_moves: self.half_moves,
            depth: 0,
            piece_counts: self.piece_counts,
            piece_locations: self.piece_locations.clone(),
            state: self.state.clone(),
            history: Vec::new(),
            helper: self.helper,
        }
    }

    /// Constructs a parallel clone of the `Board`.
    ///
    /// Similar to [`Board::shallow_clone()`], but keeps the current search depth instead of
    /// resetting it. Intended for splitting a search of a move list across several workers that
    /// are all still logically at the same depth.
    ///
    /// [`Board::shallow_clone()`]: #method.shallow_clone
    pub fn parallel_clone(&self) -> Board {
        Board {
            turn: self.turn,
            bit_boards: BitBoard::clone_all_occ(&self.bit_boards),
            occ: BitBoard::clone_occ_bbs(&self.occ),
            occ_all: self.occ_all,
            half_moves: self.half_moves,
            depth: self.depth,
            piece_counts: self.piece_counts,
            piece_locations: self.piece_locations.clone(),
            state: self.state.clone(),
            history: Vec::new(),
            helper: self.helper,
        }
    }

    /// Helper method for setting the piece counts and `PieceLocations` on initialization.
    ///
    /// Only used when creating the `Board` from scratch (e.g. the starting position), where the
    /// bitboards are already known to be fully populated.
    fn set_piece_states(&mut self) {
        for player in &ALL_PLAYERS {
            for piece in &ALL_PIECE_TYPES {
                self.piece_counts[*player as usize][*piece as usize] =
                    self.piece_bb(*player, *piece).count_bits();
            }
        }

        for square in 0..SQ_CNT as u8 {
            let bb = SQ(square).to_bb();
            if (bb & self.occupied()).is_not_empty() {
                let player = if (bb & self.occupied_black()).is_empty() {
                    Player::White
                } else {
                    Player::Black
                };
                let piece_type = ALL_PIECE_TYPES
                    .iter()
                    .find(|pt| (self.piece_bb(player, **pt) & bb).is_not_empty())
                    .copied()
                    .expect("every occupied square must contain one of the six piece types");
                self.piece_locations.place(SQ(square), player, piece_type);
            } else {
                self.piece_locations.remove(SQ(square));
            }
        }
    }

    /// Helper method for setting the BitBoards from a fully populated `PieceLocations`.
    ///
    /// Only used when creating the `Board` from a FEN string.
    fn set_bitboards(&mut self) {
        for sq in 0..SQ_CNT as u8 {
            if let Some((player, piece_type)) = self.piece_locations.player_piece_at(SQ(sq)) {
                let bb = SQ(sq).to_bb();
                self.bit_boards[player as usize][piece_type as usize] |= bb;
                self.occ[player as usize] |= bb;
            }
        }
        self.occ_all = self.occupied_black() | self.occupied_white();
        for player in &ALL_PLAYERS {
            for piece in &ALL_PIECE_TYPES {
                self.piece_counts[*player as usize][*piece as usize] =
                    self.piece_bb(*player, *piece).count_bits();
            }
        }
    }

    /// Constructs a board from a FEN String.
    ///
    /// FEN stands for Forsyth-Edwards Notation, and is a way of representing a board through a
    /// string of characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use talon_core::Board;
    ///
    /// let board = Board::new_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    /// assert_eq!(board.count_all_pieces(), 32);
    /// ```
    pub fn new_from_fen(fen: &str) -> Result<Board, FenBuildError> {
        let det_split: Vec<&str> = fen.split_whitespace().collect();

        if det_split.len() != 6 {
            return Err(FenBuildError::NotEnoughSections {
                sections: det_split.len(),
            });
        }

        let b_rep: Vec<&str> = det_split[0].split('/').collect();
        if b_rep.len() != 8 {
            return Err(FenBuildError::IncorrectRankAmounts { ranks: b_rep.len() });
        }

        let (piece_loc, piece_cnt) = PieceLocations::from_partial_fen(b_rep.as_slice())?;

        let turn_char: char = det_split[1].chars().next().ok_or_else(|| {
            FenBuildError::UnrecognizedTurn {
                turn: det_split[1].to_string(),
            }
        })?;
        let turn: Player = match turn_char {
            'b' => Player::Black,
            'w' => Player::White,
            _ => {
                return Err(FenBuildError::UnrecognizedTurn {
                    turn: det_split[1].to_string(),
                });
            }
        };

        let mut castle_bytes = Castling::empty_set();
        for ch in det_split[2].chars() {
            castle_bytes.add_castling_char(ch);
        }

        let mut ep_sq: SQ = SQ(0);
        for (i, character) in det_split[3].chars().enumerate() {
            if i > 1 {
                return Err(FenBuildError::EPSquareUnreadable {
                    ep: det_split[3].to_string(),
                });
            }
            if i == 0 {
                match character {
                    'a' => ep_sq += SQ(0),
                    'b' => ep_sq += SQ(1),
                    'c' => ep_sq += SQ(2),
                    'd' => ep_sq += SQ(3),
                    'e' => ep_sq += SQ(4),
                    'f' => ep_sq += SQ(5),
                    'g' => ep_sq += SQ(6),
                    'h' => ep_sq += SQ(7),
                    '-' => {}
                    _ => {
                        return Err(FenBuildError::EPSquareUnreadable {
                            ep: det_split[3].to_string(),
                        });
                    }
                }
            } else {
                let digit = character
                    .to_digit(10)
                    .ok_or_else(|| FenBuildError::EPSquareUnreadable {
                        ep: det_split[3].to_string(),
                    })? as u8;

                if digit == 3 {
                    ep_sq += SQ(16);
                } else if digit == 6 {
                    ep_sq += SQ(40);
                } else {
                    return Err(FenBuildError::EPSquareInvalid {
                        ep: det_split[3].to_string(),
                    });
                }
            }
        }

        if ep_sq == SQ(0) {
            ep_sq = NO_SQ
        }

        let rule_50 = det_split[4].parse::<i16>()?;

        let mut total_moves = (det_split[5].parse::<u16>()? - 1) * 2;
        if turn == Player::Black {
            total_moves += 1
        };

        let state = BoardState {
            castling: castle_bytes,
            rule_50,
            ply: 0,
            ep_square: ep_sq,
            psq: Score::ZERO,
            zobrist: 0,
            pawn_key: 0,
            material_key: 0,
            nonpawn_material: [0; PLAYER_CNT],
            captured_piece: None,
            checkers_bb: BitBoard(0),
            blockers_king: [BitBoard(0); PLAYER_CNT],
            pinners_king: [BitBoard(0); PLAYER_CNT],
            check_sqs: [BitBoard(0); PIECE_TYPE_CNT],
            prev_move: BitMove::null(),
        };

        let mut b = Board {
            turn,
            bit_boards: [[BitBoard(0); PIECE_TYPE_CNT]; PLAYER_CNT],
            occ: [BitBoard(0), BitBoard(0)],
            occ_all: BitBoard(0),
            half_moves: total_moves,
            depth: 0,
            piece_counts: piece_cnt,
            piece_locations: piece_loc,
            state,
            history: Vec::new(),
            helper: Helper::new(),
        };

        b.set_bitboards();
        b.set_check_info();
        b.set_zob_hash();

        fen::is_valid_fen(b)
    }

    /// Alias of [`Board::new_from_fen()`].
    ///
    /// [`Board::new_from_fen()`]: #method.new_from_fen
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Board, FenBuildError> {
        Board::new_from_fen(fen)
    }

    /// Alias of [`Board::default()`].
    ///
    /// [`Board::default()`]: #method.default
    #[inline]
    pub fn start_pos() -> Board {
        Board::default()
    }

    /// Creates a FEN String of the Given Board.
    ///
    /// # Examples
    ///
    /// ```
    /// use talon_core::Board;
    ///
    /// let board = Board::default();
    /// assert_eq!(board.get_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    /// ```
    pub fn get_fen(&self) -> String {
        let mut s = String::default();
        let mut blanks = 0;
        for idx in 0..SQ_CNT as u8 {
            // Cause of weird fen ordering, gotta do it this way
            let sq = SQ((idx % 8) + (8 * (7 - (idx / 8))));
            if sq.file() == File::A && sq.rank() != Rank::R8 {
                if blanks != 0 {
                    s.push(char::from_digit(blanks, 10).unwrap());
                    blanks = 0;
                }
                s.push('/');
            }
            let piece = self.piece_at_sq(sq);
            if piece == Piece::None {
                blanks += 1;
            } else {
                if blanks != 0 {
                    s.push(char::from_digit(blanks, 10).unwrap());
                    blanks = 0;
                }
                let (player, piece_type) = piece.player_piece_lossy();
                s.push(PIECE_DISPLAYS[player as usize][piece_type as usize]);
            }
        }

        if blanks != 0 {
            s.push(char::from_digit(blanks, 10).unwrap());
        }

        s.push(' ');
        s.push(match self.turn {
            Player::White => 'w',
            Player::Black => 'b',
        });
        s.push(' ');

        s.push_str(&(self.state.castling.pretty_string()));
        s.push(' ');

        if self.ep_square() == NO_SQ {
            s.push('-');
        } else {
            let ep = self.ep_square();
            s.push(FILE_DISPLAYS[ep.file_idx_of_sq() as usize]);
            s.push(RANK_DISPLAYS[ep.rank_idx_of_sq() as usize]);
        }
        s.push(' ');
        s.push_str(&format!("{}", self.rule_50()));
        s.push(' ');
        s.push_str(&format!("{}", (self.half_moves / 2) + 1));

        s
    }

    /// Applies a move to the Board.
    ///
    /// # Safety
    ///
    /// The passed in [`BitMove`] must be a legal move for the current position. Valid moves can
    /// be generated with [`Board::generate_moves()`].
    ///
    /// [`BitMove`]: ../core/piece_move/struct.BitMove.html
    /// [`Board::generate_moves()`]: #method.generate_moves
    pub fn apply_move(&mut self, bit_move: BitMove) {
        let gives_check: bool = self.gives_check(bit_move);
        self.apply_unknown_move(bit_move, gives_check);
    }

    /// Applies a move to the Board, given that whether the move gives check is already known.
    ///
    /// Use this over [`Board::apply_move()`] when the caller already computed
    /// [`Board::gives_check()`] for other reasons (e.g. move ordering), to avoid computing it
    /// twice.
    ///
    /// # Safety
    ///
    /// The passed in [`BitMove`] must be a legal move for the current position. If an incorrect
    /// `gives_check` is supplied, undefined behavior will follow.
    ///
    /// [`Board::apply_move()`]: #method.apply_move
    /// [`Board::gives_check()`]: #method.gives_check
    pub fn apply_unknown_move(&mut self, bit_move: BitMove, gives_check: bool) {
        assert_ne!(bit_move.get_src(), bit_move.get_dest());

        let mut pawn_key: u64 = self.state.pawn_key;
        let mut zob: u64 = self.state.zobrist ^ self.helper.z_side();
        let mut psq: Score = self.state.psq;
        let mut nonpawn_material: [Value; PLAYER_CNT] = self.state.nonpawn_material;

        self.history.push(self.state.clone());
        let mut new_state = self.history.last().unwrap().partial_clone();

        self.half_moves += 1;
        self.depth += 1;
        new_state.rule_50 += 1;
        new_state.ply += 1;
        new_state.prev_move = bit_move;

        let us = self.turn;
        let them = us.other_player();
        let from: SQ = bit_move.get_src();
        let mut to: SQ = bit_move.get_dest();
        let piece: Piece = self.piece_at_sq(from);
        let piece_type: PieceType = piece.type_of();
        debug_assert_ne!(piece, Piece::None);

        let captured_type: Option<PieceType> = if bit_move.is_en_passant() {
            Some(PieceType::P)
        } else {
            let cap = self.piece_at_sq(to);
            if cap == Piece::None {
                None
            } else {
                Some(cap.type_of())
            }
        };

        assert_eq!(self.color_of_sq(from).unwrap(), us);

        if bit_move.is_castle() {
            debug_assert_eq!(captured_type, Some(PieceType::R));
            debug_assert_eq!(piece_type, PieceType::K);

            let mut r_src: SQ = SQ(0);
            let mut r_dst: SQ = SQ(0);

            self.apply_castling(us, from, &mut to, &mut r_src, &mut r_dst);

            zob ^= self.helper.z_square(r_src, Piece::make_lossy(us, PieceType::R))
                ^ self.helper.z_square(r_dst, Piece::make_lossy(us, PieceType::R));
            psq += self.helper.psq(Piece::make_lossy(us, PieceType::R), r_dst)
                - self.helper.psq(Piece::make_lossy(us, PieceType::R), r_src);
            new_state.castling.remove_player_castling(us);
        } else if let Some(cap_pt) = captured_type {
            let mut cap_sq: SQ = to;
            let captured_piece = Piece::make_lossy(them, cap_pt);
            if cap_pt == PieceType::P {
                pawn_key ^= self.helper.z_square(cap_sq, captured_piece);
                if bit_move.is_en_passant() {
                    debug_assert_eq!(cap_sq, self.state.ep_square);
                    match us {
                        Player::White => cap_sq -= SQ(8),
                        Player::Black => cap_sq += SQ(8),
                    };
                    debug_assert_eq!(piece_type, PieceType::P);
                    debug_assert_eq!(us.relative_rank(Rank::R6), to.rank());
                    debug_assert_eq!(self.piece_at_sq(to), Piece::None);
                    debug_assert_eq!(self.piece_at_sq(cap_sq).type_of(), PieceType::P);
                    debug_assert_eq!(self.player_at_sq(cap_sq).unwrap(), them);
                    self.remove_piece_c(PieceType::P, cap_sq, them);
                } else {
                    self.remove_piece_c(cap_pt, cap_sq, them);
                }
            } else {
                self.remove_piece_c(cap_pt, cap_sq, them);
                nonpawn_material[them as usize] -= self.helper.piece_value(captured_piece, false);
            }
            zob ^= self.helper.z_square(cap_sq, Piece::make_lossy(them, cap_pt));
            psq -= self.helper.psq(Piece::make_lossy(them, cap_pt), cap_sq);

            new_state.rule_50 = 0;
            new_state.captured_piece = Some(cap_pt);
        }

        zob ^= self.helper.z_square(to, piece) ^ self.helper.z_square(from, piece);
        psq += self.helper.psq(piece, to) - self.helper.psq(piece, from);

        if self.state.ep_square != NO_SQ {
            zob ^= self.helper.z_ep(self.state.ep_square);
        }
        new_state.ep_square = NO_SQ;

        if !new_state.castling.is_empty()
            && (to.castle_rights_mask() | from.castle_rights_mask()) != 0
        {
            let castle_zob_index = new_state.castling.update_castling(to, from);
            zob ^= self.helper.z_castle(castle_zob_index);
        }

        if !bit_move.is_castle() {
            self.move_piece_c(piece_type, from, to, us);
        }

        if piece_type == PieceType::P {
            if self.helper.distance_of_sqs(to, from) == 2 {
                new_state.ep_square = (to + from) / SQ(2);
                zob ^= self.helper.z_ep(new_state.ep_square);
            } else if bit_move.is_promo() {
                let promo_piece_type: PieceType = bit_move.promo_piece();
                let promo_piece = Piece::make_lossy(us, promo_piece_type);

                self.remove_piece_c(piece_type, to, us);
                self.put_piece_c(promo_piece_type, to, us);

                zob ^= self.helper.z_square(to, promo_piece) ^ self.helper.z_square(from, piece);
                psq += self.helper.psq(promo_piece, to) - self.helper.psq(piece, to);
                pawn_key ^= self.helper.z_square(to, piece);
                nonpawn_material[us as usize] += self.helper.piece_value(promo_piece, false);
            }
            pawn_key ^= self.helper.z_square(from, piece) ^ self.helper.z_square(to, piece);
            new_state.rule_50 = 0;
        }

        new_state.zobrist = zob;
        new_state.pawn_key = pawn_key;
        new_state.psq = psq;
        new_state.nonpawn_material = nonpawn_material;

        new_state.checkers_bb = if gives_check {
            self.attackers_to(self.king_sq(them), self.occupied()) & self.get_occupied_player(us)
        } else {
            BitBoard(0)
        };

        self.turn = them;
        self.state = new_state;
        self.set_check_info();

        if cfg!(debug_assertions) {
            self.is_okay().unwrap();
        } else {
            assert!(self.is_ok_quick());
        }
    }

    /// Applies a UCI move to the board. If the move is a valid string representing a UCI move,
    /// then true will be returned & the move will be applied. Otherwise, false is returned and
    /// the board isn't changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use talon_core::Board;
    ///
    /// let mut board = Board::default();
    /// let success = board.apply_uci_move("e2e4");
    ///
    /// assert!(success);
    /// ```
    pub fn apply_uci_move(&mut self, uci_move: &str) -> bool {
        let all_moves: MoveList = self.generate_moves();
        let bit_move: Option<BitMove> = all_moves
            .iter()
            .find(|m| format!("{}", m) == uci_move)
            .cloned();
        match bit_move {
            Some(m) => {
                self.apply_move(m);
                true
            }
            None => false,
        }
    }

    /// Un-does the previously applied move, returning the board to the state before the move was
    /// played.
    ///
    /// # Panics
    ///
    /// Panics if no moves have been played since this `Board` was created, or since the last
    /// [`Board::shallow_clone()`]/[`Board::parallel_clone()`].
    ///
    /// [`Board::shallow_clone()`]: #method.shallow_clone
    /// [`Board::parallel_clone()`]: #method.parallel_clone
    pub fn undo_move(&mut self) {
        assert!(!self.history.is_empty());

        let undo_move: BitMove = self.state.prev_move;
        let us: Player = self.turn.other_player();
        self.turn = us;

        let from: SQ = undo_move.get_src();
        let to: SQ = undo_move.get_dest();
        let mut piece_type_on: PieceType = self.piece_at_sq(to).type_of();

        if undo_move.is_promo() {
            debug_assert_eq!(piece_type_on, undo_move.promo_piece());
            self.remove_piece_c(piece_type_on, to, us);
            self.put_piece_c(PieceType::P, to, us);
            piece_type_on = PieceType::P;
        }

        if undo_move.is_castle() {
            self.remove_castling(us, from, to);
        } else {
            self.move_piece_c(piece_type_on, to, from, us);

            if let Some(cap_pt) = self.state.captured_piece {
                let mut cap_sq: SQ = to;
                if undo_move.is_en_passant() {
                    match us {
                        Player::White => cap_sq -= SQ(8),
                        Player::Black => cap_sq += SQ(8),
                    }
                }
                self.put_piece_c(cap_pt, cap_sq, us.other_player());
            }
        }

        self.half_moves -= 1;
        self.depth -= 1;
        self.state = self.history.pop().unwrap();
    }

    /// Applies a "Null Move" to the Board, essentially swapping the side to move while changing
    /// nothing else about the position. Used by search for null-move pruning.
    ///
    /// # Safety
    ///
    /// This method should only be called when the current side to move is not in check, as the
    /// resulting position would otherwise be illegal.
    pub unsafe fn apply_null_move(&mut self) {
        assert!(self.checkers().is_empty());

        let mut zob: u64 = self.state.zobrist ^ self.helper.z_side();

        self.history.push(self.state.clone());
        let mut new_state = self.history.last().unwrap().partial_clone();

        new_state.rule_50 += 1;
        new_state.ply = 0;
        new_state.prev_move = BitMove::null();

        if self.state.ep_square != NO_SQ {
            zob ^= self.helper.z_ep(self.state.ep_square);
            new_state.ep_square = NO_SQ;
        }

        new_state.zobrist = zob;
        self.depth += 1;

        self.turn = self.turn.other_player();
        self.state = new_state;
        self.set_check_info();
    }

    /// Un-does a "Null Move", returning the board to the state before [`Board::apply_null_move()`]
    /// was called.
    ///
    /// [`Board::apply_null_move()`]: #method.apply_null_move
    pub unsafe fn undo_null_move(&mut self) {
        debug_assert!(self.state.prev_move.is_null());
        self.turn = self.turn.other_player();
        self.depth -= 1;
        self.state = self.history.pop().unwrap();
    }

    /// Generate all legal moves for the current position.
    #[inline]
    pub fn generate_moves(&self) -> MoveList {
        movegen::generate_legal(self, GenTypes::All)
    }

    /// Generate all legal moves of a particular type for the current position. Follows the
    /// same rules of [`GenTypes`] as documented in the [`movegen`] module.
    ///
    /// [`GenTypes`]: ../core/enum.GenTypes.html
    /// [`movegen`]: movegen/index.html
    #[inline]
    pub fn generate_moves_of_type(&self, gen_type: GenTypes) -> MoveList {
        movegen::generate_legal(self, gen_type)
    }

    /// Generate all pseudo-legal moves for the current position. Pseudo-legal moves must
    /// subsequently be checked with [`Board::legal_move()`] before being played.
    ///
    /// [`Board::legal_move()`]: #method.legal_move
    #[inline]
    pub fn generate_pseudolegal_moves(&self) -> MoveList {
        movegen::generate_pseudo_legal(self, GenTypes::All)
    }

    /// Generate all pseudo-legal moves of a particular type for the current position.
    #[inline]
    pub fn generate_pseudolegal_moves_of_type(&self, gen_type: GenTypes) -> MoveList {
        movegen::generate_pseudo_legal(self, gen_type)
    }

    /// (Re)computes the `check_sqs`, `blockers_king`, and `pinners_king` fields of the current
    /// `BoardState`, along with the current `checkers_bb` if the side to move is in check.
    ///
    /// Must be called any time the bitboards change and the check-related state needs to be
    /// brought back in sync, after `self.state` has already been swapped to the new frame.
    fn set_check_info(&mut self) {
        let (white_blockers, white_pinners) = self.slider_blockers(self.turn.other_player(), self.king_sq(Player::White));
        let (black_blockers, black_pinners) = self.slider_blockers(self.turn, self.king_sq(Player::Black));

        let opp: Player = self.turn.other_player();
        let ksq: SQ = self.king_sq(opp);
        let occ_minus_k: BitBoard = self.occupied();

        let pawn_sqs = self.helper.pawn_attacks_from(ksq, opp);
        let knight_sqs = self.helper.knight_moves(ksq);
        let bishop_sqs = self.helper.bishop_moves(occ_minus_k, ksq);
        let rook_sqs = self.helper.rook_moves(occ_minus_k, ksq);

        let mut check_sqs: [BitBoard; PIECE_TYPE_CNT] = [BitBoard(0); PIECE_TYPE_CNT];
        check_sqs[PieceType::P as usize] = pawn_sqs;
        check_sqs[PieceType::N as usize] = knight_sqs;
        check_sqs[PieceType::B as usize] = bishop_sqs;
        check_sqs[PieceType::R as usize] = rook_sqs;
        check_sqs[PieceType::Q as usize] = bishop_sqs | rook_sqs;
        check_sqs[PieceType::K as usize] = BitBoard(0);

        self.state.blockers_king = [white_blockers, black_blockers];
        self.state.pinners_king = [white_pinners, black_pinners];
        self.state.check_sqs = check_sqs;

        if self.state.checkers_bb.is_empty() && self.in_check_raw() {
            let us: Player = self.turn;
            self.state.checkers_bb =
                self.attackers_to(self.king_sq(us), self.occupied()) & self.get_occupied_player(opp);
        }
    }

    /// Returns whether the side to move's king is currently attacked, without consulting the
    /// cached `checkers_bb` (which may not yet be populated when this is called).
    fn in_check_raw(&self) -> bool {
        let us: Player = self.turn;
        let ksq: SQ = self.king_sq(us);
        (self.attackers_to(ksq, self.occupied()) & self.get_occupied_player(us.other_player()))
            .is_not_empty()
    }

    /// Places a given piece type for a given player at a certain square, updating bitboards,
    /// occupancy, piece counts, and piece locations.
    ///
    /// # Safety
    ///
    /// Assumes there is currently no piece on the square `sq`.
    fn put_piece_c(&mut self, piece_type: PieceType, sq: SQ, player: Player) {
        let bb = sq.to_bb();
        self.occ_all |= bb;
        self.occ[player as usize] |= bb;
        self.bit_boards[player as usize][piece_type as usize] |= bb;

        self.piece_locations.place(sq, player, piece_type);
        self.piece_counts[player as usize][piece_type as usize] += 1;
    }

    /// Removes a piece of a given type and player from a certain square.
    ///
    /// # Safety
    ///
    /// Assumes there is a piece of the given type and player at the given square.
    fn remove_piece_c(&mut self, piece_type: PieceType, sq: SQ, player: Player) {
        debug_assert_eq!(self.piece_at_sq(sq).type_of(), piece_type);

        let bb = sq.to_bb();
        self.occ_all &= !bb;
        self.occ[player as usize] &= !bb;
        self.bit_boards[player as usize][piece_type as usize] &= !bb;

        self.piece_locations.remove(sq);
        self.piece_counts[player as usize][piece_type as usize] -= 1;
    }

    /// Moves a piece of a given type and player from one square to another.
    ///
    /// # Safety
    ///
    /// Assumes there is a piece of the given type and player at the `from` square, and that the
    /// `to` square is empty.
    fn move_piece_c(&mut self, piece_type: PieceType, from: SQ, to: SQ, player: Player) {
        let comb_bb = from.to_bb() | to.to_bb();

        self.occ_all ^= comb_bb;
        self.occ[player as usize] ^= comb_bb;
        self.bit_boards[player as usize][piece_type as usize] ^= comb_bb;

        self.piece_locations.remove(from);
        self.piece_locations.place(to, player, piece_type);
    }

    /// Helper method, used after already confirming the move is a castle and determining the
    /// king and rook squares.
    fn apply_castling(
        &mut self,
        player: Player,
        k_src: SQ,
        k_dst: &mut SQ,
        r_src: &mut SQ,
        r_dst: &mut SQ,
    ) {
        let king_side: bool = k_src < *k_dst;

        *r_src = *k_dst;
        if king_side {
            *k_dst = player.relative_square(SQ(6));
            *r_dst = player.relative_square(SQ(5));
        } else {
            *k_dst = player.relative_square(SQ(2));
            *r_dst = player.relative_square(SQ(3));
        }

        self.move_piece_c(PieceType::K, k_src, *k_dst, player);
        self.move_piece_c(PieceType::R, *r_src, *r_dst, player);
    }

    /// Helper method for undoing a castle, as the "move" served in `undo_move` is encoded as
    /// king-captures-rook.
    fn remove_castling(&mut self, player: Player, k_src: SQ, r_src: SQ) {
        let k_dst: SQ = self.king_sq(player);
        let r_dst: SQ = if k_src < r_src {
            player.relative_square(SQ(5))
        } else {
            player.relative_square(SQ(3))
        };

        self.move_piece_c(PieceType::K, k_dst, k_src, player);
        self.move_piece_c(PieceType::R, r_dst, r_src, player);
    }

    /// Returns the blocking pieces and pinning pieces for the king of `king_color`, given that
    /// `sliders` is the side whose sliding pieces might be pinning through a blocker.
    fn slider_blockers(&self, sliders: Player, s: SQ) -> (BitBoard, BitBoard) {
        let mut blockers = BitBoard(0);
        let mut pinners = BitBoard(0);

        let snipers: BitBoard = ((self.helper.rook_moves(BitBoard(0), s)
            & self.piece_two_bb_both_players(PieceType::R, PieceType::Q))
            | (self.helper.bishop_moves(BitBoard(0), s)
                & self.piece_two_bb_both_players(PieceType::B, PieceType::Q)))
            & self.get_occupied_player(sliders);

        let occupancy: BitBoard = self.occupied() ^ snipers;

        for sniper_sq in snipers {
            let between: BitBoard = self.helper.between_bb(s, sniper_sq) & occupancy;

            if between.is_not_empty() && !between.more_than_one() {
                blockers |= between;
                let other_side = if (between & self.get_occupied_player(sliders.other_player()))
                    .is_not_empty()
                {
                    sliders.other_player()
                } else {
                    sliders
                };
                if (blockers & self.get_occupied_player(other_side)).is_not_empty() {
                    pinners |= sniper_sq.to_bb();
                }
            }
        }
        (blockers, pinners)
    }

    /// Computes the Zobrist hash and pawn hash of the current position from scratch. Used on
    /// `Board` construction.
    fn set_zob_hash(&mut self) {
        let mut zob: u64 = 0;
        let mut pawn_key: u64 = 0;
        let mut b: BitBoard = self.occupied();
        while let Some(sq) = b.pop_some_lsb() {
            let piece = self.piece_at_sq(sq);
            let key = self.helper.z_square(sq, piece);
            zob ^= key;
            if piece.type_of() == PieceType::P {
                pawn_key ^= key;
            }
        }

        if self.ep_square() != NO_SQ {
            zob ^= self.helper.z_ep(self.ep_square());
        }

        match self.turn {
            Player::White => {}
            Player::Black => zob ^= self.helper.z_side(),
        }

        zob ^= self.helper.z_castle(self.state.castling.bits());

        self.state.zobrist = zob;
        self.state.pawn_key = pawn_key;
    }

    //  ------- ACCESSORS -------

    /// Current side to move.
    #[inline(always)]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Zobrist hash of the current position.
    #[inline(always)]
    pub fn zobrist(&self) -> u64 {
        self.state.zobrist
    }

    /// Pawn-only Zobrist hash of the current position.
    #[inline(always)]
    pub fn pawn_key(&self) -> u64 {
        self.state.pawn_key
    }

    /// The positional (piece-square-table) score of the current position, from white's
    /// perspective.
    #[inline(always)]
    pub fn psq(&self) -> Score {
        self.state.psq
    }

    /// The summed value of each player's non-pawn material.
    #[inline(always)]
    pub fn non_pawn_material(&self, player: Player) -> Value {
        self.state.nonpawn_material[player as usize]
    }

    /// Number of total moves played, where one "move" is a single ply (half-move).
    #[inline(always)]
    pub fn moves_played(&self) -> u16 {
        self.half_moves
    }

    /// Depth of the board since the last `shallow_clone` / `parallel_clone` / creation.
    #[inline(always)]
    pub fn depth(&self) -> u16 {
        self.depth
    }

    /// Number of moves since a capture, pawn push, or castle.
    #[inline(always)]
    pub fn rule_50(&self) -> i16 {
        self.state.rule_50
    }

    /// Return the piece that was captured last move, if any.
    #[inline(always)]
    pub fn piece_captured_last_turn(&self) -> Option<PieceType> {
        self.state.captured_piece
    }

    /// Whether fifty moves (a hundred plies) have passed since the last capture, pawn
    /// push, or castle.
    #[inline]
    pub fn fifty_move_rule(&self) -> bool {
        self.state.rule_50 >= 100
    }

    /// Whether the current position has occurred earlier in this game since the last
    /// capture, pawn push, or castle, searching back only as far as `rule_50` allows.
    /// Returns `true` on the first such repeat, not the third: callers that want a true
    /// threefold draw claim should track occurrence counts themselves.
    ///
    /// The zobrist key is only a fast-path filter: two distinct positions can share a
    /// 64-bit hash, so a match is confirmed against the full `BoardState` (castling
    /// rights, checkers, pinners, blockers) before being reported as a repetition.
    pub fn is_repetition(&self) -> bool {
        let limit = self.state.rule_50 as usize;
        let len = self.history.len();
        let mut j = 2;
        while j <= limit && j <= len {
            let prev = &self.history[len - j];
            if prev.zobrist == self.state.zobrist && *prev == self.state {
                return true;
            }
            j += 2;
        }
        false
    }

    /// Current ply (half-move number) since the board was created.
    #[inline(always)]
    pub fn ply(&self) -> u16 {
        self.state.ply
    }

    /// Square behind a pawn that double-pushed last move, or `NO_SQ` if there is none.
    #[inline(always)]
    pub fn ep_square(&self) -> SQ {
        self.state.ep_square
    }

    /// `BitBoard` of all occupied squares on the board.
    #[inline(always)]
    pub fn occupied(&self) -> BitBoard {
        self.occ_all
    }

    /// `BitBoard` of all occupied squares on the board. Alias of [`Board::occupied()`].
    ///
    /// [`Board::occupied()`]: #method.occupied
    #[inline(always)]
    pub fn get_occupied(&self) -> BitBoard {
        self.occ_all
    }

    /// `BitBoard` for all squares occupied by a given player.
    #[inline(always)]
    pub fn get_occupied_player(&self, player: Player) -> BitBoard {
        self.occ[player as usize]
    }

    /// `BitBoard` for all White pieces.
    #[inline(always)]
    pub fn occupied_white(&self) -> BitBoard {
        self.occ[Player::White as usize]
    }

    /// `BitBoard` for all Black pieces.
    #[inline(always)]
    pub fn occupied_black(&self) -> BitBoard {
        self.occ[Player::Black as usize]
    }

    /// `BitBoard` for a given piece type and player.
    #[inline(always)]
    pub fn piece_bb(&self, player: Player, piece_type: PieceType) -> BitBoard {
        self.bit_boards[player as usize][piece_type as usize]
    }

    /// `BitBoard` of a player's rooks and queens.
    #[inline(always)]
    pub fn sliding_piece_bb(&self, player: Player) -> BitBoard {
        self.bit_boards[player as usize][PieceType::R as usize]
            ^ self.bit_boards[player as usize][PieceType::Q as usize]
    }

    /// `BitBoard` of a player's bishops and queens.
    #[inline(always)]
    pub fn diagonal_piece_bb(&self, player: Player) -> BitBoard {
        self.bit_boards[player as usize][PieceType::B as usize]
            ^ self.bit_boards[player as usize][PieceType::Q as usize]
    }

    /// `BitBoard` of a given piece type for both players.
    #[inline(always)]
    pub fn piece_bb_both_players(&self, piece_type: PieceType) -> BitBoard {
        self.bit_boards[Player::White as usize][piece_type as usize]
            | self.bit_boards[Player::Black as usize][piece_type as usize]
    }

    /// `BitBoard` of the two given piece types for both players.
    #[inline(always)]
    pub fn piece_two_bb_both_players(&self, piece_type: PieceType, piece_type2: PieceType) -> BitBoard {
        self.piece_bb_both_players(piece_type) | self.piece_bb_both_players(piece_type2)
    }

    /// `BitBoard` of the two given piece types for a single player.
    #[inline(always)]
    pub fn piece_two_bb(&self, piece_type: PieceType, piece_type2: PieceType, player: Player) -> BitBoard {
        self.piece_bb(player, piece_type) | self.piece_bb(player, piece_type2)
    }

    /// Number of a given piece type a given player has.
    #[inline(always)]
    pub fn count_piece(&self, player: Player, piece_type: PieceType) -> u8 {
        self.piece_counts[player as usize][piece_type as usize]
    }

    /// Number of pieces a given player has on the board.
    #[inline(always)]
    pub fn count_pieces_player(&self, player: Player) -> u8 {
        ALL_PIECE_TYPES
            .iter()
            .map(|pt| self.count_piece(player, *pt))
            .sum()
    }

    /// Number of pieces both players have on the board.
    #[inline(always)]
    pub fn count_all_pieces(&self) -> u8 {
        self.count_pieces_player(Player::White) + self.count_pieces_player(Player::Black)
    }

    /// Returns the `Piece` at the given square, or `Piece::None` if the square is empty.
    #[inline(always)]
    pub fn piece_at_sq(&self, sq: SQ) -> Piece {
        match self.piece_locations.player_piece_at(sq) {
            Some((player, piece_type)) => Piece::make_lossy(player, piece_type),
            None => Piece::None,
        }
    }

    /// Returns the `Player` (if any) occupying a given square.
    #[inline(always)]
    pub fn color_of_sq(&self, sq: SQ) -> Option<Player> {
        self.piece_locations.player_at(sq)
    }

    /// Returns the `Player` (if any) occupying a given square. Alias of [`Board::color_of_sq()`].
    ///
    /// [`Board::color_of_sq()`]: #method.color_of_sq
    #[inline(always)]
    pub fn player_at_sq(&self, s: SQ) -> Option<Player> {
        self.piece_locations.player_at(s)
    }

    /// Square of a given player's king.
    #[inline(always)]
    pub fn king_sq(&self, player: Player) -> SQ {
        self.bit_boards[player as usize][PieceType::K as usize].to_sq()
    }

    /// `BitBoard` of pieces for `player` pinned to their own king.
    #[inline(always)]
    pub fn pinned_pieces(&self, player: Player) -> BitBoard {
        self.state.blockers_king[player as usize] & self.get_occupied_player(player)
    }

    /// `BitBoard` of all pinned pieces, for either player.
    #[inline(always)]
    pub fn all_pinned_pieces(&self) -> BitBoard {
        self.state.blockers_king[Player::White as usize]
            | self.state.blockers_king[Player::Black as usize]
    }

    /// `BitBoard` of pieces pinning a given player's king.
    #[inline(always)]
    pub fn pinning_pieces(&self, player: Player) -> BitBoard {
        self.state.pinners_king[player as usize]
    }

    /// Returns if the current player can castle for a given side.
    #[inline(always)]
    pub fn can_castle(&self, player: Player, castle_type: CastleType) -> bool {
        self.state.castling.castle_rights(player, castle_type)
    }

    /// Returns the castling rights for a given player.
    #[inline(always)]
    pub fn player_can_castle(&self, player: Player) -> Castling {
        self.state.castling.player_can_castle(player)
    }

    /// Checks if the castle path is impeded for the current player. Does not assume the current
    /// player has the ability to castle, whether by rights or by the rook/king being on the
    /// correct square.
    #[inline]
    pub fn castle_impeded(&self, castle_type: CastleType) -> bool {
        let path: BitBoard = BitBoard(CASTLING_PATH[self.turn as usize][castle_type as usize]);
        (path & self.occ_all).is_not_empty()
    }

    /// Square of the rook involved in the current player's castle.
    #[inline]
    pub fn castling_rook_square(&self, castle_type: CastleType) -> SQ {
        SQ(CASTLING_ROOK_START[self.turn as usize][castle_type as usize])
    }

    /// Returns the last move played, if any.
    #[inline(always)]
    pub fn last_move(&self) -> Option<BitMove> {
        if self.state.prev_move.is_null() {
            None
        } else {
            Some(self.state.prev_move)
        }
    }

    /// Returns the piece (if any) that was captured last move. This method does not distinguish
    /// between not having any last move played and not having a piece captured.
    #[inline(always)]
    pub fn piece_last_captured(&self) -> Option<PieceType> {
        self.state.captured_piece
    }

    //  ------- CHECKING -------

    /// Returns if the current side to move is in check.
    #[inline(always)]
    pub fn in_check(&self) -> bool {
        self.state.checkers_bb.is_not_empty()
    }

    /// Returns if the current side to move is in checkmate.
    ///
    /// This method can be computationally expensive; do not use it outside of the search.
    pub fn checkmate(&self) -> bool {
        self.in_check() && self.generate_moves().is_empty()
    }

    /// Returns if the current side to move is in stalemate.
    ///
    /// This method can be computationally expensive; do not use it outside of the search.
    pub fn stalemate(&self) -> bool {
        !self.in_check() && (self.generate_moves().is_empty() || self.state.rule_50 >= 50)
    }

    /// `BitBoard` of all checks on the current player's king. Empty if the current side to move
    /// is not in check.
    #[inline(always)]
    pub fn checkers(&self) -> BitBoard {
        self.state.checkers_bb
    }

    /// `BitBoard` of pieces the current side can move to discover check. Discovered check
    /// candidates are pieces for the current side to move that are currently blocking a check
    /// from another piece of the same color.
    #[inline(always)]
    pub fn discovered_check_candidates(&self) -> BitBoard {
        self.state.blockers_king[self.turn.other_player() as usize]
            & self.get_occupied_player(self.turn)
    }

    /// `BitBoard` of pieces the given player has pinned.
    #[inline(always)]
    pub fn pieces_pinned(&self, player: Player) -> BitBoard {
        self.state.blockers_king[player as usize] & self.get_occupied_player(player)
    }

    /// `BitBoard` of possible attacks / defends to a square with a given occupancy. Includes
    /// pieces from both players.
    pub fn attackers_to(&self, sq: SQ, occupied: BitBoard) -> BitBoard {
        (self.helper.pawn_attacks_from(sq, Player::Black) & self.piece_bb(Player::White, PieceType::P))
            | (self.helper.pawn_attacks_from(sq, Player::White) & self.piece_bb(Player::Black, PieceType::P))
            | (self.helper.knight_moves(sq) & self.piece_bb_both_players(PieceType::N))
            | (self.helper.rook_moves(occupied, sq)
                & (self.sliding_piece_bb(Player::White) | self.sliding_piece_bb(Player::Black)))
            | (self.helper.bishop_moves(occupied, sq)
                & (self.diagonal_piece_bb(Player::White) | self.diagonal_piece_bb(Player::Black)))
            | (self.helper.king_moves(sq) & self.piece_bb_both_players(PieceType::K))
    }

    //  ------- Move Testing -------

    /// Tests if a given move is legal. Mostly useful for checking the legality of moves that
    /// were generated in a pseudo-legal fashion, since pseudo-legal generation is faster but
    /// doesn't guarantee legality in the presence of a discovered check.
    ///
    /// # Safety
    ///
    /// Assumes the move is otherwise well-formed for the current board.
    pub fn legal_move(&self, m: BitMove) -> bool {
        if m.get_src() == m.get_dest() {
            return false;
        }
        let them: Player = self.turn.other_player();
        let src: SQ = m.get_src();
        let src_bb: BitBoard = src.to_bb();
        let dst: SQ = m.get_dest();

        if m.move_type() == MoveType::EnPassant {
            let k_sq: SQ = self.king_sq(self.turn);
            let dst_bb: BitBoard = dst.to_bb();
            let captured_sq: SQ = SQ((dst.0 as i8).wrapping_sub(self.turn.pawn_push()) as u8);
            let occupied: BitBoard = (self.occupied() ^ src_bb ^ captured_sq.to_bb()) | dst_bb;

            return (self.helper.rook_moves(occupied, k_sq) & self.sliding_piece_bb(them)).is_empty()
                && (self.helper.queen_moves(occupied, k_sq) & self.diagonal_piece_bb(them)).is_empty();
        }

        let piece = self.piece_at_sq(src);
        if piece == Piece::None {
            return false;
        }

        if piece.type_of() == PieceType::K {
            return m.move_type() == MoveType::Castle
                || (self.attackers_to(dst, self.occupied()) & self.get_occupied_player(them)).is_empty();
        }

        (self.pinned_pieces(self.turn) & src_bb).is_empty()
            || self.helper.aligned(src, dst, self.king_sq(self.turn))
    }

    /// Returns if a move gives check to the opposing player's King.
    ///
    /// # Safety
    ///
    /// Assumes the move is legal for the current position.
    pub fn gives_check(&self, m: BitMove) -> bool {
        let src: SQ = m.get_src();
        let dst: SQ = m.get_dest();
        let src_bb: BitBoard = src.to_bb();
        let dst_bb: BitBoard = dst.to_bb();
        let opp_king_sq: SQ = self.king_sq(self.turn.other_player());

        assert_ne!(src, dst);
        assert_eq!(self.color_of_sq(src).unwrap(), self.turn);

        if (self.state.check_sqs[self.piece_at_sq(src).type_of() as usize] & dst_bb).is_not_empty() {
            return true;
        }

        if (self.discovered_check_candidates() & src_bb).is_not_empty()
            && !self.helper.aligned(src, dst, opp_king_sq)
        {
            return true;
        }

        match m.move_type() {
            MoveType::Normal => false,
            MoveType::Promotion => {
                let attacks_bb = match m.promo_piece() {
                    PieceType::N => self.helper.knight_moves(dst),
                    PieceType::B => self.helper.bishop_moves(self.occupied() ^ src_bb, dst),
                    PieceType::R => self.helper.rook_moves(self.occupied() ^ src_bb, dst),
                    PieceType::Q => self.helper.queen_moves(self.occupied() ^ src_bb, dst),
                    _ => unreachable!(),
                };
                (attacks_bb & opp_king_sq.to_bb()).is_not_empty()
            }
            MoveType::EnPassant => {
                let captured_sq: SQ = SQ::make(dst.file(), src.rank());
                let b: BitBoard = (self.occupied() ^ src_bb ^ captured_sq.to_bb()) | dst_bb;

                let turn_sliding_p: BitBoard = self.sliding_piece_bb(self.turn);
                let turn_diag_p: BitBoard = self.diagonal_piece_bb(self.turn);

                ((self.helper.rook_moves(b, opp_king_sq) & turn_sliding_p)
                    | (self.helper.bishop_moves(b, opp_king_sq) & turn_diag_p))
                    .is_not_empty()
            }
            MoveType::Castle => {
                let k_from: SQ = src;
                let r_from: SQ = dst;

                let k_to: SQ = self.turn.relative_square(if r_from > k_from { SQ(6) } else { SQ(2) });
                let r_to: SQ = self.turn.relative_square(if r_from > k_from { SQ(5) } else { SQ(3) });

                let opp_k_bb = opp_king_sq.to_bb();
                (self.helper.rook_moves(BitBoard(0), r_to) & opp_k_bb).is_not_empty()
                    && (self.helper.rook_moves(
                        r_to.to_bb() | k_to.to_bb() | (self.occupied() ^ k_from.to_bb() ^ r_from.to_bb()),
                        r_to,
                    ) & opp_k_bb)
                        .is_not_empty()
            }
        }
    }

    /// Returns the piece that was moved for a given `BitMove`.
    ///
    /// # Safety
    ///
    /// Assumes the move is legal for the current position.
    #[inline]
    pub fn moved_piece(&self, m: BitMove) -> Piece {
        self.piece_at_sq(m.get_src())
    }

    /// Returns the piece type that was captured, if any, for a given `BitMove`.
    ///
    /// # Safety
    ///
    /// Assumes the move is legal for the current position.
    #[inline]
    pub fn captured_piece(&self, m: BitMove) -> Option<PieceType> {
        if m.is_en_passant() {
            return Some(PieceType::P);
        }
        let piece = self.piece_at_sq(m.get_dest());
        if piece == Piece::None {
            None
        } else {
            Some(piece.type_of())
        }
    }

    /// Returns a prettified String of the current `Board`, for easy command line displaying.
    /// Capital letters represent White pieces, lowercase represents Black pieces.
    pub fn pretty_string(&self) -> String {
        let mut s = String::with_capacity(SQ_CNT * 2 + 8);
        for sq in SQ_DISPLAY_ORDER.iter() {
            let op = self.piece_locations.player_piece_at(SQ(*sq));
            let ch = if let Some((player, piece_type)) = op {
                PIECE_DISPLAYS[player as usize][piece_type as usize]
            } else {
                '-'
            };
            s.push(ch);
            s.push(' ');
            if sq % 8 == 7 {
                s.push('\n');
            }
        }
        s
    }

    /// Returns a clone of the current `PieceLocations`.
    pub fn get_piece_locations(&self) -> PieceLocations {
        self.piece_locations.clone()
    }

    /// Logs debug information about pins, blockers, checkers, and check squares.
    pub fn print_debug_info(&self) {
        debug!("White Pinners: {}", self.state.pinners_king[0]);
        debug!("Black Pinners: {}", self.state.pinners_king[1]);
        debug!("White Blockers: {}", self.state.blockers_king[0]);
        debug!("Black Blockers: {}", self.state.blockers_king[1]);
        debug!("Checkers: {}", self.state.checkers_bb);
        debug!("Bishop check sqs: {}", self.state.check_sqs[PieceType::B as usize]);
        debug!("Rook check sqs: {}", self.state.check_sqs[PieceType::R as usize]);
        debug!("Queen check sqs: {}", self.state.check_sqs[PieceType::Q as usize]);
    }

    /// Prints a prettified representation of the board.
    pub fn pretty_print(&self) {
        println!("{}", self.pretty_string());
    }

    /// Print the board alongside useful information. Mostly for debugging usage.
    pub fn fancy_print(&self) {
        self.pretty_print();
        println!(
            "Castling bits: {:b}, Rule 50: {}, ep_sq: {}",
            self.state.castling.bits(), self.state.rule_50, self.state.ep_square
        );
        println!(
            "Total Moves: {}, ply: {}, depth: {}",
            self.half_moves, self.state.ply, self.depth
        );
        println!("Zobrist: {:x}", self.state.zobrist);
        println!();
    }
}

/// Represents possible errors encountered while checking the validity of the current state of a
/// `Board`.
#[derive(Error, Debug)]
pub enum BoardError {
    #[error("incorrect number of kings for {player:?}: {num}")]
    IncorrectKingNum { player: Player, num: u8 },
}

impl Board {
    /// Checks the basic status of the board, returning false if something is obviously wrong.
    /// Cheaper than [`Board::is_okay()`], intended for release-mode sanity checks.
    ///
    /// [`Board::is_okay()`]: #method.is_okay
    pub fn is_ok_quick(&self) -> bool {
        self.piece_at_sq(self.king_sq(Player::White)).type_of() == PieceType::K
            && self.piece_at_sq(self.king_sq(Player::Black)).type_of() == PieceType::K
            && (self.state.ep_square == NO_SQ
                || self.turn.relative_rank_of_sq(self.state.ep_square) == Rank::R6)
    }

    /// Checks if the current state of the Board is okay.
    pub fn is_okay(&self) -> Result<(), BoardError> {
        self.check_king()?;
        Ok(())
    }

    fn check_king(&self) -> Result<(), BoardError> {
        let w_king_num = self.count_piece(Player::White, PieceType::K);
        let b_king_num = self.count_piece(Player::Black, PieceType::K);
        if w_king_num != 1 {
            return Err(BoardError::IncorrectKingNum {
                player: Player::White,
                num: w_king_num,
            });
        }
        if b_king_num != 1 {
            return Err(BoardError::IncorrectKingNum {
                player: Player::Black,
                num: b_king_num,
            });
        }
        Ok(())
    }
}
