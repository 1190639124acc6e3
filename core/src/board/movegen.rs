//! Module for generating moves from a `Board`. Allows for generating Legal and Pseudo-Legal moves
//! of various types.
//!
//! # Generation Types
//!
//! The Types of moves that can be generated from a [`Board`] are:
//!
//! `All`, `Captures`, `Quiets`, `QuietChecks`, `Evasions`, `NonEvasions`
//!
//! These are all derived from the [`GenTypes`] enum.
//!
//! Generating all moves is legal to do no matter the position. However, `Captures`, `Quiets`,
//! `QuietChecks`, and `NonEvasions` can only be done if the board is NOT in check. Likewise,
//! `Evasions` can only be done when the board is currently in check.
//!
//! `All` will generate all moves, while any other option will generate all moves except for
//! under-promotions.
//!
//! # `Legal` vs. `PseudoLegal` Moves
//!
//! Moves can be generated either as `Legal` or `PseudoLegal`. A Legal move is, as the name
//! implies, guaranteed to be legal for the current side to play in the current position. A
//! Pseudo-Legal move is a move that is "likely" to be legal for the current position, but
//! cannot be guaranteed without an additional check.
//!
//! Generating Pseudo-Legal moves is cheaper, since it skips the legality check done for every
//! move. If the caller is fine with generating moves and then checking them individually with
//! [`Board::legal_move`], this is worth the trade.
//!
//! # Examples
//!
//! Generating all legal moves:
//!
//! ```ignore
//! let moves: MoveList = board.generate_moves();
//! ```
//!
//! Generating all pseudo-legal moves:
//!
//! ```ignore
//! let moves: MoveList = board.generate_pseudolegal_moves();
//! ```
//!
//! Generating all pseudo-legal captures:
//!
//! ```ignore
//! let moves: MoveList = board.generate_pseudolegal_moves_of_type(GenTypes::Captures);
//! ```
//!
//! [`GenTypes`]: ../../core/enum.GenTypes.html
//! [`Board`]: ../struct.Board.html
//! [`Board::legal_move`]: ../struct.Board.html#method.legal_move

use board::Board;

use core::piece_move::{BitMove, MoveFlag, PreMoveInfo};
use core::move_list::MoveList;
use core::sq::NO_SQ;
use core::{CastleType, GenTypes, Player, PieceType, Rank};
use core::bitboard::BitBoard;
use core::sq::SQ;

use helper::prelude::*;

// Pieces to generate moves with interchangeably, ordered fastest-first: bishops and
// knights before the heavier rook / queen bitboards.
const STANDARD_PIECES: [PieceType; 4] = [PieceType::N, PieceType::B, PieceType::R, PieceType::Q];

/// Returns a `MoveList` of all legal moves for a given board and `GenTypes`.
#[inline]
pub fn generate_legal(board: &Board, gen_type: GenTypes) -> MoveList {
    generate(board, gen_type, true)
}

/// Returns a `MoveList` of all pseudo-legal moves for a given board and `GenTypes`. Pseudo-legal
/// moves are not guaranteed to leave the moving side's king safe from check; the caller must
/// validate each move with `Board::legal_move` before applying it.
#[inline]
pub fn generate_pseudo_legal(board: &Board, gen_type: GenTypes) -> MoveList {
    generate(board, gen_type, false)
}

#[inline]
fn generate(board: &Board, gen_type: GenTypes, legal: bool) -> MoveList {
    let mut movelist = MoveList::default();
    let mut gen = InnerMoveGen {
        movelist: &mut movelist,
        board,
        legal,
        player: board.turn(),
        occ: board.occupied(),
        us_occ: board.get_occupied_player(board.turn()),
        them_occ: board.get_occupied_player(board.turn().other_player()),
    };

    match gen_type {
        GenTypes::Evasions => gen.generate_evasions(),
        GenTypes::QuietChecks => gen.generate_quiet_checks(),
        GenTypes::All => {
            if gen.board.in_check() {
                gen.generate_evasions();
            } else {
                gen.generate_non_evasions(GenTypes::NonEvasions);
            }
        }
        other => gen.generate_non_evasions(other),
    }
    movelist
}

/// Internal move generation context. Holds the occupancy bitboards and destination list that
/// every generation step needs, so they don't have to be recomputed or re-threaded per call.
struct InnerMoveGen<'a> {
    movelist: &'a mut MoveList,
    board: &'a Board,
    legal: bool,
    player: Player,
    occ: BitBoard,
    us_occ: BitBoard,
    them_occ: BitBoard,
}

impl<'a> InnerMoveGen<'a> {
    /// Generates non-evasions, i.e. the board is NOT in check.
    fn generate_non_evasions(&mut self, gen_type: GenTypes) {
        debug_assert_ne!(gen_type, GenTypes::All);
        debug_assert_ne!(gen_type, GenTypes::QuietChecks);
        debug_assert_ne!(gen_type, GenTypes::Evasions);
        debug_assert!(!self.board.in_check());

        // target = bitboard of squares the generator should aim for
        let target: BitBoard = match gen_type {
            GenTypes::NonEvasions => !self.us_occ,
            GenTypes::Captures => self.them_occ,
            GenTypes::Quiets => !(self.us_occ | self.them_occ),
            _ => unreachable!(),
        };

        self.generate_all(gen_type, target);
    }

    /// Generates all moves of a certain `GenType`. `target` is the bitboard of the squares
    /// moves are allowed to land on.
    fn generate_all(&mut self, gen_type: GenTypes, target: BitBoard) {
        self.generate_pawn_moves(gen_type, target);
        for &piece_type in STANDARD_PIECES.iter() {
            self.moves_per_piece(piece_type, target);
        }

        if gen_type != GenTypes::QuietChecks && gen_type != GenTypes::Evasions {
            self.moves_per_piece(PieceType::K, target);
        }

        if gen_type != GenTypes::Captures
            && gen_type != GenTypes::Evasions
            && (self.board.can_castle(self.player, CastleType::KingSide)
                || self.board.can_castle(self.player, CastleType::QueenSide))
        {
            self.generate_castling();
        }
    }

    /// Generates quiet checks: non-capturing moves that leave the opponent's king in check.
    fn generate_quiet_checks(&mut self) {
        debug_assert!(!self.board.in_check());
        let mut disc_check: BitBoard = self.board.discovered_check_candidates();
        let target: BitBoard = !self.board.occupied();

        // discovered check candidates
        while let Some(from) = disc_check.pop_some_lsb() {
            let piece: PieceType = self.board.piece_at_sq(from).type_of();
            if piece != PieceType::P {
                let mut b: BitBoard = self.moves_bb(piece, from) & target;
                if piece == PieceType::K {
                    b &= queen_moves(BitBoard(0), self.board.king_sq(self.player.other_player()));
                }
                self.move_append_from_bb_flag(&mut b, from, BitMove::FLAG_QUIET);
            }
        }
        self.generate_all(GenTypes::QuietChecks, target);
    }

    /// Generates evasions, i.e. the board IS in check.
    fn generate_evasions(&mut self) {
        debug_assert!(self.board.in_check());

        let ksq: SQ = self.board.king_sq(self.player);
        let mut slider_attacks: BitBoard = BitBoard(0);

        // Pieces that could possibly attack the king with sliding attacks
        let mut sliders: BitBoard = self.board.checkers()
            & !self
                .board
                .piece_two_bb_both_players(PieceType::P, PieceType::N);

        // All squares attacked through the king by a slider, so the king can't "hide" behind
        // itself on the far side of the checking line.
        while let Some((check_sq, check_sq_bb)) = sliders.pop_some_lsb_and_bit() {
            slider_attacks |= line_bb(check_sq, ksq) ^ check_sq_bb;
        }

        // Possible king moves, where the king cannot move into a slider's line or its own pieces
        let k_moves: BitBoard = king_moves(ksq) & !slider_attacks & !self.us_occ;

        let mut captures_bb: BitBoard = k_moves & self.them_occ;
        let mut non_captures_bb: BitBoard = k_moves & !self.them_occ;
        self.move_append_from_bb_flag(&mut captures_bb, ksq, BitMove::FLAG_CAPTURE);
        self.move_append_from_bb_flag(&mut non_captures_bb, ksq, BitMove::FLAG_QUIET);

        // If there is only one checking piece, we can block or capture it
        if !(self.board.checkers().more_than_one()) {
            let checking_sq: SQ = self.board.checkers().bit_scan_forward();

            // Squares that allow a block or capture of the sliding piece
            let target: BitBoard = between_bb(checking_sq, ksq) | checking_sq.to_bb();
            self.generate_all(GenTypes::Evasions, target);
        }
    }

    /// Generates castling moves for both sides.
    fn generate_castling(&mut self) {
        self.castling_side(CastleType::QueenSide);
        self.castling_side(CastleType::KingSide);
    }

    /// Generates castling for a single side.
    fn castling_side(&mut self, side: CastleType) {
        // Make sure we can castle AND the space between the king / rook is clear AND the piece
        // at the castling square is actually a rook.
        if !self.board.castle_impeded(side)
            && self.board.can_castle(self.player, side)
            && self
                .board
                .piece_at_sq(self.board.castling_rook_square(side))
                .type_of()
                == PieceType::R
        {
            let king_side: bool = side == CastleType::KingSide;

            let ksq: SQ = self.board.king_sq(self.player);
            let r_from: SQ = self.board.castling_rook_square(side);
            let k_to = self
                .player
                .relative_square(if king_side { SQ::G1 } else { SQ::C1 });

            let enemies: BitBoard = self.them_occ;
            let direction: fn(SQ) -> SQ = if king_side {
                |x: SQ| x - SQ(1)
            } else {
                |x: SQ| x + SQ(1)
            };

            let mut s: SQ = k_to;
            let mut can_castle: bool = true;

            // Loop through all the squares the king passes through; if any is attacked by an
            // enemy piece, the king can't castle through it.
            while s != ksq {
                let attackers: BitBoard = self.board.attackers_to(s, self.occ) & enemies;
                if attackers.is_not_empty() {
                    can_castle = false;
                    break;
                }
                s = direction(s);
            }
            if can_castle {
                self.check_and_add(BitMove::init(PreMoveInfo {
                    src: ksq,
                    dst: r_from,
                    flags: MoveFlag::Castle { king_side },
                }));
            }
        }
    }

    /// Gets the captures and non-captures for a single piece type.
    fn moves_per_piece(&mut self, piece_type: PieceType, target: BitBoard) {
        let mut piece_bb: BitBoard = self.board.piece_bb(self.player, piece_type);
        while let Some(src) = piece_bb.pop_some_lsb() {
            let moves_bb: BitBoard = self.moves_bb(piece_type, src) & !self.us_occ & target;
            let mut captures_bb: BitBoard = moves_bb & self.them_occ;
            let mut non_captures_bb: BitBoard = moves_bb & !self.them_occ;
            self.move_append_from_bb_flag(&mut captures_bb, src, BitMove::FLAG_CAPTURE);
            self.move_append_from_bb_flag(&mut non_captures_bb, src, BitMove::FLAG_QUIET);
        }
    }

    /// Generates pawn moves: single/double pushes, promotions, captures, and en-passant.
    fn generate_pawn_moves(&mut self, gen_type: GenTypes, target: BitBoard) {
        let white = self.player == Player::White;
        let (rank_8, rank_7, rank_3): (BitBoard, BitBoard, BitBoard) = if white {
            (BitBoard::RANK_8, BitBoard::RANK_7, BitBoard::RANK_3)
        } else {
            (BitBoard::RANK_1, BitBoard::RANK_2, BitBoard::RANK_6)
        };

        let all_pawns: BitBoard = self.board.piece_bb(self.player, PieceType::P);

        let mut empty_squares = BitBoard(0);

        // separate these two for promotion moves and non promotions
        let pawns_rank_7: BitBoard = all_pawns & rank_7;
        let pawns_not_rank_7: BitBoard = all_pawns & !rank_7;

        let enemies: BitBoard = if gen_type == GenTypes::Evasions {
            self.them_occ & target
        } else if gen_type == GenTypes::Captures {
            target
        } else {
            self.them_occ
        };

        // Single and Double Pawn Pushes
        if gen_type != GenTypes::Captures {
            empty_squares = if gen_type == GenTypes::Quiets || gen_type == GenTypes::QuietChecks {
                target
            } else {
                !self.board.occupied()
            };

            let mut push_one: BitBoard = empty_squares & self.shift_up(pawns_not_rank_7);
            let mut push_two: BitBoard = self.shift_up(push_one & rank_3) & empty_squares;

            if gen_type == GenTypes::Evasions {
                push_one &= target;
                push_two &= target;
            }

            if gen_type == GenTypes::QuietChecks {
                let ksq: SQ = self.board.king_sq(self.player.other_player());
                push_one &= pawn_attacks_from(ksq, self.player.other_player());
                push_two &= pawn_attacks_from(ksq, self.player.other_player());

                let dc_candidates: BitBoard = self.board.discovered_check_candidates();
                if (pawns_not_rank_7 & dc_candidates).is_not_empty() {
                    let dc1: BitBoard = self.shift_up(pawns_not_rank_7 & dc_candidates)
                        & empty_squares
                        & !ksq.file_bb();
                    let dc2: BitBoard = self.shift_up(rank_3 & dc1) & empty_squares;

                    push_one |= dc1;
                    push_two |= dc2;
                }
            }

            while let Some(dst) = push_one.pop_some_lsb() {
                let src: SQ = self.down(dst);
                self.check_and_add(BitMove::make_quiet(src, dst));
            }

            while let Some(dst) = push_two.pop_some_lsb() {
                let src: SQ = self.down(self.down(dst));
                self.check_and_add(BitMove::make_pawn_push(src, dst));
            }
        }

        // Promotions
        if pawns_rank_7.is_not_empty()
            && gen_type != GenTypes::Quiets
            && (gen_type != GenTypes::Evasions || (target & rank_8).is_not_empty())
        {
            if gen_type == GenTypes::Captures {
                empty_squares = !self.occ;
            } else if gen_type == GenTypes::Evasions {
                empty_squares &= target;
            }

            let mut no_promo: BitBoard = self.shift_up(pawns_rank_7) & empty_squares;
            let mut left_cap_promo: BitBoard = self.shift_up_left(pawns_rank_7) & enemies;
            let mut right_cap_promo: BitBoard = self.shift_up_right(pawns_rank_7) & enemies;

            while let Some(dst) = no_promo.pop_some_lsb() {
                let src = self.down(dst);
                self.create_all_non_cap_promos(dst, src);
            }

            if gen_type != GenTypes::Quiets {
                while let Some(dst) = left_cap_promo.pop_some_lsb() {
                    let src = self.down_right(dst);
                    self.create_all_cap_promos(dst, src);
                }

                while let Some(dst) = right_cap_promo.pop_some_lsb() {
                    let src = self.down_left(dst);
                    self.create_all_cap_promos(dst, src);
                }
            }
        }

        // Captures
        if gen_type == GenTypes::Captures
            || gen_type == GenTypes::Evasions
            || gen_type == GenTypes::NonEvasions
            || gen_type == GenTypes::All
        {
            let mut left_cap: BitBoard = self.shift_up_left(pawns_not_rank_7) & enemies;
            let mut right_cap: BitBoard = self.shift_up_right(pawns_not_rank_7) & enemies;

            while let Some(dst) = left_cap.pop_some_lsb() {
                let src: SQ = self.down_right(dst);
                self.check_and_add(BitMove::make_capture(src, dst));
            }

            while let Some(dst) = right_cap.pop_some_lsb() {
                let src: SQ = self.down_left(dst);
                self.check_and_add(BitMove::make_capture(src, dst));
            }

            if self.board.ep_square() != NO_SQ {
                let ep_sq: SQ = self.board.ep_square();
                debug_assert_eq!(ep_sq.rank(), self.player.relative_rank(Rank::R6));

                // An en passant capture can be an evasion only if the checking piece is the
                // double-pushed pawn and so is in the target. Otherwise this is a discovery
                // check and the capture must be skipped.
                if gen_type != GenTypes::Evasions
                    || (target & self.down(ep_sq).to_bb()).is_not_empty()
                {
                    left_cap = pawns_not_rank_7 & pawn_attacks_from(ep_sq, self.player.other_player());

                    while let Some(src) = left_cap.pop_some_lsb() {
                        self.check_and_add(BitMove::make_ep_capture(src, ep_sq));
                    }
                }
            }
        }
    }

    #[inline]
    fn create_all_non_cap_promos(&mut self, dst: SQ, src: SQ) {
        self.check_and_add(BitMove::make(BitMove::FLAG_PROMO_N, src, dst));
        self.check_and_add(BitMove::make(BitMove::FLAG_PROMO_B, src, dst));
        self.check_and_add(BitMove::make(BitMove::FLAG_PROMO_R, src, dst));
        self.check_and_add(BitMove::make(BitMove::FLAG_PROMO_Q, src, dst));
    }

    #[inline]
    fn create_all_cap_promos(&mut self, dst: SQ, src: SQ) {
        self.check_and_add(BitMove::make(BitMove::FLAG_PROMO_CAP_N, src, dst));
        self.check_and_add(BitMove::make(BitMove::FLAG_PROMO_CAP_B, src, dst));
        self.check_and_add(BitMove::make(BitMove::FLAG_PROMO_CAP_R, src, dst));
        self.check_and_add(BitMove::make(BitMove::FLAG_PROMO_CAP_Q, src, dst));
    }

    /// Returns the attack `BitBoard` for a non-pawn piece type at a square.
    #[inline]
    fn moves_bb(&self, piece: PieceType, square: SQ) -> BitBoard {
        debug_assert!(square.is_okay());
        debug_assert_ne!(piece, PieceType::P);
        match piece {
            PieceType::N => knight_moves(square),
            PieceType::B => bishop_moves(self.occ, square),
            PieceType::R => rook_moves(self.occ, square),
            PieceType::Q => queen_moves(self.occ, square),
            PieceType::K => king_moves(square),
            _ => BitBoard(0),
        }
    }

    #[inline]
    fn move_append_from_bb_flag(&mut self, bits: &mut BitBoard, src: SQ, flag_bits: u16) {
        while let Some(dst) = bits.pop_some_lsb() {
            let b_move = BitMove::make(flag_bits, src, dst);
            self.check_and_add(b_move);
        }
    }

    /// Checks if the move is legal (when `self.legal` is set), and if so adds it to the list.
    #[inline]
    fn check_and_add(&mut self, b_move: BitMove) {
        if !self.legal || self.board.legal_move(b_move) {
            self.movelist.push(b_move);
        }
    }

    // The following direction helpers mirror the board from White's perspective for Black,
    // since all of Black's moves travel in the opposite direction down the rank file.

    #[inline(always)]
    fn down(&self, sq: SQ) -> SQ {
        if self.player == Player::White {
            sq - SQ(8)
        } else {
            sq + SQ(8)
        }
    }

    #[inline(always)]
    fn down_left(&self, sq: SQ) -> SQ {
        if self.player == Player::White {
            sq - SQ(9)
        } else {
            sq + SQ(9)
        }
    }

    #[inline(always)]
    fn down_right(&self, sq: SQ) -> SQ {
        if self.player == Player::White {
            sq - SQ(7)
        } else {
            sq + SQ(7)
        }
    }

    #[inline(always)]
    fn shift_up(&self, bb: BitBoard) -> BitBoard {
        if self.player == Player::White {
            bb << 8
        } else {
            bb >> 8
        }
    }

    #[inline(always)]
    fn shift_up_left(&self, bb: BitBoard) -> BitBoard {
        if self.player == Player::White {
            (bb & !BitBoard::FILE_A) << 7
        } else {
            (bb & !BitBoard::FILE_H) >> 7
        }
    }

    #[inline(always)]
    fn shift_up_right(&self, bb: BitBoard) -> BitBoard {
        if self.player == Player::White {
            (bb & !BitBoard::FILE_H) << 9
        } else {
            (bb & !BitBoard::FILE_A) >> 9
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::fen::ALL_FENS;
    use board::Board;

    #[test]
    fn movegen_legal_subset_of_pseudo_legal() {
        let boards: Vec<Board> = ALL_FENS
            .iter()
            .map(|f| Board::from_fen(f).unwrap())
            .collect();

        boards.iter().for_each(|b| {
            let b_legal = b.generate_moves();
            let b_plegal = b.generate_pseudolegal_moves();
            assert!(b_legal.len() <= b_plegal.len());
            for mov in b_legal.iter() {
                assert!(b_plegal.contains(mov));
            }
        });
    }

    #[test]
    fn movelist_basic() {
        let b = Board::start_pos();
        let m = b.generate_moves();
        let mut i = 0;
        for _d in m.iter() {
            i += 1;
        }
        assert_eq!(i, m.len());

        let m2 = m.to_vec();
        assert_eq!(m2.len(), m.len());
    }

    #[test]
    fn movegen_matches_legal_across_positions() {
        let boards: Vec<Board> = ALL_FENS
            .iter()
            .map(|f| Board::from_fen(f).unwrap())
            .collect();

        boards.iter().for_each(|b| {
            let mb = b.generate_moves();
            let ms = generate_legal(b, GenTypes::All);
            assert_eq!(mb.len(), ms.len());
        });
    }
}
