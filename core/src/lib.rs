//! Bitboard move generation, position representation, and static evaluation for the
//! Talon chess engine.
//!
//! This crate is the board-representation half of Talon. It owns the [`Board`] type,
//! magic-bitboard move generation, Zobrist hashing, and a basic positional [`tools::eval::Eval`].
//! The search, transposition table, and worker glue that turn this into a playing engine
//! live in the sibling `talon-engine` crate.
//!
//! # Examples
//!
//! You can create a [`Board`] with the starting position like so:
//!
//! ```
//! use talon_core::Board;
//! let board = Board::start_pos();
//! ```
//!
//! Generating a list of moves (contained inside a [`MoveList`]) can be done with:
//!
//! ```
//! use talon_core::Board;
//! let board = Board::start_pos();
//! let list = board.generate_moves();
//! assert_eq!(list.len(), 20);
//! ```
//!
//! Applying and undoing moves is simple:
//!
//! ```
//! use talon_core::Board;
//! let mut board = Board::start_pos();
//! let list = board.generate_moves();
//!
//! for mov in list.iter() {
//!     board.apply_move(*mov);
//!     board.undo_move();
//! }
//! ```
//!
//! Using fen strings is also supported:
//!
//! ```
//! use talon_core::Board;
//! let start_position = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
//! let board = Board::from_fen(start_position).unwrap();
//! ```
//!
//! [`MoveList`]: core/move_list/struct.MoveList.html
//! [`Board`]: board/struct.Board.html

#![allow(dead_code)]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
extern crate log;
extern crate thiserror;
#[cfg(test)]
extern crate rand;

pub mod core;
pub mod board;
pub mod helper;
pub mod tools;

pub use board::Board;
pub use board::{from_lan, FenBuildError, MoveParseError};
pub use board::perft::{perft, perft_all, PerftNodes};
pub use core::piece_move::{BitMove,ScoringMove};
pub use core::move_list::{MoveList,ScoringMoveList};
pub use core::sq::SQ;
pub use core::bitboard::BitBoard;
pub use helper::Helper;
pub use core::{Player, Piece, PieceType, Rank, File};
