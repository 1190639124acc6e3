//! Search, time management, and transposition-table plumbing for the Talon chess engine.
//!
//! This crate turns a [`talon_core::Board`] and a set of search limits into a best
//! move: iterative-deepening negamax with alpha-beta pruning, a transposition table,
//! killer-move ordering, null-move and futility pruning, and quiescence search. It
//! has no text-protocol front-end and no multi-threaded search of its own -- a host
//! process parses commands, builds a [`time::Limits`], and hands both to
//! [`engine::Engine::run_search`], which runs the search on its own worker thread and
//! streams [`search::Info`] records back as the iterative-deepening loop progresses.

#![allow(dead_code)]

extern crate log;
extern crate talon_core;

pub mod consts;
pub mod sync;
pub mod time;
pub mod tt;
pub mod root_moves;
pub mod movepick;
pub mod search;
pub mod engine;

pub use consts::*;
pub use engine::{Engine, RunSearchArg, SearchResult};
pub use search::Info;
pub use sync::StopSignal;
pub use time::{Limits, TimeManager};
pub use tt::TranspositionTable;
