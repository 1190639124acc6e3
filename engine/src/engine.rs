//! Glue between a host front-end (UCI parsing, option storage, and everything else
//! that talks to a user, all out of scope here) and the search in [`search`].
//!
//! A design that owns a UCI command loop, an options map, and a Lazy-SMP thread pool
//! would bundle far more than search into this type. This crate has no protocol
//! front-end and no thread pool: `Engine` owns only a transposition table and the
//! current position, and `run_search` spawns exactly one worker thread per call.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::info;

use talon_core::{BitMove, Board};

use consts::DEFAULT_TT_SIZE_MB;
use search::{iterative_deepening, Info, SearchState};
use sync::StopSignal;
use time::{Limits, TimeManager};
use tt::TranspositionTable;

/// Everything a single `run_search` call needs: the position to search from, how long
/// to search, and where to send progress/results.
pub struct RunSearchArg {
    pub board: Board,
    pub limits: Limits,
    pub max_depth: u8,
    pub stop: StopSignal,
}

/// A finished search: the move to play and the final reported iteration.
pub struct SearchResult {
    pub best_move: Option<BitMove>,
    pub info: Option<Info>,
}

/// Owns the transposition table across searches (so it survives `ucinewgame`-style
/// resets only when the front-end asks for one) and hands off each search to its own
/// worker thread.
pub struct Engine {
    tt: TranspositionTable,
}

impl Engine {
    /// Allocates a table of `mb_size` megabytes and an empty starting position,
    /// with no UCI/option bookkeeping attached.
    pub fn init(mb_size: usize) -> Self {
        Engine {
            tt: TranspositionTable::new(mb_size),
        }
    }

    pub fn resize(&mut self, mb_size: usize) {
        self.tt.resize(mb_size);
    }

    pub fn clear(&mut self) {
        self.tt.clear();
    }

    /// Spawns a worker thread that searches `arg.board` and reports each iteration to
    /// `on_info` as it completes. Returns a handle the caller joins for the final
    /// result, and a receiver that streams `Info` records as they arrive.
    pub fn run_search(&mut self, arg: RunSearchArg) -> (JoinHandle<SearchResult>, Receiver<Info>) {
        let (tx, rx) = mpsc::channel();
        let tt_ptr: *mut TranspositionTable = &mut self.tt;
        // Safety: `Engine` blocks on the returned `JoinHandle` (or the caller does)
        // before touching `self.tt` again, so the table outlives the worker and is
        // never aliased mutably from two threads at once.
        let tt_ref: &'static mut TranspositionTable = unsafe { &mut *tt_ptr };

        let handle = thread::Builder::new()
            .name("search".to_string())
            .spawn(move || {
                let RunSearchArg {
                    mut board,
                    limits,
                    max_depth,
                    stop,
                } = arg;

                let start = Instant::now();
                let us = board.turn();
                let phase = talon_core::tools::eval::Eval::game_phase(&board);
                let time = TimeManager::init(start, &limits, us, phase);
                let mut state = SearchState::new(tt_ref, stop, time, limits.nodes);

                let mut last_info = None;
                let best_move =
                    iterative_deepening(&mut board, max_depth, limits.mate, &mut state, |info| {
                        last_info = Some(info.clone());
                        let _ = tx.send(info);
                    });

                info!("worker finished, {} nodes searched", state.nodes);
                SearchResult {
                    best_move,
                    info: last_info,
                }
            })
            .expect("failed to spawn search worker thread");

        (handle, rx)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::init(DEFAULT_TT_SIZE_MB)
    }
}

/// Counts leaf nodes at `depth` below `board`, for move-generator correctness testing.
/// A thin wrapper over `talon_core::perft` kept here so front-ends have one place to
/// call into for both searching and perft.
pub fn perft(board: &Board, depth: u16) -> u64 {
    talon_core::perft(board, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn run_search_reports_a_move() {
        let mut engine = Engine::init(1);
        let arg = RunSearchArg {
            board: Board::start_pos(),
            limits: Limits::default(),
            max_depth: 3,
            stop: StopSignal::new(),
        };
        let (handle, rx) = engine.run_search(arg);
        for _info in rx.iter() {}
        let result = handle.join().expect("worker thread panicked");
        assert!(result.best_move.is_some());
    }

    #[test]
    fn stop_signal_halts_a_deep_search_promptly() {
        let mut engine = Engine::init(1);
        let stop = StopSignal::new();
        let arg = RunSearchArg {
            board: Board::start_pos(),
            limits: Limits::default(),
            max_depth: 60,
            stop: stop.clone(),
        };
        let (handle, rx) = engine.run_search(arg);
        stop.stop();
        for _info in rx.iter() {}
        let result = handle.join().expect("worker thread panicked");
        assert!(result.best_move.is_some());
        let _ = Duration::from_millis(0);
    }
}
