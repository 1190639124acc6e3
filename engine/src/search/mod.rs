//! Iterative-deepening negamax search with alpha-beta pruning.
//!
//! Deliberately narrower than a search driving a Lazy-SMP thread pool, with per-thread
//! reduction tables and a razoring/singular-extension stack tuned for many concurrent
//! workers. This crate runs exactly one worker, so the search below keeps the core
//! negamax/quiescence/move-ordering shape such a search would use but drops everything
//! that exists only to coordinate multiple threads.

use std::cmp::max;
use std::time::Instant;

use log::info;

use talon_core::core::score::{Value, NEG_INFINITE};
use talon_core::tools::eval::Eval;
use talon_core::{BitMove, Board};

use consts::{
    FUTILITY_MARGIN_PER_DEPTH, INF, MATE_IN_MAX_PLY, MAX_DEPTH, MAX_PLY, NEG_INF,
    NODE_POLL_INTERVAL, NULL_MOVE_REDUCTION, NUM_KILLERS,
};
use movepick::{score_moves, select_best, KillerTable};
use root_moves::RootMoveList;
use sync::StopSignal;
use time::TimeManager;
use tt::{adjust_to_tt, score_from_tt, NodeBound, TranspositionTable};

/// One iteration's worth of search progress, reported to the front-end (out of scope
/// for this crate) through `run_search`'s `on_info` callback.
#[derive(Clone, Debug)]
pub struct Info {
    pub depth: u8,
    pub score: Value,
    pub is_mate: bool,
    /// Set when this iteration was interrupted (by the stop flag, the clock, or the
    /// node budget) before every root move was re-searched at `depth`: `score`/`pv`
    /// reflect only the moves that finished, not a fully verified result.
    pub is_lowerbound: bool,
    pub nodes: u64,
    pub time_ms: i64,
    pub nps: u64,
    pub pv: BitMove,
}

/// Bundles everything a search needs that isn't the position itself: the table, the
/// clock, the node budget, and the cooperative stop flag a worker thread polls.
pub struct SearchState<'a> {
    pub tt: &'a mut TranspositionTable,
    pub stop: StopSignal,
    pub time: TimeManager,
    pub nodes: u64,
    node_limit: Option<u64>,
    killers: KillerTable,
}

impl<'a> SearchState<'a> {
    pub fn new(
        tt: &'a mut TranspositionTable,
        stop: StopSignal,
        time: TimeManager,
        node_limit: Option<u64>,
    ) -> Self {
        SearchState {
            tt,
            stop,
            time,
            nodes: 0,
            node_limit,
            killers: KillerTable::new(MAX_PLY),
        }
    }

    /// Cheap cooperative cancellation: the clock is only checked every
    /// `NODE_POLL_INTERVAL` nodes so the atomic load doesn't show up in profiles, but a
    /// node budget is compared on every call since it's a plain integer compare.
    #[inline]
    fn should_stop(&self) -> bool {
        if let Some(limit) = self.node_limit {
            if self.nodes >= limit {
                return true;
            }
        }
        if self.nodes % NODE_POLL_INTERVAL == 0 && self.time.is_expired() {
            return true;
        }
        self.stop.stopped()
    }
}

/// Runs iterative deepening from the current position up to `max_depth`, calling
/// `on_info` after every completed iteration. Returns the best move found, or `None` if
/// the position has no legal moves. `mate`, if set, stops the search as soon as a mate
/// in that many moves (or fewer) is found, rather than at the first mate score of any
/// length.
pub fn iterative_deepening<F: FnMut(Info)>(
    board: &mut Board,
    max_depth: u8,
    mate: Option<u8>,
    state: &mut SearchState,
    mut on_info: F,
) -> Option<BitMove> {
    let root_moves = board.generate_moves();
    if root_moves.is_empty() {
        return None;
    }
    let mut rml = RootMoveList::new(&root_moves);

    let start = Instant::now();
    let max_depth = max_depth.min(MAX_DEPTH);
    let mut best_move = rml.best_move();

    for depth in 1..=max_depth {
        rml.rollback();
        let mut alpha = NEG_INF;
        let beta = INF;
        let mut completed = true;

        for i in 0..rml.len() {
            if state.should_stop() {
                completed = false;
                break;
            }
            let mv = rml.iter().nth(i).unwrap().bit_move;
            board.apply_move(mv);
            state.nodes += 1;
            let score = -negamax(board, state, depth.saturating_sub(1), 1, -beta, -alpha, true);
            board.undo_move();

            if let Some(rm) = rml.find_mut(mv) {
                rm.update(score, depth);
            }
            if score > alpha {
                alpha = score;
            }
        }

        if state.stop.stopped() || (state.time.stop_time_ms().is_some() && state.time.is_expired()) {
            if depth == 1 {
                rml.sort();
                best_move = rml.best_move();
            }
            break;
        }

        rml.sort();
        best_move = rml.best_move();

        let elapsed = state.time.elapsed_ms().max(1);
        let best_score = rml.iter().next().map(|m| m.score).unwrap_or(0);
        let is_mate = best_score.abs() >= MATE_IN_MAX_PLY;
        on_info(Info {
            depth,
            score: best_score,
            is_mate,
            is_lowerbound: !completed,
            nodes: state.nodes,
            time_ms: elapsed,
            nps: (state.nodes * 1000) / elapsed as u64,
            pv: best_move.unwrap_or(BitMove::null()),
        });

        if is_mate {
            let mate_plies = (INF - best_score.abs()) as u32;
            let mate_moves = (mate_plies + 1) / 2;
            let within_request = mate.map_or(true, |n| mate_moves <= n as u32);
            if within_request {
                break;
            }
        }
    }

    info!(
        "search finished in {} ms, {} nodes",
        start.elapsed().as_millis(),
        state.nodes
    );
    best_move
}

/// The recursive negamax/alpha-beta search.
fn negamax(
    board: &mut Board,
    state: &mut SearchState,
    depth: u8,
    ply: u16,
    mut alpha: Value,
    beta: Value,
    allow_null: bool,
) -> Value {
    if depth == 0 {
        return quiescence(board, state, ply, alpha, beta);
    }
    if state.should_stop() {
        return 0;
    }
    if ply as usize >= MAX_PLY {
        return Eval::eval_low(board);
    }
    if ply > 0 && (board.is_repetition() || board.fifty_move_rule()) {
        return 0;
    }

    let in_check = board.in_check();
    let hash = board.zobrist();
    let mut tt_move = BitMove::null();

    if let Some(entry) = state.tt.probe(hash) {
        tt_move = entry.best_move;
        if entry.depth as u8 >= depth {
            let score = score_from_tt(entry.score, ply);
            match entry.bound {
                NodeBound::Exact => return score,
                NodeBound::Lower if score >= beta => return score,
                NodeBound::Upper if score <= alpha => return score,
                _ => {}
            }
        }
    }

    let static_eval = Eval::eval_low(board);

    // Reverse futility pruning: if we're already far above beta with margin to spare
    // and not in check, assume the position holds without searching further.
    if !in_check && depth <= 6 {
        let margin = FUTILITY_MARGIN_PER_DEPTH * depth as i32;
        if (static_eval as i32) - margin >= beta as i32 {
            return static_eval;
        }
    }

    // Null-move pruning: skip our own move and see if the opponent still can't beat
    // beta. Disabled in check, near the root of a mating line, or when the side to
    // move has only a king and pawns (zugzwang risk).
    if allow_null
        && !in_check
        && depth > NULL_MOVE_REDUCTION
        && static_eval >= beta
        && board.non_pawn_material(board.turn()) > 0
    {
        unsafe {
            board.apply_null_move();
        }
        let r = NULL_MOVE_REDUCTION;
        let score = -negamax(board, state, depth - r, ply + 1, -beta, -beta + 1, false);
        unsafe {
            board.undo_null_move();
        }
        if score >= beta {
            return score;
        }
    }

    let mut moves = board.generate_moves();
    if moves.is_empty() {
        return if in_check {
            -INF + ply as Value
        } else {
            0
        };
    }

    let killers = state.killers.at(ply as usize % MAX_PLY);
    let mut scores = score_moves(board, &moves, tt_move, killers);

    let mut best_score = NEG_INF;
    let mut best_move = BitMove::null();
    let mut bound = NodeBound::Upper;
    let original_alpha = alpha;

    for i in 0..moves.len() {
        select_best(&mut moves, &mut scores, i);
        let mv = moves[i];

        // Futility pruning on quiet moves deep in the tree: if even optimistic
        // material swing can't reach alpha, skip without searching.
        let gives_check = board.gives_check(mv);
        if !in_check
            && !gives_check
            && !mv.is_capture()
            && depth <= 6
            && i > 0
            && (static_eval as i32) + FUTILITY_MARGIN_PER_DEPTH * depth as i32 <= alpha as i32
        {
            continue;
        }

        board.apply_move(mv);
        state.nodes += 1;
        let score = -negamax(board, state, depth - 1, ply + 1, -beta, -alpha, true);
        board.undo_move();

        if score > best_score {
            best_score = score;
            best_move = mv;
            if score > alpha {
                alpha = score;
                bound = NodeBound::Exact;
                if alpha >= beta {
                    if !mv.is_capture() {
                        state.killers.insert(ply as usize % MAX_PLY, mv);
                    }
                    bound = NodeBound::Lower;
                    break;
                }
            }
        }
    }

    let _ = original_alpha;
    state.tt.store(
        hash,
        best_move,
        adjust_to_tt(best_score, ply),
        static_eval,
        depth as i8,
        bound,
    );
    best_score
}

/// Quiescence search: extends the leaf nodes of `negamax` with captures only, so the
/// static evaluation is never taken in the middle of a capture exchange.
fn quiescence(board: &mut Board, state: &mut SearchState, ply: u16, mut alpha: Value, beta: Value) -> Value {
    if state.should_stop() {
        return 0;
    }
    if ply as usize >= MAX_PLY {
        return Eval::eval_low(board);
    }
    let in_check = board.in_check();
    let stand_pat = Eval::eval_low(board);

    if !in_check {
        if stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
    }

    let mut moves = board.generate_moves();
    if moves.is_empty() {
        return if in_check { -INF + ply as Value } else { stand_pat };
    }

    let no_killers = [BitMove::null(); NUM_KILLERS];
    let mut scores = score_moves(board, &moves, BitMove::null(), no_killers);
    let mut best_score = if in_check { NEG_INFINITE } else { stand_pat };

    for i in 0..moves.len() {
        select_best(&mut moves, &mut scores, i);
        let mv = moves[i];
        if !in_check && !mv.is_capture() {
            continue;
        }
        // Skip captures that lose material outright; a position in check always
        // searches every evasion regardless of SEE.
        if !in_check && mv.is_capture() && Eval::see(board, mv) < 0 {
            continue;
        }

        board.apply_move(mv);
        state.nodes += 1;
        let score = -quiescence(board, state, ply + 1, -beta, -alpha);
        board.undo_move();

        if score > best_score {
            best_score = score;
            if score > alpha {
                alpha = score;
                if alpha >= beta {
                    return alpha;
                }
            }
        }
    }

    best_score
}
