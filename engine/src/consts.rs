//! Constant values shared across the search, move-ordering, and time-management code.

use talon_core::core::score::Value;

/// Maximum search depth the iterative-deepening loop will request.
pub const MAX_DEPTH: u8 = 128;

/// Maximum ply the search tree can reach (root + quiescence included).
pub const MAX_PLY: usize = 2 * MAX_DEPTH as usize;

/// Effectively infinite score, used as the initial alpha-beta window bound.
pub const INF: Value = ::std::i16::MAX;

/// Negated `INF`.
pub const NEG_INF: Value = -INF;

/// Scores with absolute value at or above this are "mate scores" (forced mate found).
pub const MATE_IN_MAX_PLY: Value = INF - MAX_PLY as Value;

/// Depth reduction applied when trying a null move.
pub const NULL_MOVE_REDUCTION: u8 = 4;

/// Centipawn margin per ply used by futility and reverse-futility pruning.
pub const FUTILITY_MARGIN_PER_DEPTH: i32 = 175;

/// How often (in visited nodes) the search polls the clock and stop flag.
pub const NODE_POLL_INTERVAL: u64 = 8192;

/// Average number of moves assumed remaining in a game, used by time management.
pub const AVERAGE_GAME_LENGTH: i64 = 40;

/// Default size (megabytes) of a freshly-initialized transposition table.
pub const DEFAULT_TT_SIZE_MB: usize = 256;

/// Number of killer-move slots tracked per ply.
pub const NUM_KILLERS: usize = 2;

/// Score bonus added to a killer move during move ordering.
pub const KILLER_SCORE_BONUS: i32 = 600;

/// Score bonus added to a capture move during move ordering (on top of MVV-LVA).
pub const CAPTURE_SCORE_BONUS: i32 = 300;
