//! The transposition table: a fixed-capacity hash map from Zobrist key to search results.
//!
//! Unlike a design that clusters several entries behind a raw heap allocation so the
//! table can run lock-free across many worker threads, this table backs a single
//! worker and is a plain `Vec<Entry>` indexed by `hash mod capacity`. Entries are
//! always overwritten on store ("replace always"); a full-hash comparison on probe is
//! what actually protects against index collisions.

use log::{debug, info};
use talon_core::core::score::Value;
use talon_core::BitMove;

use consts::MATE_IN_MAX_PLY;

/// The kind of bound a stored score represents relative to the search window it was
/// found under.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NodeBound {
    /// No entry stored here yet.
    None,
    /// Score is an exact value (the search completed within `(alpha, beta)`).
    Exact,
    /// Score is a lower bound (search failed high, `score >= beta`).
    Lower,
    /// Score is an upper bound (search failed low, `score <= alpha`).
    Upper,
}

/// A single transposition-table slot.
#[derive(Copy, Clone)]
pub struct Entry {
    pub hash: u64,
    pub best_move: BitMove,
    pub score: Value,
    pub eval: Value,
    pub depth: i8,
    pub bound: NodeBound,
}

impl Entry {
    const EMPTY: Entry = Entry {
        hash: 0,
        best_move: BitMove::null(),
        score: 0,
        eval: 0,
        depth: 0,
        bound: NodeBound::None,
    };

    pub fn is_empty(&self) -> bool {
        self.bound == NodeBound::None
    }
}

const BYTES_PER_MB: usize = 1024 * 1024;

/// Fixed-capacity, single-slot-per-index transposition table.
pub struct TranspositionTable {
    entries: Vec<Entry>,
    capacity: usize,
}

impl TranspositionTable {
    /// Builds a table sized to roughly `mb_size` megabytes, rounded to the nearest
    /// prime capacity for better index dispersion.
    pub fn new(mb_size: usize) -> Self {
        let requested = (mb_size.max(1) * BYTES_PER_MB) / ::std::mem::size_of::<Entry>();
        let capacity = nearest_prime(requested.max(1024));
        info!(
            "allocating transposition table: {} entries (~{} MiB), capacity {}",
            capacity,
            (capacity * ::std::mem::size_of::<Entry>()) / BYTES_PER_MB,
            capacity
        );
        TranspositionTable {
            entries: vec![Entry::EMPTY; capacity],
            capacity,
        }
    }

    /// Re-sizes the table to roughly `mb_size` megabytes, clearing all entries.
    pub fn resize(&mut self, mb_size: usize) {
        *self = TranspositionTable::new(mb_size);
    }

    /// Clears every entry without changing capacity.
    pub fn clear(&mut self) {
        debug!("clearing transposition table ({} entries)", self.capacity);
        for e in self.entries.iter_mut() {
            *e = Entry::EMPTY;
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.capacity as u64) as usize
    }

    /// Looks up `hash`. Returns `Some(entry)` only if the stored entry's full hash
    /// matches (index collisions are never mistaken for hits).
    #[inline]
    pub fn probe(&self, hash: u64) -> Option<&Entry> {
        let e = &self.entries[self.index(hash)];
        if !e.is_empty() && e.hash == hash {
            Some(e)
        } else {
            None
        }
    }

    /// Stores `entry` at `hash`'s slot, unconditionally overwriting whatever was there.
    #[inline]
    pub fn store(
        &mut self,
        hash: u64,
        best_move: BitMove,
        score: Value,
        eval: Value,
        depth: i8,
        bound: NodeBound,
    ) {
        let idx = self.index(hash);
        self.entries[idx] = Entry {
            hash,
            best_move,
            score,
            eval,
            depth,
            bound,
        };
    }

    /// Issues a non-binding prefetch of the slot `hash` would occupy. A no-op off
    /// x86/x86_64.
    #[inline]
    pub fn prefetch(&self, hash: u64) {
        talon_core::tools::prefetch_write(&self.entries[self.index(hash)] as *const Entry);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Normalizes a search score for storage: mate scores are expressed relative to the
/// root rather than the current ply, so cross-ply transpositions don't make the
/// engine prefer a longer mate over a shorter one.
#[inline]
pub fn adjust_to_tt(score: Value, ply: u16) -> Value {
    let ply = ply as Value;
    if score >= MATE_IN_MAX_PLY {
        score + ply
    } else if score <= -MATE_IN_MAX_PLY {
        score - ply
    } else {
        score
    }
}

/// Inverse of `adjust_to_tt`: converts a stored, root-relative mate score back into
/// one relative to the current ply.
#[inline]
pub fn score_from_tt(score: Value, ply: u16) -> Value {
    let ply = ply as Value;
    if score >= MATE_IN_MAX_PLY {
        score - ply
    } else if score <= -MATE_IN_MAX_PLY {
        score + ply
    } else {
        score
    }
}

/// Returns the nearest prime `>= n`, scanning upward. `n` is always a reasonably large
/// table-entry count, so trial division by odd numbers up to `sqrt` is fast enough.
fn nearest_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    loop {
        if is_prime(candidate) {
            return candidate;
        }
        candidate += 2;
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
