//! Transposition table (spec §4.9): fixed-capacity, direct-mapped by
//! `hash % num_entries`, always-replace-on-greater-or-equal-depth. Grounded on the
//! teacher's `search/transposition_table.rs` almost verbatim for the entry shape and
//! replacement policy; the `Bound` tag and mate-distance normalization on probe/store
//! are new, required by negamax alpha-beta to use TT scores soundly (spec §8 invariant 8)
//! and to keep "fastest mate" ordering stable across different root search depths.

use crate::board::Move;
use crate::eval::CHECKMATE_SCORE;

/// Whether a stored score is the position's exact value, or only a bound established
/// by an alpha/beta cutoff.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Copy, Clone, Debug)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

const EMPTY_ENTRY: TTEntry = TTEntry {
    hash: 0,
    depth: 0,
    score: 0,
    bound: Bound::Exact,
    best_move: None,
};

pub struct TranspositionTable {
    table: Vec<TTEntry>,
    num_entries: usize,
    hits: usize,
    misses: usize,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new_with_size_mb(64)
    }
}

impl TranspositionTable {
    pub fn new_with_size_mb(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<TTEntry>();
        let num_entries = (size_mb * 1024 * 1024 / entry_size).next_power_of_two() / 2;
        Self::new_with_entries(num_entries.max(1))
    }

    pub fn new_with_entries(num_entries: usize) -> Self {
        TranspositionTable {
            table: vec![EMPTY_ENTRY; num_entries],
            num_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up `hash`, returning the entry only if it was searched to at least
    /// `depth`. Mate scores are un-normalized back to "plies from here" using the
    /// caller's current `ply` before being handed back, since they were stored
    /// relative to the node where the mate was found.
    pub fn probe(&mut self, hash: u64, depth: u8, ply: u32) -> Option<TTEntry> {
        let index = (hash as usize) % self.num_entries;
        let entry = self.table[index];

        if entry.hash == hash && entry.depth >= depth {
            self.hits += 1;
            let mut adjusted = entry;
            adjusted.score = from_tt_score(entry.score, ply);
            return Some(adjusted);
        }
        self.misses += 1;
        None
    }

    /// Stores `score` (already relative to `ply`, i.e. as the search computed it at
    /// the root-relative ply where this node sits) after normalizing mate scores to
    /// be ply-independent, so that a faster mate found via one move order doesn't
    /// compare worse than a slower mate found via another.
    pub fn store(&mut self, hash: u64, depth: u8, score: i32, bound: Bound, best_move: Option<Move>, ply: u32) {
        let index = (hash as usize) % self.num_entries;
        let existing = self.table[index];

        if existing.hash == 0 || depth >= existing.depth {
            self.table[index] = TTEntry {
                hash,
                depth,
                score: to_tt_score(score, ply),
                bound,
                best_move,
            };
        }
    }

    /// Returns the stored best move regardless of depth, to seed move ordering on
    /// shallow re-searches (spec §4.9 `GetBestMove`).
    pub fn get_best_move(&self, hash: u64) -> Option<Move> {
        let index = (hash as usize) % self.num_entries;
        let entry = self.table[index];
        if entry.hash == hash { entry.best_move } else { None }
    }

    pub fn clear(&mut self) {
        self.table.fill(EMPTY_ENTRY);
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    pub fn size(&self) -> usize {
        self.table.iter().filter(|e| e.hash != 0).count()
    }

    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn memory_usage(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{bytes} B")
        } else if bytes < 1024 * 1024 {
            format!("{:.2} KB", bytes as f64 / 1024.0)
        } else if bytes < 1024 * 1024 * 1024 {
            format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
        } else {
            format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.size() * std::mem::size_of::<TTEntry>()
    }
}

/// A mate score is within `CHECKMATE_SCORE - MAX_PLY` of the checkmate constant; store
/// it as "plies from this node" rather than "plies from the root" so it stays valid
/// when probed from a different ply in a later search.
fn to_tt_score(score: i32, ply: u32) -> i32 {
    if score > CHECKMATE_SCORE - 1000 {
        score + ply as i32
    } else if score < -CHECKMATE_SCORE + 1000 {
        score - ply as i32
    } else {
        score
    }
}

fn from_tt_score(score: i32, ply: u32) -> i32 {
    if score > CHECKMATE_SCORE - 1000 {
        score - ply as i32
    } else if score < -CHECKMATE_SCORE + 1000 {
        score + ply as i32
    } else {
        score
    }
}
