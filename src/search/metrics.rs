//! Per-`findBestMove`-call node/time accounting (spec §4.10), surfaced through the
//! logging facade rather than printed directly. Field set grounded on the teacher's
//! `ChessEngine::print_search_stats` (`nodes_explored`, `search_time`,
//! `max_depth_reached`, `beta_cutoffs`), with transposition-table hit/miss counts
//! folded in since `Game` logs them together at the end of a search.

use std::time::Duration;

#[derive(Copy, Clone, Debug, Default)]
pub struct SearchMetrics {
    pub nodes_explored: u64,
    pub beta_cutoffs: u64,
    pub max_depth_reached: u8,
    pub tt_hits: usize,
    pub tt_misses: usize,
    pub search_time: Duration,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.search_time.as_secs_f64();
        if secs > 0.0 {
            self.nodes_explored as f64 / secs
        } else {
            0.0
        }
    }

    pub fn cutoff_rate(&self) -> f64 {
        if self.nodes_explored > 0 {
            self.beta_cutoffs as f64 / self.nodes_explored as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn tt_hit_rate(&self) -> f64 {
        let total = self.tt_hits + self.tt_misses;
        if total > 0 {
            self.tt_hits as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_zero_with_no_nodes() {
        let metrics = SearchMetrics::new();
        assert_eq!(metrics.nodes_per_second(), 0.0);
        assert_eq!(metrics.cutoff_rate(), 0.0);
        assert_eq!(metrics.tt_hit_rate(), 0.0);
    }

    #[test]
    fn cutoff_rate_is_a_percentage_of_nodes() {
        let metrics = SearchMetrics {
            nodes_explored: 200,
            beta_cutoffs: 50,
            ..SearchMetrics::new()
        };
        assert_eq!(metrics.cutoff_rate(), 25.0);
    }
}
