//! Search configuration (spec §9 C15): `SearchParams` is the knob set `Search` actually
//! consumes; `Difficulty` is a collaborator-level convenience that resolves to one.
//! Grounded on the teacher's `engine/game.rs` construction of `SearchParams { max_depth,
//! min_search_time_ms }` from an `ai_depth` knob, generalized to `Duration` and given a
//! `max_search_time` hard cap plus the named `Difficulty` presets the teacher declared
//! but never consistently used.

use std::time::Duration;

/// `max_depth` bounds how deep iterative deepening goes; `min_search_time` is the floor
/// below which a completed iteration is not yet considered "done enough" to stop early;
/// `max_search_time` is the hard cap checked before starting a new iteration (spec §5
/// "Suspension and cancellation").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    pub max_depth: u8,
    pub min_search_time: Duration,
    pub max_search_time: Duration,
}

impl SearchParams {
    pub fn new(max_depth: u8, min_search_time: Duration, max_search_time: Duration) -> Self {
        SearchParams {
            max_depth,
            min_search_time,
            max_search_time,
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Difficulty::Medium.resolve()
    }
}

/// A named preset a collaborator can pick without knowing depth/time numbers. `Search`
/// never matches on `Difficulty` directly — `resolve` is the single place the mapping
/// happens (spec §9 open question, decided).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Master,
}

impl Difficulty {
    pub fn resolve(self) -> SearchParams {
        match self {
            Difficulty::Easy => SearchParams::new(3, Duration::from_millis(200), Duration::from_secs(1)),
            Difficulty::Medium => SearchParams::new(5, Duration::from_millis(500), Duration::from_secs(3)),
            Difficulty::Hard => SearchParams::new(7, Duration::from_secs(1), Duration::from_secs(8)),
            Difficulty::Master => SearchParams::new(9, Duration::from_secs(2), Duration::from_secs(20)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harder_difficulties_search_deeper() {
        assert!(Difficulty::Easy.resolve().max_depth < Difficulty::Master.resolve().max_depth);
    }

    #[test]
    fn default_params_match_medium_difficulty() {
        assert_eq!(SearchParams::default(), Difficulty::Medium.resolve());
    }
}
