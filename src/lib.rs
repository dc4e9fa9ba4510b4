//! Team Matcher - role-aware team matchmaking
//!
//! This library forms balanced two-team matches from a pool of queued players.
//! Players are pulled from a priority queue (waiting time and skill rating),
//! snake-distributed into two teams, given one role each, and finally balanced
//! by same-role swaps across teams.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{CandidatePool, FormationConfig, FormationError, MatchFormer, PartialFormation, RoleSelection};
pub use models::{Candidate, Match, MatchRecord, PlayerRecord, PriorityWeights, Role, Team, TeamSide};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let mut pool: CandidatePool = (0..10)
            .map(|i| Candidate::new(format!("p{}", i), 2000, 100, Role::ALL.to_vec()))
            .collect();

        let matches = MatchFormer::default().form_matches(&mut pool).unwrap();
        assert_eq!(matches.len(), 1);
    }
}
