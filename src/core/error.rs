use thiserror::Error;

use crate::models::{Match, Role};

/// Errors that can occur while forming matches
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormationError {
    #[error("Insufficient candidates: requested {requested}, only {available} in pool")]
    InsufficientCandidates { requested: usize, available: usize },

    #[error("Role not found: candidate {candidate_id} does not rank role '{role}'")]
    RoleNotFound { candidate_id: String, role: Role },

    #[error("Malformed candidate {id}: {reason}")]
    MalformedCandidate { id: String, reason: String },

    #[error("Group size mismatch: expected {expected} candidates, got {actual}")]
    GroupSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid team size {0}: must be between 1 and {max}", max = Role::ALL.len())]
    InvalidTeamSize(usize),
}

/// A formation run that stopped on an error
///
/// Matches emitted before the failure are kept; the candidates of the failed
/// group are gone.
#[derive(Debug, Error)]
#[error("Match formation aborted after {} matches: {error}", .matches.len())]
pub struct PartialFormation {
    pub matches: Vec<Match>,
    #[source]
    pub error: FormationError,
}
