use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::error::FormationError;
use crate::models::domain::{Candidate, PriorityWeights, Role};

/// Raw queue entry as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlayerRecord {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", alias = "userId")]
    pub id: String,
    pub mmr: u32,
    #[validate(length(equal = 5))]
    pub roles: Vec<String>,
    #[serde(alias = "waiting_time", rename = "waitingTime")]
    pub waiting_time: u32,
}

impl PlayerRecord {
    /// Turn the record into a pool-ready candidate
    ///
    /// Rejects empty ids, unknown role tags and role lists that are not a
    /// permutation of the five canonical roles.
    pub fn into_candidate(self, weights: &PriorityWeights) -> Result<Candidate, FormationError> {
        if self.id.trim().is_empty() {
            return Err(FormationError::MalformedCandidate {
                id: self.id,
                reason: "identifier is empty".to_string(),
            });
        }

        if self.roles.len() != Role::ALL.len() {
            return Err(FormationError::MalformedCandidate {
                reason: format!(
                    "expected {} role preferences, got {}",
                    Role::ALL.len(),
                    self.roles.len()
                ),
                id: self.id,
            });
        }

        let mut preference = Vec::with_capacity(self.roles.len());
        for tag in &self.roles {
            let role = match tag.parse::<Role>() {
                Ok(role) => role,
                Err(reason) => {
                    return Err(FormationError::MalformedCandidate { id: self.id, reason });
                }
            };
            if preference.contains(&role) {
                return Err(FormationError::MalformedCandidate {
                    reason: format!("role '{}' listed more than once", role),
                    id: self.id,
                });
            }
            preference.push(role);
        }

        Ok(Candidate::with_weights(
            self.id,
            self.mmr,
            self.waiting_time,
            preference,
            weights,
        ))
    }
}

/// Request to form matches from a batch of queued players
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FormMatchesRequest {
    #[validate(nested)]
    pub players: Vec<PlayerRecord>,
    #[validate(range(min = 1, max = 5))]
    #[serde(default, alias = "team_size", rename = "teamSize")]
    pub team_size: Option<usize>,
}
