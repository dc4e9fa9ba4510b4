use serde::{Deserialize, Serialize};
use crate::models::domain::{Match, Role, Team, TeamSide};

/// Player as written into a formed match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRecord {
    pub side: TeamSide,
    pub users: Vec<UserRecord>,
    #[serde(rename = "totalSkill")]
    pub total_skill: u64,
}

impl From<&Team> for TeamRecord {
    fn from(team: &Team) -> Self {
        Self {
            side: team.side,
            users: team
                .slots
                .iter()
                .map(|slot| UserRecord {
                    id: slot.candidate.id().to_string(),
                    role: slot.role,
                })
                .collect(),
            total_skill: team.total_skill(),
        }
    }
}

/// Serialized form of a formed match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub teams: Vec<TeamRecord>,
    #[serde(rename = "skillGap")]
    pub skill_gap: u64,
}

impl From<&Match> for MatchRecord {
    fn from(m: &Match) -> Self {
        Self {
            match_id: m.id().to_string(),
            teams: m.teams().iter().map(TeamRecord::from).collect(),
            skill_gap: m.skill_gap(),
        }
    }
}

/// Response for form matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormMatchesResponse {
    pub matches: Vec<MatchRecord>,
    /// Players left in the pool, best priority first, for the caller to re-queue
    pub unmatched: Vec<String>,
    #[serde(rename = "totalPlayers")]
    pub total_players: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Candidate, TeamSlot};

    #[test]
    fn test_match_record_shape() {
        let slot = |id: &str, skill: u32, role: Role| TeamSlot {
            candidate: Candidate::new(id, skill, 0, Role::ALL.to_vec()),
            role,
        };
        let m = Match::new(
            Team::new(TeamSide::Red, vec![slot("a", 2000, Role::Top)]),
            Team::new(TeamSide::Blue, vec![slot("b", 1800, Role::Top)]),
        );

        let json = serde_json::to_value(MatchRecord::from(&m)).unwrap();

        assert_eq!(json["matchId"], m.id().to_string());
        assert_eq!(json["skillGap"], 200);
        assert_eq!(json["teams"][0]["side"], "red");
        assert_eq!(json["teams"][1]["side"], "blue");
        assert_eq!(json["teams"][0]["users"][0]["id"], "a");
        assert_eq!(json["teams"][0]["users"][0]["role"], "top");
    }
}
