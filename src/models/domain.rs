use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::core::priority::calculate_priority_score;

/// One of the five functional positions on a team
///
/// Declaration order is the canonical processing order used by role assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    #[serde(alias = "sup")]
    Support,
}

impl Role {
    /// All roles in canonical processing order
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bot, Role::Support];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "top",
            Role::Jungle => "jungle",
            Role::Mid => "mid",
            Role::Bot => "bot",
            Role::Support => "support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Role::Top),
            "jungle" | "jg" => Ok(Role::Jungle),
            "mid" => Ok(Role::Mid),
            "bot" | "adc" => Ok(Role::Bot),
            "support" | "sup" => Ok(Role::Support),
            other => Err(format!("unknown role tag '{}'", other)),
        }
    }
}

/// Weights and normalization constants for the pool priority score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityWeights {
    pub waiting_time: f64,
    pub skill: f64,
    /// Waiting time treated as "full" (1.0 after normalization)
    pub waiting_time_scale: f64,
    /// Skill rating treated as "full" (1.0 after normalization)
    pub skill_scale: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            waiting_time: 0.7,
            skill: 0.3,
            waiting_time_scale: 1000.0,
            skill_scale: 3000.0,
        }
    }
}

/// A player waiting in the queue
///
/// The priority score is derived once from waiting time and skill rating at
/// construction; fields are read-only afterwards so the two cannot drift apart.
#[derive(Debug, Clone)]
pub struct Candidate {
    id: String,
    skill_rating: u32,
    waiting_ticks: u32,
    role_preference: Vec<Role>,
    priority_score: f64,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        skill_rating: u32,
        waiting_ticks: u32,
        role_preference: Vec<Role>,
    ) -> Self {
        Self::with_weights(
            id,
            skill_rating,
            waiting_ticks,
            role_preference,
            &PriorityWeights::default(),
        )
    }

    pub fn with_weights(
        id: impl Into<String>,
        skill_rating: u32,
        waiting_ticks: u32,
        role_preference: Vec<Role>,
        weights: &PriorityWeights,
    ) -> Self {
        Self {
            id: id.into(),
            skill_rating,
            waiting_ticks,
            priority_score: calculate_priority_score(waiting_ticks, skill_rating, weights),
            role_preference,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn skill_rating(&self) -> u32 {
        self.skill_rating
    }

    pub fn waiting_ticks(&self) -> u32 {
        self.waiting_ticks
    }

    pub fn role_preference(&self) -> &[Role] {
        &self.role_preference
    }

    /// More negative means extracted earlier
    pub fn priority_score(&self) -> f64 {
        self.priority_score
    }

    /// Position of `role` in this candidate's preference list (0 = most preferred)
    pub fn preference_rank(&self, role: Role) -> Option<usize> {
        self.role_preference.iter().position(|r| *r == role)
    }
}

/// A candidate bound to one role for the lifetime of a match
#[derive(Debug, Clone)]
pub struct TeamSlot {
    pub candidate: Candidate,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Red,
    Blue,
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Red => f.write_str("red"),
            TeamSide::Blue => f.write_str("blue"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Team {
    pub side: TeamSide,
    pub slots: Vec<TeamSlot>,
}

impl Team {
    pub fn new(side: TeamSide, slots: Vec<TeamSlot>) -> Self {
        Self { side, slots }
    }

    pub fn total_skill(&self) -> u64 {
        self.slots
            .iter()
            .map(|slot| u64::from(slot.candidate.skill_rating()))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot filled by `role`, if any
    pub fn slot_for(&self, role: Role) -> Option<&TeamSlot> {
        self.slots.iter().find(|slot| slot.role == role)
    }
}

/// Two role-assigned teams facing each other
///
/// Teams are only rewritten by the balancer before the match is handed out.
#[derive(Debug, Clone)]
pub struct Match {
    match_id: Uuid,
    pub(crate) teams: [Team; 2],
}

impl Match {
    pub fn new(red: Team, blue: Team) -> Self {
        Self {
            match_id: Uuid::new_v4(),
            teams: [red, blue],
        }
    }

    pub fn id(&self) -> Uuid {
        self.match_id
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn skill_gap(&self) -> u64 {
        self.teams[0].total_skill().abs_diff(self.teams[1].total_skill())
    }

    /// Number of candidates across both teams
    pub fn player_count(&self) -> usize {
        self.teams.iter().map(Team::len).sum()
    }
}
