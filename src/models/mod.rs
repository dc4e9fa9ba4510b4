// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, Match, PriorityWeights, Role, Team, TeamSide, TeamSlot};
pub use requests::{FormMatchesRequest, PlayerRecord};
pub use responses::{ErrorResponse, FormMatchesResponse, HealthResponse, MatchRecord, TeamRecord, UserRecord};
