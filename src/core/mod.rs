// Core algorithm exports
pub mod balancer;
pub mod distributor;
pub mod error;
pub mod formation;
pub mod pool;
pub mod priority;
pub mod roles;

pub use balancer::{balance_teams, BalanceOutcome, DEFAULT_BALANCE_ITERATIONS};
pub use distributor::distribute_players;
pub use error::{FormationError, PartialFormation};
pub use formation::{Formation, FormationConfig, MatchFormer};
pub use pool::CandidatePool;
pub use priority::calculate_priority_score;
pub use roles::{assign_roles, RoleSelection};
