use std::iter::FusedIterator;

use crate::core::{
    balancer::{balance_teams, DEFAULT_BALANCE_ITERATIONS},
    distributor::distribute_players,
    error::{FormationError, PartialFormation},
    pool::CandidatePool,
    roles::{assign_roles, RoleSelection},
};
use crate::models::{Candidate, Match, Role, Team, TeamSide};

/// Construction-time parameters of the formation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationConfig {
    team_size: usize,
    balance_iterations: usize,
    role_selection: RoleSelection,
}

impl FormationConfig {
    /// Build a validated config
    ///
    /// `team_size` must be between 1 and the number of canonical roles; a
    /// team of `n` fills the first `n` roles in canonical order.
    pub fn new(
        team_size: usize,
        balance_iterations: usize,
        role_selection: RoleSelection,
    ) -> Result<Self, FormationError> {
        if team_size == 0 || team_size > Role::ALL.len() {
            return Err(FormationError::InvalidTeamSize(team_size));
        }

        Ok(Self {
            team_size,
            balance_iterations,
            role_selection,
        })
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Candidates consumed per match
    pub fn group_size(&self) -> usize {
        self.team_size * 2
    }

    pub fn balance_iterations(&self) -> usize {
        self.balance_iterations
    }

    pub fn role_selection(&self) -> RoleSelection {
        self.role_selection
    }

    /// Roles filled on each team, in assignment order
    pub fn roles(&self) -> &'static [Role] {
        &Role::ALL[..self.team_size]
    }
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            team_size: Role::ALL.len(),
            balance_iterations: DEFAULT_BALANCE_ITERATIONS,
            role_selection: RoleSelection::default(),
        }
    }
}

/// Main formation orchestrator - drives the match-formation pipeline
///
/// # Pipeline Stages
/// 1. Group extraction from the candidate pool
/// 2. Snake distribution into two teams
/// 3. Role assignment per team
/// 4. Same-role swap balancing
#[derive(Debug, Clone, Default)]
pub struct MatchFormer {
    config: FormationConfig,
}

impl MatchFormer {
    pub fn new(config: FormationConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &FormationConfig {
        &self.config
    }

    /// Pull the next group of highest-priority candidates out of the pool
    pub fn extract_group(&self, pool: &mut CandidatePool) -> Result<Vec<Candidate>, FormationError> {
        pool.extract_top(self.config.group_size())
    }

    /// Turn one extracted group into a balanced match
    ///
    /// On error the group is consumed and no match is produced.
    pub fn form_single_match(&self, group: Vec<Candidate>) -> Result<Match, FormationError> {
        let (red, blue) = distribute_players(group, self.config.team_size)?;

        let roles = self.config.roles();
        let red = assign_roles(red, roles, self.config.role_selection)?;
        let blue = assign_roles(blue, roles, self.config.role_selection)?;

        let mut m = Match::new(Team::new(TeamSide::Red, red), Team::new(TeamSide::Blue, blue));
        let outcome = balance_teams(&mut m, self.config.balance_iterations);

        tracing::debug!(
            "Formed match {}: skill gap {} -> {} after balancing",
            m.id(),
            outcome.gap_before,
            outcome.gap_after
        );

        Ok(m)
    }

    /// Lazily form matches until the pool runs short
    ///
    /// Yields one result per extracted group and stops after the first error.
    pub fn formation<'a>(&'a self, pool: &'a mut CandidatePool) -> Formation<'a> {
        Formation {
            former: self,
            pool,
            failed: false,
        }
    }

    /// Form as many matches as the pool allows
    ///
    /// Stops without error once fewer than `2 × team_size` candidates remain;
    /// those stay in the pool. A failing group aborts the run, and the
    /// matches formed before it are returned inside the error.
    pub fn form_matches(&self, pool: &mut CandidatePool) -> Result<Vec<Match>, PartialFormation> {
        let total_candidates = pool.len();
        let mut matches = Vec::with_capacity(total_candidates / self.config.group_size());

        for result in self.formation(pool) {
            match result {
                Ok(m) => matches.push(m),
                Err(error) => {
                    tracing::warn!(
                        "Match formation aborted after {} matches: {}",
                        matches.len(),
                        error
                    );
                    return Err(PartialFormation { matches, error });
                }
            }
        }

        tracing::info!(
            "Formed {} matches from {} candidates ({} left in pool)",
            matches.len(),
            total_candidates,
            pool.len()
        );

        Ok(matches)
    }
}

/// Iterator returned by [`MatchFormer::formation`]
pub struct Formation<'a> {
    former: &'a MatchFormer,
    pool: &'a mut CandidatePool,
    failed: bool,
}

impl Iterator for Formation<'_> {
    type Item = Result<Match, FormationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pool.len() < self.former.config.group_size() {
            return None;
        }

        let result = self
            .former
            .extract_group(self.pool)
            .and_then(|group| self.former.form_single_match(group));

        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        (0, Some(self.pool.len() / self.former.config.group_size()))
    }
}

impl FusedIterator for Formation<'_> {}
