use crate::core::error::FormationError;
use crate::models::Candidate;

/// Split an extracted group into two teams by snake distribution
///
/// Candidates are ranked by skill rating (descending, stable so ties keep
/// their extraction order) and dealt alternately: rank 0 to red, rank 1 to
/// blue, rank 2 to red, and so on. Before any balancing the two totals differ
/// by at most the strongest candidate's rating.
///
/// # Returns
/// `(red, blue)`, each holding `team_size` candidates in rank order
pub fn distribute_players(
    mut group: Vec<Candidate>,
    team_size: usize,
) -> Result<(Vec<Candidate>, Vec<Candidate>), FormationError> {
    let expected = team_size * 2;
    if group.len() != expected {
        return Err(FormationError::GroupSizeMismatch {
            expected,
            actual: group.len(),
        });
    }

    group.sort_by(|a, b| b.skill_rating().cmp(&a.skill_rating()));

    let mut red = Vec::with_capacity(team_size);
    let mut blue = Vec::with_capacity(team_size);
    for (rank, candidate) in group.into_iter().enumerate() {
        if rank % 2 == 0 {
            red.push(candidate);
        } else {
            blue.push(candidate);
        }
    }

    Ok((red, blue))
}
