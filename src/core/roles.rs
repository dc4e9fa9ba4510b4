use serde::Deserialize;
use std::cmp::Ordering;

use crate::core::error::FormationError;
use crate::models::{Candidate, Role, TeamSlot};

/// Which candidate claims a role when several are still unassigned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSelection {
    /// The candidate ranking the role lowest takes it
    #[default]
    LeastPreferred,
    /// The candidate ranking the role highest takes it
    MostPreferred,
}

impl RoleSelection {
    /// `Less` means the candidate with `a` as preference rank is picked over `b`
    #[inline]
    fn compare(self, a: usize, b: usize) -> Ordering {
        match self {
            RoleSelection::LeastPreferred => b.cmp(&a),
            RoleSelection::MostPreferred => a.cmp(&b),
        }
    }
}

/// Preference rank of every canonical role, indexed by `Role as usize`
fn rank_table(candidate: &Candidate) -> Result<[usize; 5], FormationError> {
    let mut ranks = [0; 5];
    for role in Role::ALL {
        ranks[role as usize] = candidate
            .preference_rank(role)
            .ok_or_else(|| FormationError::RoleNotFound {
                candidate_id: candidate.id().to_string(),
                role,
            })?;
    }
    Ok(ranks)
}

/// Bind each role to exactly one team member
///
/// Roles are filled in the given order. For each role the remaining member
/// chosen by `selection` takes it; ties go to the member listed first.
/// Every member must rank all five canonical roles, otherwise nothing is
/// assigned and `RoleNotFound` is returned.
pub fn assign_roles(
    members: Vec<Candidate>,
    roles: &[Role],
    selection: RoleSelection,
) -> Result<Vec<TeamSlot>, FormationError> {
    if members.len() != roles.len() {
        return Err(FormationError::GroupSizeMismatch {
            expected: roles.len(),
            actual: members.len(),
        });
    }

    let mut remaining = members
        .into_iter()
        .map(|candidate| rank_table(&candidate).map(|ranks| (candidate, ranks)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut slots = Vec::with_capacity(roles.len());
    for &role in roles {
        let picked = remaining
            .iter()
            .enumerate()
            .min_by(|(_, (_, a)), (_, (_, b))| {
                selection.compare(a[role as usize], b[role as usize])
            })
            .map(|(index, _)| index);

        let Some(index) = picked else {
            return Err(FormationError::GroupSizeMismatch {
                expected: roles.len(),
                actual: slots.len(),
            });
        };

        let (candidate, _) = remaining.remove(index);
        slots.push(TeamSlot { candidate, role });
    }

    Ok(slots)
}
