use crate::models::{Match, Team};

/// Default number of passes over the swap neighbourhood
pub const DEFAULT_BALANCE_ITERATIONS: usize = 100;

/// Skill gap before and after balancing a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceOutcome {
    pub gap_before: u64,
    pub gap_after: u64,
}

impl BalanceOutcome {
    pub fn improved(&self) -> bool {
        self.gap_after < self.gap_before
    }
}

/// Reduce the skill gap of a match by swapping same-role players across teams
///
/// Every pass tries each red/blue slot pair sharing a role as a hypothetical
/// swap, remembers the configuration with the smallest gap seen so far
/// (strict improvement only), and undoes the swap before trying the next
/// pair. Since the live teams never change during the search, every pass
/// evaluates the same neighbourhood: the result is the best single swap, or
/// the original teams when no swap helps. The gap never increases.
pub fn balance_teams(m: &mut Match, max_iterations: usize) -> BalanceOutcome {
    let gap_before = m.skill_gap();
    let mut best_gap = gap_before;
    let mut best_teams: Option<[Team; 2]> = None;

    let red_total = m.teams[0].total_skill();
    let blue_total = m.teams[1].total_skill();

    for _ in 0..max_iterations {
        let [red, blue] = &m.teams;
        for (i, red_slot) in red.slots.iter().enumerate() {
            for (j, blue_slot) in blue.slots.iter().enumerate() {
                if red_slot.role != blue_slot.role {
                    continue;
                }

                let red_skill = u64::from(red_slot.candidate.skill_rating());
                let blue_skill = u64::from(blue_slot.candidate.skill_rating());

                // Totals with the two candidates exchanged
                let new_red = red_total - red_skill + blue_skill;
                let new_blue = blue_total - blue_skill + red_skill;
                let gap = new_red.abs_diff(new_blue);

                if gap < best_gap {
                    best_gap = gap;
                    best_teams = Some(swapped(&m.teams, i, j));
                }
            }
        }
    }

    if let Some(teams) = best_teams {
        m.teams = teams;
    }

    tracing::trace!(
        "Balanced match {}: gap {} -> {}",
        m.id(),
        gap_before,
        best_gap
    );

    BalanceOutcome {
        gap_before,
        gap_after: best_gap,
    }
}

/// Snapshot of `teams` with red slot `i` and blue slot `j` exchanging candidates
fn swapped(teams: &[Team; 2], i: usize, j: usize) -> [Team; 2] {
    let mut snapshot = teams.clone();
    let [red, blue] = &mut snapshot;
    std::mem::swap(&mut red.slots[i].candidate, &mut blue.slots[j].candidate);
    snapshot
}
