use crate::models::PriorityWeights;

/// Calculate the queue priority score for a candidate
///
/// Scoring formula:
/// score = -(
///     waiting_ticks / 1000 * 0.7 +     # Longer wait = higher priority
///     skill_rating / 3000 * 0.3        # Higher rating = higher priority
/// )
///
/// The result is negated so that the most negative score is served first.
/// Inputs beyond the normalization constants are not clamped.
#[inline]
pub fn calculate_priority_score(waiting_ticks: u32, skill_rating: u32, weights: &PriorityWeights) -> f64 {
    let normalized_waiting = f64::from(waiting_ticks) / weights.waiting_time_scale;
    let normalized_skill = f64::from(skill_rating) / weights.skill_scale;

    -(weights.waiting_time * normalized_waiting + weights.skill * normalized_skill)
}
