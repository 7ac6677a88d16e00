//! Winner ranking.
//!
//! Projects rank by the sum of their evaluation scores, descending. The sort
//! is stable, so ties keep the input order (callers feed rows in id order).
//! Winners are the top [`WINNER_COUNT`] among projects with at least one
//! evaluation. The persisted `winner` flag is a cache of this computation,
//! written only by the explicit recompute operation; reads always re-derive.

use crate::types::DbId;

/// Number of winners selected within a scope.
pub const WINNER_COUNT: usize = 3;

/// A project's aggregate standing, as produced by the totals query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStanding {
    pub project_id: DbId,
    /// Sum of evaluation scores, in tenths.
    pub total_tenths: i64,
    pub evaluation_count: i64,
}

/// Order standings by total score descending, preserving input order on ties.
pub fn rank(mut standings: Vec<ProjectStanding>) -> Vec<ProjectStanding> {
    standings.sort_by(|a, b| b.total_tenths.cmp(&a.total_tenths));
    standings
}

/// Select the winning project ids: top [`WINNER_COUNT`] by total score among
/// standings with at least one evaluation.
pub fn winners(standings: Vec<ProjectStanding>) -> Vec<DbId> {
    rank(standings)
        .into_iter()
        .filter(|s| s.evaluation_count > 0)
        .take(WINNER_COUNT)
        .map(|s| s.project_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(project_id: DbId, total_tenths: i64, evaluation_count: i64) -> ProjectStanding {
        ProjectStanding {
            project_id,
            total_tenths,
            evaluation_count,
        }
    }

    #[test]
    fn test_orders_by_total_descending() {
        let ranked = rank(vec![
            standing(1, 245, 3),
            standing(2, 290, 3),
            standing(3, 100, 2),
        ]);
        let ids: Vec<_> = ranked.iter().map(|s| s.project_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![
            standing(5, 200, 3),
            standing(9, 200, 3),
            standing(2, 200, 3),
        ]);
        let ids: Vec<_> = ranked.iter().map(|s| s.project_id).collect();
        assert_eq!(ids, vec![5, 9, 2], "stable sort must not reorder ties");
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let input = vec![standing(1, 150, 2), standing(2, 150, 2), standing(3, 80, 1)];
        assert_eq!(winners(input.clone()), winners(input));
    }

    #[test]
    fn test_winners_caps_at_three() {
        let ids = winners(vec![
            standing(1, 100, 1),
            standing(2, 200, 2),
            standing(3, 300, 3),
            standing(4, 250, 3),
        ]);
        assert_eq!(ids, vec![3, 4, 2]);
    }

    #[test]
    fn test_unevaluated_projects_excluded() {
        let ids = winners(vec![
            standing(1, 0, 0),
            standing(2, 45, 1),
            standing(3, 0, 0),
        ]);
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_fewer_than_three_candidates() {
        let ids = winners(vec![standing(1, 80, 1), standing(2, 95, 2)]);
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_empty_scope() {
        assert!(winners(Vec::new()).is_empty());
    }
}
