//! Reducers that fold round and game results into the persistent profile.

use crate::chord::ChordCategory;
use crate::profile::{ProfileState, StatsState};
use crate::round::RoundResult;

/// Fold a finished round into profile and stats. Returns the new level when
/// the xp award crossed a level boundary.
pub fn apply_round(
    profile: &mut ProfileState,
    stats: &mut StatsState,
    category: ChordCategory,
    result: &RoundResult,
    session_streak: u32,
) -> Option<u32> {
    let before = profile.level();
    profile.award(result.points + result.bonus);
    profile.best_streak = profile.best_streak.max(session_streak);
    stats.record(category, result.correct);

    let after = profile.level();
    (after > before).then_some(after)
}

/// Fold a finished standard/daily game into the profile.
pub fn apply_game_end(profile: &mut ProfileState, score: u32) {
    profile.games_played += 1;
    profile.best_game_score = profile.best_game_score.max(score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::CATALOG;
    use crate::profile::XP_PER_LEVEL;

    fn won_round(points: u32) -> RoundResult {
        RoundResult {
            target: CATALOG[0].id,
            correct: true,
            attempts_used: 1,
            points,
            bonus: 0,
            attempts: vec![Some(CATALOG[0].id)],
        }
    }

    #[test]
    fn level_up_is_reported_once() {
        let mut profile = ProfileState::default();
        let mut stats = StatsState::default();
        profile.xp = XP_PER_LEVEL - 10;

        let up = apply_round(
            &mut profile,
            &mut stats,
            ChordCategory::Open,
            &won_round(60),
            1,
        );
        assert_eq!(up, Some(2));

        let up = apply_round(
            &mut profile,
            &mut stats,
            ChordCategory::Open,
            &won_round(60),
            2,
        );
        assert_eq!(up, None);
        assert_eq!(stats.rounds_correct, 2);
    }

    #[test]
    fn game_end_tracks_bests() {
        let mut profile = ProfileState::default();
        apply_game_end(&mut profile, 200);
        apply_game_end(&mut profile, 150);
        assert_eq!(profile.games_played, 2);
        assert_eq!(profile.best_game_score, 200);
    }
}
