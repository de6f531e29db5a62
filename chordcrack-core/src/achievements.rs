//! Achievement evaluation, run by dispatch after state mutation.

use chordcrack_types::{Achievement, AchievementState, ProfileState, RoundResult, StatsState};

/// Check round-scoped achievements after a round resolves. Returns the
/// newly unlocked set in catalog order.
pub fn evaluate_round(
    profile: &ProfileState,
    stats: &StatsState,
    achievements: &mut AchievementState,
    result: &RoundResult,
    streak: u32,
    now_secs: u64,
) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    let mut try_unlock = |a: Achievement, met: bool| {
        if met && achievements.unlock(a, now_secs) {
            unlocked.push(a);
        }
    };

    try_unlock(Achievement::FirstCorrect, result.correct);
    try_unlock(
        Achievement::PerfectRound,
        result.correct && result.attempts_used == 1,
    );
    try_unlock(Achievement::Streak5, streak >= 5);
    try_unlock(Achievement::Streak10, streak >= 10);
    try_unlock(Achievement::Rounds50, stats.rounds_played >= 50);
    try_unlock(Achievement::Correct100, stats.rounds_correct >= 100);
    try_unlock(Achievement::Level3, profile.level() >= 3);
    try_unlock(Achievement::Level5, profile.level() >= 5);

    unlocked
}

/// Check game-scoped achievements when a standard or daily game finishes.
pub fn evaluate_game_end(
    achievements: &mut AchievementState,
    daily_completed: bool,
    flawless: bool,
    now_secs: u64,
) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    if daily_completed && achievements.unlock(Achievement::DailyDone, now_secs) {
        unlocked.push(Achievement::DailyDone);
    }
    if flawless && achievements.unlock(Achievement::FlawlessGame, now_secs) {
        unlocked.push(Achievement::FlawlessGame);
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordcrack_types::chord::CATALOG;

    fn round(correct: bool, attempts_used: u8) -> RoundResult {
        RoundResult {
            target: CATALOG[0].id,
            correct,
            attempts_used,
            points: if correct { 60 } else { 0 },
            bonus: 0,
            attempts: vec![],
        }
    }

    #[test]
    fn first_correct_and_perfect_unlock_together() {
        let profile = ProfileState::default();
        let stats = StatsState::default();
        let mut achievements = AchievementState::default();

        let unlocked = evaluate_round(&profile, &stats, &mut achievements, &round(true, 1), 1, 0);
        assert_eq!(
            unlocked,
            vec![Achievement::FirstCorrect, Achievement::PerfectRound]
        );

        // Already unlocked: nothing new
        let unlocked = evaluate_round(&profile, &stats, &mut achievements, &round(true, 1), 2, 0);
        assert!(unlocked.is_empty());
    }

    #[test]
    fn a_miss_unlocks_nothing_round_scoped() {
        let profile = ProfileState::default();
        let stats = StatsState::default();
        let mut achievements = AchievementState::default();
        let unlocked = evaluate_round(&profile, &stats, &mut achievements, &round(false, 6), 0, 0);
        assert!(unlocked.is_empty());
    }

    #[test]
    fn streak_thresholds() {
        let profile = ProfileState::default();
        let stats = StatsState::default();
        let mut achievements = AchievementState::default();
        let unlocked = evaluate_round(&profile, &stats, &mut achievements, &round(true, 2), 10, 0);
        assert!(unlocked.contains(&Achievement::Streak5));
        assert!(unlocked.contains(&Achievement::Streak10));
    }

    #[test]
    fn game_end_flags() {
        let mut achievements = AchievementState::default();
        let unlocked = evaluate_game_end(&mut achievements, true, true, 0);
        assert_eq!(
            unlocked,
            vec![Achievement::DailyDone, Achievement::FlawlessGame]
        );
        assert!(evaluate_game_end(&mut achievements, true, true, 0).is_empty());
    }
}
