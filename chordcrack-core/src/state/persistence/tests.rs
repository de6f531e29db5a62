#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use chordcrack_types::chord::CATALOG;
    use chordcrack_types::{
        Achievement, AchievementState, ChordCategory, GameMode, ProfileState, StatsState,
    };

    use crate::daily::DailyResult;
    use crate::history::HistoryEntry;
    use crate::state::persistence::{load_profile, save_profile, PersistedProfile};

    fn temp_db_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        path.push(format!("chordcrack_persistence_test_{}.sqlite", nanos));
        path
    }

    fn sample_bundle() -> PersistedProfile {
        let mut profile = ProfileState::new("rosa");
        profile.xp = 1234;
        profile.games_played = 7;
        profile.best_streak = 9;
        profile.best_game_score = 280;
        profile.daily_streak = 3;
        profile.last_daily_day = Some(19_800);

        let mut stats = StatsState::default();
        stats.record(ChordCategory::Open, true);
        stats.record(ChordCategory::Open, false);
        stats.record(ChordCategory::Barre, true);

        let mut achievements = AchievementState::default();
        achievements.unlock(Achievement::FirstCorrect, 1_700_000_000);
        achievements.unlock(Achievement::Streak5, 1_700_000_100);

        PersistedProfile {
            profile,
            stats,
            achievements,
            daily: vec![
                DailyResult {
                    day: 19_799,
                    score: 240,
                    correct: 4,
                    rounds: 5,
                },
                DailyResult {
                    day: 19_800,
                    score: 300,
                    correct: 5,
                    rounds: 5,
                },
            ],
            history: vec![HistoryEntry {
                at: 1_700_000_000,
                mode: GameMode::Practice(ChordCategory::Open),
                target: CATALOG[3].id,
                correct: true,
                attempts_used: 2,
                points: 50,
                bonus: 5,
                attempts: vec![Some(CATALOG[0].id), Some(CATALOG[3].id)],
            }],
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = temp_db_path();
        let bundle = sample_bundle();
        save_profile(&path, &bundle).unwrap();
        let loaded = load_profile(&path).unwrap();
        assert_eq!(loaded, bundle);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn overall_stats_recomputed_from_category_rows() {
        let path = temp_db_path();
        let bundle = sample_bundle();
        save_profile(&path, &bundle).unwrap();
        let loaded = load_profile(&path).unwrap();
        assert_eq!(loaded.stats.rounds_played, 3);
        assert_eq!(loaded.stats.rounds_correct, 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn empty_database_loads_defaults() {
        let path = temp_db_path();
        // Creates the file without any tables
        let _ = rusqlite::Connection::open(&path).unwrap();
        let loaded = load_profile(&path).unwrap();
        assert_eq!(loaded, PersistedProfile::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn resave_overwrites_previous_data() {
        let path = temp_db_path();
        save_profile(&path, &sample_bundle()).unwrap();

        let mut smaller = PersistedProfile::default();
        smaller.profile.username = "tess".to_string();
        save_profile(&path, &smaller).unwrap();

        let loaded = load_profile(&path).unwrap();
        assert_eq!(loaded, smaller);
        assert!(loaded.history.is_empty());
        let _ = std::fs::remove_file(&path);
    }
}
