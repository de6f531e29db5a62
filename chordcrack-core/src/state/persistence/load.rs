use rusqlite::{Connection, OptionalExtension, Result as SqlResult};

use chordcrack_types::{
    Achievement, AchievementState, ChordCategory, ChordId, GameMode, ProfileState, StatsState,
};

use crate::daily::DailyResult;
use crate::history::HistoryEntry;

use super::PersistedProfile;

/// Load the full bundle from relational tables. Missing rows fall back to
/// defaults; overall stats counters are recomputed from category rows.
pub fn load_relational(conn: &Connection) -> SqlResult<PersistedProfile> {
    Ok(PersistedProfile {
        profile: load_profile_row(conn)?,
        stats: load_stats(conn)?,
        achievements: load_achievements(conn)?,
        daily: load_daily_results(conn)?,
        history: load_round_history(conn)?,
    })
}

fn load_profile_row(conn: &Connection) -> SqlResult<ProfileState> {
    let row = conn
        .query_row(
            "SELECT username, xp, games_played, best_streak, best_game_score,
                    daily_streak, last_daily_day
             FROM profile WHERE id = 1",
            [],
            |row| {
                Ok(ProfileState {
                    username: row.get(0)?,
                    xp: row.get(1)?,
                    games_played: row.get(2)?,
                    best_streak: row.get(3)?,
                    best_game_score: row.get(4)?,
                    daily_streak: row.get(5)?,
                    last_daily_day: row.get::<_, Option<i64>>(6)?.map(|d| d as u64),
                })
            },
        )
        .optional()?;
    Ok(row.unwrap_or_default())
}

fn load_stats(conn: &Connection) -> SqlResult<StatsState> {
    let mut stats = StatsState::default();
    let mut stmt = conn.prepare("SELECT category, correct, total FROM category_stats")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, u32>(1)?,
            row.get::<_, u32>(2)?,
        ))
    })?;
    for row in rows {
        let (name, correct, total) = row?;
        let Some(category) = ChordCategory::parse(&name) else {
            log::warn!(target: "persistence", "skipping unknown category {:?}", name);
            continue;
        };
        let idx = ChordCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        stats.by_category[idx] = (correct, total);
    }
    // Overall counters are not persisted; recompute from category rows.
    stats.rounds_correct = stats.by_category.iter().map(|(c, _)| c).sum();
    stats.rounds_played = stats.by_category.iter().map(|(_, t)| t).sum();
    Ok(stats)
}

fn load_achievements(conn: &Connection) -> SqlResult<AchievementState> {
    let mut state = AchievementState::default();
    let mut stmt = conn.prepare("SELECT key, unlocked_at FROM achievements ORDER BY unlocked_at")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;
    for row in rows {
        let (key, at) = row?;
        match Achievement::from_key(&key) {
            Some(achievement) => {
                state.unlock(achievement, at as u64);
            }
            None => log::warn!(target: "persistence", "skipping unknown achievement {:?}", key),
        }
    }
    Ok(state)
}

fn load_round_history(conn: &Connection) -> SqlResult<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT at_epoch, mode, target, correct, attempts_used, points, bonus, attempts
         FROM round_history ORDER BY id",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, u16>(2)?,
            row.get::<_, i32>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u32>(5)?,
            row.get::<_, u32>(6)?,
            row.get::<_, String>(7)?,
        ))
    })?;

    let mut history = Vec::new();
    for row in rows {
        let (at, mode, target, correct, attempts_used, points, bonus, attempts) = row?;
        let mode: GameMode = serde_json::from_str(&mode)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))?;
        let attempts: Vec<Option<ChordId>> = serde_json::from_str(&attempts)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))?;
        history.push(HistoryEntry {
            at: at as u64,
            mode,
            target: ChordId::new(target),
            correct: correct != 0,
            attempts_used,
            points,
            bonus,
            attempts,
        });
    }
    Ok(history)
}

fn load_daily_results(conn: &Connection) -> SqlResult<Vec<DailyResult>> {
    let mut stmt =
        conn.prepare("SELECT day, score, correct, rounds FROM daily_results ORDER BY day")?;
    let rows = stmt.query_map([], |row| {
        Ok(DailyResult {
            day: row.get::<_, i64>(0)? as u64,
            score: row.get(1)?,
            correct: row.get(2)?,
            rounds: row.get(3)?,
        })
    })?;
    rows.collect()
}
