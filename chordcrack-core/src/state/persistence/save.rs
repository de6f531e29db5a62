use rusqlite::{params, Connection, Result as SqlResult};

use chordcrack_types::ChordCategory;

use super::schema::{self, SCHEMA_VERSION};
use super::PersistedProfile;

/// Save the profile bundle to relational tables. Performs DELETE-all +
/// INSERT-current atomically (caller provides the transaction).
pub fn save_relational(conn: &Connection, bundle: &PersistedProfile) -> SqlResult<()> {
    schema::delete_all_data(conn)?;

    conn.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        params![SCHEMA_VERSION],
    )?;

    save_profile_row(conn, bundle)?;
    save_category_stats(conn, bundle)?;
    save_achievements(conn, bundle)?;
    save_round_history(conn, bundle)?;
    save_daily_results(conn, bundle)?;

    Ok(())
}

fn save_profile_row(conn: &Connection, bundle: &PersistedProfile) -> SqlResult<()> {
    let p = &bundle.profile;
    conn.execute(
        "INSERT INTO profile (id, username, xp, games_played, best_streak, best_game_score,
            daily_streak, last_daily_day)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            p.username,
            p.xp,
            p.games_played,
            p.best_streak,
            p.best_game_score,
            p.daily_streak,
            p.last_daily_day.map(|d| d as i64),
        ],
    )?;
    Ok(())
}

fn save_category_stats(conn: &Connection, bundle: &PersistedProfile) -> SqlResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO category_stats (category, correct, total) VALUES (?1, ?2, ?3)",
    )?;
    for (i, category) in ChordCategory::ALL.iter().enumerate() {
        let (correct, total) = bundle.stats.by_category[i];
        stmt.execute(params![category.name(), correct, total])?;
    }
    Ok(())
}

fn save_achievements(conn: &Connection, bundle: &PersistedProfile) -> SqlResult<()> {
    let mut stmt =
        conn.prepare("INSERT INTO achievements (key, unlocked_at) VALUES (?1, ?2)")?;
    for (achievement, at) in &bundle.achievements.unlocked {
        stmt.execute(params![achievement.key(), *at as i64])?;
    }
    Ok(())
}

fn save_round_history(conn: &Connection, bundle: &PersistedProfile) -> SqlResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO round_history (id, at_epoch, mode, target, correct, attempts_used,
            points, bonus, attempts)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )?;
    for (i, entry) in bundle.history.iter().enumerate() {
        let mode = serde_json::to_string(&entry.mode)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))?;
        let attempts = serde_json::to_string(&entry.attempts)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))?;
        stmt.execute(params![
            i as i64 + 1,
            entry.at as i64,
            mode,
            entry.target.get(),
            entry.correct as i32,
            entry.attempts_used,
            entry.points,
            entry.bonus,
            attempts,
        ])?;
    }
    Ok(())
}

fn save_daily_results(conn: &Connection, bundle: &PersistedProfile) -> SqlResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO daily_results (day, score, correct, rounds) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for result in &bundle.daily {
        stmt.execute(params![
            result.day as i64,
            result.score,
            result.correct,
            result.rounds,
        ])?;
    }
    Ok(())
}
