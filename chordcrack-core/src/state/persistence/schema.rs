use rusqlite::{Connection, Result as SqlResult};

/// Schema version for the profile database.
pub const SCHEMA_VERSION: i32 = 1;

/// Create all tables.
pub fn create_tables(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(SCHEMA_SQL)
}

/// Delete all data from all tables (preserving schema).
pub fn delete_all_data(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(DELETE_ALL_SQL)
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);

-- ============================================================
-- Profile
-- ============================================================

CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    username TEXT NOT NULL,
    xp INTEGER NOT NULL,
    games_played INTEGER NOT NULL,
    best_streak INTEGER NOT NULL,
    best_game_score INTEGER NOT NULL,
    daily_streak INTEGER NOT NULL DEFAULT 0,
    last_daily_day INTEGER
);

CREATE TABLE IF NOT EXISTS category_stats (
    category TEXT PRIMARY KEY,
    correct INTEGER NOT NULL,
    total INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS achievements (
    key TEXT PRIMARY KEY,
    unlocked_at INTEGER NOT NULL
);

-- ============================================================
-- History
-- ============================================================

CREATE TABLE IF NOT EXISTS round_history (
    id INTEGER PRIMARY KEY,
    at_epoch INTEGER NOT NULL,
    mode TEXT NOT NULL,
    target INTEGER NOT NULL,
    correct INTEGER NOT NULL,
    attempts_used INTEGER NOT NULL,
    points INTEGER NOT NULL,
    bonus INTEGER NOT NULL,
    -- guess sequence as a JSON array of chord ids / nulls
    attempts TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS daily_results (
    day INTEGER PRIMARY KEY,
    score INTEGER NOT NULL,
    correct INTEGER NOT NULL,
    rounds INTEGER NOT NULL
);
";

const DELETE_ALL_SQL: &str = "
DELETE FROM schema_version;
DELETE FROM profile;
DELETE FROM category_stats;
DELETE FROM achievements;
DELETE FROM round_history;
DELETE FROM daily_results;
";
