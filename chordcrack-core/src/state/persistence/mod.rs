pub mod load;
pub mod save;
pub mod schema;
mod tests;

use std::path::Path;

use rusqlite::{Connection as SqlConnection, Result as SqlResult};

use chordcrack_types::{AchievementState, ProfileState, StatsState};

use crate::daily::DailyResult;
use crate::history::HistoryEntry;

/// Everything that survives across sessions, as one bundle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersistedProfile {
    pub profile: ProfileState,
    pub stats: StatsState,
    pub achievements: AchievementState,
    pub daily: Vec<DailyResult>,
    pub history: Vec<HistoryEntry>,
}

/// Save the profile bundle.
///
/// Uses WAL mode and an explicit transaction so the write is atomic: if the
/// process crashes mid-save the previous data remains intact.
pub fn save_profile(path: &Path, bundle: &PersistedProfile) -> SqlResult<()> {
    let conn = SqlConnection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;

    let tx = conn.unchecked_transaction()?;
    schema::create_tables(&tx)?;
    save::save_relational(&tx, bundle)?;
    tx.commit()?;

    Ok(())
}

/// Load the profile bundle. A database without tables yields defaults.
pub fn load_profile(path: &Path) -> SqlResult<PersistedProfile> {
    let conn = SqlConnection::open(path)?;

    let has_schema_version: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get::<_, i64>(0),
    )? > 0;

    if has_schema_version {
        load::load_relational(&conn)
    } else {
        Ok(PersistedProfile::default())
    }
}
