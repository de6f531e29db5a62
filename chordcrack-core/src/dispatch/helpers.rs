//! Shared helpers for the per-domain dispatchers: chord selection and
//! round-resolution bookkeeping.

use chordcrack_types::reduce::profile as profile_reduce;
use chordcrack_types::{
    Chord, ChordCategory, ChordId, DispatchResult, GameMode, RoundResult, StatusEvent,
};

use crate::achievements;
use crate::history::HistoryEntry;
use crate::rng::SplitMix64;
use crate::state::AppState;

/// Pick a random chord from a category. Falls back to the first catalog
/// entry if the category were ever empty.
pub fn pick_chord(rng: &mut SplitMix64, category: ChordCategory) -> ChordId {
    let pool = Chord::in_category(category);
    rng.choose(&pool).map(|c| c.id).unwrap_or(Chord::all()[0].id)
}

/// Candidate set for the audio-choice tier: the target plus two distinct
/// same-category decoys, with the target at a random position.
pub fn candidate_set(rng: &mut SplitMix64, target: ChordId) -> Vec<ChordId> {
    let category = Chord::get(target).map(|c| c.category).unwrap_or(ChordCategory::Open);
    let mut pool: Vec<ChordId> = Chord::in_category(category)
        .into_iter()
        .map(|c| c.id)
        .filter(|id| *id != target)
        .collect();

    let mut candidates = Vec::with_capacity(3);
    for _ in 0..2 {
        if pool.is_empty() {
            break;
        }
        let idx = rng.next_below(pool.len());
        candidates.push(pool.swap_remove(idx));
    }
    let slot = rng.next_below(candidates.len() + 1);
    candidates.insert(slot, target);
    candidates
}

/// Fold a resolved round into profile, stats, history, and achievements,
/// pushing the derived status events. `streak` is the session streak after
/// the round resolved.
pub fn resolve_round(
    state: &mut AppState,
    result: &RoundResult,
    streak: u32,
    mode: GameMode,
    out: &mut DispatchResult,
) {
    let category = Chord::get(result.target)
        .map(|c| c.category)
        .unwrap_or(ChordCategory::Open);

    if let Some(level) = profile_reduce::apply_round(
        &mut state.profile,
        &mut state.stats,
        category,
        result,
        streak,
    ) {
        out.push_status(StatusEvent::LevelUp(level));
    }

    let entry = HistoryEntry {
        at: HistoryEntry::now_secs(),
        mode,
        target: result.target,
        correct: result.correct,
        attempts_used: result.attempts_used,
        points: result.points,
        bonus: result.bonus,
        attempts: result.attempts.clone(),
    };
    if let Some(log) = state.round_log.as_mut() {
        log.append(&entry);
    }
    state.history.push(entry);

    let now = HistoryEntry::now_secs();
    for achievement in achievements::evaluate_round(
        &state.profile,
        &state.stats,
        &mut state.achievements,
        result,
        streak,
        now,
    ) {
        out.push_status(StatusEvent::AchievementUnlocked(achievement));
    }

    state.dirty = true;
    out.profile_dirty = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_set_contains_target_and_two_decoys() {
        let mut rng = SplitMix64::new(3);
        for chord in Chord::all() {
            let candidates = candidate_set(&mut rng, chord.id);
            assert_eq!(candidates.len(), 3, "{}", chord.name);
            assert!(candidates.contains(&chord.id));
            // Decoys share the target's category and are distinct
            for id in &candidates {
                assert_eq!(Chord::get(*id).unwrap().category, chord.category);
            }
            let mut unique = candidates.clone();
            unique.dedup();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn pick_chord_respects_category() {
        let mut rng = SplitMix64::new(11);
        for _ in 0..50 {
            let id = pick_chord(&mut rng, ChordCategory::Barre);
            assert_eq!(Chord::get(id).unwrap().category, ChordCategory::Barre);
        }
    }
}
