//! Plain-text rendering of status events, score, stats, and fretboard
//! diagrams.

use chordcrack_core::state::{AppState, SessionKind};
use chordcrack_types::{
    Achievement, Chord, ChordCategory, ChordId, RoundState, StatusEvent, StringFret,
};

fn chord_name(id: ChordId) -> &'static str {
    Chord::get(id).map(|c| c.name).unwrap_or("?")
}

pub fn status(event: &StatusEvent) -> String {
    match event {
        StatusEvent::Info(msg) => msg.clone(),
        StatusEvent::Error(msg) => format!("error: {}", msg),
        StatusEvent::RoundWon {
            points,
            bonus,
            attempt,
            streak,
        } => {
            let mut line = format!("Correct on attempt {}! +{} points", attempt, points);
            if *bonus > 0 {
                line.push_str(&format!(" (+{} streak bonus)", bonus));
            }
            line.push_str(&format!(" — streak {}", streak));
            line
        }
        StatusEvent::RoundLost { answer } => {
            format!("Out of attempts — it was {}", chord_name(*answer))
        }
        StatusEvent::GameOver {
            score,
            correct,
            rounds,
        } => format!(
            "Game over: {} points, {} of {} rounds correct",
            score, correct, rounds
        ),
        StatusEvent::LevelUp(level) => format!("Level up! You are now level {}", level),
        StatusEvent::AchievementUnlocked(a) => {
            format!("Achievement unlocked: {} — {}", a.title(), a.description())
        }
        StatusEvent::DailyAlreadyPlayed { score } => {
            format!("Today's daily is done ({} points). Come back tomorrow.", score)
        }
    }
}

fn live_round(session: &SessionKind) -> Option<&RoundState> {
    match session {
        SessionKind::Idle => None,
        SessionKind::Game(g) => g.round.as_ref(),
        SessionKind::Practice(p) => p.round.as_ref(),
        SessionKind::Mixed(m) => m.round.as_ref(),
    }
}

pub fn score(state: &AppState) -> String {
    let mut out = String::new();
    match &state.session {
        SessionKind::Idle => {}
        SessionKind::Game(g) => {
            out.push_str(&format!(
                "{} — round {} of {}, score {}, streak {}\n",
                g.mode().name(),
                (g.round_index + 1).min(g.rounds_per_game),
                g.rounds_per_game,
                g.board.score,
                g.board.streak
            ));
        }
        SessionKind::Practice(p) => {
            out.push_str(&format!(
                "Practice ({}) — {} of {} correct, streak {}\n",
                p.category,
                p.correct,
                p.rounds_played,
                p.board.streak
            ));
        }
        SessionKind::Mixed(m) => {
            out.push_str(&format!(
                "Mixed practice — {} of {} correct, streak {}\n",
                m.correct, m.rounds_played, m.board.streak
            ));
        }
    }
    let (into, per) = state.profile.level_progress();
    out.push_str(&format!(
        "{}: level {} ({}/{} xp), {} games, best streak {}, best game {}",
        state.profile.username,
        state.profile.level(),
        into,
        per,
        state.profile.games_played,
        state.profile.best_streak,
        state.profile.best_game_score
    ));
    if state.profile.daily_streak > 0 {
        out.push_str(&format!(", daily streak {}", state.profile.daily_streak));
    }
    out
}

pub fn stats(state: &AppState) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Rounds: {} played, {} correct ({:.0}%)\n",
        state.stats.rounds_played,
        state.stats.rounds_correct,
        state.stats.accuracy() * 100.0
    ));
    for category in ChordCategory::ALL {
        let (correct, played) = state.stats.category(category);
        if played == 0 {
            out.push_str(&format!("  {:<10} —\n", category.name()));
        } else {
            out.push_str(&format!(
                "  {:<10} {}/{} ({:.0}%)\n",
                category.name(),
                correct,
                played,
                correct as f32 / played as f32 * 100.0
            ));
        }
    }
    out.push_str(&format!(
        "Achievements: {} of {}\n",
        state.achievements.unlocked.len(),
        Achievement::ALL.len()
    ));
    for achievement in Achievement::ALL {
        let mark = if state.achievements.is_unlocked(achievement) {
            "x"
        } else {
            " "
        };
        out.push_str(&format!(
            "  [{}] {} — {}\n",
            mark,
            achievement.title(),
            achievement.description()
        ));
    }
    out.pop();
    out
}

/// Catalog by category, with locked categories marked.
pub fn chords(state: &AppState) -> String {
    let level = state.profile.level();
    let mut out = String::new();
    for category in ChordCategory::ALL {
        let locked = category.unlock_level() > level;
        let names: Vec<&str> = Chord::in_category(category)
            .iter()
            .map(|c| c.name)
            .collect();
        if locked {
            out.push_str(&format!(
                "{} (unlocks at level {}): {}\n",
                category.name(),
                category.unlock_level(),
                names.join(", ")
            ));
        } else {
            out.push_str(&format!("{}: {}\n", category.name(), names.join(", ")));
        }
    }
    out.pop();
    out
}

pub fn choices(state: &AppState) -> String {
    match live_round(&state.session) {
        Some(round) if !round.candidates.is_empty() => {
            let names: Vec<&str> = round
                .candidates
                .iter()
                .map(|id| chord_name(*id))
                .collect();
            format!("It is one of: {}", names.join(", "))
        }
        Some(_) => "No candidate list for this round".to_string(),
        None => "No round in progress".to_string(),
    }
}

/// Fretboard diagram, high E on top.
///
/// ```text
/// C (Open)
/// e |--0--
/// B |--1--
/// G |--0--
/// D |--2--
/// A |--3--
/// E |--x--
/// ```
pub fn diagram(name: &str) -> String {
    let Some(chord) = Chord::by_name(name) else {
        return format!("unknown chord {:?} — `chords` lists them", name);
    };
    let labels = ["E", "A", "D", "G", "B", "e"];
    let mut out = format!("{} ({})\n", chord.name, chord.category);
    for string in (0..6).rev() {
        let cell = match chord.fingering.0[string] {
            StringFret::Muted => "x".to_string(),
            StringFret::Open => "0".to_string(),
            StringFret::Fret(n) => n.to_string(),
        };
        out.push_str(&format!("{} |--{:>2}--\n", labels[string], cell));
    }
    out.pop();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordcrack_types::chord::CATALOG;

    #[test]
    fn diagram_shows_every_string() {
        let out = diagram(CATALOG[0].name);
        assert_eq!(out.lines().count(), 7);
        assert!(out.starts_with(CATALOG[0].name));
    }

    #[test]
    fn round_won_mentions_bonus_only_when_present() {
        let with = status(&StatusEvent::RoundWon {
            points: 50,
            bonus: 10,
            attempt: 2,
            streak: 3,
        });
        assert!(with.contains("streak bonus"));
        let without = status(&StatusEvent::RoundWon {
            points: 60,
            bonus: 0,
            attempt: 1,
            streak: 1,
        });
        assert!(!without.contains("streak bonus"));
    }

    #[test]
    fn round_lost_names_the_answer() {
        let out = status(&StatusEvent::RoundLost {
            answer: CATALOG[3].id,
        });
        assert!(out.contains(CATALOG[3].name));
    }
}
